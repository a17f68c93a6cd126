//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Folder containing one .ts recording and one *Metadata.json log
    #[arg(short, long)]
    pub folder: PathBuf,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Folder containing one .ts recording and one *Metadata.json log
    #[arg(short, long)]
    pub folder: PathBuf,
}
