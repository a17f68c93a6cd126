//! Command-line interface definitions

mod args;

pub use args::{InspectArgs, ProcessArgs};

use clap::{Parser, Subcommand};

/// DashHud command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "dashhud",
    version,
    about = "Burns a synchronized telemetry heads-up overlay onto dashcam recordings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a recording folder into an overlaid output video
    Process(ProcessArgs),
    /// Show a folder's resolved inputs and motion summary without processing
    Inspect(InspectArgs),
}
