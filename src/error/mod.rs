//! Error handling module for DashHud

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for DashHud operations
#[derive(Error, Debug)]
pub enum HudError {
    /// Required input file absent from the selected folder
    #[error("required input not found in {folder}: {what}")]
    MissingInput { folder: PathBuf, what: &'static str },

    /// Telemetry log failed to parse or contained no samples
    #[error("malformed telemetry: {message}")]
    MalformedTelemetry { message: String },

    /// External decode/encode failure
    #[error("media I/O failure: {message}")]
    MediaIoFailure { message: String },

    /// Video source reports no decodable frames
    #[error("source reports no decodable frames: {path}")]
    ZeroFrameSource { path: PathBuf },

    /// Transport-stream remux failure
    #[error("remux of {path} failed: {message}")]
    Remux { path: PathBuf, message: String },

    /// Media library initialization error
    #[error("failed to initialize media libraries: {message}")]
    Init { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<opencv::Error> for HudError {
    fn from(err: opencv::Error) -> Self {
        HudError::MediaIoFailure {
            message: err.to_string(),
        }
    }
}

/// Result type alias for DashHud operations
pub type HudResult<T> = std::result::Result<T, HudError>;
