//! DashHud Library
//!
//! Batch converter that re-encodes a dashcam transport-stream recording and
//! burns a synchronized telemetry heads-up overlay (speed in two unit
//! systems plus a derived time-to-top-speed annotation) onto every frame.

pub mod adapters;
pub mod cli;
pub mod error;
pub mod overlay;
pub mod pipeline;
pub mod ports;
pub mod telemetry;

// Re-export commonly used types
pub use error::{HudError, HudResult};
pub use pipeline::{Orchestrator, RunConfig, RunEvent, RunState};
pub use telemetry::TelemetryStore;

/// Initialize media libraries
pub fn init() -> HudResult<()> {
    ffmpeg_next::init().map_err(|e| HudError::Init {
        message: e.to_string(),
    })?;

    Ok(())
}
