//! DashHud CLI
//!
//! Batch converter for dashcam recordings: remuxes the transport stream,
//! synchronizes the companion telemetry log with the frame stream, and
//! burns a speed/statistics heads-up overlay onto every frame.
//!
//! # Usage
//!
//! ```bash
//! dashhud process --folder /recordings/2024-05-11
//! dashhud inspect --folder /recordings/2024-05-11
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use dashhud::adapters::{FfmpegRemuxer, OpencvBackend};
use dashhud::cli::{Cli, Commands, InspectArgs, ProcessArgs};
use dashhud::pipeline::{Orchestrator, RunConfig, RunEvent};
use dashhud::telemetry::analyzer::analyze;
use dashhud::TelemetryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => execute_process_command(args).await?,
        Commands::Inspect(args) => execute_inspect_command(args)?,
    }

    Ok(())
}

/// Run the full overlay pipeline on one folder
async fn execute_process_command(args: ProcessArgs) -> Result<()> {
    dashhud::init()?;

    let mut orchestrator = Orchestrator::new(OpencvBackend::new(), Box::new(FfmpegRemuxer::new()));
    orchestrator.on_event(|event| match event {
        RunEvent::Started { folder } => {
            info!("processing {} (busy)", folder.display());
        }
        RunEvent::Finished { output } => {
            info!("processing complete (idle), output at {}", output.display());
        }
        RunEvent::Failed { message } => {
            error!("processing failed (idle): {message}");
        }
    });

    let output = orchestrator.run(&args.folder).await?;
    println!("Output saved to {}", output.display());

    Ok(())
}

/// Resolve and summarize a folder without producing output
fn execute_inspect_command(args: InspectArgs) -> Result<()> {
    let config = RunConfig::resolve(&args.folder)?;
    let raw = std::fs::read_to_string(&config.metadata)?;
    let store = TelemetryStore::load(&raw)?;
    let summary = analyze(store.samples());

    println!("Recording:  {}", config.video_source.display());
    println!("Telemetry:  {}", config.metadata.display());
    println!("VIN:        {}", store.vin());
    println!("Samples:    {}", store.len());
    println!(
        "Top speed:  {:.2} km/h (sample id {})",
        summary.top_speed.velocity_kmh, summary.top_speed.id
    );
    match (&summary.movement_start, summary.elapsed_secs) {
        (Some(start), Some(elapsed)) => {
            println!(
                "Movement:   starts at sample id {}, {:.3}s to top speed",
                start.id, elapsed
            );
        }
        _ => println!("Movement:   vehicle never moves in this recording"),
    }

    Ok(())
}
