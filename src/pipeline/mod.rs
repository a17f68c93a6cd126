//! Pipeline orchestrator: batch lifecycle and the per-frame loop
//!
//! One run walks `Idle -> SourcesResolved -> MetadataLoaded ->
//! AnalysisComplete -> Streaming -> Finalized`; `Failed` is reachable from
//! any non-terminal state. The orchestrator owns the run's media resources
//! and releases them on every exit path; the intermediate remux artifact
//! never survives a run, and a partial output never survives a failure.

pub mod sources;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{HudError, HudResult};
use crate::overlay::{OverlayLine, OverlayRenderer, PITCH_PROBE};
use crate::ports::{FrameSink, FrameSource, MediaBackend, MediaConverter, TextPainter};
use crate::telemetry::analyzer::{analyze, MotionSummary};
use crate::telemetry::mapper::SampleMapper;
use crate::telemetry::{TelemetrySample, TelemetryStore};

pub use sources::RunConfig;

/// Lifecycle states of one processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    SourcesResolved,
    MetadataLoaded,
    AnalysisComplete,
    Streaming,
    Finalized,
    Failed,
}

/// Lifecycle notifications delivered to registered listeners. Presentation
/// glue (busy indicator, completion notice) hangs off these, fully
/// decoupled from mapping and rendering.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Started { folder: PathBuf },
    Finished { output: PathBuf },
    Failed { message: String },
}

/// Per-iteration context for one frame. Created and discarded inside the
/// streaming loop; never persisted.
#[derive(Debug)]
pub struct FrameContext<'run> {
    pub frame_index: usize,
    pub sample: &'run TelemetrySample,
    pub lines: Vec<OverlayLine>,
}

/// Drives the batch conversion of one folder.
pub struct Orchestrator<B: MediaBackend> {
    backend: B,
    converter: Box<dyn MediaConverter>,
    listeners: Vec<Box<dyn Fn(&RunEvent) + Send>>,
    state: RunState,
}

impl<B: MediaBackend> Orchestrator<B> {
    pub fn new(backend: B, converter: Box<dyn MediaConverter>) -> Self {
        Self {
            backend,
            converter,
            listeners: Vec::new(),
            state: RunState::Idle,
        }
    }

    /// Register a lifecycle listener.
    pub fn on_event(&mut self, listener: impl Fn(&RunEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Process `folder` end to end, returning the finished output path.
    ///
    /// Only one run proceeds at a time; the orchestrator returns to `Idle`
    /// after a successful run and rests in `Failed` after an aborted one.
    pub async fn run(&mut self, folder: &Path) -> HudResult<PathBuf> {
        self.state = RunState::Idle;
        self.emit(&RunEvent::Started {
            folder: folder.to_path_buf(),
        });

        match self.run_inner(folder).await {
            Ok(output) => {
                self.transition(RunState::Finalized);
                info!("run complete, output saved to {}", output.display());
                self.emit(&RunEvent::Finished {
                    output: output.clone(),
                });
                self.transition(RunState::Idle);
                Ok(output)
            }
            Err(err) => {
                self.transition(RunState::Failed);
                self.emit(&RunEvent::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn run_inner(&mut self, folder: &Path) -> HudResult<PathBuf> {
        let config = RunConfig::resolve(folder)?;
        self.transition(RunState::SourcesResolved);

        let raw = fs::read_to_string(&config.metadata)?;
        let store = TelemetryStore::load(&raw)?;
        info!(
            "telemetry loaded: {} samples for VIN {}",
            store.len(),
            store.vin()
        );
        self.transition(RunState::MetadataLoaded);

        let summary = analyze(store.samples());
        if summary.movement_start.is_none() {
            warn!("vehicle never moves in this recording, top-speed annotation disabled");
        }
        self.transition(RunState::AnalysisComplete);

        // The single asynchronous boundary: container conversion.
        let intermediate = self.converter.convert(&config.video_source).await?;
        let _intermediate_cleanup = RemoveOnDrop::arm(&intermediate);

        let output = self.stream(&config, &intermediate, &store, &summary)?;
        Ok(output)
    }

    /// The synchronous frame loop: read, map, render, write.
    fn stream(
        &mut self,
        config: &RunConfig,
        intermediate: &Path,
        store: &TelemetryStore,
        summary: &MotionSummary,
    ) -> HudResult<PathBuf> {
        let mut source = self.backend.open_source(intermediate)?;
        let stream_info = source.info();
        if stream_info.frame_count == 0 {
            return Err(HudError::ZeroFrameSource {
                path: intermediate.to_path_buf(),
            });
        }

        let mapper = SampleMapper::new(store.len(), stream_info.frame_count as usize);
        let painter = self.backend.painter()?;
        let renderer = OverlayRenderer::with_extent(painter.measure(PITCH_PROBE)?);

        let mut output_cleanup = RemoveOnDrop::arm(&config.output);
        let mut sink = self.backend.open_sink(&config.output, &stream_info)?;
        self.transition(RunState::Streaming);

        let mut frame_index = 0usize;
        while let Some(mut frame) = source.read_frame()? {
            let sample = store.sample_at(mapper.map(frame_index));
            let ctx = FrameContext {
                frame_index,
                sample,
                lines: renderer.lines(sample, summary),
            };

            renderer.paint(&painter, &mut frame, &ctx.lines)?;
            sink.write_frame(&mut frame)?;

            frame_index += 1;
            if frame_index % 300 == 0 {
                debug!(frame_index, "streaming");
            }
        }
        sink.finish()?;

        debug!(frames = frame_index, "source exhausted, sink closed");
        output_cleanup.disarm();
        Ok(config.output.clone())
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }

    fn emit(&self, event: &RunEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

/// Deletes the wrapped path on drop unless disarmed. Backs the guarantees
/// that intermediates never outlive a run and partial output never
/// survives a failure.
struct RemoveOnDrop {
    path: Option<PathBuf>,
}

impl RemoveOnDrop {
    fn arm(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    fn disarm(&mut self) {
        self.path = None;
    }
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if !path.exists() {
                return;
            }
            match fs::remove_file(&path) {
                Ok(()) => debug!("removed {}", path.display()),
                Err(err) => warn!("failed to remove {}: {}", path.display(), err),
            }
        }
    }
}
