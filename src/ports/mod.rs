// Ports - contracts for the external media collaborators

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::HudResult;

/// Geometry and timing reported by an opened video source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamInfo {
    /// Total decodable frames reported by the container
    pub frame_count: u64,
    /// Frame width in pixels
    pub width: i32,
    /// Frame height in pixels
    pub height: i32,
    /// Frames per second
    pub fps: f64,
}

/// Measured extents of a rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

/// Port for the one-shot container conversion of the source recording.
///
/// The converter is handed the original source path and returns the path of
/// a decodable intermediate it created; it never touches the original. This
/// is the pipeline's only asynchronous boundary.
#[async_trait]
pub trait MediaConverter: Send + Sync {
    async fn convert(&self, source: &Path) -> HudResult<PathBuf>;
}

/// Port for reading decoded frames from an opened source.
pub trait FrameSource {
    type Frame;

    fn info(&self) -> StreamInfo;

    /// Next decodable frame, or `None` once the source is exhausted.
    fn read_frame(&mut self) -> HudResult<Option<Self::Frame>>;
}

/// Port for writing finished frames to the output sink.
pub trait FrameSink {
    type Frame;

    fn write_frame(&mut self, frame: &mut Self::Frame) -> HudResult<()>;

    /// Flush and close the sink. Must be called for the output to be valid.
    fn finish(&mut self) -> HudResult<()>;
}

/// Port for glyph rasterization onto a frame buffer.
pub trait TextPainter {
    type Frame;

    /// Measure the extents `text` would occupy when drawn.
    fn measure(&self, text: &str) -> HudResult<TextExtent>;

    /// Draw `text` with the overlay's fixed color and stroke weight, with
    /// the baseline origin at (`x`, `y`).
    fn draw(&self, frame: &mut Self::Frame, text: &str, x: i32, y: i32) -> HudResult<()>;
}

/// Factory tying source, sink and painter to one frame representation.
pub trait MediaBackend {
    type Frame;
    type Source: FrameSource<Frame = Self::Frame>;
    type Sink: FrameSink<Frame = Self::Frame>;
    type Painter: TextPainter<Frame = Self::Frame>;

    fn open_source(&self, path: &Path) -> HudResult<Self::Source>;

    /// Open the sink with dimensions and frame rate matching the source.
    fn open_sink(&self, path: &Path, info: &StreamInfo) -> HudResult<Self::Sink>;

    fn painter(&self) -> HudResult<Self::Painter>;
}
