//! OpenCV-backed frame I/O and text drawing
//!
//! `VideoCapture`/`VideoWriter` carry the decode/encode surface and
//! `imgproc` rasterizes the overlay glyphs, the same way the recorder's
//! desktop tooling draws on frames.

use std::path::Path;

use opencv::core::{Mat, Point, Scalar, Size};
use opencv::prelude::*;
use opencv::{imgproc, videoio};
use tracing::info;

use crate::error::{HudError, HudResult};
use crate::overlay::{FONT_SCALE, OVERLAY_BGR, STROKE_WEIGHT};
use crate::ports::{FrameSink, FrameSource, MediaBackend, StreamInfo, TextExtent, TextPainter};

const FONT: i32 = imgproc::FONT_HERSHEY_SIMPLEX;

/// [`MediaBackend`] over the OpenCV videoio/imgproc stack.
pub struct OpencvBackend;

impl OpencvBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OpencvBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for OpencvBackend {
    type Frame = Mat;
    type Source = MatSource;
    type Sink = MatSink;
    type Painter = HersheyPainter;

    fn open_source(&self, path: &Path) -> HudResult<MatSource> {
        let location = path.to_string_lossy();
        let cap = videoio::VideoCapture::from_file(&location, videoio::CAP_ANY)?;
        if !cap.is_opened()? {
            return Err(HudError::MediaIoFailure {
                message: format!("failed to open video source {location}"),
            });
        }

        let fps = cap.get(videoio::CAP_PROP_FPS)?;
        let frame_count = cap.get(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as u64;
        let width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as i32;
        let height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as i32;

        info!(
            "source opened: {}x{} @ {:.2} fps, {} frames",
            width, height, fps, frame_count
        );

        Ok(MatSource {
            cap,
            info: StreamInfo {
                frame_count,
                width,
                height,
                fps,
            },
        })
    }

    fn open_sink(&self, path: &Path, info: &StreamInfo) -> HudResult<MatSink> {
        let location = path.to_string_lossy();
        let fourcc = videoio::VideoWriter::fourcc('m', 'p', '4', 'v')?;
        let writer = videoio::VideoWriter::new(
            &location,
            fourcc,
            info.fps,
            Size::new(info.width, info.height),
            true,
        )?;
        if !writer.is_opened()? {
            return Err(HudError::MediaIoFailure {
                message: format!("failed to open video sink {location}"),
            });
        }

        Ok(MatSink { writer })
    }

    fn painter(&self) -> HudResult<HersheyPainter> {
        Ok(HersheyPainter)
    }
}

/// Decoded-frame reader over `VideoCapture`.
pub struct MatSource {
    cap: videoio::VideoCapture,
    info: StreamInfo,
}

impl FrameSource for MatSource {
    type Frame = Mat;

    fn info(&self) -> StreamInfo {
        self.info
    }

    fn read_frame(&mut self) -> HudResult<Option<Mat>> {
        let mut mat = Mat::default();
        if !self.cap.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        Ok(Some(mat))
    }
}

/// Encoded-frame writer over `VideoWriter`.
pub struct MatSink {
    writer: videoio::VideoWriter,
}

impl FrameSink for MatSink {
    type Frame = Mat;

    fn write_frame(&mut self, frame: &mut Mat) -> HudResult<()> {
        self.writer.write(frame)?;
        Ok(())
    }

    fn finish(&mut self) -> HudResult<()> {
        self.writer.release()?;
        Ok(())
    }
}

/// Hershey-font glyph rasterizer with the overlay's fixed style.
pub struct HersheyPainter;

impl TextPainter for HersheyPainter {
    type Frame = Mat;

    fn measure(&self, text: &str) -> HudResult<TextExtent> {
        let mut baseline = 0;
        let size = imgproc::get_text_size(text, FONT, FONT_SCALE, STROKE_WEIGHT, &mut baseline)?;
        Ok(TextExtent {
            width: size.width,
            height: size.height,
        })
    }

    fn draw(&self, frame: &mut Mat, text: &str, x: i32, y: i32) -> HudResult<()> {
        imgproc::put_text(
            frame,
            text,
            Point::new(x, y),
            FONT,
            FONT_SCALE,
            Scalar::new(OVERLAY_BGR.0, OVERLAY_BGR.1, OVERLAY_BGR.2, 0.0),
            STROKE_WEIGHT,
            imgproc::LINE_8,
            false,
        )?;
        Ok(())
    }
}
