//! Overlay renderer: per-frame line content, positions and drawing

use crate::error::HudResult;
use crate::overlay::{pad_speed, OverlayLine, LEFT_MARGIN, LINE_MARGIN};
use crate::ports::{TextExtent, TextPainter};
use crate::telemetry::analyzer::MotionSummary;
use crate::telemetry::TelemetrySample;

/// Produces the ordered overlay lines for a frame and draws them.
///
/// The first two lines (current speed in both unit systems) are always
/// emitted; the top-speed annotation pair appears only once the mapped
/// sample has advanced past the top-speed sample, and never when the
/// vehicle stayed stationary for the whole recording.
#[derive(Debug, Clone, Copy)]
pub struct OverlayRenderer {
    pitch: i32,
}

impl OverlayRenderer {
    /// Build a renderer from the measured extent of the representative
    /// overlay string ([`crate::overlay::PITCH_PROBE`]).
    pub fn with_extent(extent: TextExtent) -> Self {
        Self {
            pitch: extent.height + LINE_MARGIN,
        }
    }

    /// Vertical distance between consecutive line baselines.
    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    /// Ordered overlay lines for the frame whose mapped sample is `sample`.
    pub fn lines(&self, sample: &TelemetrySample, summary: &MotionSummary) -> Vec<OverlayLine> {
        let mut texts = vec![
            format!("Speed: {} km/h", pad_speed(sample.velocity_kmh)),
            format!("{} mph", sample.velocity_mph),
        ];

        if sample.id > summary.top_speed.id {
            if let (Some(start), Some(elapsed)) = (&summary.movement_start, summary.elapsed_secs) {
                texts.push(format!(
                    "Top speed: {:.2} km/h",
                    summary.top_speed.velocity_kmh
                ));
                texts.push(format!(
                    "{:.2} to {:.2}: {:.3}s",
                    start.velocity_kmh, summary.top_speed.velocity_kmh, elapsed
                ));
            }
        }

        texts
            .into_iter()
            .enumerate()
            .map(|(k, text)| OverlayLine {
                text,
                x: LEFT_MARGIN,
                y: (k as i32 + 1) * self.pitch,
            })
            .collect()
    }

    /// Draw `lines` onto `frame` through the painter port.
    pub fn paint<P: TextPainter>(
        &self,
        painter: &P,
        frame: &mut P::Frame,
        lines: &[OverlayLine],
    ) -> HudResult<()> {
        for line in lines {
            painter.draw(frame, &line.text, line.x, line.y)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::analyzer::analyze;
    use crate::telemetry::sample_with_speed;

    fn sequence(speeds: &[f64]) -> Vec<TelemetrySample> {
        speeds
            .iter()
            .enumerate()
            .map(|(i, &kmh)| sample_with_speed(i as u32 + 1, kmh))
            .collect()
    }

    fn renderer() -> OverlayRenderer {
        OverlayRenderer::with_extent(TextExtent {
            width: 300,
            height: 22,
        })
    }

    #[test]
    fn always_emits_speed_lines_in_order() {
        let samples = sequence(&[0.0, 0.0, 5.0, 12.0, 8.0]);
        let summary = analyze(&samples);
        let lines = renderer().lines(&samples[0], &summary);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Speed: --0.00 km/h");
        assert_eq!(lines[1].text, "0 mph");
    }

    #[test]
    fn two_lines_at_or_before_top_speed_sample() {
        let samples = sequence(&[0.0, 0.0, 5.0, 12.0, 8.0]);
        let summary = analyze(&samples);
        // Top speed is id 4; frames mapped at or before it stay at 2 lines.
        for sample in &samples[..4] {
            assert_eq!(renderer().lines(sample, &summary).len(), 2);
        }
    }

    #[test]
    fn four_lines_past_top_speed_sample() {
        let samples = sequence(&[0.0, 0.0, 5.0, 12.0, 8.0]);
        let summary = analyze(&samples);
        let lines = renderer().lines(&samples[4], &summary);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "Speed: --8.00 km/h");
        assert_eq!(lines[2].text, "Top speed: 12.00 km/h");
        assert_eq!(lines[3].text, "0.00 to 12.00: 0.100s");
    }

    #[test]
    fn stationary_run_never_annotates() {
        let samples = sequence(&[0.0, 0.0, 0.0, 0.0]);
        let summary = analyze(&samples);
        for sample in &samples {
            let lines = renderer().lines(sample, &summary);
            assert_eq!(lines.len(), 2);
        }
    }

    #[test]
    fn lines_stack_at_fixed_pitch() {
        let samples = sequence(&[0.0, 0.0, 5.0, 12.0, 8.0]);
        let summary = analyze(&samples);
        let r = renderer();
        let lines = r.lines(&samples[4], &summary);

        // 22px glyph height + 10px margin
        assert_eq!(r.pitch(), 32);
        for (k, line) in lines.iter().enumerate() {
            assert_eq!(line.x, LEFT_MARGIN);
            assert_eq!(line.y, (k as i32 + 1) * 32);
        }
    }
}
