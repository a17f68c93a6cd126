//! Motion analyzer: single-pass summary statistics over the sample sequence

use tracing::debug;

use crate::telemetry::TelemetrySample;

/// Divisor turning an id-distance into the "time to top speed" estimate.
///
/// Inherited from the recorder's fixed nominal rate; the result is a
/// monotonically-increasing duration estimate, not a verified wall-clock
/// value.
pub const NOMINAL_SOURCE_FPS: f64 = 30.0;

/// Derived statistics for one run, computed before the frame loop begins.
#[derive(Debug, Clone)]
pub struct MotionSummary {
    /// Sample with the maximum km/h value; first occurrence wins on ties.
    pub top_speed: TelemetrySample,
    /// Last stationary sample before speed first becomes nonzero, or `None`
    /// when the vehicle never moves.
    pub movement_start: Option<TelemetrySample>,
    /// Duration estimate between movement start and top speed.
    pub elapsed_secs: Option<f64>,
}

/// Scan the sequence once, in storage order.
///
/// The sequence must be non-empty (guaranteed by the telemetry store).
pub fn analyze(samples: &[TelemetrySample]) -> MotionSummary {
    let mut top_index = 0;
    let mut movement_index: Option<usize> = None;

    for (index, sample) in samples.iter().enumerate() {
        // Strict comparison keeps the earliest-seen maximum.
        if sample.velocity_kmh > samples[top_index].velocity_kmh {
            top_index = index;
        }
        // Fixed at the first nonzero sample, shifted back past the
        // transition point (1-based ids, so two back in id terms lands one
        // sample before motion), clamped to the start of the sequence.
        if movement_index.is_none() && sample.velocity_kmh != 0.0 {
            movement_index = Some(index.saturating_sub(2));
        }
    }

    let elapsed_secs =
        movement_index.map(|start| (top_index - start) as f64 / NOMINAL_SOURCE_FPS);

    debug!(
        top_id = samples[top_index].id,
        movement_id = movement_index.map(|i| samples[i].id),
        ?elapsed_secs,
        "motion analysis complete"
    );

    MotionSummary {
        top_speed: samples[top_index].clone(),
        movement_start: movement_index.map(|i| samples[i].clone()),
        elapsed_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::sample_with_speed;

    fn sequence(speeds: &[f64]) -> Vec<TelemetrySample> {
        speeds
            .iter()
            .enumerate()
            .map(|(i, &kmh)| sample_with_speed(i as u32 + 1, kmh))
            .collect()
    }

    #[test]
    fn first_maximum_wins_on_ties() {
        let samples = sequence(&[0.0, 0.0, 5.0, 12.0, 8.0, 12.0, 3.0]);
        let summary = analyze(&samples);
        // Both id 4 and id 6 reach 12.0; strict comparison keeps id 4.
        assert_eq!(summary.top_speed.id, 4);
        assert_eq!(summary.top_speed.velocity_kmh, 12.0);
    }

    #[test]
    fn movement_start_clamps_to_sequence_start() {
        let samples = sequence(&[0.0, 0.0, 5.0, 12.0, 8.0, 12.0, 3.0]);
        let summary = analyze(&samples);
        // First nonzero speed is id 3; shifted back and clamped to id 1.
        let start = summary.movement_start.unwrap();
        assert_eq!(start.id, 1);
    }

    #[test]
    fn movement_start_before_late_transition() {
        let samples = sequence(&[0.0, 0.0, 0.0, 0.0, 0.0, 7.0, 20.0]);
        let summary = analyze(&samples);
        let start = summary.movement_start.unwrap();
        assert_eq!(start.id, 4);
        assert_eq!(summary.top_speed.id, 7);
    }

    #[test]
    fn elapsed_derives_from_id_distance() {
        let samples = sequence(&[0.0, 0.0, 5.0, 12.0, 8.0, 12.0, 3.0]);
        let summary = analyze(&samples);
        // Movement start at index 0, top speed at index 3.
        let expected = 3.0 / NOMINAL_SOURCE_FPS;
        assert!((summary.elapsed_secs.unwrap() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn all_zero_speeds_leave_movement_unset() {
        let samples = sequence(&[0.0, 0.0, 0.0]);
        let summary = analyze(&samples);
        assert!(summary.movement_start.is_none());
        assert!(summary.elapsed_secs.is_none());
        assert_eq!(summary.top_speed.velocity_kmh, 0.0);
    }

    #[test]
    fn immediate_motion_starts_at_first_sample() {
        let samples = sequence(&[4.0, 9.0, 2.0]);
        let summary = analyze(&samples);
        assert_eq!(summary.movement_start.unwrap().id, 1);
        assert_eq!(summary.top_speed.id, 2);
    }
}
