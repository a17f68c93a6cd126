//! Frame-to-sample mapper
//!
//! Telemetry is sampled at a coarser, roughly-fixed rate than the video
//! frame rate. A single floor-division ratio approximates uniform
//! resampling without wall-clock alignment; the overlay only needs
//! close-enough speed per frame.

/// Maps a 0-based frame index to the telemetry sample index that applies.
#[derive(Debug, Clone, Copy)]
pub struct SampleMapper {
    ratio: usize,
    last_index: usize,
}

impl SampleMapper {
    /// Precompute the mapping for `sample_count` telemetry samples spread
    /// over `frame_count` video frames. Both must be positive; the
    /// orchestrator rejects zero-frame sources before constructing a mapper.
    ///
    /// When samples are sparser than frames the ratio floors to 0 and every
    /// frame maps to sample 0. Known degeneracy, kept as-is.
    pub fn new(sample_count: usize, frame_count: usize) -> Self {
        debug_assert!(sample_count > 0, "mapper requires at least one sample");
        debug_assert!(frame_count > 0, "mapper must not be built for zero-frame sources");
        Self {
            ratio: sample_count / frame_count,
            last_index: sample_count.saturating_sub(1),
        }
    }

    /// Sample index for frame `frame_index`, clamped to the sequence.
    pub fn map(&self, frame_index: usize) -> usize {
        (frame_index * self.ratio).min(self.last_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_map(samples: usize, frames: usize, i: usize) -> usize {
        (i * (samples / frames)).min(samples - 1)
    }

    #[test]
    fn maps_ten_samples_onto_five_frames() {
        let mapper = SampleMapper::new(10, 5);
        assert_eq!(mapper.map(0), 0);
        assert_eq!(mapper.map(1), 2);
        assert_eq!(mapper.map(2), 4);
        assert_eq!(mapper.map(4), 8);
    }

    #[test]
    fn clamps_to_last_sample() {
        let mapper = SampleMapper::new(10, 3);
        // ratio 3; frames past index 3 would overrun without the clamp
        assert_eq!(mapper.map(3), 9);
        assert_eq!(mapper.map(100), 9);
    }

    #[test]
    fn sparse_telemetry_degenerates_to_first_sample() {
        let mapper = SampleMapper::new(4, 30);
        for i in 0..30 {
            assert_eq!(mapper.map(i), 0);
        }
    }

    #[test]
    fn equal_counts_map_one_to_one() {
        let mapper = SampleMapper::new(6, 6);
        for i in 0..6 {
            assert_eq!(mapper.map(i), i);
        }
        assert_eq!(mapper.map(6), 5);
    }

    #[test]
    fn single_sample_always_maps_to_zero() {
        let mapper = SampleMapper::new(1, 100);
        assert_eq!(mapper.map(0), 0);
        assert_eq!(mapper.map(99), 0);
    }

    #[test]
    fn matches_reference_formula() {
        for &samples in &[1usize, 2, 5, 10, 31, 100] {
            for &frames in &[1usize, 3, 10, 50] {
                let mapper = SampleMapper::new(samples, frames);
                for i in 0..frames + 5 {
                    assert_eq!(
                        mapper.map(i),
                        reference_map(samples, frames, i),
                        "samples={samples} frames={frames} i={i}"
                    );
                }
            }
        }
    }
}
