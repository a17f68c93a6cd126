//! Overlay model: line content, numeric formatting and layout constants

pub mod renderer;

pub use renderer::OverlayRenderer;

/// Horizontal position of every overlay line, in pixels from the left edge.
pub const LEFT_MARGIN: i32 = 10;

/// Vertical margin added to the measured line height to form the line pitch.
pub const LINE_MARGIN: i32 = 10;

/// Representative string measured once to derive the per-line pitch.
pub const PITCH_PROBE: &str = "Speed: 000.00 km/h";

/// Hershey font scale for overlay text.
pub const FONT_SCALE: f64 = 1.0;

/// Stroke weight (bold) for overlay text.
pub const STROKE_WEIGHT: i32 = 2;

/// Overlay color in BGR channel order, matching the sink's frame layout.
pub const OVERLAY_BGR: (f64, f64, f64) = (0.0, 0.0, 255.0);

/// One line of rendered text and its draw position on the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Fixed 6-character speed field with exactly two decimal digits.
///
/// Values under 1 render the `--0.00` placeholder; values of 100 and above
/// use the natural decimal string, which may exceed six characters.
/// Three-digit speeds are the practical ceiling for this domain.
pub fn pad_speed(kmh: f64) -> String {
    let shown = if kmh < 1.0 { 0.0 } else { kmh };
    format!("{:->6}", format!("{shown:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_speed_is_six_chars_up_to_three_digits() {
        for &kmh in &[1.0, 1.5, 9.99, 10.0, 42.5, 99.99] {
            assert_eq!(pad_speed(kmh).len(), 6, "kmh={kmh}");
        }
    }

    #[test]
    fn pad_speed_single_digit_gets_two_pads() {
        assert_eq!(pad_speed(5.0), "--5.00");
        assert_eq!(pad_speed(9.99), "--9.99");
    }

    #[test]
    fn pad_speed_double_digit_gets_one_pad() {
        assert_eq!(pad_speed(12.34), "-12.34");
        assert_eq!(pad_speed(99.0), "-99.00");
    }

    #[test]
    fn pad_speed_below_one_renders_placeholder() {
        assert_eq!(pad_speed(0.0), "--0.00");
        assert_eq!(pad_speed(0.72), "--0.00");
    }

    #[test]
    fn pad_speed_three_digits_unpadded() {
        assert_eq!(pad_speed(123.45), "123.45");
        assert_eq!(pad_speed(100.0), "100.00");
    }

    #[test]
    fn pad_speed_overflows_gracefully_past_six_chars() {
        assert_eq!(pad_speed(1234.5), "1234.50");
    }
}
