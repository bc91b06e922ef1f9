//! Default sizes and settings (all in diagram units unless noted)

/// φ, used to derive inter-line spacing
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;
/// Line spacing is this fraction of `(φ - 1) * line_height`
pub const LINE_SPACING_COEFFICIENT: f64 = 0.66;
pub const RECT_WIDTH: f64 = 1.0;
pub const RECT_HEIGHT: f64 = 1.0;
pub const CIRCLE_RADIUS: f64 = 0.5;
/// Average glyph advance at normal size
pub const CHAR_WIDTH: f64 = 0.08;
/// Line height at normal size
pub const CHAR_HEIGHT: f64 = 0.14;
/// Pixels per diagram unit in SVG output
pub const PX_PER_UNIT: f64 = 144.0;
pub const STROKE_WIDTH: f64 = 0.015;
/// Radius of the origin marker drawn for debug nodes
pub const DEBUG_MARKER_RADIUS: f64 = 0.04;
/// Space between a labeled arrow and its label
pub const ARROW_LABEL_GAP: f64 = 0.2;
/// Margin a labeled arrow's frame keeps around the arrow and label
pub const ARROW_MARGIN: f64 = 0.1;
/// Distance from a coordinate frame's axes to its first and last tick
pub const AXIS_INSET: f64 = 1.0;
/// Tick spacing of a coordinate frame when the caller has no preference
pub const TICK_SPACING: f64 = 1.5;

/// Inter-line spacing for a text block whose tallest line is `line_height`.
pub fn line_spacing(line_height: f64) -> f64 {
    LINE_SPACING_COEFFICIENT * (GOLDEN_RATIO - 1.0) * line_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_proportional_to_line_height() {
        let one = line_spacing(1.0);
        assert!((one - 0.66 * 0.618_033_988_749_895).abs() < 1e-12);
        assert!((line_spacing(2.0) - 2.0 * one).abs() < 1e-12);
    }
}
