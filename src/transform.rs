//! Rigid and similarity transforms applied across a subtree.
//!
//! Each operation on a node is lowered to one [`Transform`] that is applied
//! to every descendant, so the subtree moves as a unit regardless of how deep
//! it is. The pivot of scale/rotate and the frame of tilt/flip are captured
//! from the node the operation was invoked on, before anything moves.

use glam::{DAffine2, DMat2, DVec2, dvec2};

use crate::types::{Axis, BBox, Offset, Point, Turn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(Offset),
    /// Uniform scale about `pivot`
    Scale { pivot: Point, factor: f64 },
    /// Counter-clockwise rotation about `pivot`
    Rotate { pivot: Point, degrees: f64 },
    /// Quarter-turn clockwise remap of the parent frame that starts at
    /// `frame_origin` and is `frame_width` wide.
    TurnRight { frame_origin: Point, frame_width: f64 },
    /// Quarter-turn counter-clockwise remap of the parent frame that starts at
    /// `frame_origin` and is `frame_height` tall.
    TurnLeft { frame_origin: Point, frame_height: f64 },
    /// Reflection across the vertical (`Horizontal`) or horizontal
    /// (`Vertical`) line through `line`.
    Mirror { axis: Axis, line: f64 },
}

impl Transform {
    /// Quarter turn within a parent frame.
    ///
    /// `Turn::Down` is not a single quarter turn; callers expand it into two
    /// `Turn::Right` steps.
    pub fn quarter_turn(turn: Turn, frame: &BBox) -> Self {
        match turn {
            Turn::Left => Transform::TurnLeft {
                frame_origin: frame.origin(),
                frame_height: frame.height(),
            },
            Turn::Right | Turn::Down => Transform::TurnRight {
                frame_origin: frame.origin(),
                frame_width: frame.width(),
            },
        }
    }

    /// Mirror within a parent frame.
    pub fn mirror(axis: Axis, frame: &BBox) -> Self {
        let center = frame.center();
        let line = match axis {
            Axis::Horizontal => center.x,
            Axis::Vertical => center.y,
        };
        Transform::Mirror { axis, line }
    }

    pub fn affine(&self) -> DAffine2 {
        match *self {
            Transform::Translate(o) => DAffine2::from_translation(dvec2(o.dx, o.dy)),
            Transform::Scale { pivot, factor } => {
                let p = pivot.to_dvec2();
                DAffine2::from_translation(p)
                    * DAffine2::from_scale(DVec2::splat(factor))
                    * DAffine2::from_translation(-p)
            }
            Transform::Rotate { pivot, degrees } if self.preserves_axes() => {
                // Whole quarter turns use exact matrices so that a full turn
                // is the identity.
                let m = match (degrees / 90.0).round().rem_euclid(4.0) as u8 {
                    0 => DMat2::IDENTITY,
                    1 => DMat2::from_cols(dvec2(0.0, 1.0), dvec2(-1.0, 0.0)),
                    2 => -DMat2::IDENTITY,
                    _ => DMat2::from_cols(dvec2(0.0, -1.0), dvec2(1.0, 0.0)),
                };
                about_frame(m, pivot, DVec2::ZERO)
            }
            Transform::Rotate { pivot, degrees } => {
                let p = pivot.to_dvec2();
                DAffine2::from_translation(p)
                    * DAffine2::from_angle(degrees.to_radians())
                    * DAffine2::from_translation(-p)
            }
            Transform::TurnRight {
                frame_origin,
                frame_width,
            } => {
                // (x, y) relative to the frame origin maps to (y, W - x)
                let m = DMat2::from_cols(dvec2(0.0, -1.0), dvec2(1.0, 0.0));
                about_frame(m, frame_origin, dvec2(0.0, frame_width))
            }
            Transform::TurnLeft {
                frame_origin,
                frame_height,
            } => {
                // (x, y) relative to the frame origin maps to (H - y, x)
                let m = DMat2::from_cols(dvec2(0.0, 1.0), dvec2(-1.0, 0.0));
                about_frame(m, frame_origin, dvec2(frame_height, 0.0))
            }
            Transform::Mirror { axis, line } => match axis {
                Axis::Horizontal => DAffine2::from_cols_array(&[-1.0, 0.0, 0.0, 1.0, 2.0 * line, 0.0]),
                Axis::Vertical => DAffine2::from_cols_array(&[1.0, 0.0, 0.0, -1.0, 0.0, 2.0 * line]),
            },
        }
    }

    /// Whether axis-aligned boxes stay axis-aligned under this transform.
    pub fn preserves_axes(&self) -> bool {
        match *self {
            Transform::Rotate { degrees, .. } => (degrees.rem_euclid(90.0)).abs() < 1e-9,
            _ => true,
        }
    }

    pub fn apply_point(&self, p: Point) -> Point {
        Point::from_dvec2(self.affine().transform_point2(p.to_dvec2()))
    }

    /// Map an axis-aligned box. Only meaningful when
    /// [`preserves_axes`](Self::preserves_axes) holds.
    pub fn apply_bbox(&self, bbox: &BBox) -> BBox {
        let affine = self.affine();
        let a = Point::from_dvec2(affine.transform_point2(bbox.min.to_dvec2()));
        let b = Point::from_dvec2(affine.transform_point2(bbox.max.to_dvec2()));
        BBox::from_points(&[a, b])
    }
}

/// Linear map `m` applied relative to `origin`, with the result shifted by
/// `shift` from the same origin. Built from exact matrices so quarter turns
/// of integral coordinates stay integral.
fn about_frame(m: DMat2, origin: Point, shift: DVec2) -> DAffine2 {
    let o = origin.to_dvec2();
    DAffine2::from_mat2_translation(m, o + shift - m * o)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    fn close(a: Point, b: Point) -> bool {
        a.approx_eq(b, 1e-9)
    }

    #[test]
    fn translate_moves_points() {
        let t = Transform::Translate(Offset::new(1.0, -2.0));
        assert!(close(t.apply_point(Point::new(3.0, 3.0)), Point::new(4.0, 1.0)));
    }

    #[test]
    fn scale_keeps_pivot_fixed() {
        let pivot = Point::new(1.0, 1.0);
        let t = Transform::Scale { pivot, factor: 3.0 };
        assert!(close(t.apply_point(pivot), pivot));
        assert!(close(t.apply_point(Point::new(2.0, 1.0)), Point::new(4.0, 1.0)));
    }

    #[test]
    fn rotate_quarter_about_pivot() {
        let t = Transform::Rotate {
            pivot: Point::ORIGIN,
            degrees: 90.0,
        };
        assert!(close(t.apply_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0)));
        assert!(t.preserves_axes());
        let full = Transform::Rotate {
            pivot: Point::new(0.3, 0.7),
            degrees: 360.0,
        };
        assert_eq!(full.apply_point(Point::new(1.1, 2.9)), Point::new(1.1, 2.9));
        let t = Transform::Rotate {
            pivot: Point::ORIGIN,
            degrees: 45.0,
        };
        assert!(!t.preserves_axes());
    }

    #[test]
    fn turn_right_maps_into_frame() {
        // Frame 4 wide starting at (10, 10); a point at relative (1, 2)
        // lands at relative (2, 4 - 1).
        let frame = BBox::from_origin(Point::new(10.0, 10.0), Size::new(4.0, 2.0));
        let t = Transform::quarter_turn(Turn::Right, &frame);
        assert!(close(t.apply_point(Point::new(11.0, 12.0)), Point::new(12.0, 13.0)));
    }

    #[test]
    fn turn_left_maps_into_frame() {
        // Frame 2 tall: relative (1, 2) lands at relative (2 - 2, 1).
        let frame = BBox::from_origin(Point::new(10.0, 10.0), Size::new(4.0, 2.0));
        let t = Transform::quarter_turn(Turn::Left, &frame);
        assert!(close(t.apply_point(Point::new(11.0, 12.0)), Point::new(10.0, 11.0)));
    }

    #[test]
    fn four_right_turns_are_identity() {
        let frame = BBox::from_origin(Point::new(-3.0, 1.0), Size::new(5.0, 2.0));
        let t = Transform::quarter_turn(Turn::Right, &frame);
        let start = Point::new(0.25, 1.75);
        let mut p = start;
        for _ in 0..4 {
            p = t.apply_point(p);
        }
        assert!(close(p, start));
    }

    #[test]
    fn mirror_reflects_across_frame_center() {
        let frame = BBox::from_origin(Point::ORIGIN, Size::new(10.0, 4.0));
        let h = Transform::mirror(Axis::Horizontal, &frame);
        assert!(close(h.apply_point(Point::new(1.0, 1.0)), Point::new(9.0, 1.0)));
        let v = Transform::mirror(Axis::Vertical, &frame);
        assert!(close(v.apply_point(Point::new(1.0, 1.0)), Point::new(1.0, 3.0)));
    }

    #[test]
    fn apply_bbox_renormalizes_corners() {
        let bb = BBox::from_origin(Point::ORIGIN, Size::new(2.0, 1.0));
        let frame = BBox::from_origin(Point::ORIGIN, Size::new(2.0, 2.0));
        let turned = Transform::quarter_turn(Turn::Right, &frame).apply_bbox(&bb);
        assert_eq!(turned.size(), Size::new(1.0, 2.0));
        assert!(close(turned.min, Point::new(0.0, 0.0)));
    }
}
