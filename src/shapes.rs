//! Shape types for diagram primitives
//!
//! Each shape is its own type that knows how to:
//! - Report its bounding box (from which all anchors derive)
//! - Apply a [`Transform`] to the points it owns
//! - Take on a new bounding box when a container is stretched or resized
//! - Emit its drawing payload to a [`Backend`]
//!
//! Children are not the shape's business; the [`Diagram`](crate::Diagram)
//! walks the tree and calls into each node's shape.

use enum_dispatch::enum_dispatch;

use crate::errors::{LayoutError, Result};
use crate::metrics::FontSize;
use crate::render::{Backend, PathSegment, TextRun};
use crate::style::Style;
use crate::transform::Transform;
use crate::types::{Align, BBox, Direction, Point, Size};

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// Human-readable kind, used in error messages
    fn kind(&self) -> &'static str;

    /// Tight axis-aligned box around everything the shape owns
    fn bounds(&self) -> BBox;

    /// Map every owned point through `t`
    fn apply(&mut self, t: &Transform);

    /// Take on `bbox` as the new extent, remapping owned points into it
    fn set_bounds(&mut self, bbox: BBox) -> Result<()>;

    /// Emit drawing commands
    fn draw(&self, style: &Style, backend: &mut dyn Backend);

    /// Whether the shape can be mirrored
    fn supports_flip(&self) -> bool {
        true
    }

    /// Whether rotating the shape about itself leaves it looking the same
    fn is_rotation_invariant(&self) -> bool {
        false
    }
}

/// Geometry of a shape: an axis-aligned frame, or explicit points once the
/// shape has been rotated off the axes (or was a polygon to begin with).
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Frame(BBox),
    Points(Vec<Point>),
}

impl Outline {
    pub fn frame(origin: Point, size: Size) -> Self {
        Outline::Frame(BBox::from_origin(origin, size))
    }

    pub fn bounds(&self) -> BBox {
        match self {
            Outline::Frame(bb) => *bb,
            Outline::Points(pts) => BBox::from_points(pts),
        }
    }

    /// Outline vertices; a frame lists sw, nw, ne, se.
    pub fn vertices(&self) -> Vec<Point> {
        match self {
            Outline::Frame(bb) => frame_corners(bb).to_vec(),
            Outline::Points(pts) => pts.clone(),
        }
    }

    pub fn apply(&mut self, t: &Transform) {
        match self {
            Outline::Frame(bb) if t.preserves_axes() => *bb = t.apply_bbox(bb),
            Outline::Frame(bb) => {
                let corners = frame_corners(bb).map(|p| t.apply_point(p));
                *self = Outline::Points(corners.to_vec());
            }
            Outline::Points(pts) => {
                for p in pts.iter_mut() {
                    *p = t.apply_point(*p);
                }
            }
        }
    }

    pub fn set_bounds(&mut self, bbox: BBox) {
        match self {
            Outline::Frame(bb) => *bb = bbox,
            Outline::Points(pts) => {
                let old = BBox::from_points(pts.iter());
                remap_points(pts, &old, &bbox);
            }
        }
    }

    /// Closed polygon path through the vertices
    pub fn closed_path(&self) -> Vec<PathSegment> {
        polyline_path(&self.vertices(), true)
    }
}

/// sw, nw, ne, se
fn frame_corners(bb: &BBox) -> [Point; 4] {
    [
        bb.min,
        Point::new(bb.min.x, bb.max.y),
        bb.max,
        Point::new(bb.max.x, bb.min.y),
    ]
}

/// Linearly map points from `old` into `new`. A degenerate axis of `old`
/// puts the points on the middle line of `new` along that axis.
fn remap_points(points: &mut [Point], old: &BBox, new: &BBox) {
    let map_axis = |v: f64, old_min: f64, old_len: f64, new_min: f64, new_len: f64| {
        if old_len == 0.0 {
            new_min + new_len / 2.0
        } else {
            new_min + (v - old_min) * new_len / old_len
        }
    };
    for p in points.iter_mut() {
        p.x = map_axis(p.x, old.min.x, old.width(), new.min.x, new.width());
        p.y = map_axis(p.y, old.min.y, old.height(), new.min.y, new.height());
    }
}

fn polyline_path(points: &[Point], closed: bool) -> Vec<PathSegment> {
    let mut path = Vec::with_capacity(points.len() + 1);
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.push(PathSegment::MoveTo(*p));
        } else {
            path.push(PathSegment::LineTo(*p));
        }
    }
    if closed && points.len() > 2 {
        path.push(PathSegment::Close);
    }
    path
}

// ============================================================================
// Shape Types
// ============================================================================

/// A rectangle; with its border off it is a plain grouping box
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub outline: Outline,
}

impl Rectangle {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            outline: Outline::frame(origin, size),
        }
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> &'static str {
        "rectangle"
    }

    fn bounds(&self) -> BBox {
        self.outline.bounds()
    }

    fn apply(&mut self, t: &Transform) {
        self.outline.apply(t);
    }

    fn set_bounds(&mut self, bbox: BBox) -> Result<()> {
        self.outline.set_bounds(bbox);
        Ok(())
    }

    fn draw(&self, style: &Style, backend: &mut dyn Backend) {
        backend.stroke(&self.outline.closed_path(), style);
    }
}

/// An isosceles triangle standing on its base
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub outline: Outline,
}

impl Triangle {
    pub fn new(origin: Point, size: Size) -> Self {
        let apex = Point::new(origin.x + size.w / 2.0, origin.y + size.h);
        let right = Point::new(origin.x + size.w, origin.y);
        Self {
            outline: Outline::Points(vec![origin, apex, right]),
        }
    }
}

impl Shape for Triangle {
    fn kind(&self) -> &'static str {
        "triangle"
    }

    fn bounds(&self) -> BBox {
        self.outline.bounds()
    }

    fn apply(&mut self, t: &Transform) {
        self.outline.apply(t);
    }

    fn set_bounds(&mut self, bbox: BBox) -> Result<()> {
        self.outline.set_bounds(bbox);
        Ok(())
    }

    fn draw(&self, style: &Style, backend: &mut dyn Backend) {
        backend.stroke(&self.outline.closed_path(), style);
    }
}

/// An ellipse inscribed in its frame; a circle when the frame is square
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub frame: BBox,
}

impl Ellipse {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            frame: BBox::from_origin(origin, size),
        }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        let origin = Point::new(center.x - radius, center.y - radius);
        Self::new(origin, Size::new(2.0 * radius, 2.0 * radius))
    }
}

impl Shape for Ellipse {
    fn kind(&self) -> &'static str {
        "ellipse"
    }

    fn bounds(&self) -> BBox {
        self.frame
    }

    fn apply(&mut self, t: &Transform) {
        if t.preserves_axes() {
            self.frame = t.apply_bbox(&self.frame);
        } else {
            // Off-axis rotation carries the center along; the outline keeps
            // its own orientation.
            let center = t.apply_point(self.frame.center());
            self.frame = self.frame.translate(center - self.frame.center());
        }
    }

    fn set_bounds(&mut self, bbox: BBox) -> Result<()> {
        self.frame = bbox;
        Ok(())
    }

    fn draw(&self, style: &Style, backend: &mut dyn Backend) {
        let path = [PathSegment::Ellipse {
            center: self.frame.center(),
            rx: self.frame.width() / 2.0,
            ry: self.frame.height() / 2.0,
        }];
        backend.stroke(&path, style);
    }

    fn is_rotation_invariant(&self) -> bool {
        true
    }
}

/// Two strokes joining the midpoints of opposite edges
#[derive(Debug, Clone, PartialEq)]
pub struct Cross {
    pub outline: Outline,
}

impl Cross {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            outline: Outline::frame(origin, size),
        }
    }
}

impl Shape for Cross {
    fn kind(&self) -> &'static str {
        "cross"
    }

    fn bounds(&self) -> BBox {
        self.outline.bounds()
    }

    fn apply(&mut self, t: &Transform) {
        self.outline.apply(t);
    }

    fn set_bounds(&mut self, bbox: BBox) -> Result<()> {
        self.outline.set_bounds(bbox);
        Ok(())
    }

    fn draw(&self, style: &Style, backend: &mut dyn Backend) {
        let v = self.outline.vertices();
        if v.len() != 4 {
            return;
        }
        let (sw, nw, ne, se) = (v[0], v[1], v[2], v[3]);
        let vertical = [
            PathSegment::MoveTo(sw.midpoint(se)),
            PathSegment::LineTo(nw.midpoint(ne)),
        ];
        let horizontal = [
            PathSegment::MoveTo(sw.midpoint(nw)),
            PathSegment::LineTo(se.midpoint(ne)),
        ];
        backend.stroke(&vertical, style);
        backend.stroke(&horizontal, style);
    }
}

/// An open polyline
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub points: Vec<Point>,
}

impl Connection {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl Shape for Connection {
    fn kind(&self) -> &'static str {
        "connection"
    }

    fn bounds(&self) -> BBox {
        BBox::from_points(&self.points)
    }

    fn apply(&mut self, t: &Transform) {
        for p in self.points.iter_mut() {
            *p = t.apply_point(*p);
        }
    }

    fn set_bounds(&mut self, bbox: BBox) -> Result<()> {
        let old = self.bounds();
        remap_points(&mut self.points, &old, &bbox);
        Ok(())
    }

    fn draw(&self, style: &Style, backend: &mut dyn Backend) {
        if self.points.len() < 2 {
            return;
        }
        backend.stroke(&polyline_path(&self.points, false), style);
    }

    fn supports_flip(&self) -> bool {
        false
    }
}

/// One line of text, sized by the text-metrics provider.
///
/// The corners are kept as points (sw, nw, ne, se in the upright pose) so
/// the baseline from the first to the last corner follows the line through
/// any rotation. `direction` tracks which way the text reads after quarter
/// turns.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: FontSize,
    pub corners: [Point; 4],
    pub direction: Direction,
}

impl TextLine {
    pub fn new(text: impl Into<String>, size: FontSize, origin: Point, extent: Size) -> Self {
        Self {
            text: text.into(),
            size,
            corners: frame_corners(&BBox::from_origin(origin, extent)),
            direction: Direction::Right,
        }
    }

    /// Baseline start and end
    pub fn baseline(&self) -> (Point, Point) {
        (self.corners[0], self.corners[3])
    }

    /// Line height as measured when the line was set, whatever its pose.
    pub fn height(&self) -> f64 {
        let (a, b) = (self.corners[0], self.corners[1]);
        (b.x - a.x).hypot(b.y - a.y)
    }

    /// Whether the line reads left-to-right along an axis-aligned baseline.
    pub fn is_upright(&self) -> bool {
        let (start, end) = self.baseline();
        let slack = 1e-9 * (end.x - start.x).abs().max(1.0);
        self.direction == Direction::Right && (start.y - end.y).abs() <= slack && start.x <= end.x
    }
}

impl Shape for TextLine {
    fn kind(&self) -> &'static str {
        "text line"
    }

    fn bounds(&self) -> BBox {
        BBox::from_points(&self.corners)
    }

    fn apply(&mut self, t: &Transform) {
        for p in self.corners.iter_mut() {
            *p = t.apply_point(*p);
        }
        self.direction = match *t {
            Transform::TurnRight { .. } => self.direction.clockwise(),
            Transform::TurnLeft { .. } => self.direction.counter_clockwise(),
            Transform::Rotate { degrees, .. } if t.preserves_axes() => {
                let quarters = (degrees / 90.0).round().rem_euclid(4.0) as u8;
                (0..quarters).fold(self.direction, |d, _| d.counter_clockwise())
            }
            _ => self.direction,
        };
    }

    fn set_bounds(&mut self, _bbox: BBox) -> Result<()> {
        Err(LayoutError::UnsupportedOperation {
            operation: "resizing",
            kind: self.kind(),
        })
    }

    fn draw(&self, style: &Style, backend: &mut dyn Backend) {
        let (start, end) = self.baseline();
        let run = TextRun {
            text: &self.text,
            size: self.size,
            start,
            end,
            height: self.height(),
            direction: self.direction,
        };
        backend.text(&run, style);
    }

    fn supports_flip(&self) -> bool {
        false
    }
}

/// A stack of text lines; the block itself is never drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub size: FontSize,
    pub alignment: Align,
    /// Gap between lines, also used as the margin around them
    pub spacing: f64,
    pub outline: Outline,
}

impl Shape for TextBlock {
    fn kind(&self) -> &'static str {
        "text block"
    }

    fn bounds(&self) -> BBox {
        self.outline.bounds()
    }

    fn apply(&mut self, t: &Transform) {
        self.outline.apply(t);
    }

    fn set_bounds(&mut self, bbox: BBox) -> Result<()> {
        self.outline.set_bounds(bbox);
        Ok(())
    }

    fn draw(&self, _style: &Style, _backend: &mut dyn Backend) {}
}

/// Closed set of shapes a diagram node can hold
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEnum {
    Rectangle,
    Triangle,
    Ellipse,
    Cross,
    Connection,
    TextLine,
    TextBlock,
}

impl ShapeEnum {
    pub fn as_text_line(&self) -> Option<&TextLine> {
        match self {
            ShapeEnum::TextLine(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_block(&self) -> Option<&TextBlock> {
        match self {
            ShapeEnum::TextBlock(t) => Some(t),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DisplayList;
    use crate::types::{Offset, Turn};

    fn close(a: Point, b: Point) -> bool {
        a.approx_eq(b, 1e-9)
    }

    #[test]
    fn rectangle_bounds_follow_frame() {
        let r = Rectangle::new(Point::new(1.0, 2.0), Size::new(3.0, 4.0));
        assert_eq!(r.bounds().min, Point::new(1.0, 2.0));
        assert_eq!(r.bounds().max, Point::new(4.0, 6.0));
    }

    #[test]
    fn rectangle_becomes_polygon_when_rotated_off_axis() {
        let mut r = Rectangle::new(Point::ORIGIN, Size::new(2.0, 2.0));
        r.apply(&Transform::Rotate {
            pivot: Point::new(1.0, 1.0),
            degrees: 45.0,
        });
        assert!(matches!(r.outline, Outline::Points(ref pts) if pts.len() == 4));
        let half_diag = std::f64::consts::SQRT_2;
        let bb = r.bounds();
        assert!((bb.width() - 2.0 * half_diag).abs() < 1e-9);
        assert!(close(bb.center(), Point::new(1.0, 1.0)));
    }

    #[test]
    fn triangle_apex_is_centered() {
        let t = Triangle::new(Point::ORIGIN, Size::new(2.0, 3.0));
        let v = t.outline.vertices();
        assert_eq!(v[1], Point::new(1.0, 3.0));
        assert_eq!(t.bounds().size(), Size::new(2.0, 3.0));
    }

    #[test]
    fn triangle_set_bounds_stretches_vertices() {
        let mut t = Triangle::new(Point::ORIGIN, Size::new(2.0, 2.0));
        t.set_bounds(BBox::from_origin(Point::new(1.0, 1.0), Size::new(4.0, 1.0)))
            .unwrap();
        let v = t.outline.vertices();
        assert_eq!(v, [Point::new(1.0, 1.0), Point::new(3.0, 2.0), Point::new(5.0, 1.0)]);
    }

    #[test]
    fn ellipse_keeps_size_under_off_axis_rotation() {
        let mut e = Ellipse::new(Point::ORIGIN, Size::new(4.0, 2.0));
        e.apply(&Transform::Rotate {
            pivot: Point::ORIGIN,
            degrees: 30.0,
        });
        assert_eq!(e.bounds().size(), Size::new(4.0, 2.0));
        assert!(e.is_rotation_invariant());
    }

    #[test]
    fn circle_from_center() {
        let c = Ellipse::circle(Point::new(1.0, 1.0), 0.5);
        assert_eq!(c.bounds().min, Point::new(0.5, 0.5));
        assert_eq!(c.bounds().size(), Size::new(1.0, 1.0));
    }

    #[test]
    fn connection_bounds_cover_all_points() {
        let c = Connection::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(1.0, -2.0),
        ]);
        let bb = c.bounds();
        assert_eq!(bb.min, Point::new(0.0, -2.0));
        assert_eq!(bb.max, Point::new(3.0, 1.0));
        assert!(!c.supports_flip());
    }

    #[test]
    fn text_line_tracks_direction_through_turns() {
        let mut line = TextLine::new("abc", FontSize::Normal, Point::ORIGIN, Size::new(2.0, 0.5));
        let frame = BBox::from_origin(Point::ORIGIN, Size::new(4.0, 4.0));
        let turn = Transform::quarter_turn(Turn::Right, &frame);
        line.apply(&turn);
        assert_eq!(line.direction, Direction::Down);
        let (start, end) = line.baseline();
        // Baseline now runs top to bottom.
        assert!(start.y > end.y);
        assert!((start.x - end.x).abs() < 1e-12);
        line.apply(&Transform::quarter_turn(Turn::Left, &frame));
        assert_eq!(line.direction, Direction::Right);
        assert!(line.is_upright());
    }

    #[test]
    fn text_line_quarter_rotation_turns_direction_counter_clockwise() {
        let mut line = TextLine::new("abc", FontSize::Normal, Point::ORIGIN, Size::new(2.0, 0.5));
        line.apply(&Transform::Rotate {
            pivot: Point::ORIGIN,
            degrees: 90.0,
        });
        assert_eq!(line.direction, Direction::Up);
    }

    #[test]
    fn text_line_refuses_resize() {
        let mut line = TextLine::new("abc", FontSize::Normal, Point::ORIGIN, Size::new(2.0, 0.5));
        let err = line.set_bounds(BBox::from_origin(Point::ORIGIN, Size::new(1.0, 1.0)));
        assert!(matches!(err, Err(LayoutError::UnsupportedOperation { .. })));
    }

    #[test]
    fn enum_dispatch_forwards_to_variant() {
        let mut shape: ShapeEnum = Rectangle::new(Point::ORIGIN, Size::new(1.0, 1.0)).into();
        shape.apply(&Transform::Translate(Offset::new(2.0, 3.0)));
        assert_eq!(shape.bounds().min, Point::new(2.0, 3.0));
        assert_eq!(shape.kind(), "rectangle");
    }

    #[test]
    fn cross_draws_two_strokes() {
        let cross = Cross::new(Point::ORIGIN, Size::new(2.0, 2.0));
        let mut list = DisplayList::default();
        cross.draw(&Style::new(), &mut list);
        assert_eq!(list.commands().len(), 2);
    }
}
