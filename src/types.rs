//! Value types for diagram geometry.
//!
//! Coordinates are y-up: north is `+y`, east is `+x`. A `Point` is a
//! position, an `Offset` is a displacement; `Point - Point = Offset` and
//! `Point + Offset = Point`, so the two never get mixed up by accident.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinite values.
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Reject NaN, infinite and negative values.
#[inline]
pub fn non_negative(val: f64) -> Result<f64, NumericError> {
    let val = finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Reject NaN, infinite, zero and negative values.
#[inline]
pub fn positive(val: f64) -> Result<f64, NumericError> {
    let val = non_negative(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else {
        Ok(val)
    }
}

/// 2D point in diagram units
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Calculate the midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Point at `fraction` of the way from `self` to `other`.
    pub fn lerp(self, other: Self, fraction: f64) -> Self {
        Point {
            x: self.x + fraction * (other.x - self.x),
            y: self.y + fraction * (other.y - self.y),
        }
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }

    /// Whether both coordinates are within `eps` of `other`'s.
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement/offset vector (not an absolute position)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Offset { dx, dy }
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Neg for Offset {
    type Output = Offset;
    fn neg(self) -> Offset {
        Offset::new(-self.dx, -self.dy)
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;
    fn mul(self, rhs: f64) -> Offset {
        Offset::new(self.dx * rhs, self.dy * rhs)
    }
}

/// Add an offset to a point to get a new point
impl Add<Offset> for Point {
    type Output = Point;
    fn add(self, rhs: Offset) -> Point {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

impl AddAssign<Offset> for Point {
    fn add_assign(&mut self, rhs: Offset) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

/// Subtract an offset from a point to get a new point
impl Sub<Offset> for Point {
    type Output = Point;
    fn sub(self, rhs: Offset) -> Point {
        Point {
            x: self.x - rhs.dx,
            y: self.y - rhs.dy,
        }
    }
}

/// Subtract two points to get an offset
impl Sub<Point> for Point {
    type Output = Offset;
    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// Scale a point's coordinates
impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Size { w, h }
    }

    /// Create a size with validation (rejects NaN, infinite and negative extents)
    pub fn try_new(w: f64, h: f64) -> Result<Self, NumericError> {
        Ok(Size {
            w: non_negative(w)?,
            h: non_negative(h)?,
        })
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    /// Box with its south-west corner at `origin`.
    pub fn from_origin(origin: Point, size: Size) -> Self {
        BBox {
            min: origin,
            max: Point::new(origin.x + size.w, origin.y + size.h),
        }
    }

    /// Tight box around a sequence of points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bb = BBox::new();
        for p in points {
            bb.expand_point(*p);
        }
        bb
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include another box
    pub fn expand_bbox(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    /// Grow by `delta` on every side (shrink for negative `delta`).
    pub fn inflate(&self, delta: f64) -> BBox {
        BBox {
            min: Point::new(self.min.x - delta, self.min.y - delta),
            max: Point::new(self.max.x + delta, self.max.y + delta),
        }
    }

    /// Whether `other` lies inside this box, with `eps` slack.
    pub fn contains_bbox(&self, other: &BBox, eps: f64) -> bool {
        other.min.x >= self.min.x - eps
            && other.min.y >= self.min.y - eps
            && other.max.x <= self.max.x + eps
            && other.max.y <= self.max.y + eps
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.width(),
            h: self.height(),
        }
    }

    /// The south-west corner, which doubles as the box origin.
    pub fn origin(&self) -> Point {
        self.min
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    pub fn translate(&self, offset: Offset) -> BBox {
        BBox {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Flow or placement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The direction a quarter-turn clockwise from this one.
    pub fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// The direction a quarter-turn counter-clockwise from this one.
    pub fn counter_clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(s)
    }
}

/// Alignment mode for chain placement and text stacking.
///
/// Horizontal chains align on `Bottom`, `Middle` or `Top`; vertical chains
/// align on `Left`, `Center` or `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Right,
    Center,
    Bottom,
    Middle,
    Top,
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Align::Left => "left",
            Align::Right => "right",
            Align::Center => "center",
            Align::Bottom => "bottom",
            Align::Middle => "middle",
            Align::Top => "top",
        };
        f.write_str(s)
    }
}

/// Quarter-turn tilt requested on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// 90° clockwise
    Right,
    /// 90° counter-clockwise
    Left,
    /// 180°, two right turns
    Down,
}

/// Mirror axis for flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Mirror left/right (x changes)
    Horizontal,
    /// Mirror top/bottom (y changes)
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert_eq!(finite(f64::NAN), Err(NumericError::NaN));
        assert_eq!(finite(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(finite(-2.0), Ok(-2.0));
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert_eq!(positive(0.0), Err(NumericError::Zero));
        assert_eq!(positive(-1.0), Err(NumericError::Negative));
        assert_eq!(positive(0.5), Ok(0.5));
    }

    #[test]
    fn point_plus_offset_gives_point() {
        let p = Point::new(1.0, 2.0);
        let o = Offset::new(3.0, 4.0);
        assert_eq!(p + o, Point::new(4.0, 6.0));
        assert_eq!(p - o, Point::new(-2.0, -2.0));
    }

    #[test]
    fn point_minus_point_gives_offset() {
        let offset = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(offset, Offset::new(3.0, 4.0));
    }

    #[test]
    fn point_scales_by_scalar() {
        assert_eq!(Point::new(1.5, -2.0) * 2.0, Point::new(3.0, -4.0));
    }

    #[test]
    fn lerp_partitions_segment() {
        let p = Point::new(0.0, 0.0).lerp(Point::new(4.0, 8.0), 0.25);
        assert_eq!(p, Point::new(1.0, 2.0));
    }

    #[test]
    fn bbox_new_is_empty() {
        assert!(BBox::new().is_empty());
    }

    #[test]
    fn bbox_from_points() {
        let pts = [Point::new(1.0, 5.0), Point::new(3.0, 2.0), Point::new(-1.0, 4.0)];
        let bb = BBox::from_points(&pts);
        assert_eq!(bb.min, Point::new(-1.0, 2.0));
        assert_eq!(bb.max, Point::new(3.0, 5.0));
        assert_eq!(bb.size(), Size::new(4.0, 3.0));
    }

    #[test]
    fn bbox_inflate_and_contains() {
        let bb = BBox::from_origin(Point::ORIGIN, Size::new(2.0, 1.0));
        let grown = bb.inflate(0.5);
        assert_eq!(grown.min, Point::new(-0.5, -0.5));
        assert!(grown.contains_bbox(&bb, 0.0));
        assert!(!bb.contains_bbox(&grown, 0.0));
    }

    #[test]
    fn direction_cycles_clockwise() {
        let mut d = Direction::Up;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(d);
            d = d.clockwise();
        }
        assert_eq!(seen, [Direction::Up, Direction::Right, Direction::Down, Direction::Left]);
        assert_eq!(d, Direction::Up);
        assert_eq!(Direction::Right.clockwise().counter_clockwise(), Direction::Right);
    }
}
