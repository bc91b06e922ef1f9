//! Named reference points on a bounding box.
//!
//! Every primitive exposes the same nine anchors, all derived from its
//! bounding box. Reading an anchor is a pure function of the box; writing one
//! is a translation (see [`Diagram::move_anchor_to`](crate::Diagram::move_anchor_to)).

use std::fmt;

use crate::types::{BBox, Point};

/// Center, the four corners and the four edge midpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::Center,
        Anchor::North,
        Anchor::NorthEast,
        Anchor::East,
        Anchor::SouthEast,
        Anchor::South,
        Anchor::SouthWest,
        Anchor::West,
        Anchor::NorthWest,
    ];

    /// Position of this anchor as fractions of the box extent, measured
    /// from the south-west corner (y-up).
    pub fn fractions(self) -> (f64, f64) {
        match self {
            Anchor::Center => (0.5, 0.5),
            Anchor::North => (0.5, 1.0),
            Anchor::NorthEast => (1.0, 1.0),
            Anchor::East => (1.0, 0.5),
            Anchor::SouthEast => (1.0, 0.0),
            Anchor::South => (0.5, 0.0),
            Anchor::SouthWest => (0.0, 0.0),
            Anchor::West => (0.0, 0.5),
            Anchor::NorthWest => (0.0, 1.0),
        }
    }

    /// Resolve the anchor against a bounding box.
    pub fn resolve(self, bbox: &BBox) -> Point {
        let (fx, fy) = self.fractions();
        Point::new(
            bbox.min.x + fx * bbox.width(),
            bbox.min.y + fy * bbox.height(),
        )
    }

    /// Short compass name (`c`, `n`, `ne`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Anchor::Center => "c",
            Anchor::North => "n",
            Anchor::NorthEast => "ne",
            Anchor::East => "e",
            Anchor::SouthEast => "se",
            Anchor::South => "s",
            Anchor::SouthWest => "sw",
            Anchor::West => "w",
            Anchor::NorthWest => "nw",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
