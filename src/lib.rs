//! A declarative box-and-anchor layout engine for vector diagrams.
//!
//! Shapes live in a [`Diagram`] arena and form a tree. Every node has a
//! bounding box and nine named [`Anchor`]s; layout happens by moving anchors
//! onto points, chaining nodes next to each other, and applying transforms
//! that carry a node's whole subtree along. Drawing is delegated to a
//! [`Backend`]: [`DisplayList`] records calls, [`SvgBackend`] builds an SVG
//! document.
//!
//! ```
//! use anchorage::{Align, Anchor, Diagram, Point, Size, left_to_right};
//!
//! let mut d: Diagram = Diagram::default();
//! let a = d.rectangle(Point::ORIGIN, Size::new(1.0, 1.0))?;
//! let b = d.rectangle(Point::ORIGIN, Size::new(1.0, 1.0))?;
//! left_to_right(&mut d, a, Align::Middle, 0.5, &[b])?;
//! assert_eq!(d.anchor(b, Anchor::West)?, Point::new(1.5, 0.5));
//! # Ok::<(), anchorage::LayoutError>(())
//! ```

mod log;

pub mod anchor;
pub mod defaults;
pub mod diagram;
pub mod errors;
pub mod layout;
pub mod metrics;
pub mod render;
pub mod shapes;
pub mod style;
pub mod text;
pub mod transform;
pub mod types;
pub mod widgets;

pub use anchor::Anchor;
pub use diagram::{Diagram, Node, NodeId};
pub use errors::{LayoutError, Result};
pub use layout::{
    bottom_to_top, left_to_right, manhattan_connection_x, manhattan_connection_y, partition_segment,
    place_chain, right_to_left, staircase_connection_x, top_to_bottom,
};
pub use metrics::{CharWidthMetrics, FontSize, TextMetrics};
pub use render::svg::{Scaler, SvgBackend};
pub use render::{Backend, DisplayList, DrawCommand, PathSegment, TextRun};
pub use shapes::{
    Connection, Cross, Ellipse, Outline, Rectangle, Shape, ShapeEnum, TextBlock, TextLine, Triangle,
};
pub use style::{Color, Style, StyleAttr};
pub use transform::Transform;
pub use types::{Align, Axis, BBox, Direction, NumericError, Offset, Point, Size, Turn};
pub use widgets::{CoordinateFrame, LabeledArrow};
