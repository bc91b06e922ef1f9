//! Chain placement and connection routing.
//!
//! A chain lines up a sequence of nodes one after another: each node is
//! moved so that one of its anchors sits `gap` away from the matching anchor
//! of the node placed before it. The alignment picks which edge the chain
//! keeps flush.

use crate::anchor::Anchor;
use crate::diagram::{Diagram, NodeId};
use crate::errors::{LayoutError, Result};
use crate::metrics::TextMetrics;
use crate::shapes::Connection;
use crate::types::{Align, Direction, Offset, Point, finite};

/// One step of a chain: the anchor read on the previous node, the anchor
/// set on the next node, and the gap direction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChainStep {
    from: Anchor,
    to: Anchor,
    unit: Offset,
}

fn chain_step(direction: Direction, alignment: Align) -> Result<ChainStep> {
    use Anchor::*;

    let (from, to) = match (direction, alignment) {
        (Direction::Right, Align::Bottom) => (SouthEast, SouthWest),
        (Direction::Right, Align::Middle) => (East, West),
        (Direction::Right, Align::Top) => (NorthEast, NorthWest),
        (Direction::Left, Align::Bottom) => (SouthWest, SouthEast),
        (Direction::Left, Align::Middle) => (West, East),
        (Direction::Left, Align::Top) => (NorthWest, NorthEast),
        (Direction::Down, Align::Left) => (SouthWest, NorthWest),
        (Direction::Down, Align::Center) => (South, North),
        (Direction::Down, Align::Right) => (SouthEast, NorthEast),
        (Direction::Up, Align::Left) => (NorthWest, SouthWest),
        (Direction::Up, Align::Center) => (North, South),
        (Direction::Up, Align::Right) => (NorthEast, SouthEast),
        _ => {
            return Err(LayoutError::InvalidAlignment {
                alignment,
                direction,
            });
        }
    };
    let unit = match direction {
        Direction::Right => Offset::new(1.0, 0.0),
        Direction::Left => Offset::new(-1.0, 0.0),
        Direction::Up => Offset::new(0.0, 1.0),
        Direction::Down => Offset::new(0.0, -1.0),
    };
    Ok(ChainStep { from, to, unit })
}

/// Place `nodes` one after another, starting next to `anchor`.
///
/// The alignment is checked and every node looked up before anything is
/// moved.
pub fn place_chain<M: TextMetrics>(
    diagram: &mut Diagram<M>,
    anchor: NodeId,
    direction: Direction,
    alignment: Align,
    gap: f64,
    nodes: &[NodeId],
) -> Result<()> {
    let step = chain_step(direction, alignment)?;
    let gap = finite(gap)?;
    diagram.node(anchor)?;
    for &id in nodes {
        diagram.node(id)?;
    }

    let shift = step.unit * gap;
    let mut previous = anchor;
    for &next in nodes {
        let target = diagram.anchor(previous, step.from)? + shift;
        crate::log::trace!(node = next.0, anchor = %step.to, x = target.x, y = target.y, "chain");
        diagram.move_anchor_to(next, step.to, target)?;
        previous = next;
    }
    Ok(())
}

/// Chain advancing towards `+x`; takes bottom, middle or top alignment.
pub fn left_to_right<M: TextMetrics>(
    diagram: &mut Diagram<M>,
    anchor: NodeId,
    alignment: Align,
    gap: f64,
    nodes: &[NodeId],
) -> Result<()> {
    place_chain(diagram, anchor, Direction::Right, alignment, gap, nodes)
}

/// Chain advancing towards `-x`; takes bottom, middle or top alignment.
pub fn right_to_left<M: TextMetrics>(
    diagram: &mut Diagram<M>,
    anchor: NodeId,
    alignment: Align,
    gap: f64,
    nodes: &[NodeId],
) -> Result<()> {
    place_chain(diagram, anchor, Direction::Left, alignment, gap, nodes)
}

/// Chain advancing towards `-y`; takes left, center or right alignment.
pub fn top_to_bottom<M: TextMetrics>(
    diagram: &mut Diagram<M>,
    anchor: NodeId,
    alignment: Align,
    gap: f64,
    nodes: &[NodeId],
) -> Result<()> {
    place_chain(diagram, anchor, Direction::Down, alignment, gap, nodes)
}

/// Chain advancing towards `+y`; takes left, center or right alignment.
pub fn bottom_to_top<M: TextMetrics>(
    diagram: &mut Diagram<M>,
    anchor: NodeId,
    alignment: Align,
    gap: f64,
    nodes: &[NodeId],
) -> Result<()> {
    place_chain(diagram, anchor, Direction::Up, alignment, gap, nodes)
}

/// Point at `fraction` of the way from `start` to `stop`.
pub fn partition_segment(start: Point, stop: Point, fraction: f64) -> Point {
    start.lerp(stop, fraction)
}

/// Horizontal leg first, then vertical.
pub fn manhattan_connection_x(from: Point, to: Point) -> Connection {
    Connection::new(vec![from, Point::new(to.x, from.y), to])
}

/// Vertical leg first, then horizontal.
pub fn manhattan_connection_y(from: Point, to: Point) -> Connection {
    Connection::new(vec![from, Point::new(from.x, to.y), to])
}

/// Horizontal to halfway, vertical, horizontal again.
pub fn staircase_connection_x(from: Point, to: Point) -> Connection {
    let mid = (from.x + to.x) / 2.0;
    Connection::new(vec![from, Point::new(mid, from.y), Point::new(mid, to.y), to])
}
