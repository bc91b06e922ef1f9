//! The diagram tree and the operations that move it around.
//!
//! Nodes live in an arena owned by [`Diagram`] and are addressed by
//! [`NodeId`]. Every node stores absolute coordinates, so resolving an anchor
//! never walks up the tree; the price is that every transform is applied to
//! each node of the subtree it was invoked on, which
//! [`Diagram::transform_subtree`] does with an explicit stack.

use std::collections::HashSet;
use std::fmt;

use crate::anchor::Anchor;
use crate::defaults;
use crate::errors::{LayoutError, Result};
use crate::metrics::{CharWidthMetrics, FontSize, TextMetrics};
use crate::shapes::{Connection, Cross, Ellipse, Rectangle, Shape, ShapeEnum, TextLine, Triangle};
use crate::style::{Style, StyleAttr};
use crate::transform::Transform;
use crate::types::{Axis, BBox, Offset, Point, Size, Turn, finite, non_negative, positive};

/// Handle to a node of a [`Diagram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A primitive plus its place in the tree
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) shape: ShapeEnum,
    pub(crate) style: Style,
    pub(crate) border: bool,
    pub(crate) debug: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn new(shape: ShapeEnum) -> Self {
        Self {
            shape,
            style: Style::new(),
            border: true,
            debug: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn shape(&self) -> &ShapeEnum {
        &self.shape
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Whether the node strokes its own outline
    pub fn border(&self) -> bool {
        self.border
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Arena of diagram nodes, parameterized by the text-metrics provider used
/// to size text.
#[derive(Debug, Clone)]
pub struct Diagram<M = CharWidthMetrics> {
    pub(crate) nodes: Vec<Node>,
    pub(crate) metrics: M,
}

impl Default for Diagram<CharWidthMetrics> {
    fn default() -> Self {
        Self::new(CharWidthMetrics::default())
    }
}

fn checked_point(p: Point) -> Result<Point> {
    Ok(Point::new(finite(p.x)?, finite(p.y)?))
}

fn checked_size(size: Size) -> Result<Size> {
    Ok(Size::try_new(size.w, size.h)?)
}

impl<M: TextMetrics> Diagram<M> {
    pub fn new(metrics: M) -> Self {
        Self {
            nodes: Vec::new(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_shape(&mut self, shape: impl Into<ShapeEnum>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(shape.into()));
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(LayoutError::UnknownNode(id.0))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(LayoutError::UnknownNode(id.0))
    }

    pub fn shape(&self, id: NodeId) -> Result<&ShapeEnum> {
        Ok(&self.node(id)?.shape)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub fn rectangle(&mut self, origin: Point, size: Size) -> Result<NodeId> {
        let shape = Rectangle::new(checked_point(origin)?, checked_size(size)?);
        Ok(self.add_shape(shape))
    }

    /// Rectangle of the default size.
    pub fn default_rectangle(&mut self, origin: Point) -> Result<NodeId> {
        self.rectangle(origin, Size::new(defaults::RECT_WIDTH, defaults::RECT_HEIGHT))
    }

    /// A borderless, zero-sized rectangle meant to be stretched around
    /// whatever gets attached to it.
    pub fn group(&mut self) -> NodeId {
        let id = self.add_shape(Rectangle::new(Point::ORIGIN, Size::default()));
        self.nodes[id.0].border = false;
        id
    }

    pub fn triangle(&mut self, origin: Point, size: Size) -> Result<NodeId> {
        let shape = Triangle::new(checked_point(origin)?, checked_size(size)?);
        Ok(self.add_shape(shape))
    }

    pub fn ellipse(&mut self, origin: Point, size: Size) -> Result<NodeId> {
        let shape = Ellipse::new(checked_point(origin)?, checked_size(size)?);
        Ok(self.add_shape(shape))
    }

    pub fn circle(&mut self, center: Point, radius: f64) -> Result<NodeId> {
        let shape = Ellipse::circle(checked_point(center)?, non_negative(radius)?);
        Ok(self.add_shape(shape))
    }

    /// Circle of the default radius.
    pub fn default_circle(&mut self, center: Point) -> Result<NodeId> {
        self.circle(center, defaults::CIRCLE_RADIUS)
    }

    pub fn cross(&mut self, origin: Point, size: Size) -> Result<NodeId> {
        let shape = Cross::new(checked_point(origin)?, checked_size(size)?);
        Ok(self.add_shape(shape))
    }

    /// An open polyline through `points`; at least two are required.
    pub fn connection(&mut self, points: Vec<Point>) -> Result<NodeId> {
        if points.len() < 2 {
            return Err(LayoutError::invalid_operation(
                "create connection",
                format!("a polyline needs at least two points, got {}", points.len()),
            ));
        }
        let points = points
            .into_iter()
            .map(checked_point)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.add_shape(Connection::new(points)))
    }

    /// A single line of text with its south-west corner at `origin`.
    pub fn text_line(&mut self, text: impl Into<String>, size: FontSize, origin: Point) -> Result<NodeId> {
        let text = text.into();
        let measured = self.metrics.measure(&text, size);
        let extent = Size::try_new(measured.w, measured.h)?;
        let shape = TextLine::new(text, size, checked_point(origin)?, extent);
        Ok(self.add_shape(shape))
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    /// Attach `child` under `parent`.
    ///
    /// A node is attached at most once, and never under itself or one of
    /// its own descendants. Coordinates are absolute, so nothing moves.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if let Some(existing) = self.node(child)?.parent {
            return Err(LayoutError::invalid_operation(
                "add child",
                format!("node {child} is already attached to {existing}"),
            ));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(LayoutError::invalid_operation(
                "add child",
                format!("attaching {child} under {parent} would create a cycle"),
            ));
        }
        if self.nodes[parent.0].shape.as_text_block().is_some() {
            return Err(LayoutError::invalid_operation(
                "add child",
                format!("text block {parent} only holds its own lines"),
            ));
        }
        self.attach(parent, child);
        Ok(())
    }

    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Number of ancestors; roots have depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Nodes without a parent, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| NodeId(i))
    }

    /// `id` and all of its descendants, parents before children.
    pub fn subtree(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.node(id)?;
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        Ok(order)
    }

    // ------------------------------------------------------------------
    // Anchors
    // ------------------------------------------------------------------

    pub fn bounds(&self, id: NodeId) -> Result<BBox> {
        Ok(self.node(id)?.shape.bounds())
    }

    pub fn anchor(&self, id: NodeId, anchor: Anchor) -> Result<Point> {
        Ok(anchor.resolve(&self.bounds(id)?))
    }

    /// Translate `id` and its subtree so that `anchor` lands on `target`.
    pub fn move_anchor_to(&mut self, id: NodeId, anchor: Anchor, target: Point) -> Result<()> {
        let target = checked_point(target)?;
        let current = self.anchor(id, anchor)?;
        self.translate(id, target - current)
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Apply `t` to every node under `id`, children before their parents.
    pub(crate) fn transform_subtree(&mut self, id: NodeId, t: &Transform) -> Result<()> {
        let nodes = self.subtree(id)?;
        crate::log::debug!(node = id.0, nodes = nodes.len(), transform = ?t, "transform subtree");
        for n in nodes.into_iter().rev() {
            self.nodes[n.0].shape.apply(t);
        }
        Ok(())
    }

    pub fn translate(&mut self, id: NodeId, offset: Offset) -> Result<()> {
        let offset = Offset::new(finite(offset.dx)?, finite(offset.dy)?);
        if offset.is_zero() {
            return Ok(());
        }
        self.transform_subtree(id, &Transform::Translate(offset))
    }

    /// Scale `id` and its subtree by `factor` about the node's south-west
    /// corner.
    ///
    /// Text blocks are re-set at a size from the font ladder instead of being
    /// scaled point-wise; a standalone text line keeps its size and only its
    /// position is scaled. Every text block in the subtree is checked before
    /// anything moves.
    pub fn scale(&mut self, id: NodeId, factor: f64) -> Result<()> {
        let factor = positive(factor)?;
        let pivot = self.bounds(id)?.origin();
        if factor == 1.0 {
            return Ok(());
        }
        let nodes = self.subtree(id)?;

        let mut plans = Vec::new();
        let mut skip = HashSet::new();
        for &n in &nodes {
            if self.nodes[n.0].shape.as_text_block().is_some() {
                if let Some(plan) = self.plan_text_rescale(n, pivot, factor)? {
                    plans.push(plan);
                }
                skip.insert(n);
                skip.extend(self.nodes[n.0].children.iter().copied());
            }
        }

        crate::log::debug!(node = id.0, nodes = nodes.len(), factor, blocks = plans.len(), "scale subtree");
        let t = Transform::Scale { pivot, factor };
        for &n in nodes.iter().rev() {
            if skip.contains(&n) {
                continue;
            }
            let shape = &mut self.nodes[n.0].shape;
            if shape.as_text_line().is_some() {
                let sw = shape.bounds().origin();
                shape.apply(&Transform::Translate(t.apply_point(sw) - sw));
            } else {
                shape.apply(&t);
            }
        }
        for plan in plans {
            self.apply_text_rescale(plan)?;
        }
        Ok(())
    }

    /// Rotate `id` and its subtree counter-clockwise about the node's
    /// south-west corner. Rotating a circle or ellipse directly does nothing.
    pub fn rotate(&mut self, id: NodeId, degrees: f64) -> Result<()> {
        let degrees = finite(degrees)?;
        let node = self.node(id)?;
        if node.shape.is_rotation_invariant() {
            crate::log::debug!(node = id.0, kind = node.shape.kind(), "rotation has no visible effect");
            return Ok(());
        }
        let pivot = node.shape.bounds().origin();
        self.transform_subtree(id, &Transform::Rotate { pivot, degrees })
    }

    fn parent_frame(&self, id: NodeId, operation: &'static str) -> Result<BBox> {
        self.node(id)?;
        match self.parent(id) {
            Some(parent) => self.bounds(parent),
            None => Err(LayoutError::invalid_operation(
                operation,
                format!("node {id} has no parent frame"),
            )),
        }
    }

    /// Turn `id` a quarter (or half, for [`Turn::Down`]) within its parent's
    /// frame. The parent itself does not move.
    pub fn tilt(&mut self, id: NodeId, turn: Turn) -> Result<()> {
        let frame = self.parent_frame(id, "tilt")?;
        let t = Transform::quarter_turn(turn, &frame);
        let steps = if turn == Turn::Down { 2 } else { 1 };
        for _ in 0..steps {
            self.transform_subtree(id, &t)?;
        }
        Ok(())
    }

    /// Mirror `id` within its parent's frame.
    pub fn flip(&mut self, id: NodeId, axis: Axis) -> Result<()> {
        let frame = self.parent_frame(id, "flip")?;
        let nodes = self.subtree(id)?;
        if let Some(n) = nodes.iter().find(|n| !self.nodes[n.0].shape.supports_flip()) {
            return Err(LayoutError::UnsupportedOperation {
                operation: "flipping",
                kind: self.nodes[n.0].shape.kind(),
            });
        }
        self.transform_subtree(id, &Transform::mirror(axis, &frame))
    }

    // ------------------------------------------------------------------
    // Fitting
    // ------------------------------------------------------------------

    fn children_bounds(&self, id: NodeId) -> Result<Option<BBox>> {
        let node = self.node(id)?;
        if node.children.is_empty() {
            return Ok(None);
        }
        let mut bb = BBox::new();
        for c in &node.children {
            bb.expand_bbox(&self.nodes[c.0].shape.bounds());
        }
        Ok(Some(bb))
    }

    fn fit_to_children(&mut self, id: NodeId, delta: f64, axis: Option<Axis>) -> Result<()> {
        let delta = finite(delta)?;
        let Some(inner) = self.children_bounds(id)? else {
            crate::log::warn!(node = id.0, "stretch on a node without children");
            return Ok(());
        };
        let fitted = inner.inflate(delta);
        let current = self.bounds(id)?;
        let target = match axis {
            None => fitted,
            Some(Axis::Horizontal) => BBox {
                min: Point::new(fitted.min.x, current.min.y),
                max: Point::new(fitted.max.x, current.max.y),
            },
            Some(Axis::Vertical) => BBox {
                min: Point::new(current.min.x, fitted.min.y),
                max: Point::new(current.max.x, fitted.max.y),
            },
        };
        if target.width() < 0.0 || target.height() < 0.0 {
            return Err(LayoutError::invalid_operation(
                "stretch",
                format!("margin {delta} is larger than the children's extent"),
            ));
        }
        crate::log::debug!(node = id.0, delta, ?axis, "stretch");
        self.node_mut(id)?.shape.set_bounds(target)
    }

    /// Make the node hug its children's bounding box, grown by `delta` on
    /// every side. Does nothing for a node without children.
    pub fn stretch(&mut self, id: NodeId, delta: f64) -> Result<()> {
        self.fit_to_children(id, delta, None)
    }

    /// Like [`stretch`](Self::stretch) but only along x.
    pub fn stretch_horizontal(&mut self, id: NodeId, delta: f64) -> Result<()> {
        self.fit_to_children(id, delta, Some(Axis::Horizontal))
    }

    /// Like [`stretch`](Self::stretch) but only along y.
    pub fn stretch_vertical(&mut self, id: NodeId, delta: f64) -> Result<()> {
        self.fit_to_children(id, delta, Some(Axis::Vertical))
    }

    /// Set the node's size, keeping its south-west corner, and shift every
    /// child subtree by half the size change so the contents stay centered.
    pub fn resize(&mut self, id: NodeId, width: f64, height: f64) -> Result<()> {
        let size = Size::try_new(width, height)?;
        let old = self.bounds(id)?;
        if size.w == 0.0 || size.h == 0.0 {
            crate::log::warn!(node = id.0, width, height, "resize to zero area");
        }
        self.node_mut(id)?
            .shape
            .set_bounds(BBox::from_origin(old.origin(), size))?;
        let shift = Offset::new((size.w - old.width()) / 2.0, (size.h - old.height()) / 2.0);
        if shift.is_zero() {
            return Ok(());
        }
        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.transform_subtree(child, &Transform::Translate(shift))?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Styling
    // ------------------------------------------------------------------

    /// Append a drawing attribute.
    pub fn decorate(&mut self, id: NodeId, attr: StyleAttr) -> Result<()> {
        self.node_mut(id)?.style.push(attr);
        Ok(())
    }

    pub fn set_border(&mut self, id: NodeId, border: bool) -> Result<()> {
        self.node_mut(id)?.border = border;
        Ok(())
    }

    /// Draw the node's bounding box and origin in addition to its outline.
    pub fn set_debug(&mut self, id: NodeId, debug: bool) -> Result<()> {
        self.node_mut(id)?.debug = debug;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn close(a: Point, b: Point) -> bool {
        a.approx_eq(b, 1e-9)
    }

    fn diagram() -> Diagram {
        Diagram::default()
    }

    fn unit(d: &mut Diagram, x: f64, y: f64) -> NodeId {
        d.rectangle(Point::new(x, y), Size::new(1.0, 1.0)).unwrap()
    }

    #[test]
    fn default_shapes_use_configured_sizes() {
        let mut d = diagram();
        let r = d.default_rectangle(Point::ORIGIN).unwrap();
        let c = d.default_circle(Point::ORIGIN).unwrap();
        assert_eq!(d.bounds(r).unwrap().size(), Size::new(defaults::RECT_WIDTH, defaults::RECT_HEIGHT));
        assert_eq!(d.anchor(c, Anchor::East).unwrap(), Point::new(defaults::CIRCLE_RADIUS, 0.0));
    }

    #[test]
    fn text_line_rejects_bad_measurements() {
        struct Broken;
        impl TextMetrics for Broken {
            fn measure(&self, _text: &str, _size: FontSize) -> Size {
                Size::new(f64::NAN, -1.0)
            }
        }
        let mut d = Diagram::new(Broken);
        let err = d.text_line("x", FontSize::Normal, Point::ORIGIN).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidNumber(_)));
        assert!(d.is_empty());
    }

    #[test]
    fn add_child_rejects_second_parent() {
        let mut d = diagram();
        let a = unit(&mut d, 0.0, 0.0);
        let b = unit(&mut d, 0.0, 0.0);
        let c = unit(&mut d, 0.0, 0.0);
        d.add_child(a, c).unwrap();
        let err = d.add_child(b, c).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidOperation { .. }));
        assert_eq!(d.parent(c), Some(a));
        assert_eq!(d.children(b), &[] as &[NodeId]);
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut d = diagram();
        let a = unit(&mut d, 0.0, 0.0);
        let b = unit(&mut d, 0.0, 0.0);
        d.add_child(a, b).unwrap();
        assert!(d.add_child(b, a).is_err());
        assert!(d.add_child(a, a).is_err());
        assert_eq!(d.depth(b), 1);
        assert_eq!(d.roots().collect::<Vec<_>>(), [a]);
    }

    #[test]
    fn unknown_node_is_reported() {
        let d = diagram();
        assert_eq!(d.bounds(NodeId(3)), Err(LayoutError::UnknownNode(3)));
    }

    #[test]
    fn constructors_reject_bad_numbers() {
        let mut d = diagram();
        assert!(d.rectangle(Point::new(f64::NAN, 0.0), Size::new(1.0, 1.0)).is_err());
        assert!(d.rectangle(Point::ORIGIN, Size::new(-1.0, 1.0)).is_err());
        assert!(d.connection(vec![Point::ORIGIN]).is_err());
        assert!(d.is_empty());
    }

    #[test]
    fn move_anchor_translates_subtree() {
        let mut d = diagram();
        let outer = d.rectangle(Point::ORIGIN, Size::new(4.0, 4.0)).unwrap();
        let inner = unit(&mut d, 1.0, 1.0);
        d.add_child(outer, inner).unwrap();
        d.move_anchor_to(outer, Anchor::Center, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(d.anchor(outer, Anchor::SouthWest).unwrap(), Point::new(8.0, 8.0));
        assert_eq!(d.anchor(inner, Anchor::SouthWest).unwrap(), Point::new(9.0, 9.0));
    }

    #[test]
    fn scale_about_south_west_corner() {
        let mut d = diagram();
        let outer = d.rectangle(Point::new(1.0, 1.0), Size::new(2.0, 2.0)).unwrap();
        let inner = unit(&mut d, 2.0, 2.0);
        d.add_child(outer, inner).unwrap();
        d.scale(outer, 2.0).unwrap();
        assert_eq!(d.bounds(outer).unwrap().min, Point::new(1.0, 1.0));
        assert_eq!(d.bounds(outer).unwrap().size(), Size::new(4.0, 4.0));
        assert_eq!(d.bounds(inner).unwrap().min, Point::new(3.0, 3.0));
        assert_eq!(d.bounds(inner).unwrap().size(), Size::new(2.0, 2.0));
        assert!(d.scale(outer, 0.0).is_err());
    }

    #[test]
    fn scale_keeps_standalone_text_line_size() {
        let mut d = diagram();
        let outer = d.rectangle(Point::ORIGIN, Size::new(4.0, 4.0)).unwrap();
        let text = d.text_line("label", FontSize::Normal, Point::new(1.0, 1.0)).unwrap();
        d.add_child(outer, text).unwrap();
        let before = d.bounds(text).unwrap().size();
        d.scale(outer, 2.0).unwrap();
        assert!(close(d.bounds(text).unwrap().min, Point::new(2.0, 2.0)));
        assert_eq!(d.bounds(text).unwrap().size(), before);
    }

    #[test]
    fn rotating_a_circle_is_a_no_op() {
        let mut d = diagram();
        let c = d.circle(Point::new(3.0, 3.0), 1.0).unwrap();
        let dot = d.circle(Point::new(3.5, 3.0), 0.1).unwrap();
        d.add_child(c, dot).unwrap();
        d.rotate(c, 90.0).unwrap();
        assert_eq!(d.bounds(c).unwrap(), BBox::from_origin(Point::new(2.0, 2.0), Size::new(2.0, 2.0)));
        assert!(close(d.bounds(dot).unwrap().center(), Point::new(3.5, 3.0)));
    }

    #[test]
    fn rotate_quarter_about_origin() {
        let mut d = diagram();
        let r = d.rectangle(Point::ORIGIN, Size::new(2.0, 1.0)).unwrap();
        d.rotate(r, 90.0).unwrap();
        let bb = d.bounds(r).unwrap();
        assert!(close(bb.min, Point::new(-1.0, 0.0)));
        assert!(close(bb.max, Point::new(0.0, 2.0)));
    }

    #[test]
    fn tilt_and_flip_need_a_parent() {
        let mut d = diagram();
        let r = unit(&mut d, 0.0, 0.0);
        assert!(matches!(
            d.tilt(r, Turn::Right),
            Err(LayoutError::InvalidOperation { operation: "tilt", .. })
        ));
        assert!(matches!(
            d.flip(r, Axis::Horizontal),
            Err(LayoutError::InvalidOperation { operation: "flip", .. })
        ));
    }

    #[test]
    fn tilt_right_swaps_extent_within_parent() {
        let mut d = diagram();
        let frame = d.rectangle(Point::ORIGIN, Size::new(4.0, 4.0)).unwrap();
        let bar = d.rectangle(Point::ORIGIN, Size::new(3.0, 1.0)).unwrap();
        d.add_child(frame, bar).unwrap();
        d.tilt(bar, Turn::Right).unwrap();
        let bb = d.bounds(bar).unwrap();
        assert_eq!(bb.size(), Size::new(1.0, 3.0));
        assert_eq!(bb.min, Point::new(0.0, 1.0));
        assert_eq!(d.bounds(frame).unwrap().size(), Size::new(4.0, 4.0));
    }

    #[test]
    fn tilt_down_is_two_right_turns() {
        let mut d = diagram();
        let frame = d.rectangle(Point::ORIGIN, Size::new(4.0, 2.0)).unwrap();
        let a = d.rectangle(Point::ORIGIN, Size::new(1.0, 0.5)).unwrap();
        let b = d.rectangle(Point::ORIGIN, Size::new(1.0, 0.5)).unwrap();
        d.add_child(frame, a).unwrap();
        d.add_child(frame, b).unwrap();
        d.tilt(a, Turn::Down).unwrap();
        d.tilt(b, Turn::Right).unwrap();
        d.tilt(b, Turn::Right).unwrap();
        assert_eq!(d.bounds(a).unwrap(), d.bounds(b).unwrap());
    }

    #[test]
    fn tilting_text_turns_its_direction() {
        let mut d = diagram();
        let frame = d.rectangle(Point::ORIGIN, Size::new(4.0, 4.0)).unwrap();
        let text = d.text_line("abc", FontSize::Normal, Point::ORIGIN).unwrap();
        d.add_child(frame, text).unwrap();
        d.tilt(text, Turn::Right).unwrap();
        let line = d.shape(text).unwrap().as_text_line().unwrap();
        assert_eq!(line.direction, Direction::Down);
        d.tilt(text, Turn::Left).unwrap();
        let line = d.shape(text).unwrap().as_text_line().unwrap();
        assert_eq!(line.direction, Direction::Right);
    }

    #[test]
    fn flip_mirrors_within_parent() {
        let mut d = diagram();
        let frame = d.rectangle(Point::ORIGIN, Size::new(10.0, 4.0)).unwrap();
        let r = d.rectangle(Point::new(1.0, 1.0), Size::new(2.0, 1.0)).unwrap();
        d.add_child(frame, r).unwrap();
        d.flip(r, Axis::Horizontal).unwrap();
        assert_eq!(d.bounds(r).unwrap().min, Point::new(7.0, 1.0));
        d.flip(r, Axis::Vertical).unwrap();
        assert_eq!(d.bounds(r).unwrap().min, Point::new(7.0, 2.0));
    }

    #[test]
    fn flip_rejects_polylines_without_moving_anything() {
        let mut d = diagram();
        let frame = d.rectangle(Point::ORIGIN, Size::new(10.0, 4.0)).unwrap();
        let holder = d.rectangle(Point::new(1.0, 1.0), Size::new(2.0, 1.0)).unwrap();
        let wire = d.connection(vec![Point::new(1.0, 1.0), Point::new(3.0, 2.0)]).unwrap();
        d.add_child(frame, holder).unwrap();
        d.add_child(holder, wire).unwrap();
        let err = d.flip(holder, Axis::Horizontal).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnsupportedOperation {
                operation: "flipping",
                kind: "connection"
            }
        );
        assert_eq!(d.bounds(holder).unwrap().min, Point::new(1.0, 1.0));
    }

    #[test]
    fn stretch_hugs_children() {
        let mut d = diagram();
        let g = d.group();
        let a = unit(&mut d, 0.0, 0.0);
        let b = unit(&mut d, 3.0, 2.0);
        d.add_child(g, a).unwrap();
        d.add_child(g, b).unwrap();
        d.stretch(g, 0.5).unwrap();
        let bb = d.bounds(g).unwrap();
        assert_eq!(bb.min, Point::new(-0.5, -0.5));
        assert_eq!(bb.max, Point::new(4.5, 3.5));
        d.stretch(g, 0.0).unwrap();
        assert_eq!(d.bounds(g).unwrap(), BBox::from_origin(Point::ORIGIN, Size::new(4.0, 3.0)));
    }

    #[test]
    fn stretch_single_axis() {
        let mut d = diagram();
        let g = d.rectangle(Point::ORIGIN, Size::new(1.0, 1.0)).unwrap();
        let a = d.rectangle(Point::new(2.0, 5.0), Size::new(3.0, 3.0)).unwrap();
        d.add_child(g, a).unwrap();
        d.stretch_horizontal(g, 1.0).unwrap();
        let bb = d.bounds(g).unwrap();
        assert_eq!((bb.min.x, bb.max.x), (1.0, 6.0));
        assert_eq!((bb.min.y, bb.max.y), (0.0, 1.0));
        d.stretch_vertical(g, 0.0).unwrap();
        let bb = d.bounds(g).unwrap();
        assert_eq!((bb.min.y, bb.max.y), (5.0, 8.0));
    }

    #[test]
    fn stretch_without_children_is_a_no_op() {
        let mut d = diagram();
        let r = d.rectangle(Point::new(1.0, 1.0), Size::new(2.0, 2.0)).unwrap();
        d.stretch(r, 1.0).unwrap();
        assert_eq!(d.bounds(r).unwrap(), BBox::from_origin(Point::new(1.0, 1.0), Size::new(2.0, 2.0)));
    }

    #[test]
    fn resize_recenters_children() {
        let mut d = diagram();
        let outer = d.rectangle(Point::ORIGIN, Size::new(2.0, 2.0)).unwrap();
        let inner = unit(&mut d, 0.5, 0.5);
        d.add_child(outer, inner).unwrap();
        d.resize(outer, 4.0, 6.0).unwrap();
        assert_eq!(d.bounds(outer).unwrap(), BBox::from_origin(Point::ORIGIN, Size::new(4.0, 6.0)));
        assert_eq!(d.anchor(inner, Anchor::Center).unwrap(), Point::new(2.0, 3.0));
    }

    #[test]
    fn resize_carries_connections_along() {
        let mut d = diagram();
        let outer = d.rectangle(Point::ORIGIN, Size::new(4.0, 4.0)).unwrap();
        let wire = d.connection(vec![Point::new(1.0, 1.0), Point::new(3.0, 3.0)]).unwrap();
        d.add_child(outer, wire).unwrap();
        d.resize(outer, 6.0, 8.0).unwrap();
        assert_eq!(
            *d.shape(wire).unwrap(),
            ShapeEnum::Connection(Connection::new(vec![Point::new(2.0, 3.0), Point::new(4.0, 5.0)]))
        );
        assert_eq!(d.bounds(outer).unwrap().center(), d.bounds(wire).unwrap().center());
    }

    #[test]
    fn resize_text_line_is_unsupported() {
        let mut d = diagram();
        let text = d.text_line("abc", FontSize::Normal, Point::ORIGIN).unwrap();
        let err = d.resize(text, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedOperation { kind: "text line", .. }));
    }

    #[test]
    fn decorate_appends_in_order() {
        let mut d = diagram();
        let r = unit(&mut d, 0.0, 0.0);
        d.decorate(r, StyleAttr::Dashed).unwrap();
        d.decorate(r, StyleAttr::ArrowEnd).unwrap();
        assert_eq!(d.node(r).unwrap().style().to_string(), "[dashed arrow-end]");
    }
}
