//! Drawing: the backend contract and the tree traversal that feeds it.
//!
//! The layout engine never paints. [`Diagram::draw`] walks a subtree parents
//! first and hands each node's payload to a [`Backend`]; every call carries
//! absolute coordinates and its own style, so a backend needs no state about
//! the tree.

pub mod svg;

use std::fmt;

use crate::defaults;
use crate::diagram::{Diagram, NodeId};
use crate::errors::Result;
use crate::metrics::{FontSize, TextMetrics};
use crate::shapes::Shape;
use crate::style::{Style, StyleAttr};
use crate::types::{Direction, Point};

/// One piece of a path, in absolute diagram coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Close the current subpath back to its first point
    Close,
    /// A full axis-aligned ellipse
    Ellipse { center: Point, rx: f64, ry: f64 },
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::MoveTo(p) => write!(f, "M{p}"),
            PathSegment::LineTo(p) => write!(f, "L{p}"),
            PathSegment::Close => f.write_str("Z"),
            PathSegment::Ellipse { center, rx, ry } => write!(f, "E{center} {rx}x{ry}"),
        }
    }
}

/// A string set along a baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub size: FontSize,
    /// Baseline start
    pub start: Point,
    /// Baseline end
    pub end: Point,
    /// Line height, measured perpendicular to the baseline
    pub height: f64,
    /// Reading direction
    pub direction: Direction,
}

/// Something that can paint or serialize drawing calls
pub trait Backend {
    /// Stroke (and, if the style says so, fill) a path.
    fn stroke(&mut self, path: &[PathSegment], style: &Style);

    /// Set text along a baseline.
    fn text(&mut self, run: &TextRun<'_>, style: &Style);
}

/// A recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke {
        path: Vec<PathSegment>,
        style: Style,
    },
    Text {
        text: String,
        size: FontSize,
        start: Point,
        end: Point,
        height: f64,
        direction: Direction,
        style: Style,
    },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Stroke { path, style } => {
                f.write_str("stroke")?;
                for seg in path {
                    write!(f, " {seg}")?;
                }
                write!(f, " {style}")
            }
            DrawCommand::Text {
                text,
                size,
                start,
                end,
                direction,
                style,
                ..
            } => write!(f, "text {text:?} {size} {direction} {start}->{end} {style}"),
        }
    }
}

/// Backend that just records what it was asked to draw
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Backend for DisplayList {
    fn stroke(&mut self, path: &[PathSegment], style: &Style) {
        self.commands.push(DrawCommand::Stroke {
            path: path.to_vec(),
            style: style.clone(),
        });
    }

    fn text(&mut self, run: &TextRun<'_>, style: &Style) {
        self.commands.push(DrawCommand::Text {
            text: run.text.to_string(),
            size: run.size,
            start: run.start,
            end: run.end,
            height: run.height,
            direction: run.direction,
            style: style.clone(),
        });
    }
}

impl fmt::Display for DisplayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            writeln!(f, "{cmd}")?;
        }
        Ok(())
    }
}

impl<M: TextMetrics> Diagram<M> {
    /// Emit `root` and everything under it, parents before children.
    ///
    /// Nodes with their border turned off still draw text but no outline.
    /// Debug nodes also get a dashed bounding box and an origin marker.
    pub fn draw(&self, root: NodeId, backend: &mut dyn Backend) -> Result<()> {
        let nodes = self.subtree(root)?;
        crate::log::debug!(root = root.0, nodes = nodes.len(), "draw");
        for id in nodes {
            let node = &self.nodes[id.0];
            if node.border || node.shape.as_text_line().is_some() {
                node.shape.draw(&node.style, backend);
            }
            if node.debug {
                draw_debug_outline(node.shape.bounds(), backend);
            }
        }
        Ok(())
    }

    /// Draw every root in creation order.
    pub fn draw_all(&self, backend: &mut dyn Backend) -> Result<()> {
        for root in self.roots() {
            self.draw(root, backend)?;
        }
        Ok(())
    }
}

fn draw_debug_outline(bounds: crate::types::BBox, backend: &mut dyn Backend) {
    let style = Style::new().with(StyleAttr::Dashed);
    let outline = [
        PathSegment::MoveTo(bounds.min),
        PathSegment::LineTo(Point::new(bounds.min.x, bounds.max.y)),
        PathSegment::LineTo(bounds.max),
        PathSegment::LineTo(Point::new(bounds.max.x, bounds.min.y)),
        PathSegment::Close,
    ];
    backend.stroke(&outline, &style);
    let marker = [PathSegment::Ellipse {
        center: bounds.origin(),
        rx: defaults::DEBUG_MARKER_RADIUS,
        ry: defaults::DEBUG_MARKER_RADIUS,
    }];
    backend.stroke(&marker, &Style::new());
}
