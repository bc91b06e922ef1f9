//! Composites assembled from the primitives: borderless labels, labeled
//! arrows and a coordinate frame with ticks.
//!
//! Each composite is an ordinary subtree. The handles returned here only
//! name its parts; moving or scaling the frame node moves everything.

use crate::anchor::Anchor;
use crate::defaults;
use crate::diagram::{Diagram, NodeId};
use crate::errors::Result;
use crate::metrics::{FontSize, TextMetrics};
use crate::style::{Color, StyleAttr};
use crate::types::{Align, Offset, Point, Size, finite, positive};

/// A horizontal arrow with a line of text above it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledArrow {
    /// Borderless box hugging the arrow and the label
    pub frame: NodeId,
    pub arrow: NodeId,
    pub label: NodeId,
}

impl LabeledArrow {
    pub fn set_color<M: TextMetrics>(&self, diagram: &mut Diagram<M>, color: Color) -> Result<()> {
        diagram.decorate(self.arrow, StyleAttr::Stroke(color))
    }
}

/// Two arrowed axes meeting at the south-west corner of a borderless frame.
///
/// Logical coordinate `(0, 0)` sits [`AXIS_INSET`](defaults::AXIS_INSET)
/// inside the corner and every unit is `spacing` long. Placement follows the
/// frame wherever it has been moved or scaled to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateFrame {
    pub frame: NodeId,
    pub x_axis: NodeId,
    pub y_axis: NodeId,
    pub x_label: NodeId,
    pub y_label: NodeId,
    x_ticks: u32,
    spacing: f64,
}

impl CoordinateFrame {
    fn nominal_width(&self) -> f64 {
        self.spacing * self.x_ticks as f64 + 2.0 * defaults::AXIS_INSET
    }

    /// Diagram position of the logical coordinate `(x, y)`.
    pub fn point<M: TextMetrics>(&self, diagram: &Diagram<M>, x: f64, y: f64) -> Result<Point> {
        let (x, y) = (finite(x)?, finite(y)?);
        let bb = diagram.bounds(self.frame)?;
        let s = bb.width() / self.nominal_width();
        let inset = defaults::AXIS_INSET;
        Ok(bb.origin() + Offset::new(inset + self.spacing * x, inset + self.spacing * y) * s)
    }

    /// Hang `tick` below the x axis at logical `x` and attach it to the frame.
    pub fn add_x_tick<M: TextMetrics>(&self, diagram: &mut Diagram<M>, tick: NodeId, x: f64) -> Result<()> {
        let at = self.point(diagram, x, 0.0)?;
        let axis_y = diagram.anchor(self.x_axis, Anchor::South)?.y;
        diagram.move_anchor_to(tick, Anchor::North, Point::new(at.x, axis_y))?;
        diagram.add_child(self.frame, tick)
    }

    /// Put `tick` left of the y axis at logical `y` and attach it to the frame.
    pub fn add_y_tick<M: TextMetrics>(&self, diagram: &mut Diagram<M>, tick: NodeId, y: f64) -> Result<()> {
        let at = self.point(diagram, 0.0, y)?;
        let axis_x = diagram.anchor(self.y_axis, Anchor::West)?.x;
        diagram.move_anchor_to(tick, Anchor::East, Point::new(axis_x, at.y))?;
        diagram.add_child(self.frame, tick)
    }

    /// Center `node` on logical `(x, y)` and attach it to the frame.
    pub fn add_object<M: TextMetrics>(&self, diagram: &mut Diagram<M>, node: NodeId, x: f64, y: f64) -> Result<()> {
        let at = self.point(diagram, x, y)?;
        diagram.move_anchor_to(node, Anchor::Center, at)?;
        diagram.add_child(self.frame, node)
    }
}

impl<M: TextMetrics> Diagram<M> {
    /// A single centered line of text in a borderless box.
    pub fn label(&mut self, text: impl Into<String>, size: FontSize) -> Result<NodeId> {
        let boxed = self.text_box([text.into()], size, Align::Center, Size::default())?;
        self.set_border(boxed, false)?;
        Ok(boxed)
    }

    /// An arrow exactly as wide as `label`, with the label set above it.
    pub fn labeled_arrow(&mut self, label: impl Into<String>) -> Result<LabeledArrow> {
        let frame = self.group();
        let text = self.text_line(label, FontSize::Normal, Point::ORIGIN)?;
        let width = self.bounds(text)?.width();
        let arrow = self.connection(vec![Point::ORIGIN, Point::new(width, 0.0)])?;
        self.decorate(arrow, StyleAttr::ArrowEnd)?;

        let above = self.anchor(arrow, Anchor::North)? + Offset::new(0.0, defaults::ARROW_LABEL_GAP);
        self.move_anchor_to(text, Anchor::South, above)?;
        self.add_child(frame, arrow)?;
        self.add_child(frame, text)?;
        self.stretch(frame, defaults::ARROW_MARGIN)?;
        Ok(LabeledArrow {
            frame,
            arrow,
            label: text,
        })
    }

    /// A frame with room for `x_ticks` by `y_ticks` units of `spacing`, its
    /// axes labeled `x_name` and `y_name`.
    pub fn coordinate_frame(
        &mut self,
        x_ticks: u32,
        y_ticks: u32,
        x_name: impl Into<String>,
        y_name: impl Into<String>,
        spacing: f64,
    ) -> Result<CoordinateFrame> {
        let spacing = positive(spacing)?;
        let inset = 2.0 * defaults::AXIS_INSET;
        let size = Size::new(spacing * x_ticks as f64 + inset, spacing * y_ticks as f64 + inset);
        let frame = self.rectangle(Point::ORIGIN, size)?;
        self.set_border(frame, false)?;

        let corner = self.anchor(frame, Anchor::SouthWest)?;
        let (east, north) = (self.anchor(frame, Anchor::SouthEast)?, self.anchor(frame, Anchor::NorthWest)?);
        let x_axis = self.connection(vec![corner, east])?;
        let y_axis = self.connection(vec![corner, north])?;
        for axis in [x_axis, y_axis] {
            self.decorate(axis, StyleAttr::ArrowEnd)?;
            self.add_child(frame, axis)?;
        }

        let x_label = self.label(x_name, FontSize::Large)?;
        let y_label = self.label(y_name, FontSize::Large)?;
        let x_end = self.anchor(x_axis, Anchor::East)?;
        let y_end = self.anchor(y_axis, Anchor::North)?;
        self.move_anchor_to(x_label, Anchor::West, x_end)?;
        self.move_anchor_to(y_label, Anchor::South, y_end)?;
        self.add_child(frame, x_label)?;
        self.add_child(frame, y_label)?;

        crate::log::debug!(node = frame.0, x_ticks, y_ticks, spacing, "coordinate frame");
        Ok(CoordinateFrame {
            frame,
            x_axis,
            y_axis,
            x_label,
            y_label,
            x_ticks,
            spacing,
        })
    }
}
