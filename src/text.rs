//! Text blocks and discrete size fitting.
//!
//! A text block owns a stack of [`TextLine`] nodes. Lines are stacked top to
//! bottom with a spacing derived from the tallest line, and the block hugs
//! them with the same spacing as margin. Text cannot be scaled point-wise:
//! scaling a block picks another size from the [`FontSize`] ladder and lays
//! the block out again from scratch.

use crate::anchor::Anchor;
use crate::defaults;
use crate::diagram::{Diagram, NodeId};
use crate::errors::{LayoutError, Result};
use crate::layout::top_to_bottom;
use crate::metrics::{FontSize, TextMetrics};
use crate::shapes::{Outline, Shape, ShapeEnum, TextBlock, TextLine};
use crate::types::{Align, BBox, Direction, Point, Size, finite};

/// Slack when comparing ladder ratios against a requested ratio
const RATIO_TOLERANCE: f64 = 1e-9;

/// A validated, not yet applied, change of text size for one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TextRescale {
    block: NodeId,
    size: FontSize,
    /// Where the block's south-west corner ends up
    origin: Point,
}

impl<M: TextMetrics> Diagram<M> {
    /// Stack `lines` into a block whose south-west corner is at `origin`.
    ///
    /// `alignment` is the stacking alignment and must be `Left`, `Center` or
    /// `Right`.
    pub fn text_block<I, S>(&mut self, lines: I, size: FontSize, alignment: Align, origin: Point) -> Result<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return Err(LayoutError::invalid_operation(
                "create text block",
                "a text block needs at least one line",
            ));
        }
        if !matches!(alignment, Align::Left | Align::Center | Align::Right) {
            return Err(LayoutError::InvalidAlignment {
                alignment,
                direction: Direction::Down,
            });
        }
        let origin = Point::new(finite(origin.x)?, finite(origin.y)?);

        let block = self.add_shape(TextBlock {
            lines: lines.clone(),
            size,
            alignment,
            spacing: 0.0,
            outline: Outline::Frame(BBox::from_origin(origin, Size::default())),
        });
        for text in lines {
            let line = self.text_line(text, size, Point::ORIGIN)?;
            self.attach(block, line);
        }
        self.layout_text_block(block, origin)?;
        Ok(block)
    }

    /// The line of `block` that reads `text`, if any.
    pub fn line(&self, block: NodeId, text: &str) -> Option<NodeId> {
        self.children(block).iter().copied().find(|c| {
            self.nodes[c.0]
                .shape
                .as_text_line()
                .is_some_and(|line| line.text == text)
        })
    }

    /// A bordered rectangle holding a text block.
    ///
    /// The rectangle is at least `min_size` and at least as large as the
    /// text. `alignment` places the text: `Center`/`Middle` in the middle,
    /// `Left`/`Right` against the west/east edge, `Top`/`Bottom` against the
    /// north/south edge. Left and right placement also stack the lines flush
    /// to that side. Returns the rectangle; the block is its only child.
    pub fn text_box<I, S>(&mut self, lines: I, size: FontSize, alignment: Align, min_size: Size) -> Result<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let min_size = Size::try_new(min_size.w, min_size.h)?;
        let stacking = match alignment {
            Align::Left => Align::Left,
            Align::Right => Align::Right,
            _ => Align::Center,
        };
        let text = self.text_block(lines, size, stacking, Point::ORIGIN)?;
        let inner = self.bounds(text)?.size();
        let frame = self.rectangle(
            Point::ORIGIN,
            Size::new(min_size.w.max(inner.w), min_size.h.max(inner.h)),
        )?;
        self.add_child(frame, text)?;

        let anchor = match alignment {
            Align::Center | Align::Middle => Anchor::Center,
            Align::Left => Anchor::West,
            Align::Right => Anchor::East,
            Align::Top => Anchor::North,
            Align::Bottom => Anchor::South,
        };
        let target = self.anchor(frame, anchor)?;
        self.move_anchor_to(text, anchor, target)?;
        Ok(frame)
    }

    /// Stack the block's lines and fit the block around them, then move the
    /// whole block so its south-west corner is at `origin`.
    fn layout_text_block(&mut self, block: NodeId, origin: Point) -> Result<()> {
        let node = self.node(block)?;
        let Some(text) = node.shape.as_text_block() else {
            return Err(LayoutError::invalid_operation(
                "lay out text",
                format!("node {block} is not a text block"),
            ));
        };
        let alignment = text.alignment;
        let lines = node.children.clone();
        let Some((&first, rest)) = lines.split_first() else {
            return Ok(());
        };

        let tallest = lines
            .iter()
            .map(|l| self.nodes[l.0].shape.bounds().height())
            .fold(0.0, f64::max);
        let spacing = defaults::line_spacing(tallest);

        self.move_anchor_to(first, Anchor::NorthWest, origin)?;
        top_to_bottom(self, first, alignment, spacing, rest)?;
        self.stretch(block, spacing)?;
        self.move_anchor_to(block, Anchor::SouthWest, origin)?;
        if let ShapeEnum::TextBlock(text) = &mut self.node_mut(block)?.shape {
            text.spacing = spacing;
        }
        crate::log::debug!(node = block.0, lines = lines.len(), spacing, "text block laid out");
        Ok(())
    }

    /// Work out the size `block` takes when its subtree is scaled by
    /// `factor` about `pivot`, without changing anything.
    pub(crate) fn plan_text_rescale(&self, block: NodeId, pivot: Point, factor: f64) -> Result<Option<TextRescale>> {
        let node = self.node(block)?;
        let Some(text) = node.shape.as_text_block() else {
            return Ok(None);
        };
        let upright = matches!(text.outline, Outline::Frame(_))
            && node.children.iter().all(|c| {
                self.nodes[c.0]
                    .shape
                    .as_text_line()
                    .is_some_and(TextLine::is_upright)
            });
        if !upright {
            return Err(LayoutError::UnsupportedOperation {
                operation: "scaling",
                kind: "turned text block",
            });
        }

        let bounds = text.outline.bounds();
        let size = self.fit_text_size(text, factor, bounds.width())?;
        for line in &text.lines {
            let measured = self.metrics.measure(line, size);
            Size::try_new(measured.w, measured.h)?;
        }
        let sw = bounds.origin();
        let origin = pivot + (sw - pivot) * factor;
        Ok(Some(TextRescale { block, size, origin }))
    }

    /// Pick the ladder size for `text` scaled by `factor`.
    ///
    /// Only sizes on the `factor` side of the current one whose ratio does
    /// not overshoot the requested ratio are candidates. They are tried
    /// from the one closest to the requested ratio back towards the current
    /// size, and the first whose longest line fits within `factor` times the
    /// current block width wins.
    fn fit_text_size(&self, text: &TextBlock, factor: f64, block_width: f64) -> Result<FontSize> {
        let current = text.size;
        let target_ratio = current.ratio() * factor;
        let largest = FontSize::largest();
        if target_ratio > largest.ratio() * (1.0 + RATIO_TOLERANCE) {
            return Err(LayoutError::scaling(
                factor,
                format!("{current} text would need a size above {largest}"),
            ));
        }

        let (longest, _) = text
            .lines
            .iter()
            .map(|l| (l.as_str(), self.metrics.measure(l, current).w))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| LayoutError::scaling(factor, "the block has no lines"))?;
        let target_width = factor * block_width;

        let mut candidates: Vec<FontSize> = if factor > 1.0 {
            current.larger_sizes().collect()
        } else {
            current.smaller_sizes().collect()
        };
        candidates.retain(|s| s.ratio() <= target_ratio * (1.0 + RATIO_TOLERANCE));
        candidates.sort_by(|a, b| b.cmp(a));

        for size in candidates {
            let width = self.metrics.measure(longest, size).w;
            crate::log::trace!(%size, width, target_width, "text size candidate");
            if width <= target_width {
                return Ok(size);
            }
        }
        Err(LayoutError::scaling(
            factor,
            format!("no size between {current} and the requested ratio {target_ratio:.3} fits `{longest}` within {target_width:.3}"),
        ))
    }

    /// Rebuild the block's lines at the planned size and lay it out again.
    pub(crate) fn apply_text_rescale(&mut self, plan: TextRescale) -> Result<()> {
        let lines = self.node(plan.block)?.children.clone();
        for line in lines {
            let node = &mut self.nodes[line.0];
            let rebuilt = match &node.shape {
                ShapeEnum::TextLine(t) => {
                    let measured = self.metrics.measure(&t.text, plan.size);
                    let extent = Size::try_new(measured.w, measured.h)?;
                    Some(TextLine::new(t.text.clone(), plan.size, Point::ORIGIN, extent))
                }
                _ => None,
            };
            if let Some(rebuilt) = rebuilt {
                node.shape = rebuilt.into();
            }
        }
        if let ShapeEnum::TextBlock(text) = &mut self.node_mut(plan.block)?.shape {
            crate::log::debug!(node = plan.block.0, from = %text.size, to = %plan.size, "text re-set");
            text.size = plan.size;
        }
        self.layout_text_block(plan.block, plan.origin)
    }
}
