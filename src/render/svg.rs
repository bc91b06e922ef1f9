//! SVG generation
//!
//! Diagram coordinates are y-up; SVG is y-down. The backend flips y while
//! converting to pixels and computes the view box from everything it was
//! given once the caller asks for the document.

use svg::Document;
use svg::node::element::{Definitions, Ellipse as SvgEllipse, Marker, Path as SvgPath, Text as SvgText};

use super::{Backend, PathSegment, TextRun};
use crate::defaults;
use crate::style::{Style, StyleAttr};
use crate::types::{BBox, NumericError, Offset, Point, positive};

/// Converts diagram units to SVG pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    px_per_unit: f64,
}

impl Default for Scaler {
    fn default() -> Self {
        Scaler {
            px_per_unit: defaults::PX_PER_UNIT,
        }
    }
}

impl Scaler {
    /// Create a Scaler with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(px_per_unit: f64) -> Result<Self, NumericError> {
        Ok(Scaler {
            px_per_unit: positive(px_per_unit)?,
        })
    }

    /// Convert a length to pixels.
    #[inline]
    pub fn px(&self, len: f64) -> f64 {
        len * self.px_per_unit
    }

    /// Convert a point to pixel coordinates, flipping y.
    pub fn point(&self, p: Point) -> (f64, f64) {
        (self.px(p.x), -self.px(p.y))
    }
}

/// Format a pixel value with at most two decimals and no trailing zeros.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

const ARROW_MARKER_ID: &str = "arrowhead";

/// Backend that accumulates SVG elements
pub struct SvgBackend {
    scaler: Scaler,
    elements: Vec<Box<dyn svg::Node>>,
    /// Extent of everything drawn so far, in diagram units
    bounds: BBox,
    uses_arrows: bool,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self::new(Scaler::default())
    }
}

impl SvgBackend {
    pub fn new(scaler: Scaler) -> Self {
        Self {
            scaler,
            elements: Vec::new(),
            bounds: BBox::new(),
            uses_arrows: false,
        }
    }

    /// Build the document. The view box covers everything drawn plus a
    /// stroke-width margin.
    pub fn finish(self) -> Document {
        let margin = self.scaler.px(defaults::STROKE_WIDTH * 2.0);
        let (x, y, w, h) = if self.bounds.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let (min_x, _) = self.scaler.point(self.bounds.min);
            let (_, min_y) = self.scaler.point(self.bounds.max);
            (
                min_x - margin,
                min_y - margin,
                self.scaler.px(self.bounds.width()) + 2.0 * margin,
                self.scaler.px(self.bounds.height()) + 2.0 * margin,
            )
        };
        crate::log::debug!(x, y, w, h, elements = self.elements.len(), "svg view box");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("{} {} {} {}", fmt_num(x), fmt_num(y), fmt_num(w), fmt_num(h)),
            )
            .set("width", fmt_num(w))
            .set("height", fmt_num(h));
        if self.uses_arrows {
            doc = doc.add(arrow_definitions());
        }
        for element in self.elements {
            doc = doc.add(element);
        }
        doc
    }

    fn path_data(&self, path: &[PathSegment]) -> String {
        let mut d = String::new();
        for seg in path {
            if !d.is_empty() {
                d.push(' ');
            }
            match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                    let cmd = if matches!(seg, PathSegment::MoveTo(_)) { 'M' } else { 'L' };
                    let (x, y) = self.scaler.point(p);
                    d.push_str(&format!("{cmd}{},{}", fmt_num(x), fmt_num(y)));
                }
                PathSegment::Close => d.push('Z'),
                PathSegment::Ellipse { .. } => {}
            }
        }
        d
    }

    /// Presentation attributes for a stroked element.
    fn stroke_attributes(&mut self, style: &Style) -> Vec<(String, String)> {
        let mut fill = "none".to_string();
        let mut stroke = "black".to_string();
        let mut width = self.scaler.px(defaults::STROKE_WIDTH);
        let mut dash = None;
        let mut extra = Vec::new();
        for attr in style.attrs() {
            match attr {
                StyleAttr::Stroke(c) => stroke = c.to_string(),
                StyleAttr::Fill(c) => fill = c.to_string(),
                StyleAttr::StrokeWidth(w) => width = self.scaler.px(*w),
                StyleAttr::Dashed => dash = Some((4.0, 4.0)),
                StyleAttr::Dotted => dash = Some((1.0, 2.0)),
                StyleAttr::ArrowEnd => {
                    self.uses_arrows = true;
                    extra.push(("marker-end".to_string(), format!("url(#{ARROW_MARKER_ID})")));
                }
                StyleAttr::ArrowStart => {
                    self.uses_arrows = true;
                    extra.push(("marker-start".to_string(), format!("url(#{ARROW_MARKER_ID})")));
                }
                StyleAttr::Raw(k, v) => extra.push((k.clone(), v.clone())),
            }
        }
        let mut attrs = vec![
            ("fill".to_string(), fill),
            ("stroke".to_string(), stroke),
            ("stroke-width".to_string(), fmt_num(width)),
        ];
        if let Some((on, off)) = dash {
            attrs.push((
                "stroke-dasharray".to_string(),
                format!("{},{}", fmt_num(width * on), fmt_num(width * off)),
            ));
        }
        attrs.extend(extra);
        attrs
    }
}

fn arrow_definitions() -> Definitions {
    let head = SvgPath::new().set("d", "M0,0 L10,5 L0,10 Z").set("fill", "context-stroke");
    let marker = Marker::new()
        .set("id", ARROW_MARKER_ID)
        .set("viewBox", "0 0 10 10")
        .set("refX", "10")
        .set("refY", "5")
        .set("markerWidth", "6")
        .set("markerHeight", "6")
        .set("orient", "auto-start-reverse")
        .add(head);
    Definitions::new().add(marker)
}

impl Backend for SvgBackend {
    fn stroke(&mut self, path: &[PathSegment], style: &Style) {
        for seg in path {
            match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => self.bounds.expand_point(p),
                PathSegment::Ellipse { center, rx, ry } => {
                    self.bounds.expand_point(Point::new(center.x - rx, center.y - ry));
                    self.bounds.expand_point(Point::new(center.x + rx, center.y + ry));
                    let (cx, cy) = self.scaler.point(center);
                    let ellipse = SvgEllipse::new()
                        .set("cx", fmt_num(cx))
                        .set("cy", fmt_num(cy))
                        .set("rx", fmt_num(self.scaler.px(rx)))
                        .set("ry", fmt_num(self.scaler.px(ry)));
                    let ellipse = self
                        .stroke_attributes(style)
                        .into_iter()
                        .fold(ellipse, |e, (k, v)| e.set(k, v));
                    self.elements.push(Box::new(ellipse));
                }
                PathSegment::Close => {}
            }
        }

        let data = self.path_data(path);
        if data.is_empty() {
            return;
        }
        let element = self
            .stroke_attributes(style)
            .into_iter()
            .fold(SvgPath::new().set("d", data), |e, (k, v)| e.set(k, v));
        self.elements.push(Box::new(element));
    }

    fn text(&mut self, run: &TextRun<'_>, style: &Style) {
        // The glyphs sit on the left of the baseline, seen along it.
        let along = run.end - run.start;
        let len = along.dx.hypot(along.dy);
        let up = if len > 0.0 {
            Offset::new(-along.dy / len, along.dx / len) * run.height
        } else {
            Offset::new(0.0, run.height)
        };
        for p in [run.start, run.end, run.start + up, run.end + up] {
            self.bounds.expand_point(p);
        }
        let (x, y) = self.scaler.point(run.start);
        let (ex, ey) = self.scaler.point(run.end);
        let angle = (ey - y).atan2(ex - x).to_degrees();
        let font_size = self.scaler.px(run.height);

        let mut text = SvgText::new(run.text)
            .set("x", fmt_num(x))
            .set("y", fmt_num(y))
            .set("font-size", fmt_num(font_size))
            .set("dominant-baseline", "alphabetic");
        if angle.abs() > 1e-9 {
            text = text.set("transform", format!("rotate({} {} {})", fmt_num(angle), fmt_num(x), fmt_num(y)));
        }
        for attr in style.attrs() {
            match attr {
                StyleAttr::Fill(c) | StyleAttr::Stroke(c) => text = text.set("fill", c.to_string()),
                StyleAttr::Raw(k, v) => text = text.set(k.as_str(), v.as_str()),
                _ => {}
            }
        }
        self.elements.push(Box::new(text));
    }
}
