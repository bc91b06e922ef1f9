//! Drawing attributes attached to primitives.
//!
//! The layout engine never interprets these; it hands them to the backend in
//! the order the caller appended them.

use std::fmt;

/// Simple color model; named colors are passed through untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{})", r, g, b, a),
        }
    }
}

/// One opaque drawing attribute
#[derive(Clone, Debug, PartialEq)]
pub enum StyleAttr {
    Stroke(Color),
    Fill(Color),
    StrokeWidth(f64),
    Dashed,
    Dotted,
    /// Arrowhead at the last point of an open path
    ArrowEnd,
    /// Arrowhead at the first point of an open path
    ArrowStart,
    /// Backend-specific attribute, forwarded as a key/value pair
    Raw(String, String),
}

impl fmt::Display for StyleAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleAttr::Stroke(c) => write!(f, "stroke={}", c),
            StyleAttr::Fill(c) => write!(f, "fill={}", c),
            StyleAttr::StrokeWidth(w) => write!(f, "stroke-width={}", w),
            StyleAttr::Dashed => f.write_str("dashed"),
            StyleAttr::Dotted => f.write_str("dotted"),
            StyleAttr::ArrowEnd => f.write_str("arrow-end"),
            StyleAttr::ArrowStart => f.write_str("arrow-start"),
            StyleAttr::Raw(k, v) => write!(f, "{}={}", k, v),
        }
    }
}

/// Ordered attribute list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style(Vec<StyleAttr>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attr: StyleAttr) {
        self.0.push(attr);
    }

    pub fn with(mut self, attr: StyleAttr) -> Self {
        self.0.push(attr);
        self
    }

    pub fn attrs(&self) -> &[StyleAttr] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<StyleAttr>> for Style {
    fn from(attrs: Vec<StyleAttr>) -> Self {
        Style(attrs)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", attr)?;
        }
        f.write_str("]")
    }
}
