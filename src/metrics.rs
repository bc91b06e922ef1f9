//! Font sizes and text measurement.
//!
//! Text is only ever set at one of the sizes on the [`FontSize`] ladder. The
//! engine asks a [`TextMetrics`] provider how large a string is at a size and
//! treats the answer as opaque; [`CharWidthMetrics`] is the built-in provider.

use std::fmt;

use crate::defaults;
use crate::types::Size;

/// The supported text sizes, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontSize {
    Tiny,
    Script,
    Footnote,
    Small,
    Normal,
    Large,
    Larger,
    Largest,
    Huge,
    Huger,
}

impl FontSize {
    /// Every size, ordered by increasing ratio.
    pub const LADDER: [FontSize; 10] = [
        FontSize::Tiny,
        FontSize::Script,
        FontSize::Footnote,
        FontSize::Small,
        FontSize::Normal,
        FontSize::Large,
        FontSize::Larger,
        FontSize::Largest,
        FontSize::Huge,
        FontSize::Huger,
    ];

    /// Size relative to `Normal`.
    pub fn ratio(self) -> f64 {
        match self {
            FontSize::Tiny => 0.5,
            FontSize::Script => 0.7,
            FontSize::Footnote => 0.8,
            FontSize::Small => 0.9,
            FontSize::Normal => 1.0,
            FontSize::Large => 1.2,
            FontSize::Larger => 1.44,
            FontSize::Largest => 1.728,
            FontSize::Huge => 2.074,
            FontSize::Huger => 2.488,
        }
    }

    /// Position on the ladder.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn smallest() -> Self {
        FontSize::LADDER[0]
    }

    pub fn largest() -> Self {
        FontSize::LADDER[FontSize::LADDER.len() - 1]
    }

    /// Ladder entries strictly larger than this one, nearest first.
    pub fn larger_sizes(self) -> impl Iterator<Item = FontSize> {
        (self.index() + 1..FontSize::LADDER.len()).map(|i| FontSize::LADDER[i])
    }

    /// Ladder entries strictly smaller than this one, nearest first.
    pub fn smaller_sizes(self) -> impl Iterator<Item = FontSize> {
        (0..self.index()).rev().map(|i| FontSize::LADDER[i])
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FontSize::Tiny => "tiny",
            FontSize::Script => "script",
            FontSize::Footnote => "footnote",
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
            FontSize::Larger => "larger",
            FontSize::Largest => "largest",
            FontSize::Huge => "huge",
            FontSize::Huger => "huger",
        };
        f.write_str(s)
    }
}

/// Measures rendered text.
///
/// Implementations must be deterministic for a given `(text, size)` pair.
pub trait TextMetrics {
    /// Width and height of `text` rendered at `size`.
    fn measure(&self, text: &str, size: FontSize) -> Size;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, size: FontSize) -> Size {
        (**self).measure(text, size)
    }
}

/// Proportional glyph advances for printable ASCII, in hundredths of the
/// average character width.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Sum of proportional advances; characters outside printable ASCII count
/// as one average character.
pub fn proportional_text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                100
            }
        })
        .sum()
}

/// Estimates text size from a per-glyph advance table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharWidthMetrics {
    /// Average advance of one character at `Normal` size
    pub char_width: f64,
    /// Line height at `Normal` size
    pub char_height: f64,
}

impl Default for CharWidthMetrics {
    fn default() -> Self {
        Self {
            char_width: defaults::CHAR_WIDTH,
            char_height: defaults::CHAR_HEIGHT,
        }
    }
}

impl TextMetrics for CharWidthMetrics {
    fn measure(&self, text: &str, size: FontSize) -> Size {
        let scale = size.ratio();
        let width = proportional_text_length(text) as f64 * self.char_width * 0.01 * scale;
        Size::new(width, self.char_height * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_is_sorted_by_ratio() {
        for pair in FontSize::LADDER.windows(2) {
            assert!(pair[0].ratio() < pair[1].ratio());
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(FontSize::Normal.ratio(), 1.0);
        assert_eq!(FontSize::smallest(), FontSize::Tiny);
        assert_eq!(FontSize::largest(), FontSize::Huger);
    }

    #[test]
    fn neighbours_are_nearest_first() {
        let up: Vec<_> = FontSize::Largest.larger_sizes().collect();
        assert_eq!(up, [FontSize::Huge, FontSize::Huger]);
        let down: Vec<_> = FontSize::Footnote.smaller_sizes().collect();
        assert_eq!(down, [FontSize::Script, FontSize::Tiny]);
        assert_eq!(FontSize::Huger.larger_sizes().count(), 0);
        assert_eq!(FontSize::Tiny.smaller_sizes().count(), 0);
    }

    #[test]
    fn proportional_length_uses_glyph_table() {
        // 'A' = 102, 'i' = 47, 'W' = 150
        assert_eq!(proportional_text_length("A"), 102);
        assert_eq!(proportional_text_length("iW"), 197);
        assert_eq!(proportional_text_length("é"), 100);
    }

    #[test]
    fn char_width_metrics_scale_with_ratio() {
        let m = CharWidthMetrics::default();
        let normal = m.measure("Hello", FontSize::Normal);
        let huge = m.measure("Hello", FontSize::Huger);
        assert!((huge.w - normal.w * 2.488).abs() < 1e-12);
        assert!((huge.h - normal.h * 2.488).abs() < 1e-12);
        assert!((normal.h - 0.14).abs() < 1e-12);
    }
}
