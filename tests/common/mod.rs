//! Shared helpers for the integration tests.

#![allow(dead_code)]

use anchorage::{FontSize, Size, TextMetrics};
use tracing_subscriber::EnvFilter;

/// Route debug logs to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fixed-pitch metrics with a constant overhead per line: `len * ratio + pad`
/// wide and `ratio` tall.
pub struct Padded {
    pub pad: f64,
}

impl TextMetrics for Padded {
    fn measure(&self, text: &str, size: FontSize) -> Size {
        let r = size.ratio();
        Size::new(text.chars().count() as f64 * r + self.pad, r)
    }
}
