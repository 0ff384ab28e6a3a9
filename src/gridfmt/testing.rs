//! Shared helpers for formatting tests
//!
//! Unit tests across the crate format through these instead of wiring the
//! pipeline up by hand, so a pipeline API change only touches this file.

use crate::gridfmt::options::FormatOptions;
use crate::gridfmt::pipeline::format_source;

/// Format with the standard pipeline and default options, panicking on any
/// pipeline error
pub fn fmt(source: &str) -> String {
    fmt_with(source, &FormatOptions::default())
}

pub fn fmt_with(source: &str, options: &FormatOptions) -> String {
    match format_source(source, options) {
        Ok(formatted) => formatted,
        Err(err) => panic!("formatting {:?} failed: {}", source, err),
    }
}

/// Assert that the formatter's output is one of its fixed points
pub fn assert_stable(source: &str) {
    let once = fmt(source);
    let twice = fmt(&once);
    assert_eq!(twice, once, "formatting is not idempotent for {:?}", source);
}
