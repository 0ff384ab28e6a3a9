//! Source location utilities for converting byte offsets to line/column positions
//!
//! Table detection and comment placement both reason about which line a node
//! or comment starts on; this module provides the fast offset-to-line lookup
//! backing those checks, and line/column positions for error reporting.

use super::span::{Position, Span};

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    /// Create a new SourceLocation from source code
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line, column)
    }

    /// The line a byte offset falls on
    pub fn line_of(&self, byte_offset: usize) -> usize {
        self.byte_to_position(byte_offset).line
    }

    /// Whether a span starts and ends on a single line
    pub fn is_single_line(&self, span: Span) -> bool {
        self.line_of(span.start) == self.line_of(span.end)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of a line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
