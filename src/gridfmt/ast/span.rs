//! Byte spans and line/column positions for source code locations
//!
//! Nodes are identified by the byte range they occupy in the original
//! source. Spans are small, copyable and hashable, which lets later stages
//! key per-node state off a span without writing into the tree itself.

use serde::Serialize;
use std::fmt;

/// A half-open byte range `start..end` into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn from_range(range: &std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if a byte offset falls inside this span
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check if another span is fully contained in this span
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A human-readable position (zero-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_offset() {
        let span = Span::new(3, 8);

        assert!(span.contains_offset(3));
        assert!(span.contains_offset(7));
        assert!(!span.contains_offset(8));
        assert!(!span.contains_offset(2));
    }

    #[test]
    fn test_span_contains_span() {
        let outer = Span::new(0, 10);

        assert!(outer.contains(Span::new(0, 10)));
        assert!(outer.contains(Span::new(2, 5)));
        assert!(!outer.contains(Span::new(2, 11)));
        assert!(!outer.contains(Span::new(10, 12)));
    }

    #[test]
    fn test_span_len() {
        assert_eq!(Span::new(2, 7).len(), 5);
        assert_eq!(Span::new(4, 4).len(), 0);
        assert!(Span::new(4, 4).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(1, 4).to_string(), "1..4");
        assert_eq!(Position::new(2, 9).to_string(), "2:9");
    }
}
