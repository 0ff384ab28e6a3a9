//! Comments collected out of band by the lexer
//!
//! Comments never enter the token stream or the syntax tree. The lexer
//! collects them into a flat list and the printer re-attaches them to
//! statements and expression items by position.

use super::span::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommentKind {
    /// A `//` comment running to the end of the line
    Line,
    /// A `/* ... */` comment
    Block,
}

/// A single source comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub kind: CommentKind,
    /// Comment text without the `//` or `/* */` delimiters
    pub text: String,
    /// Byte span including the delimiters
    pub span: Span,
}

impl Comment {
    pub fn new(kind: CommentKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Whitespace-delimited tokens of the comment text
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Re-render the comment exactly as it appeared in the source
    pub fn source_text(&self) -> String {
        match self.kind {
            CommentKind::Line => format!("//{}", self.text),
            CommentKind::Block => format!("/*{}*/", self.text),
        }
    }
}
