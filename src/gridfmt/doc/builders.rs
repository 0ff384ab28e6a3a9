//! The layout document type and its constructor functions
//!
//! Printers build trees of `Doc` values with these helpers and hand them to
//! the serializer in [`super::printer`]. Construction never looks at widths;
//! all fitting decisions happen at serialization time.

use serde::Serialize;

/// How a line placeholder renders in flat and broken layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineMode {
    /// A space when flat, a newline when broken
    Space,
    /// Nothing when flat, a newline when broken
    Soft,
    /// Always a newline
    Hard,
    /// Always a newline, and the next line starts at column zero instead of
    /// the current indentation
    Literal,
}

/// A layout document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Doc {
    /// Verbatim text without newlines
    Text(String),
    /// A sequence of documents
    Concat(Vec<Doc>),
    /// A region that renders flat if it fits in the remaining width and
    /// broken otherwise. `expanded_states` (when non-empty) are alternative
    /// layouts tried in order; the last is the broken fallback.
    Group {
        contents: Box<Doc>,
        should_break: bool,
        expanded_states: Vec<Doc>,
    },
    /// Alternating content and separator parts; separators break one at a
    /// time, keeping as much content per line as fits
    Fill(Vec<Doc>),
    /// Content chosen by the enclosing group's layout
    IfBreak {
        break_contents: Box<Doc>,
        flat_contents: Box<Doc>,
    },
    /// Contents indented one level past the current indentation
    Indent(Box<Doc>),
    /// Contents indented a fixed number of extra columns
    Align(usize, Box<Doc>),
    /// A line placeholder
    Line(LineMode),
    /// Contents deferred to just before the next line break
    LineSuffix(Box<Doc>),
    /// Forces every enclosing group to break
    BreakParent,
    /// A named wrapper, transparent to layout
    Label(String, Box<Doc>),
    /// Records the output position it is serialized at
    Cursor,
}

impl Doc {
    /// An empty document
    pub fn nil() -> Doc {
        Doc::Concat(Vec::new())
    }

    /// Whether this document is empty text or an empty sequence
    pub fn is_nil(&self) -> bool {
        match self {
            Doc::Text(text) => text.is_empty(),
            Doc::Concat(items) => items.is_empty(),
            _ => false,
        }
    }
}

pub fn text(text: impl Into<String>) -> Doc {
    Doc::Text(text.into())
}

/// Concatenate documents, flattening nested sequences and dropping empties
pub fn concat(items: Vec<Doc>) -> Doc {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Doc::Concat(inner) => flat.extend(inner),
            other if other.is_nil() => {}
            other => flat.push(other),
        }
    }
    if flat.len() == 1 {
        flat.into_iter().next().unwrap_or_else(Doc::nil)
    } else {
        Doc::Concat(flat)
    }
}

pub fn group(contents: Doc) -> Doc {
    Doc::Group {
        contents: Box::new(contents),
        should_break: false,
        expanded_states: Vec::new(),
    }
}

/// A group with explicit alternative layouts, tried in order until one
/// fits; the last is used broken if none fit
pub fn conditional_group(states: Vec<Doc>) -> Doc {
    let contents = states.first().cloned().unwrap_or_else(Doc::nil);
    Doc::Group {
        contents: Box::new(contents),
        should_break: false,
        expanded_states: states,
    }
}

pub fn fill(parts: Vec<Doc>) -> Doc {
    Doc::Fill(parts)
}

pub fn if_break(break_contents: Doc, flat_contents: Doc) -> Doc {
    Doc::IfBreak {
        break_contents: Box::new(break_contents),
        flat_contents: Box::new(flat_contents),
    }
}

pub fn indent(contents: Doc) -> Doc {
    Doc::Indent(Box::new(contents))
}

pub fn align(columns: usize, contents: Doc) -> Doc {
    Doc::Align(columns, Box::new(contents))
}

pub fn line() -> Doc {
    Doc::Line(LineMode::Space)
}

pub fn softline() -> Doc {
    Doc::Line(LineMode::Soft)
}

/// A line break that always renders, forcing enclosing groups to break
pub fn hardline() -> Doc {
    Doc::Concat(vec![Doc::Line(LineMode::Hard), Doc::BreakParent])
}

/// A hard break after which output restarts at column zero; used for
/// multi-line literals whose inner indentation must not be touched
pub fn literal_line() -> Doc {
    Doc::Concat(vec![Doc::Line(LineMode::Literal), Doc::BreakParent])
}

pub fn line_suffix(contents: Doc) -> Doc {
    Doc::LineSuffix(Box::new(contents))
}

pub fn break_parent() -> Doc {
    Doc::BreakParent
}

pub fn label(name: impl Into<String>, contents: Doc) -> Doc {
    Doc::Label(name.into(), Box::new(contents))
}

pub fn cursor() -> Doc {
    Doc::Cursor
}

/// Interleave a separator between documents
pub fn join(separator: Doc, items: Vec<Doc>) -> Doc {
    let mut parts = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        parts.push(item);
    }
    concat(parts)
}
