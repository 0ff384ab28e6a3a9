//! Table qualification
//!
//! One pass over the parsed tree, strictly before printing: every array
//! literal and call expression is checked against the qualification rule and
//! qualifying spans are recorded in a side table. The printer reads marks
//! per node without re-deriving them, so it never needs the comment list.

use crate::gridfmt::ast::visit::for_each_expr;
use crate::gridfmt::ast::{CommentKind, Expr, Span};
use crate::gridfmt::printer::interface::ParsedSource;
use std::collections::HashSet;

/// Marker token opting a literal into table formatting
pub const TABLE_MARKER: &str = "prettier-table";

/// Spans of nodes that qualified as tables, scoped to one parsed tree
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableMarks {
    spans: HashSet<Span>,
}

impl TableMarks {
    pub fn contains(&self, span: Span) -> bool {
        self.spans.contains(&span)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn mark(&mut self, span: Span) {
        self.spans.insert(span);
    }
}

/// Mark every qualifying array and call node.
///
/// A node qualifies when it has more than one item, every item is itself an
/// array literal (holes and non-arrays disqualify), and a marker comment
/// sits on the line directly above it. Nested candidates are evaluated
/// independently.
pub fn detect_tables(parsed: &ParsedSource<'_>) -> TableMarks {
    let mut marks = TableMarks::default();
    for_each_expr(parsed.program, &mut |expr| {
        let qualifies = match expr {
            Expr::Array(array) => {
                let items: Vec<Option<&Expr>> =
                    array.elements.iter().map(Option::as_ref).collect();
                qualifies_as_table(expr.span(), &items, parsed)
            }
            Expr::Call(call) => {
                let items: Vec<Option<&Expr>> = call.arguments.iter().map(Some).collect();
                qualifies_as_table(expr.span(), &items, parsed)
            }
            _ => false,
        };
        if qualifies {
            marks.mark(expr.span());
        }
    });
    marks
}

fn qualifies_as_table(span: Span, items: &[Option<&Expr>], parsed: &ParsedSource<'_>) -> bool {
    if items.len() < 2 {
        return false;
    }
    if !items
        .iter()
        .all(|item| matches!(item, Some(Expr::Array(_))))
    {
        return false;
    }
    has_marker_comment(span, parsed)
}

/// A single-line line comment ending exactly one line above the node, whose
/// whitespace-delimited tokens include [`TABLE_MARKER`]
fn has_marker_comment(span: Span, parsed: &ParsedSource<'_>) -> bool {
    let node_line = parsed.locations.line_of(span.start);
    if node_line == 0 {
        return false;
    }
    parsed.comments.iter().any(|comment| {
        comment.kind == CommentKind::Line
            && parsed.locations.is_single_line(comment.span)
            && parsed.locations.line_of(comment.span.end) == node_line - 1
            && comment.words().any(|word| word == TABLE_MARKER)
    })
}
