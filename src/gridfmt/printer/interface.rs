//! The printer chain boundary
//!
//! A [`NodePrinter`] either produces the document for a node or hands the
//! node to the next chain entry via [`PrintContext::delegate`]. Because the
//! chain terminates in the engine's default printer, an interception layer
//! that delegates everything is a pure overlay: output is byte-identical to
//! the engine's own. Comment placement and feature flags travel through the
//! same chain so interceptors preserve them without reimplementing them.

use crate::gridfmt::ast::{Comment, Expr, Program, SourceLocation};
use crate::gridfmt::doc::Doc;
use crate::gridfmt::options::FormatOptions;
use crate::gridfmt::printer::comments::{self, CommentAssignments, CommentSlot};
use std::fmt;

/// Borrowed view of one parsed source file
#[derive(Clone, Copy)]
pub struct ParsedSource<'a> {
    pub source: &'a str,
    pub program: &'a Program,
    pub comments: &'a [Comment],
    pub locations: &'a SourceLocation,
}

/// Engine-level flags a printer declares about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrinterFeatures {
    /// The printing pass must not mutate the tree; per-node state lives in
    /// side tables keyed by span
    pub avoid_tree_mutation: bool,
}

/// A printer's answer when asked to place a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentVerdict {
    /// The printer placed the comment in the given slot
    Attached(CommentSlot),
    /// No opinion; the next chain entry (or the built-in placement) decides
    NotSupported,
}

/// One entry in the printer chain
pub trait NodePrinter: Send + Sync {
    /// Name used when reporting delegation failures
    fn name(&self) -> &'static str;

    /// Produce the layout document for one expression, or call
    /// [`PrintContext::delegate`] to pass it on
    fn print(&self, expr: &Expr, ctx: &PrintContext<'_>) -> Result<Doc, PrintError>;

    /// Place a comment that sits alone on its line
    fn comment_on_own_line(
        &self,
        _comment: &Comment,
        _parsed: &ParsedSource<'_>,
        _options: &FormatOptions,
    ) -> CommentVerdict {
        CommentVerdict::NotSupported
    }

    /// Place a comment with code before it and nothing after on its line
    fn comment_at_end_of_line(
        &self,
        _comment: &Comment,
        _parsed: &ParsedSource<'_>,
        _options: &FormatOptions,
    ) -> CommentVerdict {
        CommentVerdict::NotSupported
    }

    /// Place a comment with code on both sides of it
    fn comment_remaining(
        &self,
        _comment: &Comment,
        _parsed: &ParsedSource<'_>,
        _options: &FormatOptions,
    ) -> CommentVerdict {
        CommentVerdict::NotSupported
    }

    /// Feature flags this printer declares; `None` defers to the rest of
    /// the chain
    fn features(&self) -> Option<PrinterFeatures> {
        None
    }
}

/// Everything a printer needs while rendering one tree
#[derive(Clone, Copy)]
pub struct PrintContext<'a> {
    chain: &'a [Box<dyn NodePrinter>],
    depth: usize,
    parsed: ParsedSource<'a>,
    assignments: &'a CommentAssignments,
    options: &'a FormatOptions,
}

impl<'a> PrintContext<'a> {
    pub fn new(
        chain: &'a [Box<dyn NodePrinter>],
        parsed: ParsedSource<'a>,
        assignments: &'a CommentAssignments,
        options: &'a FormatOptions,
    ) -> Self {
        Self {
            chain,
            depth: 0,
            parsed,
            assignments,
            options,
        }
    }

    pub fn options(&self) -> &'a FormatOptions {
        self.options
    }

    pub fn parsed(&self) -> ParsedSource<'a> {
        self.parsed
    }

    pub fn assignments(&self) -> &'a CommentAssignments {
        self.assignments
    }

    /// Print a child expression through the full chain, wrapping it with
    /// the comments assigned to it
    pub fn print_child(&self, expr: &Expr) -> Result<Doc, PrintError> {
        let head = self.chain.first().ok_or(PrintError::MissingDelegate)?;
        let ctx = PrintContext { depth: 0, ..*self };
        let doc = head.print(expr, &ctx)?;
        Ok(comments::attach_expr_comments(doc, expr.span(), &ctx))
    }

    /// Forward the current node to the next printer in the chain
    pub fn delegate(&self, expr: &Expr) -> Result<Doc, PrintError> {
        let next = self
            .chain
            .get(self.depth + 1)
            .ok_or(PrintError::MissingDelegate)?;
        let ctx = PrintContext {
            depth: self.depth + 1,
            ..*self
        };
        next.print(expr, &ctx)
    }

    /// Feature flags for this run: the first declaration in the chain wins
    pub fn features(&self) -> PrinterFeatures {
        self.chain
            .iter()
            .find_map(|printer| printer.features())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum PrintError {
    /// The chain ran out before any printer handled the node. The chain
    /// must terminate in the engine's default printer (or a configured
    /// replacement for it).
    MissingDelegate,
    /// A forwarded call into the rest of the chain failed; names the
    /// operation that was being delegated
    Delegated {
        operation: String,
        source: Box<PrintError>,
    },
    /// A printer-specific failure
    Printer(String),
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::MissingDelegate => write!(
                f,
                "no delegate printer available: the printer chain must terminate \
                 in the engine's default printer"
            ),
            PrintError::Delegated { operation, source } => {
                write!(f, "delegated printer call {:?} failed: {}", operation, source)
            }
            PrintError::Printer(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for PrintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrintError::Delegated { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_delegate_names_the_integration_step() {
        let message = PrintError::MissingDelegate.to_string();
        assert!(message.contains("default printer"));
    }

    #[test]
    fn test_delegated_error_preserves_the_cause() {
        let err = PrintError::Delegated {
            operation: "print".to_string(),
            source: Box::new(PrintError::Printer("boom".to_string())),
        };
        assert!(err.to_string().contains("print"));
        assert!(err.to_string().contains("boom"));

        let cause = std::error::Error::source(&err).map(|cause| cause.to_string());
        assert_eq!(cause.as_deref(), Some("boom"));
    }

    #[test]
    fn test_default_features_leave_mutation_allowed() {
        assert!(!PrinterFeatures::default().avoid_tree_mutation);
    }
}
