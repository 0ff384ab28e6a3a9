//! Comment placement
//!
//! The lexer keeps comments out of the token stream, so before printing each
//! comment gets assigned a slot: leading or trailing a statement, leading or
//! trailing an expression item, dangling inside an empty container, or
//! dangling in an empty program. Chain printers are offered every comment
//! first (the interception contract forwards those hooks unchanged); the
//! built-in placement below handles whatever they decline.

use crate::gridfmt::ast::visit::walk_expr;
use crate::gridfmt::ast::{Comment, CommentKind, Expr, Span};
use crate::gridfmt::doc::builders::{break_parent, concat, hardline, line_suffix, text};
use crate::gridfmt::doc::Doc;
use crate::gridfmt::options::FormatOptions;
use crate::gridfmt::printer::interface::{CommentVerdict, NodePrinter, ParsedSource, PrintContext};

/// How a comment sits relative to code on its line(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Nothing but whitespace before it on its first line
    OwnLine,
    /// Code before it, nothing after it on its last line
    EndOfLine,
    /// Code on both sides
    Remaining,
}

/// Where a comment attaches in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSlot {
    /// Above the statement at this index
    LeadingStmt(usize),
    /// After the statement at this index
    TrailingStmt(usize),
    /// Before the expression item with this span
    LeadingExpr(Span),
    /// After the expression item with this span
    TrailingExpr(Span),
    /// Inside the empty container with this span
    DanglingExpr(Span),
    /// In a program with no statements at all
    ProgramDangling,
}

/// The comment-to-slot assignment for one parsed source
#[derive(Debug, Default)]
pub struct CommentAssignments {
    slots: Vec<(CommentSlot, CommentStyle, Comment)>,
}

impl CommentAssignments {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn leading_stmt(&self, index: usize) -> Vec<(&Comment, CommentStyle)> {
        self.select(CommentSlot::LeadingStmt(index))
    }

    pub fn trailing_stmt(&self, index: usize) -> Vec<(&Comment, CommentStyle)> {
        self.select(CommentSlot::TrailingStmt(index))
    }

    pub fn leading_expr(&self, span: Span) -> Vec<(&Comment, CommentStyle)> {
        self.select(CommentSlot::LeadingExpr(span))
    }

    pub fn trailing_expr(&self, span: Span) -> Vec<(&Comment, CommentStyle)> {
        self.select(CommentSlot::TrailingExpr(span))
    }

    pub fn dangling_expr(&self, span: Span) -> Vec<(&Comment, CommentStyle)> {
        self.select(CommentSlot::DanglingExpr(span))
    }

    pub fn program_dangling(&self) -> Vec<(&Comment, CommentStyle)> {
        self.select(CommentSlot::ProgramDangling)
    }

    fn select(&self, wanted: CommentSlot) -> Vec<(&Comment, CommentStyle)> {
        self.slots
            .iter()
            .filter(|(slot, _, _)| *slot == wanted)
            .map(|(_, style, comment)| (comment, *style))
            .collect()
    }
}

/// Assign every comment to a slot. Chain printers are consulted in order;
/// the built-in placement takes the comments nobody claims.
pub fn assign_comments(
    parsed: &ParsedSource<'_>,
    chain: &[Box<dyn NodePrinter>],
    options: &FormatOptions,
) -> CommentAssignments {
    let mut slots = Vec::with_capacity(parsed.comments.len());
    for comment in parsed.comments {
        let style = classify(comment, parsed);
        let claimed = chain.iter().find_map(|printer| {
            let verdict = match style {
                CommentStyle::OwnLine => printer.comment_on_own_line(comment, parsed, options),
                CommentStyle::EndOfLine => printer.comment_at_end_of_line(comment, parsed, options),
                CommentStyle::Remaining => printer.comment_remaining(comment, parsed, options),
            };
            match verdict {
                CommentVerdict::Attached(slot) => Some(slot),
                CommentVerdict::NotSupported => None,
            }
        });
        let slot = claimed.unwrap_or_else(|| builtin_place(comment, style, parsed));
        slots.push((slot, style, comment.clone()));
    }
    CommentAssignments { slots }
}

/// Classify a comment by the code around it on its own line(s)
pub fn classify(comment: &Comment, parsed: &ParsedSource<'_>) -> CommentStyle {
    let locations = parsed.locations;
    let start_line = locations.line_of(comment.span.start);
    let line_start = locations.line_start(start_line).unwrap_or(0);
    let before = &parsed.source[line_start..comment.span.start];
    if before.trim().is_empty() {
        return CommentStyle::OwnLine;
    }

    let end_line = locations.line_of(comment.span.end);
    let line_end = locations
        .line_start(end_line + 1)
        .map(|next| next - 1)
        .unwrap_or(parsed.source.len());
    let after = &parsed.source[comment.span.end..line_end];
    if after.trim().is_empty() {
        CommentStyle::EndOfLine
    } else {
        CommentStyle::Remaining
    }
}

fn builtin_place(comment: &Comment, style: CommentStyle, parsed: &ParsedSource<'_>) -> CommentSlot {
    let program = parsed.program;

    // inside a statement: attach within its expression
    for stmt in &program.body {
        if stmt.span().contains(comment.span) {
            return place_in_expr(stmt.expr(), comment);
        }
    }

    // same-line comments trail the statement they follow
    if matches!(style, CommentStyle::EndOfLine | CommentStyle::Remaining) {
        let preceding = program
            .body
            .iter()
            .enumerate()
            .rev()
            .find(|(_, stmt)| stmt.span().end <= comment.span.start);
        if let Some((index, _)) = preceding {
            return CommentSlot::TrailingStmt(index);
        }
    }

    for (index, stmt) in program.body.iter().enumerate() {
        if comment.span.end <= stmt.span().start {
            return CommentSlot::LeadingStmt(index);
        }
    }

    match program.body.len() {
        0 => CommentSlot::ProgramDangling,
        len => CommentSlot::TrailingStmt(len - 1),
    }
}

fn place_in_expr(expr: &Expr, comment: &Comment) -> CommentSlot {
    match innermost_container(expr, comment.span) {
        Some(container) => {
            let items = container_items(container);
            if let Some(next) = items
                .iter()
                .find(|item| comment.span.end <= item.span().start)
            {
                CommentSlot::LeadingExpr(next.span())
            } else if let Some(prev) = items
                .iter()
                .rev()
                .find(|item| item.span().end <= comment.span.start)
            {
                CommentSlot::TrailingExpr(prev.span())
            } else {
                CommentSlot::DanglingExpr(container.span())
            }
        }
        None => {
            if comment.span.end <= expr.span().start {
                CommentSlot::LeadingExpr(expr.span())
            } else {
                CommentSlot::TrailingExpr(expr.span())
            }
        }
    }
}

/// The deepest array or call whose span contains the comment. Ancestors
/// precede descendants in pre-order, so the last hit is the innermost.
fn innermost_container<'a>(expr: &'a Expr, span: Span) -> Option<&'a Expr> {
    let mut found = None;
    walk_expr(expr, &mut |candidate| {
        let is_container = matches!(candidate, Expr::Array(_) | Expr::Call(_));
        if is_container && candidate.span().contains(span) {
            found = Some(candidate);
        }
    });
    found
}

fn container_items(container: &Expr) -> Vec<&Expr> {
    match container {
        Expr::Array(array) => array.elements.iter().flatten().collect(),
        Expr::Call(call) => call.arguments.iter().collect(),
        _ => Vec::new(),
    }
}

/// Wrap a printed expression with the comments assigned to its span
pub fn attach_expr_comments(doc: Doc, span: Span, ctx: &PrintContext<'_>) -> Doc {
    let assignments = ctx.assignments();
    let leading = assignments.leading_expr(span);
    let trailing = assignments.trailing_expr(span);
    if leading.is_empty() && trailing.is_empty() {
        return doc;
    }

    let mut parts = Vec::new();
    for (comment, _style) in leading {
        parts.push(text(comment.source_text()));
        match comment.kind {
            CommentKind::Line => parts.push(hardline()),
            CommentKind::Block => parts.push(text(" ")),
        }
    }
    parts.push(doc);
    for (comment, _style) in trailing {
        match comment.kind {
            CommentKind::Line => {
                parts.push(line_suffix(concat(vec![
                    text(" "),
                    text(comment.source_text()),
                ])));
                parts.push(break_parent());
            }
            CommentKind::Block => {
                parts.push(text(" "));
                parts.push(text(comment.source_text()));
            }
        }
    }
    concat(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridfmt::ast::SourceLocation;
    use crate::gridfmt::lexer::lex;
    use crate::gridfmt::parser::parse_program;

    fn assignments_for(source: &str) -> (CommentAssignments, Vec<Comment>) {
        let (tokens, comments) = lex(source).expect("lex");
        let program = parse_program(tokens, source).expect("parse");
        let locations = SourceLocation::new(source);
        let parsed = ParsedSource {
            source,
            program: &program,
            comments: &comments,
            locations: &locations,
        };
        let chain: Vec<Box<dyn NodePrinter>> = Vec::new();
        let placed = assign_comments(&parsed, &chain, &FormatOptions::default());
        (placed, comments)
    }

    #[test]
    fn test_own_line_comment_leads_the_next_statement() {
        let (placed, comments) = assignments_for("// note\n[1, 2]\n");
        assert_eq!(comments.len(), 1);
        let leading = placed.leading_stmt(0);
        assert_eq!(leading.len(), 1);
        assert_eq!(leading[0].1, CommentStyle::OwnLine);
        assert_eq!(leading[0].0.text, " note");
    }

    #[test]
    fn test_end_of_line_comment_trails_its_statement() {
        let (placed, _) = assignments_for("[1, 2] // trailing\n[3]\n");
        let trailing = placed.trailing_stmt(0);
        assert_eq!(trailing.len(), 1);
        assert_eq!(trailing[0].1, CommentStyle::EndOfLine);
        assert!(placed.leading_stmt(1).is_empty());
    }

    #[test]
    fn test_comment_after_last_statement_trails_it() {
        let (placed, _) = assignments_for("[1]\n// tail\n");
        let trailing = placed.trailing_stmt(0);
        assert_eq!(trailing.len(), 1);
        assert_eq!(trailing[0].1, CommentStyle::OwnLine);
    }

    #[test]
    fn test_comment_inside_array_leads_the_following_element() {
        let source = "[1, /* here */ 2]\n";
        let (placed, _) = assignments_for(source);
        // the element `2` sits at bytes 15..16
        let leading = placed.leading_expr(Span::new(15, 16));
        assert_eq!(leading.len(), 1);
        assert_eq!(leading[0].1, CommentStyle::Remaining);
    }

    #[test]
    fn test_comment_after_last_element_trails_it() {
        let source = "[1, 2 /* after */]\n";
        let (placed, _) = assignments_for(source);
        let trailing = placed.trailing_expr(Span::new(4, 5));
        assert_eq!(trailing.len(), 1);
    }

    #[test]
    fn test_comment_in_empty_array_dangles_on_the_container() {
        let source = "[/* inside */]\n";
        let (placed, _) = assignments_for(source);
        let dangling = placed.dangling_expr(Span::new(0, 14));
        assert_eq!(dangling.len(), 1);
    }

    #[test]
    fn test_comment_in_nested_array_attaches_to_the_inner_container() {
        let source = "[[/* inner */], [1]]\n";
        let (placed, _) = assignments_for(source);
        // inner empty array spans bytes 1..14
        assert_eq!(placed.dangling_expr(Span::new(1, 14)).len(), 1);
        assert!(placed.dangling_expr(Span::new(0, 20)).is_empty());
    }

    #[test]
    fn test_comment_only_program_dangles_at_program_level() {
        let (placed, _) = assignments_for("// lonely\n");
        assert_eq!(placed.program_dangling().len(), 1);
    }

    #[test]
    fn test_classify_styles() {
        let source = "[1] // end\n// own\n[2, /* mid */ 3]\n";
        let (placed, comments) = assignments_for(source);
        assert!(!placed.is_empty());
        let locations = SourceLocation::new(source);
        let (tokens, _) = lex(source).expect("lex");
        let program = parse_program(tokens, source).expect("parse");
        let parsed = ParsedSource {
            source,
            program: &program,
            comments: &comments,
            locations: &locations,
        };
        let styles: Vec<CommentStyle> = comments
            .iter()
            .map(|comment| classify(comment, &parsed))
            .collect();
        assert_eq!(
            styles,
            vec![
                CommentStyle::EndOfLine,
                CommentStyle::OwnLine,
                CommentStyle::Remaining
            ]
        );
    }
}
