//! The engine's default printer
//!
//! Terminal entry of every printer chain: renders each node kind with the
//! stock width-aware layout. Arrays and call arguments print as groups that
//! collapse onto one line when they fit; arrays of plain (optionally signed)
//! numbers use a fill so long data wraps like prose instead of one element
//! per line.

use crate::gridfmt::ast::{
    ArrayLit, CallExpr, CommentKind, Expr, MemberExpr, Program, SourceLocation, Span, Stmt,
    TemplateLit, UnaryExpr,
};
use crate::gridfmt::doc::builders::{
    break_parent, concat, fill, group, hardline, if_break, indent, join, line, line_suffix,
    literal_line, softline, text,
};
use crate::gridfmt::doc::Doc;
use crate::gridfmt::printer::comments::CommentStyle;
use crate::gridfmt::printer::interface::{
    NodePrinter, PrintContext, PrintError, PrinterFeatures,
};

/// The stock node printer
#[derive(Debug, Default)]
pub struct DefaultPrinter;

impl NodePrinter for DefaultPrinter {
    fn name(&self) -> &'static str {
        "default"
    }

    fn print(&self, expr: &Expr, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
        match expr {
            Expr::Array(array) => print_array(array, ctx),
            Expr::Call(call) => print_call(call, ctx),
            Expr::Member(member) => print_member(member, ctx),
            Expr::Unary(unary) => print_unary(unary, ctx),
            Expr::Ident(ident) => Ok(text(ident.name.clone())),
            Expr::Number(number) => Ok(text(number.raw.clone())),
            Expr::Str(string) => Ok(text(string.raw.clone())),
            Expr::Template(template) => Ok(print_template(template)),
        }
    }

    fn features(&self) -> Option<PrinterFeatures> {
        Some(PrinterFeatures {
            avoid_tree_mutation: true,
        })
    }
}

/// Print a whole program: statements separated by line breaks, with at most
/// one blank line preserved between regions, plus all statement-level
/// comments
pub fn print_program(program: &Program, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    let assignments = ctx.assignments();
    let locations = ctx.parsed().locations;

    if program.body.is_empty() {
        let dangling = assignments.program_dangling();
        let mut parts = Vec::new();
        for (i, (comment, _style)) in dangling.iter().enumerate() {
            if i > 0 {
                parts.push(hardline());
                if has_blank_between(locations, dangling[i - 1].0.span.end, comment.span.start) {
                    parts.push(hardline());
                }
            }
            parts.push(text(comment.source_text()));
        }
        return Ok(concat(parts));
    }

    let mut parts = Vec::new();
    for (i, stmt) in program.body.iter().enumerate() {
        let leading = assignments.leading_stmt(i);

        if i > 0 {
            parts.push(hardline());
            let prev_end = assignments
                .trailing_stmt(i - 1)
                .last()
                .map(|(comment, _)| comment.span.end)
                .unwrap_or(program.body[i - 1].span().end);
            let next_start = leading
                .first()
                .map(|(comment, _)| comment.span.start)
                .unwrap_or(stmt.span().start);
            if has_blank_between(locations, prev_end, next_start) {
                parts.push(hardline());
            }
        }

        for (j, (comment, _style)) in leading.iter().enumerate() {
            parts.push(text(comment.source_text()));
            parts.push(hardline());
            let next_start = leading
                .get(j + 1)
                .map(|(comment, _)| comment.span.start)
                .unwrap_or(stmt.span().start);
            if has_blank_between(locations, comment.span.end, next_start) {
                parts.push(hardline());
            }
        }

        parts.push(print_stmt(stmt, ctx)?);

        for (comment, style) in assignments.trailing_stmt(i) {
            match (comment.kind, style) {
                (_, CommentStyle::OwnLine) => {
                    parts.push(hardline());
                    if has_blank_between(locations, stmt.span().end, comment.span.start) {
                        parts.push(hardline());
                    }
                    parts.push(text(comment.source_text()));
                }
                (CommentKind::Line, _) => {
                    parts.push(line_suffix(concat(vec![
                        text(" "),
                        text(comment.source_text()),
                    ])));
                    parts.push(break_parent());
                }
                (CommentKind::Block, _) => {
                    parts.push(text(" "));
                    parts.push(text(comment.source_text()));
                }
            }
        }
    }
    Ok(concat(parts))
}

fn print_stmt(stmt: &Stmt, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    match stmt {
        Stmt::Expr(expr_stmt) => ctx.print_child(&expr_stmt.expr),
        Stmt::VarDecl(decl) => Ok(concat(vec![
            text(decl.kind.as_str()),
            text(" "),
            text(decl.name.name.clone()),
            text(" = "),
            ctx.print_child(&decl.init)?,
        ])),
    }
}

fn has_blank_between(locations: &SourceLocation, end: usize, start: usize) -> bool {
    locations.line_of(start) >= locations.line_of(end) + 2
}

fn print_array(array: &ArrayLit, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    if array.elements.is_empty() {
        return Ok(print_empty_container("[", "]", array.span, ctx));
    }

    let mut items = Vec::with_capacity(array.elements.len());
    for element in &array.elements {
        match element {
            Some(expr) => items.push(ctx.print_child(expr)?),
            None => items.push(Doc::nil()),
        }
    }

    // a trailing hole forces the comma even when the policy says none
    let trailing = if matches!(array.elements.last(), Some(None)) {
        text(",")
    } else if ctx.options().trailing_comma.in_arrays() {
        if_break(text(","), Doc::nil())
    } else {
        Doc::nil()
    };

    let inner = if is_concisely_printed(array) {
        let mut parts = Vec::with_capacity(items.len() * 2);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                parts.push(concat(vec![text(","), line()]));
            }
            parts.push(item);
        }
        fill(parts)
    } else {
        join(concat(vec![text(","), line()]), items)
    };

    Ok(group(concat(vec![
        text("["),
        indent(concat(vec![softline(), inner, trailing])),
        softline(),
        text("]"),
    ])))
}

/// Arrays of plain or sign-prefixed numbers wrap like prose instead of
/// breaking one element per line
fn is_concisely_printed(array: &ArrayLit) -> bool {
    array.elements.len() > 1
        && array.elements.iter().all(|element| match element {
            Some(Expr::Number(_)) => true,
            Some(Expr::Unary(unary)) => matches!(unary.operand.as_ref(), Expr::Number(_)),
            _ => false,
        })
}

fn print_call(call: &CallExpr, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    let prefix = print_call_prefix(call, ctx)?;
    if call.arguments.is_empty() {
        return Ok(concat(vec![
            prefix,
            print_empty_container("(", ")", call.span, ctx),
        ]));
    }

    let mut items = Vec::with_capacity(call.arguments.len());
    for argument in &call.arguments {
        items.push(ctx.print_child(argument)?);
    }

    let trailing = if ctx.options().trailing_comma.in_call_arguments() {
        if_break(text(","), Doc::nil())
    } else {
        Doc::nil()
    };

    Ok(concat(vec![
        prefix,
        group(concat(vec![
            text("("),
            indent(concat(vec![
                softline(),
                join(concat(vec![text(","), line()]), items),
                trailing,
            ])),
            softline(),
            text(")"),
        ])),
    ]))
}

/// The callee, optional-call token and explicit type arguments of a call.
/// Shared with table rendering, which replaces only the argument list.
pub(crate) fn print_call_prefix(
    call: &CallExpr,
    ctx: &PrintContext<'_>,
) -> Result<Doc, PrintError> {
    let mut parts = vec![ctx.print_child(&call.callee)?];
    if call.optional {
        parts.push(text("?."));
    }
    if !call.type_args.is_empty() {
        let args: Vec<Doc> = call
            .type_args
            .iter()
            .map(|arg| text(arg.text.clone()))
            .collect();
        parts.push(text("<"));
        parts.push(join(text(", "), args));
        parts.push(text(">"));
    }
    Ok(concat(parts))
}

fn print_empty_container(open: &str, close: &str, span: Span, ctx: &PrintContext<'_>) -> Doc {
    let dangling = ctx.assignments().dangling_expr(span);
    if dangling.is_empty() {
        return text(format!("{}{}", open, close));
    }

    let docs: Vec<Doc> = dangling
        .iter()
        .map(|(comment, _)| text(comment.source_text()))
        .collect();
    let any_line = dangling
        .iter()
        .any(|(comment, _)| comment.kind == CommentKind::Line);
    if any_line {
        concat(vec![
            text(open),
            indent(concat(vec![hardline(), join(hardline(), docs)])),
            hardline(),
            text(close),
        ])
    } else {
        concat(vec![text(open), join(text(" "), docs), text(close)])
    }
}

fn print_member(member: &MemberExpr, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    Ok(concat(vec![
        ctx.print_child(&member.object)?,
        text(if member.optional { "?." } else { "." }),
        text(member.property.name.clone()),
    ]))
}

fn print_unary(unary: &UnaryExpr, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    Ok(concat(vec![
        text(unary.op.as_str()),
        ctx.print_child(&unary.operand)?,
    ]))
}

/// Template literals keep their authored line structure: each newline in
/// the raw text becomes a literal line break that resets to column zero
fn print_template(template: &TemplateLit) -> Doc {
    let mut parts = Vec::new();
    for (i, segment) in template.raw.split('\n').enumerate() {
        if i > 0 {
            parts.push(literal_line());
        }
        parts.push(text(segment.to_string()));
    }
    concat(parts)
}
