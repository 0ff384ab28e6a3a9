//! Grid rendering for marked nodes
//!
//! Each row of a marked node is an array literal; its elements become cells.
//! A cell's document is flattened (soft breaks removed, literal breaks
//! kept), serialized at unbounded width, and padded on the right to its
//! column's maximum width. Rows may be ragged; a column's width is the
//! maximum over the rows that reach it. Unmarked nodes pass through to the
//! rest of the printer chain untouched.

use super::detect::TableMarks;
use crate::gridfmt::ast::{ArrayLit, CallExpr, Expr};
use crate::gridfmt::doc::builders::{concat, hardline, indent, join, text};
use crate::gridfmt::doc::{print_doc, Doc, LineMode, PrintedDoc, UNBOUNDED_WIDTH};
use crate::gridfmt::printer::default::print_call_prefix;
use crate::gridfmt::printer::interface::{NodePrinter, PrintContext, PrintError};

/// Printer-chain entry that renders marked nodes as grids and forwards
/// everything else
#[derive(Debug)]
pub struct TablePrinter {
    marks: TableMarks,
}

impl TablePrinter {
    pub fn new(marks: TableMarks) -> Self {
        Self { marks }
    }
}

impl NodePrinter for TablePrinter {
    fn name(&self) -> &'static str {
        "table"
    }

    fn print(&self, expr: &Expr, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
        match expr {
            Expr::Array(array) if self.marks.contains(array.span) => print_array_table(array, ctx),
            Expr::Call(call) if self.marks.contains(call.span) => print_call_table(call, ctx),
            _ => ctx.delegate(expr).map_err(|err| match err {
                PrintError::MissingDelegate => PrintError::MissingDelegate,
                other => PrintError::Delegated {
                    operation: "print".to_string(),
                    source: Box::new(other),
                },
            }),
        }
    }
}

fn print_array_table(array: &ArrayLit, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    let mut rows = Vec::with_capacity(array.elements.len());
    for element in array.elements.iter().flatten() {
        if let Expr::Array(row) = element {
            rows.push(format_row(row, ctx)?);
        }
    }
    let widths = column_widths(&rows);
    let lines: Vec<Doc> = rows.iter().map(|row| render_row(row, &widths)).collect();

    // a trailing hole forces the comma even when the policy says none
    let trailing = if matches!(array.elements.last(), Some(None))
        || ctx.options().trailing_comma.in_arrays()
    {
        text(",")
    } else {
        Doc::nil()
    };

    Ok(concat(vec![
        text("["),
        indent(concat(vec![
            hardline(),
            join(concat(vec![text(","), hardline()]), lines),
            trailing,
        ])),
        hardline(),
        text("]"),
    ]))
}

fn print_call_table(call: &CallExpr, ctx: &PrintContext<'_>) -> Result<Doc, PrintError> {
    let prefix = print_call_prefix(call, ctx)?;
    let mut rows = Vec::with_capacity(call.arguments.len());
    for argument in &call.arguments {
        if let Expr::Array(row) = argument {
            rows.push(format_row(row, ctx)?);
        }
    }
    let widths = column_widths(&rows);
    let lines: Vec<Doc> = rows.iter().map(|row| render_row(row, &widths)).collect();

    let trailing = if ctx.options().trailing_comma.in_call_arguments() {
        text(",")
    } else {
        Doc::nil()
    };

    Ok(concat(vec![
        prefix,
        text("("),
        indent(concat(vec![
            hardline(),
            join(concat(vec![text(","), hardline()]), lines),
            trailing,
        ])),
        hardline(),
        text(")"),
    ]))
}

/// Print and flatten one row's cells. A cell whose document flattens away
/// entirely is dropped from the row; a cell that serializes to empty text
/// (an elision hole) keeps its slot.
fn format_row(row: &ArrayLit, ctx: &PrintContext<'_>) -> Result<Vec<PrintedDoc>, PrintError> {
    let mut cells = Vec::with_capacity(row.elements.len());
    for element in &row.elements {
        let doc = match element {
            Some(expr) => ctx.print_child(expr)?,
            None => Doc::nil(),
        };
        let Some(flat) = flatten(doc) else {
            continue;
        };
        cells.push(print_doc(flat, ctx.options(), UNBOUNDED_WIDTH));
    }
    Ok(cells)
}

/// Per-column maximum cell width. Rows contribute only to the columns they
/// reach.
fn column_widths(rows: &[Vec<PrintedDoc>]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.formatted.chars().count();
            if i == widths.len() {
                widths.push(len);
            } else if len > widths[i] {
                widths[i] = len;
            }
        }
    }
    widths
}

/// One row: `[` + comma-and-space-joined padded cells + `]`, always a
/// single physical line
fn render_row(cells: &[PrintedDoc], widths: &[usize]) -> Doc {
    // TODO: re-emit cursor markers recorded in the cells at their padded offsets
    let padded: Vec<Doc> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let width = widths.get(i).copied().unwrap_or(0);
            text(pad_cell(&cell.formatted, width))
        })
        .collect();
    concat(vec![text("["), join(text(", "), padded), text("]")])
}

fn pad_cell(formatted: &str, width: usize) -> String {
    let mut cell = formatted.to_string();
    for _ in formatted.chars().count()..width {
        cell.push(' ');
    }
    cell
}

/// Strip breakable structure from a cell document: soft and hard line
/// directives vanish, literal line breaks stay, groups are pinned to their
/// flat state. `None` means the document flattened away entirely. Kinds the
/// transform doesn't recognize pass through unchanged.
pub(crate) fn flatten(doc: Doc) -> Option<Doc> {
    match doc {
        Doc::Text(_) => Some(doc),
        Doc::Concat(items) => Some(Doc::Concat(
            items.into_iter().filter_map(flatten).collect(),
        )),
        Doc::Group {
            contents,
            expanded_states,
            ..
        } => {
            let contents = flatten(*contents)?;
            let expanded_states = expanded_states.into_iter().filter_map(flatten).collect();
            Some(Doc::Group {
                contents: Box::new(contents),
                should_break: false,
                expanded_states,
            })
        }
        Doc::Fill(parts) => {
            let parts: Vec<Doc> = parts.into_iter().filter_map(flatten).collect();
            if parts.is_empty() {
                None
            } else {
                Some(Doc::Fill(parts))
            }
        }
        Doc::IfBreak { flat_contents, .. } => flatten(*flat_contents),
        Doc::Indent(contents) => Some(Doc::Indent(Box::new(flatten(*contents)?))),
        Doc::Align(columns, contents) => Some(Doc::Align(columns, Box::new(flatten(*contents)?))),
        Doc::Label(name, contents) => Some(Doc::Label(name, Box::new(flatten(*contents)?))),
        Doc::LineSuffix(contents) => Some(Doc::LineSuffix(Box::new(flatten(*contents)?))),
        Doc::BreakParent => None,
        Doc::Line(LineMode::Literal) => Some(doc),
        Doc::Line(_) => None,
        other => Some(other),
    }
}
