//! Marker-driven table formatting
//!
//! Array-of-array literals, and calls whose arguments are all array
//! literals, annotated with a `// prettier-table` line comment on the line
//! directly above, render as fixed-width grids: one row per line with every
//! column padded to the widest cell it holds. Detection runs once over the
//! parsed tree before printing; rendering intercepts the printer chain for
//! marked nodes and forwards everything else untouched.

pub mod detect;
pub mod render;

pub use detect::{detect_tables, TableMarks, TABLE_MARKER};
pub use render::TablePrinter;

use crate::gridfmt::extension::{Extension, TreeRepresentation};
use crate::gridfmt::options::FormatOptions;
use crate::gridfmt::printer::interface::{NodePrinter, ParsedSource};

/// Installs table detection and rendering into the format pipeline
#[derive(Debug, Default)]
pub struct TableExtension;

impl Extension for TableExtension {
    fn name(&self) -> &'static str {
        "table"
    }

    fn printer(
        &self,
        representation: TreeRepresentation,
        parsed: &ParsedSource<'_>,
        _options: &FormatOptions,
    ) -> Option<Box<dyn NodePrinter>> {
        match representation {
            TreeRepresentation::Ast => Some(Box::new(TablePrinter::new(detect_tables(parsed)))),
        }
    }
}
