//! Extension points for the format pipeline
//!
//! Extensions contribute two things: a source rewrite applied before lexing,
//! and a printer prepended to the printer chain for the tree representation
//! in use. Extension printers run in registration order ahead of the
//! terminal printer, which is the engine's [`DefaultPrinter`] unless a
//! [`PrinterProvider`] replaces it. A printer that delegates everything it
//! doesn't recognize therefore composes with both the engine and any other
//! registered extension.

use crate::gridfmt::options::FormatOptions;
use crate::gridfmt::printer::default::DefaultPrinter;
use crate::gridfmt::printer::interface::{NodePrinter, ParsedSource};

/// Tree representations a printer can target. The engine currently prints
/// from the syntax tree only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRepresentation {
    Ast,
}

/// A pluggable formatting extension
pub trait Extension: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rewrite the source before lexing; `None` leaves it unchanged
    fn rewrite_source(&self, _source: &str, _options: &FormatOptions) -> Option<String> {
        None
    }

    /// A printer to prepend to the chain for this representation, built
    /// fresh per parsed tree; `None` means the extension does not print
    fn printer(
        &self,
        representation: TreeRepresentation,
        parsed: &ParsedSource<'_>,
        options: &FormatOptions,
    ) -> Option<Box<dyn NodePrinter>>;
}

/// Supplies the terminal printer of the chain in place of the engine's own
pub trait PrinterProvider: Send + Sync {
    fn printer(
        &self,
        parsed: &ParsedSource<'_>,
        options: &FormatOptions,
    ) -> Box<dyn NodePrinter>;
}

/// Assemble the printer chain for one format run: extension printers in
/// registration order, then the terminal printer
pub fn resolve_printer_chain(
    extensions: &[Box<dyn Extension>],
    printer_override: Option<&dyn PrinterProvider>,
    representation: TreeRepresentation,
    parsed: &ParsedSource<'_>,
    options: &FormatOptions,
) -> Vec<Box<dyn NodePrinter>> {
    let mut chain: Vec<Box<dyn NodePrinter>> = Vec::new();
    for extension in extensions {
        if let Some(printer) = extension.printer(representation, parsed, options) {
            chain.push(printer);
        }
    }
    match printer_override {
        Some(provider) => chain.push(provider.printer(parsed, options)),
        None => chain.push(Box::new(DefaultPrinter)),
    }
    chain
}
