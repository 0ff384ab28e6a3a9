//! The end-to-end formatting pipeline
//!
//! Source text goes through four stages: lexing (tokens plus out-of-band
//! comments), parsing, document construction through the printer chain, and
//! width-aware serialization. A [`Formatter`] owns the registered
//! extensions and an optional printer override; [`format_source`] is the
//! one-call entry point with the default extension set.

use crate::gridfmt::ast::position::SourceLocation;
use crate::gridfmt::doc::{print_doc, Doc};
use crate::gridfmt::extension::{
    resolve_printer_chain, Extension, PrinterProvider, TreeRepresentation,
};
use crate::gridfmt::lexer::{lex, LexError};
use crate::gridfmt::options::{has_format_pragma, insert_format_pragma, FormatOptions};
use crate::gridfmt::parser::{parse_program, ParseError};
use crate::gridfmt::printer::default::print_program;
use crate::gridfmt::printer::{assign_comments, ParsedSource, PrintContext, PrintError};
use crate::gridfmt::table::TableExtension;
use std::fmt;

/// Errors produced anywhere in the pipeline
#[derive(Debug)]
pub enum FormatError {
    Lex(LexError),
    Parse(ParseError),
    Print(PrintError),
    Serialize(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Lex(err) => write!(f, "lex error: {}", err),
            FormatError::Parse(err) => write!(f, "parse error: {}", err),
            FormatError::Print(err) => write!(f, "print error: {}", err),
            FormatError::Serialize(message) => write!(f, "serialization error: {}", message),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Lex(err) => Some(err),
            FormatError::Parse(err) => Some(err),
            FormatError::Print(err) => Some(err),
            FormatError::Serialize(_) => None,
        }
    }
}

impl From<LexError> for FormatError {
    fn from(err: LexError) -> Self {
        FormatError::Lex(err)
    }
}

impl From<ParseError> for FormatError {
    fn from(err: ParseError) -> Self {
        FormatError::Parse(err)
    }
}

impl From<PrintError> for FormatError {
    fn from(err: PrintError) -> Self {
        FormatError::Print(err)
    }
}

/// A configured formatting pipeline: the extensions to consult, in
/// registration order, and an optional replacement for the default printer
/// at the end of the chain
pub struct Formatter {
    extensions: Vec<Box<dyn Extension>>,
    printer_override: Option<Box<dyn PrinterProvider>>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    /// The standard pipeline: table rendering plus the engine printer
    pub fn new() -> Self {
        Self {
            extensions: vec![Box::new(TableExtension)],
            printer_override: None,
        }
    }

    /// A pipeline with no extensions; output depends only on the engine
    pub fn engine_only() -> Self {
        Self {
            extensions: Vec::new(),
            printer_override: None,
        }
    }

    pub fn with_extension(mut self, extension: Box<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Replace the printer at the end of the chain. The replacement takes
    /// the position the engine printer normally holds, so it must not
    /// delegate past itself.
    pub fn with_printer_override(mut self, provider: Box<dyn PrinterProvider>) -> Self {
        self.printer_override = Some(provider);
        self
    }

    /// Format source text to its canonical rendering. Output always ends
    /// with a newline unless it is empty.
    pub fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError> {
        if options.require_pragma && !has_format_pragma(source) {
            return Ok(source.to_string());
        }

        let doc = self.document(source, options)?;
        let mut formatted = print_doc(doc, options, options.print_width).formatted;
        if !formatted.is_empty() && !formatted.ends_with('\n') {
            formatted.push('\n');
        }
        if options.insert_pragma && !has_format_pragma(&formatted) {
            formatted = insert_format_pragma(&formatted);
        }
        Ok(formatted)
    }

    /// Build the layout document for source text without serializing it
    pub fn document(&self, source: &str, options: &FormatOptions) -> Result<Doc, FormatError> {
        let mut rewritten: Option<String> = None;
        for extension in &self.extensions {
            let current = rewritten.as_deref().unwrap_or(source);
            if let Some(next) = extension.rewrite_source(current, options) {
                rewritten = Some(next);
            }
        }
        let source = rewritten.as_deref().unwrap_or(source);

        let (tokens, comments) = lex(source)?;
        let program = parse_program(tokens, source)?;
        let locations = SourceLocation::new(source);
        let parsed = ParsedSource {
            source,
            program: &program,
            comments: &comments,
            locations: &locations,
        };
        let chain = resolve_printer_chain(
            &self.extensions,
            self.printer_override.as_deref(),
            TreeRepresentation::Ast,
            &parsed,
            options,
        );
        let assignments = assign_comments(&parsed, &chain, options);
        let ctx = PrintContext::new(&chain, parsed, &assignments, options);
        print_program(parsed.program, &ctx).map_err(FormatError::Print)
    }
}

/// Format with the standard pipeline
pub fn format_source(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    Formatter::new().format(source, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridfmt::testing::{assert_stable, fmt};

    #[test]
    fn test_format_appends_trailing_newline() {
        assert_eq!(fmt("[1, 2]"), "[1, 2]\n");
        assert_eq!(fmt("[1, 2]\n"), "[1, 2]\n");
    }

    #[test]
    fn test_format_empty_source() {
        assert_eq!(fmt(""), "");
    }

    #[test]
    fn test_marked_array_renders_as_grid() {
        assert_eq!(
            fmt("// prettier-table\n[[1,22],[333,4]]"),
            "// prettier-table\n[\n  [1  , 22],\n  [333, 4 ],\n]\n"
        );
    }

    #[test]
    fn test_engine_only_ignores_markers() {
        let out = Formatter::engine_only()
            .format("// prettier-table\n[[1], [2]]", &FormatOptions::default())
            .unwrap();
        assert_eq!(out, "// prettier-table\n[[1], [2]]\n");
    }

    #[test]
    fn test_require_pragma_skips_unpragmaed_source() {
        let options = FormatOptions {
            require_pragma: true,
            ..FormatOptions::default()
        };
        let source = "[1,2]";
        assert_eq!(format_source(source, &options).unwrap(), source);
    }

    #[test]
    fn test_require_pragma_formats_pragmaed_source() {
        let options = FormatOptions {
            require_pragma: true,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_source("/** @format */\n[1,2]", &options).unwrap(),
            "/** @format */\n[1, 2]\n"
        );
    }

    #[test]
    fn test_insert_pragma_prepends_header() {
        let options = FormatOptions {
            insert_pragma: true,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_source("[1]", &options).unwrap(),
            "/** @format */\n\n[1]\n"
        );
    }

    #[test]
    fn test_insert_pragma_leaves_existing_pragma_alone() {
        let options = FormatOptions {
            insert_pragma: true,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_source("/** @format */\n[1]", &options).unwrap(),
            "/** @format */\n[1]\n"
        );
    }

    #[test]
    fn test_lex_errors_surface() {
        let err = format_source("@", &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::Lex(_)));
        assert!(err.to_string().contains("unexpected character"));
    }

    #[test]
    fn test_parse_errors_surface() {
        let err = format_source("[1,", &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::Parse(_)));
    }

    #[test]
    fn test_formatting_is_idempotent_on_grids() {
        assert_stable("// prettier-table\n[[1,22],[333,4]]");
        assert_stable("// prettier-table\n\n[[1], [2]]");
    }

    #[test]
    fn test_source_rewrite_extensions_run_in_order() {
        struct Upper;
        impl Extension for Upper {
            fn name(&self) -> &'static str {
                "upper"
            }
            fn rewrite_source(&self, source: &str, _options: &FormatOptions) -> Option<String> {
                Some(source.replace("aa", "bb"))
            }
            fn printer(
                &self,
                _representation: TreeRepresentation,
                _parsed: &ParsedSource<'_>,
                _options: &FormatOptions,
            ) -> Option<Box<dyn crate::gridfmt::printer::NodePrinter>> {
                None
            }
        }
        let out = Formatter::engine_only()
            .with_extension(Box::new(Upper))
            .format("[aa]", &FormatOptions::default())
            .unwrap();
        assert_eq!(out, "[bb]\n");
    }
}
