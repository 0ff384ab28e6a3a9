//! Dumps of intermediate pipeline stages
//!
//! `inspect_source` runs the pipeline up to a chosen stage and serializes
//! the result as pretty-printed JSON. This backs the CLI's `inspect`
//! subcommand and is the quickest way to see why a layout decision was
//! made: the doc dump shows the exact group and line structure handed to
//! the serializer.

use crate::gridfmt::ast::{Comment, Span};
use crate::gridfmt::lexer::{lex, Token};
use crate::gridfmt::options::FormatOptions;
use crate::gridfmt::parser::parse_program;
use crate::gridfmt::pipeline::{FormatError, Formatter};
use serde::Serialize;
use std::str::FromStr;

/// A pipeline stage whose output can be dumped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectStage {
    /// Tokens with byte spans, plus the comments held out of band
    Tokens,
    /// The parsed syntax tree
    Ast,
    /// The layout document built by the full printer chain
    Doc,
}

impl FromStr for InspectStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokens" => Ok(InspectStage::Tokens),
            "ast" => Ok(InspectStage::Ast),
            "doc" => Ok(InspectStage::Doc),
            other => Err(format!(
                "unknown inspect stage {:?} (expected tokens, ast or doc)",
                other
            )),
        }
    }
}

#[derive(Serialize)]
struct TokenRecord {
    token: Token,
    span: Span,
}

#[derive(Serialize)]
struct TokenDump {
    tokens: Vec<TokenRecord>,
    comments: Vec<Comment>,
}

/// Serialize the chosen stage's output for source text as pretty JSON
pub fn inspect_source(
    source: &str,
    stage: InspectStage,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    match stage {
        InspectStage::Tokens => {
            let (tokens, comments) = lex(source)?;
            let tokens = tokens
                .into_iter()
                .map(|(token, range)| TokenRecord {
                    token,
                    span: Span::from_range(&range),
                })
                .collect();
            to_pretty(&TokenDump { tokens, comments })
        }
        InspectStage::Ast => {
            let (tokens, _) = lex(source)?;
            let program = parse_program(tokens, source)?;
            to_pretty(&program)
        }
        InspectStage::Doc => {
            let doc = Formatter::new().document(source, options)?;
            to_pretty(&doc)
        }
    }
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(value).map_err(|err| FormatError::Serialize(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parsing() {
        assert_eq!("tokens".parse(), Ok(InspectStage::Tokens));
        assert_eq!("ast".parse(), Ok(InspectStage::Ast));
        assert_eq!("doc".parse(), Ok(InspectStage::Doc));
        assert!(InspectStage::from_str("beans")
            .unwrap_err()
            .contains("unknown inspect stage"));
    }

    #[test]
    fn test_token_dump_includes_comments() {
        let dump = inspect_source(
            "[1] // note",
            InspectStage::Tokens,
            &FormatOptions::default(),
        )
        .unwrap();
        assert!(dump.contains("\"LBracket\""));
        assert!(dump.contains("\"comments\""));
        assert!(dump.contains(" note"));
    }

    #[test]
    fn test_ast_dump_is_json() {
        let dump = inspect_source("[1, 2]", InspectStage::Ast, &FormatOptions::default()).unwrap();
        assert!(dump.contains("\"body\""));
        assert!(dump.contains("\"Array\""));
    }

    #[test]
    fn test_doc_dump_reflects_table_marking() {
        let dump = inspect_source(
            "// prettier-table\n[[1], [2]]",
            InspectStage::Doc,
            &FormatOptions::default(),
        )
        .unwrap();
        // grid rows are fixed text under an indent, never width-dependent groups
        assert!(!dump.contains("\"Group\""));
        assert!(dump.contains("\"Indent\""));

        let plain = inspect_source("[[1], [2]]", InspectStage::Doc, &FormatOptions::default())
            .unwrap();
        assert!(plain.contains("\"Group\""));
    }

    #[test]
    fn test_inspect_propagates_pipeline_errors() {
        let err =
            inspect_source("[1,", InspectStage::Ast, &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::Parse(_)));
    }
}
