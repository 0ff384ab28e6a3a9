//! Parser module for gridfmt source programs
//!
//! A chumsky combinator parser over the lexer's `(Token, Range)` pairs.
//! Statements are self-delimiting in this grammar (there are no infix
//! operators), so the parser needs no newline tokens; semicolons are
//! accepted as separators and normalized away.

pub mod grammar;

use crate::gridfmt::ast::nodes::Program;
use crate::gridfmt::ast::position::SourceLocation;
use crate::gridfmt::ast::span::{Position, Span};
use crate::gridfmt::lexer::TokenSpan;
use chumsky::Parser;
use std::fmt;

/// Errors produced while parsing the token stream
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token that no production accepts at this point
    UnexpectedToken { found: String, position: Position },
    /// The token stream ended mid-production
    UnexpectedEnd,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { found, position } => {
                write!(f, "unexpected token {} at {}", found, position)
            }
            ParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
        }
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    fn from_chumsky(errors: Vec<grammar::ParserError>, source: &str) -> Self {
        let locations = SourceLocation::new(source);
        match errors.into_iter().next() {
            Some(err) => match err.found() {
                Some((token, range)) => ParseError::UnexpectedToken {
                    found: format!("{:?}", token),
                    position: locations.byte_to_position(range.start),
                },
                None => ParseError::UnexpectedEnd,
            },
            None => ParseError::UnexpectedEnd,
        }
    }
}

/// Parse a full token stream into a program
pub fn parse_program(tokens: Vec<TokenSpan>, source: &str) -> Result<Program, ParseError> {
    match grammar::program().parse(tokens) {
        Ok(body) => Ok(Program {
            body,
            span: Span::new(0, source.len()),
        }),
        Err(errors) => Err(ParseError::from_chumsky(errors, source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridfmt::ast::nodes::{Expr, Stmt};
    use crate::gridfmt::lexer::lex;

    fn parse(source: &str) -> Program {
        let (tokens, _) = lex(source).unwrap();
        parse_program(tokens, source).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        let (tokens, _) = lex(source).unwrap();
        parse_program(tokens, source).unwrap_err()
    }

    #[test]
    fn test_program_span_covers_source() {
        let program = parse("[1]\n[2]");
        assert_eq!(program.span, Span::new(0, 7));
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_statements_split_on_newlines_without_tokens() {
        let program = parse("a\nb");
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_semicolons_are_separators() {
        let program = parse(";[1];;[2];");
        assert_eq!(program.body.len(), 2);
        assert!(matches!(&program.body[0], Stmt::Expr(s) if matches!(s.expr, Expr::Array(_))));
    }

    #[test]
    fn test_empty_input_parses() {
        let program = parse("");
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_unexpected_token_error() {
        let err = parse_err("[1, 2");
        assert_eq!(err, ParseError::UnexpectedEnd);

        let err = parse_err("a < b");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert!(err.to_string().contains("unexpected token"));
    }
}
