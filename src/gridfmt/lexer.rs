//! Lexer module for gridfmt source programs
//!
//! This module contains the tokenization logic: token definitions and the
//! lexer driver. Two properties matter downstream:
//!
//! - Comments never reach the parser. They are collected into a side list
//!   with their byte spans, and the printer re-attaches them by position.
//!   Table detection also reads them there.
//! - Whitespace carries no tokens. Statement separation falls out of the
//!   grammar, and blank lines are recovered from spans when printing.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::TokenSpan;
pub use tokens::Token;

use crate::gridfmt::ast::comment::Comment;
use crate::gridfmt::ast::position::SourceLocation;
use crate::gridfmt::ast::span::Position;
use std::fmt;

/// Errors produced while tokenizing source text
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character no token accepts
    UnexpectedCharacter { found: String, position: Position },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { found, position } => {
                write!(f, "unexpected character {:?} at {}", found, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Main lexer function: tokens with spans, plus comments collected out of band
pub fn lex(source: &str) -> Result<(Vec<TokenSpan>, Vec<Comment>), LexError> {
    lexer_impl::tokenize_with_comments(source).map_err(|span| {
        let locations = SourceLocation::new(source);
        LexError::UnexpectedCharacter {
            found: source[span.clone()].to_string(),
            position: locations.byte_to_position(span.start),
        }
    })
}
