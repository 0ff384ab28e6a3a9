//! Implementation of the gridfmt lexer
//!
//! Tokenization itself is handled entirely by logos; this module drives the
//! lexer, separates comments from the token stream and keeps their spans so
//! later stages can reason about line adjacency.

use super::tokens::Token;
use crate::gridfmt::ast::comment::{Comment, CommentKind};
use crate::gridfmt::ast::span::Span;
use logos::Logos;
use std::ops::Range;

/// A token paired with its byte range in the source
pub type TokenSpan = (Token, Range<usize>);

/// Raw output of a lexer run: an offending span, or tokens plus comments
pub(super) fn tokenize_with_comments(
    source: &str,
) -> Result<(Vec<TokenSpan>, Vec<Comment>), Range<usize>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut comments = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(Token::LineComment) => {
                let text = &source[span.start + 2..span.end];
                comments.push(Comment::new(
                    CommentKind::Line,
                    text,
                    Span::from_range(&span),
                ));
            }
            Ok(Token::BlockComment) => {
                let text = &source[span.start + 2..span.end - 2];
                comments.push(Comment::new(
                    CommentKind::Block,
                    text,
                    Span::from_range(&span),
                ));
            }
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(span),
        }
    }

    Ok((tokens, comments))
}
