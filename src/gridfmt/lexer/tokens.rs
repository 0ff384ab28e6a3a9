//! Token definitions for gridfmt source programs
//!
//! Tokens are defined with the logos derive macro. Whitespace (including
//! newlines) is skipped; line structure is recovered later from byte spans.
//! Comments are lexed as ordinary tokens and separated out afterwards, so
//! the parser never sees them.
use logos::Logos;
use serde::Serialize;

/// All possible tokens in a gridfmt source program
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Serialize)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Declaration keywords - higher priority than the identifier regex
    #[token("const", priority = 3)]
    Const,
    #[token("let", priority = 3)]
    Let,
    #[token("var", priority = 3)]
    Var,

    // Brackets and punctuation
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("?.")]
    OptionalChain,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,

    // Literals and names, carrying their raw source text
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice().to_owned())]
    Number(String),
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_owned())]
    #[regex(r"'([^'\\\n]|\\[^\n])*'", |lex| lex.slice().to_owned())]
    Str(String),
    // Template literals may span multiple lines
    #[regex(r"`([^`\\]|\\[\s\S])*`", |lex| lex.slice().to_owned())]
    Template(String),
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_owned())]
    Ident(String),

    // Comments, separated from the token stream after lexing
    #[regex(r"//[^\n]*")]
    LineComment,
    // Equivalent to /\*([^*]|\*+[^*/])*\*+/ — written in unrolled form
    // because logos 0.14 miscompiles the alternation-based pattern.
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,
}

impl Token {
    /// Check if this token is a declaration keyword
    pub fn is_keyword(&self) -> bool {
        matches!(self, Token::Const | Token::Let | Token::Var)
    }

    /// Check if this token is a comment
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::LineComment | Token::BlockComment)
    }

    /// Check if this token carries a literal value
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Str(_) | Token::Template(_))
    }
}
