//! Grammar productions for gridfmt source programs
//!
//! Built with chumsky combinators over `(Token, Range)` pairs. Node spans
//! come from the byte ranges carried on the tokens, not from chumsky's own
//! stream spans (those index the token vector).

use chumsky::prelude::*;
use std::ops::Range;

use crate::gridfmt::ast::nodes::{
    ArrayLit, CallExpr, Expr, ExprStmt, Ident, MemberExpr, NumberLit, Stmt, StrLit, TemplateLit,
    TypeArg, UnaryExpr, UnaryOp, VarDecl, VarKind,
};
use crate::gridfmt::ast::span::Span;
use crate::gridfmt::lexer::{Token, TokenSpan};

/// Type alias for parser error
pub type ParserError = Simple<TokenSpan>;

/// Match one exact token, ignoring its span
fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// Match one exact token and yield its byte span
fn token_span(t: Token) -> impl Parser<TokenSpan, Span, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).map(|(_, range)| Span::from_range(&range))
}

fn ident() -> impl Parser<TokenSpan, Ident, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, (token, range): TokenSpan| match token {
        Token::Ident(name) => Ok(Ident {
            name,
            span: Span::from_range(&range),
        }),
        other => Err(ParserError::expected_input_found(
            span,
            None,
            Some((other, range)),
        )),
    })
}

fn number() -> impl Parser<TokenSpan, Expr, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, (token, range): TokenSpan| match token {
        Token::Number(raw) => Ok(Expr::Number(NumberLit {
            raw,
            span: Span::from_range(&range),
        })),
        other => Err(ParserError::expected_input_found(
            span,
            None,
            Some((other, range)),
        )),
    })
}

fn string() -> impl Parser<TokenSpan, Expr, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, (token, range): TokenSpan| match token {
        Token::Str(raw) => Ok(Expr::Str(StrLit {
            raw,
            span: Span::from_range(&range),
        })),
        other => Err(ParserError::expected_input_found(
            span,
            None,
            Some((other, range)),
        )),
    })
}

fn template() -> impl Parser<TokenSpan, Expr, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, (token, range): TokenSpan| match token {
        Token::Template(raw) => Ok(Expr::Template(TemplateLit {
            raw,
            span: Span::from_range(&range),
        })),
        other => Err(ParserError::expected_input_found(
            span,
            None,
            Some((other, range)),
        )),
    })
}

/// A validated type argument: a name, optional nested `<...>` parameters
/// and any number of `[]` array suffixes. The text is normalized (single
/// `, ` between nested parameters) and kept as a string.
fn type_argument() -> impl Parser<TokenSpan, TypeArg, Error = ParserError> + Clone {
    recursive(|type_arg| {
        let params = token(Token::LAngle)
            .ignore_then(type_arg.separated_by(token(Token::Comma)).at_least(1))
            .then(token_span(Token::RAngle))
            .or_not();
        let array_suffixes = token(Token::LBracket)
            .ignore_then(token_span(Token::RBracket))
            .repeated();

        ident()
            .then(params)
            .then(array_suffixes)
            .map(|((name, params), suffixes)| {
                let mut text = name.name.clone();
                let mut end = name.span.end;
                if let Some((args, close)) = params {
                    let inner: Vec<&str> =
                        args.iter().map(|arg: &TypeArg| arg.text.as_str()).collect();
                    text = format!("{}<{}>", text, inner.join(", "));
                    end = close.end;
                }
                for close in &suffixes {
                    text.push_str("[]");
                    end = close.end;
                }
                TypeArg {
                    text,
                    span: Span::new(name.span.start, end),
                }
            })
    })
}

/// A postfix continuation of a primary expression
enum Postfix {
    Call {
        optional: bool,
        type_args: Vec<TypeArg>,
        arguments: Vec<Expr>,
        end: usize,
    },
    Member {
        optional: bool,
        property: Ident,
    },
}

/// The expression grammar
pub fn expr() -> impl Parser<TokenSpan, Expr, Error = ParserError> + Clone {
    recursive(|expr| {
        // Array literal; an absent element between commas is an elision hole.
        // `[a, b,]` parses a trailing empty slot, which is dropped so that a
        // trailing comma does not read as a hole.
        let array = token_span(Token::LBracket)
            .then(expr.clone().or_not().separated_by(token(Token::Comma)))
            .then(token_span(Token::RBracket))
            .map(|((open, mut elements), close): ((Span, Vec<Option<Expr>>), Span)| {
                if matches!(elements.last(), Some(None)) {
                    elements.pop();
                }
                Expr::Array(ArrayLit {
                    elements,
                    span: Span::new(open.start, close.end),
                })
            });

        let atom = choice((array, number(), string(), template(), ident().map(Expr::Ident)));

        let call_args = token(Token::LParen)
            .ignore_then(
                expr.clone()
                    .separated_by(token(Token::Comma))
                    .allow_trailing(),
            )
            .then(token_span(Token::RParen));

        let type_args_clause = token(Token::LAngle)
            .ignore_then(
                type_argument()
                    .separated_by(token(Token::Comma))
                    .at_least(1),
            )
            .then_ignore(token(Token::RAngle));

        let call_suffix = type_args_clause
            .or_not()
            .then(call_args.clone())
            .map(|(type_args, (arguments, close))| Postfix::Call {
                optional: false,
                type_args: type_args.unwrap_or_default(),
                arguments,
                end: close.end,
            });

        let optional_call_suffix =
            token(Token::OptionalChain)
                .ignore_then(call_args)
                .map(|(arguments, close)| Postfix::Call {
                    optional: true,
                    type_args: Vec::new(),
                    arguments,
                    end: close.end,
                });

        let member_suffix = token(Token::Dot)
            .ignore_then(ident())
            .map(|property| Postfix::Member {
                optional: false,
                property,
            });

        let optional_member_suffix = token(Token::OptionalChain)
            .ignore_then(ident())
            .map(|property| Postfix::Member {
                optional: true,
                property,
            });

        // Optional call must be tried before optional member: both begin
        // with `?.` and only the paren that follows distinguishes them.
        let postfix = choice((
            member_suffix,
            optional_call_suffix,
            optional_member_suffix,
            call_suffix,
        ));

        let postfix_expr = atom.then(postfix.repeated()).foldl(|base, suffix| {
            let start = base.span().start;
            match suffix {
                Postfix::Call {
                    optional,
                    type_args,
                    arguments,
                    end,
                } => Expr::Call(CallExpr {
                    callee: Box::new(base),
                    optional,
                    type_args,
                    arguments,
                    span: Span::new(start, end),
                }),
                Postfix::Member { optional, property } => {
                    let end = property.span.end;
                    Expr::Member(MemberExpr {
                        object: Box::new(base),
                        optional,
                        property,
                        span: Span::new(start, end),
                    })
                }
            }
        });

        let sign = choice((
            token_span(Token::Minus).map(|span| (UnaryOp::Minus, span)),
            token_span(Token::Plus).map(|span| (UnaryOp::Plus, span)),
        ));

        sign.repeated()
            .then(postfix_expr)
            .foldr(|(op, op_span), operand| {
                let span = Span::new(op_span.start, operand.span().end);
                Expr::Unary(UnaryExpr {
                    op,
                    operand: Box::new(operand),
                    span,
                })
            })
    })
}

/// A single statement: a variable declaration or a bare expression
pub fn statement() -> impl Parser<TokenSpan, Stmt, Error = ParserError> + Clone {
    let kind = choice((
        token_span(Token::Const).map(|span| (VarKind::Const, span)),
        token_span(Token::Let).map(|span| (VarKind::Let, span)),
        token_span(Token::Var).map(|span| (VarKind::Var, span)),
    ));

    let decl = kind
        .then(ident())
        .then_ignore(token(Token::Eq))
        .then(expr())
        .map(|(((kind, kw_span), name), init)| {
            let span = Span::new(kw_span.start, init.span().end);
            Stmt::VarDecl(VarDecl {
                kind,
                name,
                init,
                span,
            })
        });

    let expr_stmt = expr().map(|expr| {
        let span = expr.span();
        Stmt::Expr(ExprStmt { expr, span })
    });

    decl.or(expr_stmt)
}

/// The whole program: statements with optional semicolon separators
pub fn program() -> impl Parser<TokenSpan, Vec<Stmt>, Error = ParserError> {
    let semis = token(Token::Semicolon).repeated();
    semis
        .ignore_then(
            statement()
                .then_ignore(token(Token::Semicolon).repeated())
                .repeated(),
        )
        .then_ignore(end())
}
