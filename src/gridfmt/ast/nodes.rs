//! Syntax tree node definitions
//!
//! The tree covers the expression-statement subset gridfmt formats: variable
//! declarations, array literals (with elision holes), call expressions with
//! optional-call tokens and explicit type arguments, member access, unary
//! sign operators and the literal kinds. Every node records the byte span it
//! occupies; spans are the identity later stages key side tables off.

use super::span::Span;
use serde::Serialize;

/// A whole source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A top-level statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Expr(ExprStmt),
    VarDecl(VarDecl),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expr(stmt) => stmt.span,
            Stmt::VarDecl(decl) => decl.span,
        }
    }

    /// The expression carried by the statement (the initializer for
    /// declarations)
    pub fn expr(&self) -> &Expr {
        match self {
            Stmt::Expr(stmt) => &stmt.expr,
            Stmt::VarDecl(decl) => &decl.init,
        }
    }
}

/// An expression used as a statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// `const x = ...`, `let x = ...` or `var x = ...`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub kind: VarKind,
    pub name: Ident,
    pub init: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VarKind {
    Const,
    Let,
    Var,
}

impl VarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::Const => "const",
            VarKind::Let => "let",
            VarKind::Var => "var",
        }
    }
}

/// Any expression node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Array(ArrayLit),
    Call(CallExpr),
    Member(MemberExpr),
    Unary(UnaryExpr),
    Ident(Ident),
    Number(NumberLit),
    Str(StrLit),
    Template(TemplateLit),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Array(node) => node.span,
            Expr::Call(node) => node.span,
            Expr::Member(node) => node.span,
            Expr::Unary(node) => node.span,
            Expr::Ident(node) => node.span,
            Expr::Number(node) => node.span,
            Expr::Str(node) => node.span,
            Expr::Template(node) => node.span,
        }
    }
}

/// An array literal; `None` elements are elision holes (`[1, , 3]`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLit {
    pub elements: Vec<Option<Expr>>,
    pub span: Span,
}

/// A call expression, optionally with an optional-call token (`f?.(x)`)
/// and explicit type arguments (`f<number[]>(x)`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub optional: bool,
    pub type_args: Vec<TypeArg>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// A single explicit type argument, kept as validated source text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeArg {
    pub text: String,
    pub span: Span,
}

/// Property access: `a.b` or `a?.b`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub optional: bool,
    pub property: Ident,
    pub span: Span,
}

/// A sign applied to an operand: `-x` or `+x`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Minus,
    Plus,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// A numeric literal, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLit {
    pub raw: String,
    pub span: Span,
}

/// A string literal including its quotes, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrLit {
    pub raw: String,
    pub span: Span,
}

/// A template literal including its backticks, kept verbatim; the raw text
/// may span multiple lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLit {
    pub raw: String,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stmt_expr_reaches_declaration_initializer() {
        let init = Expr::Number(NumberLit {
            raw: "1".to_string(),
            span: Span::new(10, 11),
        });
        let decl = Stmt::VarDecl(VarDecl {
            kind: VarKind::Const,
            name: Ident {
                name: "x".to_string(),
                span: Span::new(6, 7),
            },
            init: init.clone(),
            span: Span::new(0, 11),
        });

        assert_eq!(decl.expr(), &init);
        assert_eq!(decl.span(), Span::new(0, 11));
    }

    #[test]
    fn test_expr_span_covers_all_variants() {
        let span = Span::new(2, 5);
        let ident = Expr::Ident(Ident {
            name: "ab".to_string(),
            span,
        });
        assert_eq!(ident.span(), span);

        let array = Expr::Array(ArrayLit {
            elements: vec![None],
            span,
        });
        assert_eq!(array.span(), span);
    }

    #[test]
    fn test_var_kind_keywords() {
        assert_eq!(VarKind::Const.as_str(), "const");
        assert_eq!(VarKind::Let.as_str(), "let");
        assert_eq!(VarKind::Var.as_str(), "var");
    }
}
