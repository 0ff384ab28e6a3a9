//! AST definitions and utilities for gridfmt source programs
//!
//! This module provides the syntax tree the printer walks, along with
//! utilities for tracking source positions and visiting expressions.
//!
//! ## Modules
//!
//! - `span` - Byte spans and line/column positions
//! - `position` - Source location utilities for converting byte offsets
//! - `nodes` - Syntax tree node definitions
//! - `comment` - Comments collected out of band by the lexer
//! - `visit` - Pre-order expression traversal

pub mod comment;
pub mod nodes;
pub mod position;
pub mod span;
pub mod visit;

// Re-export commonly used types at module root
pub use comment::{Comment, CommentKind};
pub use nodes::{
    ArrayLit, CallExpr, Expr, ExprStmt, Ident, MemberExpr, NumberLit, Program, Stmt, StrLit,
    TemplateLit, TypeArg, UnaryExpr, UnaryOp, VarDecl, VarKind,
};
pub use position::SourceLocation;
pub use span::{Position, Span};
