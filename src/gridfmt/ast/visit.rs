//! Pre-order expression traversal
//!
//! Table detection walks every expression in the program looking for marked
//! candidates; this module provides that walk so detection and any future
//! analyses share one traversal order.

use super::nodes::{Expr, Program, Stmt};

/// Visit every expression in the program in pre-order
pub fn for_each_expr<'a, F>(program: &'a Program, f: &mut F)
where
    F: FnMut(&'a Expr),
{
    for stmt in &program.body {
        match stmt {
            Stmt::Expr(stmt) => walk_expr(&stmt.expr, f),
            Stmt::VarDecl(decl) => walk_expr(&decl.init, f),
        }
    }
}

/// Visit an expression and all of its descendants in pre-order
pub fn walk_expr<'a, F>(expr: &'a Expr, f: &mut F)
where
    F: FnMut(&'a Expr),
{
    f(expr);
    match expr {
        Expr::Array(array) => {
            for element in array.elements.iter().flatten() {
                walk_expr(element, f);
            }
        }
        Expr::Call(call) => {
            walk_expr(&call.callee, f);
            for argument in &call.arguments {
                walk_expr(argument, f);
            }
        }
        Expr::Member(member) => walk_expr(&member.object, f),
        Expr::Unary(unary) => walk_expr(&unary.operand, f),
        Expr::Ident(_) | Expr::Number(_) | Expr::Str(_) | Expr::Template(_) => {}
    }
}
