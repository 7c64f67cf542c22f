//! Precedence climbing as tree surgery.
//!
//! The parser hands every freshly scanned node to [`insert_expr`] together
//! with the tree built so far, in source order. Instead of keeping an
//! operator stack, the partial tree itself records what is pending: empty
//! operand slots and parentheses without a closing token. Each insertion
//! either fills a slot on the right spine or lets a looser operator take
//! the current tree as its left operand and become the new root.
//!
//! Inserting `1 + 2 * 3 - 4` step by step:
//!
//! ```text
//! 1          1
//! +          (+ 1 _)
//! 2          (+ 1 2)
//! *          (+ 1 (* 2 _))        * binds tighter, goes down the spine
//! 3          (+ 1 (* 2 3))
//! -          (- (+ 1 (* 2 3)) _)  - is not tighter than +, takes the tree
//! 4          (- (+ 1 (* 2 3)) 4)
//! ```

use thiserror::Error;

use crate::lexer::tokens::Token;

use super::{
    ast::Expr,
    expressions::{BinaryExpr, ParenExpr},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsertError {
    #[error("cannot insert {expr} into {into}")]
    CannotInsert {
        expr: &'static str,
        into: &'static str,
    },
    #[error("binary expression reached without its left operand")]
    MissingLeftOperand,
    #[error("no open parenthesis to close")]
    NoOpenParen,
    #[error("cannot insert into a BadExpr")]
    BadTree,
}

impl InsertError {
    /// True for shapes the parser never builds from valid or invalid
    /// input alike; those are parser bugs.
    pub fn is_internal(&self) -> bool {
        !matches!(self, InsertError::CannotInsert { .. })
    }
}

fn cannot_insert(expr: &Expr, into: &'static str) -> InsertError {
    InsertError::CannotInsert {
        expr: expr.kind_name(),
        into,
    }
}

/// Inserts `expr` into `tree` and returns the possibly re-rooted tree.
///
/// Nodes must arrive in the order their tokens were scanned. Leaves only
/// accept a binary operator after them, closed parens accept a unary or
/// binary operator, open parens and empty operand slots accept anything.
pub fn insert_expr(tree: Option<Expr>, expr: Expr) -> Result<Expr, InsertError> {
    let Some(tree) = tree else {
        return Ok(expr);
    };

    match tree {
        Expr::Ident(_) => match expr {
            Expr::Binary(binary) => insert_binary_expr(tree, binary),
            _ => Err(cannot_insert(&expr, "an Ident")),
        },
        Expr::BasicLit(_) => match expr {
            Expr::Binary(binary) => insert_binary_expr(tree, binary),
            _ => Err(cannot_insert(&expr, "a BasicLit")),
        },
        Expr::Paren(paren) => insert_into_paren_expr(paren, expr),
        Expr::Unary(mut unary) => match unary.x.take() {
            None => {
                unary.x = Some(Box::new(expr));
                Ok(Expr::Unary(unary))
            }
            Some(operand) => match expr {
                // Looser than the unary operator: the whole unary becomes the
                // left operand, unless a paren inside it is still open.
                Expr::Binary(mut binary)
                    if binary.op.precedence() < unary.op.precedence()
                        && !unclosed_paren(&operand) =>
                {
                    unary.x = Some(operand);
                    binary.x = Some(Box::new(Expr::Unary(unary)));
                    Ok(Expr::Binary(binary))
                }
                expr => {
                    unary.x = Some(Box::new(insert_expr(Some(*operand), expr)?));
                    Ok(Expr::Unary(unary))
                }
            },
        },
        Expr::Binary(binary) => insert_into_binary_expr(binary, expr),
        Expr::Bad(_) => Err(InsertError::BadTree),
    }
}

fn insert_into_paren_expr(mut paren: ParenExpr, expr: Expr) -> Result<Expr, InsertError> {
    if !paren.is_closed() {
        let inner = match paren.x.take() {
            None => expr,
            Some(inner) => insert_expr(Some(*inner), expr)?,
        };
        paren.x = Some(Box::new(inner));
        return Ok(Expr::Paren(paren));
    }

    match expr {
        Expr::Unary(mut unary) => {
            unary.x = Some(Box::new(Expr::Paren(paren)));
            Ok(Expr::Unary(unary))
        }
        Expr::Binary(binary) => insert_binary_expr(Expr::Paren(paren), binary),
        _ => Err(cannot_insert(&expr, "a closed ParenExpr")),
    }
}

/// `tree` is complete; `expr` either extends a binary tree or takes
/// `tree` as its left operand.
fn insert_binary_expr(tree: Expr, mut expr: BinaryExpr) -> Result<Expr, InsertError> {
    match tree {
        Expr::Binary(binary) => insert_into_binary_expr(binary, Expr::Binary(expr)),
        tree => {
            expr.x = Some(Box::new(tree));
            Ok(Expr::Binary(expr))
        }
    }
}

fn insert_into_binary_expr(mut tree: BinaryExpr, expr: Expr) -> Result<Expr, InsertError> {
    if tree.x.is_none() {
        return Err(InsertError::MissingLeftOperand);
    }

    let Some(y) = tree.y.take() else {
        tree.y = Some(Box::new(expr));
        return Ok(Expr::Binary(tree));
    };

    match expr {
        // Equal precedence rotates too, which makes operators left
        // associative.
        Expr::Binary(mut new_op)
            if tree.op.precedence() >= new_op.op.precedence() && !unclosed_paren(&y) =>
        {
            tree.y = Some(y);
            new_op.x = Some(Box::new(Expr::Binary(tree)));
            Ok(Expr::Binary(new_op))
        }
        expr => {
            tree.y = Some(Box::new(insert_expr(Some(*y), expr)?));
            Ok(Expr::Binary(tree))
        }
    }
}

/// Whether the right spine of `tree` holds a paren without its `)`.
/// Nothing may rotate above such a paren before it closes.
pub fn unclosed_paren(tree: &Expr) -> bool {
    match tree {
        Expr::Paren(paren) => !paren.is_closed(),
        Expr::Unary(unary) => unary.x.as_deref().is_some_and(unclosed_paren),
        Expr::Binary(binary) => binary.y.as_deref().is_some_and(unclosed_paren),
        _ => false,
    }
}

/// Closes the innermost open paren, the deepest one on the right spine.
pub fn close_paren(tree: &mut Expr, rparen: Token) -> Result<(), InsertError> {
    match innermost_open_paren(tree) {
        Some(paren) => {
            paren.rparen = Some(rparen);
            Ok(())
        }
        None => Err(InsertError::NoOpenParen),
    }
}

fn innermost_open_paren(tree: &mut Expr) -> Option<&mut ParenExpr> {
    match tree {
        Expr::Paren(paren) if !paren.is_closed() => {
            if paren.x.as_deref().is_some_and(unclosed_paren) {
                paren.x.as_deref_mut().and_then(innermost_open_paren)
            } else {
                Some(paren)
            }
        }
        Expr::Unary(unary) => unary.x.as_deref_mut().and_then(innermost_open_paren),
        Expr::Binary(binary) => binary.y.as_deref_mut().and_then(innermost_open_paren),
        _ => None,
    }
}
