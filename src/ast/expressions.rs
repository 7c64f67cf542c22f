use std::rc::Rc;

use crate::lexer::tokens::Token;

use super::{ast::Expr, scope::Object};

// LEAVES

/// Placeholder for input no node could be built for.
#[derive(Debug, Clone, PartialEq)]
pub struct BadExpr {
    pub from: u32,
    pub to: u32,
}

/// Identifier
/// A variable reference, resolved against the scope at parse time when a
/// binding exists.
#[derive(Debug, Clone)]
pub struct Ident {
    pub token: Token,
    pub obj: Option<Rc<Object>>,
}

impl Ident {
    pub fn new(token: Token) -> Self {
        Ident { token, obj: None }
    }

    pub fn name(&self) -> &str {
        &self.token.value
    }

    pub fn is_resolved(&self) -> bool {
        self.obj.is_some()
    }
}

/// Resolution is bookkeeping, two identifiers are equal by token alone.
impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

/// Int, float, bool or string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicLit {
    pub token: Token,
}

// COMPOSITES

/// Parenthesized expression
///
/// Open and empty while neither `x` nor `rparen` is set, open while only
/// `x` is set, closed once `rparen` is set. Only a closed paren composes
/// into an enclosing tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub lparen: Token,
    pub x: Option<Box<Expr>>,
    pub rparen: Option<Token>,
}

impl ParenExpr {
    pub fn new(lparen: Token) -> Self {
        ParenExpr {
            lparen,
            x: None,
            rparen: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.rparen.is_some()
    }
}

/// Unary Expression
/// The operand starts empty and is filled exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Token,
    pub x: Option<Box<Expr>>,
}

impl UnaryExpr {
    pub fn new(op: Token) -> Self {
        UnaryExpr { op, x: None }
    }
}

/// Binary Expression
///
/// Built from its operator token alone; the insertion step hands it its
/// left operand and the right operand follows.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub x: Option<Box<Expr>>,
    pub op: Token,
    pub y: Option<Box<Expr>>,
}

impl BinaryExpr {
    pub fn new(op: Token) -> Self {
        BinaryExpr { x: None, op, y: None }
    }
}
