use std::{fmt::Display, rc::Rc};

use super::{
    expressions::{BadExpr, BasicLit, BinaryExpr, Ident, ParenExpr, UnaryExpr},
    scope::Scope,
};

/// Expression node.
///
/// Each child is owned by exactly one slot of its parent. Insertion
/// reshapes a tree by moving subtrees between slots, never by sharing.
/// Equality is structural: token kinds and texts, never positions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bad(BadExpr),
    Ident(Ident),
    BasicLit(BasicLit),
    Paren(ParenExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
}

impl Expr {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Bad(_) => "BadExpr",
            Expr::Ident(_) => "Ident",
            Expr::BasicLit(_) => "BasicLit",
            Expr::Paren(_) => "ParenExpr",
            Expr::Unary(_) => "UnaryExpr",
            Expr::Binary(_) => "BinaryExpr",
        }
    }

    /// Byte offset of the first token of the expression.
    pub fn pos(&self) -> u32 {
        match self {
            Expr::Bad(bad) => bad.from,
            Expr::Ident(ident) => ident.token.offset(),
            Expr::BasicLit(lit) => lit.token.offset(),
            Expr::Paren(paren) => paren.lparen.offset(),
            Expr::Unary(unary) => unary.op.offset(),
            Expr::Binary(binary) => binary
                .x
                .as_ref()
                .map_or(binary.op.offset(), |x| x.pos()),
        }
    }

    /// Byte offset just past the expression. Unfilled slots end at the
    /// last token present.
    pub fn end(&self) -> u32 {
        match self {
            Expr::Bad(bad) => bad.to,
            Expr::Ident(ident) => ident.token.end(),
            Expr::BasicLit(lit) => lit.token.end(),
            Expr::Paren(paren) => match (&paren.rparen, &paren.x) {
                (Some(rparen), _) => rparen.end(),
                (None, Some(x)) => x.end(),
                (None, None) => paren.lparen.end(),
            },
            Expr::Unary(unary) => unary.x.as_ref().map_or(unary.op.end(), |x| x.end()),
            Expr::Binary(binary) => binary.y.as_ref().map_or(binary.op.end(), |y| y.end()),
        }
    }
}

fn write_slot(f: &mut std::fmt::Formatter<'_>, slot: &Option<Box<Expr>>) -> std::fmt::Result {
    match slot {
        Some(expr) => write!(f, "{}", expr),
        None => write!(f, "_"),
    }
}

/// Compact s-expression: `(+ 1 (* 2 3))`, `(paren 4)`, `(- x)`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Bad(_) => write!(f, "<bad>"),
            Expr::Ident(ident) => write!(f, "{}", ident.name()),
            Expr::BasicLit(lit) => write!(f, "{}", lit.token.value),
            Expr::Paren(paren) => {
                if paren.is_closed() {
                    write!(f, "(paren ")?;
                } else {
                    write!(f, "(open-paren ")?;
                }
                write_slot(f, &paren.x)?;
                write!(f, ")")
            }
            Expr::Unary(unary) => {
                write!(f, "({} ", unary.op.value)?;
                write_slot(f, &unary.x)?;
                write!(f, ")")
            }
            Expr::Binary(binary) => {
                write!(f, "({} ", binary.op.value)?;
                write_slot(f, &binary.x)?;
                write!(f, " ")?;
                write_slot(f, &binary.y)?;
                write!(f, ")")
            }
        }
    }
}

/// A `//` or `/* */` comment, markers included in `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub slash: u32,
    pub text: String,
}

impl Comment {
    pub fn pos(&self) -> u32 {
        self.slash
    }

    pub fn end(&self) -> u32 {
        self.slash + self.text.len() as u32
    }

    /// Comment text without markers; one leading space of a line comment
    /// is dropped as well.
    pub fn body(&self) -> &str {
        if let Some(line) = self.text.strip_prefix("//") {
            line.strip_prefix(' ').unwrap_or(line)
        } else {
            self.text
                .strip_prefix("/*")
                .and_then(|block| block.strip_suffix("*/"))
                .unwrap_or(&self.text)
        }
    }
}

/// One parsed source file: its top-level expressions in source order plus
/// what later passes need (unresolved identifiers, comments, scope).
#[derive(Debug)]
pub struct File {
    pub name: Rc<String>,
    pub list: Vec<Expr>,
    pub unresolved: Vec<Ident>,
    pub comments: Vec<Comment>,
    pub scope: Scope,
}

impl File {
    pub fn new(name: Rc<String>) -> Self {
        File {
            name,
            list: vec![],
            unresolved: vec![],
            comments: vec![],
            scope: Scope::new(None),
        }
    }

    pub fn pos(&self) -> u32 {
        self.list.first().map_or(0, |expr| expr.pos())
    }

    pub fn end(&self) -> u32 {
        self.list.last().map_or(0, |expr| expr.end())
    }
}

/// Files are equal when their expression lists are.
impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(file {}", self.name)?;
        for expr in &self.list {
            write!(f, "\n  {}", expr)?;
        }
        write!(f, ")")
    }
}
