use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("else", TokenKind::Else);
        map.insert("end", TokenKind::End);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("let", TokenKind::Let);
        map.insert("var", TokenKind::Var);
        map.insert("val", TokenKind::Val);
        map
    };

    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("+", TokenKind::Add);
        map.insert("-", TokenKind::Sub);
        map.insert("*", TokenKind::Mul);
        map.insert("/", TokenKind::Quo);
        map.insert("%", TokenKind::Rem);
        map.insert("&&", TokenKind::LAnd);
        map.insert("||", TokenKind::LOr);
        map.insert("==", TokenKind::Eql);
        map.insert("<", TokenKind::Lss);
        map.insert(">", TokenKind::Gtr);
        map.insert("!", TokenKind::Not);
        map.insert("!=", TokenKind::Neq);
        map.insert("<=", TokenKind::Leq);
        map.insert(">=", TokenKind::Geq);
        map.insert("=", TokenKind::Assign);
        map
    };
}

/// Precedence of every token that is not a binary operator.
pub const LOWEST_PREC: u8 = 0;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,
    Newline,
    LineComment,
    BlockComment,
    LeftParen,
    RightParen,
    Semicolon,

    Int,
    Float,
    Bool,
    String,
    Identifier,

    // Reserved
    Else,
    End,
    If,
    Then,
    Let,
    Var,
    Val,

    Add, // +
    Sub, // -
    Mul, // *
    Quo, // /
    Rem, // %

    LAnd, // &&
    LOr,  // ||

    Eql, // ==
    Lss, // <
    Gtr, // >
    Not, // !

    Neq, // !=
    Leq, // <=
    Geq, // >=

    Assign, // = not an operator, it never yields an expression
}

impl TokenKind {
    /// Binding strength of a binary operator, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            TokenKind::LOr => 1,
            TokenKind::LAnd => 2,
            TokenKind::Eql
            | TokenKind::Neq
            | TokenKind::Lss
            | TokenKind::Leq
            | TokenKind::Gtr
            | TokenKind::Geq => 3,
            TokenKind::Add | TokenKind::Sub => 4,
            TokenKind::Mul | TokenKind::Quo | TokenKind::Rem => 5,
            _ => LOWEST_PREC,
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Else
                | TokenKind::End
                | TokenKind::If
                | TokenKind::Then
                | TokenKind::Let
                | TokenKind::Var
                | TokenKind::Val
        )
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Add
                | TokenKind::Sub
                | TokenKind::Mul
                | TokenKind::Quo
                | TokenKind::Rem
                | TokenKind::LAnd
                | TokenKind::LOr
                | TokenKind::Eql
                | TokenKind::Lss
                | TokenKind::Gtr
                | TokenKind::Not
                | TokenKind::Neq
                | TokenKind::Leq
                | TokenKind::Geq
        )
    }

    pub fn is_binary_op(self) -> bool {
        self.precedence() > LOWEST_PREC
    }

    pub fn is_unary_op(self) -> bool {
        matches!(self, TokenKind::Not | TokenKind::Add | TokenKind::Sub)
    }

    /// Literal values, identifiers excluded.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Bool | TokenKind::Int | TokenKind::Float | TokenKind::String
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Tokens that end a top-level expression.
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::EOF
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub pos: Position,
}

/// Tokens compare by kind and text only, never by position.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "EOF"),
            TokenKind::Error => write!(f, "{}", self.value),
            kind if kind.is_keyword() => write!(f, "<{}>", self.value),
            kind if kind.is_operator() || kind == TokenKind::Assign => {
                write!(f, "[{}]", self.value)
            }
            _ if self.value.chars().count() > 10 => {
                let head = self.value.chars().take(10).collect::<String>();
                write!(f, "{:?}...", head)
            }
            _ => write!(f, "{:?}", self.value),
        }
    }
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            value: value.into(),
            pos,
        }
    }

    pub fn precedence(&self) -> u8 {
        self.kind.precedence()
    }

    pub fn offset(&self) -> u32 {
        self.pos.0
    }

    /// Byte offset just past the token's text.
    pub fn end(&self) -> u32 {
        self.pos.0 + self.value.len() as u32
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}
