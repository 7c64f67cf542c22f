//! Expression parsing.
//!
//! One expression is read token by token; every token that builds a node
//! is handed straight to the insertion algorithm, which keeps the partial
//! tree in shape. The parser itself only tracks what may come next and
//! how many parens are still open.

use log::{trace, warn};

use crate::{
    ast::{
        ast::Expr,
        expressions::{BasicLit, BinaryExpr, ParenExpr, UnaryExpr},
        insert::{close_paren, insert_expr, InsertError},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

/// What the last consumed token leaves the parser expecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing consumed yet.
    Start,
    /// An identifier, literal or closed paren; an operator, `)` or a
    /// terminator may follow.
    Operand,
    /// Right after `(`.
    OpenParen,
    /// Right after a unary operator.
    Unary,
    /// Right after a binary operator.
    Binary,
    Done,
}

/// The tree built so far and the number of parens it leaves open.
#[derive(Default)]
struct ExprBuilder {
    tree: Option<Expr>,
    depth: usize,
}

impl ExprBuilder {
    fn insert(&mut self, expr: Expr, token: &Token) -> Result<(), Error> {
        match insert_expr(self.tree.take(), expr) {
            Ok(tree) => {
                self.tree = Some(tree);
                Ok(())
            }
            Err(error) => Err(insertion_error(error, token)),
        }
    }

    fn close(&mut self, rparen: Token) -> Result<(), Error> {
        let token = rparen.clone();
        let tree = self
            .tree
            .as_mut()
            .ok_or_else(|| insertion_error(InsertError::NoOpenParen, &token))?;

        close_paren(tree, rparen).map_err(|error| insertion_error(error, &token))?;
        self.depth -= 1;
        Ok(())
    }
}

fn insertion_error(error: InsertError, token: &Token) -> Error {
    let error_impl = if error.is_internal() {
        ErrorImpl::InternalError {
            message: format!("{} at token {:?}", error, token.value),
        }
    } else {
        ErrorImpl::InvalidInsertion {
            token: token.value.clone(),
            message: error.to_string(),
        }
    };
    Error::new(error_impl, token.pos.clone())
}

fn unexpected(token: Token, message: &str) -> Error {
    Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: token.value,
            message: String::from(message),
        },
        token.pos,
    )
}

/// Whether a token of `kind` can begin an expression.
pub fn starts_expr(kind: TokenKind) -> bool {
    kind == TokenKind::Identifier
        || kind == TokenKind::LeftParen
        || kind.is_literal()
        || kind.is_unary_op()
}

/// Parses one expression, up to and including its terminator.
///
/// The expression ends at a newline, `;` or EOF while no paren is open.
/// Inside parens and after a binary operator or `(`, line breaks are
/// skipped so an expression may span lines. EOF is not consumed for good:
/// the buffer keeps returning it.
pub fn parse_start_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut builder = ExprBuilder::default();
    let mut state = State::Start;

    while state != State::Done {
        trace!("expression state {:?}, open parens {}", state, builder.depth);

        state = match state {
            State::Start => {
                let token = parser.next()?;
                begin_operand(parser, &mut builder, token, "invalid start of expression")?
            }
            State::Operand => parse_after_operand(parser, &mut builder)?,
            State::OpenParen => {
                let token = parser.next_non_newline()?;
                if token.kind == TokenKind::RightParen {
                    warn!("empty parentheses at {}:{}", token.pos.file(), token.offset());
                    builder.close(token)?;
                    State::Operand
                } else {
                    begin_operand(parser, &mut builder, token, "expected an expression after '('")?
                }
            }
            State::Unary => {
                let token = parser.next()?;
                begin_operand(parser, &mut builder, token, "unary operator without an operand")?
            }
            State::Binary => {
                let token = parser.next_non_newline()?;
                begin_operand(
                    parser,
                    &mut builder,
                    token,
                    "binary operator without a right operand",
                )?
            }
            State::Done => State::Done,
        };
    }

    builder.tree.ok_or_else(|| {
        Error::new(
            ErrorImpl::InternalError {
                message: String::from("expression finished without a tree"),
            },
            parser.get_position(),
        )
    })
}

/// Builds the node `token` starts and inserts it. Errors with `message`
/// if `token` cannot start an operand.
fn begin_operand(
    parser: &mut Parser,
    builder: &mut ExprBuilder,
    token: Token,
    message: &str,
) -> Result<State, Error> {
    match token.kind {
        TokenKind::Identifier => {
            let ident = parser.new_ident(token.clone());
            builder.insert(Expr::Ident(ident), &token)?;
            Ok(State::Operand)
        }
        kind if kind.is_literal() => {
            builder.insert(Expr::BasicLit(BasicLit { token: token.clone() }), &token)?;
            Ok(State::Operand)
        }
        kind if kind.is_unary_op() => {
            builder.insert(Expr::Unary(UnaryExpr::new(token.clone())), &token)?;
            Ok(State::Unary)
        }
        TokenKind::LeftParen => {
            builder.insert(Expr::Paren(ParenExpr::new(token.clone())), &token)?;
            builder.depth += 1;
            Ok(State::OpenParen)
        }
        _ => Err(unexpected(token, message)),
    }
}

fn parse_after_operand(parser: &mut Parser, builder: &mut ExprBuilder) -> Result<State, Error> {
    let token = parser.next()?;

    match token.kind {
        kind if kind.is_binary_op() => {
            builder.insert(Expr::Binary(BinaryExpr::new(token.clone())), &token)?;
            Ok(State::Binary)
        }
        TokenKind::Newline if builder.depth > 0 => Ok(State::Operand),
        TokenKind::RightParen if builder.depth == 0 => Err(unexpected(token, "unmatched ')'")),
        TokenKind::RightParen => {
            builder.close(token)?;
            Ok(State::Operand)
        }
        kind if kind.is_terminator() => {
            if builder.depth > 0 {
                return Err(unexpected(token, "unclosed parenthesis"));
            }
            Ok(State::Done)
        }
        TokenKind::Not => Err(unexpected(token, "'!' cannot follow an operand")),
        kind if starts_expr(kind) => {
            // a second operand; the insertion rejects it with the reason
            begin_operand(parser, builder, token.clone(), "missing operator")?;
            Err(unexpected(token, "missing operator"))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.pos,
        )),
    }
}
