//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_BINARY!` - Builds a BinaryExpr node with both operands filled, for tests

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's source text
/// * `$pos` - The Position of its first byte
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), Position::null());
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $pos:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            pos: $pos,
        }
    };
}

/// Builds a complete `Expr::Binary` from a left operand, an operator kind
/// with its text, and a right operand. Positions are null.
///
/// ```ignore
/// let sum = MK_BINARY!(lit("1"), TokenKind::Add, "+", lit("2"));
/// ```
#[macro_export]
macro_rules! MK_BINARY {
    ($x:expr, $kind:expr, $op:literal, $y:expr) => {
        $crate::ast::ast::Expr::Binary($crate::ast::expressions::BinaryExpr {
            x: Some(Box::new($x)),
            op: $crate::MK_TOKEN!($kind, String::from($op), $crate::Position::null()),
            y: Some(Box::new($y)),
        })
    };
}
