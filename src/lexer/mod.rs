//! Lexical analysis for the expression language.
//!
//! The lexer turns source text into tokens in a single pass with one
//! character of lookahead. It handles:
//!
//! - Integers (decimal, `0x` hex, `0c` octal, `0b` binary) and floats
//! - Identifiers, keywords and the `true`/`false` literals
//! - Operators, parentheses, semicolons and string literals
//! - Line and block comments, which are kept as tokens
//! - Newline runs, folded into one token each

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
