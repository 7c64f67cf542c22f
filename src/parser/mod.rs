//! Parser module for building the expression tree of a source file.
//!
//! The parser drains the lexer into a rewindable token buffer, then reads
//! one top-level expression per statement. It does not recurse on operator
//! precedence; every scanned node goes to the insertion algorithm in
//! `ast::insert`, which reshapes the partial tree as it grows.
//!
//! - `parser`: token buffer, identifier resolution, `parse` entry points
//! - `expr`: the per-expression state machine

pub mod expr;
pub mod parser;
