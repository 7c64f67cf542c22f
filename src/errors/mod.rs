//! Error types for scanning and parsing.
//!
//! Every failure carries the source position where it happened and is
//! returned to the caller; nothing in the library prints or exits.
//!
//! - Scan errors come from an `Error` token in the stream
//! - Syntax errors come from tokens no production accepts
//! - Internal errors mark impossible tree shapes in the parser

pub mod errors;
