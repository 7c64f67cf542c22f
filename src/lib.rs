#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into the source plus the name of the file it belongs to.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    pub fn file(&self) -> &str {
        &self.1
    }
}

/// Finds the line holding `position`.
///
/// Returns the 1-based line number, the text of that line and the byte
/// offset of `position` within it. Positions at or past the end of the
/// source land on the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        if !line.ends_with('\n') {
            // unterminated last line, pos sits right after it
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

/// 1-based line and 1-based byte column of `position`.
pub fn line_column(source: &str, position: u32) -> (usize, usize) {
    let (line, _, column) = get_line_at_position(source, position);
    (line, column + 1)
}
