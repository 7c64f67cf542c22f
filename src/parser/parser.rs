//! Token buffer and top-level driver.
//!
//! The parser drains the lexer up front into `items` and walks it with a
//! cursor, so it can step back or look ahead freely. Comments stay in the
//! buffer for `backup` arithmetic but are skipped by every cursor method
//! and copied once into the file's comment list.

use std::rc::Rc;

use log::debug;

use crate::{
    ast::{
        ast::{Comment, File},
        expressions::Ident,
        scope::Scope,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::expr::{parse_start_expr, starts_expr};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Every scanned token, comments included
    items: Vec<Token>,
    /// Index of the next token `next` returns
    pos: usize,
    /// The file being built; its scope resolves identifiers
    file: File,
}

impl Parser {
    /// Scans `input` completely and prepares an empty `File` named `name`.
    pub fn new(name: &str, input: &str) -> Self {
        let items = tokenize(input.to_string(), Some(name.to_string()));

        let mut file = File::new(Rc::new(name.to_string()));
        file.comments = items
            .iter()
            .filter(|token| token.kind.is_comment())
            .map(|token| Comment {
                slash: token.offset(),
                text: token.value.clone(),
            })
            .collect();

        Parser {
            items,
            pos: 0,
            file,
        }
    }

    fn eof(&self) -> Token {
        let end = self.items.last().map_or(0, |token| token.end());
        Token::new(
            TokenKind::EOF,
            "",
            Position(end, Rc::clone(&self.file.name)),
        )
    }

    /// Advances past comments and returns the next token.
    ///
    /// Once EOF has been returned, every further call returns it again.
    /// A scan error token becomes a `ScanError`.
    pub fn next(&mut self) -> Result<Token, Error> {
        while let Some(token) = self.items.get(self.pos) {
            self.pos += 1;
            if token.kind.is_comment() {
                continue;
            }
            if token.is_error() {
                return Err(Error::new(
                    ErrorImpl::ScanError {
                        message: token.value.clone(),
                    },
                    token.pos.clone(),
                ));
            }
            return Ok(token.clone());
        }

        Ok(self.eof())
    }

    /// Like `next`, skipping line breaks as well.
    pub fn next_non_newline(&mut self) -> Result<Token, Error> {
        loop {
            let token = self.next()?;
            if token.kind != TokenKind::Newline {
                return Ok(token);
            }
        }
    }

    /// Steps back over the last token `next` returned.
    pub fn backup(&mut self) -> Result<(), Error> {
        loop {
            if self.pos == 0 {
                return Err(Error::new(
                    ErrorImpl::InternalError {
                        message: String::from("backup before the first token"),
                    },
                    Position(0, Rc::clone(&self.file.name)),
                ));
            }
            self.pos -= 1;
            if !self.items[self.pos].kind.is_comment() {
                return Ok(());
            }
        }
    }

    /// Returns the `k`-th token ahead without moving; `peek(0)` is what
    /// `next` would return.
    pub fn peek(&self, k: usize) -> Result<&Token, Error> {
        self.items[self.pos.min(self.items.len())..]
            .iter()
            .filter(|token| !token.kind.is_comment())
            .nth(k)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::InternalError {
                        message: format!("peek past the end of input by {}", k),
                    },
                    self.get_position(),
                )
            })
    }

    /// Position of the next unread token, or of the end of input.
    pub fn get_position(&self) -> Position {
        match self.items.get(self.pos) {
            Some(token) => token.pos.clone(),
            None => self.eof().pos,
        }
    }

    /// Builds an identifier node, binding it to the innermost declaration
    /// of its name. Unbound identifiers are recorded on the file.
    pub fn new_ident(&mut self, token: Token) -> Ident {
        let mut ident = Ident::new(token);

        let mut scope = Some(&self.file.scope);
        while let Some(current) = scope {
            if let Some(obj) = current.lookup(ident.name()) {
                ident.obj = Some(obj);
                return ident;
            }
            scope = current.outer.as_deref();
        }

        self.file.unresolved.push(ident.clone());
        ident
    }

    /// Parses top-level expressions until EOF.
    pub fn parse_file(&mut self) -> Result<(), Error> {
        loop {
            let token = self.next_non_newline()?;

            if token.kind == TokenKind::EOF {
                break;
            }

            if !starts_expr(token.kind) {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: token.value,
                        message: String::from("invalid statement"),
                    },
                    token.pos,
                ));
            }

            self.backup()?;
            let expr = parse_start_expr(self)?;
            debug!("parsed expression {}", expr);
            self.file.list.push(expr);
        }

        Ok(())
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

/// Parses `input` into a `File` named `name`.
///
/// This is the main entry point for parsing. The first scan or syntax
/// error aborts the parse and is returned.
pub fn parse(name: &str, input: &str) -> Result<File, Error> {
    parse_with_scope(name, input, Scope::new(None))
}

/// Parses with names already declared in `scope`, so identifiers naming
/// them resolve instead of landing in `File::unresolved`.
pub fn parse_with_scope(name: &str, input: &str, scope: Scope) -> Result<File, Error> {
    let mut parser = Parser::new(name, input);
    parser.file.scope = scope;

    parser.parse_file()?;

    let file = parser.into_file();
    debug!(
        "parsed {}: {} expressions, {} unresolved, {} comments",
        file.name,
        file.list.len(),
        file.unresolved.len(),
        file.comments.len()
    );
    Ok(file)
}
