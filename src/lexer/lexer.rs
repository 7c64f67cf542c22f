use std::rc::Rc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{Position, MK_TOKEN};

use super::tokens::{Token, TokenKind, OPERATOR_LOOKUP, RESERVED_LOOKUP};

lazy_static! {
    static ref HEX_INT: Regex = Regex::new("^0[xX][0-9a-fA-F]+").unwrap();
    static ref OCT_INT: Regex = Regex::new("^0[cC][0-7]+").unwrap();
    static ref BIN_INT: Regex = Regex::new("^0[bB][01]+").unwrap();
    static ref FLOAT: Regex =
        Regex::new("^[0-9]+(\\.[0-9]*([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)").unwrap();
    static ref DECIMAL_INT: Regex = Regex::new("^[0-9]+").unwrap();
}

/// Characters that may start or continue an operator.
const OPERATOR_CHARS: &str = "+-*/%&|=><!";

/// Scanner states. Each step consumes input from the current state and
/// names the next one; `Done` ends the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Space,
    EndOfLine,
    Number,
    Identifier,
    Operator,
    LineComment,
    BlockComment,
    String,
    Done,
}

/// Pull-based scanner over a source string.
///
/// Tokens come out in source order through `Iterator`. The stream ends
/// with exactly one `EOF` token, or with a single `Error` token when the
/// input cannot be scanned.
pub struct Lexer {
    source: String,
    file: Rc<String>,
    state: State,
    /// start of the pending token
    start: usize,
    pos: usize,
    /// width of the last char read, for `backup`
    width: usize,
    paren_depth: u32,
    pending: Option<Token>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            file: file_name,
            state: State::Start,
            start: 0,
            pos: 0,
            width: 0,
            paren_depth: 0,
            pending: None,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        match self.source[self.pos..].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Steps back over the last char read. Only valid once per `next_char`.
    fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn emit(&mut self, kind: TokenKind) {
        self.pending = Some(MK_TOKEN!(
            kind,
            String::from(&self.source[self.start..self.pos]),
            Position(self.start as u32, Rc::clone(&self.file))
        ));
        self.start = self.pos;
    }

    /// Emits an error token and stops the scan.
    fn errorf(&mut self, message: String) -> State {
        self.pending = Some(MK_TOKEN!(
            TokenKind::Error,
            message,
            Position(self.start as u32, Rc::clone(&self.file))
        ));
        State::Done
    }

    fn step(&mut self, state: State) -> State {
        match state {
            State::Start => self.lex_start(),
            State::Space => self.lex_space(),
            State::EndOfLine => self.lex_end_of_line(),
            State::Number => self.lex_number(),
            State::Identifier => self.lex_identifier(),
            State::Operator => self.lex_operator(),
            State::LineComment => self.lex_line_comment(),
            State::BlockComment => self.lex_block_comment(),
            State::String => self.lex_string(),
            State::Done => State::Done,
        }
    }

    fn lex_start(&mut self) -> State {
        match self.next_char() {
            None => {
                self.emit(TokenKind::EOF);
                State::Done
            }
            Some(c) if is_space(c) => State::Space,
            Some(c) if is_end_of_line(c) => State::EndOfLine,
            Some(c) if c.is_ascii_digit() => {
                self.backup();
                State::Number
            }
            Some(c) if is_alpha_numeric(c) => {
                self.backup();
                State::Identifier
            }
            Some(c) if is_operator_char(c) => {
                self.backup();
                State::Operator
            }
            Some('"') => State::String,
            Some('(') => {
                self.paren_depth += 1;
                self.emit(TokenKind::LeftParen);
                State::Start
            }
            Some(')') => {
                if self.paren_depth == 0 {
                    return self.errorf(String::from("unexpected right paren ')'"));
                }
                self.paren_depth -= 1;
                self.emit(TokenKind::RightParen);
                State::Start
            }
            Some(';') => {
                self.emit(TokenKind::Semicolon);
                State::Start
            }
            Some(_) => {
                let text = String::from(&self.source[self.start..self.pos]);
                self.errorf(format!("unknown syntax: {:?}", text))
            }
        }
    }

    fn lex_space(&mut self) -> State {
        while self.peek_char().is_some_and(is_space) {
            self.next_char();
        }
        self.ignore();
        State::Start
    }

    /// A run of line breaks becomes one `Newline` token.
    fn lex_end_of_line(&mut self) -> State {
        while self.peek_char().is_some_and(is_end_of_line) {
            self.next_char();
        }
        self.emit(TokenKind::Newline);
        State::Start
    }

    fn lex_number(&mut self) -> State {
        let scanned = {
            let rest = &self.source[self.pos..];
            if let Some(m) = HEX_INT
                .find(rest)
                .or_else(|| OCT_INT.find(rest))
                .or_else(|| BIN_INT.find(rest))
            {
                Some((TokenKind::Int, m.end()))
            } else if let Some(m) = FLOAT.find(rest) {
                Some((TokenKind::Float, m.end()))
            } else {
                DECIMAL_INT.find(rest).map(|m| (TokenKind::Int, m.end()))
            }
        };

        let Some((kind, len)) = scanned else {
            self.next_char();
            let text = String::from(&self.source[self.start..self.pos]);
            return self.errorf(format!("bad number syntax: {:?}", text));
        };
        self.pos += len;

        // A number must not run straight into a letter or digit.
        if self.peek_char().is_some_and(is_alpha_numeric) {
            self.next_char();
            let text = String::from(&self.source[self.start..self.pos]);
            return self.errorf(format!("bad number syntax: {:?}", text));
        }

        self.emit(kind);
        State::Start
    }

    fn lex_identifier(&mut self) -> State {
        while self.peek_char().is_some_and(is_alpha_numeric) {
            self.next_char();
        }

        let kind = {
            let word = &self.source[self.start..self.pos];
            if let Some(kind) = RESERVED_LOOKUP.get(word) {
                *kind
            } else if word == "true" || word == "false" {
                TokenKind::Bool
            } else {
                TokenKind::Identifier
            }
        };

        self.emit(kind);
        State::Start
    }

    /// Scans one operator, longest match first, so `*-` yields `*` then `-`.
    fn lex_operator(&mut self) -> State {
        let rest = &self.source[self.pos..];
        if rest.starts_with("//") {
            return State::LineComment;
        }
        if rest.starts_with("/*") {
            return State::BlockComment;
        }

        let matched = [2, 1]
            .iter()
            .filter_map(|&n| rest.get(..n))
            .find_map(|op| OPERATOR_LOOKUP.get(op).map(|kind| (*kind, op.len())));

        match matched {
            Some((kind, len)) => {
                self.pos += len;
                self.emit(kind);
                State::Start
            }
            None => {
                let run = rest
                    .chars()
                    .take_while(|c| is_operator_char(*c))
                    .collect::<String>();
                self.pos += run.len();
                self.errorf(format!("bad operator: {:?}", run))
            }
        }
    }

    /// `//` up to, not including, the line break.
    fn lex_line_comment(&mut self) -> State {
        while self.peek_char().is_some_and(|c| !is_end_of_line(c)) {
            self.next_char();
        }
        self.emit(TokenKind::LineComment);
        State::Start
    }

    fn lex_block_comment(&mut self) -> State {
        let body = self.pos + 2;
        match self.source[body..].find("*/") {
            Some(end) => {
                self.pos = body + end + 2;
                self.emit(TokenKind::BlockComment);
                State::Start
            }
            None => {
                self.pos = self.source.len();
                self.errorf(String::from("unterminated block comment"))
            }
        }
    }

    /// Double-quoted literal; the opening quote is already consumed.
    fn lex_string(&mut self) -> State {
        loop {
            match self.next_char() {
                Some('"') => {
                    self.emit(TokenKind::String);
                    return State::Start;
                }
                Some('\\') => match self.next_char() {
                    Some(c) if !is_end_of_line(c) => {}
                    _ => return self.errorf(String::from("unterminated string literal")),
                },
                Some(c) if is_end_of_line(c) => {
                    return self.errorf(String::from("unterminated string literal"))
                }
                Some(_) => {}
                None => return self.errorf(String::from("unterminated string literal")),
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.take() {
                return Some(token);
            }
            if self.state == State::Done {
                return None;
            }
            self.state = self.step(self.state);
        }
    }
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_end_of_line(c: char) -> bool {
    c == '\r' || c == '\n'
}

fn is_alpha_numeric(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

/// Scans the whole source eagerly.
///
/// The result ends with one `EOF` token, or with one `Error` token
/// carrying the diagnostic if scanning failed.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let tokens = Lexer::new(source, file).collect::<Vec<Token>>();
    debug!("scanned {} tokens", tokens.len());
    tokens
}
