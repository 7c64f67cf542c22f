use std::fmt::Display;

use thiserror::Error;

use crate::{line_column, Position};

/// Broad class of a failure, so callers can tell user errors from bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input at the character level.
    Scan,
    /// A token where no production accepts it.
    Syntax,
    /// The parser reached a tree shape it should never build.
    Internal,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::ScanError { .. } => ErrorKind::Scan,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::InvalidInsertion { .. } => ErrorKind::Syntax,
            ErrorImpl::InternalError { .. } => ErrorKind::Internal,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::ScanError { .. } => "ScanError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::InvalidInsertion { .. } => "InvalidInsertion",
            ErrorImpl::InternalError { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::ScanError { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss an operator?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::InvalidInsertion { token, .. } => ErrorTip::Suggestion(format!(
                "`{}` cannot follow the expression before it",
                token
            )),
            ErrorImpl::InternalError { .. } => ErrorTip::Suggestion(String::from(
                "This is a bug in the parser, not in the input",
            )),
        }
    }

    /// Renders `file:line:col: Name: message`, locating the offset in
    /// `source` only now.
    pub fn report(&self, source: &str) -> String {
        let (line, column) = line_column(source, self.position.0);
        format!(
            "{}:{}:{}: {}: {}",
            self.position.file(),
            line,
            column,
            self.get_error_name(),
            self.internal_error
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error,
            self.position.file(),
            self.position.0
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("{message}")]
    ScanError { message: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("{message} with token {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("invalid expression with token {token:?}: {message}")]
    InvalidInsertion { token: String, message: String },
    #[error("internal error: {message}")]
    InternalError { message: String },
}
