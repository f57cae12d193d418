use std::{fmt::Display, io};

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
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

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Io { .. } => "Io",
            ErrorImpl::InvalidUtf8 { .. } => "InvalidUtf8",
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::NothingToUnread => "NothingToUnread",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::Io { .. } => ErrorTip::None,
            ErrorImpl::InvalidUtf8 { offset } => ErrorTip::Suggestion(format!(
                "Input must be UTF-8, check the encoding near byte {}",
                offset
            )),
            ErrorImpl::UnexpectedCharacter { character } => ErrorTip::Suggestion(format!(
                "`{}` cannot start a token, expected a number, a name or whitespace",
                character.escape_default()
            )),
            ErrorImpl::NothingToUnread => ErrorTip::Suggestion(String::from(
                "Only the most recently read character can be unread",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it too large for a float?",
                token
            )),
        }
    }

    /// Wraps this failure into the terminal token of a stream.
    pub fn into_token(self) -> Token {
        Token::Error {
            message: self.internal_error.to_string(),
            line: self.position.line,
            column: self.position.column,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.position, self.internal_error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

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

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("i/o failure: {message}")]
    Io { message: String },
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 { offset: u64 },
    #[error("unexpected character {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("nothing to unread")]
    NothingToUnread,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
}

impl From<io::Error> for ErrorImpl {
    fn from(error: io::Error) -> Self {
        ErrorImpl::Io {
            message: error.to_string(),
        }
    }
}
