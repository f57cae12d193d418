//! Unit tests for error handling.
//!
//! This module contains tests for error types, tips and the conversion of a
//! failure into the terminal token.

use std::io;

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::{Position, Token};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: '@' },
        Position { line: 2, column: 7 },
    );

    assert_eq!(error.get_error_name(), "UnexpectedCharacter");
}

#[test]
fn test_error_position() {
    let pos = Position { line: 4, column: 2 };
    let error = Error::new(ErrorImpl::NothingToUnread, pos);

    assert_eq!(error.get_position(), &pos);
}

#[test]
fn test_io_error_conversion() {
    let internal: ErrorImpl = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();

    assert_eq!(
        internal,
        ErrorImpl::Io {
            message: String::from("pipe closed")
        }
    );
    assert_eq!(internal.to_string(), "i/o failure: pipe closed");
}

#[test]
fn test_into_token() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: '.' },
        Position { line: 1, column: 4 },
    );

    assert_eq!(
        error.into_token(),
        Token::Error {
            message: String::from("unexpected character '.'"),
            line: 1,
            column: 4,
        }
    );
}

#[test]
fn test_invalid_utf8_message() {
    let error = Error::new(ErrorImpl::InvalidUtf8 { offset: 3 }, Position::start());

    assert_eq!(error.get_error_name(), "InvalidUtf8");
    assert_eq!(
        error.to_string(),
        "[1:0] invalid UTF-8 sequence at byte offset 3"
    );
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: String::from("0x1.8"),
        },
        Position::start(),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert!(error.get_tip().to_string().contains("0x1.8"));
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::Io {
            message: String::from("disk on fire"),
        },
        Position::start(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: '\t' },
        Position::start(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.starts_with("`\\t`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_source_is_internal_error() {
    use std::error::Error as _;

    let error = Error::new(ErrorImpl::NothingToUnread, Position::start());
    assert_eq!(error.source().unwrap().to_string(), "nothing to unread");
}
