//! Lexical analysis module.
//!
//! This module contains the streaming lexer that converts a character stream
//! into a sequence of tokens for the parser. It handles:
//!
//! - Buffered reading with single-character lookahead and one-step unread
//! - Line/column tracking for error reporting
//! - A state machine that classifies numbers, identifiers, keywords,
//!   whitespace and comments
//! - Delivery of tokens in order, either pulled through an iterator or handed
//!   off from a worker thread
//!
//! Every stream ends with exactly one terminal token, `EndOfInput` or `Error`.

pub mod lexer;
pub mod number;
pub mod source;
pub mod stream;
pub mod tokens;
