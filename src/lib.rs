#![allow(clippy::module_inception)]

use std::fmt::Display;

pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

pub use config::LexerConfig;
pub use errors::errors::{Error, ErrorImpl, ErrorTip};
pub use lexer::lexer::{tokenize, Lexer};
pub use lexer::stream::{spawn, StreamError, TokenStream};
pub use lexer::tokens::{Keyword, Token, TokenKind};

/// A line/column pair naming the most recently consumed character.
///
/// Lines start at 1. The column is 0 until a character has been consumed on
/// the current line, after which it is the 1-based column of that character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn start() -> Self {
        Position { line: 1, column: 0 }
    }

    /// Moves forward over `c`. Both `\n` and `\r` count as a line break.
    pub fn advance(&mut self, c: char) {
        if c == '\n' || c == '\r' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns the text of `line` (1-based) without its terminator.
///
/// Lines are split the same way the lexer counts them, so `\r\n` yields an
/// empty line between the two breaks.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source.split(['\n', '\r']).nth((line - 1) as usize)
}

/// Renders an `Error` token against the source it came from.
///
/// ```text
/// error: unexpected character '@'
///   |
/// 1 | def @
///   |     ^
/// ```
///
/// Returns `None` for non-error tokens or positions outside the source.
pub fn display_error(source: &str, token: &Token) -> Option<String> {
    let Token::Error {
        message,
        line,
        column,
    } = token
    else {
        return None;
    };

    render_snippet(source, format!("error: {message}"), *line, *column)
}

/// Renders an [`Error`] with its name and, when there is one, its tip.
///
/// ```text
/// error: UnexpectedCharacter (`@` cannot start a token, ...)
///   |
/// 1 | def @
///   |     ^
/// ```
pub fn display_internal_error(source: &str, error: &Error) -> Option<String> {
    let heading = match error.get_tip() {
        ErrorTip::None => format!("error: {}", error.get_error_name()),
        tip => format!("error: {} ({})", error.get_error_name(), tip),
    };
    let position = error.get_position();

    render_snippet(source, heading, position.line, position.column)
}

fn render_snippet(source: &str, heading: String, line: u32, column: u32) -> Option<String> {
    let line_text = get_line_at_position(source, line)?;
    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    // Tabs are copied so the caret lines up however the terminal expands them.
    let offset = column.saturating_sub(1) as usize;
    let mut gap: String = line_text
        .chars()
        .take(offset)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let missing = offset.saturating_sub(gap.chars().count());
    gap.extend(std::iter::repeat(' ').take(missing));

    Some(format!(
        "{heading}\n{:>padding$}\n{line_string} | {line_text}\n{:>padding$} {gap}^",
        "|", "|"
    ))
}
