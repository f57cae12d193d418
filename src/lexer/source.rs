//! Buffered character source with one-step backtracking.
//!
//! Wraps any reader, decodes UTF-8 one scalar at a time and keeps the
//! position of the most recently consumed character.

use std::io::{self, BufReader, Read};

use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// A set of characters accepted by [`Source::accept`] and [`Source::accept_run`].
#[derive(Clone, Copy)]
pub enum CharSet<'a> {
    /// Exactly the characters listed.
    Chars(&'a str),
    /// Every character the classifier admits.
    Class(fn(char) -> bool),
}

impl CharSet<'_> {
    pub fn contains(&self, c: char) -> bool {
        match self {
            CharSet::Chars(chars) => chars.contains(c),
            CharSet::Class(classify) => classify(c),
        }
    }
}

impl<'a> From<&'a str> for CharSet<'a> {
    fn from(chars: &'a str) -> Self {
        CharSet::Chars(chars)
    }
}

pub const SIGNS: CharSet<'static> = CharSet::Chars("+-");
pub const DECIMAL_DIGITS: CharSet<'static> = CharSet::Chars("0123456789");
pub const HEX_DIGITS: CharSet<'static> = CharSet::Chars("0123456789abcdefABCDEF");
pub const HEX_PREFIX: CharSet<'static> = CharSet::Chars("xX");
pub const DECIMAL_POINT: CharSet<'static> = CharSet::Chars(".");
pub const ALPHANUMERIC: CharSet<'static> = CharSet::Class(char::is_alphanumeric);
pub const WHITESPACE: CharSet<'static> = CharSet::Class(char::is_whitespace);

/// The last forward step, kept so it can be undone.
#[derive(Debug, Clone, Copy)]
struct Consumed {
    character: char,
    before: Position,
}

pub struct Source<R> {
    reader: BufReader<R>,
    /// Characters already decoded but not yet consumed, top of stack first.
    pending: Vec<char>,
    last: Option<Consumed>,
    position: Position,
    bytes_read: u64,
}

impl<R: Read> Source<R> {
    pub fn new(reader: R) -> Self {
        Source {
            reader: BufReader::new(reader),
            pending: Vec::with_capacity(2),
            last: None,
            position: Position::start(),
            bytes_read: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Returns the next character without consuming it. `None` marks the end
    /// of input.
    pub fn peek(&mut self) -> Result<Option<char>, Error> {
        if let Some(c) = self.pending.last() {
            return Ok(Some(*c));
        }

        match self.read_char()? {
            Some(c) => {
                self.pending.push(c);
                Ok(Some(c))
            }
            None => Ok(None),
        }
    }

    /// Consumes the next character. At end of input nothing is consumed, so
    /// the character available to [`Source::back`] is unchanged.
    pub fn next(&mut self) -> Result<Option<char>, Error> {
        let c = match self.pending.pop() {
            Some(c) => c,
            None => match self.read_char()? {
                Some(c) => c,
                None => return Ok(None),
            },
        };

        self.last = Some(Consumed {
            character: c,
            before: self.position,
        });
        self.position.advance(c);
        Ok(Some(c))
    }

    /// Un-consumes the most recently consumed character, restoring the
    /// position held before it was read.
    pub fn back(&mut self) -> Result<(), Error> {
        let Some(consumed) = self.last.take() else {
            return Err(Error::new(ErrorImpl::NothingToUnread, self.position));
        };

        trace!(target: "kaleidoscope::lexer", character = ?consumed.character, "unread");
        self.pending.push(consumed.character);
        self.position = consumed.before;
        Ok(())
    }

    /// Consumes the next character only if it belongs to `valid`.
    pub fn accept(&mut self, valid: CharSet<'_>) -> Result<Option<char>, Error> {
        match self.next()? {
            Some(c) if valid.contains(c) => Ok(Some(c)),
            Some(_) => {
                self.back()?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Consumes characters while they belong to `valid` and returns them.
    pub fn accept_run(&mut self, valid: CharSet<'_>) -> Result<String, Error> {
        let mut run = String::new();
        while let Some(c) = self.accept(valid)? {
            run.push(c);
        }
        Ok(run)
    }

    fn read_char(&mut self) -> Result<Option<char>, Error> {
        let offset = self.bytes_read;
        let mut bytes = [0u8; 4];

        if !self.read_lead_byte(&mut bytes[0])? {
            return Ok(None);
        }

        let width = utf8_sequence_length(bytes[0]).ok_or_else(|| self.invalid_utf8(offset))?;

        if let Err(err) = self.reader.read_exact(&mut bytes[1..width]) {
            return Err(match err.kind() {
                io::ErrorKind::UnexpectedEof => self.invalid_utf8(offset),
                _ => Error::new(err.into(), self.position),
            });
        }
        self.bytes_read += width as u64 - 1;

        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|decoded| decoded.chars().next())
            .map(Some)
            .ok_or_else(|| self.invalid_utf8(offset))
    }

    /// Reads one byte; `false` means the reader is exhausted.
    fn read_lead_byte(&mut self, byte: &mut u8) -> Result<bool, Error> {
        loop {
            match self.reader.read(std::slice::from_mut(byte)) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(true);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::new(err.into(), self.position)),
            }
        }
    }

    fn invalid_utf8(&self, offset: u64) -> Error {
        Error::new(ErrorImpl::InvalidUtf8 { offset }, self.position)
    }
}

fn utf8_sequence_length(lead_byte: u8) -> Option<usize> {
    match lead_byte {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}
