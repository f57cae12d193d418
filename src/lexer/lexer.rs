use std::io::Read;

use tracing::{debug, trace, warn};

use crate::{
    config::LexerConfig,
    errors::errors::{Error, ErrorImpl},
    Position, MK_EMIT, MK_HALT, MK_STEP,
};

use super::{
    source::{
        CharSet, Source, ALPHANUMERIC, DECIMAL_DIGITS, DECIMAL_POINT, HEX_DIGITS, HEX_PREFIX,
        SIGNS, WHITESPACE,
    },
    stream::{spawn, TokenStream},
    tokens::Token,
};

/// The recognizer a lexer runs next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Start,
    Number,
    Identifier,
    Space,
    Comment,
    EndOfInput,
}

/// What a recognizer produced: at most one token, and the state to run next
/// (`None` stops the machine).
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub token: Option<Token>,
    pub next: Option<State>,
}

pub struct Lexer<R> {
    source: Source<R>,
    state: Option<State>,
    config: LexerConfig,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Lexer<R> {
        Lexer::with_config(reader, LexerConfig::default())
    }

    pub fn with_config(reader: R, config: LexerConfig) -> Lexer<R> {
        Lexer {
            source: Source::new(reader),
            state: Some(State::Start),
            config,
        }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Position of the most recently consumed character.
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// True once the terminal token has been produced.
    pub fn is_halted(&self) -> bool {
        self.state.is_none()
    }

    /// Runs recognizers until one emits a token. Returns `None` once the
    /// terminal token has been handed out.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let state = self.state?;
            trace!(
                target: "kaleidoscope::lexer",
                ?state,
                position = %self.source.position(),
                "enter"
            );

            let step = match self.step(state) {
                Ok(step) => step,
                Err(err) => {
                    warn!(
                        target: "kaleidoscope::lexer",
                        error = %err,
                        tip = %err.get_tip(),
                        "lexing halted"
                    );
                    MK_HALT!(err.into_token())
                }
            };

            self.state = step.next;
            if let Some(token) = step.token {
                debug!(target: "kaleidoscope::lexer", %token, "emit");
                return Some(token);
            }
        }
    }

    fn step(&mut self, state: State) -> Result<Step, Error> {
        match state {
            State::Start => self.lex_start(),
            State::Number => self.lex_number(),
            State::Identifier => self.lex_identifier(),
            State::Space => self.lex_space(),
            State::Comment => self.lex_comment(),
            State::EndOfInput => self.lex_end_of_input(),
        }
    }

    fn lex_start(&mut self) -> Result<Step, Error> {
        let Some(c) = self.source.peek()? else {
            return Ok(MK_STEP!(State::EndOfInput));
        };

        let next = if c.is_ascii_digit() || SIGNS.contains(c) {
            State::Number
        } else if c.is_alphabetic() {
            State::Identifier
        } else if c.is_whitespace() {
            State::Space
        } else if c == '#' && self.config.comments {
            State::Comment
        } else {
            self.source.next()?;
            return Err(self.unexpected(c));
        };

        Ok(MK_STEP!(next))
    }

    fn lex_number(&mut self) -> Result<Step, Error> {
        let mut lexeme = String::new();

        let sign = self.source.accept(SIGNS)?;
        lexeme.extend(sign);

        let mut digits = DECIMAL_DIGITS;
        if let Some(zero) = self.source.accept(CharSet::Chars("0"))? {
            lexeme.push(zero);
            if let Some(x) = self.source.accept(HEX_PREFIX)? {
                lexeme.push(x);
                digits = HEX_DIGITS;
            }
        }

        let integral = self.source.accept_run(digits)?;
        // A sign must be followed by at least one digit.
        if let Some(sign) = sign {
            if lexeme.len() == 1 && integral.is_empty() {
                return Err(self.unexpected(sign));
            }
        }
        lexeme.push_str(&integral);

        if let Some(point) = self.source.accept(DECIMAL_POINT)? {
            lexeme.push(point);
            lexeme.push_str(&self.source.accept_run(digits)?);
        }

        Ok(MK_EMIT!(Token::Number { lexeme }))
    }

    fn lex_identifier(&mut self) -> Result<Step, Error> {
        let word = self.source.accept_run(ALPHANUMERIC)?;
        Ok(MK_EMIT!(Token::from_word(word)))
    }

    fn lex_space(&mut self) -> Result<Step, Error> {
        self.source.accept_run(WHITESPACE)?;
        Ok(MK_STEP!(State::Start))
    }

    fn lex_comment(&mut self) -> Result<Step, Error> {
        while let Some(c) = self.source.next()? {
            if c == '\n' || c == '\r' {
                break;
            }
        }
        Ok(MK_STEP!(State::Start))
    }

    fn lex_end_of_input(&mut self) -> Result<Step, Error> {
        match self.source.peek()? {
            None => Ok(MK_HALT!(Token::EndOfInput)),
            Some(_) => Ok(MK_STEP!(State::Start)),
        }
    }

    fn unexpected(&self, character: char) -> Error {
        Error::new(
            ErrorImpl::UnexpectedCharacter { character },
            self.source.position(),
        )
    }
}

impl<R: Read + Send + 'static> Lexer<R> {
    /// Moves this lexer onto a worker thread; see [`spawn`].
    pub fn spawn(self) -> TokenStream {
        spawn(self)
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Lexes `source` through its terminal token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source.as_bytes()).collect()
}
