use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("def", Keyword::Def);
        map.insert("extern", Keyword::Extern);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Def,
    Extern,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Def => "def",
            Keyword::Extern => "extern",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Number,
    Identifier,
    Keyword,
    EndOfInput,
    Error,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A classified lexeme.
///
/// `EndOfInput` and `Error` are terminal: a stream carries exactly one of
/// them, as its last element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Raw numeric text, unconverted.
    Number { lexeme: String },
    Identifier { name: String },
    Keyword(Keyword),
    EndOfInput,
    Error {
        message: String,
        line: u32,
        column: u32,
    },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number { .. } => TokenKind::Number,
            Token::Identifier { .. } => TokenKind::Identifier,
            Token::Keyword(_) => TokenKind::Keyword,
            Token::EndOfInput => TokenKind::EndOfInput,
            Token::Error { .. } => TokenKind::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Token::EndOfInput | Token::Error { .. })
    }

    /// The source text this token was lexed from, if it has any.
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Token::Number { lexeme } => Some(lexeme),
            Token::Identifier { name } => Some(name),
            Token::Keyword(keyword) => Some(keyword.as_str()),
            Token::EndOfInput | Token::Error { .. } => None,
        }
    }

    /// Classifies a word: keywords win over identifiers.
    pub fn from_word(word: String) -> Token {
        match RESERVED_LOOKUP.get(word.as_str()) {
            Some(keyword) => Token::Keyword(*keyword),
            None => Token::Identifier { name: word },
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number { lexeme } => write!(f, "{}({})", self.kind(), lexeme),
            Token::Identifier { name } => write!(f, "{}({})", self.kind(), name),
            Token::Keyword(keyword) => write!(f, "{}({:?})", self.kind(), keyword),
            Token::EndOfInput => write!(f, "{}", self.kind()),
            Token::Error {
                message,
                line,
                column,
            } => write!(f, "{}({}:{}: {})", self.kind(), line, column, message),
        }
    }
}
