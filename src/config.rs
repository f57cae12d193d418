//! Lexer configuration.
//!
//! Plain data; every field has a default so a partial document deserializes
//! into a complete config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Skip `#` through the end of the line.
    pub comments: bool,
    /// Tokens buffered between a spawned lexer and its consumer. Zero makes
    /// every hand-off a rendezvous.
    pub channel_capacity: usize,
    /// Upper bound on how long a [`TokenStream`](crate::TokenStream) iterator
    /// waits for the next token.
    pub recv_timeout: Option<Duration>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            comments: true,
            channel_capacity: 0,
            recv_timeout: None,
        }
    }
}

impl LexerConfig {
    pub fn without_comments(mut self) -> Self {
        self.comments = false;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LexerConfig::default();
        assert!(config.comments);
        assert_eq!(config.channel_capacity, 0);
        assert_eq!(config.recv_timeout, None);
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: LexerConfig = serde_json::from_str(r#"{ "comments": false }"#).unwrap();
        assert!(!config.comments);
        assert_eq!(config.channel_capacity, 0);
    }

    #[test]
    fn test_config_round_trips_timeout() {
        let config = LexerConfig::default()
            .with_channel_capacity(1)
            .with_recv_timeout(Duration::from_millis(250));
        let json = serde_json::to_string(&config).unwrap();
        let back: LexerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
