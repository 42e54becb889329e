use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    /// The lexer hit a character that starts no valid token.
    #[error("unrecognized character '{ch}' at position {position}")]
    Lex { ch: char, position: usize },

    /// The parser hit a grammar violation: unexpected token, unmatched
    /// parenthesis, trailing input, or a malformed comparison value.
    #[error("syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("record ingestion error: {0}")]
    Ingest(String),
}

impl Error {
    /// Shorthand for a syntax error at a token position.
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        Error::Syntax {
            message: message.into(),
            position,
        }
    }
}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
