//! Error types for tagalign.

use thiserror::Error;

/// Result type for tagalign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tagalign operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Example record failed boundary validation.
    #[error("Invalid example: {0}")]
    Validation(String),

    /// Caller-supplied label table is malformed.
    #[error("Invalid label table: {0}")]
    Label(String),

    /// Example parsing error (JSON / JSONL).
    #[error("Parse error: {0}")]
    Parse(String),

    /// External tokenizer failed. The built-in Unicode strategy never
    /// produces this.
    #[error("Tokenization failed: {0}")]
    Tokenize(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a label table error.
    pub fn label(msg: impl Into<String>) -> Self {
        Error::Label(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a tokenization error.
    pub fn tokenize(msg: impl Into<String>) -> Self {
        Error::Tokenize(msg.into())
    }
}
