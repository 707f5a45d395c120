//! Error types for sqlcanon

use thiserror::Error;

/// The result type for sqlcanon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during tokenization and binding.
///
/// The tokenizer is total over its input: malformed or truncated SQL is
/// closed implicitly at end of input, never rejected. The only failure
/// class left is an internal invariant violation, never bad input; the
/// binder has none at all, since its match over `TokenKind` is exhaustive.
#[derive(Debug, Error)]
pub enum Error {
    /// An internal tokenizer guard tripped (e.g. a scan ran past the
    /// trailing sentinel). Unreachable unless the tokenizer itself is buggy.
    #[error("tokenizer invariant violated at offset {offset}: {message}")]
    Tokenize { message: String, offset: usize },
}

impl Error {
    /// Create a tokenizer invariant error
    pub fn tokenize(message: impl Into<String>, offset: usize) -> Self {
        Error::Tokenize {
            message: message.into(),
            offset,
        }
    }
}
