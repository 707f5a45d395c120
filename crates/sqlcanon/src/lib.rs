//! sqlcanon — SQL statement tokenization and canonicalization
//!
//! Statements that differ only in literal values or cosmetic detail
//! (case, whitespace, comments, partition names, numeric suffixes inside
//! identifiers) produce near-duplicate cursors in a shared statement
//! cache. This library collapses such statements to one canonical "bound"
//! form so a driver can group cursor-cache rows and expose the offending
//! client patterns.
//!
//! # Architecture
//!
//! The library follows a pipeline architecture:
//! 1. **Tokenizer** - Converts a SQL statement to a covering token stream
//! 2. **Partition tagger** - Marks identifiers that name a partition
//! 3. **Binder** - Emits the canonical string from the token stream
//!
//! The tokenizer is total: truncated and malformed statements tokenize
//! without error, with unterminated sections closed at end of input.
//! A driver enumerating a cursor cache is expected to truncate statements
//! to roughly [`MAX_BOUND_LEN`] before calling in; canonical forms that
//! would exceed the cap come back as [`TOO_LONG_SENTINEL`] rather than a
//! truncated string.
//!
//! # Example
//!
//! ```
//! use sqlcanon::{bound_stmt, BinderConfig};
//!
//! let canonical = bound_stmt(
//!     "SELECT * FROM T WHERE ID = +1.2e+1 AND Y = 'PIPPO' AND Z = :B1",
//!     &BinderConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(canonical, "select*from t where id=:n and y=:s and z=:b");
//! ```

pub mod binder;
pub mod error;
pub mod keywords;
pub mod partition;
pub mod tokens;

pub use binder::{Binder, BinderConfig, BoundStatement, MAX_BOUND_LEN, TOO_LONG_SENTINEL};
pub use error::{Error, Result};
pub use keywords::{initialize_keywords, KeywordSet};
pub use partition::partition_names;
pub use tokens::{render_tokens, Token, TokenKind, Tokenizer};

use std::sync::atomic::{AtomicBool, Ordering};

static LOG: AtomicBool = AtomicBool::new(false);

/// Toggle diagnostic `tracing` output for tokenization and binding.
///
/// Advisory only: the flag gates a handful of debug lines and has no
/// effect on results. Process-wide.
pub fn set_log(enabled: bool) {
    LOG.store(enabled, Ordering::Relaxed);
}

pub(crate) fn log_enabled() -> bool {
    LOG.load(Ordering::Relaxed)
}

/// Tokenize a statement with the built-in keyword set.
///
/// The returned stream covers the statement: every character belongs to
/// exactly one token and concatenating the payloads reproduces the
/// (carriage-return normalized) input.
///
/// ```
/// let tokens = sqlcanon::tokenize("select x from t").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// use sqlcanon::TokenKind::*;
/// assert_eq!(kinds, vec![Keyword, Conn, Ident, Conn, Keyword, Conn, Ident]);
/// ```
pub fn tokenize(stmt: &str) -> Result<Vec<Token>> {
    Tokenizer::new().tokenize(stmt)
}

/// Canonicalize a statement.
///
/// ```
/// use sqlcanon::{bound_stmt, BinderConfig};
///
/// let canonical = bound_stmt("select * from t where x = 2", &BinderConfig::default()).unwrap();
/// assert_eq!(canonical, "select*from t where x=:n");
/// ```
pub fn bound_stmt(stmt: &str, config: &BinderConfig) -> Result<String> {
    Binder::new(config.clone()).bind(stmt)
}

/// Canonicalize a statement and report the replaced literal payloads.
pub fn bound_stmt_verbose(stmt: &str, config: &BinderConfig) -> Result<BoundStatement> {
    Binder::new(config.clone()).bind_verbose(stmt)
}

/// Render a statement's token stream, one line per token with a
/// right-aligned kind and the quoted payload.
pub fn dump_tokens(stmt: &str) -> Result<String> {
    Ok(render_tokens(&tokenize(stmt)?))
}

/// Print a statement's token stream to stdout. Inspection helper for
/// interactive use; library callers should prefer [`dump_tokens`].
pub fn debug_print_tokens(stmt: &str) -> Result<()> {
    println!("{}", dump_tokens(stmt)?);
    Ok(())
}
