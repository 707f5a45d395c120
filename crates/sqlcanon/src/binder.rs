//! The statement binder.
//!
//! Walks a token stream and emits the canonical "bound" form: literals
//! become placeholders, identifiers are normalized, keywords and
//! connectors are lowercased, and whitespace is squeezed. Statements that
//! differ only in literal values or cosmetic detail collapse to the same
//! canonical string.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::partition::partition_names;
use crate::tokens::{TokenKind, Tokenizer};

/// Hard cap on the canonical output, in bytes. Protects downstream
/// fixed-buffer consumers; a longer result yields [`TOO_LONG_SENTINEL`],
/// never a truncated canonical form.
pub const MAX_BOUND_LEN: usize = 32_767;

/// Returned in place of a canonical form that would exceed
/// [`MAX_BOUND_LEN`]. Callers branch on this value; it is not an error.
pub const TOO_LONG_SENTINEL: &str = "**bound statement too long**";

/// Separator characters that shed adjacent spaces during the squeeze.
const SEPARATORS: &[char] = &[
    '=', '<', '>', '!', '+', '-', '*', '/', '(', ')', ',', ';', '|', ':', '[', ']', '.', '@', '"',
];

/// Binder options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinderConfig {
    /// Replace each digit-run inside identifiers (and kept hints) with
    /// `{k}`, where `k` is the index assigned to that run on first
    /// occurrence. On by default.
    pub normalize_numbers_in_ident: bool,
    /// Replace identifiers tagged as partition names with `#k`, first
    /// occurrence first. On by default.
    pub normalize_partition_names: bool,
    /// Reduce hints to a single space instead of keeping their text.
    /// Off by default.
    pub strip_hints: bool,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            normalize_numbers_in_ident: true,
            normalize_partition_names: true,
            strip_hints: false,
        }
    }
}

/// The result of a verbose bind: the canonical text plus the bookkeeping
/// needed to reconstruct bind-value candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundStatement {
    /// The canonical form, or [`TOO_LONG_SENTINEL`]
    pub text: String,
    /// Replaced numbers + strings; binds are not counted
    pub replaced_literals: usize,
    /// Original payloads of replaced tokens, in statement order
    pub replaced_values: Vec<String>,
    /// Kinds of the replaced tokens, parallel to `replaced_values`
    pub replaced_kinds: Vec<TokenKind>,
}

/// The statement binder.
///
/// Stateless between calls: the normalization maps live for a single
/// invocation, so output depends only on the statement text, the options
/// and the keyword set.
#[derive(Debug, Clone)]
pub struct Binder {
    config: BinderConfig,
    tokenizer: Tokenizer,
}

impl Binder {
    /// A binder with the given options over the built-in keyword set
    pub fn new(config: BinderConfig) -> Self {
        Self {
            config,
            tokenizer: Tokenizer::new(),
        }
    }

    /// A binder with the given options and tokenizer
    pub fn with_tokenizer(config: BinderConfig, tokenizer: Tokenizer) -> Self {
        Self { config, tokenizer }
    }

    /// Canonicalize a statement
    pub fn bind(&self, stmt: &str) -> Result<String> {
        Ok(self.bind_verbose(stmt)?.text)
    }

    /// Canonicalize a statement and report the replaced values
    pub fn bind_verbose(&self, stmt: &str) -> Result<BoundStatement> {
        let mut result = BoundStatement::default();
        if stmt.is_empty() {
            return Ok(result);
        }

        let tokens = self.tokenizer.tokenize(stmt)?;
        let tagged = if self.config.normalize_partition_names {
            partition_names(&tokens)
        } else {
            HashSet::new()
        };

        let mut digit_runs: HashMap<String, usize> = HashMap::new();
        let mut partitions: HashMap<String, usize> = HashMap::new();
        let mut out = Output::default();

        for token in &tokens {
            match token.kind {
                TokenKind::Conn | TokenKind::Keyword => {
                    out.push_plain(&token.text.to_lowercase());
                }
                TokenKind::Comment => out.push_plain(" "),
                TokenKind::Hint => {
                    if self.config.strip_hints {
                        out.push_plain(" ");
                    } else {
                        // hint text survives the squeeze verbatim, modulo
                        // digit-run normalization
                        out.rstrip();
                        let text = if self.config.normalize_numbers_in_ident {
                            replace_digit_runs(&token.text, &mut digit_runs)
                        } else {
                            token.text.clone()
                        };
                        out.push_shielded(text);
                    }
                }
                TokenKind::Bind => {
                    result.replaced_values.push(token.text.clone());
                    result.replaced_kinds.push(TokenKind::Bind);
                    out.push_shielded(":b".to_string());
                }
                TokenKind::Number => {
                    result.replaced_values.push(token.text.clone());
                    result.replaced_kinds.push(TokenKind::Number);
                    result.replaced_literals += 1;
                    out.rstrip();
                    out.push_plain(":n");
                }
                TokenKind::String => {
                    result.replaced_values.push(token.text.clone());
                    result.replaced_kinds.push(TokenKind::String);
                    result.replaced_literals += 1;
                    out.rstrip();
                    out.push_plain(":s");
                }
                TokenKind::Ident => {
                    if tagged.contains(&token.start) {
                        let next = partitions.len();
                        let idx = *partitions.entry(token.text.clone()).or_insert(next);
                        out.push_plain(&format!("#{}", idx));
                    } else {
                        out.push_plain(&self.normalize_ident(&token.text, &mut digit_runs));
                    }
                }
            }
        }

        let mut text = String::new();
        for segment in &out.segments {
            if segment.shielded {
                text.push_str(&segment.text);
            } else {
                text.push_str(&squeeze(&segment.text));
            }
        }
        result.text = text.trim().to_string();

        if result.text.len() > MAX_BOUND_LEN {
            result.text = TOO_LONG_SENTINEL.to_string();
            return Ok(result);
        }
        if crate::log_enabled() {
            tracing::debug!(
                bytes = result.text.len(),
                literals = result.replaced_literals,
                "bound statement"
            );
        }
        Ok(result)
    }

    /// Normalized form of an identifier: digit-runs replaced, quoted
    /// identifiers returned unchanged, bare ones lowercased.
    fn normalize_ident(&self, text: &str, runs: &mut HashMap<String, usize>) -> String {
        let replaced = if self.config.normalize_numbers_in_ident {
            replace_digit_runs(text, runs)
        } else {
            text.to_string()
        };
        if replaced.starts_with('"') {
            replaced
        } else {
            replaced.to_lowercase()
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new(BinderConfig::default())
    }
}

/// Replace each maximal digit run with `{k}`, assigning `k` to that exact
/// run on first occurrence. One map serves identifiers and hints alike,
/// so `t103` and `"t103"` share an index.
fn replace_digit_runs(text: &str, runs: &mut HashMap<String, usize>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        flush_digit_run(&mut out, &mut digits, runs);
        out.push(c);
    }
    flush_digit_run(&mut out, &mut digits, runs);
    out
}

fn flush_digit_run(out: &mut String, digits: &mut String, runs: &mut HashMap<String, usize>) {
    if digits.is_empty() {
        return;
    }
    let next = runs.len();
    let idx = *runs.entry(std::mem::take(digits)).or_insert(next);
    out.push('{');
    out.push_str(&idx.to_string());
    out.push('}');
}

/// Emitted output, split into squeezable text and shielded pieces (hints
/// and bind placeholders) that the whitespace squeeze must not touch.
#[derive(Default)]
struct Output {
    segments: Vec<Segment>,
}

struct Segment {
    text: String,
    shielded: bool,
}

impl Output {
    fn push_plain(&mut self, text: &str) {
        match self.segments.last_mut() {
            Some(segment) if !segment.shielded => segment.text.push_str(text),
            _ => self.segments.push(Segment {
                text: text.to_string(),
                shielded: false,
            }),
        }
    }

    fn push_shielded(&mut self, text: String) {
        self.segments.push(Segment {
            text,
            shielded: true,
        });
    }

    /// Trim pending trailing whitespace so the next placeholder attaches
    /// to the preceding text. Never reaches into shielded pieces.
    fn rstrip(&mut self) {
        if let Some(segment) = self.segments.last_mut() {
            if !segment.shielded {
                segment.text.truncate(segment.text.trim_end().len());
            }
        }
    }
}

/// The whitespace squeeze: newlines and tabs become spaces, space runs
/// collapse to one, and single spaces adjacent to a separator are
/// dropped. Lossy by design.
fn squeeze(text: &str) -> String {
    let mut s: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    while s.contains("  ") {
        s = s.replace("  ", " ");
    }
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let after_sep = out.chars().next_back().is_some_and(|p| SEPARATORS.contains(&p));
            let before_sep = chars.get(i + 1).is_some_and(|n| SEPARATORS.contains(n));
            if after_sep || before_sep {
                continue;
            }
        }
        out.push(c);
    }
    out
}
