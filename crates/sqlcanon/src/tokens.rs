//! Token types and tokenization for SQL canonicalization
//!
//! This module defines the token model and the tokenizer that converts a
//! SQL statement into an ordered, gap-free token stream. The tokenizer is
//! total: malformed and truncated statements are closed implicitly at end
//! of input, never rejected.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keywords::KeywordSet;

/// The classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Reserved SQL keyword, matched case-insensitively
    Keyword,
    /// Identifier, bare (`abc_1`) or double-quoted (`"Name"`)
    Ident,
    /// Bind-variable placeholder starting with `:`
    Bind,
    /// Numeric literal, possibly signed, possibly scientific
    Number,
    /// Single-quoted string literal with doubled-quote escapes
    String,
    /// Comment whose body begins with `+`
    Hint,
    /// Any other comment
    Comment,
    /// Connector: whitespace and punctuation between meaningful tokens
    Conn,
}

impl TokenKind {
    /// Lowercase display name, as used by [`render_tokens`].
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Ident => "ident",
            TokenKind::Bind => "bind",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Hint => "hint",
            TokenKind::Comment => "comment",
            TokenKind::Conn => "conn",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token in the SQL token stream.
///
/// `start` is a 0-based character offset into the carriage-return
/// normalized source; `text` is the exact substring the token covers, so
/// concatenating a stream's payloads reproduces the statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Start offset in characters
    pub start: usize,
    /// The exact text the token covers
    pub text: String,
    /// The classification
    pub kind: TokenKind,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        Self {
            start,
            text: text.into(),
            kind,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the payload is empty (never true for tokenizer output)
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// One past the last character offset this token covers
    pub fn end(&self) -> usize {
        self.start + self.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}

/// Render one line per token: right-aligned kind, then the quoted payload.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:>7} {:?}", t.kind.as_str(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Characters that mark the preceding context as an operator for sign
/// adoption: after one of these, `+`/`-` before digits is unary.
const SIGN_CONTEXT_OPERATORS: &[char] = &['+', '-', '*', '/', '(', '=', '<', '>', '|', ',', '['];

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '#')
}

/// The statement tokenizer.
///
/// Produces a stream that covers the input with no gaps and no overlaps;
/// every character belongs to exactly one token.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    keywords: &'static KeywordSet,
}

impl Tokenizer {
    /// A tokenizer over the built-in keyword set
    pub fn new() -> Self {
        Self {
            keywords: KeywordSet::builtin(),
        }
    }

    /// A tokenizer over a caller-supplied keyword set
    pub fn with_keywords(keywords: &'static KeywordSet) -> Self {
        Self { keywords }
    }

    /// Tokenize a statement
    pub fn tokenize(&self, stmt: &str) -> Result<Vec<Token>> {
        let state = TokenizerState::new(stmt, self.keywords);
        let tokens = state.run()?;
        if crate::log_enabled() {
            tracing::debug!(tokens = tokens.len(), chars = stmt.len(), "tokenized statement");
        }
        Ok(tokens)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal state for one tokenization.
///
/// `work` is the blanking buffer: the normalized source plus two sentinel
/// spaces. Each pass overwrites the characters it claims with spaces, so
/// later passes cannot re-claim them; the sentinel guarantees every
/// identifier and number scan terminates. `src` keeps the normalized
/// source for payloads and for the sign-context lookback, which is
/// defined against the original text rather than the blanked buffer.
struct TokenizerState<'a> {
    src: Vec<char>,
    work: Vec<char>,
    len: usize,
    tokens: BTreeMap<usize, Token>,
    keywords: &'a KeywordSet,
}

impl<'a> TokenizerState<'a> {
    fn new(stmt: &str, keywords: &'a KeywordSet) -> Self {
        let src: Vec<char> = stmt
            .chars()
            .map(|c| if c == '\r' { ' ' } else { c })
            .collect();
        let len = src.len();
        let mut work = src.clone();
        work.push(' ');
        work.push(' ');
        Self {
            src,
            work,
            len,
            tokens: BTreeMap::new(),
            keywords,
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        self.extract_sections();
        self.extract_binds();
        self.extract_words()?;
        self.extract_numbers()?;
        self.reconcile_binds();
        self.fill_connectors();
        Ok(self.tokens.into_values().collect())
    }

    /// The working-buffer character at `i`, with the sentinel extended
    /// indefinitely so lookahead never goes out of bounds.
    fn work_char(&self, i: usize) -> char {
        self.work.get(i).copied().unwrap_or(' ')
    }

    fn find_char(&self, from: usize, ch: char) -> Option<usize> {
        (from..self.len).find(|&i| self.work[i] == ch)
    }

    fn find_pair(&self, from: usize, a: char, b: char) -> Option<usize> {
        (from..self.len.saturating_sub(1)).find(|&i| self.work[i] == a && self.work[i + 1] == b)
    }

    /// Record a token over `[start, end)` and blank it out of the
    /// working buffer.
    fn claim(&mut self, start: usize, end: usize, kind: TokenKind) {
        let text: String = self.src[start..end].iter().collect();
        for c in &mut self.work[start..end] {
            *c = ' ';
        }
        self.tokens.insert(start, Token::new(kind, text, start));
    }

    /// The already-emitted token covering position `pos`, if any.
    fn token_covering(&self, pos: usize) -> Option<&Token> {
        let (_, tok) = self.tokens.range(..=pos).next_back()?;
        (tok.end() > pos).then_some(tok)
    }

    /// Pass 1: comments, hints, quoted identifiers and string literals.
    ///
    /// Repeatedly claims the earliest remaining opener, so a quote inside
    /// a comment can never start a string and vice versa. Unterminated
    /// sections run to end of input.
    fn extract_sections(&mut self) {
        loop {
            let block = self.find_pair(0, '/', '*');
            let line = self.find_pair(0, '-', '-');
            let quote = self.find_char(0, '"');
            let tick = self.find_char(0, '\'');
            let Some(open) = [block, line, quote, tick].into_iter().flatten().min() else {
                break;
            };
            if block == Some(open) {
                let kind = if self.work_char(open + 2) == '+' {
                    TokenKind::Hint
                } else {
                    TokenKind::Comment
                };
                let end = self
                    .find_pair(open + 2, '*', '/')
                    .map_or(self.len, |p| p + 2);
                self.claim(open, end, kind);
            } else if line == Some(open) {
                let kind = if self.work_char(open + 2) == '+' {
                    TokenKind::Hint
                } else {
                    TokenKind::Comment
                };
                // the newline terminates the comment but stays connector
                let end = self.find_char(open + 2, '\n').unwrap_or(self.len);
                self.claim(open, end, kind);
            } else if quote == Some(open) {
                let end = self.find_char(open + 1, '"').map_or(self.len, |p| p + 1);
                self.claim(open, end, TokenKind::Ident);
            } else {
                let end = self.find_string_end(open);
                self.claim(open, end, TokenKind::String);
            }
        }
    }

    /// End (exclusive) of the string literal opened at `open`. A doubled
    /// quote does not close the string; the closer search resumes past it.
    fn find_string_end(&self, open: usize) -> usize {
        let mut from = open + 1;
        loop {
            match self.find_char(from, '\'') {
                Some(p) if self.work_char(p + 1) == '\'' => from = p + 2,
                Some(p) => return p + 1,
                None => return self.len,
            }
        }
    }

    /// Pass 2: bind variables. The assignment operator `:=` is left for
    /// the connector pass. A `:` separated from its name by whitespace is
    /// claimed bare here and merged during reconciliation.
    fn extract_binds(&mut self) {
        let mut i = 0;
        while i < self.len {
            if self.work[i] != ':' {
                i += 1;
                continue;
            }
            if self.work_char(i + 1) == '=' {
                i += 2;
                continue;
            }
            let mut j = i + 1;
            while is_ident_char(self.work_char(j)) {
                j += 1;
            }
            // indicator variable: :ph1:ind is a single bind
            if self.work_char(j) == ':' && is_ident_char(self.work_char(j + 1)) {
                j += 1;
                while is_ident_char(self.work_char(j)) {
                    j += 1;
                }
            }
            self.claim(i, j, TokenKind::Bind);
            i = j;
        }
    }

    /// Pass 3: identifiers and keywords. The `e`/`E` guard skips exponent
    /// markers so `1e5` stays whole for the number pass.
    fn extract_words(&mut self) -> Result<()> {
        let mut i = 0;
        while i < self.len {
            let c = self.work[i];
            if !c.is_alphabetic() {
                i += 1;
                continue;
            }
            if matches!(c, 'e' | 'E') && self.is_exponent_marker(i) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while is_ident_char(self.work_char(j)) {
                j += 1;
            }
            if j > self.len {
                return Err(Error::tokenize("no non-alphanumeric character found", i));
            }
            let word: String = self.src[i..j].iter().collect();
            let kind = if self.keywords.contains(&word.to_lowercase()) {
                TokenKind::Keyword
            } else {
                TokenKind::Ident
            };
            self.claim(i, j, kind);
            i = j;
        }
        Ok(())
    }

    /// Bounds-checked 4-character window around a candidate exponent
    /// marker: the next character must be a digit, or a sign followed by
    /// a digit; the previous must be a digit, or a `.` preceded by one.
    fn is_exponent_marker(&self, i: usize) -> bool {
        let next = self.work_char(i + 1);
        let next2 = self.work_char(i + 2);
        let prev = if i >= 1 { self.work[i - 1] } else { ' ' };
        let prev2 = if i >= 2 { self.work[i - 2] } else { ' ' };
        let follows = next.is_ascii_digit() || (matches!(next, '+' | '-') && next2.is_ascii_digit());
        let precedes = prev.is_ascii_digit() || (prev == '.' && prev2.is_ascii_digit());
        follows && precedes
    }

    /// Pass 4: numeric literals. A bare `.` stays connector; a leading
    /// sign is adopted together with any whitespace separating it from
    /// the digits when the context marks it unary.
    fn extract_numbers(&mut self) -> Result<()> {
        let mut i = 0;
        while i < self.len {
            let c = self.work[i];
            let starts_number =
                c.is_ascii_digit() || (c == '.' && self.work_char(i + 1).is_ascii_digit());
            if !starts_number {
                i += 1;
                continue;
            }
            let mut j = i;
            if self.work[j] == '.' {
                j += 1;
                while self.work_char(j).is_ascii_digit() {
                    j += 1;
                }
            } else {
                while self.work_char(j).is_ascii_digit() {
                    j += 1;
                }
                if self.work_char(j) == '.' {
                    j += 1;
                    while self.work_char(j).is_ascii_digit() {
                        j += 1;
                    }
                }
            }
            if matches!(self.work_char(j), 'e' | 'E') {
                let sign_len = usize::from(matches!(self.work_char(j + 1), '+' | '-'));
                if self.work_char(j + 1 + sign_len).is_ascii_digit() {
                    j += 1 + sign_len;
                    while self.work_char(j).is_ascii_digit() {
                        j += 1;
                    }
                }
            }
            if j > self.len {
                return Err(Error::tokenize("no non-num-period char found", i));
            }
            let start = self.adopt_sign(i).unwrap_or(i);
            self.claim(start, j, TokenKind::Number);
            i = j;
        }
        Ok(())
    }

    /// Offset of an adopted sign for the number starting at `num_start`,
    /// or `None` when the sign (if any) is a binary operator.
    ///
    /// The sign is adopted only when the preceding non-whitespace source
    /// character is one of the operator set or lies inside an emitted
    /// keyword token; after an identifier or another number it stays with
    /// the connector.
    fn adopt_sign(&self, num_start: usize) -> Option<usize> {
        let mut k = num_start;
        while k > 0 && self.src[k - 1].is_whitespace() {
            k -= 1;
        }
        let sign = k.checked_sub(1)?;
        // blanked positions read as spaces, so this also rejects signs
        // already claimed by an earlier pass
        if !matches!(self.work[sign], '+' | '-') {
            return None;
        }
        let mut m = sign;
        while m > 0 && self.src[m - 1].is_whitespace() {
            m -= 1;
        }
        let prev = m.checked_sub(1)?;
        let qualifies = SIGN_CONTEXT_OPERATORS.contains(&self.src[prev])
            || self.token_covering(prev).map(|t| t.kind) == Some(TokenKind::Keyword);
        qualifies.then_some(sign)
    }

    /// Pass 5: merge a bare `:` with the identifier carrying its name,
    /// preserving the exact whitespace between them.
    fn reconcile_binds(&mut self) {
        let lone: Vec<usize> = self
            .tokens
            .values()
            .filter(|t| t.kind == TokenKind::Bind && t.text == ":")
            .map(|t| t.start)
            .collect();
        for start in lone {
            let Some((&next_start, next)) = self.tokens.range(start + 1..).next() else {
                continue;
            };
            if next.kind != TokenKind::Ident {
                continue;
            }
            let gap: String = self.src[start + 1..next_start].iter().collect();
            if !gap.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let Some(name) = self.tokens.remove(&next_start) else {
                continue;
            };
            if let Some(bind) = self.tokens.get_mut(&start) {
                bind.text.push_str(&gap);
                bind.text.push_str(&name.text);
            }
        }
    }

    /// Pass 6: connector fill. Every character not claimed by an earlier
    /// pass becomes part of a connector, including leading whitespace.
    fn fill_connectors(&mut self) {
        let mut gaps: Vec<(usize, usize)> = Vec::new();
        let mut pos = 0;
        for (&start, token) in &self.tokens {
            if start > pos {
                gaps.push((pos, start));
            }
            pos = start + token.len();
        }
        if pos < self.len {
            gaps.push((pos, self.len));
        }
        for (a, b) in gaps {
            self.claim(a, b, TokenKind::Conn);
        }
    }
}
