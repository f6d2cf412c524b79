//! Tokenization strategies.
//!
//! Alignment is tokenizer-agnostic: anything that turns text into raw
//! tokens works, whole-word or subword. The built-in [`UnicodeTokenizer`]
//! covers the whole-word case. With the `hf-tokenizers` feature a
//! HuggingFace `tokenizers::Tokenizer` (WordPiece, BPE) drops in directly;
//! its `##` continuation tokens are what the joiner's marker handling is
//! for.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

// Alternation order is priority order: a word (letter head, then letters,
// combining marks, digits, underscore, word-internal apostrophes), else a
// digit run, else any single non-space character.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{L}[\p{L}\p{M}\p{N}_\u{2019}']*|\p{N}+|[^\s]").expect("TOKEN regex is invalid")
});

/// A tokenization strategy.
pub trait Tokenizer: Send + Sync {
    /// Split `text` into raw tokens.
    ///
    /// Implementations backed by external machinery may fail; the built-in
    /// strategies never do.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Strategy name, for logs.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// Unicode-aware whole-word tokenizer.
///
/// Splits on the pattern above: words keep internal apostrophes and
/// underscores, digit runs stay whole, and every other non-space
/// character becomes its own token. Total over any input; empty and
/// whitespace-only text tokenize to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    /// New tokenizer. Stateless; the pattern is compiled once per process.
    #[must_use]
    pub fn new() -> Self {
        UnicodeTokenizer
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(TOKEN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect())
    }

    fn name(&self) -> &'static str {
        "unicode"
    }
}

#[cfg(feature = "hf-tokenizers")]
impl Tokenizer for tokenizers::Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let encoding = self
            .encode(text, false)
            .map_err(|e| crate::error::Error::tokenize(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn name(&self) -> &'static str {
        "hf-tokenizers"
    }
}
