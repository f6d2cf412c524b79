//! Raw-token views: continuation markers and display surfaces.
//!
//! Tokens arrive either from the whole-word Unicode tokenizer or from a
//! subword tokenizer that marks continuations with a `##` prefix
//! (WordPiece convention). Joining and matching both work on the
//! marker-stripped *surface* of a token, never on the raw form.

/// Prefix marking a subword continuation token.
pub const CONTINUATION_PREFIX: &str = "##";

/// True if `raw` continues the previous token rather than starting a new word.
#[must_use]
pub fn is_continuation(raw: &str) -> bool {
    raw.starts_with(CONTINUATION_PREFIX)
}

/// Display form of a raw token: the continuation marker stripped if present,
/// the token unchanged otherwise.
#[must_use]
pub fn surface(raw: &str) -> &str {
    raw.strip_prefix(CONTINUATION_PREFIX).unwrap_or(raw)
}
