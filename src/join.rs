//! Surface joining: reconstructing natural text from token sequences.
//!
//! Joining is how candidate windows are compared against entity strings,
//! so its rules are part of the matching semantics, not cosmetics. A token
//! gets a leading space unless one of three rules suppresses it:
//!
//! | Rule            | Example                        | Result        |
//! |-----------------|--------------------------------|---------------|
//! | continuation    | `["play", "##ing"]`            | `playing`     |
//! | right-attach    | `["cost", ",", "roughly"]`     | `cost, roughly` |
//! | left-attach     | `["(", "approx", ")"]`         | `(approx)`    |
//!
//! Attachment is decided on marker-stripped surfaces, so a subword
//! tokenizer emitting `##%` still glues the percent sign leftward.

use std::collections::{HashMap, HashSet};

use crate::token::{is_continuation, surface};

/// Default punctuation that attaches to the preceding surface.
const RIGHT_ATTACH: &[&str] = &[
    ".", ",", "!", "?", ":", ";", ")", "]", "}", "\u{201d}", "\u{2019}", "\"", "'", "\u{2026}",
    "\u{2013}", "\u{2014}", "-", "%",
];

/// Default punctuation that attaches to the following surface.
const LEFT_ATTACH: &[&str] = &["(", "[", "{", "\u{201c}", "\u{2018}"];

/// Spacing rules for the surface joiner.
///
/// Immutable once constructed; share one instance across alignment calls.
#[derive(Debug, Clone)]
pub struct AttachRules {
    right: HashSet<String>,
    left: HashSet<String>,
}

impl Default for AttachRules {
    fn default() -> Self {
        AttachRules {
            right: RIGHT_ATTACH.iter().map(|s| s.to_string()).collect(),
            left: LEFT_ATTACH.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AttachRules {
    /// Custom rule sets. Members are compared against marker-stripped
    /// token surfaces, whole-surface equality.
    #[must_use]
    pub fn new<R, L>(right: R, left: L) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        AttachRules {
            right: right.into_iter().map(Into::into).collect(),
            left: left.into_iter().map(Into::into).collect(),
        }
    }

    /// True if `surface` glues onto the preceding token.
    #[must_use]
    pub fn is_right_attach(&self, surface: &str) -> bool {
        self.right.contains(surface)
    }

    /// True if `surface` glues onto the following token.
    #[must_use]
    pub fn is_left_attach(&self, surface: &str) -> bool {
        self.left.contains(surface)
    }

    /// Whether a space separates `prev` and `cur` in joined text.
    ///
    /// Both arguments are raw tokens; `prev` is `None` at the start of a
    /// sequence, where no space is emitted regardless.
    #[must_use]
    pub fn needs_space(&self, prev: Option<&str>, cur: &str) -> bool {
        let Some(prev) = prev else { return false };
        if is_continuation(cur) || self.is_right_attach(surface(cur)) {
            return false;
        }
        !self.is_left_attach(surface(prev))
    }
}

/// Join a full token sequence into display text.
#[must_use]
pub fn join_tokens<S: AsRef<str>>(tokens: &[S], rules: &AttachRules) -> String {
    let mut out = String::new();
    let mut prev: Option<&str> = None;
    for tok in tokens {
        let raw = tok.as_ref();
        if rules.needs_space(prev, raw) {
            out.push(' ');
        }
        out.push_str(surface(raw));
        prev = Some(raw);
    }
    out
}

/// Joins `(start, end)` windows of one token sequence, memoizing results.
///
/// Candidate search joins the same windows repeatedly (every entity string
/// probes every plausible window), so one joiner instance should live for
/// the duration of a single alignment call. Each window is joined as an
/// independent sequence: its first token never receives a leading space.
pub struct WindowJoiner<'a, S> {
    tokens: &'a [S],
    rules: &'a AttachRules,
    cache: HashMap<(usize, usize), String>,
}

impl<'a, S: AsRef<str>> WindowJoiner<'a, S> {
    /// New joiner over `tokens` with an empty cache.
    #[must_use]
    pub fn new(tokens: &'a [S], rules: &'a AttachRules) -> Self {
        WindowJoiner {
            tokens,
            rules,
            cache: HashMap::new(),
        }
    }

    /// Joined surface of `tokens[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > tokens.len()`, like slice indexing.
    pub fn join(&mut self, start: usize, end: usize) -> &str {
        let (tokens, rules) = (self.tokens, self.rules);
        self.cache
            .entry((start, end))
            .or_insert_with(|| join_tokens(&tokens[start..end], rules))
    }
}
