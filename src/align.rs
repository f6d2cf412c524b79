//! Core alignment: entity strings onto token-level integer tags.
//!
//! The aligner never sees character offsets. It matches by *reconstruction*:
//! every token window `[start, end)` is joined back into surface text and
//! compared against the entity strings. Matching windows become span
//! candidates; candidates are resolved longest-first (earlier start breaks
//! length ties) into a non-overlapping set, then painted into the tag array:
//!
//! ```text
//! tokens:   ["New", "York", "City", "is", "big"]
//! entities: {"New York": LOC(1,2), "New York City": LOC(1,2)}
//!
//! candidates: (0,2) "New York", (0,3) "New York City"
//! resolved:   (0,3) wins (longer); (0,2) overlaps, dropped
//! tags:       [1, 2, 2, 0, 0]
//! ```
//!
//! Candidate search is quadratic in token count per entity string. Windows
//! whose first surface cannot begin the entity string are skipped without
//! joining; that prefix test is exact only when no case normalization is
//! in play, so the case-insensitive path scans every window.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::join::{AttachRules, WindowJoiner};
use crate::label::{LabelPair, OUTSIDE_ID};
use crate::token::surface;

/// A token window that reconstructs one entity string.
///
/// Half-open: `start < end <= token_count` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanCandidate {
    /// First token of the window.
    pub start: usize,
    /// One past the last token of the window.
    pub end: usize,
    /// Ids to paint if this candidate survives resolution.
    pub pair: LabelPair,
}

impl SpanCandidate {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// The alignment engine.
///
/// Stateless between calls; one instance serves a whole batch. Matching
/// behavior is fixed at construction: spacing rules, case sensitivity,
/// and the id written for unmatched tokens.
#[derive(Debug, Clone)]
pub struct Aligner {
    rules: AttachRules,
    case_insensitive: bool,
    outside_id: u32,
}

impl Default for Aligner {
    fn default() -> Self {
        Aligner {
            rules: AttachRules::default(),
            case_insensitive: false,
            outside_id: OUTSIDE_ID,
        }
    }
}

impl Aligner {
    /// Aligner with default spacing rules, case-sensitive matching, and
    /// outside id `0`.
    #[must_use]
    pub fn new() -> Self {
        Aligner::default()
    }

    /// Replace the spacing rules.
    #[must_use]
    pub fn with_rules(mut self, rules: AttachRules) -> Self {
        self.rules = rules;
        self
    }

    /// Toggle case-insensitive matching (Unicode lowercase on both sides).
    #[must_use]
    pub fn with_case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Id written for tokens outside every span.
    #[must_use]
    pub fn with_outside_id(mut self, id: u32) -> Self {
        self.outside_id = id;
        self
    }

    /// The spacing rules this aligner joins with.
    #[must_use]
    pub fn rules(&self) -> &AttachRules {
        &self.rules
    }

    /// Align `terms` onto `tokens`; returns one tag id per token.
    ///
    /// `terms` maps entity strings to their id pairs (see
    /// [`crate::mapping::entity_pairs`] and [`crate::mapping::search_terms`]).
    /// Entities that reconstruct nowhere simply contribute nothing; the
    /// output length always equals `tokens.len()`.
    #[must_use]
    pub fn align<S: AsRef<str>>(&self, tokens: &[S], terms: &BTreeMap<String, LabelPair>) -> Vec<u32> {
        let candidates = self.find_candidates(tokens, terms);
        self.resolve(candidates, tokens.len())
    }

    /// All token windows whose joined surface equals an entity string.
    ///
    /// Candidates are emitted grouped by entity string in sorted order,
    /// windows in scan order within each group. Resolution relies on that
    /// order being deterministic.
    #[must_use]
    pub fn find_candidates<S: AsRef<str>>(
        &self,
        tokens: &[S],
        terms: &BTreeMap<String, LabelPair>,
    ) -> Vec<SpanCandidate> {
        let n = tokens.len();
        let mut joiner = WindowJoiner::new(tokens, &self.rules);
        let mut candidates = Vec::new();

        for (entity, &pair) in terms {
            let lowered = self.case_insensitive.then(|| entity.to_lowercase());
            let needle: &str = lowered.as_deref().unwrap_or(entity);
            for start in 0..n {
                if !self.case_insensitive && !entity.starts_with(surface(tokens[start].as_ref())) {
                    continue;
                }
                for end in (start + 1)..=n {
                    let window = joiner.join(start, end);
                    let hit = if self.case_insensitive {
                        window.to_lowercase() == needle
                    } else {
                        window == needle
                    };
                    if hit {
                        candidates.push(SpanCandidate { start, end, pair });
                    }
                }
            }
        }
        candidates
    }

    /// Resolve overlapping candidates and paint the tag array.
    ///
    /// Longer candidates win; equal lengths fall to the earlier start; the
    /// remaining ties keep generation order (the sort is stable). A
    /// candidate touching any already-claimed token is dropped whole.
    #[must_use]
    pub fn resolve(&self, mut candidates: Vec<SpanCandidate>, token_count: usize) -> Vec<u32> {
        let mut tags = vec![self.outside_id; token_count];
        let mut occupied = vec![false; token_count];

        candidates.sort_by_key(|c| (Reverse(c.len()), c.start));

        for c in candidates {
            if occupied[c.start..c.end].iter().any(|&taken| taken) {
                continue;
            }
            tags[c.start] = c.pair.begin;
            for tag in &mut tags[c.start + 1..c.end] {
                *tag = c.pair.inside;
            }
            for slot in &mut occupied[c.start..c.end] {
                *slot = true;
            }
        }
        tags
    }
}
