//! Integer label assignment for BIO-style tagging.
//!
//! Each entity type owns a `(begin, inside)` id pair; the id `0` is
//! reserved for tokens outside every entity. Assignment is rank-based
//! over the lexicographically sorted distinct types, so the same type
//! set always yields the same ids no matter how the caller ordered it:
//!
//! ```text
//! types (any order, dups ok): ["PER", "LOC", "PER", "ORG"]
//! sorted distinct:            ["LOC", "ORG", "PER"]
//! ids:                        LOC=(1,2)  ORG=(3,4)  PER=(5,6)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tag id for tokens outside every entity span.
pub const OUTSIDE_ID: u32 = 0;

/// The begin/inside id pair owned by one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelPair {
    /// Id of the first token of a span.
    pub begin: u32,
    /// Id of every subsequent token of a span.
    pub inside: u32,
}

impl LabelPair {
    /// Pair from explicit ids.
    #[must_use]
    pub fn new(begin: u32, inside: u32) -> Self {
        LabelPair { begin, inside }
    }
}

/// Position of a tag id within its span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    /// First token of a span.
    Begin,
    /// Continuation token of a span.
    Inside,
}

/// Immutable mapping from entity type names to their id pairs.
///
/// Built once per batch (or supplied by the caller) and then only read;
/// alignment never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    pairs: BTreeMap<String, LabelPair>,
}

impl LabelTable {
    /// Assign fresh ids to the distinct types in `types`.
    ///
    /// Duplicates collapse; the type at sorted rank `k` (0-based) gets the
    /// pair `(2k + 1, 2k + 2)`. An empty iterator yields an empty table.
    #[must_use]
    pub fn assign<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let distinct: std::collections::BTreeSet<String> =
            types.into_iter().map(Into::into).collect();
        let pairs = distinct
            .into_iter()
            .enumerate()
            .map(|(rank, name)| {
                let rank = rank as u32;
                (name, LabelPair::new(2 * rank + 1, 2 * rank + 2))
            })
            .collect();
        LabelTable { pairs }
    }

    /// Adopt a caller-supplied table, validating it.
    ///
    /// Rejects empty type names, ids equal to [`OUTSIDE_ID`], and any id
    /// used twice (within a pair or across pairs).
    pub fn from_pairs(pairs: BTreeMap<String, LabelPair>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for (name, pair) in &pairs {
            if name.is_empty() {
                return Err(Error::label("empty entity type name"));
            }
            for id in [pair.begin, pair.inside] {
                if id == OUTSIDE_ID {
                    return Err(Error::label(format!(
                        "type {:?} uses reserved outside id {}",
                        name, OUTSIDE_ID
                    )));
                }
                if !seen.insert(id) {
                    return Err(Error::label(format!(
                        "id {} assigned more than once (type {:?})",
                        id, name
                    )));
                }
            }
        }
        Ok(LabelTable { pairs })
    }

    /// Id pair for `type_name`, or `None` if the type is unknown.
    ///
    /// Alignment treats `None` as "skip this entity", not as an error.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<LabelPair> {
        self.pairs.get(type_name).copied()
    }

    /// Reverse lookup: which type and role does a tag id encode?
    ///
    /// Returns `None` for [`OUTSIDE_ID`] and for ids the table never
    /// assigned.
    #[must_use]
    pub fn decode(&self, id: u32) -> Option<(&str, TagRole)> {
        self.pairs.iter().find_map(|(name, pair)| {
            if pair.begin == id {
                Some((name.as_str(), TagRole::Begin))
            } else if pair.inside == id {
                Some((name.as_str(), TagRole::Inside))
            } else {
                None
            }
        })
    }

    /// Type names in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    /// Iterate `(type, pair)` entries in sorted type order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LabelPair)> + '_ {
        self.pairs.iter().map(|(name, pair)| (name.as_str(), *pair))
    }

    /// Number of entity types in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no types are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
