//! Entity mapping flattening for localized alignment.
//!
//! A localization step produces per-example word mappings from original
//! entity strings to their localized forms (`"John" -> "Jean"`). Matching
//! has to work in both directions: localized text usually contains the
//! localized form, but proper nouns often survive untranslated. The
//! helpers here build the combined search universe and resolve entity
//! types across the language boundary.

use std::collections::BTreeMap;

use crate::label::{LabelPair, LabelTable};

/// Merge a mapping with its reverse into one lookup.
///
/// The input is not touched. When a key occurs in both directions the
/// reverse entry wins; when two originals share one localized form, the
/// lexicographically greater original supplies the reverse entry.
#[must_use]
pub fn flatten_bidirectional(mapping: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut flat = mapping.clone();
    for (original, localized) in mapping {
        flat.insert(localized.clone(), original.clone());
    }
    flat
}

/// Entity type of `surface`, looked up directly or across the flattened
/// mapping.
///
/// `entity_map` records types for original-language strings only; a
/// localized surface resolves by hopping through `flat` first.
#[must_use]
pub fn resolve_type<'a>(
    surface: &str,
    entity_map: &'a BTreeMap<String, String>,
    flat: &BTreeMap<String, String>,
) -> Option<&'a str> {
    if let Some(t) = entity_map.get(surface) {
        return Some(t.as_str());
    }
    flat.get(surface)
        .and_then(|mapped| entity_map.get(mapped))
        .map(String::as_str)
}

/// Search terms for single-language alignment: each entity surface keyed
/// to its type's label pair.
///
/// Entities whose type is missing from the table are skipped; alignment
/// degrades per entity, it does not fail.
#[must_use]
pub fn entity_pairs(
    entity_map: &BTreeMap<String, String>,
    table: &LabelTable,
) -> BTreeMap<String, LabelPair> {
    let mut terms = BTreeMap::new();
    for (surface, type_name) in entity_map {
        match table.get(type_name) {
            Some(pair) => {
                terms.insert(surface.clone(), pair);
            }
            None => {
                log::debug!(
                    "skipping entity {:?}: type {:?} not in label table",
                    surface,
                    type_name
                );
            }
        }
    }
    terms
}

/// Search terms for localized alignment: every original *and* localized
/// string keyed to the label pair of the original's recorded type.
///
/// `word_mappings` is the original→localized mapping from the
/// localization step; `entity_map` is the original example's
/// surface→type record. Pairs whose original has no usable type are
/// skipped like in [`entity_pairs`].
#[must_use]
pub fn search_terms(
    word_mappings: &BTreeMap<String, String>,
    entity_map: &BTreeMap<String, String>,
    table: &LabelTable,
) -> BTreeMap<String, LabelPair> {
    let mut terms = BTreeMap::new();
    for (original, localized) in word_mappings {
        let pair = entity_map.get(original).and_then(|t| table.get(t));
        match pair {
            Some(pair) => {
                terms.insert(original.clone(), pair);
                terms.insert(localized.clone(), pair);
            }
            None => {
                log::debug!(
                    "skipping mapping {:?} -> {:?}: no label pair for original",
                    original,
                    localized
                );
            }
        }
    }
    terms
}
