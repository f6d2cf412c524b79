//! The reverse direction: tag arrays back into spans and records.
//!
//! Alignment produces `(tokens, tags)`; consumers auditing or exporting
//! data need the spans back out, and sometimes a whole reconstructed
//! example. Decoding is lenient with arrays from other systems: an inside
//! id with no preceding begin opens a span anyway, and ids the table never
//! assigned read as outside.
//!
//! ```
//! use tagalign::{AttachRules, LabelTable};
//! use tagalign::decode::spans_from_tags;
//!
//! let table = LabelTable::assign(["LOC", "PER"]);
//! let tokens = ["Jean", "visited", "Paris", "."];
//! let tags = [3, 0, 1, 0];
//!
//! let spans = spans_from_tags(&tokens, &tags, &table, &AttachRules::default()).unwrap();
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].surface, "Jean");
//! assert_eq!(spans[1].type_name, "LOC");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::example::Example;
use crate::join::{join_tokens, AttachRules};
use crate::label::{LabelTable, TagRole};

/// One decoded span: a half-open token range, its type, and the joined
/// surface text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    /// First token of the span.
    pub start: usize,
    /// One past the last token of the span.
    pub end: usize,
    /// Entity type name from the label table.
    pub type_name: String,
    /// Joined surface of the span's tokens.
    pub surface: String,
}

/// Decode a tag array into spans.
///
/// Errors only when `tokens` and `tags` disagree in length; any id content
/// decodes.
pub fn spans_from_tags<S: AsRef<str>>(
    tokens: &[S],
    tags: &[u32],
    table: &LabelTable,
    rules: &AttachRules,
) -> Result<Vec<TaggedSpan>> {
    if tokens.len() != tags.len() {
        return Err(Error::validation(format!(
            "token count ({}) != tag count ({})",
            tokens.len(),
            tags.len()
        )));
    }

    let mut spans = Vec::new();
    let mut current: Option<(usize, &str)> = None;

    for (k, &id) in tags.iter().enumerate() {
        let decoded = table.decode(id);
        match decoded {
            Some((type_name, TagRole::Inside)) => match current {
                Some((_, open)) if open == type_name => {}
                _ => {
                    // Inside without its begin: open a span here anyway.
                    close(&mut spans, current.take(), k, tokens, rules);
                    current = Some((k, type_name));
                }
            },
            Some((type_name, TagRole::Begin)) => {
                close(&mut spans, current.take(), k, tokens, rules);
                current = Some((k, type_name));
            }
            None => {
                close(&mut spans, current.take(), k, tokens, rules);
            }
        }
    }
    close(&mut spans, current.take(), tags.len(), tokens, rules);
    Ok(spans)
}

fn close<S: AsRef<str>>(
    spans: &mut Vec<TaggedSpan>,
    current: Option<(usize, &str)>,
    end: usize,
    tokens: &[S],
    rules: &AttachRules,
) {
    if let Some((start, type_name)) = current {
        spans.push(TaggedSpan {
            start,
            end,
            type_name: type_name.to_string(),
            surface: join_tokens(&tokens[start..end], rules),
        });
    }
}

/// Reconstruct an [`Example`] from an aligned token/tag pair.
///
/// The text is the full joined token sequence; the entity map collects
/// each decoded span's surface and type. Identical surfaces keep the last
/// span's type.
pub fn to_example<S: AsRef<str>>(
    index: usize,
    tokens: &[S],
    tags: &[u32],
    table: &LabelTable,
    rules: &AttachRules,
) -> Result<Example> {
    let spans = spans_from_tags(tokens, tags, table, rules)?;
    let mut example = Example::new(index, join_tokens(tokens, rules));
    for span in spans {
        example.entity_map.insert(span.surface, span.type_name);
    }
    Ok(example)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LabelTable {
        // ORG=(1,2), PER=(3,4)
        LabelTable::assign(["ORG", "PER"])
    }

    fn decode(tokens: &[&str], tags: &[u32]) -> Vec<TaggedSpan> {
        spans_from_tags(tokens, tags, &table(), &AttachRules::default()).unwrap()
    }

    #[test]
    fn begin_and_inside_form_one_span() {
        let spans = decode(&["John", "Smith", "works", "at", "Apple"], &[3, 4, 0, 0, 1]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].surface, "John Smith");
        assert_eq!(spans[0].type_name, "PER");
        assert_eq!((spans[0].start, spans[0].end), (0, 2));
        assert_eq!(spans[1].surface, "Apple");
        assert_eq!(spans[1].type_name, "ORG");
    }

    #[test]
    fn span_reaching_the_last_token_is_closed() {
        let spans = decode(&["met", "Ann"], &[0, 3]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].surface, "Ann");
        assert_eq!((spans[0].start, spans[0].end), (1, 2));
    }

    #[test]
    fn adjacent_begins_stay_separate_spans() {
        let spans = decode(&["John", "Ann"], &[3, 3]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].surface, "John");
        assert_eq!(spans[1].surface, "Ann");
    }

    #[test]
    fn stray_inside_opens_a_span_leniently() {
        let spans = decode(&["John", "spoke"], &[4, 0]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].type_name, "PER");
        assert_eq!(spans[0].surface, "John");
    }

    #[test]
    fn inside_of_another_type_starts_a_new_span() {
        let spans = decode(&["John", "Apple"], &[3, 2]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].type_name, "PER");
        assert_eq!(spans[1].type_name, "ORG");
    }

    #[test]
    fn unknown_ids_read_as_outside() {
        let spans = decode(&["John", "x", "Ann"], &[3, 99, 3]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].surface, "John");
        assert_eq!(spans[1].surface, "Ann");
    }

    #[test]
    fn continuation_tokens_join_in_surfaces() {
        let spans = decode(&["Ar", "##sen", "##al", "won"], &[1, 2, 2, 0]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].surface, "Arsenal");
        assert_eq!((spans[0].start, spans[0].end), (0, 3));
    }

    #[test]
    fn empty_arrays_decode_to_nothing() {
        assert!(decode(&[], &[]).is_empty());
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err =
            spans_from_tags(&["a", "b"], &[0], &table(), &AttachRules::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn example_reconstruction_round_trips_text_and_entities() {
        let tokens = ["John", "lives", "in", "London", "."];
        let tags = [3, 0, 0, 1, 0];
        let table = LabelTable::assign(["LOC", "PER"]);
        let example =
            to_example(7, &tokens, &tags, &table, &AttachRules::default()).unwrap();
        assert_eq!(example.index, 7);
        assert_eq!(example.text, "John lives in London.");
        assert_eq!(example.entity_map.get("John").unwrap(), "PER");
        assert_eq!(example.entity_map.get("London").unwrap(), "LOC");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn decoding_any_id_array_is_total(
            tokens in prop::collection::vec("[a-z]{1,4}", 0..10),
            seed in prop::collection::vec(0u32..10, 0..10),
        ) {
            let tags: Vec<u32> = (0..tokens.len())
                .map(|k| seed.get(k).copied().unwrap_or(0))
                .collect();
            let table = LabelTable::assign(["A", "B", "C"]);
            let spans =
                spans_from_tags(&tokens, &tags, &table, &AttachRules::default()).unwrap();
            // Spans are in order, disjoint, and within bounds.
            let mut last_end = 0;
            for span in &spans {
                prop_assert!(span.start >= last_end);
                prop_assert!(span.start < span.end);
                prop_assert!(span.end <= tokens.len());
                last_end = span.end;
            }
        }
    }
}
