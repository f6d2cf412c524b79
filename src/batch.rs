//! Batch alignment: validated examples in, tag arrays out.
//!
//! A batch shares one label table. For same-language batches the table is
//! assigned from the distinct entity types across all examples; for
//! localized batches it is assigned from the *original* examples, so ids
//! stay comparable between a source corpus and its localizations. Each
//! example then aligns independently against the shared, read-only table.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::align::Aligner;
use crate::error::{Error, Result};
use crate::example::{Example, Localization};
use crate::label::LabelTable;
use crate::mapping::{entity_pairs, search_terms};
use crate::tokenize::{Tokenizer, UnicodeTokenizer};

/// One aligned example: its tokens and the tag id per token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedExample {
    /// Index carried over from the input record.
    pub index: usize,
    /// Raw tokens the tags are aligned to.
    pub tokens: Vec<String>,
    /// One tag id per token.
    pub tags: Vec<u32>,
}

/// Result of aligning a batch: the shared label table plus every aligned
/// example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// The id assignment all `examples` were tagged with.
    pub label_table: LabelTable,
    /// Aligned examples, in input order.
    pub examples: Vec<AlignedExample>,
}

/// Batch-level pipeline: validation, label table assignment, tokenization,
/// alignment.
pub struct BatchAligner {
    aligner: Aligner,
    tokenizer: Box<dyn Tokenizer>,
}

impl Default for BatchAligner {
    fn default() -> Self {
        BatchAligner::new()
    }
}

impl BatchAligner {
    /// Pipeline with the default [`Aligner`] and the Unicode whole-word
    /// tokenizer.
    #[must_use]
    pub fn new() -> Self {
        BatchAligner {
            aligner: Aligner::new(),
            tokenizer: Box::new(UnicodeTokenizer::new()),
        }
    }

    /// Replace the alignment engine.
    #[must_use]
    pub fn with_aligner(mut self, aligner: Aligner) -> Self {
        self.aligner = aligner;
        self
    }

    /// Replace the tokenization strategy.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Align a same-language batch.
    ///
    /// Validates every record first, assigns the label table from the
    /// distinct types across the batch, then aligns each example. Nothing
    /// partial escapes: the first invalid record fails the whole call.
    pub fn align_batch(&self, examples: &[Example]) -> Result<BatchOutput> {
        for example in examples {
            example.validate()?;
        }
        let table = LabelTable::assign(
            examples
                .iter()
                .flat_map(|e| e.entity_map.values().map(String::as_str)),
        );
        self.run(table, examples)
    }

    /// Align a same-language batch under a caller-supplied label table.
    ///
    /// The table is used as given; types it does not cover degrade to
    /// outside tags per entity, exactly as during assignment.
    pub fn align_batch_with(&self, table: LabelTable, examples: &[Example]) -> Result<BatchOutput> {
        for example in examples {
            example.validate()?;
        }
        self.run(table, examples)
    }

    /// Align localized texts against their original examples.
    ///
    /// The label table comes from the original examples' types. Each
    /// localization is matched to its example by `index`; its search terms
    /// cover both the original and the localized entity strings, so
    /// untranslated surfaces still match.
    pub fn align_localized_batch(
        &self,
        examples: &[Example],
        localizations: &[Localization],
    ) -> Result<BatchOutput> {
        for example in examples {
            example.validate()?;
        }
        for localization in localizations {
            localization.validate()?;
        }

        let mut by_index: HashMap<usize, &Example> = HashMap::with_capacity(examples.len());
        for example in examples {
            if by_index.insert(example.index, example).is_some() {
                return Err(Error::validation(format!(
                    "duplicate example index {}",
                    example.index
                )));
            }
        }

        let table = LabelTable::assign(
            examples
                .iter()
                .flat_map(|e| e.entity_map.values().map(String::as_str)),
        );

        log::info!(
            "aligning {} localizations against {} examples ({} entity types)",
            localizations.len(),
            examples.len(),
            table.len()
        );

        let mut aligned = Vec::with_capacity(localizations.len());
        for localization in localizations {
            let example = by_index.get(&localization.index).ok_or_else(|| {
                Error::validation(format!(
                    "localization {} has no matching example",
                    localization.index
                ))
            })?;
            let terms = search_terms(&localization.word_mappings, &example.entity_map, &table);
            let tokens = self.tokenizer.tokenize(&localization.text)?;
            let tags = self.aligner.align(&tokens, &terms);
            aligned.push(AlignedExample {
                index: localization.index,
                tokens,
                tags,
            });
        }

        Ok(BatchOutput {
            label_table: table,
            examples: aligned,
        })
    }

    /// Distinct entity types across a batch, sorted.
    ///
    /// The same set [`align_batch`](Self::align_batch) assigns ids from;
    /// exposed for callers that build their own tables up front.
    #[must_use]
    pub fn collect_types(examples: &[Example]) -> Vec<String> {
        let distinct: BTreeSet<&str> = examples
            .iter()
            .flat_map(|e| e.entity_map.values().map(String::as_str))
            .collect();
        distinct.into_iter().map(str::to_string).collect()
    }

    fn run(&self, table: LabelTable, examples: &[Example]) -> Result<BatchOutput> {
        log::info!(
            "aligning batch of {} examples ({} entity types)",
            examples.len(),
            table.len()
        );
        let mut aligned = Vec::with_capacity(examples.len());
        for example in examples {
            let terms = entity_pairs(&example.entity_map, &table);
            let tokens = self.tokenizer.tokenize(&example.text)?;
            let tags = self.aligner.align(&tokens, &terms);
            aligned.push(AlignedExample {
                index: example.index,
                tokens,
                tags,
            });
        }
        Ok(BatchOutput {
            label_table: table,
            examples: aligned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelPair;
    use std::collections::BTreeMap;

    fn example() -> Example {
        Example::new(0, "John lives in London.")
            .with_entity("John", "PER")
            .with_entity("London", "LOC")
    }

    #[test]
    fn batch_assigns_table_and_aligns() {
        let out = BatchAligner::new().align_batch(&[example()]).unwrap();
        assert_eq!(out.label_table.get("LOC"), Some(LabelPair::new(1, 2)));
        assert_eq!(out.label_table.get("PER"), Some(LabelPair::new(3, 4)));

        let aligned = &out.examples[0];
        assert_eq!(aligned.tokens, ["John", "lives", "in", "London", "."]);
        assert_eq!(aligned.tags, [3, 0, 0, 1, 0]);
    }

    #[test]
    fn table_spans_the_whole_batch() {
        let batch = [
            Example::new(0, "visit Paris").with_entity("Paris", "LOC"),
            Example::new(1, "call Ann").with_entity("Ann", "PER"),
        ];
        let out = BatchAligner::new().align_batch(&batch).unwrap();
        // Both types get ids even though each example uses only one.
        assert_eq!(out.label_table.len(), 2);
        assert_eq!(out.examples[0].tags, [0, 1]);
        assert_eq!(out.examples[1].tags, [0, 3]);
    }

    #[test]
    fn invalid_record_fails_the_whole_batch() {
        let batch = [example(), Example::new(1, "  ")];
        let err = BatchAligner::new().align_batch(&batch).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn caller_supplied_table_is_used_verbatim() {
        let mut pairs = BTreeMap::new();
        pairs.insert("PER".to_string(), LabelPair::new(7, 8));
        let table = LabelTable::from_pairs(pairs).unwrap();

        let out = BatchAligner::new()
            .align_batch_with(table, &[example()])
            .unwrap();
        // LOC is not covered: London degrades to outside.
        assert_eq!(out.examples[0].tags, [7, 0, 0, 0, 0]);
    }

    #[test]
    fn localized_batch_matches_both_directions() {
        let examples = [example()];
        let localizations = [Localization::new(0, "Jean vit à Londres.")
            .with_mapping("John", "Jean")
            .with_mapping("London", "Londres")];

        let out = BatchAligner::new()
            .align_localized_batch(&examples, &localizations)
            .unwrap();
        let aligned = &out.examples[0];
        assert_eq!(aligned.tokens, ["Jean", "vit", "à", "Londres", "."]);
        // Table ids come from the original example's types.
        assert_eq!(aligned.tags, [3, 0, 0, 1, 0]);
    }

    #[test]
    fn untranslated_surfaces_still_match() {
        let examples = [Example::new(0, "John spoke.").with_entity("John", "PER")];
        // The localization kept the proper noun as-is.
        let localizations =
            [Localization::new(0, "John a parlé.").with_mapping("John", "John")];
        let out = BatchAligner::new()
            .align_localized_batch(&examples, &localizations)
            .unwrap();
        assert_eq!(out.examples[0].tags[0], 1);
    }

    #[test]
    fn unmatched_localization_index_is_an_error() {
        let err = BatchAligner::new()
            .align_localized_batch(&[example()], &[Localization::new(5, "Jean.")])
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn duplicate_example_indices_are_rejected() {
        let examples = [Example::new(0, "a b"), Example::new(0, "c d")];
        let err = BatchAligner::new()
            .align_localized_batch(&examples, &[])
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn empty_batch_is_fine() {
        let out = BatchAligner::new().align_batch(&[]).unwrap();
        assert!(out.label_table.is_empty());
        assert!(out.examples.is_empty());
    }

    #[test]
    fn collect_types_is_sorted_and_distinct() {
        let batch = [
            Example::new(0, "x").with_entity("a", "PER").with_entity("b", "LOC"),
            Example::new(1, "y").with_entity("c", "PER"),
        ];
        assert_eq!(BatchAligner::collect_types(&batch), ["LOC", "PER"]);
    }

    #[test]
    fn tokenizer_failures_propagate() {
        struct Failing;
        impl Tokenizer for Failing {
            fn tokenize(&self, _text: &str) -> Result<Vec<String>> {
                Err(Error::tokenize("broken"))
            }
        }
        let err = BatchAligner::new()
            .with_tokenizer(Box::new(Failing))
            .align_batch(&[example()])
            .unwrap_err();
        assert!(matches!(err, Error::Tokenize(_)));
    }
}
