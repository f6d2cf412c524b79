//! # tagalign
//!
//! Entity-to-token label alignment: BIO-style integer tags from entity/type
//! maps, with localization-aware matching.
//!
//! Given text, a tokenization strategy, and entity surface strings mapped to
//! categorical types, tagalign produces one integer tag per token: `0`
//! outside entities, `(2k+1, 2k+2)` begin/inside pairs for the type at
//! sorted rank `k`. Matching works by reconstructing token windows back
//! into surface text, so WordPiece-style `##` continuations and attached
//! punctuation line up without character offsets.
//!
//! - **Alignment**: longest-match-wins span resolution over joined windows
//! - **Localization**: original and localized entity strings match
//!   interchangeably via per-example word mappings
//! - **Decoding**: tag arrays back into typed spans and reconstructed
//!   examples
//!
//! ## Quick Start
//!
//! ```rust
//! use tagalign::{BatchAligner, Example};
//!
//! let examples = vec![
//!     Example::new(0, "John lives in London.")
//!         .with_entity("John", "PER")
//!         .with_entity("London", "LOC"),
//! ];
//!
//! let output = BatchAligner::new().align_batch(&examples)?;
//! let aligned = &output.examples[0];
//! assert_eq!(aligned.tokens, ["John", "lives", "in", "London", "."]);
//! // LOC is rank 0 -> (1, 2); PER is rank 1 -> (3, 4).
//! assert_eq!(aligned.tags, [3, 0, 0, 1, 0]);
//! # Ok::<(), tagalign::Error>(())
//! ```
//!
//! ## Direct Alignment
//!
//! The batch layer is convenience; the engine itself takes any token slice
//! and any entity → id-pair map:
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use tagalign::{Aligner, LabelPair};
//!
//! let mut terms = BTreeMap::new();
//! terms.insert("New York".to_string(), LabelPair::new(1, 2));
//! terms.insert("New York City".to_string(), LabelPair::new(1, 2));
//!
//! let tokens = ["New", "York", "City", "is", "big"];
//! assert_eq!(Aligner::new().align(&tokens, &terms), [1, 2, 2, 0, 0]);
//! ```
//!
//! ## Modules
//!
//! | Module | What it does |
//! |--------|--------------|
//! | [`tokenize`] | Tokenization strategies (Unicode whole-word; HF subword behind `hf-tokenizers`) |
//! | [`token`] | Continuation markers (`##`) and token surfaces |
//! | [`join`] | Surface joining: continuation and punctuation attachment rules |
//! | [`label`] | Label tables: deterministic id assignment and reverse lookup |
//! | [`mapping`] | Bidirectional original↔localized entity mappings |
//! | [`align`] | Candidate search and longest-first overlap resolution |
//! | [`example`] | Boundary records, validation, JSON/JSONL loading |
//! | [`batch`] | Whole-batch pipeline with a shared label table |
//! | [`decode`] | Tags back into spans and reconstructed examples |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! tagalign = "0.1"                                             # built-in tokenizer only
//! tagalign = { version = "0.1", features = ["hf-tokenizers"] } # + HuggingFace tokenizers
//! ```
//!
//! With `hf-tokenizers` enabled, `tokenizers::Tokenizer` implements
//! [`Tokenizer`] directly and can be handed to
//! [`BatchAligner::with_tokenizer`].

#![warn(missing_docs)]

pub mod align;
pub mod batch;
pub mod decode;
mod error;
pub mod example;
pub mod join;
pub mod label;
pub mod mapping;
pub mod token;
pub mod tokenize;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use tagalign::prelude::*;
    //!
    //! let output = BatchAligner::new()
    //!     .align_batch(&[Example::new(0, "visit Paris").with_entity("Paris", "LOC")])
    //!     .unwrap();
    //! assert_eq!(output.examples[0].tags, [0, 1]);
    //! ```
    pub use crate::align::{Aligner, SpanCandidate};
    pub use crate::batch::{AlignedExample, BatchAligner, BatchOutput};
    pub use crate::decode::TaggedSpan;
    pub use crate::error::{Error, Result};
    pub use crate::example::{Example, Localization};
    pub use crate::join::AttachRules;
    pub use crate::label::{LabelPair, LabelTable, TagRole, OUTSIDE_ID};
    pub use crate::tokenize::{Tokenizer, UnicodeTokenizer};
}

// Re-exports
pub use align::{Aligner, SpanCandidate};
pub use batch::{AlignedExample, BatchAligner, BatchOutput};
pub use decode::TaggedSpan;
pub use error::{Error, Result};
pub use example::{examples_from_json, examples_from_jsonl, load_examples, Example, Localization};
pub use join::{join_tokens, AttachRules, WindowJoiner};
pub use label::{LabelPair, LabelTable, TagRole, OUTSIDE_ID};
pub use mapping::{entity_pairs, flatten_bidirectional, resolve_type, search_terms};
pub use token::{is_continuation, surface, CONTINUATION_PREFIX};
pub use tokenize::{Tokenizer, UnicodeTokenizer};
