//! Boundary records: the examples alignment consumes.
//!
//! Records are fixed-field structs, not free-form maps; everything a batch
//! touches is validated once at the boundary so the alignment core can
//! assume well-formed input.
//!
//! JSON layout (array or one object per line):
//!
//! ```json
//! {
//!   "index": 0,
//!   "text": "John lives in London.",
//!   "entity_map": {"John": "PER", "London": "LOC"}
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One labeled example: text plus its entity surface → type record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Position of the example within its batch.
    #[serde(default)]
    pub index: usize,
    /// The example text.
    pub text: String,
    /// Entity surface strings mapped to their type names.
    pub entity_map: BTreeMap<String, String>,
}

impl Example {
    /// Example with an empty entity map.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Example {
            index,
            text: text.into(),
            entity_map: BTreeMap::new(),
        }
    }

    /// Add one entity surface → type entry.
    #[must_use]
    pub fn with_entity(mut self, surface: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.entity_map.insert(surface.into(), type_name.into());
        self
    }

    /// Check the record is alignable: non-blank text, non-blank entity
    /// surfaces and type names.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::validation(format!(
                "example {}: text is empty",
                self.index
            )));
        }
        for (surface, type_name) in &self.entity_map {
            if surface.trim().is_empty() {
                return Err(Error::validation(format!(
                    "example {}: empty entity surface",
                    self.index
                )));
            }
            if type_name.trim().is_empty() {
                return Err(Error::validation(format!(
                    "example {}: entity {:?} has an empty type",
                    self.index, surface
                )));
            }
        }
        Ok(())
    }
}

/// Per-example product of a localization step: the localized text and the
/// original → localized word mappings for that example's entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    /// Index of the [`Example`] this localizes.
    #[serde(default)]
    pub index: usize,
    /// The localized text.
    pub text: String,
    /// Original entity strings mapped to their localized forms.
    pub word_mappings: BTreeMap<String, String>,
}

impl Localization {
    /// Localization with empty word mappings.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Localization {
            index,
            text: text.into(),
            word_mappings: BTreeMap::new(),
        }
    }

    /// Add one original → localized word mapping.
    #[must_use]
    pub fn with_mapping(
        mut self,
        original: impl Into<String>,
        localized: impl Into<String>,
    ) -> Self {
        self.word_mappings.insert(original.into(), localized.into());
        self
    }

    /// Check the record is alignable: non-blank text and mapping strings.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::validation(format!(
                "localization {}: text is empty",
                self.index
            )));
        }
        for (original, localized) in &self.word_mappings {
            if original.trim().is_empty() || localized.trim().is_empty() {
                return Err(Error::validation(format!(
                    "localization {}: blank word mapping entry",
                    self.index
                )));
            }
        }
        Ok(())
    }
}

/// Parse a JSON array of examples.
pub fn examples_from_json(content: &str) -> Result<Vec<Example>> {
    serde_json::from_str(content).map_err(|e| Error::parse(format!("Failed to parse JSON: {}", e)))
}

/// Parse JSONL examples, one object per line. Blank lines are skipped.
pub fn examples_from_jsonl(content: &str) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let example: Example = serde_json::from_str(line).map_err(|e| {
            Error::parse(format!("Failed to parse JSONL line {}: {}", line_num + 1, e))
        })?;
        examples.push(example);
    }
    Ok(examples)
}

/// Load examples from a JSON or JSONL file and validate them.
///
/// A file whose every non-empty line is its own JSON object is treated as
/// JSONL; anything else must be a JSON array.
pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<Vec<Example>> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(Error::Io)?;

    let is_jsonl = content.lines().count() > 1
        && content
            .lines()
            .all(|line| line.trim().starts_with('{') && line.trim().ends_with('}'));

    let examples = if is_jsonl {
        examples_from_jsonl(&content)?
    } else {
        examples_from_json(&content)?
    };

    for example in &examples {
        example.validate()?;
    }
    Ok(examples)
}
