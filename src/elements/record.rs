//! Final vocabulary records.

use serde::{Deserialize, Serialize};

/// One extracted vocabulary entry.
///
/// `meaning` holds the meaning lines in reading order joined with `'\n'`;
/// `example` is empty unless example-sentence scanning is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// The headword
    pub word: String,
    /// Newline-joined meaning text
    pub meaning: String,
    /// Example sentences, blocks separated by a blank line
    pub example: String,
}

impl Record {
    /// Create a record without an example sentence.
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            example: String::new(),
        }
    }

    /// Attach example sentences.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }
}
