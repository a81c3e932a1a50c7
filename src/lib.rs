// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Wordlist Oxide
//!
//! Layout analysis for photographed vocabulary lists: turns the text
//! fragments and table-structure boxes recognized on one page into
//! `(headword, meaning, example)` records.
//!
//! ## Pipeline
//!
//! ```text
//! Image
//!     ↓
//! [TextRecognizer] + [StructureDetector]   (external collaborators)
//!     ↓
//! RecognizedFragment[] + StructureBox[]
//!     ↓
//! [Candidate Selector]        tallest fragments matching the headword pattern,
//!                             near the first-quartile left edge
//!     ↓
//! [Table Structure Resolver]  word column, gap columns, exclusive rows,
//!                             recovery of missed headwords
//!     ↓
//! [Row Assembler]             one ownership band per headword
//!     ↓
//! [Language Classifier]       native-language fragments of each band
//!     ↓
//! [Meaning Position]          Right or Below, once per page
//!     ↓
//! [Meaning Assigner]          per-row meanings + modal-offset verification
//!     ↓
//! [Record Builder]            multi-line expansion, ordering, examples
//!     ↓
//! Record[]
//! ```
//!
//! Every stage is a pure function over owned values. The only entry points
//! with side effects are the collaborators behind
//! [`WordListPipeline::extract`].
//!
//! ## Quick Start
//!
//! ```
//! use wordlist_oxide::elements::{RecognizedFragment, StructureBox};
//! use wordlist_oxide::geometry::Rect;
//! use wordlist_oxide::WordListPipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fragments = vec![
//!     RecognizedFragment::new("apple", Rect::new(0.10, 0.10, 0.12, 0.04)),
//!     RecognizedFragment::new("りんご", Rect::new(0.50, 0.105, 0.09, 0.03)),
//!     RecognizedFragment::new("river", Rect::new(0.10, 0.20, 0.12, 0.04)),
//!     RecognizedFragment::new("かわ、河川", Rect::new(0.50, 0.205, 0.15, 0.03)),
//!     RecognizedFragment::new("stone", Rect::new(0.10, 0.30, 0.12, 0.04)),
//!     RecognizedFragment::new("いし", Rect::new(0.50, 0.305, 0.06, 0.03)),
//!     RecognizedFragment::new("12", Rect::new(0.90, 0.95, 0.02, 0.02)),
//! ];
//! let columns = vec![
//!     StructureBox::column(Rect::new(0.05, 0.05, 0.30, 0.35)),
//!     StructureBox::column(Rect::new(0.45, 0.05, 0.40, 0.35)),
//! ];
//!
//! let pipeline = WordListPipeline::new();
//! let analysis = pipeline.analyze(fragments, columns)?;
//! assert_eq!(analysis.records[0].word, "apple");
//! assert_eq!(analysis.records[0].meaning, "りんご");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Core data model
pub mod elements;
pub mod geometry;

// Layout analysis
pub mod layout;

// Meaning detection
pub mod language;
pub mod meaning;
pub mod statistics;

// Orchestration
pub mod pipeline;

// Debug visualization
pub mod debug;

// Re-exports
pub use config::WordListConfig;
pub use elements::{RecognizedFragment, Record, StructureBox, StructureLabel};
pub use error::{Error, Result};
pub use geometry::Rect;
pub use language::{Language, LanguageIdentifier, ScriptLanguageIdentifier};
pub use meaning::MeaningPosition;
pub use pipeline::{PageAnalysis, StructureDetector, TextRecognizer, WordListPipeline};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats without panicking on NaN.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so NaN boxes sink to the end of any ascending sort.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(0.1, 0.2), Ordering::Less);
            assert_eq!(safe_float_cmp(0.2, 0.1), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.5, 0.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan_sorts_last() {
            let mut values = vec![0.3, f32::NAN, 0.1];
            values.sort_by(|a, b| safe_float_cmp(*a, *b));
            assert_eq!(values[0], 0.1);
            assert_eq!(values[1], 0.3);
            assert!(values[2].is_nan());
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "wordlist_oxide");
    }
}
