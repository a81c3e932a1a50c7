//! Meaning detection.
//!
//! Decides, once per page, whether meanings sit to the right of their
//! headwords or below them, assigns each row its meaning fragments and then
//! cross-checks every assignment against the page's typical word-to-meaning
//! offset.

pub mod assigner;
pub mod position;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use assigner::{assign_meanings, meaning_column};
pub use position::classify_position;
pub use verification::{modal_offset, verify_meanings, ModalOffset};

/// Where a page prints meanings relative to their headwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeaningPosition {
    /// In a column to the right of the word column
    Right,
    /// Beneath the headword, inside the word column
    Below,
}
