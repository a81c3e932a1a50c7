//! Page elements consumed and produced by the word-list pipeline.
//!
//! Inputs come from external collaborators and are read-only:
//! - [`RecognizedFragment`]: one OCR text span with its bounding box
//! - [`StructureBox`]: one detected table row/column region
//!
//! The output unit is a [`Record`], handed to the caller once per headword.

mod fragment;
mod record;
mod structure;

pub use fragment::RecognizedFragment;
pub use record::Record;
pub use structure::{StructureBox, StructureLabel};
