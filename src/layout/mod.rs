//! Layout analysis stages.
//!
//! This module turns recognized fragments and structure boxes into one
//! [`WordRow`] per headword:
//! - Candidate selection (size, pattern and left-margin filters)
//! - Table structure resolution (word column, exclusive rows, recovery)
//! - Row assembly (non-overlapping ownership bands)

pub mod candidate_selector;
pub mod row_assembler;
pub mod table_resolver;
pub mod word_row;

// Re-export main types
pub use candidate_selector::{prefilter_fragments, select_candidates};
pub use row_assembler::assemble_rows;
pub use table_resolver::{resolve_structure, ResolvedStructure};
pub use word_row::{sort_top_to_bottom, WordRow};
