//! The per-headword working record moved through the pipeline stages.

use serde::{Deserialize, Serialize};

use crate::elements::{RecognizedFragment, StructureBox};
use crate::geometry::Rect;
use crate::utils::safe_float_cmp;

/// One headword and everything the stages have learned about it.
///
/// Created by the Table Structure Resolver and enriched by every later
/// stage. Stages take `Vec<WordRow>` by value and hand back the enriched
/// vector, so no two stages ever share a mutable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRow {
    /// The headword fragment
    pub word: RecognizedFragment,
    /// Row boxes containing the headword's center
    pub candidate_row_boxes: Vec<StructureBox>,
    /// Column boxes containing the headword's center
    pub candidate_column_boxes: Vec<StructureBox>,
    /// Candidate row boxes that contain no other headword's center
    pub exclusive_row_boxes: Vec<StructureBox>,
    /// Vertical strip of the page this headword owns, spanning `x` in `[0, 1]`
    pub ownership_band: Rect,
    /// Every fragment whose center lies in the band, the headword included
    pub fragments_in_band: Vec<RecognizedFragment>,
    /// Band fragments written in the native language
    pub native_language_fragments: Vec<RecognizedFragment>,
    /// Native fragments chosen as the meaning, top to bottom
    pub meaning_fragments: Vec<RecognizedFragment>,
    /// Native fragments not chosen, top to bottom
    pub rejected_candidates: Vec<RecognizedFragment>,
    /// Example-sentence fragments, grouped blocks flattened left to right
    pub example_fragments: Vec<RecognizedFragment>,
}

impl WordRow {
    /// Start a row for a headword. The band is the headword's own extent
    /// until the Row Assembler replaces it.
    pub fn new(word: RecognizedFragment) -> Self {
        let ownership_band = Rect::new(0.0, word.bbox.top(), 1.0, word.bbox.height);
        Self {
            word,
            candidate_row_boxes: Vec::new(),
            candidate_column_boxes: Vec::new(),
            exclusive_row_boxes: Vec::new(),
            ownership_band,
            fragments_in_band: Vec::new(),
            native_language_fragments: Vec::new(),
            meaning_fragments: Vec::new(),
            rejected_candidates: Vec::new(),
            example_fragments: Vec::new(),
        }
    }

    /// Vertical midpoint of the headword.
    pub fn word_center_y(&self) -> f32 {
        self.word.center().y
    }

    /// The topmost meaning fragment, if any.
    pub fn first_meaning(&self) -> Option<&RecognizedFragment> {
        self.meaning_fragments
            .iter()
            .min_by(|a, b| safe_float_cmp(a.bbox.top(), b.bbox.top()))
    }

    /// Whether `fragment` is this row's headword.
    pub fn is_word(&self, fragment: &RecognizedFragment) -> bool {
        &self.word == fragment
    }
}

/// Sort fragments top to bottom, then left to right.
pub fn sort_top_to_bottom(fragments: &mut [RecognizedFragment]) {
    fragments.sort_by(|a, b| {
        safe_float_cmp(a.bbox.top(), b.bbox.top())
            .then_with(|| safe_float_cmp(a.bbox.left(), b.bbox.left()))
    });
}
