//! Statistical verification of meaning assignments.
//!
//! On a well-formed page every meaning starts at roughly the same offset
//! from its headword. The most common offset is estimated with a Gaussian
//! kernel density estimate over all rows; a row whose meaning is nowhere near
//! that offset takes the first rejected candidate that is.

use serde::{Deserialize, Serialize};

use crate::config::MeaningConfig;
use crate::geometry::Rect;
use crate::layout::WordRow;
use crate::statistics::{kde_mode, median};

/// The page's typical offset from a headword to its first meaning line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalOffset {
    /// Modal `meaning.left - word.left`
    pub dx: f32,
    /// Modal `meaning.top - word.top`
    pub dy: f32,
    /// Median headword height
    pub font_size: f32,
}

impl ModalOffset {
    /// Where the first meaning line of `word` is expected.
    pub fn anticipated_box(&self, word: &Rect) -> Rect {
        let f = self.font_size;
        Rect::new(word.left() + self.dx, word.top() + self.dy, 3.0 * f, f)
    }

    /// A looser box around the expected position, used to pick a
    /// replacement meaning.
    pub fn search_box(&self, word: &Rect) -> Rect {
        let f = self.font_size;
        Rect::new(
            word.left() + self.dx - f,
            word.top() + self.dy - f / 2.0,
            5.0 * f,
            2.0 * f,
        )
    }
}

/// Estimate the modal offset from the rows that have a meaning.
///
/// Returns `None` when fewer than `min_rows_for_verification` rows have
/// one.
pub fn modal_offset(rows: &[WordRow], config: &MeaningConfig) -> Option<ModalOffset> {
    let offsets: Vec<(f32, f32)> = rows
        .iter()
        .filter_map(|row| {
            row.first_meaning().map(|m| {
                (
                    m.bbox.left() - row.word.bbox.left(),
                    m.bbox.top() - row.word.bbox.top(),
                )
            })
        })
        .collect();
    if offsets.len() < config.min_rows_for_verification {
        log::debug!(
            "Skipping meaning verification: {} rows with meanings",
            offsets.len()
        );
        return None;
    }

    let dxs: Vec<f32> = offsets.iter().map(|o| o.0).collect();
    let dys: Vec<f32> = offsets.iter().map(|o| o.1).collect();
    let heights: Vec<f32> = rows.iter().map(|r| r.word.bbox.height).collect();

    let offset = ModalOffset {
        dx: kde_mode(&dxs)?,
        dy: kde_mode(&dys)?,
        font_size: median(&heights)?,
    };
    log::debug!(
        "Modal meaning offset: dx {:.4}, dy {:.4}, font {:.4}",
        offset.dx,
        offset.dy,
        offset.font_size
    );
    Some(offset)
}

/// Check every row against the modal offset and repair outliers.
///
/// A row whose meanings miss the anticipated box takes the topmost rejected
/// candidate inside the search box as its only meaning; its previous
/// meanings become rejected candidates. Returns the rows, the offset used
/// (if verification ran) and the indices of the corrected rows.
pub fn verify_meanings(
    rows: Vec<WordRow>,
    config: &MeaningConfig,
) -> (Vec<WordRow>, Option<ModalOffset>, Vec<usize>) {
    if !config.verify {
        return (rows, None, Vec::new());
    }
    let Some(offset) = modal_offset(&rows, config) else {
        return (rows, None, Vec::new());
    };

    let mut corrected = Vec::new();
    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            let expected = offset.anticipated_box(&row.word.bbox);
            if row.meaning_fragments.iter().any(|m| m.bbox.intersects(&expected)) {
                return row;
            }
            let search = offset.search_box(&row.word.bbox);
            let Some(pos) = row
                .rejected_candidates
                .iter()
                .position(|c| c.bbox.intersects(&search))
            else {
                return row;
            };

            let replacement = row.rejected_candidates.remove(pos);
            log::debug!(
                "Row '{}': meaning replaced by '{}' near the modal offset",
                row.word.text,
                replacement.text
            );
            let previous = std::mem::replace(&mut row.meaning_fragments, vec![replacement]);
            row.rejected_candidates.extend(previous);
            crate::layout::sort_top_to_bottom(&mut row.rejected_candidates);
            corrected.push(i);
            row
        })
        .collect();

    (rows, Some(offset), corrected)
}
