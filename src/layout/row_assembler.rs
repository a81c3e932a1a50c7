//! Ownership bands.
//!
//! Each headword owns the horizontal strip of the page from its own top (or
//! the top of its exclusive row) down to where the next headword's strip
//! begins. Bands of consecutive headwords share their boundary, never
//! overlap, and always contain their headword's vertical midpoint.
//!
//! Bands cover the page from the first headword's row down, not from 0.0.
//! Anything above the first headword (running titles, page headers) belongs
//! to no band and never reaches a record.

use crate::elements::RecognizedFragment;
use crate::geometry::Rect;
use crate::layout::table_resolver::ResolvedStructure;
use crate::layout::word_row::WordRow;
use crate::utils::safe_float_cmp;

/// Headwords whose midpoints are closer than this share a visual line; only
/// the first of them keeps a band.
const MIN_CENTER_SEPARATION: f32 = 1e-5;

/// Compute the ownership band of every headword and collect the fragments
/// whose centers fall inside it.
///
/// Rows come back sorted top to bottom.
pub fn assemble_rows(
    rows: Vec<WordRow>,
    structure: &ResolvedStructure,
    fragments: &[RecognizedFragment],
) -> Vec<WordRow> {
    let mut rows = rows;
    rows.sort_by(|a, b| safe_float_cmp(a.word_center_y(), b.word_center_y()));

    let before = rows.len();
    let mut deduped: Vec<WordRow> = Vec::with_capacity(rows.len());
    for row in rows {
        match deduped.last() {
            Some(prev) if row.word_center_y() - prev.word_center_y() < MIN_CENTER_SEPARATION => {
                log::debug!(
                    "Dropping headword '{}' sharing a line with '{}'",
                    row.word.text,
                    prev.word.text
                );
            },
            _ => deduped.push(row),
        }
    }
    let mut rows = deduped;
    if rows.len() < before {
        log::debug!("Row assembler: {} headwords share a line", before - rows.len());
    }
    if rows.is_empty() {
        return rows;
    }

    let boundaries = band_boundaries(&rows, structure);
    let last = rows.len() - 1;
    for (i, row) in rows.iter_mut().enumerate() {
        let (top, bottom) = (boundaries[i], boundaries[i + 1]);
        row.ownership_band = Rect::from_points(0.0, top, 1.0, bottom);
        row.fragments_in_band = fragments
            .iter()
            .filter(|f| in_band(f.center().y, top, bottom, i == last))
            .cloned()
            .collect();
    }

    rows
}

/// Half-open membership `[top, bottom)`; the last band also takes its bottom
/// edge.
pub fn in_band(y: f32, top: f32, bottom: f32, inclusive_bottom: bool) -> bool {
    y >= top && (y < bottom || (inclusive_bottom && y <= bottom))
}

/// Compute `rows.len() + 1` boundaries; band `i` is
/// `[boundaries[i], boundaries[i + 1])`.
///
/// The first boundary is the first row's top, so the strip above it is
/// unowned.
///
/// Rows must be sorted by strictly increasing word center.
fn band_boundaries(rows: &[WordRow], structure: &ResolvedStructure) -> Vec<f32> {
    let tops: Vec<f32> = rows.iter().map(row_top).collect();
    let centers: Vec<f32> = rows.iter().map(WordRow::word_center_y).collect();
    let n = rows.len();

    let mut boundaries = Vec::with_capacity(n + 1);

    let first_word = &rows[0].word.bbox;
    boundaries.push(if tops[0] <= centers[0] {
        tops[0]
    } else {
        first_word.top().min(centers[0])
    });

    for i in 1..n {
        let b = tops[i];
        if centers[i - 1] < b && b <= centers[i] {
            boundaries.push(b);
        } else {
            let mid = (centers[i - 1] + centers[i]) / 2.0;
            log::debug!(
                "Band boundary {:.4} between '{}' and '{}' out of order, using {:.4}",
                b,
                rows[i - 1].word.text,
                rows[i].word.text,
                mid
            );
            boundaries.push(mid);
        }
    }

    let last_word = &rows[n - 1].word.bbox;
    let max_row_bottom = structure
        .row_boxes
        .iter()
        .map(|b| b.bbox.bottom())
        .fold(f32::NEG_INFINITY, f32::max);
    let mut bottom = if max_row_bottom > last_word.bottom() {
        max_row_bottom
    } else {
        1.0
    };
    if !(bottom > centers[n - 1]) {
        bottom = 1.0f32.max(last_word.bottom());
    }
    boundaries.push(bottom);

    boundaries
}

/// Top of a row: the highest exclusive row box, or the headword itself.
fn row_top(row: &WordRow) -> f32 {
    row.exclusive_row_boxes
        .iter()
        .map(|b| b.bbox.top())
        .fold(None, |acc: Option<f32>, t| Some(acc.map_or(t, |a| a.min(t))))
        .unwrap_or_else(|| row.word.bbox.top())
}
