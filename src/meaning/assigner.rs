//! Meaning assignment.
//!
//! With meanings on the right, every row takes the native fragments that
//! touch the meaning column. With meanings below, the assigner falls back
//! through three progressively looser selections until one yields something:
//! fragments in the rows beneath the headword, fragments in the word column,
//! and finally every native fragment of the band.

use crate::config::MeaningConfig;
use crate::elements::{RecognizedFragment, StructureBox};
use crate::geometry::Rect;
use crate::layout::{sort_top_to_bottom, ResolvedStructure, WordRow};
use crate::meaning::MeaningPosition;
use crate::utils::safe_float_cmp;

/// The column meanings are read from when they sit to the right.
///
/// This is the nearest column whose center lies right of the word column's
/// center, or a synthesized strip from the word column to the page edge.
pub fn meaning_column(structure: &ResolvedStructure) -> StructureBox {
    let word_center_x = structure.word_column.bbox.center().x;
    structure
        .column_boxes
        .iter()
        .filter(|c| c.bbox.center().x > word_center_x)
        .min_by(|a, b| safe_float_cmp(a.bbox.center().x, b.bbox.center().x))
        .copied()
        .unwrap_or_else(|| {
            let left = structure.word_column.bbox.right();
            StructureBox::synthesized_column(Rect::new(left, 0.0, 1.0 - left, 1.0))
        })
}

/// Fill `meaning_fragments` and `rejected_candidates` of every row.
pub fn assign_meanings(
    rows: Vec<WordRow>,
    position: MeaningPosition,
    structure: &ResolvedStructure,
    config: &MeaningConfig,
) -> Vec<WordRow> {
    let column = match position {
        MeaningPosition::Right => Some(meaning_column(structure)),
        MeaningPosition::Below => None,
    };
    if let Some(column) = &column {
        log::debug!(
            "Meaning column: x {:.3}..{:.3}",
            column.bbox.left(),
            column.bbox.right()
        );
    }

    rows.into_iter()
        .map(|row| {
            let chosen = match &column {
                Some(column) => select_right(&row, &column.bbox),
                None => select_below(&row, structure, config),
            };
            split_candidates(row, chosen)
        })
        .collect()
}

fn select_right(row: &WordRow, column: &Rect) -> Vec<RecognizedFragment> {
    row.native_language_fragments
        .iter()
        .filter(|f| f.bbox.intersects(column))
        .cloned()
        .collect()
}

fn select_below(
    row: &WordRow,
    structure: &ResolvedStructure,
    config: &MeaningConfig,
) -> Vec<RecognizedFragment> {
    let word_column = &structure.word_column.bbox;
    let word_bottom = row.word.bbox.bottom();
    let rows_below: Vec<&Rect> = structure
        .row_boxes
        .iter()
        .map(|b| &b.bbox)
        .filter(|b| {
            let center = b.center();
            row.ownership_band.contains_point(&center) && center.y > word_bottom
        })
        .collect();

    let in_rows_below: Vec<RecognizedFragment> = row
        .native_language_fragments
        .iter()
        .filter(|f| {
            rows_below.iter().any(|b| b.contains_center_of(&f.bbox))
                && word_column.containment_rate(&f.bbox) >= config.column_containment
        })
        .cloned()
        .collect();
    if in_rows_below
        .iter()
        .any(|f| f.char_count() >= config.min_below_chars)
    {
        return in_rows_below;
    }

    let in_column: Vec<RecognizedFragment> = row
        .native_language_fragments
        .iter()
        .filter(|f| word_column.contains_center_of(&f.bbox))
        .cloned()
        .collect();
    if !in_column.is_empty() {
        return in_column;
    }

    row.native_language_fragments.clone()
}

/// Store the chosen fragments as meanings and every other native fragment
/// as a rejected candidate, both top to bottom.
fn split_candidates(mut row: WordRow, chosen: Vec<RecognizedFragment>) -> WordRow {
    let mut rejected: Vec<RecognizedFragment> = row
        .native_language_fragments
        .iter()
        .filter(|f| !chosen.contains(f))
        .cloned()
        .collect();
    let mut chosen = chosen;
    sort_top_to_bottom(&mut chosen);
    sort_top_to_bottom(&mut rejected);
    row.meaning_fragments = chosen;
    row.rejected_candidates = rejected;
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f32, y: f32, w: f32) -> RecognizedFragment {
        RecognizedFragment::new(text, Rect::new(x, y, w, 0.03))
    }

    fn structure(columns: Vec<StructureBox>, rows: Vec<StructureBox>) -> ResolvedStructure {
        ResolvedStructure {
            row_boxes: rows,
            column_boxes: columns,
            word_column: StructureBox::column(Rect::new(0.05, 0.0, 0.30, 1.0)),
            word_column_synthesized: false,
        }
    }

    fn row(native: Vec<RecognizedFragment>) -> WordRow {
        let mut row = WordRow::new(frag("apple", 0.1, 0.10, 0.1));
        row.ownership_band = Rect::new(0.0, 0.1, 1.0, 0.2);
        row.native_language_fragments = native;
        row
    }

    #[test]
    fn test_meaning_column_is_nearest_right() {
        let s = structure(
            vec![
                StructureBox::column(Rect::new(0.05, 0.0, 0.30, 1.0)),
                StructureBox::column(Rect::new(0.70, 0.0, 0.25, 1.0)),
                StructureBox::column(Rect::new(0.40, 0.0, 0.25, 1.0)),
            ],
            Vec::new(),
        );
        assert_eq!(meaning_column(&s).bbox.left(), 0.40);
    }

    #[test]
    fn test_meaning_column_synthesized() {
        let column = meaning_column(&structure(Vec::new(), Vec::new()));
        assert!((column.bbox.left() - 0.35).abs() < 1e-6);
        assert!((column.bbox.right() - 1.0).abs() < 1e-6);
        assert_eq!(column.confidence, 0.0);
    }

    #[test]
    fn test_right_assignment_and_rejects() {
        let s = structure(
            vec![StructureBox::column(Rect::new(0.40, 0.0, 0.25, 1.0))],
            Vec::new(),
        );
        let rows = vec![row(vec![
            frag("果物", 0.45, 0.15, 0.1),
            frag("りんご", 0.45, 0.11, 0.1),
            frag("例文の訳", 0.70, 0.11, 0.2),
        ])];
        let rows = assign_meanings(rows, MeaningPosition::Right, &s, &MeaningConfig::default());
        let meanings: Vec<_> = rows[0].meaning_fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(meanings, vec!["りんご", "果物"]);
        assert_eq!(rows[0].rejected_candidates.len(), 1);
        assert_eq!(rows[0].rejected_candidates[0].text, "例文の訳");
    }

    #[test]
    fn test_below_prefers_rows_beneath_word() {
        let s = structure(Vec::new(), vec![StructureBox::row(Rect::new(0.0, 0.16, 1.0, 0.06))]);
        let rows = vec![row(vec![
            frag("りんご", 0.1, 0.17, 0.1),
            frag("注", 0.1, 0.11, 0.03),
        ])];
        let rows = assign_meanings(rows, MeaningPosition::Below, &s, &MeaningConfig::default());
        assert_eq!(rows[0].meaning_fragments.len(), 1);
        assert_eq!(rows[0].meaning_fragments[0].text, "りんご");
        assert_eq!(rows[0].rejected_candidates[0].text, "注");
    }

    #[test]
    fn test_below_falls_back_to_word_column() {
        let s = structure(Vec::new(), Vec::new());
        let rows = vec![row(vec![frag("りんご", 0.1, 0.17, 0.1), frag("果物", 0.6, 0.17, 0.1)])];
        let rows = assign_meanings(rows, MeaningPosition::Below, &s, &MeaningConfig::default());
        assert_eq!(rows[0].meaning_fragments.len(), 1);
        assert_eq!(rows[0].meaning_fragments[0].text, "りんご");
    }

    #[test]
    fn test_below_last_resort_takes_everything() {
        let s = structure(Vec::new(), Vec::new());
        let rows = vec![row(vec![frag("果物", 0.6, 0.17, 0.1)])];
        let rows = assign_meanings(rows, MeaningPosition::Below, &s, &MeaningConfig::default());
        assert_eq!(rows[0].meaning_fragments.len(), 1);
        assert!(rows[0].rejected_candidates.is_empty());
    }
}
