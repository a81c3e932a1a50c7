//! Table structure resolution.
//!
//! Reconciles the headword candidates with the (possibly incomplete) row and
//! column boxes of the structure detector:
//!
//! 1. Fill gaps between detected columns that clearly hold text.
//! 2. Pick the column holding the most candidates as the word column, or
//!    synthesize one from the candidates when no column qualifies.
//! 3. Stretch the word column vertically over columns running alongside it.
//! 4. Drop candidates outside the word column.
//! 5. Find the rows each headword owns exclusively.
//! 6. Promote headwords the candidate filters missed in rows that have none.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::StructureConfig;
use crate::elements::{RecognizedFragment, StructureBox};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::layout::word_row::WordRow;
use crate::statistics::first_quartile;
use crate::utils::safe_float_cmp;

/// The page's table structure after reconciliation with the headwords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStructure {
    /// All detected row boxes, de-duplicated
    pub row_boxes: Vec<StructureBox>,
    /// Detected and gap-filled column boxes, sorted by left edge
    pub column_boxes: Vec<StructureBox>,
    /// The column holding the headwords, stretched vertically
    pub word_column: StructureBox,
    /// Whether the word column was inferred from the candidates
    pub word_column_synthesized: bool,
}

/// Resolve the table structure and create one [`WordRow`] per headword.
///
/// `fragments` are all pre-filtered fragments of the page; `candidates` are
/// the Candidate Selector's output.
pub fn resolve_structure(
    candidates: Vec<RecognizedFragment>,
    fragments: &[RecognizedFragment],
    boxes: Vec<StructureBox>,
    config: &StructureConfig,
    pattern: &Regex,
) -> Result<(ResolvedStructure, Vec<WordRow>)> {
    if candidates.is_empty() {
        return Err(Error::NoWordCandidates);
    }

    let mut row_boxes: Vec<StructureBox> = Vec::new();
    let mut column_boxes: Vec<StructureBox> = Vec::new();
    for b in boxes {
        if b.is_row() && !row_boxes.contains(&b) {
            row_boxes.push(b);
        } else if b.is_column() && !column_boxes.contains(&b) {
            column_boxes.push(b);
        }
    }
    column_boxes.sort_by(|a, b| safe_float_cmp(a.bbox.left(), b.bbox.left()));

    fill_column_gaps(&mut column_boxes, fragments, candidates.len(), config.gap_fill_ratio);

    let (word_column, word_column_synthesized) = match dominant_column(&column_boxes, &candidates)
    {
        Some(column) => (column, false),
        None => {
            log::warn!("No detected column holds a headword, synthesizing the word column");
            (synthesize_word_column(&candidates), true)
        },
    };
    let word_column =
        extend_word_column(word_column, &column_boxes, config.column_extension_overlap);

    log::debug!(
        "Word column: x {:.3}..{:.3}, y {:.3}..{:.3}{}",
        word_column.bbox.left(),
        word_column.bbox.right(),
        word_column.bbox.top(),
        word_column.bbox.bottom(),
        if word_column_synthesized {
            " (synthesized)"
        } else {
            ""
        }
    );

    let mut rows: Vec<WordRow> = candidates
        .into_iter()
        .filter(|c| word_column.bbox.contains_center_of(&c.bbox))
        .map(WordRow::new)
        .collect();
    if rows.is_empty() {
        return Err(Error::NoWordCandidates);
    }

    let structure = ResolvedStructure {
        row_boxes,
        column_boxes,
        word_column,
        word_column_synthesized,
    };

    attach_boxes(&mut rows, &structure);
    let recovered =
        recover_missing_words(&rows, fragments, &structure, config.recovery_containment, pattern);
    if !recovered.is_empty() {
        log::debug!("Recovered {} headwords missed by the candidate filters", recovered.len());
        rows.extend(recovered.into_iter().map(WordRow::new));
        attach_boxes(&mut rows, &structure);
    }

    Ok((structure, rows))
}

/// Add a synthesized column for every gap between adjacent columns that
/// holds more fragment centers than `ratio` of the candidate count.
fn fill_column_gaps(
    columns: &mut Vec<StructureBox>,
    fragments: &[RecognizedFragment],
    candidate_count: usize,
    ratio: f32,
) {
    let threshold = (candidate_count as f32 * ratio) as usize;
    let mut filled = Vec::new();
    for pair in columns.windows(2) {
        let (current, next) = (&pair[0].bbox, &pair[1].bbox);
        let gap = next.left() - current.right();
        if gap <= 0.0 {
            continue;
        }
        let gap_box = Rect::new(current.right(), current.top(), gap, current.height);
        let inside = fragments
            .iter()
            .filter(|f| gap_box.contains_center_of(&f.bbox))
            .count();
        if inside > threshold {
            filled.push(StructureBox::synthesized_column(gap_box));
        }
    }
    if !filled.is_empty() {
        log::debug!("Filled {} column gaps", filled.len());
        columns.extend(filled);
        columns.sort_by(|a, b| safe_float_cmp(a.bbox.left(), b.bbox.left()));
    }
}

/// The column containing the most candidate centers. Ties go to the first
/// column; a column without candidates never qualifies.
fn dominant_column(
    columns: &[StructureBox],
    candidates: &[RecognizedFragment],
) -> Option<StructureBox> {
    let mut best: Option<(usize, StructureBox)> = None;
    for column in columns {
        let count = candidates
            .iter()
            .filter(|c| column.bbox.contains_center_of(&c.bbox))
            .count();
        if count > 0 && best.as_ref().map_or(true, |(n, _)| count > *n) {
            best = Some((count, *column));
        }
    }
    best.map(|(_, column)| column)
}

/// A full-height column spanning the candidates' horizontal extent.
fn synthesize_word_column(candidates: &[RecognizedFragment]) -> StructureBox {
    let left = candidates
        .iter()
        .map(|c| c.bbox.left())
        .fold(f32::INFINITY, f32::min);
    let right = candidates
        .iter()
        .map(|c| c.bbox.right())
        .fold(f32::NEG_INFINITY, f32::max);
    StructureBox::synthesized_column(Rect::from_points(left, 0.0, right, 1.0))
}

/// Stretch the word column over the vertical extent of every column that
/// overlaps it for more than `min_overlap` of its height.
fn extend_word_column(
    word_column: StructureBox,
    columns: &[StructureBox],
    min_overlap: f32,
) -> StructureBox {
    let base = word_column.bbox;
    let mut top = base.top();
    let mut bottom = base.bottom();
    for column in columns.iter().filter(|c| **c != word_column) {
        if column.bbox.vertical_overlap(&base) > min_overlap * base.height {
            top = top.min(column.bbox.top());
            bottom = bottom.max(column.bbox.bottom());
        }
    }
    StructureBox {
        bbox: Rect::from_points(base.left(), top, base.right(), bottom),
        ..word_column
    }
}

/// Attach candidate rows and columns to every headword and work out which
/// rows each headword owns alone.
fn attach_boxes(rows: &mut [WordRow], structure: &ResolvedStructure) {
    let counts: Vec<usize> = structure
        .row_boxes
        .iter()
        .map(|b| {
            rows.iter()
                .filter(|r| b.bbox.contains_center_of(&r.word.bbox))
                .count()
        })
        .collect();

    for row in rows.iter_mut() {
        let center = row.word.center();
        row.candidate_row_boxes = structure
            .row_boxes
            .iter()
            .filter(|b| b.bbox.contains_point(&center))
            .copied()
            .collect();
        row.exclusive_row_boxes = structure
            .row_boxes
            .iter()
            .zip(&counts)
            .filter(|(b, &n)| n == 1 && b.bbox.contains_point(&center))
            .map(|(b, _)| *b)
            .collect();
        row.candidate_column_boxes = structure
            .column_boxes
            .iter()
            .filter(|b| b.bbox.contains_point(&center))
            .copied()
            .collect();
    }
}

/// Look for headwords in detected rows that own no headword yet.
fn recover_missing_words(
    rows: &[WordRow],
    fragments: &[RecognizedFragment],
    structure: &ResolvedStructure,
    min_containment: f32,
    pattern: &Regex,
) -> Vec<RecognizedFragment> {
    let widths: Vec<f32> = rows.iter().map(|r| r.word.char_width()).collect();
    let Some(min_char_width) = first_quartile(&widths) else {
        return Vec::new();
    };
    let column = &structure.word_column.bbox;

    let mut empty_rows: Vec<&StructureBox> = structure
        .row_boxes
        .iter()
        .filter(|b| !rows.iter().any(|r| b.bbox.contains_center_of(&r.word.bbox)))
        .collect();
    empty_rows.sort_by(|a, b| safe_float_cmp(a.bbox.top(), b.bbox.top()));

    let mut recovered: Vec<RecognizedFragment> = Vec::new();
    for row_box in empty_rows {
        let found = fragments.iter().find(|f| {
            !rows.iter().any(|r| r.is_word(f))
                && !recovered.contains(f)
                && column.containment_rate(&f.bbox) >= min_containment
                && row_box.bbox.containment_rate(&f.bbox) >= min_containment
                && pattern.is_match(f.text.trim())
                && f.char_width() >= min_char_width
        });
        if let Some(fragment) = found {
            recovered.push(fragment.clone());
        }
    }
    recovered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeadwordPattern;

    fn frag(text: &str, x: f32, y: f32, w: f32, h: f32) -> RecognizedFragment {
        RecognizedFragment::new(text, Rect::new(x, y, w, h))
    }

    fn words() -> Vec<RecognizedFragment> {
        vec![
            frag("apple", 0.10, 0.10, 0.10, 0.04),
            frag("river", 0.10, 0.20, 0.10, 0.04),
            frag("stone", 0.10, 0.30, 0.10, 0.04),
        ]
    }

    fn pattern() -> Regex {
        HeadwordPattern::Word.regex().unwrap()
    }

    #[test]
    fn test_dominant_column_is_word_column() {
        let boxes = vec![
            StructureBox::column(Rect::new(0.05, 0.05, 0.25, 0.40)),
            StructureBox::column(Rect::new(0.45, 0.05, 0.45, 0.40)),
        ];
        let (structure, rows) = resolve_structure(
            words(),
            &words(),
            boxes,
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        assert!(!structure.word_column_synthesized);
        assert_eq!(structure.word_column.bbox.left(), 0.05);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_missing_columns_synthesize_word_column() {
        let (structure, rows) = resolve_structure(
            words(),
            &words(),
            Vec::new(),
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        assert!(structure.word_column_synthesized);
        assert_eq!(structure.word_column.bbox.top(), 0.0);
        assert_eq!(structure.word_column.bbox.bottom(), 1.0);
        assert_eq!(structure.word_column.bbox.left(), 0.10);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_column_without_candidates_is_not_word_column() {
        let boxes = vec![StructureBox::column(Rect::new(0.5, 0.0, 0.4, 1.0))];
        let (structure, _) = resolve_structure(
            words(),
            &words(),
            boxes,
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        assert!(structure.word_column_synthesized);
    }

    #[test]
    fn test_gap_between_columns_is_filled() {
        let mut fragments = words();
        for (i, y) in [0.10, 0.20, 0.30].iter().enumerate() {
            fragments.push(frag(&format!("gap{}", i), 0.32, *y, 0.06, 0.03));
        }
        let boxes = vec![
            StructureBox::column(Rect::new(0.05, 0.05, 0.25, 0.40)),
            StructureBox::column(Rect::new(0.45, 0.05, 0.45, 0.40)),
        ];
        let (structure, _) = resolve_structure(
            words(),
            &fragments,
            boxes,
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        assert_eq!(structure.column_boxes.len(), 3);
        let gap = &structure.column_boxes[1];
        assert_eq!(gap.confidence, 0.0);
        assert!((gap.bbox.left() - 0.30).abs() < 1e-6);
        assert!((gap.bbox.right() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_word_column_extends_over_parallel_column() {
        let boxes = vec![
            StructureBox::column(Rect::new(0.05, 0.05, 0.25, 0.40)),
            StructureBox::column(Rect::new(0.45, 0.00, 0.45, 0.60)),
        ];
        let (structure, _) = resolve_structure(
            words(),
            &words(),
            boxes,
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        let column = structure.word_column.bbox;
        assert_eq!(column.left(), 0.05);
        assert_eq!(column.top(), 0.0);
        assert!((column.bottom() - 0.60).abs() < 1e-6);
    }

    #[test]
    fn test_exclusive_rows_exclude_shared_boxes() {
        let boxes = vec![
            StructureBox::row(Rect::new(0.0, 0.08, 1.0, 0.09)),
            StructureBox::row(Rect::new(0.0, 0.18, 1.0, 0.20)),
        ];
        let (_, rows) = resolve_structure(
            words(),
            &words(),
            boxes,
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        let apple = rows.iter().find(|r| r.word.text == "apple").unwrap();
        let river = rows.iter().find(|r| r.word.text == "river").unwrap();
        assert_eq!(apple.exclusive_row_boxes.len(), 1);
        assert_eq!(river.candidate_row_boxes.len(), 1);
        assert!(river.exclusive_row_boxes.is_empty());
    }

    #[test]
    fn test_recovers_word_in_empty_row() {
        let mut fragments = words();
        // Lost by the size cut but sitting alone in its own row
        fragments.push(frag("cloud", 0.10, 0.41, 0.10, 0.03));
        let boxes = vec![
            StructureBox::column(Rect::new(0.05, 0.05, 0.25, 0.45)),
            StructureBox::row(Rect::new(0.0, 0.39, 1.0, 0.07)),
        ];
        let (_, rows) = resolve_structure(
            words(),
            &fragments,
            boxes,
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        assert_eq!(rows.len(), 4);
        let cloud = rows.iter().find(|r| r.word.text == "cloud").unwrap();
        assert_eq!(cloud.exclusive_row_boxes.len(), 1);
    }

    #[test]
    fn test_unknown_boxes_are_ignored() {
        let boxes = vec![StructureBox::new(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            0.9,
            crate::elements::StructureLabel::Unknown,
        )];
        let (structure, _) = resolve_structure(
            words(),
            &words(),
            boxes,
            &StructureConfig::default(),
            &pattern(),
        )
        .unwrap();
        assert!(structure.row_boxes.is_empty());
        assert!(structure.column_boxes.is_empty());
    }
}
