//! Record building.
//!
//! Turns each row's meaning fragments into the final text: the first line
//! is expanded into its multi-line chain, merged with the lines the assigner
//! picked, put in reading order and joined. Optionally the fragments right of
//! the meaning are collected as example sentences.

use crate::config::{LineConfig, WordListConfig};
use crate::elements::{RecognizedFragment, Record};
use crate::layout::{sort_top_to_bottom, WordRow};
use crate::pipeline::lines::{merge_unique, order_lines, LineExpander};
use crate::utils::safe_float_cmp;

/// Builds [`Record`]s from fully assigned rows.
pub struct RecordBuilder<'a> {
    lines: &'a LineConfig,
    scan_examples: bool,
}

impl<'a> RecordBuilder<'a> {
    /// Create a builder from the pipeline configuration.
    pub fn new(config: &'a WordListConfig) -> Self {
        Self {
            lines: &config.lines,
            scan_examples: config.scan_examples,
        }
    }

    /// Finalize every row and produce one record per row with a meaning.
    ///
    /// Rows without meaning fragments are returned unchanged and produce no
    /// record.
    pub fn build(&self, rows: Vec<WordRow>) -> (Vec<WordRow>, Vec<Record>) {
        let mut records = Vec::with_capacity(rows.len());
        let rows: Vec<WordRow> = rows
            .into_iter()
            .map(|row| {
                if row.meaning_fragments.is_empty() {
                    log::debug!("Row '{}' has no meaning, dropped", row.word.text);
                    return row;
                }
                let mut row = self.expand_meaning(row);
                let meaning = join_lines(&row.meaning_fragments);

                let mut record = Record::new(row.word.text.trim(), meaning);
                if self.scan_examples {
                    let blocks = self.find_examples(&row);
                    record.example = blocks
                        .iter()
                        .map(|block| join_lines(block))
                        .collect::<Vec<_>>()
                        .join("\n\n");
                    row.example_fragments = blocks.into_iter().flatten().collect();
                }
                records.push(record);
                row
            })
            .collect();

        log::debug!("Record builder: {} records from {} rows", records.len(), rows.len());
        (rows, records)
    }

    /// Replace the row's meaning fragments with the ordered, expanded chain.
    fn expand_meaning(&self, mut row: WordRow) -> WordRow {
        let Some(first) = row.first_meaning().cloned() else {
            return row;
        };
        let expander = LineExpander::new(self.lines);
        let chain = expander.expand(&first, &row.native_language_fragments, &row.word);
        let merged = merge_unique(chain, &row.meaning_fragments);
        row.rejected_candidates.retain(|f| !merged.contains(f));
        row.meaning_fragments = order_lines(merged);
        row
    }

    /// Group the fragments right of the headword and meaning into example
    /// blocks, ordered left to right, each block top to bottom.
    fn find_examples(&self, row: &WordRow) -> Vec<Vec<RecognizedFragment>> {
        let Some(meaning) = row.first_meaning() else {
            return Vec::new();
        };
        let word = &row.word.bbox;
        let right_edge = word.right().max(meaning.bbox.right());
        let span_top = word.top().min(meaning.bbox.top());
        let span_bottom = word.bottom().max(meaning.bbox.bottom());

        let pool: Vec<RecognizedFragment> = row
            .fragments_in_band
            .iter()
            .filter(|f| !row.is_word(f) && !row.meaning_fragments.contains(f))
            .cloned()
            .collect();

        let mut blocks: Vec<Vec<RecognizedFragment>> = Vec::new();
        for fragment in pool.iter().filter(|f| {
            right_edge < f.bbox.left() && f.bbox.top() < span_bottom && span_top < f.bbox.bottom()
        }) {
            let font = fragment.font_size();
            match blocks
                .iter_mut()
                .find(|block| (fragment.bbox.left() - block[0].bbox.left()).abs() < 1.5 * font)
            {
                Some(block) => block.push(fragment.clone()),
                None => blocks.push(vec![fragment.clone()]),
            }
        }

        let expander = LineExpander::new(self.lines);
        let mut blocks: Vec<Vec<RecognizedFragment>> = blocks
            .into_iter()
            .map(|mut block| {
                sort_top_to_bottom(&mut block);
                let chain = expander.expand(&block[0], &pool, &row.word);
                let mut lines = merge_unique(chain, &block);
                sort_top_to_bottom(&mut lines);
                lines
            })
            .collect();
        blocks.sort_by(|a, b| safe_float_cmp(a[0].bbox.left(), b[0].bbox.left()));
        blocks
    }
}

fn join_lines(lines: &[RecognizedFragment]) -> String {
    lines
        .iter()
        .map(|f| f.text.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn frag(text: &str, x: f32, y: f32, w: f32) -> RecognizedFragment {
        RecognizedFragment::new(text, Rect::new(x, y, w, 0.04))
    }

    fn row_with(meanings: Vec<RecognizedFragment>, others: Vec<RecognizedFragment>) -> WordRow {
        let word = frag("apple", 0.10, 0.10, 0.12);
        let mut row = WordRow::new(word.clone());
        row.native_language_fragments = meanings.iter().chain(others.iter()).cloned().collect();
        row.fragments_in_band = std::iter::once(word)
            .chain(row.native_language_fragments.iter().cloned())
            .collect();
        row.meaning_fragments = meanings;
        row
    }

    #[test]
    fn test_rows_without_meaning_produce_no_record() {
        let config = WordListConfig::default();
        let builder = RecordBuilder::new(&config);
        let (rows, records) = builder.build(vec![row_with(Vec::new(), Vec::new())]);
        assert_eq!(rows.len(), 1);
        assert!(records.is_empty());
    }

    #[test]
    fn test_wrapped_meaning_is_joined() {
        let config = WordListConfig::default();
        let builder = RecordBuilder::new(&config);
        let row = row_with(
            vec![frag("りんご、", 0.40, 0.10, 0.2)],
            vec![frag("林檎の実", 0.40, 0.145, 0.2)],
        );
        let (rows, records) = builder.build(vec![row]);
        assert_eq!(records[0].word, "apple");
        assert_eq!(records[0].meaning, "りんご、\n林檎の実");
        assert_eq!(records[0].example, "");
        assert!(rows[0].rejected_candidates.is_empty());
    }

    #[test]
    fn test_examples_grouped_by_left_edge() {
        let config = WordListConfig::new().with_example_scanning(true);
        let builder = RecordBuilder::new(&config);
        let mut row = row_with(vec![frag("りんご", 0.25, 0.10, 0.1)], Vec::new());
        row.fragments_in_band.extend([
            frag("I ate an apple.", 0.70, 0.10, 0.25),
            frag("An apple a day.", 0.40, 0.10, 0.25),
            frag("keeps the doctor away.", 0.40, 0.145, 0.3),
        ]);
        let (rows, records) = builder.build(vec![row]);
        assert_eq!(
            records[0].example,
            "An apple a day.\nkeeps the doctor away.\n\nI ate an apple."
        );
        assert_eq!(rows[0].example_fragments.len(), 3);
    }
}
