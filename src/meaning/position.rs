//! Meaning position classification.

use crate::config::MeaningConfig;
use crate::geometry::Rect;
use crate::layout::WordRow;
use crate::meaning::MeaningPosition;

/// Classify the page layout by letting every row vote.
///
/// A row votes [`MeaningPosition::Below`] when it holds a native fragment
/// of at least `min_vote_chars` characters that lies mostly inside the word
/// column and below the headword's midpoint. The page is Below when more
/// than `below_vote_ratio` of its rows agree. A forced position in the
/// configuration wins over the vote.
pub fn classify_position(
    rows: &[WordRow],
    word_column: &Rect,
    config: &MeaningConfig,
) -> MeaningPosition {
    if let Some(position) = config.position {
        log::debug!("Meaning position forced to {:?}", position);
        return position;
    }

    let votes = rows.iter().filter(|row| votes_below(row, word_column, config)).count();
    let position = if votes as f32 > rows.len() as f32 * config.below_vote_ratio {
        MeaningPosition::Below
    } else {
        MeaningPosition::Right
    };
    log::debug!(
        "Meaning position: {} of {} rows vote below -> {:?}",
        votes,
        rows.len(),
        position
    );
    position
}

fn votes_below(row: &WordRow, word_column: &Rect, config: &MeaningConfig) -> bool {
    let word_center_y = row.word_center_y();
    row.native_language_fragments.iter().any(|f| {
        word_column.containment_rate(&f.bbox) >= config.column_containment
            && f.char_count() >= config.min_vote_chars
            && f.center().y > word_center_y
    })
}
