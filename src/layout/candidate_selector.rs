//! Headword candidate selection.
//!
//! Headwords are set in the largest type on the page and start at a common
//! left margin. The selector keeps the tallest fragments, filters them by the
//! headword pattern and then keeps those whose left edge sits near the first
//! quartile of all candidate left edges. The quartile (rather than the
//! minimum) tolerates a few stray fragments left of the word column.

use regex::Regex;

use crate::config::CandidateConfig;
use crate::elements::RecognizedFragment;
use crate::error::{Error, Result};
use crate::utils::safe_float_cmp;

/// Drop fragments that can never carry content: empty text and bare
/// integers such as page or row numbers.
pub fn prefilter_fragments(fragments: Vec<RecognizedFragment>) -> Vec<RecognizedFragment> {
    fragments
        .into_iter()
        .filter(|f| !f.text.trim().is_empty() && !f.is_only_number())
        .collect()
}

/// Select headword candidates from the page's fragments.
///
/// Returns the candidates sorted by left edge.
///
/// # Errors
///
/// Returns [`Error::NoWordCandidates`] when the size and pattern filters
/// leave nothing.
///
/// # Examples
///
/// ```
/// use wordlist_oxide::config::{CandidateConfig, HeadwordPattern};
/// use wordlist_oxide::elements::RecognizedFragment;
/// use wordlist_oxide::geometry::Rect;
/// use wordlist_oxide::layout::select_candidates;
///
/// let fragments = vec![
///     RecognizedFragment::new("apple", Rect::new(0.1, 0.1, 0.1, 0.04)),
///     RecognizedFragment::new("river", Rect::new(0.1, 0.2, 0.1, 0.04)),
///     RecognizedFragment::new("りんご", Rect::new(0.5, 0.1, 0.1, 0.03)),
///     RecognizedFragment::new("かわ", Rect::new(0.5, 0.2, 0.1, 0.03)),
/// ];
/// let pattern = HeadwordPattern::Word.regex().unwrap();
/// let candidates = select_candidates(&fragments, &CandidateConfig::default(), &pattern).unwrap();
/// assert_eq!(candidates.len(), 2);
/// ```
pub fn select_candidates(
    fragments: &[RecognizedFragment],
    config: &CandidateConfig,
    pattern: &Regex,
) -> Result<Vec<RecognizedFragment>> {
    let mut by_height: Vec<&RecognizedFragment> = fragments.iter().collect();
    by_height.sort_by(|a, b| safe_float_cmp(b.bbox.height, a.bbox.height));

    let keep = (fragments.len().saturating_sub(1) as f32 * config.tallest_fraction) as usize;
    let mut candidates: Vec<RecognizedFragment> = by_height
        .into_iter()
        .take(keep)
        .filter(|f| pattern.is_match(f.text.trim()))
        .cloned()
        .collect();

    log::debug!(
        "Candidate selector: {} fragments, {} tallest kept, {} match the headword pattern",
        fragments.len(),
        keep,
        candidates.len()
    );

    if candidates.is_empty() {
        return Err(Error::NoWordCandidates);
    }

    candidates.sort_by(|a, b| safe_float_cmp(a.bbox.left(), b.bbox.left()));
    let x_q1 = candidates[(candidates.len() - 1) / 4].bbox.left();

    let selected = match config.words_per_page {
        Some(limit) => nearest_to_margin(candidates, x_q1, limit),
        None => candidates
            .into_iter()
            .filter(|f| {
                let left = f.bbox.left();
                x_q1 - config.column_band < left && left < x_q1 + config.column_band
            })
            .collect::<Vec<_>>(),
    };

    log::debug!("Candidate selector: first quartile x = {:.3}, {} selected", x_q1, selected.len());

    if selected.is_empty() {
        return Err(Error::NoWordCandidates);
    }
    Ok(selected)
}

/// Keep the `limit` candidates whose left edge is closest to the margin,
/// preserving the left-to-right order of the input.
fn nearest_to_margin(
    candidates: Vec<RecognizedFragment>,
    x_q1: f32,
    limit: usize,
) -> Vec<RecognizedFragment> {
    let mut ranked: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(i, f)| (i, (f.bbox.left() - x_q1).abs()))
        .collect();
    ranked.sort_by(|a, b| safe_float_cmp(a.1, b.1));

    let mut keep: Vec<usize> = ranked.into_iter().take(limit).map(|(i, _)| i).collect();
    keep.sort_unstable();

    let mut keep = keep.into_iter().peekable();
    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(i, f)| {
            if keep.peek() == Some(&i) {
                keep.next();
                Some(f)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeadwordPattern;
    use crate::geometry::Rect;

    fn frag(text: &str, x: f32, y: f32, h: f32) -> RecognizedFragment {
        RecognizedFragment::new(text, Rect::new(x, y, 0.1, h))
    }

    fn word_pattern() -> Regex {
        HeadwordPattern::Word.regex().unwrap()
    }

    #[test]
    fn test_prefilter_drops_numbers_and_blanks() {
        let fragments = vec![
            frag("12", 0.9, 0.9, 0.02),
            frag("  ", 0.5, 0.5, 0.02),
            frag("apple", 0.1, 0.1, 0.04),
        ];
        let kept = prefilter_fragments(fragments);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "apple");
    }

    #[test]
    fn test_smallest_fragments_are_never_candidates() {
        // Five fragments keep (5 - 1) * 0.8 = 3; the two shortest are dropped
        let fragments = vec![
            frag("apple", 0.1, 0.1, 0.05),
            frag("river", 0.1, 0.2, 0.05),
            frag("stone", 0.1, 0.3, 0.05),
            frag("tiny", 0.1, 0.4, 0.01),
            frag("small", 0.1, 0.5, 0.01),
        ];
        let candidates =
            select_candidates(&fragments, &CandidateConfig::default(), &word_pattern()).unwrap();
        let texts: Vec<_> = candidates.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts.len(), 3);
        assert!(!texts.contains(&"tiny"));
        assert!(!texts.contains(&"small"));
    }

    #[test]
    fn test_pattern_rejects_non_words() {
        let fragments = vec![
            frag("apple", 0.1, 0.1, 0.05),
            frag("e.g.", 0.1, 0.2, 0.05),
            frag("りんご", 0.1, 0.3, 0.05),
            frag("x", 0.1, 0.4, 0.01),
        ];
        let candidates =
            select_candidates(&fragments, &CandidateConfig::default(), &word_pattern()).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "apple");
    }

    #[test]
    fn test_idiom_pattern_accepts_phrases() {
        let fragments = vec![
            frag("look up to", 0.1, 0.1, 0.05),
            frag("give in", 0.1, 0.2, 0.05),
            frag("x", 0.1, 0.4, 0.01),
        ];
        let pattern = HeadwordPattern::Idiom.regex().unwrap();
        let candidates =
            select_candidates(&fragments, &CandidateConfig::default(), &pattern).unwrap();
        assert_eq!(candidates.len(), 1);

        let words = select_candidates(&fragments, &CandidateConfig::default(), &word_pattern());
        assert!(matches!(words, Err(Error::NoWordCandidates)));
    }

    #[test]
    fn test_quartile_band_excludes_far_column() {
        let fragments = vec![
            frag("apple", 0.10, 0.1, 0.05),
            frag("river", 0.11, 0.2, 0.05),
            frag("stone", 0.12, 0.3, 0.05),
            frag("cloud", 0.10, 0.4, 0.05),
            frag("Note", 0.60, 0.5, 0.05),
            frag("x", 0.1, 0.7, 0.01),
            frag("y", 0.1, 0.8, 0.01),
            frag("z", 0.1, 0.9, 0.01),
        ];
        let candidates =
            select_candidates(&fragments, &CandidateConfig::default(), &word_pattern()).unwrap();
        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|f| f.text != "Note"));
    }

    #[test]
    fn test_no_candidates_error() {
        let fragments = vec![frag("りんご", 0.1, 0.1, 0.05), frag("かわ", 0.1, 0.2, 0.05)];
        let result = select_candidates(&fragments, &CandidateConfig::default(), &word_pattern());
        assert!(matches!(result, Err(Error::NoWordCandidates)));
        assert!(select_candidates(&[], &CandidateConfig::default(), &word_pattern()).is_err());
    }

    #[test]
    fn test_words_per_page_keeps_nearest() {
        let fragments = vec![
            frag("apple", 0.10, 0.1, 0.05),
            frag("river", 0.10, 0.2, 0.05),
            frag("stone", 0.13, 0.3, 0.05),
            frag("cloud", 0.30, 0.4, 0.05),
            frag("x", 0.1, 0.8, 0.01),
            frag("y", 0.1, 0.9, 0.01),
        ];
        let config = CandidateConfig {
            words_per_page: Some(2),
            ..CandidateConfig::default()
        };
        let candidates = select_candidates(&fragments, &config, &word_pattern()).unwrap();
        let texts: Vec<_> = candidates.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["apple", "river"]);
    }
}
