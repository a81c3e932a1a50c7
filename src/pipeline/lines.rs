//! Multi-line meanings.
//!
//! A meaning often wraps onto several lines, and numbered senses (①, ②, ...)
//! may continue to the side of or beneath the first line. Starting from one
//! line, the expander walks up and down through fragments whose left edges
//! line up and whose vertical gap is small relative to the font height.

use std::cmp::Ordering;

use crate::config::LineConfig;
use crate::elements::RecognizedFragment;
use crate::utils::safe_float_cmp;

/// Circled digits ① through ⑳.
const CIRCLED_ONE: u32 = 0x2460;
const CIRCLED_TWENTY: u32 = 0x2473;

/// The number of the first circled-digit sense marker in `text`.
///
/// # Examples
///
/// ```
/// use wordlist_oxide::pipeline::lines::sense_marker;
///
/// assert_eq!(sense_marker("① 川"), Some(1));
/// assert_eq!(sense_marker("流れ ⑫"), Some(12));
/// assert_eq!(sense_marker("川"), None);
/// ```
pub fn sense_marker(text: &str) -> Option<u32> {
    text.chars().find_map(|ch| {
        let code = ch as u32;
        (CIRCLED_ONE..=CIRCLED_TWENTY)
            .contains(&code)
            .then(|| code - CIRCLED_ONE + 1)
    })
}

fn has_marker(fragment: &RecognizedFragment, number: u32) -> bool {
    fragment.text.chars().any(|ch| ch as u32 == CIRCLED_ONE + number - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertical {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

/// Walks from a line to its vertical and horizontal neighbours.
pub struct LineExpander<'a> {
    config: &'a LineConfig,
}

impl<'a> LineExpander<'a> {
    /// Create an expander with the given tolerances.
    pub fn new(config: &'a LineConfig) -> Self {
        Self { config }
    }

    /// Expand `start` into the chain of lines it belongs to, top to bottom.
    ///
    /// Candidates come from `pool`; fragments equal to `exclude` (the
    /// headword) are never taken. After the vertical walk, a chain holding
    /// ② but not ① (or the reverse) looks for the missing sense beside or
    /// beyond its outermost line.
    pub fn expand(
        &self,
        start: &RecognizedFragment,
        pool: &[RecognizedFragment],
        exclude: &RecognizedFragment,
    ) -> Vec<RecognizedFragment> {
        let mut chain = vec![start.clone()];

        self.walk(&mut chain, pool, exclude, Vertical::Up);
        if chain.iter().any(|f| has_marker(f, 2)) && !chain.iter().any(|f| has_marker(f, 1)) {
            let first = chain[0].clone();
            let found = self
                .horizontal_neighbor(&first, pool, exclude, &chain, Horizontal::Left, 1)
                .or_else(|| {
                    self.vertical_neighbor(&first, pool, exclude, &chain, Vertical::Up, true, 1)
                });
            if let Some(found) = found {
                chain.insert(0, found);
            }
        }

        self.walk(&mut chain, pool, exclude, Vertical::Down);
        if chain.iter().any(|f| has_marker(f, 1)) && !chain.iter().any(|f| has_marker(f, 2)) {
            let index = chain.iter().position(|f| has_marker(f, 1)).unwrap_or(0);
            let anchor = chain[index].clone();
            let last = chain[chain.len() - 1].clone();
            let found = self
                .horizontal_neighbor(&anchor, pool, exclude, &chain, Horizontal::Right, 2)
                .or_else(|| {
                    self.vertical_neighbor(&last, pool, exclude, &chain, Vertical::Down, true, 2)
                });
            if let Some(found) = found {
                chain.insert(index + 1, found);
            }
        }

        chain
    }

    /// Follow lines in one direction until none qualifies or the step limit
    /// is reached.
    fn walk(
        &self,
        chain: &mut Vec<RecognizedFragment>,
        pool: &[RecognizedFragment],
        exclude: &RecognizedFragment,
        direction: Vertical,
    ) {
        for _ in 0..self.config.max_steps {
            let line = match direction {
                Vertical::Up => chain[0].clone(),
                Vertical::Down => chain[chain.len() - 1].clone(),
            };
            let Some(next) = self.vertical_neighbor(&line, pool, exclude, chain, direction, false, 0)
            else {
                break;
            };
            match direction {
                Vertical::Up => chain.insert(0, next),
                Vertical::Down => chain.push(next),
            }
        }
    }

    /// The closest fragment directly above or below `line`.
    ///
    /// With `marker_search` the symmetric marker tolerance applies and only
    /// fragments carrying sense `marker` qualify.
    fn vertical_neighbor(
        &self,
        line: &RecognizedFragment,
        pool: &[RecognizedFragment],
        exclude: &RecognizedFragment,
        chain: &[RecognizedFragment],
        direction: Vertical,
        marker_search: bool,
        marker: u32,
    ) -> Option<RecognizedFragment> {
        let f = line.font_size();
        let (lower, upper) = if marker_search {
            (-self.config.marker_gap, self.config.marker_gap)
        } else {
            match direction {
                Vertical::Up => self.config.top_gap,
                Vertical::Down => self.config.bottom_gap,
            }
        };

        pool.iter()
            .filter(|c| *c != exclude && !chain.contains(c))
            .filter(|c| !marker_search || has_marker(c, marker))
            .filter_map(|c| {
                let gap = match direction {
                    Vertical::Up => line.bbox.top() - c.bbox.bottom(),
                    Vertical::Down => c.bbox.top() - line.bbox.bottom(),
                };
                let aligned =
                    (c.bbox.left() - line.bbox.left()).abs() < self.config.max_left_shift * f;
                (lower * f < gap && gap < upper * f && aligned).then_some((c, gap))
            })
            .min_by(|a, b| safe_float_cmp(a.1.abs(), b.1.abs()))
            .map(|(c, _)| c.clone())
    }

    /// The closest fragment carrying sense `marker` on the same visual line
    /// as `line`, to its left or right.
    fn horizontal_neighbor(
        &self,
        line: &RecognizedFragment,
        pool: &[RecognizedFragment],
        exclude: &RecognizedFragment,
        chain: &[RecognizedFragment],
        direction: Horizontal,
        marker: u32,
    ) -> Option<RecognizedFragment> {
        let f = line.font_size();
        let slack = self.config.horizontal_slack * f;

        pool.iter()
            .filter(|c| *c != exclude && !chain.contains(c) && has_marker(c, marker))
            .filter(|c| {
                let beside = match direction {
                    Horizontal::Left => c.bbox.right() < line.bbox.left() + slack,
                    Horizontal::Right => line.bbox.right() < c.bbox.left() + slack,
                };
                let same_line =
                    c.bbox.top() - f < line.bbox.top() && line.bbox.top() < c.bbox.bottom();
                beside && same_line
            })
            .min_by(|a, b| {
                let da = (a.bbox.center().x - line.bbox.center().x).abs();
                let db = (b.bbox.center().x - line.bbox.center().x).abs();
                safe_float_cmp(da, db)
            })
            .cloned()
    }
}

/// Whether two lines share a visual line: each one's vertical extent holds
/// the other's midpoint.
pub fn on_same_visual_line(a: &RecognizedFragment, b: &RecognizedFragment) -> bool {
    let (ca, cb) = (a.center().y, b.center().y);
    a.bbox.top() <= cb && cb <= a.bbox.bottom() && b.bbox.top() <= ca && ca <= b.bbox.bottom()
}

/// Reading order between two lines: senses by number on a shared visual
/// line, otherwise top to bottom.
fn line_order(a: &RecognizedFragment, b: &RecognizedFragment) -> Ordering {
    if on_same_visual_line(a, b) {
        if let (Some(ma), Some(mb)) = (sense_marker(&a.text), sense_marker(&b.text)) {
            return ma.cmp(&mb);
        }
        safe_float_cmp(a.bbox.top(), b.bbox.top())
    } else {
        safe_float_cmp(a.center().y, b.center().y)
    }
}

/// Put meaning lines in reading order.
///
/// The pairwise rule is not guaranteed to be transitive, so this runs
/// adjacent-swap passes (at most one per line) instead of a sort.
pub fn order_lines(mut lines: Vec<RecognizedFragment>) -> Vec<RecognizedFragment> {
    lines.sort_by(|a, b| safe_float_cmp(a.center().y, b.center().y));
    for _ in 0..lines.len() {
        let mut swapped = false;
        for i in 1..lines.len() {
            if line_order(&lines[i - 1], &lines[i]) == Ordering::Greater {
                lines.swap(i - 1, i);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    lines
}

/// Append the fragments of `extra` that `lines` does not hold yet.
pub fn merge_unique(
    mut lines: Vec<RecognizedFragment>,
    extra: &[RecognizedFragment],
) -> Vec<RecognizedFragment> {
    for fragment in extra {
        if !lines.contains(fragment) {
            lines.push(fragment.clone());
        }
    }
    lines
}
