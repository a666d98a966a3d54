//! Deterministic top-N ranking

use std::cmp::Ordering;

/// A dense node index paired with a score
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredIndex {
    pub index: usize,
    pub score: f64,
}

impl ScoredIndex {
    pub fn new(index: usize, score: f64) -> Self {
        Self { index, score }
    }
}

/// Sort descending by score and keep the first `top_n` entries.
///
/// The sort is stable, so entries with equal scores keep their input order.
/// NaN scores compare as equal and therefore never reorder their neighbours.
pub fn rank_descending(mut items: Vec<ScoredIndex>, top_n: usize) -> Vec<ScoredIndex> {
    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    items.truncate(top_n);
    items
}
