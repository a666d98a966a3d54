//! Tag × tag co-occurrence counts

use crate::dataset::TaggedRow;
use crate::tags::Tag;
use indexmap::{IndexMap, IndexSet};
use ndarray::Array2;
use tracing::debug;

/// Symmetric sparse {tag, tag} -> count matrix
///
/// Pairs are stored once under (lower index, higher index). Self pairs do
/// not exist. Only tags that take part in at least one pair are labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceMatrix {
    tags: IndexSet<Tag>,
    pairs: IndexMap<(usize, usize), u64>,
}

impl CooccurrenceMatrix {
    /// Count, for every row, each unordered pair of distinct tags once.
    pub fn build(rows: &[TaggedRow]) -> Self {
        let mut matrix = CooccurrenceMatrix::default();

        for row in rows {
            let distinct: IndexSet<&Tag> = row.tags.iter().collect();
            if distinct.len() < 2 {
                continue;
            }
            let indices: Vec<usize> = distinct
                .iter()
                .map(|tag| matrix.tags.insert_full((*tag).clone()).0)
                .collect();
            for (i, &a) in indices.iter().enumerate() {
                for &b in &indices[i + 1..] {
                    *matrix.pairs.entry(ordered(a, b)).or_insert(0) += 1;
                }
            }
        }

        debug!(
            "Built co-occurrence matrix: {} tags, {} pairs",
            matrix.tags.len(),
            matrix.pairs.len()
        );
        matrix
    }

    /// Count for a tag pair. `None` for a self pair, which is undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<u64> {
        if a == b {
            return None;
        }
        let i = self.tags.get_index_of(&Tag::from(a));
        let j = self.tags.get_index_of(&Tag::from(b));
        match (i, j) {
            (Some(i), Some(j)) => Some(self.pairs.get(&ordered(i, j)).copied().unwrap_or(0)),
            _ => Some(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of stored (unordered) pairs
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Stored pairs as (tag, tag, count), in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &Tag, u64)> {
        self.pairs
            .iter()
            .map(move |(&(i, j), &count)| (&self.tags[i], &self.tags[j], count))
    }

    /// Dense symmetric array in label order with a zero diagonal
    pub fn to_dense(&self) -> Array2<u64> {
        let n = self.tags.len();
        let mut dense = Array2::zeros((n, n));
        for (&(i, j), &count) in &self.pairs {
            dense[[i, j]] = count;
            dense[[j, i]] = count;
        }
        dense
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
