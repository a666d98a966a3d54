//! Group × tag incidence counts

use crate::dataset::TaggedRow;
use crate::tags::Tag;
use indexmap::{IndexMap, IndexSet};
use ndarray::Array2;
use tracing::debug;

/// Sparse (group key, tag) -> count matrix
///
/// Row and column labels keep first-seen order. Only non-zero cells are
/// stored, so every label present has at least one positive cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidenceMatrix {
    groups: IndexSet<String>,
    tags: IndexSet<Tag>,
    cells: IndexMap<(usize, usize), u64>,
}

impl IncidenceMatrix {
    /// Count every (group, tag) occurrence across `rows`.
    ///
    /// Rows without a group key or without tags contribute nothing.
    pub fn build(rows: &[TaggedRow]) -> Self {
        let mut matrix = IncidenceMatrix::default();
        let mut skipped = 0usize;

        for row in rows {
            let group = match row.group.as_deref() {
                Some(g) if !row.tags.is_empty() => g,
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            let (g_idx, _) = matrix.groups.insert_full(group.to_string());
            for tag in &row.tags {
                let (t_idx, _) = matrix.tags.insert_full(tag.clone());
                *matrix.cells.entry((g_idx, t_idx)).or_insert(0) += 1;
            }
        }

        debug!(
            "Built incidence matrix: {} groups x {} tags, {} cells, {} rows skipped",
            matrix.groups.len(),
            matrix.tags.len(),
            matrix.cells.len(),
            skipped
        );
        matrix
    }

    /// Count for a (group, tag) pair; 0 when the pair never occurred
    pub fn get(&self, group: &str, tag: &str) -> u64 {
        let g = self.groups.get_index_of(group);
        let t = self.tags.get_index_of(&Tag::from(tag));
        match (g, t) {
            (Some(g), Some(t)) => self.cells.get(&(g, t)).copied().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of non-zero cells
    pub fn nnz(&self) -> usize {
        self.cells.len()
    }

    /// Sum of all cells
    pub fn total(&self) -> u64 {
        self.cells.values().sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Non-zero cells as (group, tag, count), in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag, u64)> {
        self.cells.iter().map(move |(&(g, t), &count)| {
            (self.groups[g].as_str(), &self.tags[t], count)
        })
    }

    /// Labels offered for node selection: tag labels first, then group labels
    pub fn node_choices(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.as_str().to_string())
            .chain(self.groups.iter().cloned())
            .collect()
    }

    /// Dense groups × tags array in label order
    pub fn to_dense(&self) -> Array2<u64> {
        let mut dense = Array2::zeros((self.groups.len(), self.tags.len()));
        for (&(g, t), &count) in &self.cells {
            dense[[g, t]] = count;
        }
        dense
    }
}
