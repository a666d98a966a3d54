//! Neighbor-overlap similarity
//!
//! Two nodes are similar when their neighbor-weight vectors point the same way.
//! For a bipartite graph this compares peers through the opposite class: two
//! specialties are similar if they weight the same skills, and vice versa.

use super::common::{ClassId, GraphView};
use super::ranking::ScoredIndex;
use rayon::prelude::*;
use std::collections::HashMap;

/// Similarity scoring configuration
#[derive(Debug, Clone, Copy)]
pub struct SimilarityConfig {
    /// Keep candidates that share no neighbor with the source (score 0.0)
    pub include_zero_overlap: bool,
    /// Candidate count at which scoring switches to rayon
    pub parallel_threshold: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            include_zero_overlap: false,
            parallel_threshold: 2048,
        }
    }
}

/// Score every node of `target_class` (except `source`) against `source`.
///
/// Results come back in candidate discovery order (ascending dense index),
/// unsorted, so callers can rank with a stable tie-break. A source without
/// neighbors yields no candidates.
pub fn similarity_scores(
    view: &GraphView,
    source: usize,
    target_class: ClassId,
    config: SimilarityConfig,
) -> Vec<ScoredIndex> {
    let source_vec = accumulate(neighbor_pairs(view, source));
    let source_norm = norm(&source_vec);
    if source_vec.is_empty() || source_norm == 0.0 {
        return Vec::new();
    }

    let candidates: Vec<usize> = (0..view.node_count)
        .filter(|&idx| idx != source && view.class_of(idx) == target_class)
        .collect();

    let score = |&idx: &usize| -> Option<ScoredIndex> {
        let mut dot = 0.0;
        let mut sq = 0.0;
        for (nb, w) in neighbor_pairs(view, idx) {
            sq += w * w;
            if let Some(v) = source_vec.get(&nb) {
                dot += v * w;
            }
        }
        let s = normalize(dot, source_norm, sq.sqrt());
        if s > 0.0 || config.include_zero_overlap {
            Some(ScoredIndex::new(idx, s))
        } else {
            None
        }
    };

    if candidates.len() >= config.parallel_threshold {
        // Indexed parallel collect preserves candidate order
        candidates.par_iter().filter_map(score).collect()
    } else {
        candidates.iter().filter_map(score).collect()
    }
}

fn neighbor_pairs(view: &GraphView, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
    view.neighbors(idx)
        .iter()
        .copied()
        .zip(view.weights(idx).iter().copied())
}

fn accumulate(pairs: impl Iterator<Item = (usize, f64)>) -> HashMap<usize, f64> {
    let mut acc = HashMap::new();
    for (dim, w) in pairs {
        *acc.entry(dim).or_insert(0.0) += w;
    }
    acc
}

fn norm(vec: &HashMap<usize, f64>) -> f64 {
    vec.values().map(|w| w * w).sum::<f64>().sqrt()
}

fn normalize(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bipartite: A(0), B(1), C(2) in class 0; x(3), y(4), z(5) in class 1
    // A-x 1, A-y 2, B-y 1, C-z 4
    fn sample_view() -> GraphView {
        GraphView::from_edges(
            vec![0, 1, 2, 3, 4, 5],
            vec![0, 0, 0, 1, 1, 1],
            &[(0, 3, 1.0), (0, 4, 2.0), (1, 4, 1.0), (2, 5, 4.0)],
        )
    }

    #[test]
    fn test_similarity_excludes_zero_overlap_by_default() {
        let view = sample_view();
        let scores = similarity_scores(&view, 0, 0, SimilarityConfig::default());
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].index, 1);
        assert!((scores[0].score - 0.894_427_191).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        assert_eq!(normalize(0.0, 0.0, 1.0), 0.0);
        assert_eq!(normalize(0.0, 2.0, 0.0), 0.0);
        assert_eq!(normalize(3.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_similarity_includes_zero_overlap_when_configured() {
        let view = sample_view();
        let config = SimilarityConfig {
            include_zero_overlap: true,
            ..Default::default()
        };
        let scores = similarity_scores(&view, 0, 0, config);
        let order: Vec<usize> = scores.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(scores[1].score, 0.0);
    }

    #[test]
    fn test_similarity_never_returns_source() {
        let view = sample_view();
        let config = SimilarityConfig {
            include_zero_overlap: true,
            ..Default::default()
        };
        for source in 0..view.node_count {
            let class = view.class_of(source);
            let scores = similarity_scores(&view, source, class, config);
            assert!(scores.iter().all(|s| s.index != source));
            assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.score)));
        }
    }

    #[test]
    fn test_isolated_source_yields_nothing() {
        let view = GraphView::from_edges(vec![1, 2, 3], vec![0, 0, 1], &[(1, 2, 1.0)]);
        let config = SimilarityConfig {
            include_zero_overlap: true,
            ..Default::default()
        };
        assert!(similarity_scores(&view, 0, 0, config).is_empty());
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let view = sample_view();
        let sequential = SimilarityConfig {
            include_zero_overlap: true,
            parallel_threshold: usize::MAX,
        };
        let parallel = SimilarityConfig {
            parallel_threshold: 0,
            ..sequential
        };
        assert_eq!(
            similarity_scores(&view, 4, 1, sequential),
            similarity_scores(&view, 4, 1, parallel)
        );
    }
}
