//! Similar-node and neighbor recommendations
//!
//! Both operations read a graph and never modify it. "Node not found" is an
//! error; "node has nothing to recommend" is an empty, successful result.

use super::build_view;
use crate::graph::{Graph, NodeClass, NodeId};
use serde::{Deserialize, Serialize};
use skillgraph_algorithms::{
    incident_weights, rank_descending, similarity_scores, SimilarityConfig,
};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq)]
pub enum RecommendError {
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type RecommendResult<T> = Result<T, RecommendError>;

/// One recommended node with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredNode {
    pub node: String,
    pub class: NodeClass,
    pub score: f64,
}

/// Recommendation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Keep similarity candidates that share no neighbor (score 0.0)
    pub include_zero_overlap: bool,
    /// top_n used when the caller does not pass one
    pub default_top_n: usize,
    /// Upper bound applied to any requested top_n
    pub max_top_n: usize,
    /// Candidate count at which similarity scoring goes parallel
    pub parallel_threshold: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            include_zero_overlap: false,
            default_top_n: 5,
            max_top_n: 30,
            parallel_threshold: 2048,
        }
    }
}

impl RecommendConfig {
    fn similarity(&self) -> SimilarityConfig {
        SimilarityConfig {
            include_zero_overlap: self.include_zero_overlap,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

/// Nodes of `target_class` most similar to `node`, by cosine similarity of
/// neighbor-weight vectors.
///
/// Ties keep candidate discovery order (node insertion order). Scores are in
/// [0, 1]. A node without neighbors gets an empty list.
pub fn recommend_similar(
    graph: &Graph,
    node: &str,
    target_class: NodeClass,
    top_n: usize,
    config: &RecommendConfig,
) -> RecommendResult<Vec<ScoredNode>> {
    let id = resolve(graph, node)?;
    recommend_similar_to(graph, id, target_class, top_n, config)
}

/// Same as `recommend_similar`, addressing the source node by id
pub fn recommend_similar_to(
    graph: &Graph,
    node: NodeId,
    target_class: NodeClass,
    top_n: usize,
    config: &RecommendConfig,
) -> RecommendResult<Vec<ScoredNode>> {
    check_top_n(top_n)?;
    if !graph.has_node(node) {
        return Err(RecommendError::NodeNotFound(node.to_string()));
    }

    let view = build_view(graph);
    let source = node.as_u64() as usize;
    let scores = similarity_scores(&view, source, target_class.class_id(), config.similarity());
    let candidates = scores.len();
    let ranked = rank_descending(scores, top_n);

    debug!(
        "Similarity for {}: {} candidates in class {}, returning {}",
        node,
        candidates,
        target_class,
        ranked.len()
    );
    Ok(ranked
        .into_iter()
        .filter_map(|s| scored(graph, NodeId::new(s.index as u64), s.score))
        .collect())
}

/// Direct neighbors of `node` in `target_class`, heaviest edge first.
///
/// Score is the raw edge weight. Equal weights are ordered by neighbor label.
pub fn neighbor_recommendations(
    graph: &Graph,
    node: &str,
    target_class: NodeClass,
    top_n: usize,
) -> RecommendResult<Vec<ScoredNode>> {
    let id = resolve(graph, node)?;
    neighbor_recommendations_for(graph, id, target_class, top_n)
}

/// Same as `neighbor_recommendations`, addressing the source node by id
pub fn neighbor_recommendations_for(
    graph: &Graph,
    node: NodeId,
    target_class: NodeClass,
    top_n: usize,
) -> RecommendResult<Vec<ScoredNode>> {
    check_top_n(top_n)?;
    if !graph.has_node(node) {
        return Err(RecommendError::NodeNotFound(node.to_string()));
    }

    let view = build_view(graph);
    let incident = incident_weights(&view, node.as_u64() as usize, Some(target_class.class_id()));

    let mut neighbors: Vec<ScoredNode> = incident
        .into_iter()
        .filter_map(|s| scored(graph, NodeId::new(s.index as u64), s.score))
        .collect();
    neighbors.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.node.cmp(&b.node))
    });
    neighbors.truncate(top_n);

    debug!("Neighbors of {} in class {}: {}", node, target_class, neighbors.len());
    Ok(neighbors)
}

fn resolve(graph: &Graph, node: &str) -> RecommendResult<NodeId> {
    graph
        .find_node(node)
        .ok_or_else(|| RecommendError::NodeNotFound(node.to_string()))
}

fn check_top_n(top_n: usize) -> RecommendResult<()> {
    if top_n < 1 {
        return Err(RecommendError::InvalidArgument(
            "top_n must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn scored(graph: &Graph, id: NodeId, score: f64) -> Option<ScoredNode> {
    graph.get_node(id).map(|n| ScoredNode {
        node: n.label.clone(),
        class: n.class,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphKind;

    // A-x 1, A-y 2, B-y 1, C-z 4, D-y 2
    fn sample() -> Graph {
        let mut graph = Graph::new(GraphKind::Bipartite);
        let a = graph.create_node("A", NodeClass::First).unwrap();
        let b = graph.create_node("B", NodeClass::First).unwrap();
        let c = graph.create_node("C", NodeClass::First).unwrap();
        let d = graph.create_node("D", NodeClass::First).unwrap();
        let x = graph.create_node("x", NodeClass::Second).unwrap();
        let y = graph.create_node("y", NodeClass::Second).unwrap();
        let z = graph.create_node("z", NodeClass::Second).unwrap();
        graph.create_edge(a, x, 1).unwrap();
        graph.create_edge(a, y, 2).unwrap();
        graph.create_edge(b, y, 1).unwrap();
        graph.create_edge(c, z, 4).unwrap();
        graph.create_edge(d, y, 2).unwrap();
        graph
    }

    #[test]
    fn test_similar_ties_keep_discovery_order() {
        let graph = sample();
        let recs = recommend_similar(&graph, "A", NodeClass::First, 5, &RecommendConfig::default())
            .unwrap();

        // B and D both have vectors parallel to y, so they tie
        let names: Vec<&str> = recs.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(names, vec!["B", "D"]);
        assert!((recs[0].score - 2.0 / 5f64.sqrt()).abs() < 1e-9);
        assert_eq!(recs[0].score, recs[1].score);
    }

    #[test]
    fn test_similar_zero_overlap_configurable() {
        let graph = sample();
        let config = RecommendConfig {
            include_zero_overlap: true,
            ..Default::default()
        };
        let recs = recommend_similar(&graph, "A", NodeClass::First, 5, &config).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "C"]);
        assert_eq!(recs[2].score, 0.0);
    }

    #[test]
    fn test_similar_truncates_to_top_n() {
        let graph = sample();
        let recs = recommend_similar(&graph, "A", NodeClass::First, 1, &RecommendConfig::default())
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].node, "B");
    }

    #[test]
    fn test_similar_errors() {
        let graph = sample();
        let config = RecommendConfig::default();
        assert_eq!(
            recommend_similar(&graph, "nope", NodeClass::First, 5, &config),
            Err(RecommendError::NodeNotFound("nope".to_string()))
        );
        assert!(matches!(
            recommend_similar(&graph, "A", NodeClass::First, 0, &config),
            Err(RecommendError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_similar_isolated_node_is_empty() {
        let mut graph = sample();
        graph.create_node("E", NodeClass::First).unwrap();
        let config = RecommendConfig {
            include_zero_overlap: true,
            ..Default::default()
        };
        let recs = recommend_similar(&graph, "E", NodeClass::First, 5, &config).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_neighbors_sorted_by_weight_then_label() {
        let graph = sample();
        let recs = neighbor_recommendations(&graph, "y", NodeClass::First, 5).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(names, vec!["A", "D", "B"]);
        assert_eq!(recs[0].score, 2.0);
        assert_eq!(recs[2].score, 1.0);
    }

    #[test]
    fn test_neighbors_wrong_class_is_empty_not_error() {
        let graph = sample();
        let recs = neighbor_recommendations(&graph, "A", NodeClass::First, 5).unwrap();
        assert!(recs.is_empty());
        assert_eq!(
            neighbor_recommendations(&graph, "Q", NodeClass::Second, 5),
            Err(RecommendError::NodeNotFound("Q".to_string()))
        );
    }

    #[test]
    fn test_neighbors_top_n() {
        let graph = sample();
        let recs = neighbor_recommendations(&graph, "y", NodeClass::First, 2).unwrap();
        assert_eq!(recs.len(), 2);
        assert!(matches!(
            neighbor_recommendations(&graph, "y", NodeClass::First, 0),
            Err(RecommendError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_by_id_reaches_shadowed_label() {
        let mut graph = sample();
        let python_group = graph.create_node("python", NodeClass::First).unwrap();
        let python_tag = graph.create_node("python", NodeClass::Second).unwrap();
        let x = graph.find_node_in("x", NodeClass::Second).unwrap();
        graph.create_edge(python_group, x, 3).unwrap();
        let a = graph.find_node("A").unwrap();
        graph.create_edge(a, python_tag, 1).unwrap();

        let by_label = neighbor_recommendations(&graph, "python", NodeClass::Second, 5).unwrap();
        assert_eq!(by_label[0].node, "x");

        let by_id = neighbor_recommendations_for(&graph, python_tag, NodeClass::First, 5).unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].node, "A");
    }
}
