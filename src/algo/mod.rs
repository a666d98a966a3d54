//! Graph algorithms module
//!
//! Algorithms are implemented in the `skillgraph-algorithms` crate over a
//! dense CSR view. This module provides the integration/adapter layer.

pub mod grouping;
pub mod recommend;

use crate::graph::Graph;
use skillgraph_algorithms::GraphView;

pub use grouping::{ComponentGrouper, GroupId, Grouping, NodeGrouper};
pub use recommend::{
    neighbor_recommendations, neighbor_recommendations_for, recommend_similar,
    recommend_similar_to, RecommendConfig, RecommendError, RecommendResult, ScoredNode,
};

/// Build a GraphView from a graph for algorithm execution.
///
/// Dense indices equal NodeIds, since graph nodes are stored by position.
pub fn build_view(graph: &Graph) -> GraphView {
    let index_to_node: Vec<u64> = graph.nodes().iter().map(|n| n.id.as_u64()).collect();
    let node_class: Vec<u8> = graph.nodes().iter().map(|n| n.class.class_id()).collect();

    let edges: Vec<(usize, usize, f64)> = graph
        .edges()
        .iter()
        .map(|e| (e.source.as_u64() as usize, e.target.as_u64() as usize, e.weight as f64))
        .collect();

    GraphView::from_edges(index_to_node, node_class, &edges)
}
