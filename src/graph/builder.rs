//! Graph construction from count matrices
//!
//! An empty matrix yields `None`, the "no graph" sentinel. A returned graph
//! always has at least one edge and no isolated nodes.

use super::store::{Graph, GraphResult};
use super::types::{GraphKind, NodeClass, NodeId};
use crate::matrix::{CooccurrenceMatrix, IncidenceMatrix};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Build the group/tag bipartite graph.
///
/// `First` nodes are group keys, `Second` nodes are tags, one edge per
/// non-zero cell weighted by its count.
pub fn build_bipartite(matrix: &IncidenceMatrix) -> Option<Graph> {
    if matrix.is_empty() {
        debug!("Incidence matrix is empty, no bipartite graph");
        return None;
    }
    match try_build_bipartite(matrix) {
        Ok(graph) => {
            debug!(
                "Built bipartite graph: {} nodes, {} edges",
                graph.node_count(),
                graph.edge_count()
            );
            Some(graph)
        }
        Err(e) => {
            warn!("Bipartite graph construction failed: {}", e);
            None
        }
    }
}

fn try_build_bipartite(matrix: &IncidenceMatrix) -> GraphResult<Graph> {
    let mut graph = Graph::new(GraphKind::Bipartite);

    let mut group_ids: FxHashMap<&str, NodeId> = FxHashMap::default();
    for group in matrix.groups() {
        group_ids.insert(group, graph.create_node(group, NodeClass::First)?);
    }
    let mut tag_ids: FxHashMap<&str, NodeId> = FxHashMap::default();
    for tag in matrix.tags() {
        tag_ids.insert(tag.as_str(), graph.create_node(tag.as_str(), NodeClass::Second)?);
    }

    for (group, tag, count) in matrix.iter() {
        graph.create_edge(group_ids[group], tag_ids[tag.as_str()], count)?;
    }
    Ok(graph)
}

/// Build the tag co-occurrence graph, one `Single` node per tag.
pub fn build_cooccurrence(matrix: &CooccurrenceMatrix) -> Option<Graph> {
    if matrix.is_empty() {
        debug!("Co-occurrence matrix is empty, no co-occurrence graph");
        return None;
    }
    match try_build_cooccurrence(matrix) {
        Ok(graph) => {
            debug!(
                "Built co-occurrence graph: {} nodes, {} edges",
                graph.node_count(),
                graph.edge_count()
            );
            Some(graph)
        }
        Err(e) => {
            warn!("Co-occurrence graph construction failed: {}", e);
            None
        }
    }
}

fn try_build_cooccurrence(matrix: &CooccurrenceMatrix) -> GraphResult<Graph> {
    let mut graph = Graph::new(GraphKind::Cooccurrence);

    let mut tag_ids: FxHashMap<&str, NodeId> = FxHashMap::default();
    for tag in matrix.tags() {
        tag_ids.insert(tag.as_str(), graph.create_node(tag.as_str(), NodeClass::Single)?);
    }
    for (a, b, count) in matrix.iter() {
        graph.create_edge(tag_ids[a.as_str()], tag_ids[b.as_str()], count)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TaggedRow;
    use std::collections::BTreeSet;

    fn sample_rows() -> Vec<TaggedRow> {
        vec![
            TaggedRow::new(Some("A"), &["x", "y"]),
            TaggedRow::new(Some("A"), &["y"]),
            TaggedRow::new(Some("B"), &["y"]),
        ]
    }

    #[test]
    fn test_bipartite_edges() {
        let graph = build_bipartite(&IncidenceMatrix::build(&sample_rows())).unwrap();
        let a = graph.find_node_in("A", NodeClass::First).unwrap();
        let b = graph.find_node_in("B", NodeClass::First).unwrap();
        let x = graph.find_node_in("x", NodeClass::Second).unwrap();
        let y = graph.find_node_in("y", NodeClass::Second).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge_weight(a, x), Some(1));
        assert_eq!(graph.edge_weight(a, y), Some(2));
        assert_eq!(graph.edge_weight(b, y), Some(1));
        assert_eq!(graph.edge_weight(b, x), None);
    }

    #[test]
    fn test_bipartite_edges_cross_partitions() {
        let graph = build_bipartite(&IncidenceMatrix::build(&sample_rows())).unwrap();
        for edge in graph.edges() {
            let s = graph.get_node(edge.source).unwrap().class;
            let t = graph.get_node(edge.target).unwrap().class;
            assert_ne!(s, t);
            assert!(edge.weight > 0);
        }
    }

    #[test]
    fn test_node_set_equals_matrix_labels() {
        let matrix = IncidenceMatrix::build(&sample_rows());
        let graph = build_bipartite(&matrix).unwrap();

        let from_graph: BTreeSet<String> = graph.labels().into_iter().map(String::from).collect();
        let from_matrix: BTreeSet<String> = matrix.node_choices().into_iter().collect();
        assert_eq!(from_graph, from_matrix);
        assert!(graph.nodes().iter().all(|n| graph.degree(n.id) > 0));
    }

    #[test]
    fn test_empty_matrix_is_no_graph() {
        assert!(build_bipartite(&IncidenceMatrix::build(&[])).is_none());
        assert!(build_cooccurrence(&CooccurrenceMatrix::build(&[])).is_none());

        let untagged = vec![TaggedRow::new(Some("A"), &[])];
        assert!(build_bipartite(&IncidenceMatrix::build(&untagged)).is_none());
    }

    #[test]
    fn test_same_label_in_both_partitions() {
        let rows = vec![TaggedRow::new(Some("sql"), &["sql", "python"])];
        let graph = build_bipartite(&IncidenceMatrix::build(&rows)).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_cooccurrence_graph() {
        let rows = vec![
            TaggedRow::new(None, &["x", "y", "z"]),
            TaggedRow::new(None, &["x", "y"]),
        ];
        let graph = build_cooccurrence(&CooccurrenceMatrix::build(&rows)).unwrap();
        let x = graph.find_node("x").unwrap();
        let y = graph.find_node("y").unwrap();
        let z = graph.find_node("z").unwrap();

        assert_eq!(graph.kind(), GraphKind::Cooccurrence);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_weight(x, y), Some(2));
        assert_eq!(graph.edge_weight(z, x), Some(1));
        assert_eq!(graph.edge_weight(y, z), Some(1));
        assert!(graph.nodes().iter().all(|n| n.class == NodeClass::Single));
    }

    #[test]
    fn test_builders_are_idempotent() {
        let matrix = IncidenceMatrix::build(&sample_rows());
        let g1 = build_bipartite(&matrix).unwrap();
        let g2 = build_bipartite(&matrix).unwrap();
        assert_eq!(g1.nodes(), g2.nodes());
        assert_eq!(g1.edges(), g2.edges());
    }
}
