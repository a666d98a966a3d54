//! Plain-data view of a graph for rendering collaborators

use super::store::Graph;
use super::types::{GraphKind, NodeClass};
use crate::algo::Grouping;
use serde::{Deserialize, Serialize};

/// Node as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: u64,
    pub label: String,
    pub class: NodeClass,
    pub degree: usize,
    pub weighted_degree: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: u64,
    pub target: u64,
    pub weight: u64,
}

/// Nodes with class, degree and optional group id, plus weighted edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub kind: GraphKind,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl GraphSnapshot {
    pub fn from_graph(graph: &Graph, grouping: Option<&Grouping>) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|n| NodeSnapshot {
                id: n.id.as_u64(),
                label: n.label.clone(),
                class: n.class,
                degree: graph.degree(n.id),
                weighted_degree: graph.weighted_degree(n.id),
                group: grouping.and_then(|g| g.group_of(n.id)),
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|e| EdgeSnapshot {
                source: e.source.as_u64(),
                target: e.target.as_u64(),
                weight: e.weight,
            })
            .collect();

        GraphSnapshot {
            kind: graph.kind(),
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
