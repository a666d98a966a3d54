//! Node grouping contract
//!
//! Renderers colour nodes by group. Any community-detection routine can be
//! plugged in by implementing `NodeGrouper`; connected components ship as the
//! built-in grouping.

use super::build_view;
use crate::graph::{Graph, NodeId};
use skillgraph_algorithms::weakly_connected_components;
use std::collections::HashMap;

pub type GroupId = usize;

/// Mapping NodeId -> GroupId
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    assignments: HashMap<NodeId, GroupId>,
}

impl Grouping {
    pub fn from_assignments(assignments: HashMap<NodeId, GroupId>) -> Self {
        Self { assignments }
    }

    pub fn group_of(&self, node: NodeId) -> Option<GroupId> {
        self.assignments.get(&node).copied()
    }

    /// Number of distinct groups
    pub fn group_count(&self) -> usize {
        let mut ids: Vec<GroupId> = self.assignments.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Assigns every node of a graph to a group
pub trait NodeGrouper {
    fn group(&self, graph: &Graph) -> Grouping;
}

impl<F> NodeGrouper for F
where
    F: Fn(&Graph) -> Grouping,
{
    fn group(&self, graph: &Graph) -> Grouping {
        self(graph)
    }
}

/// Groups nodes by connected component
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentGrouper;

impl NodeGrouper for ComponentGrouper {
    fn group(&self, graph: &Graph) -> Grouping {
        let view = build_view(graph);
        let result = weakly_connected_components(&view);
        let assignments = result
            .node_component
            .into_iter()
            .map(|(node, component)| (NodeId::new(node), component))
            .collect();
        Grouping { assignments }
    }
}
