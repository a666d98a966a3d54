//! Node of a derived graph

use super::types::{NodeClass, NodeId};
use serde::{Deserialize, Serialize};

/// A labelled node in one partition of a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Dense identifier, equal to the insertion position
    pub id: NodeId,

    /// Group key or tag text the node stands for
    pub label: String,

    /// Partition the node belongs to
    pub class: NodeClass,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, class: NodeClass) -> Self {
        Node {
            id,
            label: label.into(),
            class,
        }
    }
}
