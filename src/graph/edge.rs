//! Weighted undirected edge

use super::types::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// An undirected edge carrying a positive count
///
/// `source`/`target` record insertion order only; the edge has no direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// First endpoint
    pub source: NodeId,

    /// Second endpoint
    pub target: NodeId,

    /// Occurrence or co-occurrence count, always > 0
    pub weight: u64,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, weight: u64) -> Self {
        Edge {
            id,
            source,
            target,
            weight,
        }
    }
}
