//! Core type definitions for derived graphs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense identifier of a node inside one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Dense identifier of an edge inside one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// Partition a node belongs to.
///
/// Bipartite graphs use `First` for the group-key axis and `Second` for the
/// tag axis. Co-occurrence graphs put every node in `Single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum NodeClass {
    First,
    Second,
    Single,
}

impl NodeClass {
    /// The other side of a bipartite graph. `Single` is its own opposite.
    pub fn opposite(&self) -> NodeClass {
        match self {
            NodeClass::First => NodeClass::Second,
            NodeClass::Second => NodeClass::First,
            NodeClass::Single => NodeClass::Single,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeClass::First => "first",
            NodeClass::Second => "second",
            NodeClass::Single => "single",
        }
    }

    pub(crate) fn class_id(&self) -> u8 {
        match self {
            NodeClass::First => 0,
            NodeClass::Second => 1,
            NodeClass::Single => 2,
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NodeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(NodeClass::First),
            "second" => Ok(NodeClass::Second),
            "single" => Ok(NodeClass::Single),
            other => Err(format!("unknown node class '{}'", other)),
        }
    }
}

/// Shape of a derived graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Group keys against tags
    Bipartite,
    /// Tags against tags
    Cooccurrence,
}

impl GraphKind {
    /// Whether a node of `class` may live in a graph of this kind
    pub fn admits(&self, class: NodeClass) -> bool {
        match self {
            GraphKind::Bipartite => matches!(class, NodeClass::First | NodeClass::Second),
            GraphKind::Cooccurrence => class == NodeClass::Single,
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Bipartite => write!(f, "bipartite"),
            GraphKind::Cooccurrence => write!(f, "cooccurrence"),
        }
    }
}
