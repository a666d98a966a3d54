//! In-memory weighted graph
//!
//! A graph is built once from a matrix and then only read. Nodes and edges
//! live in arenas indexed by their dense ids; adjacency lists hold edge ids.

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeId, GraphKind, NodeClass, NodeId};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node '{label}' already exists in class {class}")]
    NodeAlreadyExists { label: String, class: NodeClass },

    #[error("Node class {class} is not allowed in a {kind} graph")]
    ClassNotAdmitted { class: NodeClass, kind: GraphKind },

    #[error("Edge between {0} and {1} already exists")]
    EdgeAlreadyExists(NodeId, NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Invalid edge: self loop on {0}")]
    SelfLoop(NodeId),

    #[error("Invalid edge: weight must be positive")]
    NonPositiveWeight,

    #[error("Invalid edge: {0} and {1} are in the same partition of a bipartite graph")]
    SameClassEdge(NodeId, NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Weighted undirected graph with labelled, classed nodes
///
/// - nodes: NodeId -> Node (arena, NodeId is the position)
/// - edges: EdgeId -> Edge (arena)
/// - adjacency: NodeId -> incident EdgeIds, in insertion order
/// - label_index: (class, label) -> NodeId
/// - pair_index: (min NodeId, max NodeId) -> EdgeId
#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
    label_index: FxHashMap<(NodeClass, String), NodeId>,
    pair_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl Graph {
    /// Create a new empty graph of the given kind
    pub fn new(kind: GraphKind) -> Self {
        Graph {
            kind,
            nodes: Vec::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
            label_index: FxHashMap::default(),
            pair_index: FxHashMap::default(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Add a node. Labels are unique per class.
    pub fn create_node(
        &mut self,
        label: impl Into<String>,
        class: NodeClass,
    ) -> GraphResult<NodeId> {
        if !self.kind.admits(class) {
            return Err(GraphError::ClassNotAdmitted {
                class,
                kind: self.kind,
            });
        }

        let label = label.into();
        let key = (class, label);
        if self.label_index.contains_key(&key) {
            return Err(GraphError::NodeAlreadyExists {
                label: key.1,
                class,
            });
        }

        let node_id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Node::new(node_id, key.1.clone(), class));
        self.adjacency.push(Vec::new());
        self.label_index.insert(key, node_id);
        Ok(node_id)
    }

    /// Add an undirected edge with a positive weight
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: u64,
    ) -> GraphResult<EdgeId> {
        let source_class = self
            .get_node(source)
            .map(|n| n.class)
            .ok_or(GraphError::InvalidEdgeSource(source))?;
        let target_class = self
            .get_node(target)
            .map(|n| n.class)
            .ok_or(GraphError::InvalidEdgeTarget(target))?;

        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        if weight == 0 {
            return Err(GraphError::NonPositiveWeight);
        }
        if self.kind == GraphKind::Bipartite && source_class == target_class {
            return Err(GraphError::SameClassEdge(source, target));
        }

        let pair = ordered_pair(source, target);
        if self.pair_index.contains_key(&pair) {
            return Err(GraphError::EdgeAlreadyExists(source, target));
        }

        let edge_id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(edge_id, source, target, weight));
        self.adjacency[source.index()].push(edge_id);
        self.adjacency[target.index()].push(edge_id);
        self.pair_index.insert(pair, edge_id);
        Ok(edge_id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize)
    }

    /// Weight of the edge between two nodes, if any
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<u64> {
        self.pair_index
            .get(&ordered_pair(a, b))
            .and_then(|id| self.get_edge(*id))
            .map(|e| e.weight)
    }

    /// Look up a node by label and class
    pub fn find_node_in(&self, label: &str, class: NodeClass) -> Option<NodeId> {
        self.label_index.get(&(class, label.to_string())).copied()
    }

    /// Look up a node by label alone.
    ///
    /// A label present in both partitions of a bipartite graph resolves to
    /// the `First` node; use `find_node_in` to reach the other one.
    pub fn find_node(&self, label: &str) -> Option<NodeId> {
        [NodeClass::First, NodeClass::Second, NodeClass::Single]
            .iter()
            .filter(|class| self.kind.admits(**class))
            .find_map(|class| self.find_node_in(label, *class))
    }

    /// Edges incident to a node, in insertion order
    pub fn incident_edges(&self, id: NodeId) -> Vec<&Edge> {
        self.adjacency
            .get(id.index())
            .map(|ids| ids.iter().filter_map(|e| self.get_edge(*e)).collect())
            .unwrap_or_default()
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.adjacency.get(id.index()).map_or(0, |a| a.len())
    }

    /// Sum of incident edge weights
    pub fn weighted_degree(&self, id: NodeId) -> u64 {
        self.incident_edges(id).iter().map(|e| e.weight).sum()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node labels in insertion order
    pub fn labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }
}

fn ordered_pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
