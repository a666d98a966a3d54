//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of an undirected weighted graph for algorithm execution.

/// Node Identifier type (u64)
pub type NodeId = u64;

/// Partition tag of a node. Unipartite graphs use a single class for every node.
pub type ClassId = u8;

/// A dense, integer-indexed view of an undirected weighted graph in Compressed
/// Sparse Row (CSR) format.
///
/// Every undirected edge is stored twice, once in each endpoint's neighbor run,
/// so `neighbors(i)` is the full incident set of node `i`.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Partition class per dense index
    pub node_class: Vec<ClassId>,

    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Edge weights, aligned with `targets`
    pub weights: Vec<f64>,
}

impl GraphView {
    /// Number of incident edges of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Get weights for the incident edges of a node, aligned with `neighbors`
    pub fn weights(&self, idx: usize) -> &[f64] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.weights[start..end]
    }

    /// Class of a node (by index)
    pub fn class_of(&self, idx: usize) -> ClassId {
        self.node_class[idx]
    }

    /// Build a GraphView from per-node adjacency lists of `(neighbor_index, weight)`.
    ///
    /// The lists must already be symmetric: if `j` appears in `adjacency[i]`
    /// then `i` appears in `adjacency[j]` with the same weight.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        node_class: Vec<ClassId>,
        adjacency: Vec<Vec<(usize, f64)>>,
    ) -> Self {
        let node_count = index_to_node.len();

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for neighbors in adjacency {
            for (target, weight) in neighbors {
                targets.push(target);
                weights.push(weight);
            }
            offsets.push(targets.len());
        }
        // Nodes without an adjacency entry get empty runs
        while offsets.len() < node_count + 1 {
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_class,
            offsets,
            targets,
            weights,
        }
    }

    /// Build a GraphView from an undirected edge list over dense indices.
    pub fn from_edges(
        index_to_node: Vec<NodeId>,
        node_class: Vec<ClassId>,
        edges: &[(usize, usize, f64)],
    ) -> Self {
        let mut adjacency = vec![Vec::new(); index_to_node.len()];
        for &(u, v, w) in edges {
            adjacency[u].push((v, w));
            adjacency[v].push((u, w));
        }
        Self::from_adjacency_list(index_to_node, node_class, adjacency)
    }
}
