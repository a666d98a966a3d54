//! Derived graphs
//!
//! Bipartite (group keys × tags) and co-occurrence (tags × tags) graphs,
//! both weighted and undirected, built fresh from count matrices.

pub mod builder;
pub mod edge;
pub mod export;
pub mod node;
pub mod store;
pub mod types;

pub use builder::{build_bipartite, build_cooccurrence};
pub use edge::Edge;
pub use export::{EdgeSnapshot, GraphSnapshot, NodeSnapshot};
pub use node::Node;
pub use store::{Graph, GraphError, GraphResult};
pub use types::{EdgeId, GraphKind, NodeClass, NodeId};
