//! Skillgraph
//!
//! Graph construction and recommendation engine for job-postings data.
//!
//! # Architecture
//!
//! Rows flow leaf-first through:
//! - `tags`: split and clean the multi-valued skills field
//! - `matrix`: group × tag incidence and tag × tag co-occurrence counts
//! - `graph`: weighted undirected bipartite and co-occurrence graphs
//! - `algo`: similarity and neighbor recommendations, node grouping
//!   (algorithms live in the `skillgraph-algorithms` crate)
//! - `engine`: cached end-to-end facade over one configuration
//!
//! Every structure is derived from the current row set and never mutated
//! after it is returned. An empty matrix produces no graph (`None`), which is
//! a valid result rather than an error.
//!
//! ## Example Usage
//!
//! ```rust
//! use skillgraph::dataset::TaggedRow;
//! use skillgraph::graph::{build_bipartite, NodeClass};
//! use skillgraph::matrix::IncidenceMatrix;
//! use skillgraph::algo::{recommend_similar, RecommendConfig};
//!
//! let rows = vec![
//!     TaggedRow::new(Some("A"), &["x", "y"]),
//!     TaggedRow::new(Some("A"), &["y"]),
//!     TaggedRow::new(Some("B"), &["y"]),
//! ];
//! let matrix = IncidenceMatrix::build(&rows);
//! assert_eq!(matrix.get("A", "y"), 2);
//!
//! let graph = build_bipartite(&matrix).unwrap();
//! let config = RecommendConfig::default();
//! let recs = recommend_similar(&graph, "A", NodeClass::First, 5, &config).unwrap();
//! assert_eq!(recs[0].node, "B");
//! assert!((recs[0].score - 0.894).abs() < 1e-3);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod graph;
pub mod matrix;
pub mod tags;

// Re-export main types for convenience
pub use algo::{
    neighbor_recommendations, recommend_similar, ComponentGrouper, Grouping, NodeGrouper,
    RecommendConfig, RecommendError, RecommendResult, ScoredNode,
};
pub use cache::{BuildCache, CacheKey, CacheStats, Fingerprint};
pub use config::{CacheConfig, ConfigError, ConfigResult, EngineConfig};
pub use dataset::{District, DistrictLookup, GroupAxis, PostingRow, TaggedRow};
pub use engine::{Engine, EngineError, EngineResult};
pub use graph::{
    build_bipartite, build_cooccurrence, Edge, EdgeId, Graph, GraphError, GraphKind,
    GraphResult, GraphSnapshot, Node, NodeClass, NodeId,
};
pub use matrix::{CooccurrenceMatrix, IncidenceMatrix};
pub use tags::{Tag, TagConfig, TagNormalizer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
