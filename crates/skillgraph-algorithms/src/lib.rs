pub mod common;
pub mod community;
pub mod neighbors;
pub mod ranking;
pub mod similarity;

pub use common::{ClassId, GraphView, NodeId};
pub use community::{weakly_connected_components, WccResult};
pub use neighbors::incident_weights;
pub use ranking::{rank_descending, ScoredIndex};
pub use similarity::{similarity_scores, SimilarityConfig};
