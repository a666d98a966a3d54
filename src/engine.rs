//! Engine facade
//!
//! Ties normalization, cached graph construction and recommendations
//! together for one configuration. Every call takes the current (already
//! filtered) row set; graphs are rebuilt only when the rows or the build
//! parameters change.

use crate::algo::{
    neighbor_recommendations, recommend_similar, NodeGrouper, RecommendError, ScoredNode,
};
use crate::cache::{BuildCache, CacheKey, CacheStats, Fingerprint};
use crate::config::{ConfigError, EngineConfig};
use crate::dataset::{tag_rows, DistrictLookup, GroupAxis, PostingRow, TaggedRow};
use crate::graph::{build_bipartite, build_cooccurrence, Graph, GraphKind, GraphSnapshot, NodeClass};
use crate::matrix::{CooccurrenceMatrix, IncidenceMatrix};
use crate::tags::{TagConfig, TagNormalizer};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Parameters that change the shape of a built graph
#[derive(Serialize)]
struct BuildParams<'a> {
    tags: &'a TagConfig,
    axis: Option<GroupAxis>,
}

pub struct Engine {
    config: EngineConfig,
    normalizer: TagNormalizer,
    lookup: Option<Arc<dyn DistrictLookup>>,
    graphs: BuildCache<Option<Graph>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        info!(
            "Engine ready: axis {:?}, cache capacity {}",
            config.axis, config.cache.capacity
        );
        Ok(Self {
            normalizer: TagNormalizer::new(config.tags.clone()),
            graphs: BuildCache::new(config.cache.capacity),
            lookup: None,
            config,
        })
    }

    /// Attach the region -> district collaborator used by `GroupAxis::District`
    pub fn with_district_lookup(mut self, lookup: Arc<dyn DistrictLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tag_rows(&self, rows: &[PostingRow]) -> Vec<TaggedRow> {
        if self.missing_district_lookup() {
            warn!("District axis without a district lookup: no row has a group key");
        }
        tag_rows(rows, self.config.axis, &self.normalizer, self.lookup.as_deref())
    }

    fn missing_district_lookup(&self) -> bool {
        self.config.axis == GroupAxis::District && self.lookup.is_none()
    }

    pub fn incidence_matrix(&self, rows: &[PostingRow]) -> IncidenceMatrix {
        IncidenceMatrix::build(&self.tag_rows(rows))
    }

    pub fn cooccurrence_matrix(&self, rows: &[PostingRow]) -> CooccurrenceMatrix {
        CooccurrenceMatrix::build(&self.tag_rows(rows))
    }

    /// Graph of `kind` for `rows`; the inner `None` means "no graph"
    pub fn graph(&self, kind: GraphKind, rows: &[PostingRow]) -> Arc<Option<Graph>> {
        let params = BuildParams {
            tags: &self.config.tags,
            axis: match kind {
                GraphKind::Bipartite => Some(self.config.axis),
                GraphKind::Cooccurrence => None,
            },
        };
        let key = CacheKey::new(Fingerprint::of_rows(rows, &params), kind);

        self.graphs.get_or_build(key, || match kind {
            GraphKind::Bipartite => build_bipartite(&self.incidence_matrix(rows)),
            GraphKind::Cooccurrence => build_cooccurrence(&self.cooccurrence_matrix(rows)),
        })
    }

    pub fn bipartite_graph(&self, rows: &[PostingRow]) -> Arc<Option<Graph>> {
        self.graph(GraphKind::Bipartite, rows)
    }

    pub fn cooccurrence_graph(&self, rows: &[PostingRow]) -> Arc<Option<Graph>> {
        self.graph(GraphKind::Cooccurrence, rows)
    }

    /// Selectable node labels: tags, then group keys
    pub fn node_choices(&self, rows: &[PostingRow]) -> Vec<String> {
        self.incidence_matrix(rows).node_choices()
    }

    /// Similar nodes, or `Ok(None)` when the rows produce no graph
    pub fn recommend_similar(
        &self,
        kind: GraphKind,
        rows: &[PostingRow],
        node: &str,
        target_class: NodeClass,
        top_n: Option<usize>,
    ) -> EngineResult<Option<Vec<ScoredNode>>> {
        let graph = self.graph(kind, rows);
        let graph = match (*graph).as_ref() {
            Some(g) => g,
            None => {
                debug!("No {} graph for similarity query on '{}'", kind, node);
                return Ok(None);
            }
        };
        let top_n = self.effective_top_n(top_n);
        let recs = recommend_similar(graph, node, target_class, top_n, &self.config.recommend)?;
        Ok(Some(recs))
    }

    /// Heaviest neighbors, or `Ok(None)` when the rows produce no graph
    pub fn neighbor_recommendations(
        &self,
        kind: GraphKind,
        rows: &[PostingRow],
        node: &str,
        target_class: NodeClass,
        top_n: Option<usize>,
    ) -> EngineResult<Option<Vec<ScoredNode>>> {
        let graph = self.graph(kind, rows);
        let graph = match (*graph).as_ref() {
            Some(g) => g,
            None => {
                debug!("No {} graph for neighbor query on '{}'", kind, node);
                return Ok(None);
            }
        };
        let top_n = self.effective_top_n(top_n);
        let recs = neighbor_recommendations(graph, node, target_class, top_n)?;
        Ok(Some(recs))
    }

    /// Renderer view of the graph, optionally grouped
    pub fn snapshot(
        &self,
        kind: GraphKind,
        rows: &[PostingRow],
        grouper: Option<&dyn NodeGrouper>,
    ) -> Option<GraphSnapshot> {
        let graph = self.graph(kind, rows);
        (*graph).as_ref().map(|g| {
            let grouping = grouper.map(|grouper| grouper.group(g));
            GraphSnapshot::from_graph(g, grouping.as_ref())
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.graphs.stats()
    }

    /// Requested top_n (or the default) capped at `max_top_n`. Zero passes
    /// through so the recommender can reject it.
    fn effective_top_n(&self, top_n: Option<usize>) -> usize {
        let rec = &self.config.recommend;
        top_n.unwrap_or(rec.default_top_n).min(rec.max_top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::ComponentGrouper;
    use std::collections::HashMap;

    fn rows() -> Vec<PostingRow> {
        vec![
            PostingRow::new(Some("Backend"), Some("Moscow"), Some("Rust, SQL")),
            PostingRow::new(Some("Backend"), Some("Kazan"), Some("SQL")),
            PostingRow::new(Some("Analyst"), Some("Kazan"), Some("['SQL', 'Excel']")),
            PostingRow::new(Some("Designer"), Some("Moscow"), None),
        ]
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_graph_is_cached_per_input() {
        let engine = engine();
        let data = rows();

        let g1 = engine.bipartite_graph(&data);
        let g2 = engine.bipartite_graph(&data);
        assert!(Arc::ptr_eq(&g1, &g2));

        let fewer = &data[..1];
        let g3 = engine.bipartite_graph(fewer);
        assert!(!Arc::ptr_eq(&g1, &g3));

        let stats = engine.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn test_no_graph_is_not_an_error() {
        let engine = engine();
        let empty: Vec<PostingRow> = Vec::new();

        assert!(engine.bipartite_graph(&empty).is_none());
        let recs = engine
            .recommend_similar(GraphKind::Bipartite, &empty, "Backend", NodeClass::First, None)
            .unwrap();
        assert!(recs.is_none());
        assert!(engine.snapshot(GraphKind::Cooccurrence, &empty, None).is_none());
    }

    #[test]
    fn test_similar_specialties() {
        let engine = engine();
        let recs = engine
            .recommend_similar(GraphKind::Bipartite, &rows(), "Backend", NodeClass::First, None)
            .unwrap()
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].node, "Analyst");
        assert!(recs[0].score > 0.0 && recs[0].score <= 1.0);
    }

    #[test]
    fn test_neighbors_of_skill() {
        let engine = engine();
        let recs = engine
            .neighbor_recommendations(
                GraphKind::Bipartite,
                &rows(),
                "sql",
                NodeClass::First,
                Some(1),
            )
            .unwrap()
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].node, "Backend");
        assert_eq!(recs[0].score, 2.0);
    }

    #[test]
    fn test_unknown_node_surfaces_error() {
        let engine = engine();
        let err = engine
            .neighbor_recommendations(
                GraphKind::Bipartite,
                &rows(),
                "cobol",
                NodeClass::First,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Recommend(RecommendError::NodeNotFound(_))));
    }

    #[test]
    fn test_top_n_capped_and_zero_rejected() {
        let engine = engine();
        assert_eq!(engine.effective_top_n(Some(100)), 30);
        assert_eq!(engine.effective_top_n(None), 5);

        let err = engine
            .recommend_similar(GraphKind::Bipartite, &rows(), "Backend", NodeClass::First, Some(0))
            .unwrap_err();
        assert!(matches!(err, EngineError::Recommend(RecommendError::InvalidArgument(_))));
    }

    #[test]
    fn test_district_axis() {
        let mut districts = HashMap::new();
        districts.insert("Moscow".to_string(), "Central".to_string());
        let config = EngineConfig {
            axis: GroupAxis::District,
            ..Default::default()
        };
        let engine = Engine::new(config).unwrap().with_district_lookup(Arc::new(districts));

        let matrix = engine.incidence_matrix(&rows());
        // Kazan is unknown to the lookup, so only Moscow rows are grouped
        assert_eq!(matrix.groups().collect::<Vec<_>>(), vec!["Central"]);
        assert_eq!(matrix.get("Central", "sql"), 1);
    }

    #[test]
    fn test_district_axis_without_lookup() {
        let config = EngineConfig {
            axis: GroupAxis::District,
            ..Default::default()
        };
        let unresolved = Engine::new(config).unwrap();
        assert!(unresolved.missing_district_lookup());
        assert!(unresolved.tag_rows(&rows()).iter().all(|r| r.group.is_none()));
        assert!(unresolved.bipartite_graph(&rows()).is_none());

        let resolved = unresolved.with_district_lookup(Arc::new(HashMap::<String, String>::new()));
        assert!(!resolved.missing_district_lookup());
        // Specialty axis never needs one
        assert!(!engine().missing_district_lookup());
    }

    #[test]
    fn test_snapshot_grouped() {
        let engine = engine();
        let snapshot = engine
            .snapshot(GraphKind::Cooccurrence, &rows(), Some(&ComponentGrouper))
            .unwrap();
        assert_eq!(snapshot.kind, GraphKind::Cooccurrence);
        assert_eq!(snapshot.nodes.len(), 3);
        assert!(snapshot.nodes.iter().all(|n| n.group.is_some()));
    }

    #[test]
    fn test_node_choices() {
        let engine = engine();
        assert_eq!(
            engine.node_choices(&rows()),
            vec!["rust", "sql", "excel", "Backend", "Analyst"]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.recommend.max_top_n = 0;
        assert!(matches!(Engine::new(config), Err(EngineError::Config(_))));
    }
}
