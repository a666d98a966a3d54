//! Direct neighbor collection

use super::common::{ClassId, GraphView};
use super::ranking::ScoredIndex;

/// Collect the incident edges of `idx` as `(neighbor, weight)` scores.
///
/// When `target_class` is set, only neighbors of that class are kept.
/// Output follows CSR order, i.e. edge insertion order.
pub fn incident_weights(
    view: &GraphView,
    idx: usize,
    target_class: Option<ClassId>,
) -> Vec<ScoredIndex> {
    view.neighbors(idx)
        .iter()
        .zip(view.weights(idx))
        .filter(|&(&nb, _)| target_class.map_or(true, |class| view.class_of(nb) == class))
        .map(|(&nb, &w)| ScoredIndex::new(nb, w))
        .collect()
}
