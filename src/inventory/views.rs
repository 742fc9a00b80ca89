use crate::inventory::model::Cluster;
use std::collections::BTreeSet;

/// Distinct, non-empty `app` labels across the tree, sorted.
pub fn app_slugs(clusters: &[Cluster]) -> Vec<String> {
    clusters
        .iter()
        .flat_map(|c| c.services.iter())
        .filter(|s| !s.labels.app.is_empty())
        .map(|s| s.labels.app.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keep only services labelled with `app`, dropping clusters left empty.
/// An empty `app` returns the tree untouched.
pub fn filter_by_app(clusters: Vec<Cluster>, app: &str) -> Vec<Cluster> {
    if app.is_empty() {
        return clusters;
    }

    clusters
        .into_iter()
        .filter_map(|mut cluster| {
            cluster.services.retain(|s| s.labels.app == app);
            (!cluster.services.is_empty()).then_some(cluster)
        })
        .collect()
}
