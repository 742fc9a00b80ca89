use crate::error::Result;
use crate::inventory::collector::{op, Collector};
use crate::inventory::model::Cluster;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{info, warn};

impl Collector {
    /// Build the full cluster tree.
    ///
    /// Listing or describing the clusters themselves is the only fatal step;
    /// anything that goes wrong inside a single cluster is reported on that
    /// cluster's entry.
    pub(crate) async fn clusters(self: &Arc<Self>) -> Result<Vec<Cluster>> {
        let started = Instant::now();

        let ids = self
            .call(op::LIST_CLUSTERS, self.directory.list_clusters())
            .await?;
        if ids.is_empty() {
            info!("Directory reports no clusters");
            self.metrics.record_run(&[], started.elapsed());
            return Ok(Vec::new());
        }

        let descriptors = self
            .call(op::DESCRIBE_CLUSTERS, self.directory.describe_clusters(&ids))
            .await?;

        info!("Collecting {} clusters", descriptors.len());

        let mut tasks = JoinSet::new();
        for descriptor in descriptors {
            let collector = Arc::clone(self);
            tasks.spawn(async move {
                let outcome = AssertUnwindSafe(collector.services(&descriptor))
                    .catch_unwind()
                    .await;

                match outcome {
                    Ok(Ok(services)) => Cluster::new(descriptor, services),
                    Ok(Err(e)) => {
                        warn!("Cluster {} is unavailable: {}", descriptor.name, e);
                        collector.metrics.record_unavailable("cluster");
                        Cluster::unavailable(descriptor, e.to_string())
                    }
                    Err(_) => {
                        warn!("Collection of cluster {} panicked", descriptor.name);
                        collector.metrics.record_unavailable("cluster");
                        Cluster::unavailable(descriptor, "cluster collection panicked")
                    }
                }
            });
        }

        let mut clusters = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(cluster) => clusters.push(cluster),
                Err(e) => warn!("Cluster task did not finish: {}", e),
            }
        }

        self.metrics.record_run(&clusters, started.elapsed());

        info!(
            "Collected {} clusters, {} services in {:?}",
            clusters.len(),
            clusters.iter().map(|c| c.services.len()).sum::<usize>(),
            started.elapsed()
        );

        Ok(clusters)
    }
}
