//! Cluster → service → instance inventory
//!
//! [`Inventory::clusters`] walks the directory top-down, fanning out one task
//! per cluster and, inside each, one task per service. Results come back in
//! completion order.

mod clusters;
mod collector;
pub mod labels;
pub mod model;
mod resolver;
mod services;
pub mod views;

pub use labels::{LabelExtractor, LabelRules, Labels};
pub use model::{Availability, Cluster, InstanceAddress, Service};
pub use views::{app_slugs, filter_by_app};

use crate::config::Config;
use crate::directory::{ClusterDescriptor, DirectoryClient};
use crate::error::{DirectoryResult, Result};
use crate::metrics::InventoryMetrics;
use collector::Collector;
use std::sync::Arc;

/// Entry point for collecting a fleet inventory. Cheap to clone.
#[derive(Clone)]
pub struct Inventory {
    collector: Arc<Collector>,
}

impl Inventory {
    pub fn new(directory: Arc<dyn DirectoryClient>, config: &Config) -> Result<Self> {
        Self::with_metrics(directory, config, InventoryMetrics::new()?)
    }

    pub fn with_metrics(
        directory: Arc<dyn DirectoryClient>,
        config: &Config,
        metrics: InventoryMetrics,
    ) -> Result<Self> {
        config.validate()?;
        let extractor = LabelExtractor::new(&config.labels)?;

        Ok(Self {
            collector: Arc::new(Collector::new(
                directory,
                extractor,
                metrics,
                &config.collector,
            )),
        })
    }

    /// Collect every cluster with its services and instance addresses.
    ///
    /// Returns an error only when the cluster list itself cannot be fetched.
    pub async fn clusters(&self) -> Result<Vec<Cluster>> {
        self.collector.clusters().await
    }

    /// Collect the services of a single cluster.
    pub async fn services(&self, cluster: &ClusterDescriptor) -> DirectoryResult<Vec<Service>> {
        self.collector.services(cluster).await
    }

    /// Resolve the addresses of the instances backing one service.
    pub async fn instances(
        &self,
        cluster_id: &str,
        service_id: &str,
    ) -> DirectoryResult<Vec<InstanceAddress>> {
        self.collector.instances(cluster_id, service_id).await
    }

    pub fn metrics(&self) -> &InventoryMetrics {
        &self.collector.metrics
    }
}
