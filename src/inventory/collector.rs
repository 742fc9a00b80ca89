//! Shared state for one inventory, handed to every collection task
//!
//! All outbound directory calls pass through [`Collector::call`], which caps
//! the number of calls in flight and applies the per-call timeout.

use crate::config::CollectorConfig;
use crate::directory::DirectoryClient;
use crate::error::{DirectoryError, DirectoryResult};
use crate::inventory::labels::LabelExtractor;
use crate::metrics::InventoryMetrics;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// Directory operation names, as used in logs, errors and metric labels
pub(crate) mod op {
    pub const LIST_CLUSTERS: &str = "list_clusters";
    pub const DESCRIBE_CLUSTERS: &str = "describe_clusters";
    pub const LIST_SERVICES: &str = "list_services";
    pub const DESCRIBE_SERVICES: &str = "describe_services";
    pub const DESCRIBE_IMAGE: &str = "describe_image";
    pub const LIST_WORK_UNITS: &str = "list_work_units";
    pub const DESCRIBE_WORK_UNITS: &str = "describe_work_units";
    pub const DESCRIBE_HOSTS: &str = "describe_hosts";
    pub const DESCRIBE_COMPUTE_INSTANCES: &str = "describe_compute_instances";
}

pub(crate) struct Collector {
    pub(crate) directory: Arc<dyn DirectoryClient>,
    pub(crate) extractor: LabelExtractor,
    pub(crate) metrics: InventoryMetrics,
    permits: Semaphore,
    call_timeout: Option<Duration>,
}

impl Collector {
    pub(crate) fn new(
        directory: Arc<dyn DirectoryClient>,
        extractor: LabelExtractor,
        metrics: InventoryMetrics,
        config: &CollectorConfig,
    ) -> Self {
        Self {
            directory,
            extractor,
            metrics,
            permits: Semaphore::new(config.max_concurrent_calls.max(1)),
            call_timeout: config.call_timeout(),
        }
    }

    /// Run one directory call under the concurrency gate and timeout.
    ///
    /// The permit is held only for the call itself, never across a join, so
    /// nested collection levels cannot starve each other.
    pub(crate) async fn call<T, F>(&self, operation: &'static str, call: F) -> DirectoryResult<T>
    where
        F: Future<Output = DirectoryResult<T>>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DirectoryError::request(operation, "call gate closed"))?;

        let started = Instant::now();
        let result = match self.call_timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .unwrap_or_else(|_| {
                    Err(DirectoryError::Timeout {
                        operation: operation.to_string(),
                        timeout,
                    })
                }),
            None => call.await,
        };

        self.metrics
            .observe_call(operation, started.elapsed(), result.is_ok());
        if let Err(e) = &result {
            debug!("Directory call {} failed: {}", operation, e);
        }

        result
    }
}
