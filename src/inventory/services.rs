use crate::directory::types::{ClusterDescriptor, ServiceDescriptor};
use crate::error::DirectoryResult;
use crate::inventory::collector::{op, Collector};
use crate::inventory::labels::Labels;
use crate::inventory::model::{Availability, Service};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

impl Collector {
    /// Collect every service of one cluster, one task per service.
    ///
    /// Fails only when the cluster's services cannot be listed or described.
    /// A service whose image or instances cannot be resolved is still returned,
    /// marked unavailable.
    pub(crate) async fn services(
        self: &Arc<Self>,
        cluster: &ClusterDescriptor,
    ) -> DirectoryResult<Vec<Service>> {
        let ids = self
            .call(op::LIST_SERVICES, self.directory.list_services(&cluster.id))
            .await?;
        if ids.is_empty() {
            debug!("Cluster {} has no services", cluster.name);
            return Ok(Vec::new());
        }

        let descriptors = self
            .call(
                op::DESCRIBE_SERVICES,
                self.directory.describe_services(&cluster.id, &ids),
            )
            .await?;

        let mut tasks = JoinSet::new();
        for descriptor in descriptors {
            let collector = Arc::clone(self);
            tasks.spawn(async move {
                match AssertUnwindSafe(collector.service(&descriptor))
                    .catch_unwind()
                    .await
                {
                    Ok(service) => service,
                    Err(_) => {
                        collector.metrics.record_unavailable("service");
                        Service::new(&descriptor.name, "", Labels::default(), Vec::new())
                            .with_status(Availability::unavailable("service collection panicked"))
                    }
                }
            });
        }

        let mut services = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(service) => services.push(service),
                Err(e) => warn!("Service task in cluster {} did not finish: {}", cluster.name, e),
            }
        }

        debug!(
            "Collected {} services for cluster {}",
            services.len(),
            cluster.name
        );

        Ok(services)
    }

    async fn service(&self, descriptor: &ServiceDescriptor) -> Service {
        let (image, instances) = tokio::join!(
            self.call(
                op::DESCRIBE_IMAGE,
                self.directory.describe_image(&descriptor.image_ref)
            ),
            self.instances(&descriptor.cluster_id, &descriptor.id),
        );

        let mut problems = Vec::new();

        let image = image.unwrap_or_else(|e| {
            problems.push(format!("image lookup: {}", e));
            String::new()
        });
        let addresses = instances.unwrap_or_else(|e| {
            problems.push(format!("instance lookup: {}", e));
            Vec::new()
        });

        let labels = self.extractor.extract(&image);
        let service = Service::new(&descriptor.name, image, labels, addresses);

        if problems.is_empty() {
            return service;
        }

        let reason = problems.join("; ");
        warn!("Service {} is unavailable: {}", descriptor.name, reason);
        self.metrics.record_unavailable("service");
        service.with_status(Availability::unavailable(reason))
    }
}
