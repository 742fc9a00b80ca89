//! Service → work units → hosts → compute instances
//!
//! Each stage that comes back empty ends the walk with an empty result; only
//! a failed directory call is an error.

use crate::error::DirectoryResult;
use crate::inventory::collector::{op, Collector};
use crate::inventory::model::InstanceAddress;
use std::collections::HashSet;
use tracing::debug;

impl Collector {
    pub(crate) async fn instances(
        &self,
        cluster_id: &str,
        service_id: &str,
    ) -> DirectoryResult<Vec<InstanceAddress>> {
        let unit_ids = self
            .call(
                op::LIST_WORK_UNITS,
                self.directory.list_work_units(cluster_id, service_id),
            )
            .await?;
        if unit_ids.is_empty() {
            debug!("No work units found for service {}", service_id);
            return Ok(Vec::new());
        }

        let units = self
            .call(
                op::DESCRIBE_WORK_UNITS,
                self.directory.describe_work_units(cluster_id, &unit_ids),
            )
            .await?;
        let host_ids = unique(units.into_iter().filter_map(|u| u.host_placement_id));
        if host_ids.is_empty() {
            debug!("No host placements found for service {}", service_id);
            return Ok(Vec::new());
        }

        let hosts = self
            .call(
                op::DESCRIBE_HOSTS,
                self.directory.describe_hosts(cluster_id, &host_ids),
            )
            .await?;
        let compute_ids = unique(hosts.into_iter().filter_map(|h| h.compute_instance_id));
        if compute_ids.is_empty() {
            debug!("No compute instances found for service {}", service_id);
            return Ok(Vec::new());
        }

        let instances = self
            .call(
                op::DESCRIBE_COMPUTE_INSTANCES,
                self.directory.describe_compute_instances(&compute_ids),
            )
            .await?;

        debug!(
            "Resolved {} instances for service {}",
            instances.len(),
            service_id
        );

        Ok(instances.into_iter().map(InstanceAddress::from).collect())
    }
}

/// Several work units often share a host; ask for each id once.
fn unique(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(id.clone())).collect()
}
