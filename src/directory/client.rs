use crate::directory::types::{
    ClusterDescriptor, ComputeInstance, HostDescriptor, ServiceDescriptor, WorkUnitDescriptor,
};
use crate::error::DirectoryResult;
use async_trait::async_trait;

/// Read-only view of the remote platform that owns clusters, services and
/// their compute.
///
/// Implementations are shared across every collector task, so they must be
/// safe for concurrent use. A single call is expected to return the complete
/// result set; paging is the implementation's concern.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn list_clusters(&self) -> DirectoryResult<Vec<String>>;

    async fn describe_clusters(&self, ids: &[String]) -> DirectoryResult<Vec<ClusterDescriptor>>;

    async fn list_services(&self, cluster_id: &str) -> DirectoryResult<Vec<String>>;

    async fn describe_services(
        &self,
        cluster_id: &str,
        ids: &[String],
    ) -> DirectoryResult<Vec<ServiceDescriptor>>;

    /// Resolve a deployable-unit reference to its container image identifier.
    async fn describe_image(&self, image_ref: &str) -> DirectoryResult<String>;

    async fn list_work_units(
        &self,
        cluster_id: &str,
        service_id: &str,
    ) -> DirectoryResult<Vec<String>>;

    async fn describe_work_units(
        &self,
        cluster_id: &str,
        ids: &[String],
    ) -> DirectoryResult<Vec<WorkUnitDescriptor>>;

    async fn describe_hosts(
        &self,
        cluster_id: &str,
        ids: &[String],
    ) -> DirectoryResult<Vec<HostDescriptor>>;

    async fn describe_compute_instances(
        &self,
        ids: &[String],
    ) -> DirectoryResult<Vec<ComputeInstance>>;
}
