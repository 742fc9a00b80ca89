//! File-backed directory for local runs and tests
//!
//! A fixture document describes a whole fleet (clusters, services, work units,
//! hosts and compute instances) and answers directory queries from memory.

use crate::directory::client::DirectoryClient;
use crate::directory::types::{
    ClusterDescriptor, ComputeInstance, HostDescriptor, ServiceDescriptor, WorkUnitDescriptor,
};
use crate::error::{DirectoryError, DirectoryResult, FleetmapError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const SAMPLE_FLEET: &str = include_str!("sample_fleet.yaml");

/// Serialized form of a fleet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub clusters: Vec<FixtureCluster>,
    /// Deployable-unit reference -> image identifier
    #[serde(default)]
    pub images: HashMap<String, String>,
    #[serde(default)]
    pub hosts: Vec<HostDescriptor>,
    #[serde(default)]
    pub compute_instances: Vec<ComputeInstance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCluster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub services: Vec<FixtureService>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureService {
    pub id: String,
    pub name: String,
    pub image_ref: String,
    #[serde(default)]
    pub work_units: Vec<WorkUnitDescriptor>,
}

impl Fixture {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a fixture, picking the format from the file extension
    /// (`.json` is JSON, anything else is YAML).
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FleetmapError::ConfigError(format!(
                "Failed to read fixture {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}

/// In-memory [`DirectoryClient`] answering from a [`Fixture`]
pub struct FixtureDirectory {
    clusters: Vec<FixtureCluster>,
    images: HashMap<String, String>,
    hosts: HashMap<String, HostDescriptor>,
    compute_instances: HashMap<String, ComputeInstance>,
}

impl FixtureDirectory {
    pub fn new(fixture: Fixture) -> Self {
        let hosts = fixture
            .hosts
            .into_iter()
            .map(|h| (h.id.clone(), h))
            .collect();
        let compute_instances = fixture
            .compute_instances
            .into_iter()
            .map(|i| (i.id.clone(), i))
            .collect();

        Self {
            clusters: fixture.clusters,
            images: fixture.images,
            hosts,
            compute_instances,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Loading directory fixture from {}", path.display());
        Ok(Self::new(Fixture::from_path(path)?))
    }

    /// Small built-in fleet with two clusters, for trying the tool out.
    pub fn sample() -> Result<Self> {
        Ok(Self::new(Fixture::from_yaml_str(SAMPLE_FLEET)?))
    }

    fn cluster(&self, cluster_id: &str) -> DirectoryResult<&FixtureCluster> {
        self.clusters
            .iter()
            .find(|c| c.id == cluster_id)
            .ok_or_else(|| DirectoryError::not_found("cluster", cluster_id))
    }
}

#[async_trait]
impl DirectoryClient for FixtureDirectory {
    async fn list_clusters(&self) -> DirectoryResult<Vec<String>> {
        Ok(self.clusters.iter().map(|c| c.id.clone()).collect())
    }

    async fn describe_clusters(&self, ids: &[String]) -> DirectoryResult<Vec<ClusterDescriptor>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.clusters.iter().find(|c| &c.id == id))
            .map(|c| ClusterDescriptor {
                id: c.id.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn list_services(&self, cluster_id: &str) -> DirectoryResult<Vec<String>> {
        let cluster = self.cluster(cluster_id)?;
        Ok(cluster.services.iter().map(|s| s.id.clone()).collect())
    }

    async fn describe_services(
        &self,
        cluster_id: &str,
        ids: &[String],
    ) -> DirectoryResult<Vec<ServiceDescriptor>> {
        let cluster = self.cluster(cluster_id)?;
        Ok(ids
            .iter()
            .filter_map(|id| cluster.services.iter().find(|s| &s.id == id))
            .map(|s| ServiceDescriptor {
                id: s.id.clone(),
                name: s.name.clone(),
                image_ref: s.image_ref.clone(),
                cluster_id: cluster.id.clone(),
            })
            .collect())
    }

    async fn describe_image(&self, image_ref: &str) -> DirectoryResult<String> {
        self.images
            .get(image_ref)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found("image", image_ref))
    }

    async fn list_work_units(
        &self,
        cluster_id: &str,
        service_id: &str,
    ) -> DirectoryResult<Vec<String>> {
        let service = self
            .cluster(cluster_id)?
            .services
            .iter()
            .find(|s| s.id == service_id)
            .ok_or_else(|| DirectoryError::not_found("service", service_id))?;

        Ok(service.work_units.iter().map(|w| w.id.clone()).collect())
    }

    async fn describe_work_units(
        &self,
        cluster_id: &str,
        ids: &[String],
    ) -> DirectoryResult<Vec<WorkUnitDescriptor>> {
        let cluster = self.cluster(cluster_id)?;
        Ok(cluster
            .services
            .iter()
            .flat_map(|s| s.work_units.iter())
            .filter(|w| ids.contains(&w.id))
            .cloned()
            .collect())
    }

    async fn describe_hosts(
        &self,
        _cluster_id: &str,
        ids: &[String],
    ) -> DirectoryResult<Vec<HostDescriptor>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.hosts.get(id))
            .cloned()
            .collect())
    }

    async fn describe_compute_instances(
        &self,
        ids: &[String],
    ) -> DirectoryResult<Vec<ComputeInstance>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.compute_instances.get(id))
            .cloned()
            .collect())
    }
}
