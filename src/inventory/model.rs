use crate::directory::types::{ClusterDescriptor, ComputeInstance};
use crate::inventory::labels::Labels;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether an entry could be fully collected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Available,
    Unavailable {
        reason: String,
    },
}

impl Availability {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Availability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Availability::Available => None,
            Availability::Unavailable { reason } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub arn: String,
    pub name: String,
    /// In collection-completion order
    pub services: Vec<Service>,
    #[serde(default)]
    pub status: Availability,
}

impl Cluster {
    pub fn new(descriptor: ClusterDescriptor, services: Vec<Service>) -> Self {
        Self {
            arn: descriptor.id,
            name: descriptor.name,
            services,
            status: Availability::Available,
        }
    }

    pub fn unavailable(descriptor: ClusterDescriptor, reason: impl Into<String>) -> Self {
        Self {
            arn: descriptor.id,
            name: descriptor.name,
            services: Vec::new(),
            status: Availability::unavailable(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub image: String,
    #[serde(flatten)]
    pub labels: Labels,
    pub private_ips: BTreeSet<String>,
    pub public_ips: BTreeSet<String>,
    #[serde(default)]
    pub status: Availability,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        labels: Labels,
        addresses: Vec<InstanceAddress>,
    ) -> Self {
        let mut private_ips = BTreeSet::new();
        let mut public_ips = BTreeSet::new();

        for address in addresses {
            private_ips.extend(address.private_ip);
            public_ips.extend(address.public_ip);
        }

        Self {
            name: name.into(),
            image: image.into(),
            labels,
            private_ips,
            public_ips,
            status: Availability::Available,
        }
    }

    pub fn with_status(mut self, status: Availability) -> Self {
        self.status = status;
        self
    }
}

/// Addresses of one compute instance backing a service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceAddress {
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
}

impl From<ComputeInstance> for InstanceAddress {
    fn from(instance: ComputeInstance) -> Self {
        Self {
            private_ip: instance.private_ip.filter(|ip| !ip.is_empty()),
            public_ip: instance.public_ip.filter(|ip| !ip.is_empty()),
        }
    }
}
