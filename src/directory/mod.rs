pub mod client;
pub mod fixture;
pub mod types;

pub use client::DirectoryClient;
pub use fixture::{Fixture, FixtureDirectory};
pub use types::{
    ClusterDescriptor, ComputeInstance, HostDescriptor, ServiceDescriptor, WorkUnitDescriptor,
};
