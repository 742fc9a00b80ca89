pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod inventory;
pub mod metrics;
pub mod ui;

pub use config::Config;
pub use error::{DirectoryError, FleetmapError, Result};
pub use inventory::{Availability, Cluster, Inventory, Labels, Service};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
