pub mod collector;
pub mod exporter;

pub use collector::InventoryMetrics;
pub use exporter::PrometheusExporter;
