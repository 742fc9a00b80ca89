use crate::error::FleetmapError;
use crate::metrics::collector::InventoryMetrics;
use crate::Result;
use prometheus::{Encoder, TextEncoder};

/// Renders [`InventoryMetrics`] in the Prometheus text exposition format
pub struct PrometheusExporter {
    metrics: InventoryMetrics,
}

impl PrometheusExporter {
    pub fn new(metrics: InventoryMetrics) -> Self {
        Self { metrics }
    }

    pub fn format_metrics(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.metrics.registry().gather(), &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| FleetmapError::MetricsError(e.to_string()))
    }
}
