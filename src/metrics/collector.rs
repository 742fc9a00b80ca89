use crate::inventory::Cluster;
use crate::Result;
use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::time::Duration;

/// Prometheus metrics describing inventory runs. Clones share the same series.
#[derive(Clone)]
pub struct InventoryMetrics {
    registry: Registry,
    directory_calls: IntCounterVec,
    directory_failures: IntCounterVec,
    call_duration: HistogramVec,
    unavailable: IntCounterVec,
    runs: IntCounter,
    clusters: IntGauge,
    services: IntGauge,
    run_duration_ms: IntGauge,
}

impl InventoryMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let directory_calls = IntCounterVec::new(
            Opts::new(
                "fleetmap_directory_calls_total",
                "Directory calls issued, by operation",
            ),
            &["operation"],
        )?;
        let directory_failures = IntCounterVec::new(
            Opts::new(
                "fleetmap_directory_failures_total",
                "Directory calls that failed or timed out, by operation",
            ),
            &["operation"],
        )?;
        let call_duration = HistogramVec::new(
            HistogramOpts::new(
                "fleetmap_directory_call_duration_seconds",
                "Directory call latency",
            ),
            &["operation"],
        )?;
        let unavailable = IntCounterVec::new(
            Opts::new(
                "fleetmap_unavailable_entries_total",
                "Clusters or services reported as unavailable",
            ),
            &["level"],
        )?;
        let runs = IntCounter::new("fleetmap_runs_total", "Completed inventory runs")?;
        let clusters = IntGauge::new("fleetmap_clusters", "Clusters in the last inventory")?;
        let services = IntGauge::new("fleetmap_services", "Services in the last inventory")?;
        let run_duration_ms = IntGauge::new(
            "fleetmap_last_run_duration_milliseconds",
            "Wall time of the last inventory run",
        )?;

        registry.register(Box::new(directory_calls.clone()))?;
        registry.register(Box::new(directory_failures.clone()))?;
        registry.register(Box::new(call_duration.clone()))?;
        registry.register(Box::new(unavailable.clone()))?;
        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(clusters.clone()))?;
        registry.register(Box::new(services.clone()))?;
        registry.register(Box::new(run_duration_ms.clone()))?;

        Ok(Self {
            registry,
            directory_calls,
            directory_failures,
            call_duration,
            unavailable,
            runs,
            clusters,
            services,
            run_duration_ms,
        })
    }

    pub fn observe_call(&self, operation: &str, elapsed: Duration, ok: bool) {
        self.directory_calls.with_label_values(&[operation]).inc();
        self.call_duration
            .with_label_values(&[operation])
            .observe(elapsed.as_secs_f64());
        if !ok {
            self.directory_failures.with_label_values(&[operation]).inc();
        }
    }

    pub fn record_unavailable(&self, level: &str) {
        self.unavailable.with_label_values(&[level]).inc();
    }

    pub fn record_run(&self, clusters: &[Cluster], elapsed: Duration) {
        self.runs.inc();
        self.clusters.set(clusters.len() as i64);
        self.services
            .set(clusters.iter().map(|c| c.services.len()).sum::<usize>() as i64);
        self.run_duration_ms.set(elapsed.as_millis() as i64);
    }

    pub fn directory_calls(&self, operation: &str) -> u64 {
        self.directory_calls.with_label_values(&[operation]).get()
    }

    pub fn directory_failures(&self, operation: &str) -> u64 {
        self.directory_failures.with_label_values(&[operation]).get()
    }

    pub fn unavailable(&self, level: &str) -> u64 {
        self.unavailable.with_label_values(&[level]).get()
    }

    pub fn runs(&self) -> u64 {
        self.runs.get()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
