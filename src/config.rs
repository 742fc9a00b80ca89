use crate::error::{FleetmapError, Result};
use crate::inventory::labels::LabelRules;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub labels: LabelRules,
    pub collector: CollectorConfig,
}

/// Limits applied to outbound directory calls during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Upper bound on directory calls in flight at once, across all levels.
    pub max_concurrent_calls: usize,
    /// Per-call timeout in seconds. `None` waits indefinitely.
    pub call_timeout_secs: Option<u64>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_calls: 32,
            call_timeout_secs: Some(30),
        }
    }
}

impl CollectorConfig {
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Read a config file; `.json` files are parsed as JSON, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FleetmapError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.collector.max_concurrent_calls == 0 {
            return Err(FleetmapError::ConfigError(
                "collector.max_concurrent_calls must be at least 1".to_string(),
            ));
        }
        if self.collector.call_timeout_secs == Some(0) {
            return Err(FleetmapError::ConfigError(
                "collector.call_timeout_secs must be at least 1, or null to disable".to_string(),
            ));
        }

        self.labels.validate()
    }
}
