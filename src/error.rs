use std::time::Duration;
use thiserror::Error;

/// Failure of an outbound call to the directory service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("{operation} failed: {message}")]
    Request { operation: String, message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: String,
        timeout: Duration,
    },
}

impl DirectoryError {
    pub fn request(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DirectoryError::Request {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        DirectoryError::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

#[derive(Error, Debug)]
pub enum FleetmapError {
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Metrics error: {0}")]
    MetricsError(String),
}

impl From<serde_json::Error> for FleetmapError {
    fn from(e: serde_json::Error) -> Self {
        FleetmapError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for FleetmapError {
    fn from(e: serde_yaml::Error) -> Self {
        FleetmapError::SerializationError(e.to_string())
    }
}

impl From<prometheus::Error> for FleetmapError {
    fn from(e: prometheus::Error) -> Self {
        FleetmapError::MetricsError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FleetmapError>;
