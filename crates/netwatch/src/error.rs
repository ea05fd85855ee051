use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a target registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read target file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse target list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Target #{index} is missing the \"{field}\" field")]
    MissingField { index: usize, field: &'static str },
}

/// Configuration rejected at startup, before any probing begins
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Revision interval must be an even number of minutes, got {0}")]
    OddRevisionInterval(u32),

    #[error("Revision interval must be at least {min} minutes, got {got}")]
    RevisionIntervalTooShort { got: u32, min: u32 },

    #[error("Invalid scheduled time \"{0}\", expected HH:MM:SS")]
    InvalidScheduledTime(String),

    #[error("{0} must be at least 1")]
    ZeroAttempts(&'static str),

    #[error("Transition channel capacity must be at least 1")]
    ZeroEventBuffer,
}

/// A report sink could not deliver an audit report
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to compose report: {0}")]
    Compose(String),

    #[error("Failed to deliver report: {0}")]
    Delivery(#[source] Box<dyn std::error::Error + Send + Sync>),
}
