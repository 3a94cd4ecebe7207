// File: crates/chart-advisor/src/error.rs
// Summary: Error types for configuration, observation sources, the feed and analytics sinks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Raised by an `ObservationSource` that could not produce data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("source I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed observation: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("refresh failed: {0}")]
    Source(#[from] SourceError),
}

/// Raised by an `EventSink` when a batch could not be persisted.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("batch rejected: {0}")]
    Rejected(String),
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}
