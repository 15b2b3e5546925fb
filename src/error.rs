use thiserror::Error;

/// Error type for time-series store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A time-based or range query was issued against a store with no samples.
    #[error("Time series is empty")]
    EmptySeries,

    #[error("Index out of bounds: index={index}, count={count}")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("Configuration Error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        StoreError::ConfigError(err.to_string())
    }
}
