#![doc = include_str!("../README.md")]
// Declare modules
pub mod buffer;
pub mod capacity;
pub mod config;
pub mod error;
pub mod interpolation;
pub mod query;
pub mod search;
pub mod store;
pub mod telemetry;
pub mod types;

/// Capacity sizing rule and the default growth chunk.
pub use crate::capacity::{grow_to_at_least, DEFAULT_GROWTH_CHUNK};
/// Configuration options for a store.
pub use crate::config::{load_store_config, parse_store_config, DuplicatePolicy, StoreConfig};
/// Error type for store operations.
pub use crate::error::StoreError;
/// Interpolation policy selected at construction.
pub use crate::interpolation::InterpolationMode;
/// Main entry point: the irregular time-series store.
pub use crate::store::TimeSeriesStore;
/// Structured event hook for observability.
pub use crate::telemetry::{StoreEvent, StoreEventListener};
/// Timestamp alias (nanoseconds since epoch), the sample type and the query interval.
pub use crate::types::{Interval, Timestamp, Value};
