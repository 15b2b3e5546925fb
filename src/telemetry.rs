use std::sync::Arc;

use crate::types::Timestamp;

/// Structured, in-process event hook for observability.
///
/// This crate is a library; emitting logs directly (e.g. `println!`) is not acceptable for
/// production. Instead, callers can provide an implementation that forwards these events to
/// `tracing`, `log`, metrics, or custom sinks.
pub trait StoreEventListener: std::fmt::Debug + Send + Sync + 'static {
    fn on_event(&self, event: StoreEvent);
}

/// Structured events emitted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The sample buffer was reallocated.
    CapacityGrown { from: usize, to: usize },
    /// A sample was inserted before the tail, shifting `count - index` samples.
    OutOfOrderInsert { index: usize, count: usize },
    /// A sample arrived with a timestamp that is already stored.
    DuplicateTimestamp {
        time: Timestamp,
        index: usize,
        replaced: bool,
    },
    /// All samples were dropped and the buffer released.
    Cleared { count: usize },
}

#[derive(Debug)]
pub struct NoopEventListener;

impl StoreEventListener for NoopEventListener {
    #[inline]
    fn on_event(&self, _event: StoreEvent) {}
}

pub fn noop_event_listener() -> Arc<dyn StoreEventListener> {
    Arc::new(NoopEventListener)
}

/// Metrics instrumentation on the `metrics` facade.
///
/// Emitting metrics is effectively a no-op until the host process installs a recorder.
pub mod store_metrics {
    use ::metrics::{describe_counter, describe_histogram, Unit};

    // Counters are exposed as `<name>_total` by the Prometheus exporter.
    pub const SAMPLES_ADDED: &str = "irregular_series_samples_added";
    pub const BUFFER_GROWTHS: &str = "irregular_series_buffer_growths";
    pub const OUT_OF_ORDER_INSERTS: &str = "irregular_series_out_of_order_inserts";
    pub const RANGE_QUERY_VALUES: &str = "irregular_series_range_query_values";

    #[inline]
    pub fn record_samples_added(samples: u64) {
        if samples > 0 {
            ::metrics::counter!(SAMPLES_ADDED).increment(samples);
        }
    }

    #[inline]
    pub fn record_buffer_growth() {
        ::metrics::counter!(BUFFER_GROWTHS).increment(1);
    }

    #[inline]
    pub fn record_out_of_order_insert() {
        ::metrics::counter!(OUT_OF_ORDER_INSERTS).increment(1);
    }

    #[inline]
    pub fn record_range_query(values: usize) {
        ::metrics::histogram!(RANGE_QUERY_VALUES).record(values as f64);
    }

    /// Registers descriptions for every metric with the installed recorder.
    pub fn describe_all() {
        describe_counter!(
            SAMPLES_ADDED,
            Unit::Count,
            "Total number of samples written through TimeSeriesStore::add."
        );
        describe_counter!(
            BUFFER_GROWTHS,
            Unit::Count,
            "Number of times the sample buffer was reallocated to a larger capacity."
        );
        describe_counter!(
            OUT_OF_ORDER_INSERTS,
            Unit::Count,
            "Samples that required a shift because they arrived before the current tail."
        );
        describe_histogram!(
            RANGE_QUERY_VALUES,
            Unit::Count,
            "Number of values returned per TimeSeriesStore::get_values call."
        );
    }
}
