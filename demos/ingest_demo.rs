use irregular_series::{
    InterpolationMode, Interval, StoreConfig, StoreError, StoreEvent, StoreEventListener,
    TimeSeriesStore, Value,
};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// Get current time in nanoseconds since epoch
fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64
}

// Prints store events to stdout; a real host would forward them to its logger.
#[derive(Debug)]
struct PrintingListener;

impl StoreEventListener for PrintingListener {
    fn on_event(&self, event: StoreEvent) {
        println!("  event: {:?}", event);
    }
}

fn main() -> Result<(), StoreError> {
    let config = StoreConfig {
        growth_chunk: 16, // Small value for demonstration
        event_listener: Arc::new(PrintingListener),
        ..StoreConfig::default()
    };
    let mut store = TimeSeriesStore::with_config(config)?;

    let start = now();
    let step = Duration::from_secs(10).as_nanos() as u64;

    println!("Ingesting 40 samples, every fifth one late...");
    let mut late = Vec::new();
    for i in 0..40u64 {
        let sample = Value::new(start + i * step, (i as f64 / 4.0).sin());
        if i % 5 == 0 {
            late.push(sample);
        } else {
            store.add(sample);
        }
    }
    store.add_many(&late);
    println!("Stored {} samples, capacity {}", store.count(), store.capacity());

    let probe = start + 12 * step + step / 2;
    println!("Linear value at +125s: {:?}", store.get_at(probe)?);

    let interval = Interval::new(start + step / 3, start + 4 * step + step / 3);
    println!("Range {}:", interval);
    for value in store.get_values(interval)? {
        println!("  {} -> {:.4}", value.time - start, value.data);
    }
    println!("Index span: {:?}", store.to_range(interval)?);

    let held = TimeSeriesStore::from_values(store.as_slice(), InterpolationMode::StepHold);
    println!("Step-hold value at +125s: {:?}", held.get_at(probe)?);

    Ok(())
}
