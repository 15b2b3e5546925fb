use proptest::prelude::*;
use std::collections::BTreeMap;

use irregular_series::{
    InterpolationMode, Interval, StoreConfig, TimeSeriesStore, Timestamp, Value,
};

// Distinct timestamps mapped to arbitrary finite data.
fn distinct_samples() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::btree_map(0u64..1_000_000, prop::num::f64::NORMAL, 0..300).prop_map(
        |map: BTreeMap<Timestamp, f64>| map.into_iter().map(|(t, d)| Value::new(t, d)).collect(),
    )
}

fn small_chunk_store() -> TimeSeriesStore {
    TimeSeriesStore::with_config(StoreConfig {
        growth_chunk: 7,
        ..StoreConfig::default()
    })
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_insertion_order_does_not_matter(
        (sorted, shuffled) in distinct_samples().prop_flat_map(|sorted| {
            let shuffled = Just(sorted.clone()).prop_shuffle();
            (Just(sorted), shuffled)
        })
    ) {
        let mut from_sorted = small_chunk_store();
        from_sorted.add_many(&sorted);

        let mut from_shuffled = small_chunk_store();
        for value in &shuffled {
            from_shuffled.add(*value);
        }

        prop_assert_eq!(from_sorted.as_slice(), sorted.as_slice());
        prop_assert_eq!(from_shuffled.as_slice(), sorted.as_slice());
        prop_assert!(from_shuffled.capacity() >= from_shuffled.count());
        prop_assert_eq!(from_shuffled.capacity() % 7, 0);
    }

    #[test]
    fn prop_exact_match_takes_precedence(samples in distinct_samples()) {
        let store = TimeSeriesStore::from_values(&samples, InterpolationMode::Linear);
        for sample in &samples {
            prop_assert_eq!(store.get_at(sample.time).unwrap(), *sample);
        }
    }

    #[test]
    fn prop_range_results_are_sorted_and_inside_interval(
        samples in distinct_samples(),
        a in 0u64..1_100_000,
        b in 0u64..1_100_000,
        step in any::<bool>(),
    ) {
        prop_assume!(!samples.is_empty());
        let mode = if step { InterpolationMode::StepHold } else { InterpolationMode::Linear };
        let store = TimeSeriesStore::from_values(&samples, mode);
        let interval = Interval::new(a.min(b), a.max(b));

        let values = store.get_values(interval).unwrap();
        for pair in values.windows(2) {
            prop_assert!(pair[0].time < pair[1].time);
        }
        for value in &values {
            prop_assert!(interval.contains(value.time));
        }

        let range = store.to_range(interval).unwrap();
        prop_assert!(range.start <= range.end);
        prop_assert!(range.end <= store.count());
    }

    #[test]
    fn prop_floor_index_is_last_at_or_before(
        samples in distinct_samples(),
        time in 0u64..1_100_000,
    ) {
        prop_assume!(!samples.is_empty());
        let store = TimeSeriesStore::from_values(&samples, InterpolationMode::Linear);
        let index = store.find_start_index(time).unwrap();
        let found = store.get(index).unwrap();

        if time >= samples[0].time {
            prop_assert!(found.time <= time);
            if let Ok(next) = store.get(index + 1) {
                prop_assert!(next.time > time);
            }
        } else {
            prop_assert_eq!(index, 0);
        }
    }
}
