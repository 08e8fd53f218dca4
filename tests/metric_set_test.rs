//! Metric set behaviour against an in-memory store.

mod common;

use common::{number, test_clock, tick, TestSetBuilder};
use integration_metrics::metrics::{MetricValue, RawValue, SourceType};
use integration_metrics::storage::{InMemoryStore, PersistentStore, SharedStore};
use integration_metrics::IntegrationError;

fn memory_store() -> SharedStore {
    SharedStore::new(InMemoryStore::new())
}

#[test]
fn test_gauge_round_trips_coerced_input() {
    let clock = test_clock();
    let mut ms = TestSetBuilder::new(&clock).build();

    let inputs: Vec<(RawValue, f64)> = vec![
        (RawValue::Int(-42), -42.0),
        (RawValue::Float(3.25), 3.25),
        (RawValue::Float(1e300), 1e300),
        (RawValue::Bool(true), 1.0),
        (RawValue::Bool(false), 0.0),
    ];

    for (input, expected) in inputs {
        ms.set_metric("g", input, SourceType::Gauge).unwrap();
        assert_eq!(number(&ms, "g"), expected);
    }
}

#[test]
fn test_first_observation_is_zero() {
    for source_type in [SourceType::Rate, SourceType::PRate, SourceType::Delta, SourceType::PDelta] {
        let clock = test_clock();
        let mut ms = TestSetBuilder::new(&clock).store(&memory_store()).build();

        ms.set_metric("m", 9.9e12, source_type).unwrap();
        assert_eq!(number(&ms, "m"), 0.0, "{source_type}");
    }
}

#[test]
fn test_rates_and_deltas() {
    let cases = [
        (SourceType::Delta, 5.0, 2.0, -3.0),
        (SourceType::Delta, 2.0, 5.0, 3.0),
        (SourceType::PDelta, 1.0, 5.0, 4.0),
        (SourceType::Rate, 2.0, 4.0, 2.0),
        (SourceType::Rate, 4.0, 2.0, -2.0),
        (SourceType::PRate, 2.0, 4.0, 2.0),
    ];

    for (source_type, first, second, expected) in cases {
        let clock = test_clock();
        let mut ms = TestSetBuilder::new(&clock)
            .attr("k", "v")
            .store(&memory_store())
            .build();

        ms.set_metric("d", first, source_type).unwrap();
        tick(&clock, 1);
        ms.set_metric("d", second, source_type).unwrap();

        assert_eq!(number(&ms, "d"), expected, "{source_type} {first} -> {second}");
    }
}

#[test]
fn test_rate_divides_by_elapsed_seconds() {
    let clock = test_clock();
    let mut ms = TestSetBuilder::new(&clock).store(&memory_store()).build();

    ms.set_metric("r", 100, SourceType::Rate).unwrap();
    tick(&clock, 4);
    ms.set_metric("r", 110, SourceType::Rate).unwrap();
    assert_eq!(number(&ms, "r"), 2.5);
}

#[test]
fn test_unsigned_counters() {
    let clock = test_clock();
    let mut ms = TestSetBuilder::new(&clock).store(&memory_store()).build();
    let bytes: u64 = 10_000_000_000;
    let packets: usize = 7;

    ms.set_metric("bytes", bytes, SourceType::PRate).unwrap();
    ms.set_metric("packets", packets, SourceType::PDelta).unwrap();
    tick(&clock, 2);
    ms.set_metric("bytes", bytes + 500, SourceType::PRate).unwrap();
    ms.set_metric("packets", packets + 3, SourceType::PDelta).unwrap();

    assert_eq!(number(&ms, "bytes"), 250.0);
    assert_eq!(number(&ms, "packets"), 3.0);
}

#[test]
fn test_positive_kinds_reject_decrease() {
    for source_type in [SourceType::PDelta, SourceType::PRate] {
        let clock = test_clock();
        let mut ms = TestSetBuilder::new(&clock)
            .attr("k", "v")
            .store(&memory_store())
            .build();

        ms.set_metric("d", 5, source_type).unwrap();
        tick(&clock, 1);
        let err = ms.set_metric("d", 2, source_type).unwrap_err();

        assert!(
            matches!(err, IntegrationError::CounterReset { previous, current, .. } if previous == 5.0 && current == 2.0),
            "{source_type}: {err}"
        );
        assert_eq!(number(&ms, "d"), 0.0);
    }
}

#[test]
fn test_no_store_configured() {
    let clock = test_clock();
    let mut ms = TestSetBuilder::new(&clock).build();

    for source_type in [SourceType::Rate, SourceType::Delta, SourceType::PRate, SourceType::PDelta] {
        let err = ms.set_metric("foo", 1, source_type).unwrap_err();
        assert!(matches!(err, IntegrationError::NoStoreConfigured { .. }), "{source_type}");
    }
    assert!(ms.metric("foo").is_none());
}

#[test]
fn test_incorrect_metric_type() {
    let clock = test_clock();
    let mut ms = TestSetBuilder::new(&clock).store(&memory_store()).build();
    ms.set_metric("foo", 7, SourceType::Gauge).unwrap();

    for source_type in [SourceType::Rate, SourceType::Delta, SourceType::Gauge] {
        let err = ms.set_metric("foo", "bar", source_type).unwrap_err();
        assert!(matches!(err, IntegrationError::TypeMismatch { .. }), "{source_type}");
    }

    let err = ms.set_metric("foo", 1, SourceType::Attribute).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type mismatch for metric foo: ATTRIBUTE requires a string value"
    );

    assert_eq!(ms.metric("foo"), Some(&MetricValue::Number(7.0)));
    assert!(ms.store().unwrap().lock().is_empty());
}

#[test]
fn test_unknown_source_type_from_code() {
    let err = SourceType::try_from(666).unwrap_err();
    assert!(matches!(err, IntegrationError::UnknownSourceType(_)));
}

#[test]
fn test_sets_differing_in_attribute_do_not_share_baseline() {
    let clock = test_clock();
    let store = memory_store();
    let mut pod_a = TestSetBuilder::new(&clock).attr("pod", "a").store(&store).build();
    let mut pod_b = TestSetBuilder::new(&clock).attr("pod", "b").store(&store).build();

    pod_a.set_metric("field", 10, SourceType::Delta).unwrap();
    tick(&clock, 1);
    pod_b.set_metric("field", 1000, SourceType::Delta).unwrap();
    assert_eq!(number(&pod_b, "field"), 0.0);

    tick(&clock, 1);
    pod_a.set_metric("field", 15, SourceType::Delta).unwrap();
    assert_eq!(number(&pod_a, "field"), 5.0);
}

#[test]
fn test_separator_in_attribute_value_does_not_share_baseline() {
    let clock = test_clock();
    let store = memory_store();
    let mut joined = TestSetBuilder::new(&clock).attr("a", "x::b==y").store(&store).build();
    let mut split = TestSetBuilder::new(&clock)
        .attr("a", "x")
        .attr("b", "y")
        .store(&store)
        .build();

    joined.set_metric("f", 100, SourceType::Delta).unwrap();
    tick(&clock, 1);
    split.set_metric("f", 1, SourceType::Delta).unwrap();

    assert_eq!(number(&split, "f"), 0.0);
    assert_ne!(joined.namespace("f"), split.namespace("f"));
    assert_eq!(store.lock().len(), 2);
}

#[test]
fn test_attribute_order_shares_baseline() {
    let clock = test_clock();
    let store = memory_store();
    let mut first = TestSetBuilder::new(&clock)
        .attr("node", "n1")
        .attr("pod", "p1")
        .store(&store)
        .build();
    let mut second = TestSetBuilder::new(&clock)
        .attr("pod", "p1")
        .attr("node", "n1")
        .store(&store)
        .build();

    first.set_metric("field", 1, SourceType::Delta).unwrap();
    tick(&clock, 1);
    second.set_metric("field", 4, SourceType::Delta).unwrap();
    assert_eq!(number(&second, "field"), 3.0);
    assert_eq!(first.namespace("field"), "node==n1::pod==p1::field");
}

#[test]
fn test_shared_store_across_threads() {
    let clock = test_clock();
    let store = memory_store();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut ms = TestSetBuilder::new(&clock)
                .attr("worker", &i.to_string())
                .store(&store)
                .build();
            std::thread::spawn(move || {
                ms.set_metric("ops", 10, SourceType::Delta).unwrap();
                ms
            })
        })
        .collect();

    for handle in handles {
        let ms = handle.join().unwrap();
        assert_eq!(number(&ms, "ops"), 0.0);
    }
    assert_eq!(store.lock().len(), 4);
}
