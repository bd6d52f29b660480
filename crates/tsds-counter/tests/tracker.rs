#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tsds_counter::counter::validate::{counter_delta, gap_limit, COUNTER32_MAX};
use tsds_counter::{FailureKind, RateError, RateTracker, Sample, SeriesConfig};

fn cfg() -> SeriesConfig {
    SeriesConfig::with_interval(60)
}

#[test]
fn unknown_key_fails_until_baseline() {
    let tracker = RateTracker::new();

    let err = tracker.compute_rate("if0", Sample::new(1010, 200.0)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::UnknownKey);
    assert!(err.is_contract_violation());
    assert!(!tracker.contains("if0"), "unknown key must not be created");

    tracker.record_baseline("if0", cfg(), Sample::new(1000, 100.0));
    let rate = tracker.compute_rate("if0", Sample::new(1010, 200.0)).unwrap();
    assert_eq!(rate, 10.0);
}

#[test]
fn rejected_gap_still_advances_baseline() {
    let tracker = RateTracker::new();
    tracker.record_baseline("if0", cfg(), Sample::new(0, 0.0));

    let err = tracker.compute_rate("if0", Sample::new(400, 1000.0)).unwrap_err();
    assert_eq!(
        err,
        RateError::GapTooLarge {
            gap: 400,
            limit: 360
        }
    );

    // Next delta is taken against the rejected sample.
    let rate = tracker.compute_rate("if0", Sample::new(460, 1600.0)).unwrap();
    assert_eq!(rate, 10.0);
}

#[test]
fn nan_is_rejected_and_becomes_baseline() {
    let tracker = RateTracker::new();
    tracker.record_baseline("if0", cfg(), Sample::new(0, 10.0));

    let err = tracker.compute_rate("if0", Sample::new(10, f64::NAN)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidValue);
    assert!(tracker.snapshot("if0").unwrap().last.value.is_nan());

    // Previous value is NaN now, so the following sample is rejected too.
    let err = tracker.compute_rate("if0", Sample::new(20, 30.0)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidValue);

    let rate = tracker.compute_rate("if0", Sample::new(30, 130.0)).unwrap();
    assert_eq!(rate, 10.0);
}

#[test]
fn out_of_range_still_advances_baseline() {
    let tracker = RateTracker::new();
    tracker.record_baseline("if0", SeriesConfig::new(60, 0.0, 100.0), Sample::new(0, 0.0));

    let err = tracker.compute_rate("if0", Sample::new(10, 1500.0)).unwrap_err();
    match err {
        RateError::RateOutOfRange { rate, min, max } => {
            assert_eq!(rate, 150.0);
            assert_eq!(min, 0.0);
            assert_eq!(max, 100.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let stored = tracker.snapshot("if0").unwrap();
    assert_eq!(stored.last, Sample::new(10, 1500.0));
    assert_eq!(tracker.compute_rate("if0", Sample::new(20, 1600.0)).unwrap(), 10.0);
}

#[test]
fn non_positive_gap_still_advances_baseline() {
    let tracker = RateTracker::new();
    tracker.record_baseline("if0", cfg(), Sample::new(100, 0.0));

    let err = tracker.compute_rate("if0", Sample::new(100, 50.0)).unwrap_err();
    assert_eq!(err, RateError::NonPositiveGap { gap: 0 });
    assert_eq!(tracker.snapshot("if0").unwrap().last, Sample::new(100, 50.0));
}

#[test]
fn record_baseline_overwrites_without_merging() {
    let tracker = RateTracker::new();
    tracker.record_baseline("if0", SeriesConfig::new(60, 0.0, 100.0), Sample::new(0, 5.0));
    tracker.record_baseline("if0", SeriesConfig::new(30, 1.0, 50.0), Sample::new(7, 9.0));

    let stored = tracker.snapshot("if0").unwrap();
    assert_eq!(stored.config, SeriesConfig::new(30, 1.0, 50.0));
    assert_eq!(stored.last, Sample::new(7, 9.0));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn keys_are_independent() {
    let tracker = RateTracker::new();
    tracker.record_baseline("a", cfg(), Sample::new(0, 0.0));
    tracker.record_baseline("b", cfg(), Sample::new(0, 1000.0));

    assert_eq!(tracker.compute_rate("a", Sample::new(10, 100.0)).unwrap(), 10.0);
    assert_eq!(tracker.compute_rate("b", Sample::new(10, 3000.0)).unwrap(), 200.0);
    assert_eq!(tracker.snapshot("a").unwrap().last.value, 100.0);
}

#[test]
fn wrap_width_is_chosen_by_previous_value() {
    assert_eq!(counter_delta(4_294_967_290.0, 5.0), 10.0);
    assert_eq!(counter_delta(COUNTER32_MAX, 0.0), 0.0);
    assert_eq!(counter_delta(10.0, 25.0), 15.0);

    let big = 4_294_967_396.0;
    assert_eq!(counter_delta(big, 50.0), u64::MAX as f64 - big + 50.0);
}

#[test]
fn gap_limit_is_six_intervals() {
    assert_eq!(gap_limit(60), 360);
    assert_eq!(gap_limit(10), 60);
}

#[test]
fn empty_tracker() {
    let tracker = RateTracker::default();
    assert!(tracker.is_empty());
    assert!(tracker.snapshot("missing").is_none());
}

#[test]
fn infinite_readings_are_rejected_and_become_baseline() {
    let tracker = RateTracker::new();
    tracker.record_baseline("if0", cfg(), Sample::new(0, f64::INFINITY));

    let err = tracker.compute_rate("if0", Sample::new(10, f64::INFINITY)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidValue);
    assert_eq!(tracker.snapshot("if0").unwrap().last, Sample::new(10, f64::INFINITY));

    // The stored infinity still poisons the next delta.
    let err = tracker.compute_rate("if0", Sample::new(20, 100.0)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidValue);

    let rate = tracker.compute_rate("if0", Sample::new(30, 200.0)).unwrap();
    assert_eq!(rate, 10.0);
}

#[test]
fn unbounded_max_rate_still_rejects_infinity() {
    let tracker = RateTracker::new();
    let config = SeriesConfig::new(60, 0.0, f64::INFINITY);
    tracker.record_baseline("if0", config, Sample::new(0, 0.0));

    let err = tracker.compute_rate("if0", Sample::new(10, f64::INFINITY)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidValue);
}

#[test]
fn observe_baselines_unknown_key_then_rates() {
    let tracker = RateTracker::new();

    let first = tracker.observe("if0", cfg(), Sample::new(1000, 100.0)).unwrap();
    assert_eq!(first, None);
    assert!(tracker.contains("if0"));

    let second = tracker.observe("if0", cfg(), Sample::new(1010, 200.0)).unwrap();
    assert_eq!(second, Some(10.0));

    let err = tracker.observe("if0", cfg(), Sample::new(1010, 300.0)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::NonPositiveGap);
    assert_eq!(tracker.snapshot("if0").unwrap().last, Sample::new(1010, 300.0));
}

#[test]
fn observe_keeps_stored_config_for_known_key() {
    let tracker = RateTracker::new();
    tracker.record_baseline("if0", SeriesConfig::new(60, 0.0, 5.0), Sample::new(0, 0.0));

    // The config passed here only applies to a first baseline.
    let err = tracker
        .observe("if0", SeriesConfig::new(60, 0.0, 1e15), Sample::new(10, 100.0))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::RateOutOfRange);
}
