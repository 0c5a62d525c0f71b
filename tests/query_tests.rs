// QueryEngine tests: validation, windows, ordering, worked example

mod common;

use bannerstats::error::StatsError;
use bannerstats::service::ClickStats;
use chrono::{Duration, Utc};
use common::stats_with_clicks;

#[test]
fn query_out_of_range_id_fails() {
    let stats = ClickStats::new(5);
    assert_eq!(
        stats.query(5, None, None),
        Err(StatsError::OutOfRange { id: 5, capacity: 5 })
    );
}

#[test]
fn query_from_after_to_is_invalid_even_with_empty_history() {
    let stats = ClickStats::new(5);
    let now = Utc::now();
    let err = stats
        .query(1, Some(now), Some(now - Duration::seconds(1)))
        .unwrap_err();
    assert!(matches!(err, StatsError::InvalidTimeRange(_)));
}

#[test]
fn query_from_in_future_without_to_is_invalid() {
    let stats = ClickStats::new(5);
    let err = stats
        .query(1, Some(Utc::now() + Duration::hours(1)), None)
        .unwrap_err();
    assert!(matches!(err, StatsError::InvalidTimeRange(_)));
}

#[test]
fn query_empty_history_returns_empty() {
    let stats = ClickStats::new(5);
    assert!(stats.query(0, None, None).unwrap().is_empty());
}

#[test]
fn query_never_clicked_banner_returns_empty() {
    let stats = stats_with_clicks(5, &[(2, 3)]);
    stats.drain_now().unwrap();
    assert!(stats.query(1, None, None).unwrap().is_empty());
}

#[test]
fn worked_example() {
    let t0 = Utc::now() - Duration::seconds(1);
    let stats = stats_with_clicks(5, &[(2, 3)]);
    let t1 = stats.drain_now().unwrap().captured_at();

    stats.increment(2).unwrap();

    let points = stats.query(2, Some(t0), Some(t1)).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].captured_at, t1);
    assert_eq!(points[0].count, 3);

    let after_t1 = t1 + Duration::nanoseconds(1);
    assert!(stats.query(2, Some(after_t1), None).unwrap().is_empty());

    std::thread::sleep(std::time::Duration::from_millis(2));
    let t2 = stats.drain_now().unwrap().captured_at();
    let points = stats.query(2, Some(after_t1), None).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].captured_at, t2);
    assert_eq!(points[0].count, 1);
}

#[test]
fn query_returns_points_in_capture_order_and_skips_other_banners() {
    let stats = ClickStats::new(4);
    stats.increment(0).unwrap();
    stats.drain_now().unwrap();
    stats.increment(3).unwrap();
    stats.drain_now().unwrap();
    stats.increment(0).unwrap();
    stats.increment(0).unwrap();
    stats.drain_now().unwrap();

    let points = stats.query(0, None, None).unwrap();
    assert_eq!(points.iter().map(|p| p.count).collect::<Vec<_>>(), vec![1, 2]);
    assert!(points[0].captured_at <= points[1].captured_at);
    assert_eq!(stats.history_len(), 3);
}

#[test]
fn query_bounds_are_inclusive() {
    let stats = stats_with_clicks(3, &[(1, 1)]);
    let t = stats.drain_now().unwrap().captured_at();
    let points = stats.query(1, Some(t), Some(t)).unwrap();
    assert_eq!(points.len(), 1);
}

#[test]
fn query_str_parses_bounds_and_rejects_garbage() {
    let stats = stats_with_clicks(3, &[(1, 2)]);
    stats.drain_now().unwrap();

    let points = stats
        .query_str(1, Some("2000-01-01T00:00:00"), Some(""))
        .unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].count, 2);

    let err = stats.query_str(1, Some("not a time"), None).unwrap_err();
    assert!(matches!(err, StatsError::InvalidTimeRange(_)));
    assert!(err.to_string().contains("from"));

    let err = stats
        .query_str(1, Some("2030-01-02T00:00:00Z"), Some("2030-01-01T00:00:00Z"))
        .unwrap_err();
    assert!(matches!(err, StatsError::InvalidTimeRange(_)));
}

#[test]
fn reset_all_empties_live_snapshot_but_keeps_history() {
    let stats = stats_with_clicks(5, &[(0, 1), (4, 2)]);
    stats.drain_now().unwrap();
    stats.increment(4).unwrap();

    stats.reset_all();
    assert!(stats.snapshot().is_empty());
    assert!(stats.drain_now().is_none());
    assert_eq!(stats.query(4, None, None).unwrap().len(), 1);
}
