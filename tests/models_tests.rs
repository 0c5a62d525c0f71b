// Model serialization tests: wire field names

use bannerstats::models::*;
use chrono::{TimeZone, Utc};

#[test]
fn counter_serializes_camel_case() {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let mut c = Counter::seeded(3, now);
    c.increment(now);
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["name"], "Banner 3");
    assert_eq!(json["count"], 1);
    assert_eq!(json["lastUpdated"], "2024-01-02T03:04:05Z");
}

#[test]
fn banner_stat_uses_short_keys() {
    let stat = BannerStat {
        ts: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        name: "Banner 0".into(),
        v: 9,
    };
    let json = serde_json::to_value(StatsResponse { stats: vec![stat] }).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "stats": [{ "ts": "2024-01-02T03:04:05Z", "name": "Banner 0", "v": 9 }] })
    );
}

#[test]
fn stats_request_fields_are_optional() {
    let req: StatsRequest = serde_json::from_str("{}").unwrap();
    assert!(req.from.is_none() && req.to.is_none());

    let req: StatsRequest = serde_json::from_str(r#"{"to":"2024-01-01T00:00:00"}"#).unwrap();
    assert_eq!(req.to.as_deref(), Some("2024-01-01T00:00:00"));
}

#[test]
fn snapshot_serializes_entries_by_id() {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let mut c = Counter::seeded(4, at);
    c.increment(at);
    c.increment(at);
    let snap = Snapshot::from_counters(at, [c]);
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["capturedAt"], "2024-01-02T03:04:05Z");
    assert_eq!(json["entries"]["4"]["count"], 2);
}
