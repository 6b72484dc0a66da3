use chrono::NaiveDate;
use timeline_core::{Event, EventValidationError};

#[test]
fn event_serialization_uses_expected_wire_fields() {
    let event = Event::new(
        12,
        "Quarterly review",
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 11, 4).unwrap(),
    )
    .unwrap();

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["id"], 12);
    assert_eq!(json["name"], "Quarterly review");
    assert_eq!(json["start_date"], "2026-11-02");
    assert_eq!(json["end_date"], "2026-11-04");

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn deserialize_rejects_blank_name() {
    let value = serde_json::json!({
        "id": 1,
        "name": "  ",
        "start_date": "2026-01-01",
        "end_date": "2026-01-01"
    });
    let err = serde_json::from_value::<Event>(value).unwrap_err();
    assert!(
        err.to_string().contains("event name cannot be empty"),
        "unexpected error: {err}"
    );
}

#[test]
fn new_reports_reversed_window() {
    let start = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
    assert_eq!(
        Event::new(1, "x", start, end).unwrap_err(),
        EventValidationError::InvalidDateRange { start, end }
    );
}
