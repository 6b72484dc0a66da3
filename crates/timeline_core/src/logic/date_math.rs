//! Day/pixel conversion rules for timeline layout.
//!
//! # Invariants
//! - Zoom is always clamped into `[MIN_ZOOM, MAX_ZOOM]` before use.
//! - Day counts are whole days; a same-day span has duration 1.

use crate::model::event::Event;
use chrono::{Days, NaiveDate};

/// Pixels per day at zoom `1.0`.
pub const BASE_PIXELS_PER_DAY: f32 = 40.0;
/// Most zoomed-out level.
pub const MIN_ZOOM: f32 = 0.25;
/// Most zoomed-in level.
pub const MAX_ZOOM: f32 = 4.0;
/// Zoom used when no level has been chosen yet.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Clamps a raw zoom value into the supported range.
///
/// NaN falls back to `DEFAULT_ZOOM` so the result is always usable.
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        return DEFAULT_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Horizontal density of the timeline at `zoom`.
pub fn pixels_per_day(zoom: f32) -> f32 {
    BASE_PIXELS_PER_DAY * clamp_zoom(zoom)
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Inclusive duration in days, never less than 1.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (days_between(start, end) + 1).max(1)
}

/// Offset of `date` from the left edge of a timeline starting at `min_date`.
pub fn x_position(date: NaiveDate, min_date: NaiveDate, zoom: f32) -> f32 {
    days_between(min_date, date) as f32 * pixels_per_day(zoom)
}

/// Rendered width of an event spanning `start..=end`.
pub fn width(start: NaiveDate, end: NaiveDate, zoom: f32) -> f32 {
    duration_days(start, end) as f32 * pixels_per_day(zoom)
}

/// Total width of a timeline covering `min_date..=max_date`.
pub fn timeline_width(min_date: NaiveDate, max_date: NaiveDate, zoom: f32) -> f32 {
    (days_between(min_date, max_date) + 1) as f32 * pixels_per_day(zoom)
}

/// Calendar-aware day addition.
///
/// Returns `None` when the result leaves chrono's representable range.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Earliest start date across `events`.
pub fn min_start_date(events: &[Event]) -> Option<NaiveDate> {
    events.iter().map(|event| event.start_date).min()
}

/// Latest end date across `events`.
pub fn max_end_date(events: &[Event]) -> Option<NaiveDate> {
    events.iter().map(|event| event.end_date).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn pixels_per_day_clamps_zoom() {
        assert_eq!(pixels_per_day(1.0), 40.0);
        assert_eq!(pixels_per_day(2.0), 80.0);
        assert_eq!(pixels_per_day(0.01), 10.0);
        assert_eq!(pixels_per_day(100.0), 160.0);
        assert_eq!(pixels_per_day(f32::NAN), 40.0);
        assert_eq!(pixels_per_day(f32::INFINITY), 160.0);
    }

    #[test]
    fn days_between_is_signed() {
        let a = date(2026, 1, 30);
        let b = date(2026, 2, 2);
        assert_eq!(days_between(a, b), 3);
        assert_eq!(days_between(b, a), -3);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn duration_counts_both_ends() {
        let a = date(2026, 5, 1);
        assert_eq!(duration_days(a, a), 1);
        assert_eq!(duration_days(a, date(2026, 5, 3)), 3);
        // Reversed spans still get a visible width.
        assert_eq!(duration_days(date(2026, 5, 3), a), 1);
    }

    #[test]
    fn x_position_and_width_scale_with_zoom() {
        let min = date(2026, 1, 1);
        let start = date(2026, 1, 4);
        let end = date(2026, 1, 5);
        assert_eq!(x_position(start, min, 1.0), 120.0);
        assert_eq!(x_position(start, min, 0.5), 60.0);
        assert_eq!(x_position(min, min, 3.3), 0.0);
        assert_eq!(width(start, end, 1.0), 80.0);
        assert_eq!(width(start, end, 4.0), 320.0);
    }

    #[test]
    fn timeline_width_includes_last_day() {
        let min = date(2026, 1, 1);
        assert_eq!(timeline_width(min, min, 1.0), 40.0);
        assert_eq!(timeline_width(min, date(2026, 1, 10), 1.0), 400.0);
    }

    #[test]
    fn shift_days_crosses_month_and_leap_boundaries() {
        assert_eq!(shift_days(date(2024, 2, 28), 1), Some(date(2024, 2, 29)));
        assert_eq!(shift_days(date(2025, 2, 28), 1), Some(date(2025, 3, 1)));
        assert_eq!(shift_days(date(2026, 1, 1), -1), Some(date(2025, 12, 31)));
        assert_eq!(shift_days(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn min_and_max_dates_cover_all_events() {
        let events = vec![
            Event::new(1, "a", date(2026, 3, 5), date(2026, 3, 9)).unwrap(),
            Event::new(2, "b", date(2026, 3, 1), date(2026, 3, 2)).unwrap(),
            Event::new(3, "c", date(2026, 3, 7), date(2026, 3, 20)).unwrap(),
        ];
        assert_eq!(min_start_date(&events), Some(date(2026, 3, 1)));
        assert_eq!(max_end_date(&events), Some(date(2026, 3, 20)));
        assert_eq!(min_start_date(&[]), None);
        assert_eq!(max_end_date(&[]), None);
    }
}
