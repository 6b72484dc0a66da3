//! Overlap detection between events.
//!
//! Ranges are compared as open intervals: one event ending on the day another
//! starts is not a collision.

use crate::model::event::Event;

/// Returns whether `a` and `b` intersect on an open interval.
pub fn overlaps(a: &Event, b: &Event) -> bool {
    a.start_date < b.end_date && b.start_date < a.end_date
}

/// Collects every event in `others` that collides with `candidate`.
///
/// Entries sharing `candidate.id` are skipped. Input order is preserved.
pub fn find_conflicts<'a>(candidate: &Event, others: &'a [Event]) -> Vec<&'a Event> {
    others
        .iter()
        .filter(|other| other.id != candidate.id && overlaps(candidate, other))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{find_conflicts, overlaps};
    use crate::model::event::Event;
    use chrono::NaiveDate;

    fn event(id: i64, start: u32, end: u32) -> Event {
        let day = |d| NaiveDate::from_ymd_opt(2026, 6, d).expect("valid day");
        Event::new(id, format!("event-{id}"), day(start), day(end)).expect("valid event")
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = event(1, 1, 5);
        let b = event(2, 4, 8);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn touching_boundaries_do_not_overlap() {
        let a = event(1, 1, 5);
        let b = event(2, 5, 8);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn containment_overlaps() {
        assert!(overlaps(&event(1, 1, 10), &event(2, 3, 4)));
    }

    #[test]
    fn find_conflicts_skips_self_and_keeps_order() {
        let candidate = event(2, 3, 6);
        let others = vec![
            event(9, 5, 9),
            event(2, 1, 10),
            event(4, 6, 7),
            event(1, 1, 4),
        ];
        let conflicts: Vec<i64> = find_conflicts(&candidate, &others)
            .into_iter()
            .map(|event| event.id)
            .collect();
        assert_eq!(conflicts, vec![9, 1]);
    }

    #[test]
    fn find_conflicts_on_empty_set_is_empty() {
        assert!(find_conflicts(&event(1, 1, 2), &[]).is_empty());
    }
}
