//! Greedy lane assignment (first-fit interval coloring).
//!
//! # Invariants
//! - Events are visited by ascending `start_date`; ties keep input order.
//! - Within a lane, each event ends strictly before the next one starts.
//!   Sharing a boundary day is a conflict.
//! - Lanes are opened in order and an event always lands in the first lane
//!   that fits, so the lane count equals the maximum number of events
//!   covering any single day.

use crate::model::event::Event;

/// One lane: events in ascending start order, borrowed from the input.
pub type Lane<'a> = Vec<&'a Event>;

/// Partitions `events` into the minimum number of non-overlapping lanes.
pub fn assign_lanes(events: &[Event]) -> Vec<Lane<'_>> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    // `sort_by_key` is stable.
    sorted.sort_by_key(|event| event.start_date);

    let mut lanes: Vec<Lane<'_>> = Vec::new();
    for event in sorted {
        let open_lane = lanes.iter_mut().find(|lane| {
            lane.last()
                .is_some_and(|last| last.end_date < event.start_date)
        });
        match open_lane {
            Some(lane) => lane.push(event),
            None => lanes.push(vec![event]),
        }
    }
    lanes
}
