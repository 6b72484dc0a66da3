//! Derived timeline layout.
//!
//! # Responsibility
//! - Combine lane assignment with day/pixel math into a renderable view.
//!
//! # Invariants
//! - Output is recomputed from scratch on every call and holds no state.
//! - An empty event set yields no lanes, no dates and zero width.

use crate::logic::date_math::{max_end_date, min_start_date, timeline_width, width, x_position};
use crate::logic::lanes::assign_lanes;
use crate::logic::zoom::ZoomLevel;
use crate::model::event::Event;
use chrono::NaiveDate;
use serde::Serialize;

/// Event with its horizontal placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent {
    pub event: Event,
    /// Left edge, relative to the timeline's first day.
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneWithEvents {
    pub lane_index: usize,
    pub events: Vec<PlacedEvent>,
}

/// Everything the rendering layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedTimelineData {
    pub lanes: Vec<LaneWithEvents>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub total_width: f32,
    pub zoom_level: f32,
}

impl ProcessedTimelineData {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }
}

/// Lays out `events` at `zoom`.
///
/// Accepts a `ZoomLevel` or a raw `f32`, which is clamped.
pub fn process_events(events: &[Event], zoom: impl Into<ZoomLevel>) -> ProcessedTimelineData {
    let zoom_level = zoom.into().value();
    let (Some(min_date), Some(max_date)) = (min_start_date(events), max_end_date(events)) else {
        return ProcessedTimelineData {
            lanes: Vec::new(),
            min_date: None,
            max_date: None,
            total_width: 0.0,
            zoom_level,
        };
    };

    let lanes = assign_lanes(events)
        .into_iter()
        .enumerate()
        .map(|(lane_index, lane)| LaneWithEvents {
            lane_index,
            events: lane
                .into_iter()
                .map(|event| PlacedEvent {
                    x: x_position(event.start_date, min_date, zoom_level),
                    width: width(event.start_date, event.end_date, zoom_level),
                    event: event.clone(),
                })
                .collect(),
        })
        .collect();

    ProcessedTimelineData {
        lanes,
        min_date: Some(min_date),
        max_date: Some(max_date),
        total_width: timeline_width(min_date, max_date, zoom_level),
        zoom_level,
    }
}

#[cfg(test)]
mod tests {
    use super::process_events;
    use crate::logic::zoom::ZoomLevel;
    use crate::model::event::Event;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).expect("valid day")
    }

    #[test]
    fn empty_events_produce_empty_layout() {
        let data = process_events(&[], 2.0);
        assert!(data.lanes.is_empty());
        assert_eq!(data.min_date, None);
        assert_eq!(data.max_date, None);
        assert_eq!(data.total_width, 0.0);
        assert_eq!(data.zoom_level, 2.0);
    }

    #[test]
    fn layout_places_events_in_lanes() {
        let events = vec![
            Event::new(1, "A", day(1), day(3)).unwrap(),
            Event::new(2, "B", day(2), day(4)).unwrap(),
            Event::new(3, "C", day(5), day(6)).unwrap(),
        ];
        let data = process_events(&events, 1.0);

        assert_eq!(data.lane_count(), 2);
        assert_eq!(data.min_date, Some(day(1)));
        assert_eq!(data.max_date, Some(day(6)));
        assert_eq!(data.total_width, 240.0);

        let lane0 = &data.lanes[0];
        assert_eq!(lane0.lane_index, 0);
        assert_eq!(lane0.events[0].event.id, 1);
        assert_eq!(lane0.events[0].x, 0.0);
        assert_eq!(lane0.events[0].width, 120.0);
        assert_eq!(lane0.events[1].event.id, 3);
        assert_eq!(lane0.events[1].x, 160.0);
        assert_eq!(lane0.events[1].width, 80.0);

        let lane1 = &data.lanes[1];
        assert_eq!(lane1.lane_index, 1);
        assert_eq!(lane1.events[0].event.id, 2);
        assert_eq!(lane1.events[0].x, 40.0);
    }

    #[test]
    fn zoom_level_steps_widen_layout() {
        let events = vec![Event::new(1, "A", day(1), day(2)).unwrap()];
        let mut zoom = ZoomLevel::default();
        zoom.zoom_in();
        let data = process_events(&events, zoom);
        assert_eq!(data.zoom_level, 1.5);
        assert_eq!(data.total_width, 120.0);
        assert_eq!(data.lanes[0].events[0].width, 120.0);
    }

    #[test]
    fn zoom_is_clamped_in_output() {
        let events = vec![Event::new(1, "A", day(1), day(1)).unwrap()];
        let data = process_events(&events, 9.0);
        assert_eq!(data.zoom_level, 4.0);
        assert_eq!(data.total_width, 160.0);
    }
}
