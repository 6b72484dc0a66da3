//! Initial event sets for a session.
//!
//! # Responsibility
//! - Provide a built-in sample timeline.
//! - Parse externally supplied seed JSON into validated events.
//!
//! # Invariants
//! - Parsed seeds never contain duplicate ids or invalid records.

use crate::model::event::{Event, EventId};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Seed loading failures.
#[derive(Debug)]
pub enum SeedError {
    /// Malformed JSON or a record that fails validation.
    Parse(serde_json::Error),
    DuplicateId(EventId),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid seed data: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate event id in seed: {id}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Parses a JSON array of `{ id, name, start_date, end_date }` records.
///
/// Dates use ISO `YYYY-MM-DD`.
pub fn parse_events_json(input: &str) -> Result<Vec<Event>, SeedError> {
    let events: Vec<Event> = serde_json::from_str(input)?;
    let mut seen = HashSet::with_capacity(events.len());
    for event in &events {
        if !seen.insert(event.id) {
            return Err(SeedError::DuplicateId(event.id));
        }
    }
    Ok(events)
}

const SAMPLE_EVENTS: &[(EventId, &str, (i32, u32, u32), (i32, u32, u32))] = &[
    (1, "Kickoff workshop", (2026, 1, 5), (2026, 1, 7)),
    (2, "Draft requirements", (2026, 1, 6), (2026, 1, 16)),
    (3, "Vendor review", (2026, 1, 9), (2026, 1, 9)),
    (4, "Architecture spike", (2026, 1, 12), (2026, 1, 23)),
    (5, "Hiring loop", (2026, 1, 14), (2026, 1, 30)),
    (6, "Design sign-off", (2026, 1, 19), (2026, 1, 19)),
    (7, "Prototype build", (2026, 1, 26), (2026, 2, 13)),
    (8, "Budget planning", (2026, 2, 2), (2026, 2, 6)),
    (9, "Usability study", (2026, 2, 16), (2026, 2, 20)),
    (10, "Beta launch", (2026, 2, 23), (2026, 2, 23)),
    (11, "Retrospective", (2026, 2, 25), (2026, 2, 26)),
];

/// Built-in sample timeline spanning two months.
pub fn sample_events() -> Vec<Event> {
    SAMPLE_EVENTS
        .iter()
        .filter_map(|&(id, name, start, end)| {
            let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2)?;
            let end = NaiveDate::from_ymd_opt(end.0, end.1, end.2)?;
            Event::new(id, name, start, end).ok()
        })
        .collect()
}
