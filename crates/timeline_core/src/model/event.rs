//! Event domain model.
//!
//! # Responsibility
//! - Define the date-ranged record placed on the timeline.
//! - Normalize and validate names and date ranges at construction time.
//!
//! # Invariants
//! - `id` is supplied externally and never reused within a session.
//! - `name` is non-empty after trimming.
//! - `start_date <= end_date`; same-day events are valid.
//! - Events are replaced as whole records, never patched field by field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-assigned event identifier.
pub type EventId = i64;

/// Validation failures for event records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Name is empty or whitespace only.
    EmptyName,
    /// End date falls before start date.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "event name cannot be empty"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "end_date ({end}) must be >= start_date ({start})")
            }
        }
    }
}

impl Error for EventValidationError {}

/// A named, inclusive, whole-day date range on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// First day covered by the event.
    pub start_date: NaiveDate,
    /// Last day covered by the event (inclusive).
    pub end_date: NaiveDate,
}

/// Unvalidated wire shape; deserialization funnels through `Event::new`.
#[derive(Deserialize)]
struct EventRecord {
    id: EventId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<EventRecord> for Event {
    type Error = EventValidationError;

    fn try_from(value: EventRecord) -> Result<Self, Self::Error> {
        Event::new(value.id, value.name, value.start_date, value.end_date)
    }
}

impl Event {
    /// Creates a validated event.
    ///
    /// The name is trimmed before validation.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed name is empty.
    /// - `InvalidDateRange` when `end < start`.
    pub fn new(
        id: EventId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id,
            name: normalize_name(name.into()),
            start_date,
            end_date,
        };
        event.validate()?;
        Ok(event)
    }

    /// Checks record invariants.
    ///
    /// Fields are public, so callers building or editing a record by hand
    /// must run this before handing it to the store.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.name.trim().is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        if self.end_date < self.start_date {
            return Err(EventValidationError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Re-runs construction rules on a possibly hand-edited record.
    ///
    /// Trims the name and validates, like `Event::new`.
    pub fn normalized(self) -> Result<Self, EventValidationError> {
        Self::new(self.id, self.name, self.start_date, self.end_date)
    }

    /// Returns a copy of this event covering a different date range.
    ///
    /// Does not validate; callers decide how to report reversed ranges.
    pub fn with_dates(&self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            ..self.clone()
        }
    }
}

fn normalize_name(name: String) -> String {
    let trimmed = name.trim();
    if trimmed.len() == name.len() {
        name
    } else {
        trimmed.to_string()
    }
}
