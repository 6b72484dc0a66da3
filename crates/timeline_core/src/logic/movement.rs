//! Drag-to-move evaluation.
//!
//! # Responsibility
//! - Translate a horizontal pixel offset into a whole-day shift.
//! - Validate the shifted event before anyone persists it.
//!
//! # Invariants
//! - Offsets under one pixel or under half a day are no-ops.
//! - Start and end always shift by the same number of calendar days.
//! - A shifted event may not overlap any other event.
//! - Evaluation performs no I/O and never touches the store.

use crate::logic::collision::find_conflicts;
use crate::logic::date_math::{pixels_per_day, shift_days};
use crate::model::event::{Event, EventId};
use chrono::{Datelike, Local, NaiveDate};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Offsets smaller than this (in pixels) are ignored.
pub const MIN_PIXEL_OFFSET: f32 = 1.0;
/// Day fraction a drag must reach before it commits.
pub const HALF_DAY_THRESHOLD: f32 = 0.5;
/// Moves may not place the start more than this many years from today.
pub const MAX_YEAR_DISTANCE: i32 = 10;

/// Identity of an event that blocked a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingEvent {
    pub id: EventId,
    pub name: String,
}

impl From<&Event> for ConflictingEvent {
    fn from(value: &Event) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
        }
    }
}

/// Reasons a move is rejected. The original event is always left intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Shifted start falls after shifted end.
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// Shifted start year is too far from the current year.
    OutOfBounds { start_year: i32, current_year: i32 },
    /// Shift leaves the representable calendar.
    DateOverflow { days: i64 },
    /// Shifted range overlaps other events.
    Conflict(Vec<ConflictingEvent>),
}

impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid date range after move: {start} is after {end}")
            }
            Self::OutOfBounds {
                start_year,
                current_year,
            } => write!(
                f,
                "cannot move event to {start_year}; allowed range is {} to {}",
                current_year - MAX_YEAR_DISTANCE,
                current_year + MAX_YEAR_DISTANCE
            ),
            Self::DateOverflow { days } => {
                write!(f, "cannot shift event by {days} days: date out of range")
            }
            Self::Conflict(conflicts) => {
                let names = conflicts
                    .iter()
                    .map(|conflict| conflict.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "event conflicts with: {names}")
            }
        }
    }
}

impl Error for MoveError {}

/// Converts a pixel offset into a committed whole-day delta.
///
/// Returns `0` for offsets below one pixel or below half a day at `zoom`.
/// Otherwise rounds half away from zero.
pub fn day_delta(pixel_offset: f32, zoom: f32) -> i64 {
    if !pixel_offset.is_finite() || pixel_offset.abs() < MIN_PIXEL_OFFSET {
        return 0;
    }
    let days = pixel_offset / pixels_per_day(zoom);
    if days.abs() < HALF_DAY_THRESHOLD {
        return 0;
    }
    days.round() as i64
}

/// Start date shown while a drag is in flight.
///
/// Unlike [`evaluate`], no thresholds apply: the preview follows plain
/// rounding so it tracks the pointer.
pub fn preview_start_date(event: &Event, pixel_offset: f32, zoom: f32) -> Option<NaiveDate> {
    if !pixel_offset.is_finite() {
        return Some(event.start_date);
    }
    let days = (pixel_offset / pixels_per_day(zoom)).round() as i64;
    shift_days(event.start_date, days)
}

/// Evaluates a move against the current local year.
pub fn evaluate(
    event: &Event,
    pixel_offset: f32,
    zoom: f32,
    others: &[Event],
) -> Result<Event, MoveError> {
    evaluate_at(event, pixel_offset, zoom, others, Local::now().year())
}

/// Evaluates a move of `event` by `pixel_offset` at `zoom`.
///
/// `others` may include `event` itself; entries with the same id are
/// ignored during collision checks. On success the shifted event is
/// returned and the caller decides whether to persist it.
///
/// # Errors
/// - `InvalidRange` when the shifted start is after the shifted end.
/// - `OutOfBounds` when the shifted start year is more than
///   `MAX_YEAR_DISTANCE` years from `current_year`.
/// - `DateOverflow` when the shift leaves the representable calendar.
/// - `Conflict` with every overlapping event, in input order.
pub fn evaluate_at(
    event: &Event,
    pixel_offset: f32,
    zoom: f32,
    others: &[Event],
    current_year: i32,
) -> Result<Event, MoveError> {
    let days = day_delta(pixel_offset, zoom);
    if days == 0 {
        debug!(
            "event=move_skip module=movement status=ok event_id={} pixel_offset={}",
            event.id, pixel_offset
        );
        return Ok(event.clone());
    }

    let (Some(start), Some(end)) = (
        shift_days(event.start_date, days),
        shift_days(event.end_date, days),
    ) else {
        return Err(MoveError::DateOverflow { days });
    };

    if start > end {
        return Err(MoveError::InvalidRange { start, end });
    }

    let start_year = start.year();
    if start_year < current_year - MAX_YEAR_DISTANCE || start_year > current_year + MAX_YEAR_DISTANCE
    {
        return Err(MoveError::OutOfBounds {
            start_year,
            current_year,
        });
    }

    let moved = event.with_dates(start, end);
    let conflicts = find_conflicts(&moved, others);
    if !conflicts.is_empty() {
        debug!(
            "event=move_conflict module=movement status=rejected event_id={} conflicts={}",
            event.id,
            conflicts.len()
        );
        return Err(MoveError::Conflict(
            conflicts.into_iter().map(ConflictingEvent::from).collect(),
        ));
    }

    info!(
        "event=move_evaluated module=movement status=ok event_id={} days={}",
        event.id, days
    );
    Ok(moved)
}
