//! Timeline use-case service.
//!
//! # Responsibility
//! - Validate edits before they reach the store.
//! - Commit drag moves atomically against the current event set.
//! - Produce layouts from the current snapshot.
//!
//! # Invariants
//! - Service APIs never bypass store validation or serialization.
//! - A failed call leaves the store and its observers untouched.

use crate::layout::{process_events, ProcessedTimelineData};
use crate::logic::movement::{evaluate_at, MoveError};
use crate::logic::zoom::ZoomLevel;
use crate::model::event::{Event, EventId, EventValidationError};
use crate::store::event_store::{EventStore, StoreError};
use crate::store::snapshot::{EventSnapshot, EventSubscription};
use chrono::{Datelike, Local};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type TimelineResult<T> = Result<T, TimelineError>;

/// Service error for timeline use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// Edit rejected before reaching the store.
    Validation(EventValidationError),
    /// Ids must be positive.
    InvalidId(EventId),
    /// Target event does not exist.
    NotFound(EventId),
    /// Drag move rejected.
    Move(MoveError),
    /// Any other store-level failure.
    Store(StoreError),
}

impl Display for TimelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidId(id) => write!(f, "event id must be positive, got {id}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::Move(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TimelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Move(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<EventValidationError> for TimelineError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<MoveError> for TimelineError {
    fn from(value: MoveError) -> Self {
        Self::Move(value)
    }
}

impl From<StoreError> for TimelineError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Validation { source, .. } => Self::Validation(source),
            other => Self::Store(other),
        }
    }
}

/// Use-case entry point over one shared `EventStore`.
#[derive(Clone)]
pub struct TimelineService {
    store: Arc<EventStore>,
}

impl TimelineService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    pub fn snapshot(&self) -> EventSnapshot {
        self.store.snapshot()
    }

    pub fn observe(&self) -> EventSubscription {
        self.store.observe()
    }

    /// Replaces an event after validating the edited record.
    ///
    /// # Errors
    /// - `Validation` for an empty name or end before start.
    /// - `NotFound` when the id is unknown.
    pub fn update_event(&self, event: Event) -> TimelineResult<Event> {
        let id = event.id;
        let event = Event::new(id, event.name, event.start_date, event.end_date)
            .inspect_err(|err| {
                warn!(
                    "event=update_rejected module=service status=invalid event_id={} reason={:?}",
                    id, err
                )
            })?;
        Ok(self.store.update(event)?)
    }

    /// Deletes an event by id.
    ///
    /// # Errors
    /// - `InvalidId` for ids `<= 0`.
    /// - `NotFound` when the id is unknown.
    pub fn delete_event(&self, id: EventId) -> TimelineResult<()> {
        if id <= 0 {
            return Err(TimelineError::InvalidId(id));
        }
        Ok(self.store.delete(id)?)
    }

    /// Moves event `id` by a horizontal drag of `pixel_offset` at `zoom`.
    pub fn move_event(
        &self,
        id: EventId,
        pixel_offset: f32,
        zoom: impl Into<ZoomLevel>,
    ) -> TimelineResult<Event> {
        self.move_event_at(id, pixel_offset, zoom, Local::now().year())
    }

    /// Moves event `id`, checking year bounds against `current_year`.
    ///
    /// Evaluation and commit happen under one store write, so the collision
    /// check always sees the set the move is applied to. No-op gestures
    /// return the stored event without publishing.
    ///
    /// # Errors
    /// - `NotFound` when the id is unknown.
    /// - `Move` with the rejection reason; the store is left untouched.
    pub fn move_event_at(
        &self,
        id: EventId,
        pixel_offset: f32,
        zoom: impl Into<ZoomLevel>,
        current_year: i32,
    ) -> TimelineResult<Event> {
        let zoom = zoom.into().value();
        let result = self
            .store
            .replace_with(id, |current: &Event, all: &[Event]| {
                evaluate_at(current, pixel_offset, zoom, all, current_year)
                    .map_err(TimelineError::from)
            });
        match &result {
            Ok(moved) => info!(
                "event=move_commit module=service status=ok event_id={} start={}",
                moved.id, moved.start_date
            ),
            Err(err) => warn!(
                "event=move_commit module=service status=rejected event_id={} reason={}",
                id,
                move_reason(err)
            ),
        }
        result
    }

    /// Lays out the current snapshot at `zoom`.
    pub fn layout(&self, zoom: impl Into<ZoomLevel>) -> ProcessedTimelineData {
        process_events(self.store.snapshot().events(), zoom)
    }
}

// Short tag for logs; names stay out of log files.
fn move_reason(err: &TimelineError) -> &'static str {
    match err {
        TimelineError::Move(MoveError::Conflict(_)) => "conflict",
        TimelineError::Move(MoveError::InvalidRange { .. }) => "invalid_range",
        TimelineError::Move(MoveError::OutOfBounds { .. }) => "out_of_bounds",
        TimelineError::Move(MoveError::DateOverflow { .. }) => "date_overflow",
        TimelineError::NotFound(_) => "not_found",
        TimelineError::Validation(_) => "validation",
        TimelineError::InvalidId(_) | TimelineError::Store(_) => "store",
    }
}
