//! Core timeline layout logic.
//! This crate is the single source of truth for lane, date and move
//! invariants.

pub mod layout;
pub mod logging;
pub mod logic;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use layout::{process_events, LaneWithEvents, PlacedEvent, ProcessedTimelineData};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use logic::collision::{find_conflicts, overlaps};
pub use logic::date_math::{
    days_between, duration_days, pixels_per_day, timeline_width, width, x_position,
    BASE_PIXELS_PER_DAY, MAX_ZOOM, MIN_ZOOM,
};
pub use logic::lanes::{assign_lanes, Lane};
pub use logic::movement::{evaluate, evaluate_at, ConflictingEvent, MoveError};
pub use logic::zoom::ZoomLevel;
pub use model::event::{Event, EventId, EventValidationError};
pub use seed::{parse_events_json, sample_events, SeedError};
pub use service::timeline_service::{TimelineError, TimelineResult, TimelineService};
pub use store::event_store::{EventStore, StoreError, StoreResult};
pub use store::snapshot::{EventSnapshot, EventSubscription};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
