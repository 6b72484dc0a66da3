//! Domain model for timeline events.
//!
//! # Responsibility
//! - Define the canonical event record shared by layout, move and store code.
//! - Own the validation rules every event must satisfy.
//!
//! # Invariants
//! - Every event is identified by a caller-supplied `EventId`.
//! - `start_date <= end_date` for every materialized event.

pub mod event;
