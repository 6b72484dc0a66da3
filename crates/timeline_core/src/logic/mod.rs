//! Pure timeline rules.
//!
//! # Responsibility
//! - Convert between calendar days and pixel offsets under a zoom level.
//! - Partition events into the minimum number of non-overlapping lanes.
//! - Detect collisions and turn drag gestures into validated date shifts.
//!
//! # Invariants
//! - Nothing in this module holds state; every function is reentrant and
//!   safe to call from any number of threads.
//! - Input events are never mutated; results borrow or copy them.

pub mod collision;
pub mod date_math;
pub mod lanes;
pub mod movement;
pub mod zoom;
