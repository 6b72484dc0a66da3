//! Authoritative in-memory event set.
//!
//! # Responsibility
//! - Hold the canonical, insertion-ordered event list for one session.
//! - Serialize every mutation and publish immutable snapshots to observers.
//!
//! # Invariants
//! - Ids are unique within the store.
//! - Readers see either the pre- or post-mutation list, never a mix.
//! - Every successful mutation bumps the snapshot version by one and is
//!   published to each live observer exactly once, in version order.

pub mod event_store;
pub mod snapshot;
