//! Single-writer event store with snapshot broadcast.
//!
//! # Invariants
//! - All writes go through the `state` write lock; the next list is fully
//!   built before it replaces the current snapshot.
//! - Publishing happens while the write lock is held, so observers receive
//!   snapshots in strictly increasing version order.
//! - Each subscriber holds at most one unread snapshot; a publish replaces
//!   it rather than queueing behind it.
//! - Lock order is always `state`, then `subscribers`, then a slot.
//! - Stored names are trimmed; records are normalized on the way in.

use crate::model::event::{Event, EventId, EventValidationError};
use crate::store::snapshot::{EventSnapshot, EventSubscription, SnapshotSlot};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockWriteGuard, Weak};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures. A failed call leaves the store untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(EventId),
    DuplicateId(EventId),
    Validation {
        id: EventId,
        source: EventValidationError,
    },
    /// A replacement tried to change the id of the record it replaces.
    IdMismatch { expected: EventId, actual: EventId },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate event id: {id}"),
            Self::Validation { id, source } => write!(f, "invalid event {id}: {source}"),
            Self::IdMismatch { expected, actual } => {
                write!(f, "replacement for event {expected} carries id {actual}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation { source, .. } => Some(source),
            Self::NotFound(_) | Self::DuplicateId(_) | Self::IdMismatch { .. } => None,
        }
    }
}

struct StoreState {
    current: EventSnapshot,
}

/// Canonical event collection for one session.
///
/// Share it with `Arc<EventStore>`; all methods take `&self`.
pub struct EventStore {
    state: RwLock<StoreState>,
    subscribers: Mutex<Vec<Weak<SnapshotSlot>>>,
}

impl EventStore {
    /// Loads the initial event set.
    ///
    /// # Errors
    /// - `DuplicateId` when two events share an id.
    /// - `Validation` when any event breaks record invariants.
    pub fn new(events: Vec<Event>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(events.len());
        let events = events
            .into_iter()
            .map(|event| {
                let event = normalize(event)?;
                if !seen.insert(event.id) {
                    return Err(StoreError::DuplicateId(event.id));
                }
                Ok(event)
            })
            .collect::<StoreResult<Vec<_>>>()?;

        info!(
            "event=store_init module=store status=ok events={}",
            events.len()
        );
        Ok(Self {
            state: RwLock::new(StoreState {
                current: EventSnapshot::new(0, events),
            }),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Self {
        Self {
            state: RwLock::new(StoreState {
                current: EventSnapshot::new(0, Vec::new()),
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Point-in-time read of the full event list.
    pub fn snapshot(&self) -> EventSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    pub fn get(&self, id: EventId) -> Option<Event> {
        self.snapshot().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Subscribes to snapshot publications.
    ///
    /// The current snapshot is pending immediately; every successful
    /// mutation replaces the pending snapshot with the newer one.
    pub fn observe(&self) -> EventSubscription {
        // Holding the read lock keeps writers out until the subscriber is
        // registered, so versions seen by the subscriber never go backwards.
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let slot = Arc::new(SnapshotSlot::default());
        slot.publish(state.current.clone());
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.push(Arc::downgrade(&slot));
        debug!(
            "event=store_observe module=store status=ok subscribers={} version={}",
            subscribers.len(),
            state.current.version()
        );
        EventSubscription::new(slot)
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Replaces the event with the same id.
    ///
    /// Publishes the new snapshot on success, even when the record is
    /// unchanged.
    ///
    /// # Errors
    /// - `NotFound` when no event has `event.id`.
    /// - `Validation` when `event` breaks record invariants.
    pub fn update(&self, event: Event) -> StoreResult<Event> {
        let mut state = self.write_state();
        let index = find_index(&state.current, event.id)?;
        let event = normalize(event)?;

        let mut next = state.current.to_vec();
        next[index] = event.clone();
        self.install(&mut state, next);
        info!(
            "event=store_update module=store status=ok event_id={} version={}",
            event.id,
            state.current.version()
        );
        Ok(event)
    }

    /// Removes the event with `id`.
    ///
    /// # Errors
    /// - `NotFound` when no event has `id`.
    pub fn delete(&self, id: EventId) -> StoreResult<()> {
        let mut state = self.write_state();
        let index = find_index(&state.current, id)?;

        let mut next = state.current.to_vec();
        next.remove(index);
        self.install(&mut state, next);
        info!(
            "event=store_delete module=store status=ok event_id={} version={}",
            id,
            state.current.version()
        );
        Ok(())
    }

    /// Atomically decides and applies a replacement for event `id`.
    ///
    /// `decide` receives the current record and the full current list while
    /// the write lock is held, so no other writer can interleave between the
    /// decision and the commit. Returning the record unchanged is a no-op and
    /// publishes nothing.
    ///
    /// # Errors
    /// - `NotFound`, `Validation` or `IdMismatch` from the store, converted
    ///   into `E`.
    /// - Whatever `decide` returns; the store is left untouched.
    pub fn replace_with<E, F>(&self, id: EventId, decide: F) -> Result<Event, E>
    where
        E: From<StoreError>,
        F: FnOnce(&Event, &[Event]) -> Result<Event, E>,
    {
        let mut state = self.write_state();
        let index = find_index(&state.current, id)?;
        let current = &state.current.events()[index];

        let replacement = decide(current, state.current.events())?;
        if replacement.id != id {
            return Err(StoreError::IdMismatch {
                expected: id,
                actual: replacement.id,
            }
            .into());
        }
        let replacement = normalize(replacement)?;
        if &replacement == current {
            return Ok(replacement);
        }

        let mut next = state.current.to_vec();
        next[index] = replacement.clone();
        self.install(&mut state, next);
        info!(
            "event=store_replace module=store status=ok event_id={} version={}",
            id,
            state.current.version()
        );
        Ok(replacement)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        // Mutations are staged in a fresh Vec before being installed, so a
        // poisoned lock never guards a half-applied change.
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn install(&self, state: &mut StoreState, events: Vec<Event>) {
        state.current = EventSnapshot::new(state.current.version() + 1, events);

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|slot| match slot.upgrade() {
            Some(slot) => {
                slot.publish(state.current.clone());
                true
            }
            None => false,
        });
        let dropped = before - subscribers.len();
        if dropped > 0 {
            debug!(
                "event=store_prune module=store status=ok dropped={} remaining={}",
                dropped,
                subscribers.len()
            );
        }
    }
}

impl Drop for EventStore {
    fn drop(&mut self) {
        let subscribers = self
            .subscribers
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for slot in subscribers.drain(..).filter_map(|slot| slot.upgrade()) {
            slot.close();
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::empty()
    }
}

fn normalize(event: Event) -> StoreResult<Event> {
    let id = event.id;
    event
        .normalized()
        .map_err(|source| StoreError::Validation { id, source })
}

fn find_index(snapshot: &EventSnapshot, id: EventId) -> StoreResult<usize> {
    snapshot
        .events()
        .iter()
        .position(|event| event.id == id)
        .ok_or_else(|| {
            warn!(
                "event=store_lookup module=store status=not_found event_id={}",
                id
            );
            StoreError::NotFound(id)
        })
}
