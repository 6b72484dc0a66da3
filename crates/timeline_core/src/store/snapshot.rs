//! Immutable snapshots and observer subscriptions.

use crate::model::event::{Event, EventId};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Point-in-time copy of the full event collection.
///
/// Cloning is cheap; the event list is shared and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSnapshot {
    version: u64,
    events: Arc<[Event]>,
}

impl EventSnapshot {
    pub(crate) fn new(version: u64, events: Vec<Event>) -> Self {
        Self {
            version,
            events: events.into(),
        }
    }

    /// Number of successful mutations applied before this snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Events in store insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Event> {
        self.events.to_vec()
    }
}

/// Latest-value mailbox shared by the store and one subscriber.
///
/// Holds at most one pending snapshot; a publish replaces whatever the
/// subscriber has not read yet.
#[derive(Debug, Default)]
pub(crate) struct SnapshotSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

#[derive(Debug, Default)]
struct SlotState {
    pending: Option<EventSnapshot>,
    closed: bool,
}

impl SnapshotSlot {
    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the pending snapshot and wakes a waiting reader.
    pub(crate) fn publish(&self, snapshot: EventSnapshot) {
        self.lock().pending = Some(snapshot);
        self.ready.notify_all();
    }

    /// Marks the feed finished; readers drain the pending value, then stop.
    pub(crate) fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }
}

/// Live feed of snapshots from one `EventStore`.
///
/// The snapshot current at subscription time is available immediately.
/// Each successful mutation replaces any unread snapshot, so a slow reader
/// only ever sees the newest state, in increasing version order. The feed
/// ends once the store is dropped and the last pending value is read.
#[derive(Debug)]
pub struct EventSubscription {
    slot: Arc<SnapshotSlot>,
}

impl EventSubscription {
    pub(crate) fn new(slot: Arc<SnapshotSlot>) -> Self {
        Self { slot }
    }

    /// Blocks until a snapshot is pending; `None` once the store is gone.
    pub fn recv(&self) -> Option<EventSnapshot> {
        let guard = self.slot.lock();
        let mut guard = self
            .slot
            .ready
            .wait_while(guard, |state| state.pending.is_none() && !state.closed)
            .unwrap_or_else(PoisonError::into_inner);
        guard.pending.take()
    }

    /// Takes the pending snapshot without blocking.
    pub fn try_recv(&self) -> Option<EventSnapshot> {
        self.slot.lock().pending.take()
    }

    /// Waits up to `timeout` for a pending snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EventSnapshot> {
        let guard = self.slot.lock();
        let (mut guard, _) = self
            .slot
            .ready
            .wait_timeout_while(guard, timeout, |state| {
                state.pending.is_none() && !state.closed
            })
            .unwrap_or_else(PoisonError::into_inner);
        guard.pending.take()
    }

    /// Newest unread snapshot, if any.
    ///
    /// Equivalent to `try_recv`: the slot never holds more than one value.
    pub fn latest(&self) -> Option<EventSnapshot> {
        self.try_recv()
    }
}

impl Iterator for EventSubscription {
    type Item = EventSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}
