use chrono::NaiveDate;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use timeline_core::{Event, EventStore, StoreError};

fn event(id: i64, start: u32, end: u32) -> Event {
    let day = |d| NaiveDate::from_ymd_opt(2026, 7, d).unwrap();
    Event::new(id, format!("event-{id}"), day(start), day(end)).unwrap()
}

fn seeded_store() -> EventStore {
    EventStore::new(vec![event(1, 1, 3), event(2, 2, 4), event(3, 5, 6)]).unwrap()
}

#[test]
fn snapshot_reflects_update_without_prior_version() {
    let store = seeded_store();
    let mut edited = event(2, 10, 12);
    edited.name = "moved".to_string();

    let returned = store.update(edited.clone()).unwrap();
    assert_eq!(returned, edited);

    let snapshot = store.snapshot();
    let matching: Vec<&Event> = snapshot.events().iter().filter(|e| e.id == 2).collect();
    assert_eq!(matching, vec![&edited]);
}

#[test]
fn snapshots_are_immutable_after_mutation() {
    let store = seeded_store();
    let before = store.snapshot();
    store.delete(3).unwrap();

    assert_eq!(before.len(), 3);
    assert_eq!(before.version(), 0);
    assert_eq!(store.snapshot().len(), 2);
}

#[test]
fn observe_emits_current_then_each_mutation_once() {
    let store = seeded_store();
    let subscription = store.observe();
    assert_eq!(subscription.try_recv().map(|s| s.version()), Some(0));
    assert!(subscription.try_recv().is_none());

    store.update(event(1, 1, 2)).unwrap();
    assert_eq!(subscription.try_recv().map(|s| s.version()), Some(1));
    store.delete(3).unwrap();
    assert_eq!(subscription.try_recv().map(|s| s.version()), Some(2));

    assert_eq!(store.delete(42), Err(StoreError::NotFound(42)));
    assert!(subscription.try_recv().is_none());
}

#[test]
fn blocked_reader_wakes_on_publish() {
    let store = Arc::new(seeded_store());
    let subscription = store.observe();
    subscription.try_recv().unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            store.delete(2).unwrap();
        })
    };

    let snapshot = subscription.recv().unwrap();
    assert_eq!(snapshot.version(), 1);
    assert!(!snapshot.contains(2));
    writer.join().unwrap();
}

#[test]
fn latest_skips_intermediate_snapshots() {
    let store = seeded_store();
    let subscription = store.observe();
    store.delete(1).unwrap();
    store.delete(2).unwrap();

    let newest = subscription.latest().unwrap();
    assert_eq!(newest.version(), 2);
    assert_eq!(newest.len(), 1);
    assert!(subscription.try_recv().is_none());
}

#[test]
fn subscription_ends_when_store_is_dropped() {
    let store = seeded_store();
    let subscription = store.observe();
    drop(store);

    let collected: Vec<u64> = subscription.map(|snapshot| snapshot.version()).collect();
    assert_eq!(collected, vec![0]);
}

#[test]
fn concurrent_writers_are_serialized_and_observers_see_increasing_versions() {
    let events: Vec<Event> = (1..=16).map(|id| event(id, 1, 2)).collect();
    let store = Arc::new(EventStore::new(events).unwrap());
    let subscription = store.observe();
    let barrier = Arc::new(Barrier::new(4));

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for id in (1..=16).filter(|id| id % 4 == worker) {
                    let mut edited = event(id, 3, 4);
                    edited.name = format!("edited-{id}");
                    store.update(edited).unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..200 {
                let snapshot = store.snapshot();
                // Every record is either fully old or fully new.
                for e in snapshot.events() {
                    let edited = e.name.starts_with("edited-");
                    assert_eq!(edited, e.start_date.format("%d").to_string() == "03");
                }
                assert_eq!(snapshot.len(), 16);
            }
        })
    };

    let observer = thread::spawn(move || {
        let mut versions = Vec::new();
        while let Some(snapshot) = subscription.recv_timeout(Duration::from_secs(1)) {
            versions.push(snapshot.version());
            if snapshot.version() == 16 {
                break;
            }
        }
        versions
    });

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    let versions = observer.join().unwrap();
    assert_eq!(versions.last(), Some(&16));
    assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(store
        .snapshot()
        .events()
        .iter()
        .all(|e| e.name.starts_with("edited-")));
}
