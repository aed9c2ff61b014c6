//! Unit tests for the in-memory access record store

use chrono::{Duration, Utc};

use crate::services::account_denied::{AccessRecord, AccessRecordStore, InMemoryAccessRecordStore};

#[test]
fn test_update_creates_lazily() {
    let store = InMemoryAccessRecordStore::new();
    assert!(store.is_empty());

    let stored = store.update("a", &mut |existing| {
        assert!(existing.is_none());
        AccessRecord {
            attempts: 1,
            blocked_until: None,
        }
    });

    assert_eq!(stored.attempts, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a"), Some(stored));
}

#[test]
fn test_update_sees_current_record() {
    let store = InMemoryAccessRecordStore::new();
    for _ in 0..3 {
        store.update("a", &mut |existing| {
            let mut record = existing.unwrap_or_default();
            record.attempts += 1;
            record
        });
    }

    assert_eq!(store.get("a").unwrap().attempts, 3);
}

#[test]
fn test_remove() {
    let store = InMemoryAccessRecordStore::new();
    store.update("a", &mut |_| AccessRecord::default());

    assert_eq!(store.remove("a"), Some(AccessRecord::default()));
    assert_eq!(store.remove("a"), None);
    assert!(store.is_empty());
}

#[test]
fn test_is_blocked_at() {
    let now = Utc::now();
    let record = AccessRecord {
        attempts: 4,
        blocked_until: Some(now + Duration::minutes(5)),
    };

    assert!(record.is_blocked_at(now));
    assert!(!record.is_blocked_at(now + Duration::minutes(5)));
    assert!(!AccessRecord::default().is_blocked_at(now));
}

#[test]
fn test_concurrent_updates_are_atomic() {
    let store = InMemoryAccessRecordStore::new();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..250 {
                    store.update("shared", &mut |existing| {
                        let mut record = existing.unwrap_or_default();
                        record.attempts += 1;
                        record
                    });
                }
            });
        }
    });

    assert_eq!(store.get("shared").unwrap().attempts, 2000);
}
