//! Shared ledger of access attempts keyed by identifier

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Attempt counter and block window for one identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Attempts recorded since the last reset
    pub attempts: u32,
    /// End of the current or most recent block, if one was imposed
    pub blocked_until: Option<DateTime<Utc>>,
}

impl AccessRecord {
    /// Whether a block is in force at `now`
    pub fn is_blocked_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.blocked_until, Some(until) if until > now)
    }
}

/// Thread-safe storage for access records
///
/// Implementations must apply [`update`](Self::update) atomically per
/// identifier: no other update for the same identifier may interleave between
/// reading the current record and storing the new one.
pub trait AccessRecordStore: Send + Sync {
    /// Current record for an identifier
    fn get(&self, identifier: &str) -> Option<AccessRecord>;

    /// Replace the record for `identifier` with the value computed from the
    /// current one (`None` if absent) and return what was stored
    ///
    /// `update` must not call back into the store.
    fn update(
        &self,
        identifier: &str,
        update: &mut dyn FnMut(Option<AccessRecord>) -> AccessRecord,
    ) -> AccessRecord;

    /// Remove the record for an identifier, returning it if present
    fn remove(&self, identifier: &str) -> Option<AccessRecord>;

    /// Number of identifiers tracked
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store backed by a sharded concurrent map
///
/// An update holds the write lock of the shard owning the identifier, so
/// updates for one identifier serialize while unrelated identifiers mostly
/// land on other shards.
#[derive(Debug, Default)]
pub struct InMemoryAccessRecordStore {
    records: DashMap<String, AccessRecord>,
}

impl InMemoryAccessRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccessRecordStore for InMemoryAccessRecordStore {
    fn get(&self, identifier: &str) -> Option<AccessRecord> {
        self.records.get(identifier).map(|record| *record)
    }

    fn update(
        &self,
        identifier: &str,
        update: &mut dyn FnMut(Option<AccessRecord>) -> AccessRecord,
    ) -> AccessRecord {
        match self.records.entry(identifier.to_owned()) {
            Entry::Occupied(mut entry) => {
                let next = update(Some(*entry.get()));
                entry.insert(next);
                next
            }
            Entry::Vacant(entry) => {
                let next = update(None);
                entry.insert(next);
                next
            }
        }
    }

    fn remove(&self, identifier: &str) -> Option<AccessRecord> {
        self.records.remove(identifier).map(|(_, record)| record)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
