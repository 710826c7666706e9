//! In-process key-value store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::LockResult;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: i64,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: i64, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl
                .filter(|ttl| !ttl.is_zero())
                .and_then(|ttl| Instant::now().checked_add(ttl)),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// A [`KeyValueStore`] kept in process memory.
///
/// Every operation runs under a single mutex, so `set_if_absent` and
/// `get_and_set` are atomic across all tasks sharing the store. Clones share
/// the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries().values().filter(|e| e.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the map and drops the entry for `key` if its TTL has passed.
    fn entries_for(&self, key: &str) -> MutexGuard<'_, HashMap<String, Entry>> {
        let mut entries = self.entries();
        if entries.get(key).is_some_and(|e| !e.is_live(Instant::now())) {
            entries.remove(key);
        }
        entries
    }
}

impl KeyValueStore for MemoryStore {
    async fn set_if_absent(&self, key: &str, value: i64, ttl: Option<Duration>) -> LockResult<bool> {
        let mut entries = self.entries_for(key);
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), Entry::new(value, ttl));
        Ok(true)
    }

    async fn get(&self, key: &str) -> LockResult<Option<i64>> {
        Ok(self.entries_for(key).get(key).map(|e| e.value))
    }

    async fn get_and_set(&self, key: &str, value: i64) -> LockResult<Option<i64>> {
        let previous = self
            .entries_for(key)
            .insert(key.to_string(), Entry::new(value, None));
        Ok(previous.map(|e| e.value))
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        self.entries().remove(key);
        Ok(())
    }

    async fn set(&self, key: &str, value: i64, ttl: Option<Duration>) -> LockResult<()> {
        self.entries()
            .insert(key.to_string(), Entry::new(value, ttl));
        Ok(())
    }
}
