//! Store wrappers for exercising error paths.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use lease_lock_core::error::{LockError, LockResult};
use lease_lock_core::memory::MemoryStore;
use lease_lock_core::store::KeyValueStore;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    SetIfAbsent,
    Get,
    GetAndSet,
    Delete,
}

/// Wraps a [`MemoryStore`], failing the chosen operation and counting calls.
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: Option<Op>,
    calls: Mutex<Vec<Op>>,
}

impl FailingStore {
    pub fn new(inner: MemoryStore, fail_on: Option<Op>) -> Self {
        Self {
            inner,
            fail_on,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, op: Op) -> LockResult<()> {
        self.calls.lock().unwrap().push(op);
        if self.fail_on == Some(op) {
            return Err(LockError::Backend(Box::new(std::io::Error::other(format!(
                "injected {op:?} failure"
            )))));
        }
        Ok(())
    }
}

impl KeyValueStore for FailingStore {
    async fn set_if_absent(&self, key: &str, value: i64, ttl: Option<Duration>) -> LockResult<bool> {
        self.check(Op::SetIfAbsent)?;
        self.inner.set_if_absent(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> LockResult<Option<i64>> {
        self.check(Op::Get)?;
        self.inner.get(key).await
    }

    async fn get_and_set(&self, key: &str, value: i64) -> LockResult<Option<i64>> {
        self.check(Op::GetAndSet)?;
        self.inner.get_and_set(key, value).await
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        self.check(Op::Delete)?;
        self.inner.delete(key).await
    }

    async fn set(&self, key: &str, value: i64, ttl: Option<Duration>) -> LockResult<()> {
        self.inner.set(key, value, ttl).await
    }
}

/// A store whose stored values never decode as leases.
pub struct CorruptStore;

impl KeyValueStore for CorruptStore {
    async fn set_if_absent(&self, _key: &str, _value: i64, _ttl: Option<Duration>) -> LockResult<bool> {
        Ok(false)
    }

    async fn get(&self, key: &str) -> LockResult<Option<i64>> {
        Err(LockError::InvalidLease {
            key: key.to_string(),
            value: "garbage".to_string(),
        })
    }

    async fn get_and_set(&self, key: &str, _value: i64) -> LockResult<Option<i64>> {
        self.get(key).await
    }

    async fn delete(&self, _key: &str) -> LockResult<()> {
        Ok(())
    }

    async fn set(&self, _key: &str, _value: i64, _ttl: Option<Duration>) -> LockResult<()> {
        Ok(())
    }
}

/// A store replaying fixed answers, for interleavings a real store cannot
/// be forced into.
pub struct ScriptedStore {
    set_if_absent: Mutex<VecDeque<bool>>,
    current: Option<i64>,
    previous: Option<i64>,
    swapped: Mutex<Vec<i64>>,
}

impl ScriptedStore {
    /// `set_if_absent` answers in order (then `false`), `get` always returns
    /// `current` and `get_and_set` always returns `previous`.
    pub fn new(set_if_absent: &[bool], current: Option<i64>, previous: Option<i64>) -> Self {
        Self {
            set_if_absent: Mutex::new(set_if_absent.iter().copied().collect()),
            current,
            previous,
            swapped: Mutex::new(Vec::new()),
        }
    }

    /// Values written through `get_and_set`.
    pub fn swapped(&self) -> Vec<i64> {
        self.swapped.lock().unwrap().clone()
    }
}

impl KeyValueStore for ScriptedStore {
    async fn set_if_absent(&self, _key: &str, _value: i64, _ttl: Option<Duration>) -> LockResult<bool> {
        Ok(self.set_if_absent.lock().unwrap().pop_front().unwrap_or(false))
    }

    async fn get(&self, _key: &str) -> LockResult<Option<i64>> {
        Ok(self.current)
    }

    async fn get_and_set(&self, _key: &str, value: i64) -> LockResult<Option<i64>> {
        self.swapped.lock().unwrap().push(value);
        Ok(self.previous)
    }

    async fn delete(&self, _key: &str) -> LockResult<()> {
        Ok(())
    }

    async fn set(&self, _key: &str, _value: i64, _ttl: Option<Duration>) -> LockResult<()> {
        Ok(())
    }
}
