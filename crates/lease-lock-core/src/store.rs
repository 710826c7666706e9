//! Key-value store capability consumed by the lock coordinator.

use std::future::Future;
use std::time::Duration;

use crate::error::LockResult;

/// The store operations a lease lock needs.
///
/// `set_if_absent` and `get_and_set` must each be a single indivisible
/// operation from the store's point of view. Every other guarantee of the
/// lock rests on that.
///
/// Values are lease timestamps (`i64` nanoseconds). A `ttl` of `None` or zero
/// means no store-side expiration; lease expiry is tracked in the value.
pub trait KeyValueStore: Send + Sync {
    /// Sets `key` to `value` only if the key does not exist.
    ///
    /// Returns whether the write happened.
    fn set_if_absent(
        &self,
        key: &str,
        value: i64,
        ttl: Option<Duration>,
    ) -> impl Future<Output = LockResult<bool>> + Send;

    /// Reads the value stored at `key`, `None` if absent.
    fn get(&self, key: &str) -> impl Future<Output = LockResult<Option<i64>>> + Send;

    /// Writes `value` and returns the value stored immediately before, `None`
    /// if the key was absent.
    fn get_and_set(
        &self,
        key: &str,
        value: i64,
    ) -> impl Future<Output = LockResult<Option<i64>>> + Send;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> impl Future<Output = LockResult<()>> + Send;

    /// Unconditionally sets `key` to `value`.
    fn set(
        &self,
        key: &str,
        value: i64,
        ttl: Option<Duration>,
    ) -> impl Future<Output = LockResult<()>> + Send;
}
