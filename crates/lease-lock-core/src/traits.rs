//! Core traits for lease locks.

use std::future::Future;
use std::time::Duration;

use crate::error::LockResult;
use crate::lease::Lease;

// ============================================================================
// Lock Handle Trait
// ============================================================================

/// Handle to a held lease lock.
///
/// Dropping a handle does not release the lock; the lease simply runs out.
/// Call `release()` to free the key early.
///
/// # Example
///
/// ```rust,ignore
/// let handle = lock.acquire(Duration::from_secs(5)).await?;
/// // Critical section - we hold the lease until it expires
/// do_work().await;
/// handle.release().await?;
/// ```
pub trait LockHandle: Send + Sync + Sized {
    /// The key this handle holds.
    fn key(&self) -> &str;

    /// The lease value written by this acquisition.
    fn lease(&self) -> Lease;

    /// Whether the lease has run out. An expired handle no longer protects
    /// anything, and releasing it is a no-op.
    fn is_expired(&self) -> bool {
        self.lease().is_expired()
    }

    /// Releases the lock if its lease has not yet expired.
    ///
    /// Releasing an expired handle succeeds without touching the store.
    fn release(self) -> impl Future<Output = LockResult<()>> + Send;
}

// ============================================================================
// Distributed Lock Trait
// ============================================================================

/// A named lock with a fixed lease duration.
///
/// # Example
///
/// ```rust,ignore
/// use lease_lock_core::DistributedLock;
///
/// async fn protected_operation(lock: &impl DistributedLock) -> LockResult<()> {
///     let handle = lock.acquire(Duration::from_secs(5)).await?;
///     perform_critical_section().await?;
///     handle.release().await
/// }
/// ```
pub trait DistributedLock: Send + Sync {
    /// The handle type returned when the lock is acquired.
    type Handle: LockHandle + Send;

    /// Returns the key identifying this lock.
    fn name(&self) -> &str;

    /// Acquires the lock, polling for up to `timeout`.
    ///
    /// # Returns
    ///
    /// * `Ok(handle)` - Lock acquired successfully
    /// * `Err(LockError::Timeout)` - Budget exhausted while the key stayed held.
    ///   A zero `timeout` makes exactly one attempt.
    /// * `Err(LockError::Backend)` - Store operation failed; never retried
    fn acquire(&self, timeout: Duration)
    -> impl Future<Output = LockResult<Self::Handle>> + Send;

    /// Makes a single acquisition attempt.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(handle))` - Lock acquired successfully
    /// * `Ok(None)` - Lock is held by another process
    /// * `Err(...)` - Error occurred during attempt
    fn try_acquire(&self) -> impl Future<Output = LockResult<Option<Self::Handle>>> + Send;
}

// ============================================================================
// Provider Traits
// ============================================================================

/// Factory for creating locks by name.
///
/// # Example
///
/// ```rust,ignore
/// let client = LeaseLockClient::new(MemoryStore::new());
/// let lock = client.create_lock("my-resource");
/// let handle = lock.acquire(Duration::from_secs(1)).await?;
/// ```
pub trait LockProvider: Send + Sync {
    /// The lock type created by this provider.
    type Lock: DistributedLock;

    /// Creates a lock with the given name.
    fn create_lock(&self, name: &str) -> Self::Lock;
}

// ============================================================================
// Convenience Extensions
// ============================================================================

/// Extension trait providing convenience methods for lock providers.
pub trait LockProviderExt: LockProvider {
    /// Acquires a lock by name, returning the handle.
    fn acquire_lock(
        &self,
        name: &str,
        timeout: Duration,
    ) -> impl Future<Output = LockResult<<Self::Lock as DistributedLock>::Handle>> + Send
    where
        Self: Sync,
    {
        async move {
            let lock = self.create_lock(name);
            lock.acquire(timeout).await
        }
    }

    /// Tries to acquire a lock by name.
    fn try_acquire_lock(
        &self,
        name: &str,
    ) -> impl Future<Output = LockResult<Option<<Self::Lock as DistributedLock>::Handle>>> + Send
    where
        Self: Sync,
    {
        async move {
            let lock = self.create_lock(name);
            lock.try_acquire().await
        }
    }
}

// Blanket implementation for all LockProviders
impl<T: LockProvider> LockProviderExt for T {}
