//! Lease lock handle implementation.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::LockResult;
use crate::lease::Lease;
use crate::store::KeyValueStore;
use crate::traits::LockHandle;

/// Handle for a held lease lock.
///
/// Holds the key and the lease value this acquisition wrote. It is never
/// re-validated against the store: once the lease passes, another caller may
/// take the key over without this handle noticing.
pub struct LeaseLockHandle<S> {
    key: String,
    lease: Lease,
    store: Arc<S>,
}

impl<S> LeaseLockHandle<S> {
    pub(crate) fn new(key: String, lease: Lease, store: Arc<S>) -> Self {
        Self { key, lease, store }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn lease(&self) -> Lease {
        self.lease
    }

    pub fn is_expired(&self) -> bool {
        self.lease.is_expired()
    }
}

impl<S> fmt::Debug for LeaseLockHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaseLockHandle")
            .field("key", &self.key)
            .field("lease", &self.lease)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> LockHandle for LeaseLockHandle<S> {
    fn key(&self) -> &str {
        &self.key
    }

    fn lease(&self) -> Lease {
        self.lease
    }

    async fn release(self) -> LockResult<()> {
        release_lease(self.store.as_ref(), &self.key, self.lease).await
    }
}

/// Deletes `key` only while `lease` lies in the future.
///
/// There is a window between the expiry check and the delete in which the
/// lease can run out and be stolen; the delete would then remove the new
/// holder's record.
#[instrument(skip(store, key), fields(lock.key = %key, backend = "lease"))]
pub(crate) async fn release_lease<S: KeyValueStore>(
    store: &S,
    key: &str,
    lease: Lease,
) -> LockResult<()> {
    if lease.is_expired() {
        debug!(%lease, "lease already expired, leaving record untouched");
        return Ok(());
    }

    store.delete(key).await
}
