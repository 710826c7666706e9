//! Named lease lock.

use std::time::Duration;

use crate::client::LeaseLockClient;
use crate::error::LockResult;
use crate::handle::LeaseLockHandle;
use crate::store::KeyValueStore;
use crate::traits::DistributedLock;

/// A lock on one key with a fixed lease duration.
///
/// Created through [`LeaseLockClient::lock`] or
/// [`LockProvider::create_lock`](crate::traits::LockProvider::create_lock).
pub struct LeaseLock<S> {
    name: String,
    lease: Duration,
    client: LeaseLockClient<S>,
}

impl<S: KeyValueStore> LeaseLock<S> {
    pub(crate) fn new(name: String, lease: Duration, client: LeaseLockClient<S>) -> Self {
        Self {
            name,
            lease,
            client,
        }
    }

    /// Lease duration requested on every acquisition.
    pub fn lease(&self) -> Duration {
        self.lease
    }
}

impl<S: KeyValueStore> DistributedLock for LeaseLock<S> {
    type Handle = LeaseLockHandle<S>;

    fn name(&self) -> &str {
        &self.name
    }

    async fn acquire(&self, timeout: Duration) -> LockResult<Self::Handle> {
        self.client.acquire(&self.name, self.lease, timeout).await
    }

    async fn try_acquire(&self) -> LockResult<Option<Self::Handle>> {
        self.client.try_acquire(&self.name, self.lease).await
    }
}
