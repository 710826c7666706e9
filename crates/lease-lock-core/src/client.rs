//! Lease lock coordinator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{Span, debug, field, instrument, warn};

use crate::error::{LockError, LockResult};
use crate::handle::{LeaseLockHandle, release_lease};
use crate::lease::{DEFAULT_LEASE, Lease};
use crate::lock::LeaseLock;
use crate::store::KeyValueStore;
use crate::timeout::{DEFAULT_STEP, PollDeadline};
use crate::traits::LockProvider;

/// Builder for [`LeaseLockClient`] configuration.
pub struct LeaseLockClientBuilder<S> {
    store: Option<Arc<S>>,
    step: Duration,
    lease: Duration,
}

impl<S: KeyValueStore> LeaseLockClientBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            store: None,
            step: DEFAULT_STEP,
            lease: DEFAULT_LEASE,
        }
    }

    /// Sets the store holding lock records.
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Uses a store already shared with other components.
    pub fn shared_store(mut self, store: Arc<S>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets how long a polling acquisition suspends between attempts.
    pub fn step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Sets the lease duration for locks created through [`LockProvider`].
    pub fn lease(mut self, lease: Duration) -> Self {
        self.lease = lease;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no store was configured.
    pub fn build(self) -> LockResult<LeaseLockClient<S>> {
        let store = self
            .store
            .ok_or_else(|| LockError::InvalidName("no key-value store provided".to_string()))?;

        Ok(LeaseLockClient {
            store,
            step: self.step,
            lease: self.lease,
        })
    }
}

impl<S: KeyValueStore> Default for LeaseLockClientBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Acquires and releases lease locks held in a [`KeyValueStore`].
///
/// The client keeps no local lock state: every decision is made against the
/// store, relying on its atomic `set_if_absent` and `get_and_set`. Each
/// caller drives its own polling loop.
pub struct LeaseLockClient<S> {
    store: Arc<S>,
    step: Duration,
    lease: Duration,
}

impl<S> Clone for LeaseLockClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            step: self.step,
            lease: self.lease,
        }
    }
}

impl<S: KeyValueStore> LeaseLockClient<S> {
    /// Returns a new builder for configuring the client.
    pub fn builder() -> LeaseLockClientBuilder<S> {
        LeaseLockClientBuilder::new()
    }

    /// Creates a client with default settings over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            step: DEFAULT_STEP,
            lease: DEFAULT_LEASE,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Suspension between polling attempts.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Lease duration used by [`LockProvider::create_lock`].
    pub fn default_lease(&self) -> Duration {
        self.lease
    }

    /// Creates a named lock with a specific lease duration.
    pub fn lock(&self, name: &str, lease: Duration) -> LeaseLock<S> {
        LeaseLock::new(name.to_string(), lease, self.clone())
    }

    /// Acquires `key` for `lease`, polling for up to `timeout`.
    ///
    /// A `lease` under one millisecond is replaced by a one second lease. A
    /// zero `timeout` makes exactly one attempt and fails with
    /// [`LockError::Timeout`] if the key is held. Store errors end the call
    /// immediately.
    pub async fn acquire(
        &self,
        key: &str,
        lease: Duration,
        timeout: Duration,
    ) -> LockResult<LeaseLockHandle<S>> {
        // Not used for plain acquire, but required by the polling loop
        let (_cancel_sender, cancel_receiver) = watch::channel(false);
        self.acquire_with_cancel(key, lease, timeout, &cancel_receiver)
            .await
    }

    /// Like [`acquire`](Self::acquire), but gives up with
    /// [`LockError::Cancelled`] once `cancel` reads `true`.
    ///
    /// The flag is observed before each attempt and while suspended between
    /// attempts, never in the middle of one.
    #[instrument(
        skip(self, key, cancel),
        fields(
            lock.key = %key,
            backend = "lease",
            acquired = field::Empty,
            attempts = field::Empty,
        )
    )]
    pub async fn acquire_with_cancel(
        &self,
        key: &str,
        lease: Duration,
        timeout: Duration,
        cancel: &watch::Receiver<bool>,
    ) -> LockResult<LeaseLockHandle<S>> {
        let deadline = PollDeadline::start(timeout);
        let mut attempts: u64 = 0;

        loop {
            if is_cancelled(cancel) {
                Span::current().record("acquired", false);
                return Err(LockError::Cancelled);
            }

            attempts += 1;
            if let Some(acquired) = self.attempt(key, lease).await? {
                Span::current().record("acquired", true);
                Span::current().record("attempts", attempts);
                return Ok(self.handle(key, acquired));
            }

            if deadline.is_single_attempt() {
                break;
            }

            debug!(attempts, "lock held, retrying after {:?}", self.step);
            self.pause(cancel).await?;

            if deadline.has_elapsed() {
                break;
            }
        }

        Span::current().record("acquired", false);
        Span::current().record("attempts", attempts);
        Err(LockError::Timeout(deadline.budget()))
    }

    /// Makes a single acquisition attempt.
    ///
    /// Returns `Ok(None)` when the key is held by an unexpired lease.
    #[instrument(skip(self, key), fields(lock.key = %key, backend = "lease"))]
    pub async fn try_acquire(
        &self,
        key: &str,
        lease: Duration,
    ) -> LockResult<Option<LeaseLockHandle<S>>> {
        Ok(self
            .attempt(key, lease)
            .await?
            .map(|acquired| self.handle(key, acquired)))
    }

    /// Deletes the lock record if `handle`'s lease has not yet expired.
    ///
    /// An expired handle is released as a no-op. The delete does not check
    /// that the stored value still matches the handle.
    pub async fn release(&self, handle: LeaseLockHandle<S>) -> LockResult<()> {
        release_lease(self.store.as_ref(), handle.key(), handle.lease()).await
    }

    fn handle(&self, key: &str, lease: Lease) -> LeaseLockHandle<S> {
        LeaseLockHandle::new(key.to_string(), lease, Arc::clone(&self.store))
    }

    // A lost steal has still overwritten the record; the winner's own write
    // replaces it.
    async fn attempt(&self, key: &str, duration: Duration) -> LockResult<Option<Lease>> {
        let candidate = Lease::expiring_in(duration);
        if self
            .store
            .set_if_absent(key, candidate.as_nanos(), None)
            .await?
        {
            return Ok(Some(candidate));
        }

        let current = match self.store.get(key).await {
            Ok(Some(value)) => Lease::from_nanos(value),
            Ok(None) => {
                // Released between the two calls; the key is free again
                debug!("lock record vanished before it could be read");
                let candidate = Lease::expiring_in(duration);
                let written = self
                    .store
                    .set_if_absent(key, candidate.as_nanos(), None)
                    .await?;
                return Ok(written.then_some(candidate));
            }
            Err(e) => {
                warn!(error = %e, "failed to read current lease");
                return Err(e);
            }
        };

        if !current.is_expired() {
            return Ok(None);
        }

        let candidate = Lease::expiring_in(duration);
        let previous = self
            .store
            .get_and_set(key, candidate.as_nanos())
            .await
            .inspect_err(|e| warn!(error = %e, "failed to swap expired lease"))?;

        match previous.map(Lease::from_nanos) {
            Some(previous) if !previous.is_expired() => {
                debug!(%previous, "lost race for expired lease");
                Ok(None)
            }
            _ => {
                debug!(expired = %current, "took over expired lease");
                Ok(Some(candidate))
            }
        }
    }

    async fn pause(&self, cancel: &watch::Receiver<bool>) -> LockResult<()> {
        let mut cancel = cancel.clone();
        let sleep = tokio::time::sleep(self.step);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return Ok(()),
                changed = cancel.changed() => {
                    if changed.is_err() {
                        // Sender dropped; nobody can cancel any more
                        (&mut sleep).await;
                        return Ok(());
                    }
                    if is_cancelled(&cancel) {
                        return Err(LockError::Cancelled);
                    }
                }
            }
        }
    }
}

fn is_cancelled(cancel: &watch::Receiver<bool>) -> bool {
    *cancel.borrow()
}

impl<S: KeyValueStore> LockProvider for LeaseLockClient<S> {
    type Lock = LeaseLock<S>;

    fn create_lock(&self, name: &str) -> Self::Lock {
        self.lock(name, self.lease)
    }
}
