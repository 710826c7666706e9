//! Redis key-value store implementation.

use std::time::Duration;

use fred::prelude::*;
use lease_lock_core::error::{LockError, LockResult};
use lease_lock_core::store::KeyValueStore;
use tracing::{instrument, warn};

use crate::provider::RedisLeaseStoreBuilder;

/// A [`KeyValueStore`] backed by a single Redis server.
///
/// Lease values are stored as decimal strings. `set_if_absent` maps to
/// `SET NX` and `get_and_set` to `GETSET`, both atomic on the server.
#[derive(Clone)]
pub struct RedisLeaseStore {
    client: RedisClient,
}

impl RedisLeaseStore {
    /// Returns a new builder for configuring the store.
    pub fn builder() -> RedisLeaseStoreBuilder {
        RedisLeaseStoreBuilder::new()
    }

    /// Connects to the Redis server at `url`.
    pub async fn new(url: impl Into<String>) -> LockResult<Self> {
        Self::builder().url(url).build().await
    }

    /// Wraps an already connected client.
    pub fn from_client(client: RedisClient) -> Self {
        Self { client }
    }

    /// The underlying Redis client.
    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

fn expiration(ttl: Option<Duration>) -> Option<Expiration> {
    ttl.filter(|ttl| !ttl.is_zero())
        .map(|ttl| Expiration::PX(i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)))
}

fn command_error(command: &'static str) -> impl Fn(RedisError) -> LockError {
    move |e| {
        warn!(command, error = %e, "redis command failed");
        LockError::Backend(Box::new(e))
    }
}

/// Decodes a stored lease value.
pub(crate) fn parse_lease(key: &str, value: Option<String>) -> LockResult<Option<i64>> {
    value
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| LockError::InvalidLease {
                    key: key.to_string(),
                    value: raw,
                })
        })
        .transpose()
}

impl KeyValueStore for RedisLeaseStore {
    #[instrument(skip(self), fields(backend = "redis"))]
    async fn set_if_absent(&self, key: &str, value: i64, ttl: Option<Duration>) -> LockResult<bool> {
        // SET NX returns Some("OK") if the key was set, None if it already exists
        let result: Option<String> = self
            .client
            .set(key, value, expiration(ttl), Some(SetOptions::NX), false)
            .await
            .map_err(command_error("SET NX"))?;

        Ok(result.is_some())
    }

    #[instrument(skip(self), fields(backend = "redis"))]
    async fn get(&self, key: &str) -> LockResult<Option<i64>> {
        let value: Option<String> = self.client.get(key).await.map_err(command_error("GET"))?;
        parse_lease(key, value)
    }

    #[instrument(skip(self), fields(backend = "redis"))]
    async fn get_and_set(&self, key: &str, value: i64) -> LockResult<Option<i64>> {
        let previous: Option<String> = self
            .client
            .getset(key, value)
            .await
            .map_err(command_error("GETSET"))?;
        parse_lease(key, previous)
    }

    #[instrument(skip(self), fields(backend = "redis"))]
    async fn delete(&self, key: &str) -> LockResult<()> {
        let _: i64 = self.client.del(key).await.map_err(command_error("DEL"))?;
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "redis"))]
    async fn set(&self, key: &str, value: i64, ttl: Option<Duration>) -> LockResult<()> {
        let _: Option<String> = self
            .client
            .set(key, value, expiration(ttl), None, false)
            .await
            .map_err(command_error("SET"))?;
        Ok(())
    }
}
