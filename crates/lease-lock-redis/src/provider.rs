//! Redis store configuration.

use fred::prelude::*;
use lease_lock_core::client::LeaseLockClient;
use lease_lock_core::error::{LockError, LockResult};

use crate::store::RedisLeaseStore;

/// Lease lock client over Redis.
pub type RedisLeaseLockClient = LeaseLockClient<RedisLeaseStore>;

/// Builder for Redis store configuration.
pub struct RedisLeaseStoreBuilder {
    url: Option<String>,
    client: Option<RedisClient>,
}

impl RedisLeaseStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            client: None,
        }
    }

    /// Sets the Redis server URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Uses an existing Redis client. Takes precedence over [`url`](Self::url).
    pub fn client(mut self, client: RedisClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the store, connecting to Redis if a URL was given.
    pub async fn build(self) -> LockResult<RedisLeaseStore> {
        if let Some(client) = self.client {
            return Ok(RedisLeaseStore::from_client(client));
        }

        let url = self
            .url
            .ok_or_else(|| LockError::InvalidName("no Redis client or URL provided".to_string()))?;

        let config = RedisConfig::from_url(&url).map_err(|e| {
            LockError::Connection(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid Redis URL: {}", e),
            )))
        })?;

        let client = RedisClient::new(config, None, None, None);
        client.connect();
        client.wait_for_connect().await.map_err(|e| {
            LockError::Connection(Box::new(std::io::Error::other(format!(
                "failed to connect to Redis: {}",
                e
            ))))
        })?;

        Ok(RedisLeaseStore::from_client(client))
    }

    /// Builds the store and wraps it in a lease lock client with default
    /// settings.
    pub async fn build_client(self) -> LockResult<RedisLeaseLockClient> {
        Ok(LeaseLockClient::new(self.build().await?))
    }
}

impl Default for RedisLeaseStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
