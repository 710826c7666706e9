//! Redis backend for lease locks.

pub mod provider;
pub mod store;

pub use provider::{RedisLeaseLockClient, RedisLeaseStoreBuilder};
pub use store::RedisLeaseStore;
