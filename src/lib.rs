//! Lease-based mutual exclusion locks held in a shared key-value store.
//!
//! A lock is a single key whose value is the timestamp at which the current
//! hold expires. Acquiring writes the key if it is absent, or takes it over
//! once the stored lease has passed. Holders that crash without releasing
//! are recovered from automatically when their lease runs out.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lease_lock::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RedisLeaseStore::builder()
//!         .url("redis://localhost:6379")
//!         .build_client()
//!         .await?;
//!
//!     // Hold "my-resource" for up to 10 seconds, polling for up to 5
//!     let handle = client
//!         .acquire("my-resource", Duration::from_secs(10), Duration::from_secs(5))
//!         .await?;
//!
//!     // Critical section
//!
//!     client.release(handle).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Guarantees
//!
//! This is best-effort mutual exclusion on a single store. The lease value
//! is not an identity token, no fencing tokens are handed out, and there is
//! no multi-node quorum. Releasing only checks that the handle's own lease
//! has not yet expired.
//!
//! # Crate Organization
//!
//! This is a meta-crate that re-exports types from:
//! - `lease-lock-core`: coordinator, traits, error types and an in-memory store
//! - `lease-lock-redis`: Redis store

// Re-export core types and traits
#[allow(ambiguous_glob_reexports)]
pub use lease_lock_core::*;

// Re-export redis backend
#[allow(ambiguous_glob_reexports)]
pub use lease_lock_redis::*;
