//! Core coordinator, traits and types for lease locks.

pub mod client;
pub mod error;
pub mod handle;
pub mod lease;
pub mod lock;
pub mod memory;
pub mod prelude;
pub mod store;
pub mod timeout;
pub mod traits;

pub use error::{LockError, LockResult};
pub use memory::MemoryStore;
pub use prelude::*;
