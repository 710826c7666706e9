//! Convenience prelude for lease lock types.

pub use crate::client::{LeaseLockClient, LeaseLockClientBuilder};
pub use crate::error::{LockError, LockResult};
pub use crate::handle::LeaseLockHandle;
pub use crate::lease::Lease;
pub use crate::lock::LeaseLock;
pub use crate::store::KeyValueStore;
pub use crate::traits::{DistributedLock, LockHandle, LockProvider, LockProviderExt};
