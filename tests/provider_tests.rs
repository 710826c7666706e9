//! Tests for provider abstraction.

use lease_lock_core::traits::{DistributedLock, LockHandle, LockProvider, LockProviderExt};
use lease_lock_core::{LeaseLockClient, LockError, MemoryStore};
use std::time::Duration;

/// Tests that any provider can be used with the same code.
async fn test_provider_abstraction_with_name<P: LockProvider>(provider: &P, name: &str)
where
    P::Lock: DistributedLock,
{
    let lock = provider.create_lock(name);
    assert_eq!(lock.name(), name);

    let handle = lock.try_acquire().await.unwrap();
    assert!(handle.is_some());

    // Held until released
    assert!(lock.try_acquire().await.unwrap().is_none());
    handle.unwrap().release().await.unwrap();

    let handle2 = lock.try_acquire().await.unwrap();
    assert!(handle2.is_some());
}

/// Tests provider extension methods work with any provider.
async fn test_provider_extensions_with_name<P: LockProvider + LockProviderExt>(
    provider: &P,
    name: &str,
) where
    P::Lock: DistributedLock,
{
    let handle = provider
        .acquire_lock(name, Duration::from_millis(100))
        .await;
    assert!(handle.is_ok());

    // Should be None because lock is held
    let handle2 = provider.try_acquire_lock(name).await.unwrap();
    assert!(handle2.is_none());

    let err = provider
        .acquire_lock(name, Duration::from_millis(150))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, LockError::Timeout(_)));
}

#[tokio::test]
async fn test_memory_provider_abstraction() {
    let provider = LeaseLockClient::new(MemoryStore::new());
    test_provider_abstraction_with_name(&provider, "test-resource").await;
}

#[tokio::test]
async fn test_memory_provider_extensions() {
    let provider = LeaseLockClient::builder()
        .store(MemoryStore::new())
        .lease(Duration::from_secs(10))
        .step(Duration::from_millis(20))
        .build()
        .unwrap();
    test_provider_extensions_with_name(&provider, "test-resource-extensions").await;
}

#[tokio::test]
async fn test_provider_lease_expiry() {
    let provider = LeaseLockClient::builder()
        .store(MemoryStore::new())
        .lease(Duration::from_millis(50))
        .step(Duration::from_millis(10))
        .build()
        .unwrap();
    let lock = provider.create_lock("short-lease");

    let first = lock.acquire(Duration::ZERO).await.unwrap();
    let second = lock.acquire(Duration::from_secs(1)).await.unwrap();

    assert!(first.is_expired());
    assert!(second.lease() > first.lease());

    // Expired handle is a no-op; the live one clears the key
    first.release().await.unwrap();
    assert!(!provider.store().is_empty());
    second.release().await.unwrap();
    assert!(provider.store().is_empty());
}

#[tokio::test]
async fn test_clients_sharing_a_store_exclude_each_other() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let a = LeaseLockClient::builder()
        .shared_store(store.clone())
        .build()
        .unwrap();
    let b = LeaseLockClient::builder()
        .shared_store(store)
        .build()
        .unwrap();

    let handle = a.acquire_lock("shared-resource", Duration::ZERO).await.unwrap();
    assert!(b.try_acquire_lock("shared-resource").await.unwrap().is_none());
    handle.release().await.unwrap();
    assert!(b.try_acquire_lock("shared-resource").await.unwrap().is_some());
}
