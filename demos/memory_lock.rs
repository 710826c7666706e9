//! Example: Lease locks over an in-process store
//!
//! Run with: `cargo run --example memory_lock`

use lease_lock::prelude::*;
use lease_lock::MemoryStore;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let client = LeaseLockClient::builder()
        .store(MemoryStore::new())
        .lease(Duration::from_millis(300))
        .build()?;

    let lock = client.create_lock("example-resource");
    let first = lock.acquire(Duration::ZERO).await?;
    println!("First holder acquired lease {}", first.lease());

    // Never released: the second caller waits for the lease to run out
    let second = lock.acquire(Duration::from_secs(1)).await?;
    println!("Second holder took over with lease {}", second.lease());

    match lock.acquire(Duration::ZERO).await {
        Err(e) if e.is_timeout() => println!("Third caller refused: {e}"),
        other => println!("Unexpected result: {other:?}"),
    }

    // Releasing the expired handle leaves the second holder's record alone
    first.release().await?;
    second.release().await?;
    println!("Released");

    Ok(())
}
