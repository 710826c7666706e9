//! Example: Using Redis lease locks
//!
//! Run with: `cargo run --example redis_lock`
//!
//! Requires a Redis server. Set REDIS_URL environment variable
//! or modify the URL below.

use lease_lock::RedisLeaseStore;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Get Redis URL from environment or use default
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    println!("Connecting to Redis...");
    let client = RedisLeaseStore::builder()
        .url(&redis_url)
        .build_client()
        .await?;

    // Hold the lease for 10 seconds, waiting up to 5 seconds to get it
    println!("Acquiring lock with 5 second timeout...");
    let handle = client
        .acquire("example-resource", Duration::from_secs(10), Duration::from_secs(5))
        .await?;
    println!("Lock acquired until {}", handle.lease());

    println!("Doing work...");
    tokio::time::sleep(Duration::from_secs(1)).await;

    client.release(handle).await?;
    println!("Lock released");

    Ok(())
}
