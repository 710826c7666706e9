//! Benchmarks for lock acquisition latency

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lease_lock_core::lease::Lease;
use lease_lock_core::prelude::*;
use lease_lock_core::MemoryStore;
use std::time::Duration;

fn bench_memory_lock_acquisition(c: &mut Criterion) {
    let client = LeaseLockClient::new(MemoryStore::new());

    let mut group = c.benchmark_group("memory_lock");
    group.bench_function("acquire_release", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap())
            .iter(|| async {
                if let Ok(handle) = client
                    .acquire("bench-lock", Duration::from_secs(1), Duration::ZERO)
                    .await
                {
                    let _ = client.release(handle).await;
                }
            });
    });

    group.bench_function("try_acquire_held", |b| {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            client
                .store()
                .set("bench-held", Lease::now().plus(Duration::from_secs(3600)).as_nanos(), None)
                .await
                .unwrap();
        });
        b.to_async(runtime).iter(|| async {
            black_box(client.try_acquire("bench-held", Duration::from_secs(1)).await)
        });
    });

    group.bench_function("take_over_expired", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap())
            .iter(|| async {
                let _ = client.store().set("bench-stale", 0, None).await;
                black_box(
                    client
                        .acquire("bench-stale", Duration::from_secs(1), Duration::ZERO)
                        .await,
                )
            });
    });

    group.finish();
}

criterion_group!(benches, bench_memory_lock_acquisition);
criterion_main!(benches);
