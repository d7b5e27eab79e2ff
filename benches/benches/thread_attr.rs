// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_thread_attr`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::string::String;
use std::sync::Once;

use understory_thread_attr::{
    Attribute, AttributeMetadata, AttributeRegistry, AttributeStore, ManualThreads, OsThreads,
    OwnerId,
};

fn declare() -> (AttributeRegistry, Attribute<u32>, Attribute<String>) {
    let mut registry = AttributeRegistry::new();
    let zoom = registry.declare("zoom", AttributeMetadata::new(100_u32));
    let title = registry.declare("title", AttributeMetadata::new(String::from("Sheet1")));
    (registry, zoom, title)
}

fn bench_thread_attr(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: AttributeStore<OsThreads>={} ErasedValue={}",
            core::mem::size_of::<AttributeStore<OsThreads>>(),
            core::mem::size_of::<understory_thread_attr::ErasedValue>(),
        );
    });

    let mut group = c.benchmark_group("thread_attr/read");

    group.bench_function("own_entry", |b| {
        let (registry, zoom, _) = declare();
        let store = AttributeStore::new(registry, OsThreads::new());
        let owner = OwnerId::next();
        store.set(owner, zoom, 150);
        b.iter(|| black_box(store.get(owner, zoom)));
    });

    group.bench_function("own_entry_string", |b| {
        let (registry, _, title) = declare();
        let store = AttributeStore::new(registry, OsThreads::new());
        let owner = OwnerId::next();
        store.set(owner, title, String::from("quarterly totals by region"));
        b.iter(|| black_box(store.get(owner, title)));
    });

    group.bench_function("is_defined/miss", |b| {
        let (registry, zoom, _) = declare();
        let store = AttributeStore::new(registry, OsThreads::new());
        let owner = OwnerId::next();
        b.iter(|| black_box(store.is_defined(owner, zoom)));
    });

    group.bench_function("inherit_from_primary", |b| {
        let (registry, zoom, _) = declare();
        let store = AttributeStore::new(registry, ManualThreads::new());
        let owner = OwnerId::next();
        store.set(owner, zoom, 150);
        let threads = store.threads();
        b.iter_batched(
            || threads.spawn(),
            |worker| threads.on(worker, || black_box(store.get(owner, zoom))),
            BatchSize::SmallInput,
        );
    });

    group.finish();

    let mut group = c.benchmark_group("thread_attr/write");

    group.bench_function("overwrite", |b| {
        let (registry, zoom, _) = declare();
        let store = AttributeStore::new(registry, OsThreads::new());
        let owner = OwnerId::next();
        store.set(owner, zoom, 1);
        b.iter(|| store.set(owner, zoom, black_box(2)));
    });

    for owners in [16_usize, 1024] {
        group.bench_function(BenchmarkId::new("backfill_fresh_owners", owners), |b| {
            b.iter_batched(
                || {
                    let (registry, zoom, _) = declare();
                    let store = AttributeStore::new(registry, ManualThreads::new());
                    let ids: Vec<_> = (0..owners).map(|_| OwnerId::next()).collect();
                    (store, zoom, ids)
                },
                |(store, zoom, ids)| {
                    let worker = store.threads().spawn();
                    store.threads().on(worker, || {
                        for id in &ids {
                            store.set(*id, zoom, 7);
                        }
                    });
                    black_box(store.entry_count());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_thread_attr);
criterion_main!(benches);
