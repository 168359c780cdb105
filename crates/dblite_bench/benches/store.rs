//! Store persistence benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dblite_bench::{populated_fields, record};
use dblite_core::{Config, Pin, Store};
use dblite_storage::InMemoryBackend;
use tempfile::TempDir;

/// Benchmark persisting to memory, isolating encoding cost.
fn bench_persist_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("persist_memory");

    for entries in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(entries), &entries, |b, &entries| {
            let mut store = Store::create_with_backend(
                "bench.dbl",
                None,
                populated_fields(4, entries),
                InMemoryBackend::new(),
            )
            .unwrap();
            b.iter(|| store.persist().unwrap());
        });
    }

    group.finish();
}

/// Benchmark persisting to a file, with and without fsync.
fn bench_persist_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("persist_file");
    group.sample_size(20);

    for sync in [false, true] {
        group.bench_with_input(BenchmarkId::new("sync", sync), &sync, |b, &sync| {
            let dir = TempDir::new().unwrap();
            let config = Config::new().sync_on_persist(sync);
            let mut store = Store::create_with_config(
                dir.path().join("bench.dbl"),
                None,
                populated_fields(4, 100),
                config,
            )
            .unwrap();
            b.iter(|| store.persist().unwrap());
        });
    }

    group.finish();
}

/// Benchmark connecting to a persisted file.
fn bench_connect(c: &mut Criterion) {
    let mut group = c.benchmark_group("connect");

    for entries in [10usize, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(entries), &entries, |b, &entries| {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("bench.dbl");
            let pin = Some(Pin::new(1234));
            Store::create(&path, pin, populated_fields(4, entries)).unwrap();

            b.iter(|| black_box(Store::connect(&path, pin).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark in-memory entry operations.
fn bench_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("entries");

    group.bench_function("get_last_of_1000", |b| {
        let store = Store::create_with_backend(
            "bench.dbl",
            None,
            populated_fields(1, 1000),
            InMemoryBackend::new(),
        )
        .unwrap();
        b.iter(|| black_box(store.get("field_0", black_box(999)).unwrap()));
    });

    group.bench_function("add_overwrite", |b| {
        let mut store = Store::create_with_backend(
            "bench.dbl",
            None,
            populated_fields(1, 100),
            InMemoryBackend::new(),
        )
        .unwrap();
        b.iter(|| store.add("field_0", record(50), black_box(50)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_persist_memory,
    bench_persist_file,
    bench_connect,
    bench_entries,
);

criterion_main!(benches);
