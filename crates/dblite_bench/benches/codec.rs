//! CBOR codec benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dblite_bench::{populated_fields, random_data, record};
use dblite_codec::{from_cbor, to_cbor, Encoder, Value};
use dblite_core::snapshot;
use std::path::Path;

/// Create a complex nested value.
fn complex_value(depth: usize, width: usize) -> Value {
    if depth == 0 {
        Value::Text("leaf".into())
    } else {
        let children: Vec<(Value, Value)> = (0..width)
            .map(|i| {
                (
                    Value::Text(format!("key_{i}")),
                    complex_value(depth - 1, width),
                )
            })
            .collect();
        Value::Map(children)
    }
}

/// Benchmark encoding simple values.
fn bench_encode_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    group.bench_function("integer", |b| {
        let value = Value::Integer(42);
        b.iter(|| black_box(to_cbor(black_box(&value)).unwrap()));
    });

    group.bench_function("float", |b| {
        let value = Value::Float(1.5);
        b.iter(|| black_box(to_cbor(black_box(&value)).unwrap()));
    });

    group.bench_function("record", |b| {
        let value = record(7);
        b.iter(|| black_box(to_cbor(black_box(&value)).unwrap()));
    });

    group.finish();
}

/// Benchmark encoding with varying sizes.
fn bench_encode_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_size");

    for size in [64usize, 1024, 16384] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let value = Value::Bytes(random_data(size));
            b.iter(|| black_box(to_cbor(black_box(&value)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark decoding.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function("record", |b| {
        let encoded = to_cbor(&record(7)).unwrap();
        b.iter(|| black_box(from_cbor(black_box(&encoded)).unwrap()));
    });

    group.bench_function("complex_depth3_width5", |b| {
        let encoded = to_cbor(&complex_value(3, 5)).unwrap();
        b.iter(|| black_box(from_cbor(black_box(&encoded)).unwrap()));
    });

    group.finish();
}

/// Benchmark snapshot encoding of whole stores.
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for entries in [10usize, 100, 1000] {
        let fields = populated_fields(4, entries);
        let value = snapshot::to_value(Path::new("bench.dbl"), None, &fields);
        let encoded = snapshot::encode(&value).unwrap();
        group.throughput(Throughput::Bytes(encoded.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", entries), &value, |b, value| {
            b.iter(|| black_box(snapshot::encode(black_box(value)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", entries), &encoded, |b, encoded| {
            b.iter(|| black_box(snapshot::decode(black_box(encoded)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark encoder reuse.
fn bench_encoder_reuse(c: &mut Criterion) {
    c.bench_function("encoder_reuse_100", |b| {
        let values: Vec<_> = (0..100).map(Value::Integer).collect();

        b.iter(|| {
            let mut encoder = Encoder::new();
            for value in &values {
                encoder.encode(black_box(value)).unwrap();
            }
            black_box(encoder.into_bytes());
        });
    });
}

criterion_group!(
    benches,
    bench_encode_simple,
    bench_encode_size,
    bench_decode,
    bench_snapshot,
    bench_encoder_reuse,
);

criterion_main!(benches);
