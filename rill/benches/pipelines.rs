// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rill::prelude::*;

fn bench_sequential_fused_chain(c: &mut Criterion) {
    c.bench_function("sequential_filter_map_sum_1m", |b| {
        b.iter(|| {
            I64Stream::range(0, 1_000_000)
                .filter(|n| n % 2 == 0)
                .map(|n| n * 2)
                .sum()
                .unwrap()
        })
    });
}

fn bench_parallel_fused_chain(c: &mut Criterion) {
    c.bench_function("parallel_filter_map_sum_1m", |b| {
        b.iter(|| {
            I64Stream::range(0, 1_000_000)
                .parallel()
                .filter(|n| n % 2 == 0)
                .map(|n| n * 2)
                .sum()
                .unwrap()
        })
    });
}

fn bench_parallel_sorted_boundary(c: &mut Criterion) {
    let items: Vec<i64> = (0..200_000).rev().collect();
    c.bench_function("parallel_sorted_200k", |b| {
        b.iter(|| {
            sources::from_vec(black_box(items.clone()))
                .parallel()
                .map_to_i64(|v| v)
                .sorted()
                .to_vec()
                .unwrap()
        })
    });
}

fn bench_short_circuit_find(c: &mut Criterion) {
    c.bench_function("parallel_find_first_in_1m", |b| {
        b.iter(|| {
            I64Stream::range(0, 1_000_000)
                .parallel()
                .filter(|n| *n == 900_000)
                .find_first()
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_sequential_fused_chain,
    bench_parallel_fused_chain,
    bench_parallel_sorted_boundary,
    bench_short_circuit_find
);
criterion_main!(benches);
