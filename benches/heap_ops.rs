//! Criterion benchmarks for the instrumented max-heap
//!
//! Exercises bulk construction, insertion, extraction, and increase-key over
//! the input distributions used for the empirical analysis: random, sorted,
//! reverse-sorted, nearly-sorted (n/20 random transpositions), and
//! duplicate-heavy (n/10 distinct values). The RNG is seeded so runs are
//! reproducible.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use instrumented_maxheap::MaxHeap;

const SIZES: &[usize] = &[100, 1_000, 10_000];

const DISTRIBUTIONS: &[&str] = &["random", "sorted", "reverse", "nearly-sorted", "duplicates"];

fn generate(size: usize, distribution: &str) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(42);
    match distribution {
        "random" => (0..size).map(|_| rng.gen_range(0..size as i32 * 10)).collect(),
        "sorted" => (0..size as i32).collect(),
        "reverse" => (0..size as i32).rev().collect(),
        "nearly-sorted" => {
            let mut values: Vec<i32> = (0..size as i32).collect();
            for _ in 0..size / 20 {
                let i = rng.gen_range(0..size);
                let j = rng.gen_range(0..size);
                values.swap(i, j);
            }
            values
        }
        "duplicates" => {
            let distinct = (size / 10).max(1) as i32;
            (0..size).map(|_| rng.gen_range(0..distinct)).collect()
        }
        other => panic!("unknown distribution: {other}"),
    }
}

fn bench_build_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_heap");
    for &size in SIZES {
        for &distribution in DISTRIBUTIONS {
            let input = generate(size, distribution);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                BenchmarkId::new(distribution, size),
                &input,
                |b, input| b.iter(|| MaxHeap::from_slice(black_box(input))),
            );
        }
    }
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in SIZES {
        for &distribution in DISTRIBUTIONS {
            let input = generate(size, distribution);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                BenchmarkId::new(distribution, size),
                &input,
                |b, input| {
                    b.iter(|| {
                        let mut heap = MaxHeap::with_capacity(input.len() * 2).unwrap();
                        for &value in input {
                            heap.insert(black_box(value));
                        }
                        heap
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_extract_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_max");
    for &size in SIZES {
        for &distribution in DISTRIBUTIONS {
            let input = generate(size, distribution);
            // Extract half the elements, as the original analysis did.
            let extract_count = size / 2;
            group.throughput(Throughput::Elements(extract_count as u64));
            group.bench_with_input(
                BenchmarkId::new(distribution, size),
                &input,
                |b, input| {
                    b.iter_batched(
                        || MaxHeap::from_slice(input),
                        |mut heap| {
                            for _ in 0..extract_count {
                                black_box(heap.extract_max().unwrap());
                            }
                            heap
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }
    group.finish();
}

fn bench_increase_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("increase_key");
    for &size in SIZES {
        for &distribution in DISTRIBUTIONS {
            let input = generate(size, distribution);
            let op_count = 100.min(size / 10);
            let mut rng = StdRng::seed_from_u64(42);
            let ops: Vec<(usize, i32)> = (0..op_count)
                .map(|_| (rng.gen_range(0..size), rng.gen_range(0..1_000_000)))
                .collect();
            group.throughput(Throughput::Elements(op_count as u64));
            group.bench_with_input(
                BenchmarkId::new(distribution, size),
                &(input, ops),
                |b, (input, ops)| {
                    b.iter_batched(
                        || MaxHeap::from_slice(input),
                        |mut heap| {
                            for &(index, value) in ops {
                                // Rejected key decreases are expected events.
                                let _ = heap.increase_key(index, value);
                            }
                            heap
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build_heap,
    bench_insert,
    bench_extract_max,
    bench_increase_key
);
criterion_main!(benches);
