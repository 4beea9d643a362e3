//! Benchmark comparison between `compact_bitvec::BitVec` and the bitvec crate

use bitvec::prelude::*;
use compact_bitvec::BitVec as CompactBitVec;
use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

// Spans the inline word and several heap sizes
const SIZES: &[usize] = &[50, 500, 5000, 50_000];

fn bench_set_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_bit");

    for &size in SIZES {
        let indices: Vec<usize> = (0..size).step_by(7).collect();
        group.throughput(Throughput::Elements(indices.len() as u64));

        group.bench_with_input(BenchmarkId::new("compact", size), &indices, |b, indices| {
            b.iter(|| {
                let mut bv = CompactBitVec::new();
                for &i in indices {
                    bv.set_bit(i);
                }
                black_box(bv)
            });
        });

        group.bench_with_input(BenchmarkId::new("bitvec", size), &indices, |b, indices| {
            b.iter(|| {
                let mut bv = BitVec::<u64, Lsb0>::new();
                for &i in indices {
                    if i >= bv.len() {
                        bv.resize(i + 1, false);
                    }
                    bv.set(i, true);
                }
                black_box(bv)
            });
        });
    }

    group.finish();
}

fn bench_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("union");

    for &size in SIZES {
        group.throughput(Throughput::Bytes((size / 8) as u64));

        let a: CompactBitVec = (0..size).step_by(2).collect();
        let b: CompactBitVec = (0..size).step_by(3).collect();
        group.bench_function(BenchmarkId::new("compact", size), |bench| {
            bench.iter(|| {
                let mut x = a.clone();
                x |= &b;
                black_box(x)
            });
        });

        let mut ba = bitvec![u64, Lsb0; 0; size];
        let mut bb = bitvec![u64, Lsb0; 0; size];
        for i in (0..size).step_by(2) {
            ba.set(i, true);
        }
        for i in (0..size).step_by(3) {
            bb.set(i, true);
        }
        group.bench_function(BenchmarkId::new("bitvec", size), |bench| {
            bench.iter(|| {
                let mut x = ba.clone();
                x |= bb.as_bitslice();
                black_box(x)
            });
        });
    }

    group.finish();
}

fn bench_iterate_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter_ones");

    for &size in SIZES {
        let indices: Vec<usize> = (0..size).step_by(11).collect();
        group.throughput(Throughput::Elements(indices.len() as u64));

        let compact: CompactBitVec = indices.iter().copied().collect();
        group.bench_function(BenchmarkId::new("compact", size), |b| {
            b.iter(|| compact.iter().fold(0usize, |acc, i| acc ^ black_box(i)));
        });

        let mut other = bitvec![u64, Lsb0; 0; size];
        for &i in &indices {
            other.set(i, true);
        }
        group.bench_function(BenchmarkId::new("bitvec", size), |b| {
            b.iter(|| other.iter_ones().fold(0usize, |acc, i| acc ^ black_box(i)));
        });
    }

    group.finish();
}

fn bench_count_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_ones");

    for &size in SIZES {
        let compact: CompactBitVec = (0..size).step_by(5).collect();
        group.bench_function(BenchmarkId::new("compact", size), |b| {
            b.iter(|| black_box(compact.count_ones()));
        });

        let mut other = bitvec![u64, Lsb0; 0; size];
        for i in (0..size).step_by(5) {
            other.set(i, true);
        }
        group.bench_function(BenchmarkId::new("bitvec", size), |b| {
            b.iter(|| black_box(other.count_ones()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_set_bits,
    bench_union,
    bench_iterate_ones,
    bench_count_ones
);
criterion_main!(benches);
