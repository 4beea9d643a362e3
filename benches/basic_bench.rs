use compact_bitvec::BitVec;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_bit_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_access");

    group.bench_function("set_inline", |b| {
        let mut bv = BitVec::new();
        let mut i = 0;
        b.iter(|| {
            bv.set_bit(black_box(i % 64));
            i += 1;
        });
    });

    group.bench_function("set_spilled", |b| {
        let mut bv = BitVec::new();
        bv.set_bit(500);
        let mut i = 0;
        b.iter(|| {
            bv.set_bit(black_box(i % 500));
            i += 1;
        });
    });

    group.bench_function("get_spilled", |b| {
        let bv: BitVec = (0..500).step_by(2).collect();
        let mut i = 0;
        b.iter(|| {
            black_box(bv.get(i % 500));
            i += 1;
        });
    });

    group.bench_function("grow_from_empty", |b| {
        b.iter(|| {
            let mut bv = BitVec::new();
            for i in (0..10_000).step_by(97) {
                bv.set_bit(i);
            }
            black_box(bv)
        });
    });

    group.finish();
}

fn bench_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("fields");
    let mut bv = BitVec::from_range(0, 1024);

    for width in [8usize, 64, 128] {
        group.bench_with_input(BenchmarkId::new("get_range", width), &width, |b, &width| {
            let mut start = 0;
            b.iter(|| {
                black_box(bv.get_range(start % 800, width));
                start += 13;
            });
        });
    }

    group.bench_function("put_range_straddling", |b| {
        let mut value = 0u128;
        b.iter(|| {
            bv.put_range(black_box(60), 72, value);
            value = value.wrapping_add(0x9E37_79B9);
        });
    });

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for size in [64usize, 500, 5000] {
        let bv: BitVec = (0..size).step_by(3).collect();

        group.bench_with_input(BenchmarkId::new("forward", size), &bv, |b, bv| {
            b.iter(|| {
                for bit in bv {
                    black_box(bit);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("reverse", size), &bv, |b, bv| {
            b.iter(|| {
                for bit in bv.iter().rev() {
                    black_box(bit);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("positions", size), &bv, |b, bv| {
            b.iter(|| {
                let mut pos = bv.min_bit();
                while let Some(i) = pos.index() {
                    black_box(i);
                    pos.advance();
                }
            });
        });
    }

    group.finish();
}

fn bench_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");

    for size in [64usize, 1000, 10_000] {
        let a: BitVec = (0..size).step_by(2).collect();
        let b: BitVec = (0..size).step_by(3).collect();

        group.bench_with_input(BenchmarkId::new("union_with", size), &size, |bench, _| {
            bench.iter(|| {
                let mut x = a.clone();
                black_box(x.union_with(&b))
            });
        });

        group.bench_with_input(BenchmarkId::new("intersect_with", size), &size, |bench, _| {
            bench.iter(|| {
                let mut x = a.clone();
                black_box(x.intersect_with(&b))
            });
        });

        group.bench_with_input(BenchmarkId::new("contains", size), &size, |bench, _| {
            bench.iter(|| black_box(a.contains(&b)));
        });

        group.bench_with_input(BenchmarkId::new("count_ones", size), &size, |bench, _| {
            bench.iter(|| black_box(a.count_ones()));
        });
    }

    group.finish();
}

fn bench_shifts(c: &mut Criterion) {
    let mut group = c.benchmark_group("shifts");
    let bv: BitVec = (0..2000).step_by(7).collect();

    group.bench_function("shl_unaligned", |b| {
        b.iter(|| black_box(&bv << black_box(37)));
    });

    group.bench_function("shr_unaligned", |b| {
        b.iter(|| black_box(&bv >> black_box(37)));
    });

    group.bench_function("rotate_window", |b| {
        b.iter(|| black_box(bv.rotate_right_copy(100, 400, 1500)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_bit_access,
    bench_fields,
    bench_iteration,
    bench_algebra,
    bench_shifts
);
criterion_main!(benches);
