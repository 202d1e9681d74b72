//! Benchmarks for arrangement generation.
//!
//! Run with: cargo bench -p tilemorph-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tilemorph_layout::{Arrangement, TargetSet, TargetSets};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/generate");
    for n in [20, 200, 2_000] {
        for arrangement in Arrangement::ALL {
            group.bench_with_input(BenchmarkId::new(arrangement.name(), n), &n, |b, &n| {
                b.iter(|| black_box(TargetSet::generate(arrangement, n)))
            });
        }
    }
    group.finish();
}

fn bench_compute_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/compute_all");
    for n in [200, 2_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(TargetSets::compute(n)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_compute_all);
criterion_main!(benches);
