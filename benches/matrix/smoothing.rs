//! Benchmarks for source smoothing.

use std::hint::black_box;

use criterion::Criterion;
use modmatrix::SourceTable;

use super::drive;

pub fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix/smoothing");

    let mut sources = SourceTable::builtin(0.005);
    drive(&mut sources, 0.3);

    group.bench_function("tick_all_sources", |b| {
        b.iter(|| sources.tick(black_box(0.002)))
    });

    // Held values have converged and take the snap path
    let mut settled = SourceTable::builtin(0.005);
    drive(&mut settled, 0.3);
    settled.snap_all();

    group.bench_function("tick_settled", |b| {
        b.iter(|| settled.tick(black_box(0.002)))
    });

    group.finish();
}
