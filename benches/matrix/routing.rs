//! Benchmarks for route resolution.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use modmatrix::{DestinationTable, ResolvedValues, SourceTable};

use super::{drive, populated};
use crate::ROUTE_COUNTS;

pub fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix/routing");

    let mut sources = SourceTable::builtin(0.0);
    let destinations = DestinationTable::builtin();
    drive(&mut sources, 0.7);
    sources.tick(0.002);

    for &count in ROUTE_COUNTS {
        let routing = populated(count, &sources, &destinations);
        let mut out = ResolvedValues::new();

        group.bench_with_input(BenchmarkId::new("resolve_all_into", count), &count, |b, _| {
            b.iter(|| routing.resolve_all_into(black_box(&mut out), &sources, &destinations))
        });

        // Busiest destination: up to four routes summed
        let first = destinations.iter().next().map(|d| d.id).unwrap();
        group.bench_with_input(BenchmarkId::new("resolve_one", count), &count, |b, _| {
            b.iter(|| routing.resolve(black_box(first), &sources, &destinations))
        });
    }

    group.finish();
}
