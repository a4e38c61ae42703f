//! Benchmarks for a complete control tick.

use std::{collections::VecDeque, hint::black_box};

use criterion::{BenchmarkId, Criterion};
use modmatrix::{EngineConfig, MatrixCommand, ModMatrix, RouteParams, SourceId};

use crate::ROUTE_COUNTS;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix/engine");

    for &count in ROUTE_COUNTS {
        let mut matrix = ModMatrix::new(&EngineConfig::default()).unwrap();
        let destinations: Vec<_> = matrix.destinations().iter().map(|d| d.id).collect();
        for i in 0..count {
            let source = SourceId((i % matrix.sources().len()) as u8);
            matrix
                .add_route(source, destinations[i / 4], RouteParams::default().bipolar(true))
                .unwrap();
        }

        // A typical tick: a few source pushes arrive, then tick + resolve
        let mut queue = VecDeque::with_capacity(8);
        let mut phase = 0.0f64;
        group.bench_with_input(BenchmarkId::new("process", count), &count, |b, _| {
            b.iter(|| {
                phase += 0.01;
                for s in 0..4u8 {
                    queue.push_back(MatrixCommand::PushSource {
                        source: SourceId(s),
                        value: (phase + s as f64).sin(),
                    });
                }
                black_box(matrix.process(0.002, &mut queue));
            })
        });
    }

    group.finish();
}
