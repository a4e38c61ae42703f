//! Benchmarks for the per-tick matrix work.

mod engine;
mod routing;
mod smoothing;

pub use engine::bench_engine;
pub use routing::bench_routing;
pub use smoothing::bench_smoothing;

use modmatrix::{DestinationTable, RouteParams, RoutingTable, SourceId, SourceTable, Curve};

/// A routing table with `count` routes spread over the first few
/// destinations, mixing curves the way a real patch would.
pub fn populated(count: usize, sources: &SourceTable, destinations: &DestinationTable) -> RoutingTable {
    let mut routing = RoutingTable::for_tables(sources, destinations);
    let curves = [Curve::Linear, Curve::Exponential, Curve::Logarithmic];

    for i in 0..count {
        let source = SourceId((i % sources.len()) as u8);
        let destination = destinations.iter().nth(i / 4).map(|d| d.id).unwrap();
        let params = RouteParams::default()
            .amount(0.25)
            .curve(curves[i % curves.len()])
            .bipolar(i % 2 == 0);
        routing.add_route(source, destination, params).unwrap();
    }
    routing
}

/// Push a spread of values so curves see non-trivial input.
pub fn drive(sources: &mut SourceTable, phase: f64) {
    let ids: Vec<_> = sources.iter().map(|s| s.id).collect();
    for (i, id) in ids.into_iter().enumerate() {
        sources.push_value(id, (phase + i as f64 * 0.37).sin()).unwrap();
    }
}
