//! Benchmarks for the modulation matrix control path.
//!
//! Run with: cargo bench
//!
//! Everything here runs once per control tick on the control thread, so it
//! has to fit comfortably inside the tick period:
//!   - 100 Hz  = 10 ms
//!   - 500 Hz  = 2 ms (default)
//!   - 1 kHz   = 1 ms
//!
//! Benchmark groups:
//!   - matrix/smoothing  Source table tick
//!   - matrix/routing    Single and full resolution at increasing route counts
//!   - matrix/engine     Full control tick including command draining

use criterion::{criterion_group, criterion_main};

mod matrix;

/// Route counts from a sparse patch up to a full table.
pub const ROUTE_COUNTS: &[usize] = &[1, 8, 16, 32];

criterion_group!(
    benches,
    matrix::bench_smoothing,
    matrix::bench_routing,
    matrix::bench_engine,
);
criterion_main!(benches);
