//! Shared state types for UI communication
//!
//! Names and ranges never change after startup, so they are copied once.
//! Everything live travels in a `Copy` snapshot the control thread can
//! publish without allocating.

use modmatrix::{
    DestinationId, DestinationMetadata, ModMatrix, ModulationRoute, ResolvedValues, TemplateId, MAX_ROUTES,
    MAX_SOURCES,
};

/// Static information gathered before the control thread starts
#[derive(Clone)]
pub struct StaticInfo {
    pub sources: Vec<String>,
    pub destinations: Vec<(String, DestinationMetadata)>,
    pub templates: Vec<(TemplateId, String)>,
}

impl StaticInfo {
    pub fn from_matrix(matrix: &ModMatrix) -> Self {
        Self {
            sources: matrix.sources().iter().map(|s| s.name.clone()).collect(),
            destinations: matrix
                .destinations()
                .iter()
                .map(|d| (d.name.clone(), d.metadata))
                .collect(),
            templates: matrix
                .templates()
                .iter()
                .map(|(id, t)| (id, t.name.clone()))
                .collect(),
        }
    }

    pub fn source_name(&self, index: usize) -> &str {
        self.sources.get(index).map_or("?", String::as_str)
    }

    pub fn destination(&self, id: DestinationId) -> Option<&(String, DestinationMetadata)> {
        self.destinations.get(id.index())
    }
}

/// Live state published by the control thread (Copy, no allocations)
#[derive(Clone, Copy, Debug)]
pub struct Snapshot {
    /// Control ticks since start
    pub tick: u64,
    pub values: ResolvedValues,
    /// Smoothed source values, by source index
    pub sources: [f64; MAX_SOURCES],
    pub source_count: usize,
    /// Routes in insertion order, `route_count` of them
    pub routes: [Option<ModulationRoute>; MAX_ROUTES],
    pub route_count: usize,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            tick: 0,
            values: ResolvedValues::new(),
            sources: [0.0; MAX_SOURCES],
            source_count: 0,
            routes: [None; MAX_ROUTES],
            route_count: 0,
        }
    }

    pub fn capture(matrix: &ModMatrix, tick: u64) -> Self {
        let mut snapshot = Self::empty();
        snapshot.tick = tick;
        snapshot.values = *matrix.resolved();

        for (slot, source) in snapshot.sources.iter_mut().zip(matrix.sources().iter()) {
            *slot = source.smoothed_value();
            snapshot.source_count += 1;
        }
        for (slot, route) in snapshot.routes.iter_mut().zip(matrix.routing().routes()) {
            *slot = Some(*route);
            snapshot.route_count += 1;
        }
        snapshot
    }

    pub fn routes(&self) -> impl Iterator<Item = &ModulationRoute> + '_ {
        self.routes[..self.route_count].iter().flatten()
    }

    pub fn route(&self, index: usize) -> Option<&ModulationRoute> {
        self.routes().nth(index)
    }
}
