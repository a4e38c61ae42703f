use std::ops::Index;

use crate::{destination::DestinationId, MAX_DESTINATIONS};

/// Resolved value for every destination, indexed by `DestinationId`.
///
/// Fixed-size so the control thread can refill it every tick without
/// allocating. Values are unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedValues {
    values: [f64; MAX_DESTINATIONS],
    len: usize,
}

impl ResolvedValues {
    pub fn new() -> Self {
        Self {
            values: [0.0; MAX_DESTINATIONS],
            len: 0,
        }
    }

    pub(crate) fn reset(&mut self, len: usize) {
        self.len = len.min(MAX_DESTINATIONS);
        self.values[..self.len].fill(0.0);
    }

    pub(crate) fn set(&mut self, id: DestinationId, value: f64) {
        if id.index() < self.len {
            self.values[id.index()] = value;
        }
    }

    pub fn get(&self, id: DestinationId) -> Option<f64> {
        self.as_slice().get(id.index()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DestinationId, f64)> + '_ {
        self.as_slice()
            .iter()
            .enumerate()
            .map(|(i, &v)| (DestinationId(i as u8), v))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for ResolvedValues {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<DestinationId> for ResolvedValues {
    type Output = f64;

    fn index(&self, id: DestinationId) -> &Self::Output {
        &self.as_slice()[id.index()]
    }
}
