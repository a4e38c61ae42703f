//! Modulation destinations: the parameters routes write to.
//!
//! Each destination carries a range, a default, a unit and a native curve
//! derived from its name when the table is built. The metadata is
//! read-only afterwards. Routing itself never clamps to the range: the
//! audio engine clamps with [`DestinationMetadata::clamp`] when it applies
//! the resolved value.

/// Built-in destination names.
pub mod catalog;
/// Name-pattern rules that derive range, default and curve.
pub mod metadata;
/// Fixed table of destinations addressed by id.
pub mod table;

use std::fmt;

pub use metadata::{DestinationMetadata, NativeCurve};
pub use table::DestinationTable;

/// Index of a destination in its table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DestinationId(pub u8);

impl DestinationId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ModulationDestination {
    pub id: DestinationId,
    pub name: String,
    pub metadata: DestinationMetadata,
}
