//! Named bundles of routes that replace the routing table as a unit.
//!
//! Templates refer to sources and destinations by name so they survive
//! catalog reordering and can be written by hand. Names are resolved to ids
//! only when the template is loaded.

/// Factory templates.
pub mod builtin;
/// Registration and atomic loading.
pub mod library;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::route::{Curve, RouteParams};

pub use library::{TemplateId, TemplateLibrary};

/// One route of a template, by name.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateEntry {
    pub source: String,
    pub destination: String,
    pub amount: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub curve: Curve,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bipolar: bool,
}

impl TemplateEntry {
    pub fn new(source: &str, destination: &str, amount: f64, curve: Curve) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            amount,
            curve,
            bipolar: false,
        }
    }

    pub fn bipolar(mut self) -> Self {
        self.bipolar = true;
        self
    }

    pub(crate) fn params(&self) -> RouteParams {
        RouteParams::default()
            .amount(self.amount)
            .curve(self.curve)
            .bipolar(self.bipolar)
    }
}

/// A named, ordered route list.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, rename = "route"))]
    pub entries: Vec<TemplateEntry>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry (builder style).
    pub fn route(mut self, entry: TemplateEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
