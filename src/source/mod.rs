//! Modulation sources: the signals the matrix reads from.

/*
Modulation Sources
==================

A source is anything that produces a control value the matrix can route:
an LFO, an envelope, the mod wheel, a step sequencer, a random generator.
The matrix never generates these signals itself. Something outside (the
voice engine, the MIDI layer, a generator thread) pushes a raw value and
the matrix smooths it before anything reads it.

Vocabulary
----------

  raw value       The last value pushed by a collaborator. Conventionally in
                  [-1, 1] (LFOs, pitch bend) or [0, 1] (envelopes, velocity),
                  but the table does not enforce a range.

  smoothed value  What routes actually read. A one-pole low-pass of the raw
                  value, advanced once per control tick.

  time constant   Seconds for the smoothed value to cover ~63% of a step.
                  Default 1 ms: long enough to hide steps, short enough that
                  a fast envelope is not audibly lagged.


Why Smooth?
-----------

Raw control values arrive in steps. A MIDI CC has 128 levels, a sequencer
jumps between steps, and even a smooth LFO is only sampled once per block.
Applying those steps directly to a filter cutoff produces "zipper noise":
audible clicks at every step.

The one-pole filter turns each step into a short exponential glide:

    smoothed += (raw - smoothed) * (1 - exp(-dt / tau))

    raw      ────┐          ┌─────
                 │          │
                 └──────────┘

    smoothed ────╮          ╭─────
                  ╲        ╱
                   ╰──────╯

Because the coefficient depends on the tick length `dt`, the glide takes
the same wall-clock time whether the control rate is 100 Hz or 1 kHz.

The filter never overshoots: each tick moves a fraction in (0, 1] of the
remaining distance, so the smoothed value approaches the raw value
monotonically from whichever side it started on.
*/

/// Built-in source names.
pub mod catalog;
/// One-pole exponential smoother.
pub mod smoother;
/// Fixed table of sources addressed by id.
pub mod table;

use std::fmt;

pub use smoother::Smoother;
pub use table::SourceTable;

/// Index of a source in its table. Stable for the whole session.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub u8);

impl SourceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// One entry of the source table.
#[derive(Debug, Clone)]
pub struct ModulationSource {
    pub id: SourceId,
    pub name: String,
    raw: f64,
    smoother: Smoother,
}

impl ModulationSource {
    pub(crate) fn new(id: SourceId, name: &str, time_constant: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            raw: 0.0,
            smoother: Smoother::new(time_constant),
        }
    }

    pub fn raw_value(&self) -> f64 {
        self.raw
    }

    pub fn smoothed_value(&self) -> f64 {
        self.smoother.value()
    }

    /// Smoothing time constant in seconds.
    pub fn time_constant(&self) -> f64 {
        self.smoother.time_constant()
    }
}
