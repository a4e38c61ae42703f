//! Demo source signals
//!
//! Stand-ins for the voice engine and performer: a handful of LFOs,
//! envelopes and random generators pushing into the source table so the
//! monitor has something to show.

use std::f64::consts::TAU;

use modmatrix::{SourceId, SourceTable};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
enum Shape {
    /// Bipolar sine.
    Sine { hz: f64, offset: f64 },
    /// Unipolar sine, for controls that rest at zero.
    Slow { hz: f64 },
    /// Linear attack, exponential decay, retriggered every `period`.
    Envelope { period: f64, attack: f64, decay: f64 },
    /// Eight-step pattern.
    Steps { hz: f64, pattern: [f64; 8] },
    /// New random value every 1/hz seconds.
    SampleHold { hz: f64 },
    /// Bounded random walk.
    Walk { rate: f64 },
}

const DEMO: &[(&str, Shape)] = &[
    ("LFO 1", Shape::Sine { hz: 0.4, offset: 0.0 }),
    ("LFO 2", Shape::Sine { hz: 5.5, offset: 0.0 }),
    ("LFO 3", Shape::Sine { hz: 0.1, offset: 0.25 }),
    ("ENV 1", Shape::Envelope { period: 1.0, attack: 0.01, decay: 0.2 }),
    ("ENV 2", Shape::Envelope { period: 2.0, attack: 0.3, decay: 0.6 }),
    ("ENV 3", Shape::Envelope { period: 0.5, attack: 0.001, decay: 0.05 }),
    ("SEQ 1", Shape::Steps { hz: 4.0, pattern: [1.0, 0.0, 0.5, 0.0, 0.75, 0.25, 1.0, 0.0] }),
    ("SEQ 2", Shape::Steps { hz: 2.0, pattern: [0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 0.5, 0.1] }),
    ("RANDOM", Shape::SampleHold { hz: 3.0 }),
    ("PERLIN", Shape::Walk { rate: 0.8 }),
    ("MOD WHEEL", Shape::Slow { hz: 0.05 }),
    ("AFTERTOUCH", Shape::Slow { hz: 0.13 }),
    ("MACRO 1", Shape::Slow { hz: 0.07 }),
    ("MACRO 2", Shape::Slow { hz: 0.03 }),
    ("MACRO 3", Shape::Sine { hz: 0.2, offset: 0.5 }),
    ("MACRO 4", Shape::Slow { hz: 0.11 }),
    ("XY PAD X", Shape::Sine { hz: 0.25, offset: 0.0 }),
    ("XY PAD Y", Shape::Sine { hz: 0.25, offset: 0.25 }),
];

struct Signal {
    source: SourceId,
    shape: Shape,
    held: f64,
    next_hold: f64,
}

pub struct DemoSignals {
    signals: Vec<Signal>,
    time: f64,
    rng: StdRng,
}

impl DemoSignals {
    /// Generators for every demo source present in `sources`.
    pub fn new(sources: &SourceTable) -> Self {
        let signals = DEMO
            .iter()
            .filter_map(|&(name, shape)| {
                sources.id_of(name).map(|source| Signal {
                    source,
                    shape,
                    held: 0.0,
                    next_hold: 0.0,
                })
            })
            .collect();

        Self {
            signals,
            time: 0.0,
            rng: StdRng::seed_from_u64(0x5eed),
        }
    }

    /// Advance by `dt` seconds and report each source's new raw value.
    pub fn advance(&mut self, dt: f64, mut push: impl FnMut(SourceId, f64)) {
        self.time += dt;
        let t = self.time;

        for signal in &mut self.signals {
            let value = match signal.shape {
                Shape::Sine { hz, offset } => (TAU * (hz * t + offset)).sin(),
                Shape::Slow { hz } => 0.5 - 0.5 * (TAU * hz * t).cos(),
                Shape::Envelope { period, attack, decay } => {
                    let local = t % period;
                    if local < attack {
                        local / attack
                    } else {
                        (-(local - attack) / decay).exp()
                    }
                }
                Shape::Steps { hz, pattern } => pattern[(t * hz) as usize % pattern.len()],
                Shape::SampleHold { hz } => {
                    if t >= signal.next_hold {
                        signal.held = self.rng.random_range(-1.0..=1.0);
                        signal.next_hold = t + 1.0 / hz;
                    }
                    signal.held
                }
                Shape::Walk { rate } => {
                    let step = self.rng.random_range(-1.0_f64..=1.0) * rate * dt.sqrt();
                    signal.held = (signal.held + step).clamp(-1.0, 1.0);
                    signal.held
                }
            };
            push(signal.source, value);
        }
    }

    /// Raw bytes of a random note on, as a keyboard would send them.
    pub fn note_on(&mut self) -> [u8; 3] {
        let key = self.rng.random_range(48..=84);
        let velocity = self.rng.random_range(50..=127);
        [0x90, key, velocity]
    }
}
