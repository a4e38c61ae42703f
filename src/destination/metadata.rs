#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Parameter Ranges and Tapers
===========================

Knobs should feel even. Turning a cutoff knob from 10% to 20% should sound
like the same size change as 80% to 90%. Hearing is logarithmic in
frequency and time, so those parameters need a curved mapping from knob
position to value:

| class      | keywords                       | curve       | range          | default |
| ---------- | ------------------------------ | ----------- | -------------- | ------- |
| pitch      | PITCH, FINE, DETUNE            | linear      | -48 .. +48 st  | 0       |
| cutoff     | CUTOFF                         | exponential | 20 .. 20000 Hz | 1000    |
| resonance  | RESONANCE                      | linear      | 0 .. 100 %     | 50      |
| level      | LEVEL, AMPLITUDE, VOLUME, GAIN | exponential | 0 .. 100 %     | 50      |
| time       | TIME, ATTACK, DECAY, RELEASE   | exponential | 1 .. 2000 ms   | 100     |
| everything | (fallback)                     | linear      | 0 .. 100 %     | 50      |

Rules are tried top to bottom and the first match wins, so "FILTER1 CUTOFF
TIME" would be a cutoff, and "SUSTAIN LEVEL" is a level.

Exponential with a zero minimum has no ratio to work with, so it falls
back to a square-law taper, which is what most amplitude knobs do anyway.
*/

/// How a destination's knob position maps onto its range.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeCurve {
    Linear,
    Exponential,
    Logarithmic,
}

/// Range, default and display unit of one destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestinationMetadata {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub curve: NativeCurve,
    pub unit: &'static str,
}

struct Rule {
    keywords: &'static [&'static str],
    metadata: DestinationMetadata,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["PITCH", "FINE", "DETUNE"],
        metadata: DestinationMetadata::new(-48.0, 48.0, 0.0, NativeCurve::Linear, "st"),
    },
    Rule {
        keywords: &["CUTOFF"],
        metadata: DestinationMetadata::new(20.0, 20_000.0, 1_000.0, NativeCurve::Exponential, "Hz"),
    },
    Rule {
        keywords: &["RESONANCE"],
        metadata: DestinationMetadata::new(0.0, 100.0, 50.0, NativeCurve::Linear, "%"),
    },
    Rule {
        keywords: &["LEVEL", "AMPLITUDE", "VOLUME", "GAIN"],
        metadata: DestinationMetadata::new(0.0, 100.0, 50.0, NativeCurve::Exponential, "%"),
    },
    Rule {
        keywords: &["TIME", "ATTACK", "DECAY", "RELEASE"],
        metadata: DestinationMetadata::new(1.0, 2_000.0, 100.0, NativeCurve::Exponential, "ms"),
    },
];

const FALLBACK: DestinationMetadata =
    DestinationMetadata::new(0.0, 100.0, 50.0, NativeCurve::Linear, "%");

impl DestinationMetadata {
    pub const fn new(min: f64, max: f64, default: f64, curve: NativeCurve, unit: &'static str) -> Self {
        Self {
            min,
            max,
            default,
            curve,
            unit,
        }
    }

    /// Derive metadata from a destination name using the rule table.
    pub fn for_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| upper.contains(kw)))
            .map_or(FALLBACK, |rule| rule.metadata)
    }

    /// Clamp a resolved value into the declared range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map a knob position in [0, 1] onto the range through the native curve.
    pub fn from_normalized(&self, position: f64) -> f64 {
        let x = position.clamp(0.0, 1.0);
        match self.curve {
            NativeCurve::Linear => self.min + self.span() * x,
            NativeCurve::Exponential if self.min > 0.0 => self.min * (self.max / self.min).powf(x),
            NativeCurve::Exponential => self.min + self.span() * x * x,
            NativeCurve::Logarithmic => self.min + self.span() * (x * 9.0 + 1.0).log10(),
        }
    }

    /// Inverse of [`from_normalized`](Self::from_normalized).
    pub fn to_normalized(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }

        let v = self.clamp(value);
        let x = match self.curve {
            NativeCurve::Linear => (v - self.min) / span,
            NativeCurve::Exponential if self.min > 0.0 => (v / self.min).ln() / (self.max / self.min).ln(),
            NativeCurve::Exponential => ((v - self.min) / span).sqrt(),
            NativeCurve::Logarithmic => (10f64.powf((v - self.min) / span) - 1.0) / 9.0,
        };
        x.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cutoff_rule() {
        let m = DestinationMetadata::for_name("FILTER1 CUTOFF");
        assert_eq!((m.min, m.max), (20.0, 20_000.0));
        assert_eq!(m.curve, NativeCurve::Exponential);
        assert_eq!(m.unit, "Hz");
    }

    #[test]
    fn test_pitch_and_fine_rules() {
        for name in ["OSC1 PITCH", "OSC2 FINE", "osc3 detune"] {
            let m = DestinationMetadata::for_name(name);
            assert_eq!((m.min, m.max, m.default), (-48.0, 48.0, 0.0), "{name}");
            assert_eq!(m.curve, NativeCurve::Linear);
        }
    }

    #[test]
    fn test_first_match_wins() {
        // Both CUTOFF and TIME match; CUTOFF comes first
        assert_eq!(DestinationMetadata::for_name("CUTOFF TIME").unit, "Hz");
        // PITCH beats LEVEL
        assert_eq!(DestinationMetadata::for_name("GRANULAR PITCH LEVEL").unit, "st");
    }

    #[test]
    fn test_level_and_time_rules() {
        let level = DestinationMetadata::for_name("SUSTAIN LEVEL");
        assert_eq!(level.curve, NativeCurve::Exponential);
        assert_eq!((level.min, level.max), (0.0, 100.0));

        let time = DestinationMetadata::for_name("AMP RELEASE TIME");
        assert_eq!((time.min, time.max), (1.0, 2_000.0));
        assert_eq!(time.unit, "ms");
    }

    #[test]
    fn test_fallback() {
        let m = DestinationMetadata::for_name("REVERB MIX");
        assert_eq!(m, FALLBACK);
        assert_eq!(m.default, 50.0);
    }

    #[test]
    fn test_exponential_taper_is_geometric() {
        let m = DestinationMetadata::for_name("FILTER1 CUTOFF");
        assert_relative_eq!(m.from_normalized(0.0), 20.0);
        assert_relative_eq!(m.from_normalized(1.0), 20_000.0, epsilon = 1e-9);
        // Halfway is the geometric mean
        assert_relative_eq!(m.from_normalized(0.5), (20.0f64 * 20_000.0).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_normalized_inverse() {
        let names = ["FILTER1 CUTOFF", "OSC1 LEVEL", "OSC1 PITCH", "DELAY TIME"];
        for name in names {
            let m = DestinationMetadata::for_name(name);
            for x in [0.0, 0.25, 0.5, 0.9, 1.0] {
                assert_relative_eq!(m.to_normalized(m.from_normalized(x)), x, epsilon = 1e-9);
            }
        }
        let log = DestinationMetadata::new(0.0, 10.0, 0.0, NativeCurve::Logarithmic, "");
        assert_relative_eq!(log.to_normalized(log.from_normalized(0.3)), 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_clamp() {
        let m = DestinationMetadata::for_name("FILTER1 RESONANCE");
        assert_eq!(m.clamp(130.0), 100.0);
        assert_eq!(m.clamp(-5.0), 0.0);
        assert_eq!(m.clamp(42.0), 42.0);
    }
}
