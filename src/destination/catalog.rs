/// Destinations every engine starts with. Order defines `DestinationId`s.
pub const BUILTIN_DESTINATIONS: &[&str] = &[
    // Oscillators
    "OSC1 PITCH",
    "OSC1 FINE",
    "OSC1 LEVEL",
    "OSC1 PAN",
    "OSC1 WAVETABLE POS",
    "OSC2 PITCH",
    "OSC2 FINE",
    "OSC2 LEVEL",
    "OSC2 PAN",
    "OSC2 WAVETABLE POS",
    "OSC3 PITCH",
    "OSC3 FINE",
    "OSC3 LEVEL",
    "OSC3 PAN",
    "OSC3 WAVETABLE POS",
    // Filters
    "FILTER1 CUTOFF",
    "FILTER1 RESONANCE",
    "FILTER1 DRIVE",
    "FILTER2 CUTOFF",
    "FILTER2 RESONANCE",
    "FILTER2 DRIVE",
    // Amp envelope
    "AMP ATTACK TIME",
    "AMP DECAY TIME",
    "SUSTAIN LEVEL",
    "AMP RELEASE TIME",
    "MASTER LEVEL",
    "PAN",
    // Effects
    "DELAY TIME",
    "DELAY FEEDBACK",
    "DELAY MIX",
    "REVERB SIZE",
    "REVERB DAMPING",
    "REVERB MIX",
    // Granular
    "GRANULAR RATE",
    "GRANULAR DURATION",
    "GRANULAR POSITION",
    "GRANULAR PITCH",
    "GRANULAR AMPLITUDE",
    // LFO rates
    "LFO 1 RATE",
    "LFO 2 RATE",
    "LFO 3 RATE",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::check_catalog, MAX_DESTINATIONS};

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(check_catalog(BUILTIN_DESTINATIONS, MAX_DESTINATIONS).is_ok());
    }
}
