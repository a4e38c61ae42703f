#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DEFAULT_SMOOTHING_TIME;

/// Settings for a [`ModMatrix`](crate::engine::ModMatrix) and the thread
/// that drives it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Control ticks per second.
    pub control_rate_hz: f64,
    /// Default smoothing time constant for every source, in seconds.
    pub smoothing_time: f64,
    /// Slots in the command queue.
    pub command_capacity: usize,
    /// Template loaded at construction.
    pub initial_template: Option<String>,
    /// MIDI channel to listen on (0-15), `None` for omni.
    pub midi_channel: Option<u8>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            control_rate_hz: 500.0,
            smoothing_time: DEFAULT_SMOOTHING_TIME,
            command_capacity: 256,
            initial_template: None,
            midi_channel: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("control rate must be a positive number of Hz, got {0}")]
    ControlRate(f64),

    #[error("smoothing time must be finite and not negative, got {0}")]
    SmoothingTime(f64),

    #[error("command queue needs at least one slot")]
    CommandCapacity,

    #[error("MIDI channel {0} out of range (0-15)")]
    MidiChannel(u8),
}

impl EngineConfig {
    /// Seconds per control tick.
    pub fn control_period(&self) -> f64 {
        1.0 / self.control_rate_hz
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.control_rate_hz.is_finite() && self.control_rate_hz > 0.0) {
            return Err(ConfigError::ControlRate(self.control_rate_hz));
        }
        if !(self.smoothing_time.is_finite() && self.smoothing_time >= 0.0) {
            return Err(ConfigError::SmoothingTime(self.smoothing_time));
        }
        if self.command_capacity == 0 {
            return Err(ConfigError::CommandCapacity);
        }
        if let Some(channel) = self.midi_channel.filter(|&c| c > 15) {
            return Err(ConfigError::MidiChannel(channel));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_validate() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.control_period(), 0.002);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_rate = EngineConfig {
            control_rate_hz: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_rate.validate(), Err(ConfigError::ControlRate(0.0)));

        let bad_queue = EngineConfig {
            command_capacity: 0,
            ..Default::default()
        };
        assert_eq!(bad_queue.validate(), Err(ConfigError::CommandCapacity));

        let bad_channel = EngineConfig {
            midi_channel: Some(16),
            ..Default::default()
        };
        assert_eq!(bad_channel.validate(), Err(ConfigError::MidiChannel(16)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: EngineConfig = toml::from_str("control_rate_hz = 1000.0\ninitial_template = \"VIBRATO\"").unwrap();
        assert_eq!(config.control_rate_hz, 1000.0);
        assert_eq!(config.initial_template.as_deref(), Some("VIBRATO"));
        assert_eq!(config.command_capacity, 256);
    }
}
