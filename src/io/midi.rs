/// Channel voice messages, decoded from raw bytes. Channels are 0-15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    PolyPressure { channel: u8, key: u8, pressure: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    /// 14-bit, 8192 is centre.
    PitchBend { channel: u8, value: u16 },
}

pub const PITCH_BEND_CENTER: u16 = 8192;

impl MidiEvent {
    /// Decode a channel message. System messages and anything that is not a
    /// status byte yield `None`. Data bytes are masked to 7 bits.
    pub fn from_bytes(status: u8, data1: u8, data2: u8) -> Option<Self> {
        let channel = status & 0x0F;
        let (d1, d2) = (data1 & 0x7F, data2 & 0x7F);

        let event = match status & 0xF0 {
            0x80 => Self::NoteOff {
                channel,
                key: d1,
                velocity: d2,
            },
            // Running-status convention: note on with velocity 0 is a note off
            0x90 if d2 == 0 => Self::NoteOff {
                channel,
                key: d1,
                velocity: 0,
            },
            0x90 => Self::NoteOn {
                channel,
                key: d1,
                velocity: d2,
            },
            0xA0 => Self::PolyPressure {
                channel,
                key: d1,
                pressure: d2,
            },
            0xB0 => Self::ControlChange {
                channel,
                controller: d1,
                value: d2,
            },
            0xC0 => Self::ProgramChange { channel, program: d1 },
            0xD0 => Self::ChannelPressure { channel, pressure: d1 },
            0xE0 => Self::PitchBend {
                channel,
                value: ((d2 as u16) << 7) | d1 as u16,
            },
            _ => return None,
        };
        Some(event)
    }

    /// Decode from a slice as delivered by most MIDI APIs.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        match *bytes {
            [status, d1, d2, ..] => Self::from_bytes(status, d1, d2),
            [status, d1] => Self::from_bytes(status, d1, 0),
            _ => None,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            Self::NoteOn { channel, .. }
            | Self::NoteOff { channel, .. }
            | Self::PolyPressure { channel, .. }
            | Self::ControlChange { channel, .. }
            | Self::ProgramChange { channel, .. }
            | Self::ChannelPressure { channel, .. }
            | Self::PitchBend { channel, .. } => channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_zero_velocity_is_note_off() {
        assert_eq!(
            MidiEvent::from_bytes(0x93, 60, 0),
            Some(MidiEvent::NoteOff {
                channel: 3,
                key: 60,
                velocity: 0
            })
        );
    }

    #[test]
    fn test_pitch_bend_is_14_bit() {
        assert_eq!(
            MidiEvent::from_bytes(0xE0, 0x00, 0x40),
            Some(MidiEvent::PitchBend {
                channel: 0,
                value: PITCH_BEND_CENTER
            })
        );
        assert_eq!(
            MidiEvent::from_bytes(0xE1, 0x7F, 0x7F),
            Some(MidiEvent::PitchBend { channel: 1, value: 16383 })
        );
    }

    #[test]
    fn test_two_byte_messages() {
        assert_eq!(
            MidiEvent::from_slice(&[0xD5, 100]),
            Some(MidiEvent::ChannelPressure {
                channel: 5,
                pressure: 100
            })
        );
        assert_eq!(
            MidiEvent::from_slice(&[0xC0, 7]),
            Some(MidiEvent::ProgramChange { channel: 0, program: 7 })
        );
    }

    #[test]
    fn test_system_and_data_bytes_ignored() {
        assert_eq!(MidiEvent::from_bytes(0xF8, 0, 0), None);
        assert_eq!(MidiEvent::from_bytes(0x40, 0, 0), None);
        assert_eq!(MidiEvent::from_slice(&[]), None);
    }
}
