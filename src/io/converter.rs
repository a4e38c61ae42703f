use crate::{
    engine::MatrixCommand,
    io::midi::{MidiEvent, PITCH_BEND_CENTER},
    source::{catalog, SourceId, SourceTable},
};

const MOD_WHEEL_CC: u8 = 1;
/// Note that maps to a key-track value of 0.
const KEY_TRACK_CENTER: u8 = 60;

/// Turns MIDI events into source pushes.
///
/// Fixed mappings cover the performance sources (velocity, key track, pitch
/// bend, pressure, mod wheel). Any CC can additionally be bound to any
/// source through MIDI learn.
#[derive(Debug, Clone)]
pub struct MidiSourceMap {
    velocity: Option<SourceId>,
    key_track: Option<SourceId>,
    pitch_bend: Option<SourceId>,
    aftertouch: Option<SourceId>,
    poly_aftertouch: Option<SourceId>,
    mod_wheel: Option<SourceId>,
    cc_bindings: [Option<SourceId>; 128],
    learning: Option<SourceId>,
    channel: Option<u8>,
}

impl MidiSourceMap {
    /// Mappings for whichever performance sources `sources` has. `channel`
    /// filters input to one channel; `None` listens to all.
    pub fn new(sources: &SourceTable, channel: Option<u8>) -> Self {
        Self {
            velocity: sources.id_of(catalog::VELOCITY),
            key_track: sources.id_of(catalog::KEY_TRACK),
            pitch_bend: sources.id_of(catalog::PITCH_BEND),
            aftertouch: sources.id_of(catalog::AFTERTOUCH),
            poly_aftertouch: sources.id_of(catalog::POLY_AFTERTOUCH),
            mod_wheel: sources.id_of(catalog::MOD_WHEEL),
            cc_bindings: [None; 128],
            learning: None,
            channel,
        }
    }

    /// Bind the next incoming CC to `source`.
    pub fn start_learn(&mut self, source: SourceId) {
        log::debug!("MIDI learn armed for source {source}");
        self.learning = Some(source);
    }

    pub fn stop_learn(&mut self) {
        self.learning = None;
    }

    pub fn is_learning(&self) -> bool {
        self.learning.is_some()
    }

    /// Bind `controller` to `source` directly, replacing any binding either
    /// side had.
    pub fn bind(&mut self, controller: u8, source: SourceId) {
        for binding in self.cc_bindings.iter_mut() {
            if *binding == Some(source) {
                *binding = None;
            }
        }
        if let Some(slot) = self.cc_bindings.get_mut(controller as usize) {
            *slot = Some(source);
        }
    }

    pub fn unbind(&mut self, controller: u8) -> Option<SourceId> {
        self.cc_bindings.get_mut(controller as usize)?.take()
    }

    pub fn binding(&self, controller: u8) -> Option<SourceId> {
        self.cc_bindings.get(controller as usize).copied().flatten()
    }

    /// Source pushes for one event. At most two (a note on sets velocity
    /// and key track).
    pub fn convert(&mut self, event: MidiEvent) -> impl Iterator<Item = (SourceId, f64)> {
        let mut out = [None, None];

        if self.channel.map_or(true, |c| c == event.channel()) {
            match event {
                MidiEvent::NoteOn { key, velocity, .. } => {
                    out[0] = self.velocity.map(|id| (id, norm7(velocity)));
                    out[1] = self
                        .key_track
                        .map(|id| (id, (key as f64 - KEY_TRACK_CENTER as f64) / KEY_TRACK_CENTER as f64));
                }
                MidiEvent::PitchBend { value, .. } => {
                    let centre = PITCH_BEND_CENTER as f64;
                    out[0] = self.pitch_bend.map(|id| (id, (value as f64 - centre) / centre));
                }
                MidiEvent::ChannelPressure { pressure, .. } => {
                    out[0] = self.aftertouch.map(|id| (id, norm7(pressure)));
                }
                MidiEvent::PolyPressure { pressure, .. } => {
                    out[0] = self.poly_aftertouch.map(|id| (id, norm7(pressure)));
                }
                MidiEvent::ControlChange { controller, value, .. } => {
                    out[0] = self.control_change(controller).map(|id| (id, norm7(value)));
                }
                MidiEvent::NoteOff { .. } | MidiEvent::ProgramChange { .. } => {}
            }
        }

        out.into_iter().flatten()
    }

    /// As [`convert`](Self::convert), wrapped as queue commands.
    pub fn commands(&mut self, event: MidiEvent) -> impl Iterator<Item = MatrixCommand> {
        self.convert(event)
            .map(|(source, value)| MatrixCommand::PushSource { source, value })
    }

    fn control_change(&mut self, controller: u8) -> Option<SourceId> {
        if let Some(source) = self.learning.take() {
            self.bind(controller, source);
            log::debug!("CC{controller} learned for source {source}");
            return Some(source);
        }

        self.binding(controller).or(match controller {
            MOD_WHEEL_CC => self.mod_wheel,
            _ => None,
        })
    }
}

#[inline]
fn norm7(value: u8) -> f64 {
    value as f64 / 127.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fixture() -> (SourceTable, MidiSourceMap) {
        let sources = SourceTable::default();
        let map = MidiSourceMap::new(&sources, None);
        (sources, map)
    }

    #[test]
    fn test_note_on_sets_velocity_and_key_track() {
        let (sources, mut map) = fixture();
        let pushes: Vec<_> = map
            .convert(MidiEvent::NoteOn {
                channel: 0,
                key: 72,
                velocity: 127,
            })
            .collect();
        assert_eq!(pushes.len(), 2);
        assert_eq!(pushes[0], (sources.id_of("VELOCITY").unwrap(), 1.0));
        assert_eq!(pushes[1].0, sources.id_of("KEY TRACK").unwrap());
        assert_relative_eq!(pushes[1].1, 0.2);
    }

    #[test]
    fn test_pitch_bend_normalized() {
        let (_, mut map) = fixture();
        let down: Vec<_> = map.convert(MidiEvent::PitchBend { channel: 0, value: 0 }).collect();
        assert_eq!(down[0].1, -1.0);
        let centre: Vec<_> = map
            .convert(MidiEvent::PitchBend {
                channel: 0,
                value: 8192,
            })
            .collect();
        assert_eq!(centre[0].1, 0.0);
    }

    #[test]
    fn test_channel_filter() {
        let sources = SourceTable::default();
        let mut map = MidiSourceMap::new(&sources, Some(2));
        let wheel = MidiEvent::ControlChange {
            channel: 3,
            controller: 1,
            value: 64,
        };
        assert_eq!(map.convert(wheel).count(), 0);
    }

    #[test]
    fn test_learn_binds_next_cc_and_stops() {
        let (sources, mut map) = fixture();
        let macro1 = sources.id_of("MACRO 1").unwrap();

        map.bind(20, macro1);
        map.start_learn(macro1);
        let pushes: Vec<_> = map
            .convert(MidiEvent::ControlChange {
                channel: 0,
                controller: 74,
                value: 127,
            })
            .collect();
        assert_eq!(pushes, vec![(macro1, 1.0)]);
        assert!(!map.is_learning());
        assert_eq!(map.binding(74), Some(macro1));
        // Previous binding for the same source is gone
        assert_eq!(map.binding(20), None);

        assert_eq!(map.unbind(74), Some(macro1));
        assert_eq!(map.binding(74), None);
    }

    #[test]
    fn test_learned_cc1_overrides_mod_wheel() {
        let (sources, mut map) = fixture();
        let xy = sources.id_of("XY PAD X").unwrap();
        let cc1 = MidiEvent::ControlChange {
            channel: 0,
            controller: 1,
            value: 0,
        };

        let before: Vec<_> = map.convert(cc1).collect();
        assert_eq!(before[0].0, sources.id_of("MOD WHEEL").unwrap());

        map.bind(1, xy);
        let after: Vec<_> = map.convert(cc1).collect();
        assert_eq!(after[0].0, xy);
    }
}
