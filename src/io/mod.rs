// Purpose - MIDI input decoding and mapping onto modulation sources

pub mod converter;
pub mod midi;

pub use converter::MidiSourceMap;
pub use midi::MidiEvent;
