/// Sources every engine starts with. Order defines `SourceId`s.
pub const BUILTIN_SOURCES: &[&str] = &[
    "VELOCITY",
    "AFTERTOUCH",
    "POLY AFTERTOUCH",
    "MOD WHEEL",
    "PITCH BEND",
    "KEY TRACK",
    "LFO 1",
    "LFO 2",
    "LFO 3",
    "ENV 1",
    "ENV 2",
    "ENV 3",
    "SEQ 1",
    "SEQ 2",
    "RANDOM",
    "PERLIN",
    "MACRO 1",
    "MACRO 2",
    "MACRO 3",
    "MACRO 4",
    "XY PAD X",
    "XY PAD Y",
];

pub const VELOCITY: &str = "VELOCITY";
pub const AFTERTOUCH: &str = "AFTERTOUCH";
pub const POLY_AFTERTOUCH: &str = "POLY AFTERTOUCH";
pub const MOD_WHEEL: &str = "MOD WHEEL";
pub const PITCH_BEND: &str = "PITCH BEND";
pub const KEY_TRACK: &str = "KEY TRACK";
