use approx::assert_relative_eq;
use modmatrix::{EngineConfig, MidiEvent, MidiSourceMap, ModMatrix, RouteParams};

fn matrix() -> ModMatrix {
    ModMatrix::new(&EngineConfig {
        smoothing_time: 0.0,
        ..Default::default()
    })
    .unwrap()
}

fn feed(m: &mut ModMatrix, map: &mut MidiSourceMap, bytes: &[u8]) {
    let event = MidiEvent::from_slice(bytes).unwrap();
    for (source, value) in map.convert(event) {
        m.push_source(source, value).unwrap();
    }
}

#[test]
fn pitch_bend_drives_oscillator_pitch() {
    let mut m = matrix();
    let mut map = MidiSourceMap::new(m.sources(), None);
    m.load_template("EXPRESSIVE").unwrap();
    let pitch = m.destinations().id_of("OSC1 PITCH").unwrap();

    // Full bend down: (0 - 8192) / 8192 = -1, bipolar route amount 0.04
    feed(&mut m, &mut map, &[0xE0, 0x00, 0x00]);
    let values = m.tick(0.002);
    assert_relative_eq!(values[pitch], -0.04, epsilon = 1e-12);

    // Centre
    feed(&mut m, &mut map, &[0xE0, 0x00, 0x40]);
    let values = m.tick(0.002);
    assert_relative_eq!(values[pitch], 0.0, epsilon = 1e-12);
}

#[test]
fn learned_controller_reaches_its_destination() {
    let mut m = matrix();
    let mut map = MidiSourceMap::new(m.sources(), Some(0));
    let macro1 = m.sources().id_of("MACRO 1").unwrap();
    let mix = m.destinations().id_of("DELAY MIX").unwrap();
    m.add_route(macro1, mix, RouteParams::default().amount(1.0))
        .unwrap();

    map.start_learn(macro1);
    feed(&mut m, &mut map, &[0xB0, 74, 127]);
    assert_eq!(map.binding(74), Some(macro1));
    assert_relative_eq!(m.tick(0.002)[mix], 51.0);

    feed(&mut m, &mut map, &[0xB0, 74, 0]);
    assert_relative_eq!(m.tick(0.002)[mix], 50.0);

    // Other channels are ignored
    feed(&mut m, &mut map, &[0xB1, 74, 127]);
    assert_relative_eq!(m.tick(0.002)[mix], 50.0);
}

#[test]
fn note_off_leaves_velocity_alone() {
    let mut m = matrix();
    let mut map = MidiSourceMap::new(m.sources(), None);
    let velocity = m.sources().id_of("VELOCITY").unwrap();

    feed(&mut m, &mut map, &[0x90, 60, 100]);
    feed(&mut m, &mut map, &[0x90, 60, 0]);
    m.tick(0.002);
    assert_relative_eq!(m.sources().value_of(velocity).unwrap(), 100.0 / 127.0);
}
