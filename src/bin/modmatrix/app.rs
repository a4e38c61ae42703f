//! Control thread: owns the matrix, runs it at the control rate

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use modmatrix::{CommandQueue, EngineConfig, MidiEvent, MidiSourceMap, ModMatrix};
use rtrb::{Consumer, RingBuffer};

use super::{generator::DemoSignals, ui::Snapshot};

/// UI refresh rate the snapshot stream is thinned to.
const SNAPSHOT_HZ: f64 = 60.0;
const SNAPSHOT_RING: usize = 8;
/// Seconds between demo notes.
const NOTE_INTERVAL: f64 = 1.5;

pub struct ControlThread {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ControlThread {
    /// Move the matrix onto its own thread. Returns the stream of snapshots
    /// it publishes for the UI.
    pub fn spawn(mut matrix: ModMatrix, mut queue: CommandQueue, config: &EngineConfig) -> (Self, Consumer<Snapshot>) {
        let (mut snapshot_tx, snapshot_rx) = RingBuffer::<Snapshot>::new(SNAPSHOT_RING);
        let running = Arc::new(AtomicBool::new(true));

        let period = config.control_period();
        let publish_every = ((1.0 / period) / SNAPSHOT_HZ).ceil().max(1.0) as u64;
        let mut midi = MidiSourceMap::new(matrix.sources(), config.midi_channel);

        let handle = thread::spawn({
            let running = running.clone();
            move || {
                let mut signals = DemoSignals::new(matrix.sources());
                let mut tick: u64 = 0;
                let mut since_note = NOTE_INTERVAL;
                let mut deadline = Instant::now();

                while running.load(Ordering::Relaxed) {
                    signals.advance(period, |source, value| {
                        let _ = matrix.push_source(source, value);
                    });

                    since_note += period;
                    if since_note >= NOTE_INTERVAL {
                        since_note = 0.0;
                        if let Some(event) = MidiEvent::from_slice(&signals.note_on()) {
                            for (source, value) in midi.convert(event) {
                                let _ = matrix.push_source(source, value);
                            }
                        }
                    }

                    matrix.process(period, &mut queue);

                    if tick % publish_every == 0 {
                        // UI is behind; it only wants the latest anyway
                        let _ = snapshot_tx.push(Snapshot::capture(&matrix, tick));
                    }
                    tick += 1;

                    deadline += Duration::from_secs_f64(period);
                    if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                        thread::sleep(wait);
                    } else {
                        // Overran; don't try to catch up
                        deadline = Instant::now();
                    }
                }
                log::debug!("control thread stopped after {tick} ticks");
            }
        });

        (
            Self {
                running,
                handle: Some(handle),
            },
            snapshot_rx,
        )
    }

    pub fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("control thread panicked");
            }
        }
    }
}
