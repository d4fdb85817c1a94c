//! Note scheduling: declarative note requests become fire-and-forget tones.

use std::sync::Arc;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::Source;
use serde::{Deserialize, Serialize};

use crate::clock::AudioClock;
use crate::output::OutputStage;

/// A single note request on the shared clock timeline.
///
/// Consumed exactly once by the scheduler; no history is kept. Frequency
/// and duration are taken as-is, validation is the caller's
/// responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    /// Absolute start instant, in clock seconds.
    pub time: f64,
    /// Oscillator frequency in Hz.
    pub freq_value: f64,
    /// Tone length in seconds.
    pub note_duration: f64,
}

/// A configured single-use tone: one frequency, one start/stop window.
///
/// Units are never reused; once realized as a source and mixed, the
/// output stage reclaims them after the stop instant elapses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneUnit {
    freq: f32,
    start_at: f64,
    stop_at: f64,
}

impl ToneUnit {
    pub fn from_event(event: &NoteEvent) -> Self {
        Self {
            freq: event.freq_value as f32,
            start_at: event.time,
            stop_at: event.time + event.note_duration,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.freq
    }

    pub fn start_at(&self) -> f64 {
        self.start_at
    }

    pub fn stop_at(&self) -> f64 {
        self.stop_at
    }

    /// Silence inserted ahead of the tone when realized at clock reading
    /// `now`. Start instants already in the past collapse to an immediate
    /// start.
    pub fn delay_from(&self, now: f64) -> Duration {
        Duration::from_secs_f64((self.start_at - now).max(0.0))
    }

    fn length(&self) -> Duration {
        Duration::from_secs_f64((self.stop_at - self.start_at).max(0.0))
    }

    /// Realize the unit as a mixable source, relative to clock reading
    /// `now`.
    pub fn into_source(self, now: f64) -> impl Source<Item = f32> + Send {
        SineWave::new(self.freq)
            .take_duration(self.length())
            .delay(self.delay_from(now))
    }
}

/// Converts note requests into tones on the shared output stage.
pub struct NoteScheduler {
    clock: Arc<AudioClock>,
    output: Arc<OutputStage>,
}

impl NoteScheduler {
    pub fn new(clock: Arc<AudioClock>, output: Arc<OutputStage>) -> Self {
        Self { clock, output }
    }

    /// Schedule one tone. Independent of any other scheduled tone; there
    /// is no cancellation and no polyphony limit.
    pub fn schedule_note(&self, event: NoteEvent) {
        let unit = ToneUnit::from_event(&event);
        let now = self.clock.current_time();
        log::debug!(
            "scheduling {:.2} Hz at {:.3}s for {:.3}s",
            unit.frequency(),
            unit.start_at(),
            event.note_duration
        );
        self.output.mix(unit.into_source(now));
    }
}
