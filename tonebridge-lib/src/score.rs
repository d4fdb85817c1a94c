//! JSON score loading for driving the scheduler from a file.

use serde::{Deserialize, Serialize};

use crate::scheduler::NoteEvent;

/// One note in a score. The offset is relative to playback start, not to
/// the clock origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreNote {
    pub offset: f64,
    pub freq_value: f64,
    pub note_duration: f64,
}

/// A list of notes playable against the shared clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub notes: Vec<ScoreNote>,
}

impl Score {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Map the score onto the clock timeline starting at `base`.
    pub fn to_events(&self, base: f64) -> Vec<NoteEvent> {
        self.notes
            .iter()
            .map(|note| NoteEvent {
                time: base + note.offset,
                freq_value: note.freq_value,
                note_duration: note.note_duration,
            })
            .collect()
    }

    /// Seconds from playback start until the last note stops.
    pub fn length(&self) -> f64 {
        self.notes
            .iter()
            .map(|note| note.offset + note.note_duration)
            .fold(0.0, f64::max)
    }

    /// Short C-major arpeggio, emitted by `tonebridge create score-json`.
    pub fn template() -> Self {
        let note = |offset: f64, freq_value: f64, note_duration: f64| ScoreNote {
            offset,
            freq_value,
            note_duration,
        };

        Self {
            notes: vec![
                note(0.0, 261.63, 0.2),
                note(0.25, 329.63, 0.2),
                note(0.5, 392.0, 0.2),
                note(0.75, 523.25, 0.4),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_roundtrips_through_json() {
        let score = Score::template();
        let json = score.to_json().unwrap();
        assert!(json.contains("freqValue"));
        assert!(json.contains("noteDuration"));
        assert_eq!(Score::from_json(&json).unwrap(), score);
    }

    #[test]
    fn events_are_offset_from_the_base() {
        let score = Score::template();
        let events = score.to_events(10.0);
        assert_eq!(events.len(), score.notes.len());
        assert_eq!(events[0].time, 10.0);
        assert_eq!(events[3].time, 10.75);
        assert_eq!(events[3].freq_value, 523.25);
    }

    #[test]
    fn length_covers_the_last_note() {
        assert!((Score::template().length() - 1.15).abs() < 1e-9);
        let empty = Score { notes: vec![] };
        assert_eq!(empty.length(), 0.0);
    }
}
