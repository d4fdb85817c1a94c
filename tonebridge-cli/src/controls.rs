use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use tonebridge_lib::engine::Engine;
use tonebridge_lib::scheduler::NoteEvent;

/// Home-row note frequencies, C4 through C5.
const KEY_NOTES: [(char, f64); 8] = [
    ('a', 261.63),
    ('s', 293.66),
    ('d', 329.63),
    ('f', 349.23),
    ('g', 392.00),
    ('h', 440.00),
    ('j', 493.88),
    ('k', 523.25),
];

/// Lead time between a key press and the tone start, in seconds. Gives
/// the mixer a frame of headroom so key notes never start in the past.
const KEY_NOTE_LEAD: f64 = 0.05;
const KEY_NOTE_DURATION: f64 = 0.3;

pub struct StatusSnapshot {
    pub text: String,
}

pub struct StatusArgs {
    pub time: f64,
    pub running: bool,
    pub scheduled: usize,
}

/// Transport state tracked by the runner loop.
pub struct Transport {
    pub clock_running: bool,
    pub scheduled: usize,
}

pub fn status_text(args: StatusArgs) -> StatusSnapshot {
    let state = if args.running { "▶ Running" } else { "⏸ Stopped" };
    let text = format!(
        "{}   clock {}   notes scheduled: {}",
        state,
        format_time(args.time),
        args.scheduled
    );

    StatusSnapshot { text }
}

pub fn handle_key_event(engine: &Engine, last_time: f64, transport: &mut Transport) -> bool {
    if event::poll(Duration::from_millis(100)).unwrap_or(false) {
        if let Ok(TermEvent::Key(key)) = event::read() {
            if key.kind != KeyEventKind::Press {
                return true;
            }
            match key.code {
                KeyCode::Char('q') => {
                    engine.stop_clock();
                    return false;
                }
                KeyCode::Char(' ') => {
                    if transport.clock_running {
                        engine.stop_clock();
                    } else {
                        engine.start_clock();
                    }
                    transport.clock_running = !transport.clock_running;
                }
                KeyCode::Char(pressed) => {
                    if let Some(&(_, freq_value)) =
                        KEY_NOTES.iter().find(|(key, _)| *key == pressed)
                    {
                        engine.schedule_note(NoteEvent {
                            time: last_time + KEY_NOTE_LEAD,
                            freq_value,
                            note_duration: KEY_NOTE_DURATION,
                        });
                        transport.scheduled += 1;
                    }
                }
                _ => {}
            }
        }
    }

    true
}

fn format_time(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    let tenths = ((seconds.max(0.0) - whole as f64) * 10.0) as u64;
    let minutes = whole / 60;
    let secs = whole % 60;

    format!("{:02}:{:02}.{}", minutes, secs, tenths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_reflects_transport() {
        let status = status_text(StatusArgs {
            time: 83.4,
            running: true,
            scheduled: 7,
        });
        assert!(status.text.contains("Running"));
        assert!(status.text.contains("01:23.4"));
        assert!(status.text.contains("7"));
    }

    #[test]
    fn format_time_clamps_negative_readings() {
        assert_eq!(format_time(-1.0), "00:00.0");
    }
}
