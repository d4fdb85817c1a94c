//! Command and event payloads exchanged with the UI layer.

use serde::{Deserialize, Serialize};

use crate::scheduler::NoteEvent;

/// Inbound command from the UI layer to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Command {
    /// Begin per-frame clock sampling.
    StartClock,
    /// End clock sampling and suspend the time source.
    StopClock,
    /// Schedule one tone against the shared clock.
    ScheduleNote(NoteEvent),
}

/// Outbound event from the engine to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Event {
    /// Clock reading, emitted once per frame while the clock runs.
    #[serde(rename_all = "camelCase")]
    ClockUpdate { current_time: f64 },
}
