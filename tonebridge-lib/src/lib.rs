//! # Tonebridge Audio Library
//!
//! Core audio plumbing for the Tonebridge keyboard: a pausable shared
//! clock, a clock bridge that reports the reading once per frame, and a
//! note scheduler that realizes timed tones through one shared output
//! stage. The UI layer drives everything over the command/event channel
//! exposed by the engine.

pub mod bridge;
pub mod clock;
pub mod engine;
pub mod message;
pub mod output;
pub mod scheduler;
pub mod score;
