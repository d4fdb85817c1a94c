//! Engine: one command loop wiring the clock bridge and note scheduler.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::bridge::{ClockBridge, DEFAULT_FRAME_RATE};
use crate::clock::AudioClock;
use crate::message::{Command, Event};
use crate::output::{OutputMode, OutputStage};
use crate::scheduler::{NoteEvent, NoteScheduler};

/// Runtime options for the engine loop.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Clock update cadence in frames per second.
    pub frame_rate: f32,
    pub output: OutputMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            output: OutputMode::Device,
        }
    }
}

/// Control handle for a running engine loop.
///
/// The loop runs on its own thread and owns the output stage; the output
/// stream is not `Send`, so it is constructed inside the thread. Commands
/// are serialized through one channel, clock updates flow back through
/// another. Dropping the handle closes the command channel and winds the
/// loop down.
pub struct Engine {
    commands: Option<Sender<Command>>,
    initial_time: f64,
    handle: Option<JoinHandle<()>>,
}

impl Engine {
    /// Spawn the engine loop. Returns the control handle and the outbound
    /// event stream.
    pub fn spawn(config: EngineConfig) -> (Self, Receiver<Event>) {
        let clock = Arc::new(AudioClock::new());
        let initial_time = clock.current_time();

        let (commands, command_rx) = mpsc::channel();
        let (event_tx, events) = mpsc::channel();

        let handle = std::thread::spawn(move || run_loop(config, clock, command_rx, event_tx));

        (
            Self {
                commands: Some(commands),
                initial_time,
                handle: Some(handle),
            },
            events,
        )
    }

    /// Clock reading at construction. Lets the UI layer establish its
    /// time baseline before the first clock update arrives.
    pub fn initial_time(&self) -> f64 {
        self.initial_time
    }

    /// Send one command to the loop. Commands after shutdown are dropped
    /// with a warning.
    pub fn send(&self, command: Command) {
        if let Some(commands) = &self.commands {
            if commands.send(command).is_err() {
                log::warn!("engine loop is gone; command dropped");
            }
        }
    }

    pub fn start_clock(&self) {
        self.send(Command::StartClock);
    }

    pub fn stop_clock(&self) {
        self.send(Command::StopClock);
    }

    pub fn schedule_note(&self, event: NoteEvent) {
        self.send(Command::ScheduleNote(event));
    }

    /// Close the command channel and wait for the loop to finish.
    pub fn shutdown(self) {}
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.commands.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("engine loop panicked during join");
            }
        }
    }
}

fn run_loop(
    config: EngineConfig,
    clock: Arc<AudioClock>,
    commands: Receiver<Command>,
    events: Sender<Event>,
) {
    let output = Arc::new(OutputStage::open(config.output));
    let scheduler = NoteScheduler::new(Arc::clone(&clock), Arc::clone(&output));
    let mut bridge = ClockBridge::new(clock, events, config.frame_rate);

    while let Ok(command) = commands.recv() {
        match command {
            Command::StartClock => {
                output.resume();
                bridge.start();
            }
            Command::StopClock => {
                bridge.stop();
                output.suspend();
            }
            Command::ScheduleNote(event) => scheduler.schedule_note(event),
        }
    }

    bridge.stop();
}
