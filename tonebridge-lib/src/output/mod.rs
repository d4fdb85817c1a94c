//! Shared output stage: one stream, one sink, one mixer.

mod error;

use std::sync::Arc;

use rodio::dynamic_mixer::{self, DynamicMixerController};
use rodio::queue::SourcesQueueOutput;
use rodio::source::Zero;
use rodio::{OutputStream, Sink, Source};

pub use error::OutputError;

/// Fixed attenuation applied to everything the mixer produces.
pub const OUTPUT_GAIN: f32 = 0.2;

const MIX_CHANNELS: u16 = 1;
const MIX_SAMPLE_RATE: u32 = 44_100;

/// How the output stage reaches the audio hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Render through the default output device.
    Device,
    /// No device; samples are produced but never heard. Used by tests
    /// and headless hosts.
    Detached,
}

/// The single gain-controlled path to the output device.
///
/// Every tone source is added to the same dynamic mixer, which feeds one
/// sink with a fixed volume for the life of the stage. Suspending pauses
/// sample consumption, so scheduled tone windows freeze along with the
/// clock.
pub struct OutputStage {
    controller: Arc<DynamicMixerController<f32>>,
    sink: Sink,
    _stream: Option<OutputStream>,
}

impl OutputStage {
    /// Open the stage for `mode`, falling back to a detached stage with a
    /// logged warning when the device cannot be opened. Callers observe
    /// device failure only as silence.
    pub fn open(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Device => Self::open_default().unwrap_or_else(|err| {
                log::warn!("audio output unavailable ({}); continuing detached", err);
                Self::detached()
            }),
            OutputMode::Detached => Self::detached(),
        }
    }

    /// Open the stage against the default output device.
    pub fn open_default() -> Result<Self, OutputError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;
        Ok(Self::assemble(sink, Some(stream)))
    }

    /// Build a stage whose sink is never drained by a device.
    pub fn detached() -> Self {
        Self::detached_with_tap().0
    }

    /// Detached stage plus the idle sink's queue output, letting callers
    /// drain exactly what the stage renders.
    pub fn detached_with_tap() -> (Self, SourcesQueueOutput<f32>) {
        let (sink, queue) = Sink::new_idle();
        (Self::assemble(sink, None), queue)
    }

    fn assemble(sink: Sink, stream: Option<OutputStream>) -> Self {
        let (controller, mixer) = dynamic_mixer::mixer::<f32>(MIX_CHANNELS, MIX_SAMPLE_RATE);
        // The dynamic mixer ends the moment it runs out of sources and the
        // sink would drop it for good; an infinite silent source keeps it
        // alive across gaps with no scheduled tones.
        controller.add(Zero::<f32>::new(MIX_CHANNELS, MIX_SAMPLE_RATE));
        sink.set_volume(OUTPUT_GAIN);
        sink.append(mixer);
        sink.pause();

        Self {
            controller,
            sink,
            _stream: stream,
        }
    }

    /// Add one source to the shared mixer. The mixer reclaims it once it
    /// ends; nothing tracks it afterwards.
    pub fn mix<S>(&self, source: S)
    where
        S: Source<Item = f32> + Send + 'static,
    {
        self.controller.add(source);
    }

    /// Resume sample consumption. No-op if already running.
    pub fn resume(&self) {
        self.sink.play();
    }

    /// Pause sample consumption. No-op if already suspended.
    pub fn suspend(&self) {
        self.sink.pause();
    }

    pub fn is_suspended(&self) -> bool {
        self.sink.is_paused()
    }

    pub fn gain(&self) -> f32 {
        self.sink.volume()
    }
}
