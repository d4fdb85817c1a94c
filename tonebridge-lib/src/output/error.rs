use std::fmt::{Display, Formatter};

use rodio::{PlayError, StreamError};

/// Error type for opening the output stage against a device.
#[derive(Debug)]
pub enum OutputError {
    Stream(StreamError),
    Sink(PlayError),
}

impl Display for OutputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stream(err) => write!(f, "output stream error: {}", err),
            Self::Sink(err) => write!(f, "sink error: {}", err),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<StreamError> for OutputError {
    fn from(value: StreamError) -> Self {
        Self::Stream(value)
    }
}

impl From<PlayError> for OutputError {
    fn from(value: PlayError) -> Self {
        Self::Sink(value)
    }
}
