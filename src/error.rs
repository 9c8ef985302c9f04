//! Error type for generator and stream construction.

use std::fmt;

/// Errors reported while constructing a generator or opening an output
/// stream.
///
/// Configuration problems are rejected synchronously at construction time;
/// nothing in the render path produces an `Error`.
#[derive(Debug)]
pub enum Error {
    /// The requested sample rate was zero
    InvalidSampleRate(u32),
    /// The requested frames-per-buffer count was zero
    InvalidFrameCount(u32),
    /// No output device is available on the default audio host
    #[cfg(feature = "stream")]
    NoOutputDevice,
    /// The output device did not report a default configuration
    #[cfg(feature = "stream")]
    DefaultStreamConfig(cpal::DefaultStreamConfigError),
    /// The output device uses a sample format this crate cannot feed
    #[cfg(feature = "stream")]
    UnsupportedSampleFormat(cpal::SampleFormat),
    /// Building the output stream failed
    #[cfg(feature = "stream")]
    BuildStream(cpal::BuildStreamError),
    /// Starting the output stream failed
    #[cfg(feature = "stream")]
    PlayStream(cpal::PlayStreamError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSampleRate(rate) => write!(f, "invalid sample rate: {}", rate),
            Error::InvalidFrameCount(frames) => write!(f, "invalid frame count: {}", frames),
            #[cfg(feature = "stream")]
            Error::NoOutputDevice => write!(f, "no output device available"),
            #[cfg(feature = "stream")]
            Error::DefaultStreamConfig(err) => write!(f, "no default stream config: {}", err),
            #[cfg(feature = "stream")]
            Error::UnsupportedSampleFormat(format) => {
                write!(f, "unsupported sample format: {}", format)
            }
            #[cfg(feature = "stream")]
            Error::BuildStream(err) => write!(f, "failed to build output stream: {}", err),
            #[cfg(feature = "stream")]
            Error::PlayStream(err) => write!(f, "failed to start output stream: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "stream")]
            Error::DefaultStreamConfig(err) => Some(err),
            #[cfg(feature = "stream")]
            Error::BuildStream(err) => Some(err),
            #[cfg(feature = "stream")]
            Error::PlayStream(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "stream")]
impl From<cpal::DefaultStreamConfigError> for Error {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        Error::DefaultStreamConfig(err)
    }
}

#[cfg(feature = "stream")]
impl From<cpal::BuildStreamError> for Error {
    fn from(err: cpal::BuildStreamError) -> Self {
        Error::BuildStream(err)
    }
}

#[cfg(feature = "stream")]
impl From<cpal::PlayStreamError> for Error {
    fn from(err: cpal::PlayStreamError) -> Self {
        Error::PlayStream(err)
    }
}
