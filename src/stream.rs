//! Audio driver adapter: feeds a [`Voice`] to a cpal output stream.
//!
//! The stream is opened once and runs for the adapter's lifetime; the
//! start/stop gate only decides whether a cycle renders the voice or writes
//! silence. Driver status reports are advisory and logged, never fatal.

use crate::error::Error;
use crate::voice::{Controls, Voice};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use std::sync::Arc;

/// Configuration for opening an output stream.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Frames per driver buffer; default: 512
    pub frame_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { frame_count: 512 }
    }
}

/// A running cpal output stream playing one [`Voice`].
///
/// The voice renders mono; its samples are fanned out to every channel of
/// the device. Dropping the adapter closes the stream.
///
/// # Examples
///
/// ```no_run
/// use portando::{Config, OutputStream, SineWave, Voice};
///
/// # fn main() -> Result<(), portando::Error> {
/// let rate = OutputStream::default_sample_rate()?;
/// let voice = Voice::new(SineWave::new(rate)?.with_decibels(-6.0));
/// let stream = OutputStream::open(voice, Config::default())?;
///
/// stream.set_pitch(0.0);
/// stream.start();
/// # Ok(())
/// # }
/// ```
pub struct OutputStream {
    _stream: cpal::Stream,
    controls: Arc<Controls>,
}

impl OutputStream {
    /// Opens the default output device and starts a stream for `voice`.
    ///
    /// The stream runs at the voice's sample rate with a fixed buffer of
    /// `config.frame_count` frames. A zero frame count is rejected with
    /// [`Error::InvalidFrameCount`] before any device interaction. The
    /// stream comes up silent; call [`start`] to make it audible.
    ///
    /// [`start`]: OutputStream::start
    pub fn open(voice: Voice, config: Config) -> Result<Self, Error> {
        if config.frame_count == 0 {
            return Err(Error::InvalidFrameCount(config.frame_count));
        }

        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());

        let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
        if let Ok(name) = device.name() {
            log::info!("cpal device: {}", name);
        } else {
            log::info!("cpal device: (no name)");
        }

        let default_config = device.default_output_config()?;
        let stream_config = StreamConfig {
            channels: default_config.channels(),
            sample_rate: cpal::SampleRate(voice.sample_rate()),
            buffer_size: BufferSize::Fixed(config.frame_count),
        };
        log::info!("sample rate: {}", stream_config.sample_rate.0);
        log::info!("num channels: {}", stream_config.channels);
        log::info!("buffer size: {:?}", stream_config.buffer_size);

        let controls = voice.controls();
        let stream = match default_config.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, voice)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, voice)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, voice)?,
            sample_format => return Err(Error::UnsupportedSampleFormat(sample_format)),
        };
        stream.play()?;

        Ok(Self {
            _stream: stream,
            controls,
        })
    }

    /// Sample rate preferred by the default output device, in frames per
    /// second.
    ///
    /// Build the generator at this rate when the stream should follow the
    /// device rather than force a rate of its own.
    pub fn default_sample_rate() -> Result<u32, Error> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
        let config = device.default_output_config()?;
        Ok(config.sample_rate().0)
    }

    /// Makes the voice audible; idempotent.
    pub fn start(&self) {
        self.controls.start();
    }

    /// Silences the voice while leaving generator state intact, so a later
    /// [`start`] resumes seamlessly; idempotent.
    ///
    /// [`start`]: OutputStream::start
    pub fn stop(&self) {
        self.controls.stop();
    }

    /// Returns true while the voice is audible.
    pub fn is_playing(&self) -> bool {
        self.controls.is_playing()
    }

    /// Jumps to a pitch (semitones relative to middle C) on the next cycle.
    pub fn set_pitch(&self, pitch: f64) {
        self.controls.set_pitch(pitch);
    }

    /// Glides to a pitch, departing from the current frequency.
    pub fn glide_to_pitch(&self, pitch: f64) {
        self.controls.glide_to_pitch(pitch);
    }

    /// Glides loudness to the given decibel level.
    pub fn set_decibels(&self, decibels: f64) {
        self.controls.set_decibels(decibels);
    }

    /// Number of render cycles replaced by silence after a generator
    /// failure.
    pub fn render_failures(&self) -> u32 {
        self.controls.render_failures()
    }

    /// Shared handle for steering the voice from other threads.
    pub fn controls(&self) -> Arc<Controls> {
        Arc::clone(&self.controls)
    }
}

/// Builds an output stream that pulls cycles from the voice.
fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut voice: Voice,
) -> Result<cpal::Stream, Error>
where
    T: Sample + FromSample<f64> + SizedSample,
{
    let channels = config.channels as usize;
    // Mono scratch buffer, grown to the driver's demand on the first
    // cycle and reused afterwards
    let mut scratch: Vec<f64> = Vec::new();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / channels;
            if scratch.len() != frames {
                scratch.resize(frames, 0.0);
            }
            voice.fill(&mut scratch);
            for (frame, &sample) in data.chunks_mut(channels).zip(scratch.iter()) {
                let value: T = T::from_sample(sample);
                for out in frame.iter_mut() {
                    *out = value;
                }
            }
        },
        |err| log::warn!("output stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SineWave;

    #[test]
    fn test_default_config() {
        assert_eq!(Config::default().frame_count, 512);
    }

    #[test]
    fn test_zero_frame_count_rejected_before_device_setup() {
        let voice = Voice::new(SineWave::new(44100).unwrap());
        let result = OutputStream::open(voice, Config { frame_count: 0 });
        assert!(matches!(result, Err(Error::InvalidFrameCount(0))));
    }
}
