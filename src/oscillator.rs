//! Glide-capable sine wave generator.

use crate::Signal;
use crate::error::Error;
use crate::tuning::{
    bounded_by_end, decibels_to_amplitude_ratio, direction, interval_to_frequency_ratio,
    pitch_to_frequency,
};
use std::f64::consts::PI;

/// A monophonic sine wave generator with portamento.
///
/// The generator keeps a continuously-evolving phase accumulator, so the
/// waveform stays free of discontinuities while pitch and loudness change.
/// Frequency and amplitude each carry a goal value; whenever the current
/// value differs from its goal, rendered buffers follow an exponential
/// glide toward the goal (semitones per second for pitch, decibels per
/// second for loudness) and settle exactly on it.
///
/// # Examples
///
/// ```
/// use portando::SineWave;
///
/// let mut wave = SineWave::new(44100)
///     .unwrap()
///     .with_pitch(0.0)
///     .with_decibels(-6.0);
///
/// // Start a glide one octave up
/// wave.glide_to_pitch(12.0);
///
/// // Render one second of audio in driver-sized chunks
/// let mut buffer = vec![0.0; 512];
/// for _ in 0..86 {
///     wave.render(&mut buffer);
/// }
/// ```
pub struct SineWave {
    /// Instantaneous frequency in Hz at the start of the next buffer
    frequency: f64,
    /// Frequency the glide is heading toward
    goal_frequency: f64,
    /// Instantaneous linear amplitude at the start of the next buffer
    amplitude: f64,
    /// Amplitude the glide is heading toward
    goal_amplitude: f64,
    /// Accumulated phase in cycles, wrapped to [0.0, 1.0) after each render
    phase: f64,
    /// Pitch glide rate in semitones per second
    pitch_per_second: f64,
    /// Amplitude glide rate in decibels per second
    decibels_per_second: f64,
    sample_rate: u32,
}

impl SineWave {
    /// Creates a new generator at the given sample rate.
    ///
    /// The generator starts at pitch 0 (middle C, 261.625565 Hz) with a
    /// +1 dB amplitude ratio, gliding at 12 semitones and 1 decibel per
    /// second. A zero sample rate is rejected with
    /// [`Error::InvalidSampleRate`].
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in frames per second (e.g. 44100)
    ///
    /// # Examples
    ///
    /// ```
    /// use portando::SineWave;
    ///
    /// let wave = SineWave::new(44100).unwrap();
    /// assert_eq!(wave.sample_rate(), 44100);
    ///
    /// assert!(SineWave::new(0).is_err());
    /// ```
    pub fn new(sample_rate: u32) -> Result<Self, Error> {
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        let frequency = pitch_to_frequency(0.0);
        let amplitude = decibels_to_amplitude_ratio(1.0);
        Ok(Self {
            frequency,
            goal_frequency: frequency,
            amplitude,
            goal_amplitude: amplitude,
            phase: 0.0,
            pitch_per_second: 12.0,
            decibels_per_second: 1.0,
            sample_rate,
        })
    }

    /// Sets the starting pitch in semitones relative to middle C.
    ///
    /// # Examples
    ///
    /// ```
    /// use portando::SineWave;
    ///
    /// // A above middle C (440 Hz)
    /// let wave = SineWave::new(44100).unwrap().with_pitch(9.0);
    /// assert!((wave.frequency() - 440.0).abs() < 0.01);
    /// ```
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.set_pitch(pitch);
        self
    }

    /// Sets the starting loudness in decibels (+10 dB doubles the amplitude).
    ///
    /// # Examples
    ///
    /// ```
    /// use portando::SineWave;
    ///
    /// let wave = SineWave::new(44100).unwrap().with_decibels(-10.0);
    /// assert_eq!(wave.amplitude(), 0.5);
    /// ```
    pub fn with_decibels(mut self, decibels: f64) -> Self {
        let amplitude = decibels_to_amplitude_ratio(decibels);
        self.amplitude = amplitude;
        self.goal_amplitude = amplitude;
        self
    }

    /// Sets the pitch glide rate in semitones per second.
    pub fn with_pitch_glide(mut self, semitones_per_second: f64) -> Self {
        self.pitch_per_second = semitones_per_second;
        self
    }

    /// Sets the amplitude glide rate in decibels per second.
    pub fn with_amplitude_glide(mut self, decibels_per_second: f64) -> Self {
        self.decibels_per_second = decibels_per_second;
        self
    }

    /// Jumps to a new pitch immediately.
    ///
    /// Both the current and goal frequency snap to the new value, so the
    /// next buffer starts at the new pitch with no glide. Phase is
    /// preserved, keeping the waveform continuous across the jump.
    ///
    /// # Arguments
    ///
    /// * `pitch` - Semitone offset relative to middle C (fractional and
    ///   negative values are allowed)
    ///
    /// # Examples
    ///
    /// ```
    /// use portando::SineWave;
    ///
    /// let mut wave = SineWave::new(44100).unwrap();
    /// wave.set_pitch(12.0);
    /// assert!((wave.frequency() - 523.25113).abs() < 1e-4);
    /// assert_eq!(wave.frequency(), wave.goal_frequency());
    /// ```
    pub fn set_pitch(&mut self, pitch: f64) {
        self.frequency = pitch_to_frequency(pitch);
        self.goal_frequency = self.frequency;
    }

    /// Starts a glide toward a new pitch.
    ///
    /// Only the goal changes; the glide departs from wherever the
    /// frequency currently is and proceeds at the configured rate on
    /// subsequent renders.
    ///
    /// # Examples
    ///
    /// ```
    /// use portando::SineWave;
    ///
    /// let mut wave = SineWave::new(44100).unwrap();
    /// wave.glide_to_pitch(12.0);
    /// assert!(wave.goal_frequency() > wave.frequency());
    /// ```
    pub fn glide_to_pitch(&mut self, pitch: f64) {
        self.goal_frequency = pitch_to_frequency(pitch);
    }

    /// Starts a glide toward a new loudness, given in decibels.
    pub fn set_decibels(&mut self, decibels: f64) {
        self.goal_amplitude = decibels_to_amplitude_ratio(decibels);
    }

    /// Jumps to a new frequency in Hz immediately, like [`set_pitch`].
    ///
    /// Non-positive and NaN inputs are clamped to the smallest positive
    /// value, keeping the frequency strictly positive.
    ///
    /// [`set_pitch`]: SineWave::set_pitch
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency.max(f64::MIN_POSITIVE);
        self.goal_frequency = self.frequency;
    }

    /// Starts a glide toward a new frequency in Hz.
    pub fn set_goal_frequency(&mut self, frequency: f64) {
        self.goal_frequency = frequency;
    }

    /// Starts a glide toward a new linear amplitude ratio.
    pub fn set_goal_amplitude(&mut self, amplitude: f64) {
        self.goal_amplitude = amplitude;
    }

    /// Current instantaneous frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Frequency the glide is heading toward, in Hz.
    pub fn goal_frequency(&self) -> f64 {
        self.goal_frequency
    }

    /// Current instantaneous linear amplitude.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Amplitude the glide is heading toward.
    pub fn goal_amplitude(&self) -> f64 {
        self.goal_amplitude
    }

    /// Current phase in cycles, in [0.0, 1.0).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Sample rate in frames per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Renders the next chunk of the waveform into `out`.
    ///
    /// Frequency and amplitude follow exponential glide trajectories
    /// toward their goals over the course of the buffer and are bounded so
    /// they stop exactly on the goal. The frequency of every frame is
    /// integrated into the phase accumulator, so consecutive buffers join
    /// without discontinuities. After the call the stored frequency,
    /// amplitude, and phase reflect the last rendered frame, with phase
    /// wrapped back into [0.0, 1.0).
    ///
    /// Trajectory time restarts at zero each buffer, so the first frame
    /// always carries the stored frequency and amplitude unchanged.
    /// Rendering into an empty buffer leaves all state untouched.
    ///
    /// # Arguments
    ///
    /// * `out` - Buffer to fill, one frame per element
    pub fn render(&mut self, out: &mut [f64]) {
        if out.is_empty() {
            return;
        }

        let delta_time = 1.0 / f64::from(self.sample_rate);
        let freq_direction = direction(self.frequency, self.goal_frequency);
        let amp_direction = direction(self.amplitude, self.goal_amplitude);

        let mut frequency = self.frequency;
        let mut amplitude = self.amplitude;
        let mut phase = self.phase;

        for (i, sample) in out.iter_mut().enumerate() {
            let t = i as f64 * delta_time;
            frequency = bounded_by_end(
                self.frequency
                    * interval_to_frequency_ratio(freq_direction * self.pitch_per_second * t),
                self.frequency,
                self.goal_frequency,
            );
            amplitude = bounded_by_end(
                self.amplitude
                    * decibels_to_amplitude_ratio(amp_direction * self.decibels_per_second * t),
                self.amplitude,
                self.goal_amplitude,
            );
            phase += frequency * delta_time;
            *sample = amplitude * (2.0 * PI * phase).sin();
        }

        self.frequency = frequency;
        self.amplitude = amplitude;
        // Wrap accumulated cycles so phase never overflows
        self.phase = phase % 1.0;
    }
}

impl Signal for SineWave {
    fn next_sample(&mut self) -> f64 {
        let mut frame = [0.0];
        self.render(&mut frame);
        frame[0]
    }

    fn process(&mut self, buffer: &mut [f64]) {
        self.render(buffer);
    }
}
