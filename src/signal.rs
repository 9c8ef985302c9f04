//! Core signal processing trait.
//!
//! This module provides the fundamental `Signal` trait that represents
//! any audio signal source that can generate samples.

/// Common interface for anything that can generate audio samples.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
///
/// # Examples
///
/// ```
/// use portando::{Signal, SineWave};
///
/// let mut wave = SineWave::new(44100).unwrap();
///
/// // Sample at a time
/// let sample = wave.next_sample();
///
/// // Or a buffer at a time
/// let mut buffer = vec![0.0; 128];
/// wave.process(&mut buffer);
/// ```
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    /// Implementors may override this for more efficient batch processing.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}
