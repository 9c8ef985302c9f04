//! Voice - a generator paired with a lock-free control plane.
//!
//! The render context (usually an audio driver callback) exclusively owns
//! the generator inside a [`Voice`] and pulls buffers out of it. Any other
//! thread steers playback through the shared [`Controls`] handle, whose
//! parameter slots are plain atomics. Pending values are applied exactly
//! once at the top of each render cycle, so the real-time path never locks.

use crate::oscillator::SineWave;
use crate::tuning::{decibels_to_amplitude_ratio, pitch_to_frequency};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// An `f64` stored as its bit pattern in an `AtomicU64`.
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    const fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Shared playback controls for a [`Voice`].
///
/// All methods are lock-free single-slot updates, safe to call from any
/// thread at any time. Each slot holds one logical parameter; a new value
/// replaces the previous one, and the render context reads the slots once
/// per cycle. Frequency and amplitude updates landing in different cycles
/// only shift a glide by one buffer, never corrupt state.
pub struct Controls {
    playing: AtomicBool,
    target_frequency: AtomicF64,
    snap: AtomicBool,
    target_amplitude: AtomicF64,
    render_failures: AtomicU32,
}

impl Controls {
    fn new(oscillator: &SineWave) -> Self {
        Self {
            playing: AtomicBool::new(false),
            target_frequency: AtomicF64::new(oscillator.goal_frequency()),
            snap: AtomicBool::new(false),
            target_amplitude: AtomicF64::new(oscillator.goal_amplitude()),
            render_failures: AtomicU32::new(0),
        }
    }

    /// Makes the voice audible; idempotent.
    pub fn start(&self) {
        self.playing.store(true, Ordering::Release);
    }

    /// Silences the voice without touching generator state, so a later
    /// [`start`] resumes with the same phase; idempotent.
    ///
    /// [`start`]: Controls::start
    pub fn stop(&self) {
        self.playing.store(false, Ordering::Release);
    }

    /// Returns true while the voice is audible.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Jumps to a pitch (semitones relative to middle C) on the next cycle.
    pub fn set_pitch(&self, pitch: f64) {
        self.target_frequency.set(pitch_to_frequency(pitch));
        // Publish the frequency write together with the snap request
        self.snap.store(true, Ordering::Release);
    }

    /// Glides to a pitch, departing from the current frequency.
    pub fn glide_to_pitch(&self, pitch: f64) {
        self.target_frequency.set(pitch_to_frequency(pitch));
    }

    /// Glides loudness to the given decibel level.
    pub fn set_decibels(&self, decibels: f64) {
        self.target_amplitude
            .set(decibels_to_amplitude_ratio(decibels));
    }

    /// Glides to a target frequency in Hz.
    pub fn set_goal_frequency(&self, frequency: f64) {
        self.target_frequency.set(frequency);
    }

    /// Glides to a target linear amplitude ratio.
    pub fn set_goal_amplitude(&self, amplitude: f64) {
        self.target_amplitude.set(amplitude);
    }

    /// Number of render cycles replaced with silence after a failure
    /// inside the generator.
    pub fn render_failures(&self) -> u32 {
        self.render_failures.load(Ordering::Relaxed)
    }
}

/// A sine generator owned by the render context.
///
/// # Examples
///
/// ```
/// use portando::{SineWave, Voice};
///
/// let mut voice = Voice::new(SineWave::new(44100).unwrap());
/// let controls = voice.controls();
///
/// controls.set_pitch(9.0);
/// controls.start();
///
/// // The render context (an audio callback, or a test) pulls buffers
/// let mut buffer = vec![0.0; 512];
/// voice.fill(&mut buffer);
/// ```
pub struct Voice {
    oscillator: SineWave,
    controls: Arc<Controls>,
}

impl Voice {
    /// Wraps a generator, seeding the control slots from its current goals.
    pub fn new(oscillator: SineWave) -> Self {
        let controls = Arc::new(Controls::new(&oscillator));
        Self {
            oscillator,
            controls,
        }
    }

    /// Shared handle for steering this voice from other threads.
    pub fn controls(&self) -> Arc<Controls> {
        Arc::clone(&self.controls)
    }

    /// The wrapped generator.
    pub fn oscillator(&self) -> &SineWave {
        &self.oscillator
    }

    /// Sample rate of the wrapped generator.
    pub fn sample_rate(&self) -> u32 {
        self.oscillator.sample_rate()
    }

    fn apply_controls(&mut self) {
        // Consume the flag before reading the slot; this Acquire pairs
        // with the Release store in Controls::set_pitch
        let snap = self.controls.snap.swap(false, Ordering::Acquire);
        let target_frequency = self.controls.target_frequency.get();
        if snap {
            self.oscillator.set_frequency(target_frequency);
        } else {
            self.oscillator.set_goal_frequency(target_frequency);
        }
        self.oscillator
            .set_goal_amplitude(self.controls.target_amplitude.get());
    }

    /// Runs one render cycle, filling `out` with exactly `out.len()` frames.
    ///
    /// While stopped the buffer is zeroed and the generator stays frozen,
    /// so restarting resumes the waveform where it left off. Pending
    /// control values are applied once before rendering. A panic inside
    /// the generator is contained here: the cycle degrades to silence and
    /// is counted in [`Controls::render_failures`] instead of crossing
    /// into the caller.
    pub fn fill(&mut self, out: &mut [f64]) {
        if !self.controls.is_playing() {
            out.fill(0.0);
            return;
        }

        self.apply_controls();

        let rendered = panic::catch_unwind(AssertUnwindSafe(|| self.oscillator.render(out)));
        if rendered.is_err() {
            self.recover_render_failure(out);
        }
    }

    /// Replaces a failed cycle with silence and records the failure.
    fn recover_render_failure(&mut self, out: &mut [f64]) {
        out.fill(0.0);
        self.controls.render_failures.fetch_add(1, Ordering::Relaxed);
        log::error!("render cycle failed, substituting silence");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44100;

    fn test_voice() -> Voice {
        Voice::new(SineWave::new(SAMPLE_RATE).unwrap())
    }

    #[test]
    fn test_atomic_f64_round_trip() {
        let slot = AtomicF64::new(1.5);
        assert_eq!(slot.get(), 1.5);
        slot.set(-0.25);
        assert_eq!(slot.get(), -0.25);
    }

    #[test]
    fn test_stopped_voice_emits_silence_and_stays_frozen() {
        let mut voice = test_voice();
        let mut buffer = vec![1.0; 64];
        voice.fill(&mut buffer);

        assert!(buffer.iter().all(|&s| s == 0.0));
        assert_eq!(voice.oscillator().phase(), 0.0);
    }

    #[test]
    fn test_started_voice_renders_audio() {
        let mut voice = test_voice();
        voice.controls().start();

        let mut buffer = vec![0.0; 64];
        voice.fill(&mut buffer);

        assert!(buffer.iter().any(|&s| s != 0.0));
        assert!(voice.oscillator().phase() > 0.0);
    }

    #[test]
    fn test_start_stop_are_idempotent() {
        let voice = test_voice();
        let controls = voice.controls();

        assert!(!controls.is_playing());
        controls.start();
        controls.start();
        assert!(controls.is_playing());
        controls.stop();
        controls.stop();
        assert!(!controls.is_playing());
    }

    #[test]
    fn test_stop_freezes_state_for_seamless_resume() {
        let mut voice = test_voice();
        let controls = voice.controls();
        let mut buffer = vec![0.0; 64];

        controls.start();
        controls.glide_to_pitch(12.0);
        controls.set_decibels(-10.0);
        voice.fill(&mut buffer);
        let frequency = voice.oscillator().frequency();
        let amplitude = voice.oscillator().amplitude();
        let phase = voice.oscillator().phase();

        controls.stop();
        voice.fill(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
        // Mid-glide values hold exactly while stopped
        assert_eq!(voice.oscillator().frequency(), frequency);
        assert_eq!(voice.oscillator().amplitude(), amplitude);
        assert_eq!(voice.oscillator().phase(), phase);

        controls.start();
        voice.fill(&mut buffer);
        assert!(voice.oscillator().phase() != phase);
    }

    #[test]
    fn test_set_pitch_snaps_on_next_cycle() {
        let mut voice = test_voice();
        let controls = voice.controls();
        controls.start();
        controls.set_pitch(12.0);

        let mut buffer = vec![0.0; 8];
        voice.fill(&mut buffer);

        let oscillator = voice.oscillator();
        assert!((oscillator.frequency() - 523.25113).abs() < 1e-4);
        assert_eq!(oscillator.frequency(), oscillator.goal_frequency());
    }

    #[test]
    fn test_snap_is_consumed_by_one_cycle() {
        let mut voice = test_voice();
        let controls = voice.controls();
        controls.start();
        controls.set_pitch(12.0);

        let mut buffer = vec![0.0; 8];
        voice.fill(&mut buffer);
        let snapped = voice.oscillator().frequency();

        // A later target change must glide, not jump
        controls.glide_to_pitch(0.0);
        voice.fill(&mut buffer);
        let oscillator = voice.oscillator();
        assert!(oscillator.frequency() < snapped);
        assert!(oscillator.frequency() > oscillator.goal_frequency());
    }

    #[test]
    fn test_glide_to_pitch_moves_goal_only() {
        let mut voice = test_voice();
        let controls = voice.controls();
        controls.start();
        controls.glide_to_pitch(12.0);

        let mut buffer = vec![0.0; 8];
        voice.fill(&mut buffer);

        let oscillator = voice.oscillator();
        assert!((oscillator.goal_frequency() - 523.25113).abs() < 1e-4);
        assert!(oscillator.frequency() < oscillator.goal_frequency());
    }

    #[test]
    fn test_set_decibels_glides_amplitude() {
        let mut voice = test_voice();
        let controls = voice.controls();
        controls.start();
        controls.set_decibels(-10.0);

        let mut buffer = vec![0.0; 8];
        voice.fill(&mut buffer);

        let oscillator = voice.oscillator();
        assert_eq!(oscillator.goal_amplitude(), 0.5);
        assert!(oscillator.amplitude() > oscillator.goal_amplitude());
    }

    #[test]
    fn test_render_failure_recovery_substitutes_silence() {
        let mut voice = test_voice();
        voice.controls().start();

        let mut buffer = vec![0.7; 16];
        voice.recover_render_failure(&mut buffer);

        assert!(buffer.iter().all(|&s| s == 0.0));
        assert_eq!(voice.controls().render_failures(), 1);
        // A failed cycle must not stop playback
        assert!(voice.controls().is_playing());
    }

    #[test]
    fn test_controls_steer_voice_across_threads() {
        let mut voice = test_voice();
        let controls = voice.controls();

        let remote = Arc::clone(&controls);
        std::thread::spawn(move || {
            remote.set_pitch(12.0);
            remote.start();
        })
        .join()
        .unwrap();

        let mut buffer = vec![0.0; 8];
        voice.fill(&mut buffer);
        assert!((voice.oscillator().frequency() - 523.25113).abs() < 1e-4);
    }

    #[test]
    fn test_hz_level_controls() {
        let mut voice = test_voice();
        let controls = voice.controls();
        controls.start();
        controls.set_goal_frequency(880.0);
        controls.set_goal_amplitude(0.25);

        let mut buffer = vec![0.0; 8];
        voice.fill(&mut buffer);

        let oscillator = voice.oscillator();
        assert_eq!(oscillator.goal_frequency(), 880.0);
        assert_eq!(oscillator.goal_amplitude(), 0.25);
    }
}
