//! Pitch and loudness conversions.
//!
//! Pitches are expressed as fractional semitone offsets relative to middle C.
//! Loudness changes are expressed in decibels on a base-2 scale where +10 dB
//! doubles the amplitude ratio.

/// Frequency of middle C in Hz, the reference for all pitch conversions.
pub const MIDDLE_C_FREQUENCY: f64 = 261.625565;

/// Converts a pitch to its frequency in Hz.
///
/// # Arguments
///
/// * `pitch` - Semitone offset relative to middle C (fractional and negative
///   values are allowed)
///
/// # Examples
///
/// ```
/// use portando::tuning::{MIDDLE_C_FREQUENCY, pitch_to_frequency};
///
/// assert_eq!(pitch_to_frequency(0.0), MIDDLE_C_FREQUENCY);
///
/// // One octave up doubles the frequency
/// let c5 = pitch_to_frequency(12.0);
/// assert!((c5 - 523.25113).abs() < 1e-4);
/// ```
pub fn pitch_to_frequency(pitch: f64) -> f64 {
    MIDDLE_C_FREQUENCY * 2.0_f64.powf(pitch / 12.0)
}

/// Returns the frequency ratio corresponding to an interval in semitones.
///
/// # Examples
///
/// ```
/// use portando::tuning::interval_to_frequency_ratio;
///
/// assert_eq!(interval_to_frequency_ratio(12.0), 2.0);
/// assert_eq!(interval_to_frequency_ratio(0.0), 1.0);
/// ```
pub fn interval_to_frequency_ratio(interval: f64) -> f64 {
    2.0_f64.powf(interval / 12.0)
}

/// Returns the amplitude ratio corresponding to a change in decibels.
///
/// A change of +10 dB doubles the amplitude; -10 dB halves it.
///
/// # Examples
///
/// ```
/// use portando::tuning::decibels_to_amplitude_ratio;
///
/// assert_eq!(decibels_to_amplitude_ratio(10.0), 2.0);
/// assert_eq!(decibels_to_amplitude_ratio(0.0), 1.0);
/// assert_eq!(decibels_to_amplitude_ratio(-10.0), 0.5);
/// ```
pub fn decibels_to_amplitude_ratio(decibels: f64) -> f64 {
    2.0_f64.powf(decibels / 10.0)
}

/// Returns 1.0 if `end` is greater than `start`, otherwise -1.0.
///
/// Equal values report -1.0. Glide trajectories pair this with
/// [`bounded_by_end`], which holds a settled parameter exactly at its goal.
pub fn direction(start: f64, end: f64) -> f64 {
    if end > start { 1.0 } else { -1.0 }
}

/// Limits `value` to not pass `end` when travelling away from `start`.
///
/// # Examples
///
/// ```
/// use portando::tuning::bounded_by_end;
///
/// // Rising toward 2.0: values above the goal are capped
/// assert_eq!(bounded_by_end(1.5, 1.0, 2.0), 1.5);
/// assert_eq!(bounded_by_end(2.5, 1.0, 2.0), 2.0);
///
/// // Falling toward 1.0: values below the goal are floored
/// assert_eq!(bounded_by_end(0.5, 2.0, 1.0), 1.0);
/// ```
pub fn bounded_by_end(value: f64, start: f64, end: f64) -> f64 {
    if start < end { value.min(end) } else { value.max(end) }
}

/// Note names of the chromatic scale, used to map controls to pitches.
///
/// Each variant covers one of the 12 notes of the octave starting at
/// middle C. Use sharp notation (e.g. `FSharp` instead of G flat).
///
/// # Examples
///
/// ```
/// use portando::tuning::{Pitch, pitch_to_frequency};
///
/// let hz = pitch_to_frequency(f64::from(Pitch::A.semitone_offset()));
/// assert!((hz - 440.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Pitch {
    /// Returns the semitone offset from C (0-11) for this note.
    ///
    /// # Examples
    ///
    /// ```
    /// use portando::tuning::Pitch;
    ///
    /// assert_eq!(Pitch::C.semitone_offset(), 0);
    /// assert_eq!(Pitch::CSharp.semitone_offset(), 1);
    /// assert_eq!(Pitch::A.semitone_offset(), 9);
    /// ```
    pub fn semitone_offset(&self) -> u8 {
        match self {
            Pitch::C => 0,
            Pitch::CSharp => 1,
            Pitch::D => 2,
            Pitch::DSharp => 3,
            Pitch::E => 4,
            Pitch::F => 5,
            Pitch::FSharp => 6,
            Pitch::G => 7,
            Pitch::GSharp => 8,
            Pitch::A => 9,
            Pitch::ASharp => 10,
            Pitch::B => 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_to_frequency_reference() {
        // Pitch 0 is middle C
        assert_eq!(pitch_to_frequency(0.0), MIDDLE_C_FREQUENCY);

        // One octave up doubles, one octave down halves
        assert!((pitch_to_frequency(12.0) - 2.0 * MIDDLE_C_FREQUENCY).abs() < 1e-9);
        assert!((pitch_to_frequency(-12.0) - 0.5 * MIDDLE_C_FREQUENCY).abs() < 1e-9);

        // A above middle C is the 440 Hz reference
        assert!((pitch_to_frequency(9.0) - 440.0).abs() < 0.01);
    }

    #[test]
    fn test_interval_ratio() {
        assert_eq!(interval_to_frequency_ratio(0.0), 1.0);
        assert_eq!(interval_to_frequency_ratio(12.0), 2.0);
        assert_eq!(interval_to_frequency_ratio(-12.0), 0.5);

        // A perfect fifth is 7 semitones, close to a 3:2 ratio
        assert!((interval_to_frequency_ratio(7.0) - 1.5).abs() < 0.002);
    }

    #[test]
    fn test_decibel_ratio() {
        assert_eq!(decibels_to_amplitude_ratio(0.0), 1.0);
        assert_eq!(decibels_to_amplitude_ratio(10.0), 2.0);
        assert_eq!(decibels_to_amplitude_ratio(-10.0), 0.5);
        assert_eq!(decibels_to_amplitude_ratio(20.0), 4.0);
    }

    #[test]
    fn test_direction() {
        assert_eq!(direction(1.0, 2.0), 1.0);
        assert_eq!(direction(2.0, 1.0), -1.0);
        // Equal endpoints report -1.0
        assert_eq!(direction(2.0, 2.0), -1.0);
    }

    #[test]
    fn test_bounded_by_end_rising() {
        assert_eq!(bounded_by_end(1.5, 1.0, 2.0), 1.5);
        assert_eq!(bounded_by_end(2.0, 1.0, 2.0), 2.0);
        assert_eq!(bounded_by_end(3.0, 1.0, 2.0), 2.0);
    }

    #[test]
    fn test_bounded_by_end_falling() {
        assert_eq!(bounded_by_end(1.5, 2.0, 1.0), 1.5);
        assert_eq!(bounded_by_end(1.0, 2.0, 1.0), 1.0);
        assert_eq!(bounded_by_end(0.25, 2.0, 1.0), 1.0);
    }

    #[test]
    fn test_bounded_by_end_settled() {
        // Equal endpoints behave like a falling glide: values below the goal
        // are pulled back up to it
        assert_eq!(bounded_by_end(1.9, 2.0, 2.0), 2.0);
        assert_eq!(bounded_by_end(2.0, 2.0, 2.0), 2.0);
    }

    #[test]
    fn test_pitch_semitone_offset() {
        assert_eq!(Pitch::C.semitone_offset(), 0);
        assert_eq!(Pitch::CSharp.semitone_offset(), 1);
        assert_eq!(Pitch::D.semitone_offset(), 2);
        assert_eq!(Pitch::E.semitone_offset(), 4);
        assert_eq!(Pitch::F.semitone_offset(), 5);
        assert_eq!(Pitch::FSharp.semitone_offset(), 6);
        assert_eq!(Pitch::A.semitone_offset(), 9);
        assert_eq!(Pitch::B.semitone_offset(), 11);
    }
}
