//! Scripted glide demonstration.
//!
//! Plays a short melody on a single gliding voice: snaps to the opening
//! note, glides through the rest, then fades out. No keyboard required.

use anyhow::Result;
use portando::tuning::Pitch;
use portando::{Config, OutputStream, SineWave, Voice};
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    let sample_rate = OutputStream::default_sample_rate()?;
    let voice = Voice::new(
        SineWave::new(sample_rate)?
            .with_decibels(-6.0)
            .with_pitch_glide(24.0)
            .with_amplitude_glide(30.0),
    );
    let stream = OutputStream::open(voice, Config::default())?;

    // Hold times in milliseconds; each note is reached by gliding
    let melody = [
        (Pitch::C, 900),
        (Pitch::E, 900),
        (Pitch::G, 900),
        (Pitch::B, 1200),
        (Pitch::G, 600),
        (Pitch::E, 600),
        (Pitch::C, 1500),
    ];

    // Snap to the opening note, then glide through the rest
    stream.set_pitch(f64::from(melody[0].0.semitone_offset()));
    stream.start();

    for (pitch, hold_millis) in melody {
        println!("→ {:?}", pitch);
        stream.glide_to_pitch(f64::from(pitch.semitone_offset()));
        thread::sleep(Duration::from_millis(hold_millis));
    }

    // Fade out by gliding loudness down before stopping
    println!("fading out");
    stream.set_decibels(-40.0);
    thread::sleep(Duration::from_millis(1500));
    stream.stop();

    println!("✓ Playback complete");
    Ok(())
}
