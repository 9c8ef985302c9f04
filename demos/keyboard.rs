//! Interactive monophonic keyboard demo.
//!
//! The home row plays one octave starting at middle C, piano style:
//! A W S E D F T G Y H U J map to C through B. Holding a key sustains the
//! note; pressing another key while one is held glides to it legato.
//! Press Q or ESC to quit.

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use portando::tuning::Pitch;
use portando::{Config, OutputStream, SineWave, Voice};
use std::io::{Write, stdout};
use std::panic;
use std::time::Duration;

fn key_to_pitch(code: KeyCode) -> Option<Pitch> {
    match code {
        KeyCode::Char('a') => Some(Pitch::C),
        KeyCode::Char('w') => Some(Pitch::CSharp),
        KeyCode::Char('s') => Some(Pitch::D),
        KeyCode::Char('e') => Some(Pitch::DSharp),
        KeyCode::Char('d') => Some(Pitch::E),
        KeyCode::Char('f') => Some(Pitch::F),
        KeyCode::Char('t') => Some(Pitch::FSharp),
        KeyCode::Char('g') => Some(Pitch::G),
        KeyCode::Char('y') => Some(Pitch::GSharp),
        KeyCode::Char('h') => Some(Pitch::A),
        KeyCode::Char('u') => Some(Pitch::ASharp),
        KeyCode::Char('j') => Some(Pitch::B),
        _ => None,
    }
}

fn pitch_label(pitch: Pitch) -> &'static str {
    match pitch {
        Pitch::C => "C ",
        Pitch::CSharp => "C#",
        Pitch::D => "D ",
        Pitch::DSharp => "D#",
        Pitch::E => "E ",
        Pitch::F => "F ",
        Pitch::FSharp => "F#",
        Pitch::G => "G ",
        Pitch::GSharp => "G#",
        Pitch::A => "A ",
        Pitch::ASharp => "A#",
        Pitch::B => "B ",
    }
}

fn handle_key_event(
    stream: &OutputStream,
    active: &mut Option<Pitch>,
    code: KeyCode,
    kind: KeyEventKind,
) -> Result<()> {
    let Some(pitch) = key_to_pitch(code) else {
        return Ok(());
    };

    if matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        if *active != Some(pitch) {
            let target = f64::from(pitch.semitone_offset());
            // Legato: glide between held notes, snap on a fresh attack
            if active.is_some() {
                stream.glide_to_pitch(target);
            } else {
                stream.set_pitch(target);
                stream.start();
            }
            *active = Some(pitch);
            draw_ui(*active)?;
        }
    } else if matches!(kind, KeyEventKind::Release) && *active == Some(pitch) {
        stream.stop();
        *active = None;
        draw_ui(*active)?;
    }

    Ok(())
}

fn draw_ui(active: Option<Pitch>) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;
    write!(
        stdout,
        "Note: {} | A-J=white keys  W/E/T/Y/U=black keys  Q=quit",
        active.map_or("--", pitch_label),
    )?;
    stdout.flush()?;
    Ok(())
}

/// Cleans up terminal state (cursor, alternate screen, raw mode).
fn cleanup_terminal() {
    let _ = stdout().execute(PopKeyboardEnhancementFlags);
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

fn main() -> Result<()> {
    env_logger::init();

    let sample_rate = OutputStream::default_sample_rate()?;
    let voice = Voice::new(
        SineWave::new(sample_rate)?
            .with_decibels(-6.0)
            .with_pitch_glide(30.0),
    );
    let stream = OutputStream::open(voice, Config::default())?;

    // Keyboard enhancements MUST come before the alternate screen
    stdout().execute(PushKeyboardEnhancementFlags(
        KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
    ))?;
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    // Restore the terminal even when a key handler panics
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    draw_ui(None)?;

    let mut active: Option<Pitch> = None;
    loop {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key_event) = event::read()?
        {
            if is_quit_key(key_event.code) && matches!(key_event.kind, KeyEventKind::Press) {
                break;
            }
            handle_key_event(&stream, &mut active, key_event.code, key_event.kind)?;
        }
    }

    stream.stop();
    cleanup_terminal();
    println!("\nGoodbye!");
    Ok(())
}
