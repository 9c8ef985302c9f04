//! Portando - a gliding monophonic sine voice for Rust
//!
//! This library provides a sine oscillator whose pitch and loudness glide
//! toward movable goals at bounded rates, a lock-free control plane for
//! steering it from other threads, and a cpal adapter for playing it live.

pub mod error;
pub mod oscillator;
pub mod signal;
#[cfg(feature = "stream")]
pub mod stream;
pub mod tuning;
pub mod voice;

// Re-export commonly used types at the crate root
pub use error::Error;
pub use oscillator::SineWave;
pub use signal::Signal;
#[cfg(feature = "stream")]
pub use stream::{Config, OutputStream};
pub use voice::{Controls, Voice};
