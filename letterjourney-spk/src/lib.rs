//! letterjourney-spk: Speech for the letter games
//!
//! Provides text-to-speech with:
//! - Ordered backend detection (Piper first, espeak-ng as fallback)
//! - Fire-and-forget playback on a background worker
//! - Silence as a valid outcome: no backend, a hung backend or a failed
//!   backend never reaches the caller

pub mod error;
pub mod config;
pub mod cache;
pub mod engines;
pub mod engine;

pub use error::SpeechError;
pub use config::{EspeakConfig, PiperConfig, SpeechConfig, TtsBackend};
pub use engine::{detect, SpeechEngine, Utterance};
pub use engines::TtsEngine;
