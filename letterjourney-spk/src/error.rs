//! Error types for letterjourney-spk

use std::time::Duration;
use thiserror::Error;

/// Speech errors. None of these escape `SpeechEngine`; they exist so engines
/// can report what went wrong to the worker, which logs and drops them.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Speech timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
