//! TTS engine implementations

pub mod piper;
pub mod espeak;

use crate::config::TtsBackend;
use crate::error::SpeechError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Longest text handed to a backend, in characters
pub const MAX_TEXT_CHARS: usize = 1_000;

/// Trait for TTS engines
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Synthesize and play `text`, returning once playback has finished
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;

    /// Which backend this engine drives
    fn backend(&self) -> TtsBackend;

    /// Get engine name
    fn name(&self) -> &str;
}

/// Check whether `command` can be run at all.
///
/// Runs `<command> --help` and waits at most `timeout`. Any exit status counts
/// as present; a missing executable or a probe that hangs counts as absent.
pub async fn probe(command: &str, timeout: Duration) -> bool {
    let mut cmd = Command::new(command);
    cmd.arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            debug!("Probe of {} failed to start: {}", command, e);
            return false;
        }
    };

    let waited = tokio::time::timeout(timeout, child.wait()).await;
    match waited {
        Ok(Ok(status)) => {
            debug!("Probe of {} exited with {}", command, status);
            true
        }
        Ok(Err(e)) => {
            debug!("Probe of {} failed: {}", command, e);
            false
        }
        Err(_) => {
            debug!("Probe of {} timed out after {:?}", command, timeout);
            let _ = child.kill().await;
            false
        }
    }
}

/// Strip control characters and bound the length.
///
/// Text goes to backends as a plain argument or on stdin, never through a
/// shell, so only characters that would confuse the synthesizer are removed.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .take(MAX_TEXT_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}
