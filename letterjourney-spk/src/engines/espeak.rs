//! espeak-ng engine
//! Formant synthesis that plays straight to the sound card

use crate::config::{EspeakConfig, TtsBackend};
use crate::engines::{sanitize, TtsEngine};
use crate::error::SpeechError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

pub struct EspeakTtsEngine {
    command: String,
    voice: String,
}

impl EspeakTtsEngine {
    pub fn new(config: &EspeakConfig) -> Self {
        Self {
            command: config.command.clone(),
            voice: config.voice.clone(),
        }
    }
}

#[async_trait]
impl TtsEngine for EspeakTtsEngine {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let text = sanitize(text);
        if text.is_empty() {
            return Err(SpeechError::Engine("Text is empty after sanitization".to_string()));
        }

        debug!("espeak-ng: {:?}", text);
        let output = Command::new(&self.command)
            .arg("-v")
            .arg(&self.voice)
            .arg(&text)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| SpeechError::Engine(format!("Failed to run espeak-ng: {}", e)))?;

        if !output.status.success() {
            return Err(SpeechError::Engine(format!(
                "espeak-ng failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }

    fn backend(&self) -> TtsBackend {
        TtsBackend::EspeakNg
    }

    fn name(&self) -> &str {
        "espeak-ng"
    }
}
