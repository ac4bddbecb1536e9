//! Piper TTS engine
//! Local neural TTS; raw PCM from Piper is piped into an audio player

use crate::cache::AudioCache;
use crate::config::{PiperConfig, TtsBackend};
use crate::engines::{sanitize, TtsEngine};
use crate::error::SpeechError;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Piper TTS engine
pub struct PiperTtsEngine {
    command: String,
    model_path: PathBuf,
    length_scale: f32,
    player_command: String,
    player_args: Vec<String>,
    cache: Option<AudioCache>,
}

impl PiperTtsEngine {
    pub fn new(config: &PiperConfig, cache: Option<AudioCache>) -> Self {
        Self {
            command: config.command.clone(),
            model_path: config.resolved_model_path(),
            length_scale: config.length_scale,
            player_command: config.player_command.clone(),
            player_args: config.player_args.clone(),
            cache,
        }
    }

    pub fn model_path(&self) -> &PathBuf {
        &self.model_path
    }

    /// Turn text into raw 16-bit mono PCM
    pub async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError> {
        if let Some(audio) = self.cache.as_ref().and_then(|cache| cache.get(text)) {
            debug!("Cache hit for {:?}", text);
            return Ok(audio);
        }

        // piper --model voice.onnx --output-raw --length-scale 1.5 < text
        let mut child = Command::new(&self.command)
            .arg("--model")
            .arg(&self.model_path)
            .arg("--output-raw")
            .arg("--length-scale")
            .arg(self.length_scale.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Engine(format!("Failed to execute piper: {}", e)))?;

        write_stdin(&mut child, text.as_bytes()).await?;

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(SpeechError::Engine(format!(
                "Piper synthesis failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(SpeechError::Engine("Piper produced no audio".to_string()));
        }

        let audio = Bytes::from(output.stdout);
        if let Some(cache) = &self.cache {
            cache.insert(text, audio.clone());
        }
        Ok(audio)
    }

    async fn play(&self, audio: &[u8]) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.player_command)
            .args(&self.player_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SpeechError::Engine(format!("Failed to execute {}: {}", self.player_command, e))
            })?;

        write_stdin(&mut child, audio).await?;

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(SpeechError::Engine(format!(
                "{} failed: {}",
                self.player_command,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Feed `data` to the child and close its stdin so it sees end of input
async fn write_stdin(child: &mut tokio::process::Child, data: &[u8]) -> Result<(), SpeechError> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| SpeechError::Engine("Child stdin unavailable".to_string()))?;
    stdin.write_all(data).await?;
    stdin.shutdown().await?;
    drop(stdin);
    Ok(())
}

#[async_trait]
impl TtsEngine for PiperTtsEngine {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let text = sanitize(text);
        if text.is_empty() {
            return Err(SpeechError::Engine("Text is empty after sanitization".to_string()));
        }

        let audio = self.synthesize(&text).await?;
        self.play(&audio).await
    }

    fn backend(&self) -> TtsBackend {
        TtsBackend::Piper
    }

    fn name(&self) -> &str {
        "Piper TTS"
    }
}
