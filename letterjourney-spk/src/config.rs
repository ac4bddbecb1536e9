//! Configuration for speech

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Speech configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Enable speech (on by default; the games are built around hearing sounds)
    pub enabled: bool,

    /// Piper settings (preferred backend)
    pub piper: PiperConfig,

    /// espeak-ng settings (fallback backend)
    pub espeak: EspeakConfig,

    /// How long a backend probe may take before the backend counts as absent
    pub probe_timeout_ms: u64,

    /// Upper bound on synthesis plus playback of one utterance
    pub speak_timeout_ms: u64,

    /// Pending utterances held while an earlier one is still playing
    pub queue_size: usize,

    /// Cache synthesized Piper audio in memory
    pub enable_cache: bool,

    /// Maximum cached utterances
    pub max_cache_entries: usize,
}

/// Resolved speech backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TtsBackend {
    /// Piper neural TTS, piped into an audio player
    Piper,
    /// espeak-ng, which plays directly
    EspeakNg,
    /// Nothing installed; speech is a no-op
    None,
}

impl TtsBackend {
    /// Probe order: best voice first
    pub const PRIORITY: [TtsBackend; 2] = [TtsBackend::Piper, TtsBackend::EspeakNg];

    pub fn as_str(&self) -> &'static str {
        match self {
            TtsBackend::Piper => "piper",
            TtsBackend::EspeakNg => "espeak-ng",
            TtsBackend::None => "none",
        }
    }
}

impl std::fmt::Display for TtsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PiperConfig {
    /// Executable name or path
    pub command: String,

    /// Voice model (`~/` is expanded)
    pub model_path: PathBuf,

    /// Piper `--length-scale`; above 1.0 speaks slower
    pub length_scale: f32,

    /// Player that receives Piper's raw PCM on stdin
    pub player_command: String,

    pub player_args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EspeakConfig {
    /// Executable name or path
    pub command: String,

    /// espeak-ng voice (`-v`)
    pub voice: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            piper: PiperConfig::default(),
            espeak: EspeakConfig::default(),
            probe_timeout_ms: 2_000,
            speak_timeout_ms: 10_000,
            queue_size: 32,
            enable_cache: true,
            max_cache_entries: 128,
        }
    }
}

impl Default for PiperConfig {
    fn default() -> Self {
        let model_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("piper-voices")
            .join("sv_SE-nst-medium.onnx");

        Self {
            command: "piper".to_string(),
            model_path,
            // Slow, clear speech for children with verbal dyspraxia
            length_scale: 1.5,
            player_command: "aplay".to_string(),
            player_args: ["-r", "22050", "-f", "S16_LE", "-c", "1", "-q"]
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
        }
    }
}

impl Default for EspeakConfig {
    fn default() -> Self {
        Self {
            command: "espeak-ng".to_string(),
            voice: "sv".to_string(),
        }
    }
}

impl PiperConfig {
    /// Model path with a leading `~/` replaced by the home directory
    pub fn resolved_model_path(&self) -> PathBuf {
        match self.model_path.strip_prefix("~") {
            Ok(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => self.model_path.clone(),
            },
            Err(_) => self.model_path.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_command("Piper command", &self.command)?;
        validate_command("Player command", &self.player_command)?;

        if !(0.1..=5.0).contains(&self.length_scale) {
            return Err("Piper length scale must be between 0.1 and 5.0".to_string());
        }

        if self.player_args.iter().any(|arg| arg.contains('\0')) {
            return Err("Player arguments contain invalid characters".to_string());
        }

        Ok(())
    }
}

impl EspeakConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_command("espeak-ng command", &self.command)?;

        if self.voice.is_empty() {
            return Err("espeak-ng voice cannot be empty".to_string());
        }

        if self.voice.len() > 64 {
            return Err("espeak-ng voice too long (max 64 chars)".to_string());
        }

        // Voice names look like "sv", "en-us" or "sv+f3"
        if !self
            .voice
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+' || c == '_')
        {
            return Err("espeak-ng voice contains invalid characters".to_string());
        }

        Ok(())
    }
}

fn validate_command(what: &str, command: &str) -> Result<(), String> {
    if command.is_empty() {
        return Err(format!("{} cannot be empty", what));
    }
    if command.len() > 4096 {
        return Err(format!("{} too long", what));
    }
    if command.chars().any(|c| c == '\0' || c.is_control()) {
        return Err(format!("{} contains invalid characters", what));
    }
    Ok(())
}

impl SpeechConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.probe_timeout_ms == 0 {
            return Err("Probe timeout must be greater than 0".to_string());
        }

        if self.probe_timeout_ms > 60_000 {
            return Err("Probe timeout too large (max 60000 ms)".to_string());
        }

        if self.speak_timeout_ms == 0 {
            return Err("Speak timeout must be greater than 0".to_string());
        }

        if self.speak_timeout_ms > 300_000 {
            return Err("Speak timeout too large (max 300000 ms)".to_string());
        }

        if self.queue_size == 0 {
            return Err("Queue size must be greater than 0".to_string());
        }

        if self.queue_size > 10_000 {
            return Err("Queue size too large (max 10000)".to_string());
        }

        if self.max_cache_entries > 10_000 {
            return Err("Cache too large (max 10000 entries)".to_string());
        }

        self.piper.validate()?;
        self.espeak.validate()?;

        Ok(())
    }
}
