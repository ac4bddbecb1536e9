//! Application config file
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/.config/letterjourney"
//!
//! [speech]
//! enabled = true
//! probe_timeout_ms = 2000
//!
//! [speech.piper]
//! model_path = "~/.local/share/piper-voices/sv_SE-nst-medium.onnx"
//!
//! [game.find]
//! candidate_count = 6
//! ```

use anyhow::{anyhow, Result};
use letterjourney_core::{load_config, StorageConfig};
use letterjourney_game::GameConfig;
use letterjourney_spk::SpeechConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    pub game: GameConfig,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub no_speech: bool,
}

impl AppConfig {
    pub fn load(path: &Path, overrides: &Overrides) -> Result<Self> {
        let mut config: AppConfig = load_config(path)?;

        if let Some(data_dir) = &overrides.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if overrides.no_speech {
            config.speech.enabled = false;
        }

        config.validate().map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.storage.validate()?;
        self.speech.validate()?;
        self.game.validate()?;
        Ok(())
    }
}
