//! Storage configuration and config file loading

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used under the platform config dir
pub const APP_DIR_NAME: &str = "letterjourney";

const PROGRESS_FILE: &str = "progress.json";
const WELCOME_FILE: &str = "welcome.json";

/// Where learner data lives on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `progress.json` and `welcome.json`
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(PROGRESS_FILE)
    }

    pub fn welcome_path(&self) -> PathBuf {
        self.data_dir.join(WELCOME_FILE)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("Data directory cannot be empty".to_string());
        }

        if self.data_dir.to_string_lossy().contains('\0') {
            return Err("Data directory contains invalid characters".to_string());
        }

        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/letterjourney`, falling back to `~/.config/letterjourney`
pub fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default location of the TOML config file
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

/// Load a TOML config file, returning defaults when the file does not exist.
///
/// A file that exists but cannot be parsed is an error: unlike progress data,
/// a broken config is something the person running the app should hear about.
pub fn load_config<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(T::default());
        }
        Err(e) => return Err(Error::Io(e)),
    };

    toml::from_str(&text)
        .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_storage_paths() {
        let storage = StorageConfig::with_data_dir("/tmp/lj");
        assert_eq!(storage.progress_path(), PathBuf::from("/tmp/lj/progress.json"));
        assert_eq!(storage.welcome_path(), PathBuf::from("/tmp/lj/welcome.json"));
        assert!(storage.validate().is_ok());
    }

    #[test]
    fn test_storage_validation_empty() {
        let storage = StorageConfig::with_data_dir("");
        assert!(storage.validate().is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let sample: Sample = load_config(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_load_config_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "count = 3\n").unwrap();
        let sample: Sample = load_config(&path).unwrap();
        assert_eq!(sample.count, 3);
        assert!(sample.name.is_empty());
    }

    #[test]
    fn test_load_config_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "count = [").unwrap();
        let result: Result<Sample> = load_config(&path);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
