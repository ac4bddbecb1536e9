//! One-time welcome marker

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Serialize, Deserialize)]
struct Marker {
    shown: bool,
}

/// The mere existence of the marker file suppresses the welcome message.
pub struct FirstRunMarker {
    path: PathBuf,
}

impl FirstRunMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_first_run(&self) -> bool {
        !self.path.exists()
    }

    /// Returns true when this is the first run, recording that the welcome
    /// has now been shown. A failed write only means the welcome repeats.
    pub fn check_and_mark(&self) -> bool {
        if !self.is_first_run() {
            return false;
        }

        if let Err(e) = self.write() {
            warn!("Failed to write welcome marker {:?}: {}", self.path, e);
        }
        true
    }

    fn write(&self) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string(&Marker { shown: true })
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_run_only_once() {
        let dir = TempDir::new().unwrap();
        let marker = FirstRunMarker::new(dir.path().join("nested").join("welcome.json"));
        assert!(marker.check_and_mark());
        assert!(!marker.check_and_mark());
        assert!(!marker.is_first_run());

        let text = std::fs::read_to_string(marker.path()).unwrap();
        assert_eq!(text, r#"{"shown":true}"#);
    }

    #[test]
    fn test_existing_marker_content_is_irrelevant() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("welcome.json");
        std::fs::write(&path, "garbage").unwrap();
        assert!(!FirstRunMarker::new(path).check_and_mark());
    }
}
