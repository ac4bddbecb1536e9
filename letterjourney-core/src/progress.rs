//! Learner progress: stars, streaks, mastered letters and level
//!
//! `ProgressStore` is the only component that touches durable storage. Every
//! mutation writes the whole record before returning. Reads never fail: a
//! missing or corrupt file simply means starting over with zeroed progress.

use crate::error::{Error, Result};
use crate::phonetics::{normalize, Letter};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Every this many consecutive correct answers earns a bonus
pub const BONUS_STREAK: u32 = 5;
/// Extra stars on top of the regular one at a bonus streak
pub const BONUS_STARS: u32 = 2;
/// A level is gained each time `total_correct` passes a multiple of this
pub const LEVEL_UP_EVERY: u32 = 20;
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 3;

/// The durable progress document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    /// Letters answered correctly at least once, in the order first mastered
    pub letters_mastered: Vec<Letter>,
    pub streak: u32,
    pub total_correct: u32,
    pub total_attempts: u32,
    pub stars: u32,
    pub level: u32,
    /// Last `total_correct / LEVEL_UP_EVERY` already credited towards a level
    // Field-level default: a missing field must load as `None`, not the
    // container's `Some(0)`, so `normalized()` can tell old records apart.
    #[serde(default)]
    pub level_milestone: Option<u32>,
    /// Fields written by other versions, carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            letters_mastered: Vec::new(),
            streak: 0,
            total_correct: 0,
            total_attempts: 0,
            stars: 0,
            level: MIN_LEVEL,
            level_milestone: Some(0),
            extra: serde_json::Map::new(),
        }
    }
}

impl ProgressRecord {
    /// Restore invariants a hand-edited or older file might violate
    fn normalized(mut self) -> Self {
        self.level = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.total_attempts = self.total_attempts.max(self.total_correct);

        let mut seen = Vec::with_capacity(self.letters_mastered.len());
        for letter in self.letters_mastered.drain(..) {
            let letter = normalize(letter);
            if !seen.contains(&letter) {
                seen.push(letter);
            }
        }
        self.letters_mastered = seen;

        // Records without a milestone predate it; treat what they already
        // passed as credited so loading never grants a surprise level.
        if self.level_milestone.is_none() {
            self.level_milestone = Some(self.total_correct / LEVEL_UP_EVERY);
        }
        self
    }
}

/// Numbers for the menu screen and the `stats` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub mastered: usize,
    pub alphabet_size: usize,
    pub total_correct: u32,
    pub total_attempts: u32,
    pub stars: u32,
    pub streak: u32,
    pub level: u32,
}

impl std::fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Letters mastered: {}/{} | Total correct: {}",
            self.mastered, self.alphabet_size, self.total_correct
        )
    }
}

pub struct ProgressStore {
    record: ProgressRecord,
    path: Option<PathBuf>,
}

impl ProgressStore {
    /// Load progress from `path`, or start fresh if it is missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match read_record(&path) {
            Ok(Some(record)) => {
                debug!("Loaded progress from {:?}", path);
                record
            }
            Ok(None) => {
                debug!("No progress file at {:?}, starting fresh", path);
                ProgressRecord::default()
            }
            Err(e) => {
                warn!("Ignoring unreadable progress file {:?}: {}", path, e);
                ProgressRecord::default()
            }
        };

        Self {
            record,
            path: Some(path),
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            record: ProgressRecord::default(),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn stars(&self) -> u32 {
        self.record.stars
    }

    pub fn streak(&self) -> u32 {
        self.record.streak
    }

    pub fn level(&self) -> u32 {
        self.record.level
    }

    pub fn total_correct(&self) -> u32 {
        self.record.total_correct
    }

    pub fn total_attempts(&self) -> u32 {
        self.record.total_attempts
    }

    pub fn mastered_letters(&self) -> &[Letter] {
        &self.record.letters_mastered
    }

    pub fn is_mastered(&self, letter: Letter) -> bool {
        self.record.letters_mastered.contains(&normalize(letter))
    }

    pub fn summary(&self, alphabet_size: usize) -> ProgressSummary {
        ProgressSummary {
            mastered: self.record.letters_mastered.len(),
            alphabet_size,
            total_correct: self.record.total_correct,
            total_attempts: self.record.total_attempts,
            stars: self.record.stars,
            streak: self.record.streak,
            level: self.record.level,
        }
    }

    /// Credit a correct answer. Returns the stars earned by this answer.
    pub fn record_correct(&mut self, letter: Letter) -> u32 {
        let letter = normalize(letter);
        let record = &mut self.record;

        record.total_correct = record.total_correct.saturating_add(1);
        record.total_attempts = record.total_attempts.saturating_add(1);
        record.streak = record.streak.saturating_add(1);

        let mut earned = 1;
        if record.streak % BONUS_STREAK == 0 {
            earned += BONUS_STARS;
        }
        record.stars = record.stars.saturating_add(earned);

        if !record.letters_mastered.contains(&letter) {
            debug!("Letter {} mastered", letter);
            record.letters_mastered.push(letter);
        }

        self.persist();
        earned
    }

    /// Count a wrong answer and break the streak
    pub fn record_wrong(&mut self) {
        self.record.total_attempts = self.record.total_attempts.saturating_add(1);
        self.record.streak = 0;
        self.persist();
    }

    /// Credit any `LEVEL_UP_EVERY` milestones passed since the last check.
    ///
    /// Returns the new level if it went up. Calling this again without new
    /// correct answers is a no-op, however many times it is called.
    pub fn check_level_up(&mut self) -> Option<u32> {
        let milestone = self.record.total_correct / LEVEL_UP_EVERY;
        let credited = self.record.level_milestone.unwrap_or(milestone);
        if milestone <= credited {
            return None;
        }

        let before = self.record.level;
        self.record.level_milestone = Some(milestone);
        self.record.level = before.saturating_add(milestone - credited).min(MAX_LEVEL);
        self.persist();

        if self.record.level > before {
            info!("Level up: {} -> {}", before, self.record.level);
            Some(self.record.level)
        } else {
            None
        }
    }

    /// Wipe progress back to a first-day learner
    pub fn reset(&mut self) {
        let extra = std::mem::take(&mut self.record.extra);
        self.record = ProgressRecord {
            extra,
            ..ProgressRecord::default()
        };
        info!("Progress reset");
        self.persist();
    }

    /// Write the record now, reporting failure to the caller
    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => write_record(&self.record, path),
            None => Ok(()),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save progress: {}", e);
        }
    }
}

fn read_record(path: &Path) -> Result<Option<ProgressRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };

    let record: ProgressRecord = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::Deserialization(e.to_string()))?;
    Ok(Some(record.normalized()))
}

fn write_record(record: &ProgressRecord, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    // Write beside the target and rename, so a crash mid-write leaves the
    // previous record intact.
    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, record)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        writer.flush()?;
    }
    // Sync to disk before rename, or a power loss can leave an empty file
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_leaves_complete_record_and_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.json");
        let mut store = ProgressStore::load(&path);
        for letter in ['A', 'B', 'C', 'D', 'E'] {
            store.record_correct(letter);
        }
        store.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let saved: ProgressRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(&saved, store.record());
        assert_eq!(saved.stars, 7);

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_milestone_loads_as_none() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"total_correct": 45, "level": 2}"#).unwrap();
        assert_eq!(record.level_milestone, None);
        assert_eq!(record.normalized().level_milestone, Some(2));
    }

    #[test]
    fn test_defaults() {
        let store = ProgressStore::in_memory();
        assert_eq!(store.stars(), 0);
        assert_eq!(store.streak(), 0);
        assert_eq!(store.level(), 1);
        assert!(store.mastered_letters().is_empty());
    }

    #[test]
    fn test_five_correct_in_a_row_earns_bonus() {
        let mut store = ProgressStore::in_memory();
        let earned: Vec<u32> = (0..5).map(|_| store.record_correct('A')).collect();
        assert_eq!(earned, vec![1, 1, 1, 1, 3]);
        assert_eq!(store.stars(), 7);
        assert_eq!(store.streak(), 5);
        assert_eq!(store.mastered_letters(), &['A']);
    }

    #[test]
    fn test_wrong_resets_streak_only() {
        let mut store = ProgressStore::in_memory();
        store.record_correct('B');
        store.record_correct('C');
        store.record_wrong();
        assert_eq!(store.streak(), 0);
        assert_eq!(store.total_correct(), 2);
        assert_eq!(store.total_attempts(), 3);
        assert_eq!(store.stars(), 2);
    }

    #[test]
    fn test_lowercase_letters_are_normalized() {
        let mut store = ProgressStore::in_memory();
        store.record_correct('ä');
        store.record_correct('Ä');
        assert_eq!(store.mastered_letters(), &['Ä']);
        assert!(store.is_mastered('ä'));
    }

    #[test]
    fn test_level_up_once_per_milestone() {
        let mut store = ProgressStore::in_memory();
        for _ in 0..19 {
            store.record_correct('S');
        }
        assert_eq!(store.check_level_up(), None);
        store.record_correct('S');
        assert_eq!(store.check_level_up(), Some(2));
        assert_eq!(store.check_level_up(), None);
        assert_eq!(store.level(), 2);
    }

    #[test]
    fn test_level_caps_at_three() {
        let mut store = ProgressStore::in_memory();
        for n in 1..=60 {
            store.record_correct('O');
            if n % LEVEL_UP_EVERY == 0 {
                store.check_level_up();
            }
        }
        assert_eq!(store.level(), 3);
        store.record_correct('O');
        assert_eq!(store.check_level_up(), None);
        assert_eq!(store.level(), 3);
    }

    #[test]
    fn test_missed_checks_are_caught_up() {
        let mut store = ProgressStore::in_memory();
        for _ in 0..45 {
            store.record_correct('M');
        }
        // Two milestones passed without a check in between
        assert_eq!(store.check_level_up(), Some(3));
        assert_eq!(store.check_level_up(), None);
    }

    #[test]
    fn test_persists_every_mutation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = ProgressStore::load(&path);
        store.record_correct('K');
        let reloaded = ProgressStore::load(&path);
        assert_eq!(reloaded.stars(), 1);
        assert_eq!(reloaded.mastered_letters(), &['K']);

        store.record_wrong();
        let reloaded = ProgressStore::load(&path);
        assert_eq!(reloaded.total_attempts(), 2);
        assert_eq!(reloaded.streak(), 0);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = ProgressStore::load(&path);
        assert_eq!(store.record(), &ProgressRecord::default());
    }

    #[test]
    fn test_partial_record_and_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, r#"{"stars": 12, "letters_mastered": ["A", "b"], "theme": "dark"}"#).unwrap();

        let mut store = ProgressStore::load(&path);
        assert_eq!(store.stars(), 12);
        assert_eq!(store.level(), 1);
        assert_eq!(store.mastered_letters(), &['A', 'B']);

        store.record_wrong();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["total_attempts"], 1);
    }

    #[test]
    fn test_load_normalizes_out_of_range_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, r#"{"level": 9, "total_correct": 50, "total_attempts": 10}"#).unwrap();

        let mut store = ProgressStore::load(&path);
        assert_eq!(store.level(), 3);
        assert_eq!(store.total_attempts(), 50);
        // 40 was already passed before the milestone field existed
        assert_eq!(store.record().level_milestone, Some(2));
        assert_eq!(store.check_level_up(), None);
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        // Parent is a regular file, so every save fails
        let mut store = ProgressStore::load(blocker.join("progress.json"));
        store.record_correct('A');
        assert_eq!(store.stars(), 1);
        assert!(store.save().is_err());
    }

    #[test]
    fn test_reset_keeps_unknown_fields() {
        let mut store = ProgressStore::in_memory();
        store.record.extra.insert("theme".to_string(), serde_json::json!("dark"));
        store.record_correct('A');
        store.reset();
        assert_eq!(store.stars(), 0);
        assert_eq!(store.record().extra["theme"], "dark");
    }

    #[test]
    fn test_summary_display() {
        let mut store = ProgressStore::in_memory();
        store.record_correct('A');
        store.record_correct('B');
        let summary = store.summary(29);
        assert_eq!(summary.to_string(), "Letters mastered: 2/29 | Total correct: 2");
    }
}
