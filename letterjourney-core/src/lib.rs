//! letterjourney-core: lexicon and learner progress
//!
//! Provides the pieces every other crate leans on:
//! - The static letter/word lexicon (`PhoneticsTable`)
//! - The single durable progress record and its reward rules (`ProgressStore`)
//! - The first-run marker
//! - Storage configuration and TOML config loading

pub mod error;
pub mod config;
pub mod phonetics;
pub mod progress;
pub mod first_run;

pub use error::{Error, Result};
pub use config::{StorageConfig, load_config};
pub use phonetics::{Difficulty, Letter, LetterEntry, PhoneticsTable, WordEntry};
pub use progress::{ProgressRecord, ProgressStore, ProgressSummary};
pub use first_run::FirstRunMarker;
