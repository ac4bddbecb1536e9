//! Game tuning

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub find: FindConfig,
    pub delays: SpeechDelays,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FindConfig {
    /// Letters shown per round, target included
    pub candidate_count: usize,

    /// How long a wrong pick stays marked before the round can be retried
    pub wrong_marker_ms: u64,
}

/// Pause before each kind of speech, so audio follows the screen update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechDelays {
    pub explore_ms: u64,
    pub find_prompt_ms: u64,
    pub cheer_ms: u64,
    pub word_ms: u64,
    pub next_sound_ms: u64,
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            candidate_count: 6,
            wrong_marker_ms: 1_000,
        }
    }
}

impl Default for SpeechDelays {
    fn default() -> Self {
        Self {
            explore_ms: 50,
            find_prompt_ms: 500,
            cheer_ms: 200,
            word_ms: 300,
            next_sound_ms: 100,
        }
    }
}

impl FindConfig {
    pub fn wrong_marker(&self) -> Duration {
        Duration::from_millis(self.wrong_marker_ms)
    }
}

impl GameConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.find.candidate_count == 0 {
            return Err("Find candidate count must be greater than 0".to_string());
        }

        if self.find.candidate_count > 64 {
            return Err("Find candidate count too large (max 64)".to_string());
        }

        if self.find.wrong_marker_ms > 10_000 {
            return Err("Wrong marker duration too large (max 10000 ms)".to_string());
        }

        let delays = &self.delays;
        let longest = [
            delays.explore_ms,
            delays.find_prompt_ms,
            delays.cheer_ms,
            delays.word_ms,
            delays.next_sound_ms,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        if longest > 10_000 {
            return Err("Speech delays must be at most 10000 ms".to_string());
        }

        Ok(())
    }
}
