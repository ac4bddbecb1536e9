//! Sound Out: walk through a word one letter at a time

use letterjourney_core::{Letter, WordEntry};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct SoundOutRound {
    entry: &'static WordEntry,
    letters: Vec<Letter>,
    /// Next letter to sound out; equals `letters.len()` once complete
    index: usize,
}

impl SoundOutRound {
    pub fn new(entry: &'static WordEntry) -> Self {
        Self {
            entry,
            letters: entry.letters(),
            index: 0,
        }
    }

    /// Pick a word uniformly from `pool`
    pub fn deal<R: Rng + ?Sized>(pool: &[&'static WordEntry], rng: &mut R) -> Option<Self> {
        pool.choose(rng).map(|&entry| Self::new(entry))
    }

    pub fn word(&self) -> &'static str {
        self.entry.word
    }

    pub fn hint(&self) -> &'static str {
        self.entry.hint
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_letter(&self) -> Option<Letter> {
        self.letters.get(self.index).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.letters.len()
    }

    /// Move past the current letter, returning it. `None` once complete.
    pub fn advance(&mut self) -> Option<Letter> {
        let letter = self.current_letter()?;
        self.index += 1;
        Some(letter)
    }
}
