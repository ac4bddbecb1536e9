//! Find the Letter: hear a name, pick the letter

use crate::error::GameError;
use letterjourney_core::phonetics::normalize;
use letterjourney_core::Letter;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Correct,
    Wrong,
}

#[derive(Debug, Clone)]
pub struct FindRound {
    target: Letter,
    candidates: Vec<Letter>,
    solved: bool,
    wrong: Option<(Letter, Instant)>,
}

impl FindRound {
    /// Pick a target uniformly from `alphabet` and up to `count - 1` distinct
    /// distractors, shuffled together. `None` only for an empty alphabet.
    pub fn deal<R: Rng + ?Sized>(alphabet: &[Letter], count: usize, rng: &mut R) -> Option<Self> {
        let target = *alphabet.choose(rng)?;

        let others: Vec<Letter> = alphabet.iter().copied().filter(|&l| l != target).collect();
        let mut candidates = Vec::with_capacity(count.max(1));
        candidates.push(target);
        candidates.extend(others.choose_multiple(rng, count.saturating_sub(1)).copied());
        candidates.shuffle(rng);

        Some(Self {
            target,
            candidates,
            solved: false,
            wrong: None,
        })
    }

    pub fn target(&self) -> Letter {
        self.target
    }

    /// Letters on screen, in display order
    pub fn candidates(&self) -> &[Letter] {
        &self.candidates
    }

    /// Solved rounds are the only ones that can advance
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn select(&mut self, letter: Letter, now: Instant) -> Result<Selection, GameError> {
        if self.solved {
            return Err(GameError::RoundSolved);
        }

        let letter = normalize(letter);
        if !self.candidates.contains(&letter) {
            return Err(GameError::NotCandidate(letter));
        }

        if letter == self.target {
            self.solved = true;
            self.wrong = None;
            Ok(Selection::Correct)
        } else {
            self.wrong = Some((letter, now));
            Ok(Selection::Wrong)
        }
    }

    /// The wrongly picked letter, while its marker is still showing
    pub fn wrong_marker(&self, now: Instant, hold: Duration) -> Option<Letter> {
        match self.wrong {
            Some((letter, at)) if now.saturating_duration_since(at) < hold => Some(letter),
            _ => None,
        }
    }
}
