//! Game session state machine
//!
//! ```text
//! Idle --ModeSelected--> Explore | Find | SoundOut
//!   ^                       |
//!   +----MenuRequested------+
//! ```
//!
//! Each round starts fresh. Nothing carries over between rounds except what
//! `ProgressStore` records.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::feedback::{self, Feedback};
use crate::modes::{ExploreState, FindRound, Selection, SoundOutRound};
use crate::render::{self, RenderState};
use crate::speaker::{Speaker, Utterance};
use letterjourney_core::phonetics::normalize;
use letterjourney_core::{Letter, PhoneticsTable, ProgressStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Explore,
    Find,
    SoundOut,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Explore => "explore",
            Mode::Find => "find",
            Mode::SoundOut => "sound-out",
        })
    }
}

/// Discrete inputs from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    ModeSelected(Mode),
    LetterTapped(Letter),
    /// Find: hear the target again. Sound Out: hear the current letter.
    ReplayRequested,
    /// Find: next round once solved. Sound Out: next letter.
    AdvanceRequested,
    NewRoundRequested,
    MenuRequested,
}

#[derive(Debug, Clone)]
pub enum Round {
    Idle,
    Explore(ExploreState),
    Find(FindRound),
    SoundOut(SoundOutRound),
}

impl Round {
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Round::Idle => None,
            Round::Explore(_) => Some(Mode::Explore),
            Round::Find(_) => Some(Mode::Find),
            Round::SoundOut(_) => Some(Mode::SoundOut),
        }
    }
}

pub struct GameSession<S: Speaker, R: Rng = StdRng> {
    table: &'static PhoneticsTable,
    progress: ProgressStore,
    speaker: S,
    rng: R,
    config: GameConfig,
    round: Round,
    feedback: Option<Feedback>,
}

impl<S: Speaker> GameSession<S, StdRng> {
    pub fn new(
        table: &'static PhoneticsTable,
        progress: ProgressStore,
        speaker: S,
        config: GameConfig,
    ) -> Self {
        Self::with_rng(table, progress, speaker, config, StdRng::from_entropy())
    }
}

impl<S: Speaker, R: Rng> GameSession<S, R> {
    pub fn with_rng(
        table: &'static PhoneticsTable,
        progress: ProgressStore,
        speaker: S,
        config: GameConfig,
        rng: R,
    ) -> Self {
        Self {
            table,
            progress,
            speaker,
            rng,
            config,
            round: Round::Idle,
            feedback: None,
        }
    }

    pub fn table(&self) -> &'static PhoneticsTable {
        self.table
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn mode(&self) -> Option<Mode> {
        self.round.mode()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn into_progress(self) -> ProgressStore {
        self.progress
    }

    /// Apply one input event
    pub fn handle(&mut self, event: InputEvent) -> Result<(), GameError> {
        self.handle_at(event, Instant::now())
    }

    pub fn handle_at(&mut self, event: InputEvent, now: Instant) -> Result<(), GameError> {
        debug!("Input: {:?}", event);
        match event {
            InputEvent::ModeSelected(mode) => self.select_mode(mode),
            InputEvent::LetterTapped(letter) => self.tap_letter(letter, now),
            InputEvent::ReplayRequested => self.replay(),
            InputEvent::AdvanceRequested => match self.round {
                Round::Find(_) => self.next_find_round(),
                Round::SoundOut(_) => self.advance(),
                Round::Explore(_) => Err(GameError::WrongMode(Mode::Explore)),
                Round::Idle => Err(GameError::NoActiveRound),
            },
            InputEvent::NewRoundRequested => self.start_round(),
            InputEvent::MenuRequested => {
                self.show_menu();
                Ok(())
            }
        }
    }

    /// Snapshot of everything the presentation layer draws
    pub fn render(&self) -> RenderState {
        self.render_at(Instant::now())
    }

    pub fn render_at(&self, now: Instant) -> RenderState {
        render::render(
            self.table,
            &self.progress,
            &self.round,
            self.feedback.as_ref(),
            &self.config,
            now,
        )
    }

    pub fn select_mode(&mut self, mode: Mode) -> Result<(), GameError> {
        self.feedback = None;
        match mode {
            Mode::Explore => {
                self.round = Round::Explore(ExploreState::default());
                Ok(())
            }
            Mode::Find => self.start_find_round(),
            Mode::SoundOut => self.start_sound_out_round(),
        }
    }

    pub fn show_menu(&mut self) {
        self.round = Round::Idle;
        self.feedback = None;
    }

    /// Start a fresh round of the current mode
    pub fn start_round(&mut self) -> Result<(), GameError> {
        match self.round {
            Round::Find(_) => self.start_find_round(),
            Round::SoundOut(_) => self.start_sound_out_round(),
            Round::Explore(_) => Err(GameError::WrongMode(Mode::Explore)),
            Round::Idle => Err(GameError::NoActiveRound),
        }
    }

    pub fn tap_letter(&mut self, letter: Letter, now: Instant) -> Result<(), GameError> {
        match self.round {
            Round::Explore(_) => self.explore_letter(letter),
            Round::Find(_) => self.select_letter(letter, now),
            Round::SoundOut(_) => Err(GameError::WrongMode(Mode::SoundOut)),
            Round::Idle => Err(GameError::NoActiveRound),
        }
    }

    /// Explore: say the letter, its name and its sound. Every tap counts as correct.
    pub fn explore_letter(&mut self, letter: Letter) -> Result<(), GameError> {
        let Round::Explore(state) = &mut self.round else {
            return Err(self.wrong_mode());
        };
        let entry = self
            .table
            .entry(letter)
            .ok_or(GameError::UnknownLetter(normalize(letter)))?;

        state.last_letter = Some(entry.letter);
        self.feedback = Some(Feedback::LetterInfo {
            letter: entry.letter,
            name: entry.name,
            sound: entry.sound,
        });
        self.say_after(
            format!("{}. {}. {}.", entry.letter, entry.name, entry.sound),
            self.config.delays.explore_ms,
        );
        self.progress.record_correct(entry.letter);
        Ok(())
    }

    pub fn start_find_round(&mut self) -> Result<(), GameError> {
        let alphabet: Vec<Letter> = self.table.letters().collect();
        let round = FindRound::deal(&alphabet, self.config.find.candidate_count, &mut self.rng)
            .ok_or(GameError::NoContent)?;

        let name = self.table.name(round.target()).unwrap_or_default();
        debug!("Find round: target {} among {:?}", round.target(), round.candidates());
        self.round = Round::Find(round);
        self.feedback = None;
        self.say_after(name, self.config.delays.find_prompt_ms);
        Ok(())
    }

    /// Find: check a pick. A wrong pick keeps the round open for another try.
    pub fn select_letter(&mut self, letter: Letter, now: Instant) -> Result<(), GameError> {
        let Round::Find(round) = &mut self.round else {
            return Err(self.wrong_mode());
        };

        match round.select(letter, now)? {
            Selection::Correct => {
                let target = round.target();
                self.progress.record_correct(target);
                self.feedback = Some(Feedback::Correct(feedback::pick(
                    &feedback::ENCOURAGEMENTS,
                    &mut self.rng,
                )));
                let cheer = feedback::pick(&feedback::CHEERS, &mut self.rng);
                self.say_after(cheer, self.config.delays.cheer_ms);
            }
            Selection::Wrong => {
                self.progress.record_wrong();
                self.feedback = Some(Feedback::TryAgain(feedback::pick(
                    &feedback::TRY_AGAIN,
                    &mut self.rng,
                )));
            }
        }
        Ok(())
    }

    /// Find: move on, but only after the right letter was found
    pub fn next_find_round(&mut self) -> Result<(), GameError> {
        let solved = match &self.round {
            Round::Find(round) => round.is_solved(),
            _ => return Err(self.wrong_mode()),
        };
        if !solved {
            return Err(GameError::RoundUnsolved);
        }
        self.start_find_round()
    }

    /// Replay the current prompt without changing any state
    pub fn replay(&mut self) -> Result<(), GameError> {
        let target = match &self.round {
            Round::Find(round) => round.target(),
            Round::SoundOut(_) => return self.sound_current_letter(),
            Round::Explore(_) => return Err(GameError::WrongMode(Mode::Explore)),
            Round::Idle => return Err(GameError::NoActiveRound),
        };
        let name = self.table.name(target).unwrap_or_default();
        self.speaker.say(Utterance::new(name));
        Ok(())
    }

    /// Sound Out: pick a word from the tiers the learner's level unlocks
    pub fn start_sound_out_round(&mut self) -> Result<(), GameError> {
        let pool = self.table.word_pool(self.progress.level());
        let round = SoundOutRound::deal(&pool, &mut self.rng).ok_or(GameError::NoContent)?;

        debug!("Sound-out round: {} (level {})", round.word(), self.progress.level());
        let word = round.word();
        self.round = Round::SoundOut(round);
        self.feedback = None;
        self.say_after(word, self.config.delays.word_ms);
        Ok(())
    }

    /// Sound Out: hear the current letter's sound
    pub fn sound_current_letter(&mut self) -> Result<(), GameError> {
        let Round::SoundOut(round) = &self.round else {
            return Err(self.wrong_mode());
        };
        let letter = round.current_letter().ok_or(GameError::WordComplete)?;
        let sound = self.table.sound(letter).ok_or(GameError::UnknownLetter(letter))?;

        self.feedback = Some(Feedback::SoundsLike { letter, sound });
        self.speaker.say(Utterance::new(sound));
        Ok(())
    }

    /// Sound Out: credit the current letter and move to the next one
    pub fn advance(&mut self) -> Result<(), GameError> {
        let Round::SoundOut(round) = &mut self.round else {
            return Err(self.wrong_mode());
        };
        let letter = round.advance().ok_or(GameError::WordComplete)?;
        let next = round.current_letter();
        let word = round.word();

        self.progress.record_correct(letter);

        match next {
            None => {
                let praise = feedback::pick(&feedback::ENCOURAGEMENTS, &mut self.rng);
                self.feedback = Some(match self.progress.check_level_up() {
                    Some(level) => Feedback::LevelUp(level),
                    None => Feedback::WordComplete { praise, word },
                });
                self.say_after(feedback::WORD_DONE, self.config.delays.cheer_ms);
            }
            Some(next) => {
                let sound = self.table.sound(next).unwrap_or_default();
                self.feedback = Some(Feedback::SoundsLike { letter: next, sound });
                self.say_after(sound, self.config.delays.next_sound_ms);
            }
        }
        Ok(())
    }

    fn wrong_mode(&self) -> GameError {
        match self.round.mode() {
            Some(mode) => GameError::WrongMode(mode),
            None => GameError::NoActiveRound,
        }
    }

    fn say_after(&self, text: impl Into<String>, delay_ms: u64) {
        self.speaker
            .say(Utterance::after(text, Duration::from_millis(delay_ms)));
    }
}
