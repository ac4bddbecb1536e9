//! Render-state snapshots for the presentation layer

use crate::config::GameConfig;
use crate::feedback::Feedback;
use crate::session::Round;
use letterjourney_core::{Letter, PhoneticsTable, ProgressStore, ProgressSummary};
use std::time::Instant;

/// Everything one frame shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub header: Header,
    pub screen: Screen,
    pub feedback: Option<String>,
}

/// Counters shown above every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub stars: u32,
    pub streak: u32,
    pub level: u32,
    pub mastered: usize,
    pub alphabet_size: usize,
    pub total_correct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu {
        level: u32,
        summary: ProgressSummary,
    },
    Explore {
        letters: Vec<LetterTile>,
        last_letter: Option<Letter>,
    },
    Find {
        prompt: String,
        candidates: Vec<CandidateTile>,
        /// The "next" control only appears once the round is solved
        can_advance: bool,
    },
    SoundOut {
        word: &'static str,
        hint: &'static str,
        letters: Vec<WordLetter>,
        complete: bool,
        /// The "next sound" control disappears once the word is done
        show_next_sound: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterTile {
    pub letter: Letter,
    pub mastered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    None,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateTile {
    pub letter: Letter,
    pub mark: Mark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterProgress {
    Done,
    Active,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLetter {
    pub letter: Letter,
    pub progress: LetterProgress,
}

pub(crate) fn render(
    table: &PhoneticsTable,
    progress: &ProgressStore,
    round: &Round,
    feedback: Option<&Feedback>,
    config: &GameConfig,
    now: Instant,
) -> RenderState {
    let header = Header {
        stars: progress.stars(),
        streak: progress.streak(),
        level: progress.level(),
        mastered: progress.mastered_letters().len(),
        alphabet_size: table.len(),
        total_correct: progress.total_correct(),
    };

    let screen = match round {
        Round::Idle => Screen::Menu {
            level: progress.level(),
            summary: progress.summary(table.len()),
        },
        Round::Explore(state) => Screen::Explore {
            letters: table
                .letters()
                .map(|letter| LetterTile {
                    letter,
                    mastered: progress.is_mastered(letter),
                })
                .collect(),
            last_letter: state.last_letter,
        },
        Round::Find(round) => {
            let wrong = round.wrong_marker(now, config.find.wrong_marker());
            let candidates = round
                .candidates()
                .iter()
                .map(|&letter| {
                    let mark = if round.is_solved() && letter == round.target() {
                        Mark::Correct
                    } else if wrong == Some(letter) {
                        Mark::Wrong
                    } else {
                        Mark::None
                    };
                    CandidateTile { letter, mark }
                })
                .collect();

            Screen::Find {
                prompt: format!(
                    "Which letter says '{}'?",
                    table.name(round.target()).unwrap_or_default()
                ),
                candidates,
                can_advance: round.is_solved(),
            }
        }
        Round::SoundOut(round) => {
            let letters = round
                .letters()
                .iter()
                .enumerate()
                .map(|(i, &letter)| WordLetter {
                    letter,
                    progress: match i.cmp(&round.index()) {
                        std::cmp::Ordering::Less => LetterProgress::Done,
                        std::cmp::Ordering::Equal => LetterProgress::Active,
                        std::cmp::Ordering::Greater => LetterProgress::Pending,
                    },
                })
                .collect();

            Screen::SoundOut {
                word: round.word(),
                hint: round.hint(),
                letters,
                complete: round.is_complete(),
                show_next_sound: !round.is_complete(),
            }
        }
    };

    RenderState {
        header,
        screen,
        feedback: feedback.map(ToString::to_string),
    }
}
