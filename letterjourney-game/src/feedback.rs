//! Feedback text and spoken phrases
//!
//! Strings here are catalog keys in English; a presentation layer with a
//! message catalog translates them before display.

use letterjourney_core::Letter;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Shown after a correct answer or a finished word
pub const ENCOURAGEMENTS: [&str; 12] = [
    "Great job! ⭐",
    "Fantastic! 🌟",
    "You're a star! ✨",
    "Amazing! 🎉",
    "Well done! 👏",
    "Keep going! 💪",
    "Super! 🚀",
    "Brilliant! 🌈",
    "You did it! 🎊",
    "Wow, incredible! 🏆",
    "Perfect! 💯",
    "Champion! 🥇",
];

/// Shown after a wrong pick
pub const TRY_AGAIN: [&str; 4] = [
    "Almost! Try again! 💪",
    "So close! One more time! 🌟",
    "You can do it! 🎯",
    "Don't give up! Keep trying! 💫",
];

/// Spoken when the right letter is found
pub const CHEERS: [&str; 3] = ["Correct!", "Yes!", "Great!"];

/// Spoken when a word has been sounded out
pub const WORD_DONE: &str = "Amazing! You did it!";

pub(crate) fn pick<R: Rng + ?Sized>(phrases: &[&'static str], rng: &mut R) -> &'static str {
    phrases.choose(rng).copied().unwrap_or_default()
}

/// What the feedback line currently says
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Explore: a letter's name and sound
    LetterInfo {
        letter: Letter,
        name: &'static str,
        sound: &'static str,
    },
    /// Find: the right letter was picked
    Correct(&'static str),
    /// Find: a wrong letter was picked
    TryAgain(&'static str),
    /// Sound Out: how the current letter sounds
    SoundsLike { letter: Letter, sound: &'static str },
    /// Sound Out: the whole word is done
    WordComplete {
        praise: &'static str,
        word: &'static str,
    },
    /// Sound Out: the word finished on a level milestone
    LevelUp(u32),
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::LetterInfo { letter, name, sound } => {
                write!(f, "{} - Name: '{}', Sound: '{}'", letter, name, sound)
            }
            Feedback::Correct(phrase) | Feedback::TryAgain(phrase) => f.write_str(phrase),
            Feedback::SoundsLike { letter, sound } => {
                write!(f, "'{}' sounds like '{}'", letter, sound)
            }
            Feedback::WordComplete { praise, word } => {
                write!(f, "{}\nYou sounded out '{}'! 🎉", praise, word)
            }
            Feedback::LevelUp(level) => {
                write!(f, "🎊 LEVEL UP! You're now level {}! 🎊", level)
            }
        }
    }
}
