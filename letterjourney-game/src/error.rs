//! Rejected inputs
//!
//! None of these are fatal. They tell the presentation layer an input did not
//! apply (a tap during the wrong screen, a second "next" on a finished word),
//! and the session state is unchanged whenever one is returned.

use crate::session::Mode;
use letterjourney_core::Letter;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("'{0}' is not a letter of this alphabet")]
    UnknownLetter(Letter),

    #[error("'{0}' is not one of the letters on screen")]
    NotCandidate(Letter),

    #[error("No round in progress")]
    NoActiveRound,

    #[error("Round already solved")]
    RoundSolved,

    #[error("Round not solved yet")]
    RoundUnsolved,

    #[error("Word already complete")]
    WordComplete,

    #[error("Not available in {0} mode")]
    WrongMode(Mode),

    #[error("Nothing to choose a round from")]
    NoContent,
}
