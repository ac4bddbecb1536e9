//! letterjourney-game: the three letter games
//!
//! `GameSession` is a small state machine with one variant per game mode:
//! - Explore: tap any letter to hear its name and sound
//! - Find the Letter: hear a letter name, pick it from six on screen
//! - Sound Out: step through a word one letter sound at a time
//!
//! The session never draws anything. A presentation layer feeds it
//! `InputEvent`s, renders the `RenderState` it returns, and supplies a
//! `Speaker` that turns speech requests into audio.

pub mod error;
pub mod config;
pub mod speaker;
pub mod feedback;
pub mod modes;
pub mod session;
pub mod render;

pub use error::GameError;
pub use config::{FindConfig, GameConfig, SpeechDelays};
pub use speaker::{Speaker, Utterance};
pub use feedback::Feedback;
pub use modes::{ExploreState, FindRound, Selection, SoundOutRound};
pub use session::{GameSession, InputEvent, Mode, Round};
pub use render::{CandidateTile, Header, LetterProgress, LetterTile, Mark, RenderState, Screen, WordLetter};
