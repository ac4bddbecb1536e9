//! Round-local state, one type per game mode

pub mod explore;
pub mod find;
pub mod sound_out;

pub use explore::ExploreState;
pub use find::{FindRound, Selection};
pub use sound_out::SoundOutRound;
