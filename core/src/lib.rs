//! Game logic for Circuit Escape: the circuit assembly puzzle, the switch and
//! door network of the exploration map, and the session state machine that
//! ties them together. Rendering, audio and hardware are reached only through
//! the traits in [`cues`].

pub use clock::*;
pub use component::*;
pub use config::*;
pub use controller::*;
pub use cues::*;
pub use dialogue::*;
pub use error::*;
pub use fx::*;
pub use puzzle::*;
pub use session::*;
pub use types::*;
pub use validator::*;
pub use world::*;

mod clock;
mod component;
mod config;
mod controller;
pub mod cues;
mod dialogue;
mod error;
mod fx;
mod puzzle;
mod session;
#[cfg(test)]
mod test_support;
mod types;
mod validator;
mod world;

/// Outcome of a single edit on the puzzle board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    NoChange,
    Changed,
}

impl EditOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
