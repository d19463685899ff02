//! Game outcome.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Exactly one player survives.
    Winner(PlayerId),
    /// Everyone was eliminated. No winner is declared.
    NoSurvivors,
}

impl GameResult {
    /// Decide the result from the number of survivors.
    ///
    /// Returns `None` while two or more players are alive.
    #[must_use]
    pub fn from_survivors(survivors: &[PlayerId]) -> Option<Self> {
        match survivors {
            [] => Some(GameResult::NoSurvivors),
            [winner] => Some(GameResult::Winner(*winner)),
            _ => None,
        }
    }
}
