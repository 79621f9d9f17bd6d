//! Session phase and derived game status.

use super::types::Color;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Free upgrade shopping, no moves yet.
    #[strum(to_string = "pre-game")]
    PreGame,
    /// Turns alternate; moves and teleports are accepted.
    #[strum(to_string = "in progress")]
    InProgress,
}

/// Combined view of phase and winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Setting up; only upgrades are accepted.
    PreGame,
    /// Playing; `turn` is the side to move.
    InProgress {
        /// Side to move.
        turn: Color,
    },
    /// A king has fallen. Only reset is accepted.
    GameOver {
        /// Side that captured the king.
        winner: Color,
    },
}

impl GameStatus {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::GameOver { winner } => Some(*winner),
            _ => None,
        }
    }

    /// True once a winner exists.
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver { .. })
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::PreGame => write!(f, "Pre-game setup"),
            GameStatus::InProgress { turn } => write!(f, "{} to move", turn),
            GameStatus::GameOver { winner } => write!(f, "{} wins", winner),
        }
    }
}
