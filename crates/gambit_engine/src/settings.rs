//! Tunable economy parameters.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Starting balance and win bonus for a session.
///
/// Capture values and upgrade prices are fixed tables; only these two
/// numbers vary between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Points each side holds at setup.
    pub starting_points: u32,
    /// Points added to the winner when a king falls.
    pub win_bonus: u32,
}

impl RuleSet {
    /// Standard economy: 20 points each, 30 for the win.
    #[instrument]
    pub fn new() -> Self {
        Self {
            starting_points: 20,
            win_bonus: 30,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
