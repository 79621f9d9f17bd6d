//! Teleport consistency: a teleport can only be spent if it was granted.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `teleport_used` implies `teleport_once`.
pub struct TeleportConsistentInvariant;

impl Invariant<GameState> for TeleportConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        state.pieces().iter().all(|p| {
            let abilities = p.abilities();
            !abilities.teleport_used || abilities.teleport_once
        })
    }

    fn description() -> &'static str {
        "A teleport is only used after it was granted"
    }
}
