//! Unique occupancy: at most one piece per square.

use super::Invariant;
use crate::state::GameState;
use std::collections::HashSet;

/// Invariant: no two pieces share a square.
pub struct UniqueOccupancyInvariant;

impl Invariant<GameState> for UniqueOccupancyInvariant {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::new();
        state.pieces().iter().all(|p| seen.insert(p.square()))
    }

    fn description() -> &'static str {
        "At most one piece occupies any square"
    }
}
