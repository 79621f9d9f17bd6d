//! Unique ids: every live piece has its own identity.

use super::Invariant;
use crate::state::GameState;
use std::collections::HashSet;

/// Invariant: piece ids are unique.
///
/// Selection is tracked by id, so a duplicate would make it ambiguous.
pub struct UniqueIdsInvariant;

impl Invariant<GameState> for UniqueIdsInvariant {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::new();
        state.pieces().iter().all(|p| seen.insert(p.id()))
    }

    fn description() -> &'static str {
        "Every piece has a distinct id"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PieceSet;
    use crate::settings::RuleSet;
    use crate::types::{Color, Piece, PieceId, PieceKind, Square};

    #[test]
    fn test_duplicate_id_violates() {
        let pieces = PieceSet::new(vec![
            Piece::new(PieceId::new(5), PieceKind::Rook, Color::White, Square::new(0, 0).unwrap()),
            Piece::new(PieceId::new(5), PieceKind::Rook, Color::Black, Square::new(7, 7).unwrap()),
        ]);
        let state = GameState::with_pieces(pieces, &RuleSet::default());
        assert!(!UniqueIdsInvariant::holds(&state));
    }
}
