//! King limit: zero or one king per color.

use super::Invariant;
use crate::state::GameState;
use crate::types::{Color, PieceKind};
use strum::IntoEnumIterator;

/// Invariant: each color has at most one king.
///
/// A missing king is legal: it is how a game ends.
pub struct KingLimitInvariant;

impl Invariant<GameState> for KingLimitInvariant {
    fn holds(state: &GameState) -> bool {
        Color::iter().all(|color| {
            state
                .pieces()
                .of_color(color)
                .filter(|p| p.kind() == PieceKind::King)
                .count()
                <= 1
        })
    }

    fn description() -> &'static str {
        "Each color has at most one king"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PieceSet;
    use crate::settings::RuleSet;
    use crate::types::{Piece, PieceId, Square};

    #[test]
    fn test_kingless_side_holds() {
        let pieces = PieceSet::new(vec![Piece::new(
            PieceId::new(0),
            PieceKind::King,
            Color::White,
            Square::new(7, 4).unwrap(),
        )]);
        let state = GameState::with_pieces(pieces, &RuleSet::default());
        assert!(KingLimitInvariant::holds(&state));
    }

    #[test]
    fn test_two_kings_violate() {
        let pieces = PieceSet::new(vec![
            Piece::new(PieceId::new(0), PieceKind::King, Color::Black, Square::new(0, 4).unwrap()),
            Piece::new(PieceId::new(1), PieceKind::King, Color::Black, Square::new(0, 5).unwrap()),
        ]);
        let state = GameState::with_pieces(pieces, &RuleSet::default());
        assert!(!KingLimitInvariant::holds(&state));
    }
}
