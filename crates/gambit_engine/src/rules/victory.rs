//! King-capture win detection.

use crate::registry::PieceSet;
use crate::types::Color;
use tracing::instrument;

/// Returns the winner after `mover` has completed a move.
///
/// The mover wins as soon as the opposing side has no king left. There is
/// no check, checkmate or stalemate.
#[instrument(skip(pieces))]
pub fn winner_after(pieces: &PieceSet, mover: Color) -> Option<Color> {
    (!pieces.king_present(mover.opponent())).then_some(mover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    #[test]
    fn test_no_winner_at_start() {
        let pieces = PieceSet::standard();
        assert_eq!(winner_after(&pieces, Color::White), None);
        assert_eq!(winner_after(&pieces, Color::Black), None);
    }

    #[test]
    fn test_winner_when_king_gone() {
        let mut pieces = PieceSet::standard();
        let black_king = pieces.at(Square::new(0, 4).unwrap()).unwrap().id();
        pieces.remove(black_king);
        assert_eq!(winner_after(&pieces, Color::White), Some(Color::White));
        assert_eq!(winner_after(&pieces, Color::Black), None);
    }
}
