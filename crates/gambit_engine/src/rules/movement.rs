//! Candidate move generation.
//!
//! Pure functions over a piece and the current registry. Base movement is
//! chosen by a single match on the piece kind; ability overlays are unioned
//! in afterwards.

use crate::registry::PieceSet;
use crate::types::{Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Orthogonal ray directions.
pub const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal ray directions.
pub const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// L-shaped jumps.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Adjacent steps.
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A destination the piece may move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Destination square.
    pub to: Square,
    /// An enemy currently stands on the destination.
    pub capture: bool,
}

/// Generates every candidate destination for `piece`.
///
/// Destinations holding a friendly piece are never produced. Each square
/// appears at most once, in generation order.
#[instrument(skip_all, fields(piece = %piece))]
pub fn generate_moves(piece: &Piece, pieces: &PieceSet) -> Vec<Candidate> {
    let mut moves = MoveList::new(piece, pieces);

    match piece.kind() {
        PieceKind::Pawn => moves.pawn(),
        PieceKind::Knight => moves.steps(&KNIGHT_DELTAS),
        PieceKind::Bishop => moves.rays(&BISHOP_DIRS),
        PieceKind::Rook => moves.rays(&ROOK_DIRS),
        PieceKind::Queen => {
            moves.rays(&ROOK_DIRS);
            moves.rays(&BISHOP_DIRS);
        }
        PieceKind::King => moves.steps(&KING_STEPS),
    }

    if piece.abilities().add_knight_move {
        moves.steps(&KNIGHT_DELTAS);
    }

    moves.finish()
}

struct MoveList<'a> {
    piece: &'a Piece,
    pieces: &'a PieceSet,
    out: Vec<Candidate>,
}

impl<'a> MoveList<'a> {
    fn new(piece: &'a Piece, pieces: &'a PieceSet) -> Self {
        Self {
            piece,
            pieces,
            out: Vec::new(),
        }
    }

    fn finish(self) -> Vec<Candidate> {
        self.out
    }

    fn push(&mut self, to: Square, capture: bool) {
        if !self.out.iter().any(|c| c.to == to) {
            self.out.push(Candidate { to, capture });
        }
    }

    fn is_enemy(&self, other: &Piece) -> bool {
        other.color() != self.piece.color()
    }

    /// Single-step targets: empty or enemy-occupied.
    fn steps(&mut self, deltas: &[(i8, i8)]) {
        for &(dr, dc) in deltas {
            let Some(to) = self.piece.square().offset(dr, dc) else {
                continue;
            };
            match self.pieces.at(to) {
                None => self.push(to, false),
                Some(other) if self.is_enemy(other) => self.push(to, true),
                Some(_) => {}
            }
        }
    }

    /// Sliding rays. A jumper treats every blocker as transparent, so the
    /// ray keeps going and may capture again further along.
    fn rays(&mut self, dirs: &[(i8, i8)]) {
        let jumper = self.piece.abilities().jumper;
        for &(dr, dc) in dirs {
            let mut cursor = self.piece.square();
            while let Some(to) = cursor.offset(dr, dc) {
                cursor = to;
                match self.pieces.at(to) {
                    None => self.push(to, false),
                    Some(other) => {
                        if self.is_enemy(other) {
                            self.push(to, true);
                        }
                        if !jumper {
                            break;
                        }
                    }
                }
            }
        }
    }

    fn pawn(&mut self) {
        let color = self.piece.color();
        let from = self.piece.square();
        let forward = color.forward();

        if let Some(one) = from.offset(forward, 0)
            && self.pieces.at(one).is_none()
        {
            self.push(one, false);

            if from.row() == color.pawn_row()
                && let Some(two) = from.offset(forward * 2, 0)
                && self.pieces.at(two).is_none()
            {
                self.push(two, false);
            }
        }

        for dc in [-1, 1] {
            if let Some(to) = from.offset(forward, dc)
                && let Some(other) = self.pieces.at(to)
                && self.is_enemy(other)
            {
                self.push(to, true);
            }
        }
    }
}
