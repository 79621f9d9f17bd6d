//! The collection of live pieces.

use super::types::{Color, Piece, PieceId, PieceKind, Square};
use serde::{Deserialize, Serialize};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// All pieces currently on the board.
///
/// Pure data: lookups by id or square, no rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceSet {
    pieces: Vec<Piece>,
}

impl PieceSet {
    /// Wraps an arbitrary list of pieces.
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    /// The standard 32-piece opening layout.
    ///
    /// Ids are assigned in setup order (pawns, rooks, knights, bishops,
    /// queens, kings; white before black), so every fresh layout carries
    /// the same ids.
    pub fn standard() -> Self {
        let mut pieces = Vec::with_capacity(32);
        let mut add = |kind, color, row, col| {
            if let Some(square) = Square::new(row, col) {
                let id = PieceId::new(pieces.len() as u16);
                pieces.push(Piece::new(id, kind, color, square));
            }
        };

        for color in [Color::White, Color::Black] {
            for col in 0..Square::SIZE {
                add(PieceKind::Pawn, color, color.pawn_row(), col);
            }
        }
        for kind in [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            for color in [Color::White, Color::Black] {
                for (col, _) in BACK_RANK.iter().enumerate().filter(|(_, k)| **k == kind) {
                    add(kind, color, color.back_row(), col as u8);
                }
            }
        }

        Self { pieces }
    }

    /// Piece standing on the square, if any.
    pub fn at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square() == square)
    }

    /// Piece with the given id, if still alive.
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id() == id)?;
        Some(self.pieces.remove(index))
    }

    /// True when `color` still has a king on the board.
    pub fn king_present(&self, color: Color) -> bool {
        self.pieces
            .iter()
            .any(|p| p.kind() == PieceKind::King && p.color() == color)
    }

    /// Iterates over every live piece.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Iterates over the pieces of one side.
    pub fn of_color(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.color() == color)
    }

    /// Number of live pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// True when no piece is left.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
