//! Square-indexed view of the registry, for rendering.

use super::registry::PieceSet;
use super::rules::Candidate;
use super::types::{Piece, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

const SIZE: usize = Square::SIZE as usize;

/// 8x8 matrix of optional pieces, row 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; SIZE]; SIZE],
}

impl Board {
    /// Builds the matrix from the registry.
    #[instrument(skip(pieces))]
    pub fn from_pieces(pieces: &PieceSet) -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        for piece in pieces.iter() {
            let square = piece.square();
            cells[usize::from(square.row())][usize::from(square.col())] = Some(*piece);
        }
        Self { cells }
    }

    /// Piece on the square.
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.cells[usize::from(square.row())][usize::from(square.col())].as_ref()
    }

    /// Rows of the matrix.
    pub fn rows(&self) -> &[[Option<Piece>; SIZE]; SIZE] {
        &self.cells
    }

    /// Formats the board as text.
    ///
    /// White pieces are uppercase, black lowercase, empty squares `.`.
    /// Highlighted destinations show `*`, or `x` when they capture.
    pub fn display(&self, highlights: &[Candidate]) -> String {
        let mut result = String::from("  0 1 2 3 4 5 6 7\n");
        for (row, cells) in self.cells.iter().enumerate() {
            result.push_str(&row.to_string());
            for (col, cell) in cells.iter().enumerate() {
                let mark = highlights
                    .iter()
                    .find(|c| usize::from(c.to.row()) == row && usize::from(c.to.col()) == col);
                let symbol = match (mark, cell) {
                    (Some(c), _) if c.capture => 'x',
                    (Some(_), _) => '*',
                    (None, Some(piece)) => piece.symbol(),
                    (None, None) => '.',
                };
                result.push(' ');
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
