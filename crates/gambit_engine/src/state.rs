//! The immutable game snapshot.

use super::board::Board;
use super::phases::{GameStatus, Phase};
use super::points::Points;
use super::registry::PieceSet;
use super::rules::Candidate;
use super::settings::RuleSet;
use super::types::{Color, Piece, PieceId};
use serde::{Deserialize, Serialize};

/// Complete state of one session.
///
/// The engine never edits a published snapshot: every operation works on a
/// copy and swaps it in only once the whole transition has succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) pieces: PieceSet,
    pub(crate) turn: Color,
    pub(crate) points: Points,
    pub(crate) winner: Option<Color>,
    pub(crate) phase: Phase,
    #[serde(default)]
    pub(crate) selection: Option<PieceId>,
    #[serde(default)]
    pub(crate) legal_moves: Vec<Candidate>,
}

impl GameState {
    /// Fresh session: standard layout, white to move, pre-game.
    pub fn initial(rules: &RuleSet) -> Self {
        Self::with_pieces(PieceSet::standard(), rules)
    }

    /// Pre-game session over an arbitrary layout.
    pub fn with_pieces(pieces: PieceSet, rules: &RuleSet) -> Self {
        Self {
            pieces,
            turn: Color::White,
            points: Points::new(rules.starting_points),
            winner: None,
            phase: Phase::PreGame,
            selection: None,
            legal_moves: Vec::new(),
        }
    }

    /// Live pieces.
    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Point balances.
    pub fn points(&self) -> &Points {
        &self.points
    }

    /// Winner, once a king has been captured.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Session phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Id of the selected piece.
    pub fn selection(&self) -> Option<PieceId> {
        self.selection
    }

    /// The selected piece, if it is still on the board.
    pub fn selected_piece(&self) -> Option<&Piece> {
        self.selection.and_then(|id| self.pieces.get(id))
    }

    /// Cached destinations of the selected piece.
    pub fn legal_moves(&self) -> &[Candidate] {
        &self.legal_moves
    }

    /// Phase and winner folded into one value.
    pub fn status(&self) -> GameStatus {
        match (self.winner, self.phase) {
            (Some(winner), _) => GameStatus::GameOver { winner },
            (None, Phase::PreGame) => GameStatus::PreGame,
            (None, Phase::InProgress) => GameStatus::InProgress { turn: self.turn },
        }
    }

    /// 8x8 matrix view of the pieces.
    pub fn board(&self) -> Board {
        Board::from_pieces(&self.pieces)
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = None;
        self.legal_moves.clear();
    }
}
