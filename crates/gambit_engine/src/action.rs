//! Results of player intents.
//!
//! Board clicks and teleports never fail loudly: an intent that does not
//! apply leaves the state alone and reports what happened. Upgrade
//! purchases are the one command with reportable failures.

use super::catalog::Upgrade;
use super::types::{Color, Piece, PieceId, Square};
use serde::{Deserialize, Serialize};

/// A committed relocation: a move or a teleport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Piece that moved.
    pub piece: PieceId,
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Enemy removed from the destination.
    pub captured: Option<Piece>,
    /// Points earned, including any win bonus.
    pub awarded: u32,
    /// Set when the move ended the game.
    pub winner: Option<Color>,
}

/// What a click on a square did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareOutcome {
    /// Nothing changed (pre-game, game over).
    Ignored,
    /// A friendly piece became the selection.
    Selected(PieceId),
    /// The selection was dropped.
    Cleared,
    /// The selected piece moved.
    Moved(MoveReport),
    /// The capture hit a shield: the shield is spent and nothing moved.
    Shielded {
        /// Piece that attempted the capture.
        attacker: PieceId,
        /// Piece whose shield absorbed it.
        defender: PieceId,
    },
}

/// Why an intent was dropped. Logged, never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// A winner exists.
    #[display("Game is already over")]
    GameOver,
    /// Moves are not accepted before the game starts.
    #[display("Game has not started")]
    NotStarted,
    /// No piece is selected.
    #[display("No piece selected")]
    NoSelection,
    /// The piece id is not on the board.
    #[display("Piece {_0} is not on the board")]
    UnknownPiece(PieceId),
    /// The piece belongs to the side not on move.
    #[display("It's not {_0}'s turn")]
    WrongTurn(Color),
    /// Destination is not among the piece's candidates.
    #[display("Square {_0} is not a legal destination")]
    IllegalDestination(Square),
    /// The piece has no unused teleport.
    #[display("Piece {_0} has no teleport available")]
    NoTeleport(PieceId),
    /// Teleport targets must be empty.
    #[display("Square {_0} is occupied")]
    SquareOccupied(Square),
}

/// Failure of an upgrade purchase.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum UpgradeError {
    /// No catalog entry with this id.
    #[display("Invalid upgrade")]
    InvalidUpgrade(String),
    /// The target piece does not exist.
    #[display("No piece selected")]
    PieceNotFound(PieceId),
    /// During play only the side to move may buy.
    #[display("Can only upgrade your piece on your turn")]
    NotYourTurn,
    /// The upgrade does not apply to this piece kind.
    #[display("Promotion applies to pawns only")]
    UpgradeNotApplicable,
    /// The side cannot pay the cost.
    #[display("Not enough points")]
    InsufficientFunds,
    /// Purchases stop once a winner exists.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for UpgradeError {}

/// A purchase request: which upgrade on which piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Purchase {
    /// Target piece.
    pub piece: PieceId,
    /// Upgrade to buy.
    pub upgrade: Upgrade,
}

/// `{ok, message?}` result handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeResponse {
    /// Whether the purchase went through.
    pub ok: bool,
    /// Failure reason, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Result<(), UpgradeError>> for UpgradeResponse {
    fn from(result: Result<(), UpgradeError>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                message: None,
            },
            Err(err) => Self {
                ok: false,
                message: Some(err.to_string()),
            },
        }
    }
}
