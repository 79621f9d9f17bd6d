//! Contract-based validation for state transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`. Preconditions gate whether a transition may start;
//! postconditions check the snapshot it produced before it is published.

use super::action::{Purchase, Rejection, UpgradeError};
use super::invariants::{GambitInvariants, InvariantSet, InvariantViolation};
use super::phases::Phase;
use super::rules::generate_moves;
use super::state::GameState;
use super::types::{PieceId, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Error reported when a condition fails.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Self::Error>;
}

// ─────────────────────────────────────────────────────────────
//  Purchase Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: no winner yet.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails once the game is decided.
    pub fn check(state: &GameState) -> Result<(), UpgradeError> {
        match state.winner() {
            Some(_) => Err(UpgradeError::GameOver),
            None => Ok(()),
        }
    }
}

/// Precondition: the target piece is on the board.
pub struct PieceExists;

impl PieceExists {
    /// Fails for ids no longer in the registry.
    pub fn check(purchase: &Purchase, state: &GameState) -> Result<(), UpgradeError> {
        state
            .pieces()
            .get(purchase.piece)
            .map(|_| ())
            .ok_or(UpgradeError::PieceNotFound(purchase.piece))
    }
}

/// Precondition: during play, only the side to move may buy.
pub struct BuyersTurn;

impl BuyersTurn {
    /// Pre-game purchases are not turn-gated.
    pub fn check(purchase: &Purchase, state: &GameState) -> Result<(), UpgradeError> {
        let Some(piece) = state.pieces().get(purchase.piece) else {
            return Err(UpgradeError::PieceNotFound(purchase.piece));
        };
        if state.phase() == Phase::InProgress && piece.color() != state.turn() {
            return Err(UpgradeError::NotYourTurn);
        }
        Ok(())
    }
}

/// Precondition: the upgrade applies to the piece's kind.
pub struct UpgradeApplies;

impl UpgradeApplies {
    /// Only promotion is restricted (pawns only).
    pub fn check(purchase: &Purchase, state: &GameState) -> Result<(), UpgradeError> {
        let Some(piece) = state.pieces().get(purchase.piece) else {
            return Err(UpgradeError::PieceNotFound(purchase.piece));
        };
        if purchase.upgrade.spec().applicability().admits(piece.kind()) {
            Ok(())
        } else {
            Err(UpgradeError::UpgradeNotApplicable)
        }
    }
}

/// Precondition: the buyer can pay.
pub struct Affordable;

impl Affordable {
    /// Compares the owner's balance with the catalog cost.
    pub fn check(purchase: &Purchase, state: &GameState) -> Result<(), UpgradeError> {
        let Some(piece) = state.pieces().get(purchase.piece) else {
            return Err(UpgradeError::PieceNotFound(purchase.piece));
        };
        if state.points().can_afford(piece.color(), purchase.upgrade.cost()) {
            Ok(())
        } else {
            Err(UpgradeError::InsufficientFunds)
        }
    }
}

/// Contract for upgrade purchases.
///
/// Preconditions run in a fixed order so the first failing check decides
/// the reported reason.
pub struct PurchaseContract;

impl Contract<GameState, Purchase> for PurchaseContract {
    type Error = UpgradeError;

    #[instrument(skip(state))]
    fn pre(state: &GameState, purchase: &Purchase) -> Result<(), UpgradeError> {
        GameNotOver::check(state)?;
        PieceExists::check(purchase, state)?;
        BuyersTurn::check(purchase, state)?;
        UpgradeApplies::check(purchase, state)?;
        Affordable::check(purchase, state)?;
        Ok(())
    }

    fn post(_before: &GameState, after: &GameState) -> Result<(), UpgradeError> {
        assert_invariants(after);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// A request to move a piece to a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct MoveIntent {
    /// Piece to move.
    pub piece: PieceId,
    /// Destination.
    pub to: Square,
}

/// Precondition: moves are only accepted while the game is running.
pub struct Playing;

impl Playing {
    /// Fails in pre-game and after a win.
    pub fn check(state: &GameState) -> Result<(), Rejection> {
        if state.winner().is_some() {
            return Err(Rejection::GameOver);
        }
        if state.phase() == Phase::PreGame {
            return Err(Rejection::NotStarted);
        }
        Ok(())
    }
}

/// Contract for moves: the destination must be a generated candidate of a
/// piece belonging to the side to move.
pub struct MoveContract;

impl Contract<GameState, MoveIntent> for MoveContract {
    type Error = Rejection;

    #[instrument(skip(state))]
    fn pre(state: &GameState, intent: &MoveIntent) -> Result<(), Rejection> {
        Playing::check(state)?;
        let piece = state
            .pieces()
            .get(intent.piece)
            .ok_or(Rejection::UnknownPiece(intent.piece))?;
        if piece.color() != state.turn() {
            return Err(Rejection::WrongTurn(piece.color()));
        }
        if !generate_moves(piece, state.pieces())
            .iter()
            .any(|c| c.to == intent.to)
        {
            return Err(Rejection::IllegalDestination(intent.to));
        }
        Ok(())
    }

    fn post(_before: &GameState, after: &GameState) -> Result<(), Rejection> {
        assert_invariants(after);
        Ok(())
    }
}

/// Contract for teleports: a selected piece of the side to move, holding an
/// unused grant, onto an empty square.
pub struct TeleportContract;

impl Contract<GameState, Square> for TeleportContract {
    type Error = Rejection;

    #[instrument(skip(state))]
    fn pre(state: &GameState, to: &Square) -> Result<(), Rejection> {
        Playing::check(state)?;
        let id = state.selection().ok_or(Rejection::NoSelection)?;
        let piece = state.pieces().get(id).ok_or(Rejection::UnknownPiece(id))?;
        if piece.color() != state.turn() {
            return Err(Rejection::WrongTurn(piece.color()));
        }
        if !piece.abilities().teleport_ready() {
            return Err(Rejection::NoTeleport(id));
        }
        if state.pieces().at(*to).is_some() {
            return Err(Rejection::SquareOccupied(*to));
        }
        Ok(())
    }

    fn post(_before: &GameState, after: &GameState) -> Result<(), Rejection> {
        assert_invariants(after);
        Ok(())
    }
}

/// Checks every game invariant, logging each violation.
///
/// Panics in debug builds when any invariant fails.
#[instrument(skip(state))]
pub fn assert_invariants(state: &GameState) {
    let result = GambitInvariants::check_all(state);
    if let Err(violations) = &result {
        for InvariantViolation { description } in violations {
            warn!(%description, "Invariant violated");
        }
    }
    debug_assert!(result.is_ok(), "Game invariants violated: {:?}", result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Upgrade;
    use crate::settings::RuleSet;

    fn started() -> GameState {
        let mut state = GameState::initial(&RuleSet::default());
        state.phase = Phase::InProgress;
        state
    }

    #[test]
    fn test_purchase_pre_passes_in_pregame_for_either_side() {
        let state = GameState::initial(&RuleSet::default());
        let black_pawn = state.pieces().at(Square::new(1, 0).unwrap()).unwrap().id();
        let purchase = Purchase::new(black_pawn, Upgrade::Shield);
        assert!(PurchaseContract::pre(&state, &purchase).is_ok());
    }

    #[test]
    fn test_purchase_wrong_turn_in_play() {
        let state = started();
        let black_pawn = state.pieces().at(Square::new(1, 0).unwrap()).unwrap().id();
        let purchase = Purchase::new(black_pawn, Upgrade::Shield);
        assert_eq!(
            PurchaseContract::pre(&state, &purchase),
            Err(UpgradeError::NotYourTurn)
        );
    }

    #[test]
    fn test_purchase_check_order() {
        let state = started();
        // Black rook: wrong turn, not a pawn, and too expensive. Turn wins.
        let black_rook = state.pieces().at(Square::new(0, 0).unwrap()).unwrap().id();
        let purchase = Purchase::new(black_rook, Upgrade::PromotePawn);
        assert_eq!(
            PurchaseContract::pre(&state, &purchase),
            Err(UpgradeError::NotYourTurn)
        );
    }

    #[test]
    fn test_purchase_missing_piece() {
        let state = started();
        let purchase = Purchase::new(PieceId::new(999), Upgrade::Shield);
        assert_eq!(
            PurchaseContract::pre(&state, &purchase),
            Err(UpgradeError::PieceNotFound(PieceId::new(999)))
        );
    }

    #[test]
    fn test_move_pre_rejects_before_start() {
        let state = GameState::initial(&RuleSet::default());
        let pawn = state.pieces().at(Square::new(6, 0).unwrap()).unwrap().id();
        let intent = MoveIntent::new(pawn, Square::new(5, 0).unwrap());
        assert_eq!(MoveContract::pre(&state, &intent), Err(Rejection::NotStarted));
    }

    #[test]
    fn test_move_pre_rejects_illegal_destination() {
        let state = started();
        let pawn = state.pieces().at(Square::new(6, 0).unwrap()).unwrap().id();
        let to = Square::new(3, 0).unwrap();
        assert_eq!(
            MoveContract::pre(&state, &MoveIntent::new(pawn, to)),
            Err(Rejection::IllegalDestination(to))
        );
    }

    #[test]
    fn test_teleport_pre_requires_selection() {
        let state = started();
        assert_eq!(
            TeleportContract::pre(&state, &Square::new(4, 4).unwrap()),
            Err(Rejection::NoSelection)
        );
    }
}
