//! The game state machine.
//!
//! `Game` owns the canonical snapshot. Each command builds the next
//! snapshot in a scratch copy, checks its postconditions, and only then
//! swaps it in. A rejected command leaves the canonical snapshot untouched.
//!
//! ```text
//! PreGame --start_game--> InProgress --king captured--> GameOver
//!    ^                                                     |
//!    +---------------------- reset_game -------------------+
//! ```

use super::action::{MoveReport, Purchase, SquareOutcome, UpgradeError};
use super::catalog::Upgrade;
use super::contracts::{
    Contract, MoveContract, MoveIntent, Playing, PurchaseContract, TeleportContract,
};
use super::invariants::{GambitInvariants, InvariantSet, InvariantViolation};
use super::phases::Phase;
use super::registry::PieceSet;
use super::rules::{generate_moves, winner_after};
use super::settings::RuleSet;
use super::state::GameState;
use super::types::{Piece, PieceId, Square};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Error for custom layouts that break a game invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    /// Every invariant the layout violates.
    pub violations: Vec<InvariantViolation>,
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let descriptions = self
            .violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Invalid layout: {}", descriptions)
    }
}

impl std::error::Error for LayoutError {}

/// Rules and economy engine for one session.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    rules: RuleSet,
}

impl Game {
    /// New session with the standard economy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    /// New session with a custom economy.
    #[instrument]
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            state: GameState::initial(&rules),
            rules,
        }
    }

    /// Pre-game session over a custom layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when pieces overlap, share an id, a color
    /// has two kings, or a teleport is marked used without a grant.
    #[instrument(skip(pieces), fields(count = pieces.len()))]
    pub fn from_pieces(pieces: Vec<Piece>, rules: RuleSet) -> Result<Self, LayoutError> {
        let state = GameState::with_pieces(PieceSet::new(pieces), &rules);
        GambitInvariants::check_all(&state).map_err(|violations| LayoutError { violations })?;
        Ok(Self { state, rules })
    }

    /// Current snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Economy parameters.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// True when the selection could teleport right now.
    pub fn can_teleport(&self) -> bool {
        Playing::check(&self.state).is_ok()
            && self
                .state
                .selected_piece()
                .is_some_and(|p| p.color() == self.state.turn() && p.abilities().teleport_ready())
    }

    fn commit(&mut self, next: GameState) {
        self.state = next;
    }

    // ─────────────────────────────────────────────────────────────
    //  Board interaction
    // ─────────────────────────────────────────────────────────────

    /// Handles a click on a square.
    ///
    /// With a selection, clicking one of its legal destinations moves it.
    /// Clicking a piece of the side to move selects it. Anything else
    /// clears the selection. Ignored before the game starts and after it
    /// ends.
    #[instrument(skip(self), fields(square = %square))]
    pub fn select_square(&mut self, square: Square) -> SquareOutcome {
        if let Err(reason) = Playing::check(&self.state) {
            debug!(%reason, "Click ignored");
            return SquareOutcome::Ignored;
        }

        if let Some(selected) = self.state.selection
            && self.state.legal_moves.iter().any(|c| c.to == square)
        {
            return self.apply_move(selected, square);
        }

        let friendly = self
            .state
            .pieces
            .at(square)
            .filter(|p| p.color() == self.state.turn)
            .map(Piece::id);

        match friendly {
            Some(id) => {
                self.select(id);
                SquareOutcome::Selected(id)
            }
            None => {
                let mut next = self.state.clone();
                next.clear_selection();
                self.commit(next);
                SquareOutcome::Cleared
            }
        }
    }

    fn select(&mut self, id: PieceId) {
        let mut next = self.state.clone();
        next.selection = Some(id);
        next.legal_moves = next
            .pieces
            .get(id)
            .map(|p| generate_moves(p, &next.pieces))
            .unwrap_or_default();
        debug!(piece = %id, moves = next.legal_moves.len(), "Piece selected");
        self.commit(next);
    }

    /// Moves `piece` to `to`, capturing whatever enemy stands there.
    ///
    /// A shielded target absorbs the attempt instead: its shield is spent,
    /// neither piece moves, the turn does not pass, and the attacker stays
    /// selected with freshly generated moves.
    #[instrument(skip(self), fields(piece = %piece, to = %to))]
    pub fn apply_move(&mut self, piece: PieceId, to: Square) -> SquareOutcome {
        let intent = MoveIntent::new(piece, to);
        if let Err(reason) = MoveContract::pre(&self.state, &intent) {
            debug!(%reason, "Move ignored");
            return SquareOutcome::Ignored;
        }

        let mut next = self.state.clone();
        let Some(mover) = next.pieces.get(piece).copied() else {
            return SquareOutcome::Ignored;
        };
        let color = mover.color();
        let mut captured = None;
        let mut awarded = 0;

        if let Some(target) = next.pieces.at(to).copied()
            && target.color() != color
        {
            if target.abilities().shield {
                return self.absorb(mover, target);
            }
            next.pieces.remove(target.id());
            awarded += target.kind().value();
            next.points.credit(color, target.kind().value());
            captured = Some(target);
            info!(captured = %target, value = target.kind().value(), "Capture");
        }

        if let Some(me) = next.pieces.get_mut(piece) {
            me.relocate(to);
        }

        let winner = winner_after(&next.pieces, color);
        match winner {
            Some(winner) => {
                next.winner = Some(winner);
                next.points.credit(winner, self.rules.win_bonus);
                awarded += self.rules.win_bonus;
                info!(%winner, bonus = self.rules.win_bonus, "King captured, game over");
            }
            None => next.turn = color.opponent(),
        }
        next.clear_selection();

        if MoveContract::post(&self.state, &next).is_err() {
            return SquareOutcome::Ignored;
        }
        self.commit(next);

        let report = MoveReport {
            piece,
            from: mover.square(),
            to,
            captured,
            awarded,
            winner,
        };
        info!(from = %report.from, to = %report.to, "Move committed");
        SquareOutcome::Moved(report)
    }

    /// Shield branch of a capture: the scratch move is dropped and only the
    /// spent shield is published.
    fn absorb(&mut self, attacker: Piece, defender: Piece) -> SquareOutcome {
        let mut next = self.state.clone();
        if let Some(target) = next.pieces.get_mut(defender.id()) {
            target.abilities_mut().shield = false;
        }
        next.selection = Some(attacker.id());
        next.legal_moves = generate_moves(&attacker, &next.pieces);
        info!(attacker = %attacker.id(), defender = %defender.id(), "Shield absorbed capture");
        self.commit(next);
        SquareOutcome::Shielded {
            attacker: attacker.id(),
            defender: defender.id(),
        }
    }

    /// Teleports the selected piece to an empty square.
    ///
    /// Spends the piece's teleport grant and passes the turn. Returns `None`
    /// and changes nothing when the teleport is not allowed.
    #[instrument(skip(self), fields(to = %to))]
    pub fn teleport(&mut self, to: Square) -> Option<MoveReport> {
        if let Err(reason) = TeleportContract::pre(&self.state, &to) {
            debug!(%reason, "Teleport ignored");
            return None;
        }

        let mut next = self.state.clone();
        let id = next.selection?;
        let me = next.pieces.get_mut(id)?;
        let from = me.square();
        me.relocate(to);
        me.abilities_mut().teleport_used = true;
        let color = me.color();
        next.turn = color.opponent();
        next.clear_selection();

        TeleportContract::post(&self.state, &next).ok()?;
        self.commit(next);

        info!(piece = %id, %from, %to, "Teleported");
        Some(MoveReport {
            piece: id,
            from,
            to,
            captured: None,
            awarded: 0,
            winner: None,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Economy
    // ─────────────────────────────────────────────────────────────

    /// Buys an upgrade by its string id (`"shield"`, `"promotePawn"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`UpgradeError::InvalidUpgrade`] for unknown ids, otherwise
    /// whatever [`Game::purchase`] reports.
    #[instrument(skip(self))]
    pub fn apply_upgrade(&mut self, piece: PieceId, upgrade_id: &str) -> Result<(), UpgradeError> {
        if self.state.winner.is_some() {
            return Err(UpgradeError::GameOver);
        }
        let upgrade = Upgrade::from_str(upgrade_id)
            .map_err(|_| UpgradeError::InvalidUpgrade(upgrade_id.to_string()))?;
        self.purchase(Purchase::new(piece, upgrade))
    }

    /// Buys an upgrade for a piece and debits its owner.
    ///
    /// Before the game starts either side may buy; during play only the
    /// side to move may. Re-buying a flag the piece already has is allowed
    /// and charged again.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in order: game over, missing piece,
    /// wrong turn, inapplicable upgrade, insufficient funds. Nothing changes
    /// on failure.
    #[instrument(skip(self))]
    pub fn purchase(&mut self, purchase: Purchase) -> Result<(), UpgradeError> {
        if let Err(err) = PurchaseContract::pre(&self.state, &purchase) {
            debug!(%err, "Purchase refused");
            return Err(err);
        }

        let mut next = self.state.clone();
        let piece = next
            .pieces
            .get_mut(purchase.piece)
            .ok_or(UpgradeError::PieceNotFound(purchase.piece))?;
        purchase.upgrade.grant(piece);
        let color = piece.color();
        let cost = purchase.upgrade.cost();
        let balance = next
            .points
            .debit(color, cost)
            .ok_or(UpgradeError::InsufficientFunds)?;

        if let Some(selected) = next.selection {
            next.legal_moves = next
                .pieces
                .get(selected)
                .map(|p| generate_moves(p, &next.pieces))
                .unwrap_or_default();
        }

        PurchaseContract::post(&self.state, &next)?;
        self.commit(next);
        info!(piece = %purchase.piece, upgrade = %purchase.upgrade, cost, balance, "Upgrade purchased");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Leaves pre-game. Returns `false` if the game had already started.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> bool {
        if self.state.phase != Phase::PreGame || self.state.winner.is_some() {
            debug!(phase = %self.state.phase, winner = ?self.state.winner, "Start ignored");
            return false;
        }
        let mut next = self.state.clone();
        next.phase = Phase::InProgress;
        self.commit(next);
        info!("Game started");
        true
    }

    /// Replaces the session with a fresh standard layout in pre-game.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.commit(GameState::initial(&self.rules));
        info!("Game reset");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
