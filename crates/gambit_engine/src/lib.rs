//! Gambit engine - chess with a points economy.
//!
//! Each side earns points by capturing and spends them on persistent
//! abilities for individual pieces, before the match or on its own turn.
//!
//! # Architecture
//!
//! - **Registry**: the live pieces ([`PieceSet`]), pure data
//! - **Rules**: move generation and king-capture victory, pure functions
//! - **Catalog**: the five purchasable [`Upgrade`]s
//! - **Game**: the state machine owning the [`GameState`] snapshot
//!
//! # Example
//!
//! ```
//! use gambit_engine::{Game, Square, SquareOutcome};
//!
//! let mut game = Game::new();
//! game.start_game();
//!
//! let from = Square::new(6, 4).unwrap();
//! let to = Square::new(4, 4).unwrap();
//! assert!(matches!(game.select_square(from), SquareOutcome::Selected(_)));
//! assert!(matches!(game.select_square(to), SquareOutcome::Moved(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod catalog;
mod contracts;
mod game;
mod invariants;
mod phases;
mod points;
mod registry;
mod rules;
mod settings;
mod state;
mod types;

pub use action::{MoveReport, Purchase, Rejection, SquareOutcome, UpgradeError, UpgradeResponse};
pub use board::Board;
pub use catalog::{Applicability, Upgrade, UpgradeSpec, catalog};
pub use contracts::{
    Affordable, BuyersTurn, Contract, GameNotOver, MoveContract, MoveIntent, PieceExists, Playing,
    PurchaseContract, TeleportContract, UpgradeApplies, assert_invariants,
};
pub use game::{Game, LayoutError};
pub use invariants::{
    GambitInvariants, Invariant, InvariantSet, InvariantViolation, KingLimitInvariant,
    TeleportConsistentInvariant, UniqueIdsInvariant, UniqueOccupancyInvariant,
};
pub use phases::{GameStatus, Phase};
pub use points::Points;
pub use registry::PieceSet;
pub use rules::{Candidate, generate_moves, winner_after};
pub use settings::RuleSet;
pub use state::GameState;
pub use types::{Abilities, Color, OffBoard, Piece, PieceId, PieceKind, Square};
