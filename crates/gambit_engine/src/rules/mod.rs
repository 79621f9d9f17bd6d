//! Movement and victory rules.
//!
//! Pure functions over the piece registry, separated from the state
//! machine so they can be checked in isolation.

pub mod movement;
pub mod victory;

pub use movement::{BISHOP_DIRS, Candidate, KING_STEPS, KNIGHT_DELTAS, ROOK_DIRS, generate_moves};
pub use victory::winner_after;
