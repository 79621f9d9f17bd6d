//! Per-color point balances.

use super::types::Color;
use serde::{Deserialize, Serialize};

/// Point balance of both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    white: u32,
    black: u32,
}

impl Points {
    /// Both sides start with the same balance.
    pub fn new(starting: u32) -> Self {
        Self {
            white: starting,
            black: starting,
        }
    }

    /// Balance of one side.
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// True when `color` can pay `amount`.
    pub fn can_afford(&self, color: Color, amount: u32) -> bool {
        self.get(color) >= amount
    }

    fn slot(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub(crate) fn credit(&mut self, color: Color, amount: u32) {
        let slot = self.slot(color);
        *slot = slot.saturating_add(amount);
    }

    /// Withdraws `amount`, leaving the balance untouched when it is short.
    pub(crate) fn debit(&mut self, color: Color, amount: u32) -> Option<u32> {
        let slot = self.slot(color);
        *slot = slot.checked_sub(amount)?;
        Some(*slot)
    }
}
