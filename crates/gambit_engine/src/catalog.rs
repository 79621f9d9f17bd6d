//! The static table of purchasable upgrades.

use super::types::{Piece, PieceKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identifier of a purchasable upgrade.
///
/// String ids use camelCase (`addKnightMove`, `promotePawn`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Upgrade {
    /// Adds knight jumps to the piece's own moves.
    AddKnightMove,
    /// Sliding rays ignore blockers.
    Jumper,
    /// One relocation to any empty square.
    TeleportOnce,
    /// Negates the next capture against the piece.
    Shield,
    /// Turns a pawn into a knight.
    PromotePawn,
}

/// Which pieces an upgrade may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Applicability {
    /// Any piece.
    Always,
    /// Pawns only.
    PawnsOnly,
}

impl Applicability {
    /// True when a piece of this kind may receive the upgrade.
    pub fn admits(self, kind: PieceKind) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::PawnsOnly => kind == PieceKind::Pawn,
        }
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeSpec {
    id: Upgrade,
    name: &'static str,
    cost: u32,
    description: &'static str,
    applicability: Applicability,
}

impl UpgradeSpec {
    /// Upgrade identifier.
    pub fn id(&self) -> Upgrade {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Price in points.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Targeting constraint.
    pub fn applicability(&self) -> Applicability {
        self.applicability
    }
}

const CATALOG: [UpgradeSpec; 5] = [
    UpgradeSpec {
        id: Upgrade::AddKnightMove,
        name: "Empower: +Knight Move",
        cost: 12,
        description: "Adds L-shaped jumps to this piece.",
        applicability: Applicability::Always,
    },
    UpgradeSpec {
        id: Upgrade::Jumper,
        name: "Jumper (Ignore Blockers)",
        cost: 15,
        description: "Sliding moves can jump over pieces.",
        applicability: Applicability::Always,
    },
    UpgradeSpec {
        id: Upgrade::TeleportOnce,
        name: "Teleport (once)",
        cost: 20,
        description: "Once per game, move to any empty square.",
        applicability: Applicability::Always,
    },
    UpgradeSpec {
        id: Upgrade::Shield,
        name: "Shield",
        cost: 10,
        description: "Negate the first capture against this piece.",
        applicability: Applicability::Always,
    },
    UpgradeSpec {
        id: Upgrade::PromotePawn,
        name: "Promote Pawn -> Knight",
        cost: 8,
        description: "Convert a pawn into a knight immediately.",
        applicability: Applicability::PawnsOnly,
    },
];

/// Every upgrade in shop order.
pub fn catalog() -> &'static [UpgradeSpec] {
    &CATALOG
}

impl Upgrade {
    /// Catalog row for this upgrade.
    pub fn spec(self) -> &'static UpgradeSpec {
        match self {
            Upgrade::AddKnightMove => &CATALOG[0],
            Upgrade::Jumper => &CATALOG[1],
            Upgrade::TeleportOnce => &CATALOG[2],
            Upgrade::Shield => &CATALOG[3],
            Upgrade::PromotePawn => &CATALOG[4],
        }
    }

    /// Price in points.
    pub fn cost(self) -> u32 {
        self.spec().cost
    }

    /// Writes the upgrade's effect onto the piece.
    ///
    /// Promotion changes only the kind; abilities already granted stay.
    #[instrument(skip(piece), fields(piece = %piece.id()))]
    pub(crate) fn grant(self, piece: &mut Piece) {
        match self {
            Upgrade::AddKnightMove => piece.abilities_mut().add_knight_move = true,
            Upgrade::Jumper => piece.abilities_mut().jumper = true,
            Upgrade::TeleportOnce => piece.abilities_mut().teleport_once = true,
            Upgrade::Shield => piece.abilities_mut().shield = true,
            Upgrade::PromotePawn => piece.set_kind(PieceKind::Knight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceId, Square};
    use strum::IntoEnumIterator;

    #[test]
    fn test_spec_lookup_matches_id() {
        for upgrade in Upgrade::iter() {
            assert_eq!(upgrade.spec().id(), upgrade);
        }
        assert_eq!(catalog().len(), 5);
    }

    #[test]
    fn test_string_ids() {
        assert_eq!(Upgrade::AddKnightMove.to_string(), "addKnightMove");
        assert_eq!("promotePawn".parse::<Upgrade>().unwrap(), Upgrade::PromotePawn);
        assert_eq!("teleportOnce".parse::<Upgrade>().unwrap(), Upgrade::TeleportOnce);
        assert!("fireball".parse::<Upgrade>().is_err());
    }

    #[test]
    fn test_only_promotion_is_restricted() {
        for spec in catalog() {
            let expected = if spec.id() == Upgrade::PromotePawn {
                Applicability::PawnsOnly
            } else {
                Applicability::Always
            };
            assert_eq!(spec.applicability(), expected);
        }
        assert!(!Applicability::PawnsOnly.admits(PieceKind::Rook));
    }

    #[test]
    fn test_promotion_keeps_abilities() {
        let mut pawn = Piece::new(
            PieceId::new(0),
            PieceKind::Pawn,
            Color::White,
            Square::new(6, 0).unwrap(),
        );
        Upgrade::Shield.grant(&mut pawn);
        Upgrade::PromotePawn.grant(&mut pawn);
        assert_eq!(pawn.kind(), PieceKind::Knight);
        assert!(pawn.abilities().shield);
    }
}
