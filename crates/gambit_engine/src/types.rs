//! Core domain types: colors, piece kinds, squares and pieces.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side of the board.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Color {
    /// White moves first and starts on rows 6 and 7.
    White,
    /// Black starts on rows 0 and 1.
    Black,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row on which this color's pawns start.
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row holding this color's back rank.
    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

/// Movement type of a piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King. Losing it loses the game.
    King,
}

impl PieceKind {
    /// Points awarded for capturing a piece of this kind.
    pub fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Single-letter symbol, uppercase.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Error for coordinates that fall outside the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Square ({row}, {col}) is off the board")]
pub struct OffBoard {
    /// Requested row.
    pub row: i32,
    /// Requested column.
    pub col: i32,
}

impl std::error::Error for OffBoard {}

/// A square on the 8x8 board, always in bounds.
///
/// Row 0 is black's back rank, row 7 is white's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
#[display("({row}, {col})")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Board edge length.
    pub const SIZE: u8 = 8;

    /// Creates a square, or `None` when out of bounds.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < Self::SIZE && col < Self::SIZE).then_some(Self { row, col })
    }

    /// Creates a square from signed coordinates.
    pub fn checked(row: i32, col: i32) -> Result<Self, OffBoard> {
        let size = i32::from(Self::SIZE);
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(OffBoard { row, col })
        }
    }

    /// Row index, 0..8.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column index, 0..8.
    pub fn col(self) -> u8 {
        self.col
    }

    /// Square displaced by the given delta, if it stays on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::checked(i32::from(self.row) + i32::from(dr), i32::from(self.col) + i32::from(dc)).ok()
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::SIZE).flat_map(|row| (0..Self::SIZE).map(move |col| Square { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = OffBoard;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Self::checked(i32::from(row), i32::from(col))
    }
}

impl From<Square> for (u8, u8) {
    fn from(square: Square) -> Self {
        (square.row, square.col)
    }
}

/// Stable identity of a piece for its whole lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
#[display("#{_0}")]
pub struct PieceId(u16);

impl PieceId {
    /// Wraps a raw id.
    pub fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl FromStr for PieceId {
    type Err = std::num::ParseIntError;

    /// Accepts both `12` and `#12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// Purchased modifiers carried by a single piece.
///
/// Every flag is independent of the others and of the piece kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Abilities {
    /// Knight jumps are added to the piece's own moves.
    pub add_knight_move: bool,
    /// Sliding rays pass through occupied squares.
    pub jumper: bool,
    /// A one-time teleport has been granted.
    pub teleport_once: bool,
    /// The teleport grant has been spent.
    pub teleport_used: bool,
    /// The next capture attempt against this piece is negated.
    pub shield: bool,
}

impl Abilities {
    /// True when a granted teleport is still unused.
    pub fn teleport_ready(&self) -> bool {
        self.teleport_once && !self.teleport_used
    }

    /// Short badges for the active abilities, in a fixed order.
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.add_knight_move {
            badges.push("K+");
        }
        if self.jumper {
            badges.push("J");
        }
        if self.teleport_ready() {
            badges.push("TP");
        }
        if self.shield {
            badges.push("S");
        }
        badges
    }
}

/// A live piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    square: Square,
    #[new(default)]
    #[serde(default)]
    has_moved: bool,
    #[new(default)]
    #[serde(default)]
    abilities: Abilities,
}

impl Piece {
    /// Returns the piece with the given abilities.
    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }

    /// Stable identity.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Movement type.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Owning side.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Current location.
    pub fn square(&self) -> Square {
        self.square
    }

    /// Whether the piece has moved or teleported.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Purchased abilities.
    pub fn abilities(&self) -> &Abilities {
        &self.abilities
    }

    /// Board symbol: uppercase for white, lowercase for black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub(crate) fn relocate(&mut self, to: Square) {
        self.square = to;
        self.has_moved = true;
    }

    pub(crate) fn abilities_mut(&mut self) -> &mut Abilities {
        &mut self.abilities
    }

    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} at {}", self.id, self.color, self.kind, self.square)
    }
}
