use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::within;

pub const BOARD_SIZE: usize = 8;

/// Side owning a piece. Red starts at the bottom (rows 5..=7) and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Row delta of a non-king move.
    pub fn forward(self) -> i32 {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    /// Row on which a man of this color is crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Black => (BOARD_SIZE - 1) as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("Red"),
            Self::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self { color, king: false }
    }

    pub const fn king(color: Color) -> Self {
        Self { color, king: true }
    }

    /// Returns the promoted value. Crowning a king yields the same king.
    pub fn crowned(self) -> Self {
        Self { king: true, ..self }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Converts untrusted coordinates, returning `None` when off the board.
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        within(row, col).then(|| Self::new(row as u8, col as u8))
    }

    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        Self::checked(self.row as i32 + dr, self.col as i32 + dc)
    }

    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Ruleset in force.
///
/// - `Simple`: single steps, optional captures, no chains, no kinging.
/// - `Advanced`: forced captures, multi-jump chains, kinging on the far row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Simple,
    Advanced,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Simple => Self::Advanced,
            Self::Advanced => Self::Simple,
        }
    }

    pub fn from_advanced(advanced: bool) -> Self {
        if advanced { Self::Advanced } else { Self::Simple }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("simple"),
            Self::Advanced => f.write_str("advanced"),
        }
    }
}

/// A jump available to a piece: it lands on `landing`, removing the piece on `middle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub landing: Position,
    pub middle: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Move {
    Step {
        from: Position,
        to: Position,
    },
    Capture {
        from: Position,
        to: Position,
        captured: Position,
    },
}

impl Move {
    pub fn from(&self) -> Position {
        match *self {
            Self::Step { from, .. } | Self::Capture { from, .. } => from,
        }
    }

    pub fn to(&self) -> Position {
        match *self {
            Self::Step { to, .. } | Self::Capture { to, .. } => to,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Capture { .. })
    }
}

/// Moves offered for one selected cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Targets {
    pub steps: Vec<Position>,
    pub captures: Vec<Capture>,
}

impl Targets {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.captures.is_empty()
    }

    pub fn capture_to(&self, landing: Position) -> Option<Capture> {
        self.captures.iter().copied().find(|c| c.landing == landing)
    }
}

/// Captured enemy pieces per color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub red: u32,
    pub black: u32,
}

impl Score {
    pub fn credit(&mut self, color: Color) {
        match color {
            Color::Red => self.red += 1,
            Color::Black => self.black += 1,
        }
    }

    pub fn of(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.red,
            Color::Black => self.black,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Row-major cell codes: 0=empty, 1=red, 2=black, 3=red king, 4=black king.
    pub board: Vec<u8>,
    pub turn: Color,
    pub mode: Mode,
    pub selected: Option<Position>,
    /// Contract: `Some` only while a multi-jump is in progress.
    pub chain_origin: Option<Position>,
    pub score: Score,
    pub red_count: u8,
    pub black_count: u8,
    pub winner: Option<Color>,
    pub is_game_over: bool,
}
