use serde::Serialize;
use thiserror::Error;

use crate::types::{Color, Position};

/// Why a selection or move was refused. Rejections never change game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Rejection {
    #[error("({row}, {col}) is not on the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("there is no piece at {at}")]
    EmptyCell { at: Position },

    #[error("the piece at {at} belongs to {owner}, but it is {turn}'s turn")]
    OpponentPiece {
        at: Position,
        owner: Color,
        turn: Color,
    },

    #[error("the piece at {chain} must finish its capture sequence")]
    ChainLocked { at: Position, chain: Position },

    #[error("select a piece before choosing where to move it")]
    NoSelection,

    #[error("the piece at {from} cannot move to {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("a capture is available, so {from} may not step to {to}")]
    ForcedCapture { from: Position, to: Position },

    #[error("the game is over: {winner} has won")]
    GameOver { winner: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    InvalidInput,
    IllegalSelection,
    IllegalMove,
    ForcedCaptureViolation,
    GameFinished,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::OutOfBounds { .. } => RejectionKind::InvalidInput,
            Self::EmptyCell { .. } | Self::OpponentPiece { .. } | Self::ChainLocked { .. } => {
                RejectionKind::IllegalSelection
            }
            Self::NoSelection | Self::IllegalMove { .. } => RejectionKind::IllegalMove,
            Self::ForcedCapture { .. } => RejectionKind::ForcedCaptureViolation,
            Self::GameOver { .. } => RejectionKind::GameFinished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{at} is a light cell, pieces only live on dark cells")]
    LightCell { at: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("event log capacity must be at least 1")]
    ZeroEventCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let at = Position::new(5, 2);
        let to = Position::new(4, 3);

        assert_eq!(
            Rejection::OutOfBounds { row: 9, col: 0 }.kind(),
            RejectionKind::InvalidInput
        );
        assert_eq!(
            Rejection::ChainLocked { at, chain: to }.kind(),
            RejectionKind::IllegalSelection
        );
        assert_eq!(
            Rejection::IllegalMove { from: at, to }.kind(),
            RejectionKind::IllegalMove
        );
        assert_eq!(
            Rejection::ForcedCapture { from: at, to }.kind(),
            RejectionKind::ForcedCaptureViolation
        );
    }

    #[test]
    fn forced_capture_message_differs_from_illegal_move() {
        let from = Position::new(5, 2);
        let to = Position::new(4, 3);

        let forced = Rejection::ForcedCapture { from, to }.to_string();
        let illegal = Rejection::IllegalMove { from, to }.to_string();

        assert_ne!(forced, illegal);
        assert!(forced.contains("capture"));
        assert_eq!(illegal, "the piece at (5, 2) cannot move to (4, 3)");
    }
}
