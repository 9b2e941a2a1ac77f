use crate::board::Board;
use crate::game::GameState;
use crate::movegen::{any_capture_available, capture_moves, legal_steps};
use crate::types::{Color, Mode, Position, Targets};

/// Moves the rules allow for the piece on `pos` in the current state.
///
/// Simple mode offers steps and optional captures. Advanced mode hides
/// steps whenever the side to move has a capture anywhere (or is mid-chain),
/// and during a chain only the chain piece gets targets.
pub fn compute_targets(state: &GameState, pos: Position) -> Targets {
    let board = &state.board;
    match state.mode {
        Mode::Simple => Targets {
            steps: legal_steps(board, pos),
            captures: capture_moves(board, pos),
        },
        Mode::Advanced => match state.chain_origin {
            Some(origin) if origin != pos => Targets::default(),
            Some(_) => Targets {
                steps: Vec::new(),
                captures: capture_moves(board, pos),
            },
            None if any_capture_available(board, state.turn) => Targets {
                steps: Vec::new(),
                captures: capture_moves(board, pos),
            },
            None => Targets {
                steps: legal_steps(board, pos),
                captures: capture_moves(board, pos),
            },
        },
    }
}

/// True when the side to move may not make a plain step.
pub fn capture_is_mandatory(state: &GameState) -> bool {
    state.mode == Mode::Advanced
        && (state.chain_origin.is_some() || any_capture_available(&state.board, state.turn))
}

/// Whether the piece that just landed on `landing` must keep jumping.
pub fn chain_continues(board: &Board, landing: Position, mode: Mode) -> bool {
    mode == Mode::Advanced && !capture_moves(board, landing).is_empty()
}

/// The side whose opponent has no pieces left, if any.
pub fn detect_winner(board: &Board) -> Option<Color> {
    [Color::Red, Color::Black]
        .into_iter()
        .find(|&color| board.count(color.opponent()) == 0)
}
