use std::fmt::Debug;

use serde::Serialize;

use crate::board::Board;
use crate::error::Rejection;
use crate::game::{GameSession, NextTurn};
use crate::movegen::capture_moves;
use crate::types::{Capture, Color, Mode, Piece, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfTestCase {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfTestReport {
    pub passed: usize,
    pub failed: usize,
    pub cases: Vec<SelfTestCase>,
}

impl SelfTestReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

type Check = fn() -> Result<(), String>;

const CHECKS: [(&str, Check); 6] = [
    ("initial placement", initial_placement),
    ("single capture", single_capture),
    ("multi-jump chain", multi_jump_chain),
    ("kinging unlocks backward capture", kinging),
    ("forced capture", forced_capture),
    ("simple mode never kings", simple_mode_never_kings),
];

/// Runs every scenario check against fresh boards and sessions.
pub fn run() -> SelfTestReport {
    let cases: Vec<SelfTestCase> = CHECKS
        .iter()
        .map(|&(name, check)| match check() {
            Ok(()) => SelfTestCase {
                name,
                passed: true,
                detail: "ok".to_string(),
            },
            Err(detail) => SelfTestCase {
                name,
                passed: false,
                detail,
            },
        })
        .collect();

    let passed = cases.iter().filter(|c| c.passed).count();
    SelfTestReport {
        passed,
        failed: cases.len() - passed,
        cases,
    }
}

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

fn board_with(pieces: &[(Position, Piece)]) -> Result<Board, String> {
    Board::with_pieces(pieces).map_err(|e| e.to_string())
}

fn check_eq<T: PartialEq + Debug>(what: &str, actual: T, expected: T) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{what}: expected {expected:?}, got {actual:?}"))
    }
}

fn initial_placement() -> Result<(), String> {
    let mut game = GameSession::with_mode(Mode::Advanced);
    game.reset();
    check_eq("red pieces", game.state().remaining(Color::Red), 12)?;
    check_eq("black pieces", game.state().remaining(Color::Black), 12)
}

fn single_capture() -> Result<(), String> {
    let board = board_with(&[
        (pos(3, 2), Piece::man(Color::Red)),
        (pos(2, 3), Piece::man(Color::Black)),
    ])?;
    let expected = Capture {
        landing: pos(1, 4),
        middle: pos(2, 3),
    };
    check_eq(
        "capture from (3, 2)",
        capture_moves(&board, pos(3, 2)).contains(&expected),
        true,
    )
}

fn multi_jump_chain() -> Result<(), String> {
    let mut board = board_with(&[
        (pos(5, 0), Piece::man(Color::Red)),
        (pos(4, 1), Piece::man(Color::Black)),
        (pos(2, 3), Piece::man(Color::Black)),
    ])?;

    let first = capture_moves(&board, pos(5, 0));
    let Some(jump) = first.first().copied() else {
        return Err("no capture from (5, 0)".to_string());
    };
    check_eq("first landing", jump.landing, pos(3, 2))?;

    board
        .apply_move(pos(5, 0), jump.landing, Mode::Advanced)
        .ok_or("capturing piece vanished")?;
    board.remove_piece(jump.middle);

    let landings: Vec<Position> = capture_moves(&board, jump.landing)
        .into_iter()
        .map(|c| c.landing)
        .collect();
    check_eq("second landing", landings, vec![pos(1, 4)])
}

fn kinging() -> Result<(), String> {
    let mut board = board_with(&[
        (pos(1, 0), Piece::man(Color::Red)),
        (pos(1, 2), Piece::man(Color::Black)),
    ])?;

    let before = capture_moves(&board, pos(1, 0));
    check_eq("captures before crowning", before.len(), 0)?;

    let relocation = board
        .apply_move(pos(1, 0), pos(0, 1), Mode::Advanced)
        .ok_or("red piece vanished")?;
    check_eq("promoted", relocation.promoted, true)?;

    let after: Vec<Position> = capture_moves(&board, pos(0, 1))
        .into_iter()
        .map(|c| c.landing)
        .collect();
    check_eq("backward capture landings", after, vec![pos(2, 3)])
}

fn forced_capture() -> Result<(), String> {
    let mut game = GameSession::with_mode(Mode::Advanced);
    // Opening moves that leave Red with a capture on (4, 3).
    for (row, col) in [(5, 2), (4, 3), (2, 5), (3, 4)] {
        game.click(row, col).map_err(|e| e.to_string())?;
    }
    game.click(5, 6).map_err(|e| e.to_string())?;

    check_eq(
        "step while capture is forced",
        game.attempt_move(4, 7),
        Err(Rejection::ForcedCapture {
            from: pos(5, 6),
            to: pos(4, 7),
        }),
    )?;

    game.click(4, 3).map_err(|e| e.to_string())?;
    let outcome = game.attempt_move(2, 5).map_err(|e| e.to_string())?;
    check_eq(
        "turn after capture",
        outcome.next,
        NextTurn::Passed { turn: Color::Black },
    )
}

fn simple_mode_never_kings() -> Result<(), String> {
    let mut board = board_with(&[(pos(1, 2), Piece::man(Color::Red))])?;
    let relocation = board
        .apply_move(pos(1, 2), pos(0, 3), Mode::Simple)
        .ok_or("red piece vanished")?;
    check_eq("crowned in simple mode", relocation.piece.king, false)
}
