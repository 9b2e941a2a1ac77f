use log::{debug, info};
use serde::Serialize;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Rejection;
use crate::events::{EventLog, GameEvent, LoggedEvent};
use crate::movegen::legal_steps;
use crate::rules::{capture_is_mandatory, chain_continues, compute_targets, detect_winner};
use crate::types::{Color, GameSnapshot, Mode, Move, Position, Score, Targets};

/// Everything the rules need to know about a game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub selected: Option<Position>,
    pub turn: Color,
    pub mode: Mode,
    /// Landing cell of the last capture while the same piece must keep jumping.
    pub chain_origin: Option<Position>,
    pub score: Score,
    pub winner: Option<Color>,
}

impl GameState {
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            selected: None,
            turn: Color::Red,
            mode,
            chain_origin: None,
            score: Score::default(),
            winner: None,
        }
    }

    pub fn remaining(&self, color: Color) -> u8 {
        self.board.count(color)
    }
}

/// What the turn looks like after an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextTurn {
    Passed { turn: Color },
    ContinueChain { at: Position },
    Won { winner: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub mv: Move,
    pub promoted: bool,
    pub next: NextTurn,
}

/// Result of a dispatched click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Selected { at: Position, targets: Targets },
    Moved { outcome: MoveOutcome },
}

/// One game session: owns the state and serializes every transition on it.
pub struct GameSession {
    state: GameState,
    config: GameConfig,
    events: EventLog,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let mut events = EventLog::with_capacity(config.event_log_capacity);
        events.push(GameEvent::NewGame { mode: config.mode });
        info!("new checkers session in {} mode", config.mode);
        Self {
            state: GameState::new(config.mode),
            config,
            events,
        }
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self::new(GameConfig::with_mode(mode))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Replaces the whole game with a fresh one, keeping the current mode.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.state.mode);
        self.events.push(GameEvent::NewGame {
            mode: self.state.mode,
        });
        info!("game reset in {} mode", self.state.mode);
    }

    /// Switches rulesets. An unfinished capture chain is abandoned and the turn passes.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.state.mode {
            return;
        }
        self.state.mode = mode;
        self.state.selected = None;
        self.events.push(GameEvent::ModeChanged { mode });
        info!("switched to {mode} mode");

        if self.state.chain_origin.take().is_some() && self.state.winner.is_none() {
            self.pass_turn();
        }
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.state.mode.toggled());
        self.state.mode
    }

    /// Targets for any cell, for move hinting.
    pub fn targets(&self, pos: Position) -> Targets {
        compute_targets(&self.state, pos)
    }

    pub fn select(&mut self, row: i32, col: i32) -> Result<Targets, Rejection> {
        let result = self.try_select(row, col);
        self.record(result)
    }

    pub fn attempt_move(&mut self, row: i32, col: i32) -> Result<MoveOutcome, Rejection> {
        let result = self.try_move(row, col);
        self.record(result)
    }

    /// Routes a board click: own pieces are (re)selected, anything else is a
    /// move target for the current selection.
    pub fn click(&mut self, row: i32, col: i32) -> Result<Action, Rejection> {
        let own_piece = Position::checked(row, col)
            .and_then(|at| self.state.board.piece_at(at))
            .is_some_and(|piece| piece.color == self.state.turn);

        if own_piece || self.state.selected.is_none() {
            let targets = self.select(row, col)?;
            Ok(Action::Selected {
                at: Position::new(row as u8, col as u8),
                targets,
            })
        } else {
            let outcome = self.attempt_move(row, col)?;
            Ok(Action::Moved { outcome })
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        GameSnapshot {
            board: state.board.to_array().to_vec(),
            turn: state.turn,
            mode: state.mode,
            selected: state.selected,
            chain_origin: state.chain_origin,
            score: state.score,
            red_count: state.remaining(Color::Red),
            black_count: state.remaining(Color::Black),
            winner: state.winner,
            is_game_over: state.winner.is_some(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.events.drain()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn try_select(&mut self, row: i32, col: i32) -> Result<Targets, Rejection> {
        self.ensure_running()?;
        let at = Position::checked(row, col).ok_or(Rejection::OutOfBounds { row, col })?;
        let piece = self
            .state
            .board
            .piece_at(at)
            .ok_or(Rejection::EmptyCell { at })?;

        if piece.color != self.state.turn {
            return Err(Rejection::OpponentPiece {
                at,
                owner: piece.color,
                turn: self.state.turn,
            });
        }
        if let Some(chain) = self.state.chain_origin {
            if chain != at {
                return Err(Rejection::ChainLocked { at, chain });
            }
        }

        self.state.selected = Some(at);
        self.events.push(GameEvent::Selected {
            color: piece.color,
            at,
        });
        debug!("{} selected {at}", piece.color);
        Ok(compute_targets(&self.state, at))
    }

    fn try_move(&mut self, row: i32, col: i32) -> Result<MoveOutcome, Rejection> {
        self.ensure_running()?;
        let to = Position::checked(row, col).ok_or(Rejection::OutOfBounds { row, col })?;
        let from = self.state.selected.ok_or(Rejection::NoSelection)?;
        let targets = compute_targets(&self.state, from);

        if let Some(capture) = targets.capture_to(to) {
            return Ok(self.apply(Move::Capture {
                from,
                to,
                captured: capture.middle,
            }));
        }
        if targets.steps.contains(&to) {
            return Ok(self.apply(Move::Step { from, to }));
        }

        if capture_is_mandatory(&self.state) && legal_steps(&self.state.board, from).contains(&to)
        {
            Err(Rejection::ForcedCapture { from, to })
        } else {
            Err(Rejection::IllegalMove { from, to })
        }
    }

    /// Executes a move already validated against `compute_targets`.
    fn apply(&mut self, mv: Move) -> MoveOutcome {
        let color = self.state.turn;
        let (from, to) = (mv.from(), mv.to());

        let promoted = self
            .state
            .board
            .apply_move(from, to, self.state.mode)
            .is_some_and(|relocation| relocation.promoted);

        match mv {
            Move::Step { .. } => {
                self.events.push(GameEvent::Stepped { color, from, to });
                debug!("{color} stepped {from} -> {to}");
            }
            Move::Capture { captured, .. } => {
                self.state.board.remove_piece(captured);
                self.state.score.credit(color);
                self.events.push(GameEvent::Captured {
                    color,
                    from,
                    to,
                    captured,
                });
                debug!("{color} captured {captured} jumping {from} -> {to}");
            }
        }
        if promoted {
            self.events.push(GameEvent::Promoted { color, at: to });
            debug!("{color} crowned at {to}");
        }

        let next = if let Some(winner) = detect_winner(&self.state.board) {
            if self.state.winner.replace(winner).is_none() {
                self.events.push(GameEvent::GameOver { winner });
                info!("{winner} wins");
            }
            if self.config.lock_after_win {
                self.state.selected = None;
                self.state.chain_origin = None;
            } else {
                self.pass_turn();
            }
            NextTurn::Won { winner }
        } else if mv.is_capture() && chain_continues(&self.state.board, to, self.state.mode) {
            self.state.chain_origin = Some(to);
            self.state.selected = Some(to);
            self.events.push(GameEvent::ChainContinues { color, at: to });
            NextTurn::ContinueChain { at: to }
        } else {
            self.pass_turn();
            NextTurn::Passed {
                turn: self.state.turn,
            }
        };

        MoveOutcome { mv, promoted, next }
    }

    fn pass_turn(&mut self) {
        self.state.turn = self.state.turn.opponent();
        self.state.selected = None;
        self.state.chain_origin = None;
        self.events.push(GameEvent::TurnPassed {
            turn: self.state.turn,
        });
    }

    fn ensure_running(&self) -> Result<(), Rejection> {
        match self.state.winner {
            Some(winner) if self.config.lock_after_win => Err(Rejection::GameOver { winner }),
            _ => Ok(()),
        }
    }

    fn record<T>(&mut self, result: Result<T, Rejection>) -> Result<T, Rejection> {
        if let Err(reason) = &result {
            debug!("rejected: {reason}");
            self.events.push(GameEvent::Rejected { reason: *reason });
        }
        result
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, turn: Color) {
        self.state.board = board;
        self.state.turn = turn;
        self.state.selected = None;
        self.state.chain_origin = None;
        self.state.winner = None;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
