use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::{Rejection, RejectionKind};
use crate::game::{Action, GameSession};
use crate::selftest;
use crate::types::{Mode, Position};

/// Outcome of a user action as seen by the page.
///
/// Contract:
/// - accepted: `action` is set, `rejection` is `None`.
/// - rejected: `action` is `None`, `rejection` and `kind` say why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    pub accepted: bool,
    pub action: Option<Action>,
    pub rejection: Option<Rejection>,
    pub kind: Option<RejectionKind>,
    pub message: String,
}

impl ActionReport {
    pub fn from_result(result: Result<Action, Rejection>) -> Self {
        match result {
            Ok(action) => Self {
                accepted: true,
                message: describe(&action),
                action: Some(action),
                rejection: None,
                kind: None,
            },
            Err(rejection) => Self {
                accepted: false,
                action: None,
                message: rejection.to_string(),
                kind: Some(rejection.kind()),
                rejection: Some(rejection),
            },
        }
    }
}

fn describe(action: &Action) -> String {
    match action {
        Action::Selected { at, targets } if targets.is_empty() => {
            format!("The piece at {at} has no legal moves; choose another piece.")
        }
        Action::Selected { at, .. } => format!("Selected the piece at {at}."),
        Action::Moved { outcome } => format!("Moved {} to {}.", outcome.mv.from(), outcome.mv.to()),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

/// JS-facing wrapper around a [`GameSession`].
#[wasm_bindgen]
pub struct CheckersGame {
    session: GameSession,
}

#[wasm_bindgen]
impl CheckersGame {
    #[wasm_bindgen(constructor)]
    pub fn new(advanced: bool) -> CheckersGame {
        Self {
            session: GameSession::with_mode(Mode::from_advanced(advanced)),
        }
    }

    /// Builds a game from a `{ mode, eventLogCapacity, lockAfterWin }` object.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue) -> Result<CheckersGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config
            .validate()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self {
            session: GameSession::new(config),
        })
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Flips simple/advanced and returns `true` when advanced is now active.
    #[wasm_bindgen(js_name = toggleMode)]
    pub fn toggle_mode(&mut self) -> bool {
        self.session.toggle_mode() == Mode::Advanced
    }

    #[wasm_bindgen(js_name = setAdvanced)]
    pub fn set_advanced(&mut self, advanced: bool) {
        self.session.set_mode(Mode::from_advanced(advanced));
    }

    pub fn click(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        to_js(&ActionReport::from_result(self.session.click(row, col)))
    }

    pub fn select(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let result = self
            .session
            .select(row, col)
            .map(|targets| Action::Selected {
                at: Position::new(row as u8, col as u8),
                targets,
            });
        to_js(&ActionReport::from_result(result))
    }

    #[wasm_bindgen(js_name = moveTo)]
    pub fn move_to(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let result = self
            .session
            .attempt_move(row, col)
            .map(|outcome| Action::Moved { outcome });
        to_js(&ActionReport::from_result(result))
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.snapshot())
    }

    /// Move hints for a cell; off-board coordinates yield no targets.
    pub fn targets(&self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let targets = Position::checked(row, col)
            .map(|at| self.session.targets(at))
            .unwrap_or_default();
        to_js(&targets)
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.drain_events())
    }
}

#[wasm_bindgen(js_name = runSelfTest)]
pub fn run_self_test() -> Result<JsValue, JsValue> {
    to_js(&selftest::run())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_action_reports_kind_and_message() {
        let mut session = GameSession::default();

        let report = ActionReport::from_result(session.click(2, 1));

        assert!(!report.accepted);
        assert_eq!(report.action, None);
        assert_eq!(report.kind, Some(RejectionKind::IllegalSelection));
        assert_eq!(
            report.message,
            "the piece at (2, 1) belongs to Black, but it is Red's turn"
        );
    }

    #[test]
    fn dead_end_selection_is_called_out() {
        let mut session = GameSession::default();

        let report = ActionReport::from_result(session.click(6, 1));

        assert!(report.accepted);
        assert_eq!(
            report.message,
            "The piece at (6, 1) has no legal moves; choose another piece."
        );
    }

    #[test]
    fn accepted_move_reports_action() {
        let mut session = GameSession::default();
        session.click(5, 2).unwrap();

        let report = ActionReport::from_result(session.click(4, 1));

        assert!(report.accepted);
        assert_eq!(report.rejection, None);
        assert_eq!(report.message, "Moved (5, 2) to (4, 1).");
    }
}
