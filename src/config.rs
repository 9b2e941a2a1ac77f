use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Mode;

const DEFAULT_EVENT_LOG_CAPACITY: usize = 200;

/// Session settings, deserializable from a plain JS object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub mode: Mode,
    /// Oldest events are dropped once this many are pending.
    pub event_log_capacity: usize,
    /// Refuse every select/move once a winner is known, until the next reset.
    pub lock_after_win: bool,
}

impl GameConfig {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_log_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Simple,
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
            lock_after_win: true,
        }
    }
}
