use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::error::Rejection;
use crate::types::{Color, Mode, Position};

/// Something that happened in a session, for the activity log and status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    NewGame { mode: Mode },
    ModeChanged { mode: Mode },
    Selected { color: Color, at: Position },
    Stepped {
        color: Color,
        from: Position,
        to: Position,
    },
    Captured {
        color: Color,
        from: Position,
        to: Position,
        captured: Position,
    },
    Promoted { color: Color, at: Position },
    ChainContinues { color: Color, at: Position },
    TurnPassed { turn: Color },
    Rejected { reason: Rejection },
    GameOver { winner: Color },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewGame { mode } => {
                write!(f, "New game started in {mode} mode. Red moves first.")
            }
            Self::ModeChanged { mode } => write!(f, "Switched to {mode} mode."),
            Self::Selected { color, at } => write!(f, "{color} selected the piece at {at}."),
            Self::Stepped { color, from, to } => write!(f, "{color} moved {from} to {to}."),
            Self::Captured {
                color,
                from,
                to,
                captured,
            } => write!(f, "{color} jumped {from} to {to}, capturing the piece at {captured}."),
            Self::Promoted { color, at } => write!(f, "{color} piece at {at} was crowned king."),
            Self::ChainContinues { color, at } => {
                write!(f, "{color} must keep capturing with the piece at {at}.")
            }
            Self::TurnPassed { turn } => write!(f, "{turn} to move."),
            Self::Rejected { reason } => write!(f, "Not allowed: {reason}."),
            Self::GameOver { winner } => write!(f, "Game over. {winner} wins!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedEvent {
    pub seq: u32,
    pub message: String,
    pub event: GameEvent,
}

/// Bounded queue of events waiting to be picked up by the presentation layer.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
    next_seq: u32,
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LoggedEvent {
            seq: self.next_seq,
            message: event.to_string(),
            event,
        });
        self.next_seq = self.next_seq.wrapping_add(1);
    }

    /// Hands over every pending entry, oldest first.
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        self.entries.drain(..).collect()
    }

    pub fn last(&self) -> Option<&LoggedEvent> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_are_evicted_past_capacity() {
        let mut log = EventLog::with_capacity(2);

        log.push(GameEvent::TurnPassed { turn: Color::Black });
        log.push(GameEvent::TurnPassed { turn: Color::Red });
        log.push(GameEvent::GameOver { winner: Color::Red });

        let seqs: Vec<u32> = log.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(
            log.last().map(|e| e.event),
            Some(GameEvent::GameOver { winner: Color::Red })
        );
    }

    #[test]
    fn drain_empties_the_log_but_keeps_numbering() {
        let mut log = EventLog::with_capacity(8);
        log.push(GameEvent::NewGame { mode: Mode::Simple });

        let drained = log.drain();
        log.push(GameEvent::ModeChanged {
            mode: Mode::Advanced,
        });

        assert_eq!(drained.len(), 1);
        assert_eq!(
            drained[0].message,
            "New game started in simple mode. Red moves first."
        );
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(|e| e.seq), Some(1));
    }

    #[test]
    fn rejection_events_describe_the_reason() {
        let event = GameEvent::Rejected {
            reason: Rejection::NoSelection,
        };

        assert_eq!(
            event.to_string(),
            "Not allowed: select a piece before choosing where to move it."
        );
    }
}
