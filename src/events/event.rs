//! State-change events.
//!
//! Events tell a presentation layer *what* changed; the current values are
//! read back through `Game::snapshot` or the component accessors. Components
//! queue events while they mutate and the session publishes them once the
//! operation completes, so subscribers always observe a consistent state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Category;
use crate::game::GameStatus;
use crate::slides::PictureId;

/// Something observable happened in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new session was dealt.
    SessionStarted { category: Category },

    /// A slide's image, border or selectability changed.
    SlideChanged { id: PictureId },

    /// Selection was enabled or disabled.
    SelectionEnabled(bool),

    /// Two selected slides were compared.
    PairResolved {
        first: PictureId,
        second: PictureId,
        matched: bool,
    },

    /// Score or attempts changed.
    ScoreChanged { score: i32, attempts_remaining: i32 },

    /// The session was won or lost.
    StatusChanged(GameStatus),

    /// The game clock advanced.
    ClockTicked(Duration),
}

/// Pending events queued by a component.
pub type Outbox = Vec<GameEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde() {
        let events = vec![
            GameEvent::SessionStarted { category: Category::Animals },
            GameEvent::PairResolved {
                first: PictureId(0),
                second: PictureId(1),
                matched: true,
            },
            GameEvent::StatusChanged(GameStatus::Won),
            GameEvent::ClockTicked(Duration::from_secs(2)),
        ];

        let json = serde_json::to_string(&events).unwrap();
        let back: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, back);
    }
}
