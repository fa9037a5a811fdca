//! Score, attempts and win/loss flags.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::GameConfig;
use crate::events::{GameEvent, Outbox};

/// Where a session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Won or lost.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}

/// Scoring state of one session.
///
/// Score has no floor and no ceiling. `attempts_remaining` may go below
/// zero; the session treats that as the loss condition.
#[derive(Clone, Debug)]
pub struct GameInfo {
    score: i32,
    attempts_remaining: i32,
    won: bool,
    lost: bool,
    max_attempts: i32,
    point_award: i32,
    point_deduction: i32,
    events: Outbox,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameInfo {
    /// Fresh scoring state: score 0, full attempts.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            attempts_remaining: config.max_attempts,
            won: false,
            lost: false,
            max_attempts: config.max_attempts,
            point_award: config.point_award,
            point_deduction: config.point_deduction,
            events: Outbox::new(),
        }
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> i32 {
        self.attempts_remaining
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Won takes precedence if both flags were ever set.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.won {
            GameStatus::Won
        } else if self.lost {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    /// Correct match.
    pub fn award(&mut self) {
        self.score += self.point_award;
        self.score_changed();
    }

    /// Failed match: lose points and one attempt.
    pub fn penalize(&mut self) {
        self.score -= self.point_deduction;
        self.attempts_remaining -= 1;
        self.score_changed();
    }

    /// Back to the start-of-session values.
    pub fn clear(&mut self) {
        self.score = 0;
        self.attempts_remaining = self.max_attempts;
        self.won = false;
        self.lost = false;
        self.score_changed();
        self.events.push(GameEvent::StatusChanged(GameStatus::Playing));
    }

    /// Record a terminal result. Flags only ever go from false to true.
    pub fn set_status(&mut self, won: bool) {
        if won {
            self.won = true;
        } else {
            self.lost = true;
        }
        debug!(won, score = self.score, "game status set");
        self.events.push(GameEvent::StatusChanged(self.status()));
    }

    /// Take queued events.
    pub fn take_events(&mut self) -> Outbox {
        std::mem::take(&mut self.events)
    }

    fn score_changed(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            score: self.score,
            attempts_remaining: self.attempts_remaining,
        });
    }
}
