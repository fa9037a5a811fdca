//! Game configuration.
//!
//! The rules of Concentration are fixed: twelve slides, four attempts,
//! +75 for a match, -15 for a miss. `GameConfig` carries those constants
//! so the rest of the engine never hardcodes them, plus the few knobs a
//! host legitimately needs (RNG seed, placeholder image).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of picture pairs on the board.
pub const PAIR_COUNT: usize = 6;

/// Number of slides on the board.
pub const SLIDE_COUNT: usize = PAIR_COUNT * 2;

/// Attempts granted at the start of a session.
pub const MAX_ATTEMPTS: i32 = 4;

/// Points awarded for a correct match.
pub const POINT_AWARD: i32 = 75;

/// Points deducted for a failed match.
pub const POINT_DEDUCTION: i32 = 15;

/// Image shown for a face-down slide.
pub const PLACEHOLDER_IMAGE: &str = "Assets/mystery_image.jpg";

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Pairs dealt per session.
    pub pair_count: usize,

    /// Attempts before the session is lost (loss happens when it drops below zero).
    pub max_attempts: i32,

    /// Score added on a match.
    pub point_award: i32,

    /// Score removed on a miss.
    pub point_deduction: i32,

    /// How long all slides stay face-up at session start.
    pub memorize_delay: Duration,

    /// How long a selected pair stays face-up.
    pub peek_delay: Duration,

    /// Game clock resolution.
    pub tick_interval: Duration,

    /// Randomized operations applied when shuffling.
    pub shuffle_rounds: usize,

    /// Image reference for face-down slides.
    pub placeholder: String,

    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: PAIR_COUNT,
            max_attempts: MAX_ATTEMPTS,
            point_award: POINT_AWARD,
            point_deduction: POINT_DEDUCTION,
            memorize_delay: Duration::from_secs(5),
            peek_delay: Duration::from_secs(3),
            tick_interval: Duration::from_secs(1),
            shuffle_rounds: 64,
            placeholder: PLACEHOLDER_IMAGE.to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed RNG seed so slide order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a different image for face-down slides.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Number of slides dealt per session.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.pair_count * 2
    }
}
