//! Core engine types: configuration, categories, errors, RNG.

pub mod category;
pub mod config;
pub mod error;
pub mod rng;

pub use category::Category;
pub use config::{GameConfig, MAX_ATTEMPTS, PAIR_COUNT, PLACEHOLDER_IMAGE, POINT_AWARD, POINT_DEDUCTION, SLIDE_COUNT};
pub use error::{Error, Result};
pub use rng::{GameRng, GameRngState};
