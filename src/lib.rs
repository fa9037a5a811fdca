//! # concentration
//!
//! A headless engine for the memory-matching card game Concentration.
//!
//! Twelve picture slides (six pairs) are dealt face up for a short memorize
//! phase, then turned face down. The player turns two slides at a time:
//! a pair scores +75, a miss costs 15 points and one attempt. Clearing the
//! board wins; running out of attempts loses and reveals the rest.
//!
//! ## Design Principles
//!
//! 1. **No UI assumptions**: presentation layers subscribe to `GameEvent`s
//!    and read `SessionSnapshot`s; they never reach into engine state.
//!
//! 2. **Virtual time**: every delay (memorize, peek, game clock) is a timer
//!    on a `Scheduler` the host advances from its own loop.
//!
//! 3. **Single owner**: `StartMenu` holds the one live `Game`; restarting
//!    replaces its board, score and clock wholesale.
//!
//! ## Modules
//!
//! - `core`: Configuration, categories, errors, RNG
//! - `slides`: Pictures, slides, the board and image sources
//! - `timing`: Scheduler and game clock
//! - `events`: Events and the observer registry
//! - `game`: Scoring, sessions and the start menu

pub mod core;
pub mod events;
pub mod game;
pub mod slides;
pub mod timing;

// Re-export commonly used types
pub use crate::core::{Category, Error, GameConfig, GameRng, GameRngState, Result};

pub use crate::slides::{
    AssetDirectory, BorderState, ImageSource, Picture, PictureId, Slide, SlideCollection,
    SlideView, StaticImages,
};

pub use crate::timing::{GameClock, Scheduler, TimerHandle, TimerKind, TimerQueue};

pub use crate::events::{EventBus, EventLog, GameEvent, GameObserver, SubscriptionId};

pub use crate::game::{ClickOutcome, Game, GameInfo, GameStatus, SessionSnapshot, StartMenu};
