//! Timers: the virtual-time scheduler and the game clock.

pub mod clock;
pub mod scheduler;

pub use clock::GameClock;
pub use scheduler::{Scheduler, TimerHandle, TimerKind, TimerQueue};
