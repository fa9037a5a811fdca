//! Game sessions: scoring, orchestration and the start menu.

pub mod info;
pub mod menu;
pub mod session;

pub use info::{GameInfo, GameStatus};
pub use menu::StartMenu;
pub use session::{ClickOutcome, Game, SessionSnapshot};
