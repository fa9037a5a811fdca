//! Start menu: picks a category and owns the live session.
//!
//! There is exactly one live `Game` at a time. Starting a new game or
//! restarting replaces it wholesale; nothing keeps a handle to the old one.

use std::rc::Rc;

use tracing::{info, warn};

use crate::core::{Category, Error, GameConfig, GameRng, Result};
use crate::slides::ImageSource;

use super::session::Game;

/// Entry point of the application.
pub struct StartMenu {
    source: Rc<dyn ImageSource>,
    config: GameConfig,
    rng: Option<GameRng>,
    game: Option<Game>,
}

impl StartMenu {
    /// Create a menu drawing images from `source`.
    ///
    /// With a seeded config, every game started from this menu gets its own
    /// seed derived from it, so a whole run is reproducible.
    pub fn new(source: impl ImageSource + 'static, config: GameConfig) -> Self {
        let rng = config.seed.map(GameRng::new);
        Self {
            source: Rc::new(source),
            config,
            rng,
            game: None,
        }
    }

    /// Categories offered, in menu order.
    #[must_use]
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Start a game in the category at `index` of the menu.
    pub fn start_new_game(&mut self, index: usize) -> Result<&mut Game> {
        let Some(category) = Category::from_index(index) else {
            warn!(index, "unknown category index");
            return Err(Error::UnknownCategory(index));
        };
        self.start(category)
    }

    /// Start a game in `category`, replacing any live session.
    ///
    /// If setup fails the previous session stays live.
    pub fn start(&mut self, category: Category) -> Result<&mut Game> {
        let config = match self.rng.as_mut() {
            Some(rng) => self.config.clone().with_seed(rng.fork().seed()),
            None => self.config.clone(),
        };
        let game = Game::new(Rc::clone(&self.source), category, config)?;
        info!(%category, "new game from menu");
        Ok(self.game.insert(game))
    }

    /// Restart the live session in the same category.
    pub fn restart(&mut self) -> Result<&mut Game> {
        let game = self.game.as_mut().ok_or(Error::NoActiveSession)?;
        game.restart()?;
        Ok(game)
    }

    /// The live session, if any.
    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    /// Drop the live session and return it.
    pub fn end_session(&mut self) -> Option<Game> {
        self.game.take()
    }
}

impl std::fmt::Debug for StartMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartMenu")
            .field("config", &self.config)
            .field("game", &self.game)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slides::StaticImages;

    fn menu() -> StartMenu {
        StartMenu::new(StaticImages::numbered(6), GameConfig::new().with_seed(5))
    }

    #[test]
    fn test_start_by_index() {
        let mut m = menu();
        let game = m.start_new_game(1).unwrap();
        assert_eq!(game.category(), Category::Cars);
        assert!(m.game().is_some());
    }

    #[test]
    fn test_unknown_index() {
        let mut m = menu();
        assert!(matches!(m.start_new_game(3), Err(Error::UnknownCategory(3))));
        assert!(m.game().is_none());
    }

    #[test]
    fn test_restart_without_game() {
        let mut m = menu();
        assert!(matches!(m.restart(), Err(Error::NoActiveSession)));
    }

    #[test]
    fn test_failed_start_keeps_previous_session() {
        let source = StaticImages::new().with(Category::Animals, (0..6).map(|i| format!("a{i}")));
        let mut m = StartMenu::new(source, GameConfig::new());
        m.start(Category::Animals).unwrap();

        assert!(matches!(
            m.start(Category::Foods),
            Err(Error::ResourceNotFound { category: Category::Foods, found: 0, .. })
        ));
        assert_eq!(m.game().map(Game::category), Some(Category::Animals));
    }

    #[test]
    fn test_end_session() {
        let mut m = menu();
        m.start(Category::Foods).unwrap();
        assert!(m.end_session().is_some());
        assert!(m.game().is_none());
    }
}
