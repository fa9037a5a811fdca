//! One play-through: board, scoring and clock wired together.
//!
//! ## Driving a session
//!
//! The host forwards two kinds of input:
//! - `click_slide` when the player picks a slide
//! - `advance` with the wall-clock time that passed since the last call
//!
//! Everything else (memorize phase, hiding a peeked pair, the game clock)
//! happens on timers inside `advance`. Events are published to subscribers
//! at the end of each call.
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use concentration::{Category, Game, GameConfig, GameStatus, StaticImages};
//!
//! let source = Rc::new(StaticImages::numbered(6));
//! let mut game = Game::new(source, Category::Animals, GameConfig::new().with_seed(1)).unwrap();
//!
//! assert!(!game.slides().can_select());
//! game.advance(Duration::from_secs(5));
//! assert!(game.slides().can_select());
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{Category, GameConfig, GameRng, Result};
use crate::events::{EventBus, GameEvent, GameObserver, Outbox, SubscriptionId};
use crate::slides::{ImageSource, PictureId, SlideCollection, SlideView};
use crate::timing::{GameClock, Scheduler, TimerHandle, TimerKind, TimerQueue};

use super::info::{GameInfo, GameStatus};

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Nothing happened (selection disabled, slide face up, session over).
    Ignored,
    /// First slide of a pair was turned over.
    Selected,
    /// Second slide completed a match.
    Matched,
    /// Second slide did not match.
    Missed,
}

/// Everything a presentation layer needs to draw the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub category: Category,
    pub slides: Vec<SlideView>,
    pub score: i32,
    pub attempts_remaining: i32,
    pub status: GameStatus,
    pub elapsed_secs: u64,
    pub can_select: bool,
}

/// A game session.
pub struct Game<S: Scheduler = TimerQueue> {
    category: Category,
    config: GameConfig,
    source: Rc<dyn ImageSource>,
    rng: GameRng,
    scheduler: S,
    slides: SlideCollection,
    info: GameInfo,
    clock: GameClock,
    bus: EventBus,
    events: Outbox,
}

impl Game<TimerQueue> {
    /// Start a session on the built-in virtual-time scheduler.
    pub fn new(source: Rc<dyn ImageSource>, category: Category, config: GameConfig) -> Result<Self> {
        Self::with_scheduler(source, category, config, TimerQueue::new())
    }
}

impl<S: Scheduler> Game<S> {
    /// Start a session on a caller-supplied scheduler.
    ///
    /// Deals the board, begins the memorize phase and starts the clock.
    /// Fails if the category does not have enough images.
    pub fn with_scheduler(
        source: Rc<dyn ImageSource>,
        category: Category,
        config: GameConfig,
        mut scheduler: S,
    ) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let mut deal_rng = rng.fork();
        let mut slides = SlideCollection::create(source.as_ref(), category, &config, &mut deal_rng)?;

        let mut info = GameInfo::new(&config);
        info.clear();
        slides.memorize(&mut scheduler);
        let mut clock = GameClock::new(config.tick_interval);
        clock.start(&mut scheduler);

        info!(%category, seed = rng.seed(), "session started");
        Ok(Self {
            category,
            config,
            source,
            rng,
            scheduler,
            slides,
            info,
            clock,
            bus: EventBus::new(),
            events: vec![GameEvent::SessionStarted { category }],
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn slides(&self) -> &SlideCollection {
        &self.slides
    }

    #[must_use]
    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    #[must_use]
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.info.status()
    }

    /// Time until the next timer fires, if any is pending.
    ///
    /// Hosts with a real event loop can sleep this long before calling
    /// `advance`.
    #[must_use]
    pub fn time_to_next_timer(&self) -> Option<Duration> {
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.scheduler.now()))
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            category: self.category,
            slides: self.slides.views(),
            score: self.info.score(),
            attempts_remaining: self.info.attempts_remaining(),
            status: self.info.status(),
            elapsed_secs: self.clock.elapsed().as_secs(),
            can_select: self.slides.can_select(),
        }
    }

    // === Observers ===

    /// Subscribe to this session's events. Subscriptions survive `restart`.
    ///
    /// Events queued since the last publish are flushed right away, so the
    /// first subscriber of a new session receives its `SessionStarted`,
    /// `ScoreChanged` and `StatusChanged(Playing)` on subscribing. Later
    /// subscribers only see what happens after they subscribe.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) -> SubscriptionId {
        let id = self.bus.subscribe(observer);
        self.flush();
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // === Input ===

    /// The player clicked slide `id`.
    pub fn click_slide(&mut self, id: PictureId) -> ClickOutcome {
        if self.status().is_terminal() {
            return ClickOutcome::Ignored;
        }

        let mut outcome = ClickOutcome::Ignored;
        if self.slides.can_select() && self.slides.select_slide(id, &mut self.scheduler) {
            outcome = ClickOutcome::Selected;
        }

        if !self.slides.slides_active() {
            if self.slides.check_if_matched() {
                self.info.award();
                outcome = ClickOutcome::Matched;
            } else {
                self.info.penalize();
                outcome = ClickOutcome::Missed;
            }
            self.update_status();
        }

        self.flush();
        outcome
    }

    /// Let `elapsed` time pass, firing every timer that comes due.
    ///
    /// Virtual time saturates at `Duration::MAX`. Clock ticks missed over a
    /// long gap are counted in one step.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now().saturating_add(elapsed);
        while let Some((handle, kind)) = self.scheduler.pop_due(until) {
            self.on_timer(handle, kind, until);
        }
        self.scheduler.advance_to(until);
        self.flush();
    }

    /// Throw the board, score and clock away and deal a new session in the
    /// same category.
    ///
    /// On error the current session is left untouched.
    pub fn restart(&mut self) -> Result<()> {
        let mut deal_rng = self.rng.fork();
        let mut slides =
            SlideCollection::create(self.source.as_ref(), self.category, &self.config, &mut deal_rng)?;

        self.slides.cancel_timers(&mut self.scheduler);
        self.clock.stop(&mut self.scheduler);
        // Events from the old board are stale.
        self.slides.take_events();
        self.info.take_events();
        self.events.clear();

        let mut info = GameInfo::new(&self.config);
        info.clear();
        slides.memorize(&mut self.scheduler);
        let mut clock = GameClock::new(self.config.tick_interval);
        clock.start(&mut self.scheduler);

        self.slides = slides;
        self.info = info;
        self.clock = clock;
        self.events.push(GameEvent::SessionStarted { category: self.category });

        info!(category = %self.category, "session restarted");
        self.flush();
        Ok(())
    }

    // === Internals ===

    fn on_timer(&mut self, handle: TimerHandle, kind: TimerKind, until: Duration) {
        match kind {
            TimerKind::ClockTick => {
                if self.clock.is_running() {
                    let elapsed = self.clock.on_tick(&mut self.scheduler, until);
                    self.events.push(GameEvent::ClockTicked(elapsed));
                }
            }
            TimerKind::Memorize | TimerKind::Hide => {
                self.slides.on_timer(handle, kind);
            }
        }
    }

    /// Check for a loss (attempts below zero) or a win (board cleared).
    fn update_status(&mut self) {
        if self.status().is_terminal() {
            return;
        }
        if self.info.attempts_remaining() < 0 {
            self.info.set_status(false);
            self.slides.reveal_unmatched(&mut self.scheduler);
            self.clock.stop(&mut self.scheduler);
            info!(score = self.info.score(), "game lost");
        } else if self.slides.all_matched() {
            self.info.set_status(true);
            self.clock.stop(&mut self.scheduler);
            info!(
                score = self.info.score(),
                secs = self.clock.elapsed().as_secs(),
                "game won"
            );
        }
    }

    fn flush(&mut self) {
        let events = std::mem::take(&mut self.events)
            .into_iter()
            .chain(self.slides.take_events())
            .chain(self.info.take_events());
        self.bus.publish_all(events.collect::<Vec<_>>());
    }
}

impl<S: Scheduler> std::fmt::Debug for Game<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("category", &self.category)
            .field("status", &self.info.status())
            .field("score", &self.info.score())
            .field("attempts_remaining", &self.info.attempts_remaining())
            .field("elapsed", &self.clock.elapsed())
            .finish()
    }
}
