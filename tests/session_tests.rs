//! Session integration tests.
//!
//! These play whole sessions through the public API: clicks and elapsed
//! time in, status, score and events out.

use std::rc::Rc;
use std::time::Duration;

use concentration::events::{EventLog, GameEvent};
use concentration::timing::{Scheduler, TimerHandle, TimerKind, TimerQueue};
use concentration::{
    BorderState, Category, ClickOutcome, Game, GameConfig, GameStatus, PictureId, StartMenu,
    StaticImages,
};
use proptest::prelude::*;

const MEMORIZE: Duration = Duration::from_secs(5);
const PEEK: Duration = Duration::from_secs(3);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A session past its memorize phase.
fn started(seed: u64) -> Game {
    init_tracing();
    let source = Rc::new(StaticImages::numbered(6));
    let mut game = Game::new(source, Category::Animals, GameConfig::new().with_seed(seed)).unwrap();
    game.advance(MEMORIZE);
    game
}

fn pair(game: &mut Game, a: u32, b: u32) -> ClickOutcome {
    assert_eq!(game.click_slide(PictureId(a)), ClickOutcome::Selected);
    let outcome = game.click_slide(PictureId(b));
    game.advance(PEEK);
    outcome
}

// =============================================================================
// Winning
// =============================================================================

#[test]
fn test_win_by_matching_every_pair() {
    let mut game = started(1);
    let log = EventLog::new();
    game.subscribe(log.clone());

    for k in 0..6 {
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.click_slide(PictureId(k * 2)), ClickOutcome::Selected);
        assert_eq!(game.click_slide(PictureId(k * 2 + 1)), ClickOutcome::Matched);
        if k < 5 {
            game.advance(PEEK);
        }
    }

    assert_eq!(game.status(), GameStatus::Won);
    assert!(game.info().is_won());
    assert!(!game.info().is_lost());
    assert_eq!(game.info().score(), 6 * 75);
    assert!(game.slides().all_matched());
    assert!(!game.clock().is_running());

    // 5 s memorize + five 3 s peeks.
    assert_eq!(game.clock().elapsed(), Duration::from_secs(20));
    game.advance(Duration::from_secs(30));
    assert_eq!(game.clock().elapsed(), Duration::from_secs(20));

    assert_eq!(log.count(|e| *e == GameEvent::StatusChanged(GameStatus::Won)), 1);
    assert_eq!(log.count(|e| matches!(e, GameEvent::PairResolved { matched: true, .. })), 6);
}

#[test]
fn test_win_after_some_misses() {
    let mut game = started(2);
    for _ in 0..3 {
        assert_eq!(pair(&mut game, 0, 2), ClickOutcome::Missed);
    }
    for k in 0..6 {
        assert_eq!(pair(&mut game, k * 2, k * 2 + 1), ClickOutcome::Matched);
    }
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.info().score(), 6 * 75 - 3 * 15);
    assert_eq!(game.info().attempts_remaining(), 1);
}

// =============================================================================
// Losing
// =============================================================================

#[test]
fn test_four_misses_do_not_lose() {
    let mut game = started(3);
    for _ in 0..4 {
        assert_eq!(pair(&mut game, 0, 2), ClickOutcome::Missed);
    }
    assert_eq!(game.info().attempts_remaining(), 0);
    assert_eq!(game.status(), GameStatus::Playing);
    assert!(game.clock().is_running());
}

#[test]
fn test_fifth_miss_loses_and_reveals() {
    let mut game = started(4);
    let log = EventLog::new();
    game.subscribe(log.clone());

    // One pair found first so the reveal has something to leave alone.
    assert_eq!(pair(&mut game, 10, 11), ClickOutcome::Matched);
    for _ in 0..4 {
        pair(&mut game, 0, 2);
    }
    game.click_slide(PictureId(1));
    assert_eq!(game.click_slide(PictureId(5)), ClickOutcome::Missed);

    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.info().attempts_remaining(), -1);
    assert_eq!(game.info().score(), 75 - 5 * 15);
    assert!(!game.clock().is_running());
    // Hide timer cancelled, clock stopped: nothing left to fire.
    assert!(game.scheduler().is_empty());

    let placeholder = game.slides().placeholder().to_string();
    for slide in game.slides().slides() {
        if slide.is_matched() {
            assert_eq!(slide.border(), BorderState::Matched);
        } else {
            assert_eq!(slide.border(), BorderState::Failed);
            assert_ne!(slide.display_image(&placeholder), placeholder);
        }
    }

    // The reveal survives time passing.
    let elapsed = game.clock().elapsed();
    game.advance(Duration::from_secs(10));
    assert_eq!(game.clock().elapsed(), elapsed);
    assert!(game.slides().slides().iter().all(|s| !s.is_selectable()));

    assert_eq!(log.count(|e| *e == GameEvent::StatusChanged(GameStatus::Lost)), 1);
}

#[test]
fn test_session_is_terminal_after_loss() {
    let mut game = started(5);
    for _ in 0..5 {
        pair(&mut game, 0, 2);
    }
    assert_eq!(game.status(), GameStatus::Lost);

    let before = game.snapshot();
    assert_eq!(game.click_slide(PictureId(4)), ClickOutcome::Ignored);
    assert_eq!(game.snapshot(), before);
}

// =============================================================================
// Time
// =============================================================================

#[test]
fn test_advance_by_duration_max_after_play() {
    let mut game = started(14);
    game.advance(Duration::MAX);

    let snap = game.snapshot();
    assert!(snap.elapsed_secs > u64::MAX / 2);
    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!(game.time_to_next_timer(), Some(Duration::ZERO));

    // Further time is absorbed at the end of the timeline.
    game.advance(Duration::MAX);
    assert_eq!(game.snapshot().elapsed_secs, snap.elapsed_secs);
}

#[test]
fn test_idle_hour_ticks_once() {
    let mut game = started(15);
    let log = EventLog::new();
    game.subscribe(log.clone());

    game.advance(Duration::from_secs(3600));
    assert_eq!(game.clock().elapsed(), Duration::from_secs(3605));
    assert_eq!(log.count(|e| matches!(e, GameEvent::ClockTicked(_))), 1);
    assert_eq!(game.time_to_next_timer(), Some(Duration::from_secs(1)));
}

// =============================================================================
// Selection gating
// =============================================================================

#[test]
fn test_selection_gated_by_phases() {
    init_tracing();
    let source = Rc::new(StaticImages::numbered(6));
    let mut game = Game::new(source, Category::Foods, GameConfig::new().with_seed(6)).unwrap();

    // Memorize phase: everything face up, nothing selectable.
    assert!(game.snapshot().slides.iter().all(|s| s.border == BorderState::Viewed));
    assert_eq!(game.click_slide(PictureId(0)), ClickOutcome::Ignored);
    assert_eq!(game.time_to_next_timer(), Some(Duration::from_secs(1)));

    game.advance(MEMORIZE);
    let snap = game.snapshot();
    assert!(snap.can_select);
    assert!(snap.slides.iter().all(|s| s.selectable && s.border == BorderState::Plain));

    // A face-up slide cannot be picked as its own partner.
    assert_eq!(game.click_slide(PictureId(0)), ClickOutcome::Selected);
    assert_eq!(game.click_slide(PictureId(0)), ClickOutcome::Ignored);
    assert_eq!(game.slides().selected(), &[PictureId(0)]);

    assert_eq!(game.click_slide(PictureId(7)), ClickOutcome::Missed);
    assert!(!game.snapshot().can_select);

    game.advance(Duration::from_secs(2));
    assert_eq!(game.click_slide(PictureId(3)), ClickOutcome::Ignored);
    game.advance(Duration::from_secs(1));
    assert_eq!(game.click_slide(PictureId(3)), ClickOutcome::Selected);
}

#[test]
fn test_matched_slides_cannot_be_selected() {
    let mut game = started(8);
    pair(&mut game, 2, 3);
    assert_eq!(game.click_slide(PictureId(2)), ClickOutcome::Ignored);
    assert!(game.slides().selected().is_empty());
}

// =============================================================================
// Restart and menu
// =============================================================================

#[test]
fn test_restart_deals_fresh_board() {
    let mut game = started(9);
    assert_eq!(pair(&mut game, 0, 1), ClickOutcome::Matched);
    assert_eq!(pair(&mut game, 4, 6), ClickOutcome::Missed);
    assert_eq!(game.info().score(), 60);

    game.restart().unwrap();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.info().score(), 0);
    assert_eq!(game.info().attempts_remaining(), 4);
    assert!(!game.slides().all_matched());
    assert!(game.slides().slides().iter().all(|s| s.is_viewed() && !s.is_matched()));
    assert_eq!(game.category(), Category::Animals);
}

#[test]
fn test_restart_after_loss() {
    let mut game = started(10);
    for _ in 0..5 {
        pair(&mut game, 0, 2);
    }
    assert_eq!(game.status(), GameStatus::Lost);

    game.restart().unwrap();
    assert_eq!(game.status(), GameStatus::Playing);
    assert!(game.clock().is_running());
    game.advance(MEMORIZE);
    assert_eq!(pair(&mut game, 0, 1), ClickOutcome::Matched);
}

#[test]
fn test_menu_round_trip() {
    init_tracing();
    let mut menu = StartMenu::new(StaticImages::numbered(6), GameConfig::new().with_seed(12));
    assert_eq!(menu.categories().len(), 3);

    let game = menu.start_new_game(2).unwrap();
    assert_eq!(game.category(), Category::Foods);
    game.advance(MEMORIZE);
    game.click_slide(PictureId(0));
    game.click_slide(PictureId(2));

    let game = menu.restart().unwrap();
    assert_eq!(game.info().score(), 0);
    assert_eq!(game.category(), Category::Foods);

    let game = menu.start_new_game(0).unwrap();
    assert_eq!(game.category(), Category::Animals);
}

// =============================================================================
// Custom schedulers
// =============================================================================

/// Scheduler that counts cancellations on top of the default queue.
#[derive(Default)]
struct CountingScheduler {
    inner: TimerQueue,
    cancels: usize,
}

impl Scheduler for CountingScheduler {
    fn now(&self) -> Duration {
        self.inner.now()
    }

    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        self.inner.schedule(kind, delay)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.cancels += 1;
        self.inner.cancel(handle)
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.inner.is_pending(handle)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.inner.next_deadline()
    }

    fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerKind)> {
        self.inner.pop_due(until)
    }

    fn advance_to(&mut self, until: Duration) {
        self.inner.advance_to(until)
    }
}

#[test]
fn test_custom_scheduler() {
    let source = Rc::new(StaticImages::numbered(6));
    let mut game = Game::with_scheduler(
        source,
        Category::Cars,
        GameConfig::new().with_seed(13),
        CountingScheduler::default(),
    )
    .unwrap();

    game.advance(MEMORIZE);
    for k in 0..6 {
        game.click_slide(PictureId(k * 2));
        game.click_slide(PictureId(k * 2 + 1));
        game.advance(PEEK);
    }
    assert_eq!(game.status(), GameStatus::Won);
    // Winning stops the clock, which cancels its pending tick.
    assert_eq!(game.scheduler().cancels, 1);
}

// =============================================================================
// Scoring properties
// =============================================================================

proptest! {
    #[test]
    fn prop_score_tracks_awards_and_penalties(ops in proptest::collection::vec(any::<bool>(), 0..50)) {
        let mut info = concentration::GameInfo::default();
        let mut awards = 0;
        let mut penalties = 0;
        for award in ops {
            if award {
                info.award();
                awards += 1;
            } else {
                info.penalize();
                penalties += 1;
            }
        }
        prop_assert_eq!(info.score(), 75 * awards - 15 * penalties);
        prop_assert_eq!(info.attempts_remaining(), 4 - penalties);
        prop_assert_eq!(info.status(), GameStatus::Playing);
    }
}
