//! Elapsed play time.

use std::time::Duration;

use super::scheduler::{Scheduler, TimerHandle, TimerKind};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Game clock counting whole ticks while running.
///
/// A running clock always has exactly one `ClockTick` timer pending. When a
/// tick fires, every tick that falls due up to the end of the current
/// `advance` is counted at once and the next one is scheduled past it.
#[derive(Clone, Debug)]
pub struct GameClock {
    elapsed: Duration,
    interval: Duration,
    tick: Option<TimerHandle>,
}

impl GameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            interval,
            tick: None,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Start ticking. Starting a running clock does nothing.
    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        if self.tick.is_none() {
            self.tick = Some(scheduler.schedule(TimerKind::ClockTick, self.interval));
        }
    }

    /// Stop ticking. Safe to call on a stopped clock.
    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.tick.take() {
            scheduler.cancel(handle);
        }
    }

    /// Handle a fired tick while time is being advanced to `until`.
    ///
    /// Counts the fired tick plus every later one due at or before `until`,
    /// then schedules a single timer for the first tick after it. Returns
    /// the new elapsed time.
    pub fn on_tick(&mut self, scheduler: &mut impl Scheduler, until: Duration) -> Duration {
        if self.tick.is_some() {
            let ticks = self.ticks_due(until.saturating_sub(scheduler.now()));
            let span = scale(self.interval, ticks);
            self.elapsed = self.elapsed.saturating_add(span);
            self.tick = Some(scheduler.schedule(TimerKind::ClockTick, span));
        }
        self.elapsed
    }

    /// The fired tick plus the whole intervals that fit in `behind`.
    fn ticks_due(&self, behind: Duration) -> u128 {
        match self.interval.as_nanos() {
            0 => 1,
            interval => 1 + behind.as_nanos() / interval,
        }
    }
}

/// `interval * ticks`, saturating at `Duration::MAX`.
fn scale(interval: Duration, ticks: u128) -> Duration {
    let nanos = interval.as_nanos().saturating_mul(ticks);
    match u64::try_from(nanos / NANOS_PER_SEC) {
        // The remainder is below one second, so it fits in a u32.
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}
