//! One-shot, cancelable timers in virtual time.
//!
//! The engine never sleeps and never owns a thread. Components schedule
//! timers here; the host drives time forward from whatever loop it runs
//! (a UI frame callback, a tokio interval, a test) and the session fires
//! whatever came due, in deadline order.
//!
//! ```
//! use std::time::Duration;
//! use concentration::timing::{Scheduler, TimerKind, TimerQueue};
//!
//! let mut timers = TimerQueue::new();
//! let hide = timers.schedule(TimerKind::Hide, Duration::from_secs(3));
//! assert_eq!(timers.next_deadline(), Some(Duration::from_secs(3)));
//!
//! assert!(timers.pop_due(Duration::from_secs(2)).is_none());
//! assert_eq!(timers.pop_due(Duration::from_secs(3)), Some((hide, TimerKind::Hide)));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What a timer is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the opening memorize phase.
    Memorize,
    /// End of the peek at a selected pair.
    Hide,
    /// One game-clock tick.
    ClockTick,
}

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Scheduler abstraction the session runs on.
///
/// ## Implementation Notes
///
/// - `cancel` must be idempotent: unknown or already-fired handles are fine
/// - `pop_due` returns timers in deadline order, ties in scheduling order,
///   and moves `now` to the deadline of the timer it returns
/// - a timer scheduled while handling another one is visible to the next
///   `pop_due` call
pub trait Scheduler {
    /// Current virtual time.
    fn now(&self) -> Duration;

    /// Schedule `kind` to fire `delay` from now.
    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle;

    /// Cancel a timer. Returns true if it was still pending.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Is the timer still waiting to fire?
    fn is_pending(&self, handle: TimerHandle) -> bool;

    /// Deadline of the earliest pending timer.
    fn next_deadline(&self) -> Option<Duration>;

    /// Remove and return the earliest timer due at or before `until`.
    fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerKind)>;

    /// Move the clock forward to `until` without firing anything.
    fn advance_to(&mut self, until: Duration);
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    handle: TimerHandle,
    kind: TimerKind,
    deadline: Duration,
}

/// Default `Scheduler`: a small list of pending timers and a virtual clock.
///
/// Deadlines saturate at `Duration::MAX`; a timer parked there never fires.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_handle: u64,
    // A session never has more than three timers pending at once.
    pending: SmallVec<[Entry; 4]>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending timers of the given kind.
    pub fn pending_of(&self, kind: TimerKind) -> impl Iterator<Item = TimerHandle> + '_ {
        self.pending
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.handle)
    }

    fn earliest(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.deadline, e.handle))
            .map(|(i, _)| i)
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Entry {
            handle,
            kind,
            deadline: self.now.saturating_add(delay),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending.iter().position(|e| e.handle == handle) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|e| e.handle == handle)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.earliest().map(|i| self.pending[i].deadline)
    }

    fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerKind)> {
        let i = self.earliest()?;
        let entry = self.pending[i];
        if entry.deadline > until || entry.deadline == Duration::MAX {
            return None;
        }
        self.pending.remove(i);
        self.now = self.now.max(entry.deadline);
        Some((entry.handle, entry.kind))
    }

    fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
