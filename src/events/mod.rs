//! Observer surface for presentation layers.
//!
//! Sessions publish `GameEvent`s through an `EventBus`. Any UI subscribes
//! a `GameObserver` (or a plain closure) and re-renders on the events it
//! cares about; the engine assumes no UI framework.

pub mod bus;
pub mod event;

pub use bus::{EventBus, EventLog, GameObserver, SubscriptionId};
pub use event::{GameEvent, Outbox};
