//! # Event subscribers.
//!
//! Provides the [`Subscribe`] extension point for observing scheduler
//! events, and [`SubscriberSet`], the fan-out that delivers each
//! [`Event`](crate::events::Event) to every subscriber without blocking the
//! publisher.
//!
//! ```text
//! Event flow:
//!   Scheduler / worker ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                                    │
//!                                                   ┌────────────────┼───────┐
//!                                                   ▼                ▼       ▼
//!                                              [queue S1]       [queue S2]  ...
//!                                               worker S1        worker S2
//!                                              on_event()       on_event()
//! ```
//!
//! Typical subscribers: a status-bar updater showing queue depth, a log
//! writer, a test harness waiting for `WorkerIdle`.

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
