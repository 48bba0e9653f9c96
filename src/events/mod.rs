//! # Scheduler lifecycle events.
//!
//! Every step the scheduler takes (submission, rejection, execution,
//! failure, admission changes, idling) is published as an [`Event`] on the
//! [`Bus`] so the host application can observe the queue without polling.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
