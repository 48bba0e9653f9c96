//! # Event subscriber trait.
//!
//! Each subscriber gets a dedicated worker task and a bounded queue, so a
//! slow subscriber only ever delays itself:
//! - queue overflow drops the event **for this subscriber only** and
//!   publishes [`EventKind::SubscriberOverflow`](crate::EventKind);
//! - panics are caught and published as
//!   [`EventKind::SubscriberPanicked`](crate::EventKind);
//! - events are processed sequentially (FIFO) per subscriber.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use buildq::{Event, EventKind, Subscribe};
//!
//! struct QueueDepthBadge;
//!
//! #[async_trait]
//! impl Subscribe for QueueDepthBadge {
//!     async fn on_event(&self, ev: &Event) {
//!         if let (EventKind::TaskQueued, Some(depth)) = (ev.kind, ev.count) {
//!             // update the editor status bar...
//!             let _ = depth;
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "queue-depth-badge" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Observer of scheduler events.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this subscriber's queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, never in the publisher context.
    /// Events are delivered in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in overflow/panic events.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose;
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// The runtime clamps capacity to a minimum of 1. Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
