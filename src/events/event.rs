//! # Events emitted by the scheduler and its worker.
//!
//! [`EventKind`] classifies events across three categories:
//! - **Queue events**: submission accepted/rejected, cancellation
//! - **Execution events**: a task starting, finishing, failing
//! - **Runtime events**: admission changes, worker idling, shutdown
//!
//! The [`Event`] struct carries optional metadata: the scope and input path
//! involved, a human-readable reason, and queue counters.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore order when events are observed through
//! independently-buffered subscribers.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Queue events ===
    /// A task was admitted to the pending queue.
    ///
    /// Sets: `scope`, `input`, `count` (pending depth after insertion).
    TaskQueued,

    /// A submission was rejected because an equivalent task is pending.
    ///
    /// Sets: `scope`, `input`.
    TaskRejected,

    /// Pending tasks for a scope were removed by explicit cancellation.
    ///
    /// Sets: `scope`, `count` (number of tasks removed).
    TasksCanceled,

    // === Execution events ===
    /// The worker picked a task and is about to run it.
    ///
    /// Sets: `scope`, `input`.
    TaskStarting,

    /// A task completed: backend succeeded, post-hook (if any) ran.
    ///
    /// Sets: `scope`, `input`.
    TaskFinished,

    /// The backend reported failure; the task was abandoned and its
    /// post-hook skipped.
    ///
    /// Sets: `scope`, `input`, `reason` (error label + message).
    TaskFailed,

    /// A pre/post hook panicked; the panic was caught and the task
    /// continued.
    ///
    /// Sets: `scope`, `input`, `reason` (which hook, panic payload).
    HookPanicked,

    // === Admission events ===
    /// A scope was barred from execution.
    ///
    /// Sets: `scope`.
    ScopeDisabled,

    /// A scope was re-admitted; deferred tasks become eligible again.
    ///
    /// Sets: `scope`.
    ScopeEnabled,

    // === Runtime events ===
    /// No eligible task remains; the worker parked until woken.
    ///
    /// Sets: `count` (number of deferred tasks waiting on disabled scopes).
    WorkerIdle,

    /// The diagnostics report could not be written; task processing
    /// continued regardless.
    ///
    /// Sets: `reason`.
    ReportUnavailable,

    /// Shutdown was requested on the scheduler.
    ShutdownRequested,

    /// The worker loop exited.
    WorkerStopped,

    // === Subscriber events ===
    /// A subscriber panicked while processing an event.
    ///
    /// Sets: `reason` (subscriber name, panic info).
    SubscriberPanicked,

    /// A subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `reason` (subscriber name, why).
    SubscriberOverflow,
}

/// Scheduler event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Scope involved, if applicable.
    pub scope: Option<Arc<str>>,
    /// Input path of the task involved, if applicable.
    pub input: Option<Arc<str>>,
    /// Human-readable reason (errors, panic payloads, etc.).
    pub reason: Option<Arc<str>>,
    /// Queue counter (pending depth, removed count, deferred count).
    pub count: Option<usize>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            scope: None,
            input: None,
            reason: None,
            count: None,
        }
    }

    /// Attaches the scope name.
    #[inline]
    pub fn with_scope(mut self, scope: impl Into<Arc<str>>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Attaches the task input path.
    #[inline]
    pub fn with_input(mut self, input: impl Into<Arc<str>>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a queue counter.
    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, why: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={why}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} panic={info}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::TaskQueued);
        let b = Event::now(EventKind::TaskQueued);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::now(EventKind::TaskFailed)
            .with_scope("level-1")
            .with_input("events/level-1.cpp")
            .with_reason("boom")
            .with_count(2);
        assert_eq!(ev.scope.as_deref(), Some("level-1"));
        assert_eq!(ev.input.as_deref(), Some("events/level-1.cpp"));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
        assert_eq!(ev.count, Some(2));
    }
}
