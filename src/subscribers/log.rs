//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [queued] scope=level-1 input=events/level-1.cpp pending=3
//! [rejected] scope=level-1 input=events/level-1.cpp
//! [starting] scope=level-1 input=events/level-1.cpp
//! [failed] scope=level-1 input=events/level-1.cpp reason="compilation failed: ..."
//! [idle] deferred=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use;
/// implement a custom [`Subscribe`] for structured logging.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let scope = e.scope.as_deref().unwrap_or("-");
        let input = e.input.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::TaskQueued => {
                println!(
                    "[queued] scope={scope} input={input} pending={}",
                    e.count.unwrap_or(0)
                );
            }
            EventKind::TaskRejected => {
                println!("[rejected] scope={scope} input={input}");
            }
            EventKind::TasksCanceled => {
                println!(
                    "[canceled] scope={scope} removed={}",
                    e.count.unwrap_or(0)
                );
            }
            EventKind::TaskStarting => {
                println!("[starting] scope={scope} input={input}");
            }
            EventKind::TaskFinished => {
                println!("[finished] scope={scope} input={input}");
            }
            EventKind::TaskFailed => {
                println!(
                    "[failed] scope={scope} input={input} reason={:?}",
                    e.reason
                );
            }
            EventKind::HookPanicked => {
                println!(
                    "[hook-panicked] scope={scope} input={input} reason={:?}",
                    e.reason
                );
            }
            EventKind::ScopeDisabled => {
                println!("[disabled] scope={scope}");
            }
            EventKind::ScopeEnabled => {
                println!("[enabled] scope={scope}");
            }
            EventKind::WorkerIdle => {
                println!("[idle] deferred={}", e.count.unwrap_or(0));
            }
            EventKind::ReportUnavailable => {
                println!("[report-unavailable] reason={:?}", e.reason);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::WorkerStopped => {
                println!("[worker-stopped]");
            }
            EventKind::SubscriberPanicked | EventKind::SubscriberOverflow => {
                println!("[subscriber-issue] reason={:?}", e.reason);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
