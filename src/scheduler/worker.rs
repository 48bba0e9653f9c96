//! # Worker: the eligibility-scanning execution loop.
//!
//! Exactly one worker task exists per [`Scheduler`](crate::Scheduler). It
//! parks on a `Notify` while nothing is eligible, and on each wake drains
//! the queue: scan for the first pending task whose scope is enabled, move
//! it to the current slot, release the queue lock, execute, repeat.
//!
//! ```text
//! loop {
//!   ├─► park (cancellable) until submit/enable wakes us
//!   └─► while let Some(task) = take_eligible() {
//!         ├─► publish TaskStarting
//!         ├─► pre-hook (panic-isolated)
//!         ├─► Compiler::compile(...)           (queue lock released)
//!         ├─► Ok  → post-hook → TaskFinished
//!         ├─► Err → report file → TaskFailed   (post-hook skipped)
//!         └─► clear current slot
//!       }
//!       publish WorkerIdle (with deferred count)
//! }
//! ```
//!
//! ## Rules
//! - A backend failure abandons the **task**, never the loop: the worker
//!   returns to scanning so one broken compile cannot stall the queue.
//! - Hook panics are caught and reported; they do not abort the task.
//! - Cancellation is checked between tasks, not mid-compile: an in-flight
//!   compile always runs to completion.

use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::events::{Event, EventKind};
use crate::tasks::{CompileTask, HookRef};

use super::Shared;

/// Runs the worker loop until the token is cancelled.
pub(crate) async fn run(shared: Arc<Shared>, token: CancellationToken) {
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = shared.wake.notified() => {}
        }

        while !token.is_cancelled() {
            let Some(task) = shared.take_eligible() else {
                break;
            };
            execute(&shared, &task).await;
            shared.finish_current();
        }

        if token.is_cancelled() {
            break;
        }
        shared.bus.publish(
            Event::now(EventKind::WorkerIdle).with_count(shared.deferred_len()),
        );
    }

    shared.bus.publish(Event::now(EventKind::WorkerStopped));
}

/// Executes one task: pre-hook, backend call, post-hook.
async fn execute(shared: &Shared, task: &CompileTask) {
    shared.bus.publish(task_event(EventKind::TaskStarting, task));

    if let Some(hook) = task.pre_hook() {
        run_hook(shared, task, hook, "pre").await;
    }

    let outcome = shared
        .compiler
        .compile(task.input(), task.output(), task.options(), &shared.artifacts)
        .await;

    match outcome {
        Ok(()) => {
            if let Some(hook) = task.post_hook() {
                run_hook(shared, task, hook, "post").await;
            }
            shared.bus.publish(task_event(EventKind::TaskFinished, task));
        }
        Err(err) => {
            // Abandon the task: no post-hook, no retry. Diagnostics go to
            // the report file; losing the report is itself non-fatal.
            if let Err(io_err) = shared.report.write(task, err.diagnostics()).await {
                shared.bus.publish(
                    Event::now(EventKind::ReportUnavailable).with_reason(io_err.to_string()),
                );
            }
            shared.bus.publish(
                task_event(EventKind::TaskFailed, task)
                    .with_reason(format!("{}: {err}", err.as_label())),
            );
        }
    }
}

/// Runs a hook with panic isolation.
async fn run_hook(shared: &Shared, task: &CompileTask, hook: &HookRef, stage: &'static str) {
    let fut = hook.run();
    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
        shared.bus.publish(
            task_event(EventKind::HookPanicked, task)
                .with_reason(format!("{stage} hook panicked: {panic_err:?}")),
        );
    }
}

fn task_event(kind: EventKind, task: &CompileTask) -> Event {
    Event::now(kind)
        .with_scope(task.scope().as_str())
        .with_input(task.input().display().to_string())
}
