//! # Scheduler: the public handle around queue, admission set and worker.
//!
//! [`Scheduler`] owns the event bus, a [`SubscriberSet`], the shared queue
//! state and the single worker task. It is created explicitly (no process
//! globals) and is meant to live for the host application's lifetime; hand
//! out an `Arc<Scheduler>` to whoever needs to submit or query.
//!
//! ## Threading model
//! [`Scheduler::new`] must be called within a tokio runtime (it spawns the
//! worker and the subscriber listener). Everything else (submit, cancel,
//! enable/disable, introspection) is synchronous, callable from any thread,
//! and only ever takes short-lived exclusive access to the queue state. No
//! public method waits on a compile.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::artifact::ArtifactLock;
use crate::backend::Compiler;
use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::tasks::{CompileTask, ScopeId};

use super::queue::QueueState;
use super::report::DiagnosticsReport;
use super::worker;

/// State shared between the public handle and the worker task.
pub(crate) struct Shared {
    state: Mutex<QueueState>,
    pub(crate) wake: Notify,
    pub(crate) bus: Bus,
    pub(crate) compiler: Arc<dyn Compiler>,
    pub(crate) artifacts: ArtifactLock,
    pub(crate) report: DiagnosticsReport,
}

impl Shared {
    /// Short-lived exclusive access to the queue state.
    ///
    /// A poisoned lock only means a panic happened mid-bookkeeping; the
    /// state is plain data and stays coherent, so recover instead of
    /// propagating the poison.
    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn take_eligible(&self) -> Option<CompileTask> {
        self.state().take_eligible()
    }

    pub(crate) fn finish_current(&self) {
        self.state().finish_current();
    }

    pub(crate) fn deferred_len(&self) -> usize {
        self.state().deferred_len()
    }
}

/// Background compilation scheduler.
///
/// See the [crate docs](crate) for the full contract; in short:
/// - [`submit`](Self::submit) dedups against pending tasks and wakes the
///   worker;
/// - [`disable`](Self::disable)/[`enable`](Self::enable) defer or resume
///   execution per scope without touching queued work;
/// - [`cancel_all_for`](Self::cancel_all_for) drops pending tasks for a
///   scope but never interrupts an in-flight compile;
/// - [`snapshot`](Self::snapshot)/[`has_task_for`](Self::has_task_for)/
///   [`in_progress`](Self::in_progress) are consistent point-in-time views.
pub struct Scheduler {
    shared: Arc<Shared>,
    /// Kept alive so subscriber workers outlive their queues.
    _subs: Arc<SubscriberSet>,
    token: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
    grace: Duration,
}

impl Scheduler {
    /// Creates a scheduler and spawns its worker.
    ///
    /// Must be called within a tokio runtime. `subscribers` observe every
    /// lifecycle event; pass an empty vec if you don't need any.
    pub fn new(
        cfg: SchedulerConfig,
        compiler: Arc<dyn Compiler>,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(subscribers, bus.clone()));
        let token = CancellationToken::new();
        Self::spawn_listener(&bus, &subs, &token);

        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState::new()),
            wake: Notify::new(),
            bus,
            compiler,
            artifacts: ArtifactLock::new(),
            report: DiagnosticsReport::new(&cfg),
        });

        let handle = tokio::spawn(worker::run(Arc::clone(&shared), token.clone()));

        Self {
            shared,
            _subs: subs,
            token,
            worker: Mutex::new(Some(handle)),
            grace: cfg.grace,
        }
    }

    /// Forwards bus events to the subscriber set (fire-and-forget).
    fn spawn_listener(bus: &Bus, subs: &Arc<SubscriberSet>, token: &CancellationToken) {
        let mut rx = bus.subscribe();
        let set = Arc::clone(subs);
        let token = token.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Closed) => break,
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    }
                }
            }
        });
    }

    /// Submits a compile task.
    ///
    /// Returns `false` (a silent no-op, not an error) when an equivalent
    /// task is already pending. On admission the worker is woken if parked.
    pub fn submit(&self, task: CompileTask) -> bool {
        let scope = task.scope().clone();
        let input = task.input().display().to_string();

        let (accepted, depth) = self.shared.state().submit(task);

        if accepted {
            self.shared.bus.publish(
                Event::now(EventKind::TaskQueued)
                    .with_scope(scope.as_str())
                    .with_input(input)
                    .with_count(depth),
            );
            self.shared.wake.notify_one();
        } else {
            self.shared.bus.publish(
                Event::now(EventKind::TaskRejected)
                    .with_scope(scope.as_str())
                    .with_input(input),
            );
        }
        accepted
    }

    /// Removes every pending task for `scope`.
    ///
    /// Advisory for in-flight work: a task already executing for this scope
    /// is not interrupted and will still complete.
    pub fn cancel_all_for(&self, scope: &ScopeId) {
        let removed = self.shared.state().cancel_scope(scope);
        self.shared.bus.publish(
            Event::now(EventKind::TasksCanceled)
                .with_scope(scope.as_str())
                .with_count(removed),
        );
    }

    /// Bars `scope` from execution (idempotent).
    ///
    /// Its queued tasks stay queued and keep their order; they are simply
    /// skipped by the worker until [`enable`](Self::enable).
    pub fn disable(&self, scope: ScopeId) {
        let name = scope.clone();
        self.shared.state().disable(scope);
        self.shared
            .bus
            .publish(Event::now(EventKind::ScopeDisabled).with_scope(name.as_str()));
    }

    /// Re-admits `scope` (idempotent) and wakes the worker if deferred
    /// tasks may have become eligible.
    pub fn enable(&self, scope: &ScopeId) {
        let has_pending = self.shared.state().enable(scope);
        self.shared
            .bus
            .publish(Event::now(EventKind::ScopeEnabled).with_scope(scope.as_str()));
        if has_pending {
            self.shared.wake.notify_one();
        }
    }

    /// Point-in-time view of the queue: the current task (if any) followed
    /// by pending tasks in FIFO order.
    pub fn snapshot(&self) -> Vec<CompileTask> {
        self.shared.state().snapshot()
    }

    /// True if `scope` matches the current task or any pending task.
    ///
    /// Callers use this to decide whether to wait before further edits.
    pub fn has_task_for(&self, scope: &ScopeId) -> bool {
        self.shared.state().has_task_for(scope)
    }

    /// True while a task is executing or any task is pending.
    pub fn in_progress(&self) -> bool {
        self.shared.state().in_progress()
    }

    /// Handle to the artifact-write exclusion, for the component owning the
    /// conflicting external resource (e.g. the file-dialog side).
    pub fn artifact_lock(&self) -> ArtifactLock {
        self.shared.artifacts.clone()
    }

    /// Creates a receiver for subsequent scheduler events.
    ///
    /// Lighter-weight alternative to a full [`Subscribe`] implementation;
    /// useful for UIs and tests.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.shared.bus.subscribe()
    }

    /// Stops the worker and waits up to the configured grace for an
    /// in-flight compile to finish.
    ///
    /// Pending tasks are discarded (they are not persisted anywhere).
    /// Idempotent: a second call returns `Ok(())` immediately.
    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        self.shared
            .bus
            .publish(Event::now(EventKind::ShutdownRequested));
        self.token.cancel();

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if tokio::time::timeout(self.grace, handle).await.is_err() {
                let in_flight = self.shared.state().current_input();
                return Err(SchedulerError::GraceExceeded {
                    grace: self.grace,
                    in_flight,
                });
            }
        }
        Ok(())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Unblock the worker and the listener if shutdown() was never
        // called; the in-flight compile (if any) is detached.
        self.token.cancel();
    }
}
