//! # Queue bookkeeping.
//!
//! [`QueueState`] is the single logically-atomic unit of shared mutable
//! state: the pending task list, the one "current" slot, and the admission
//! set of disabled scopes. It is always manipulated under the scheduler's
//! queue lock, and every method here is plain synchronous bookkeeping;
//! nothing in this module blocks or performs I/O.
//!
//! ## Rules
//! - The pending list never holds two equivalent tasks (see
//!   [`CompileTask`] equivalence).
//! - Admission gates **execution only**: disabling a scope neither removes
//!   its pending tasks nor touches the current slot.
//! - The eligibility scan is linear in FIFO order, so among mutually
//!   eligible tasks submission order is execution order, and deferred tasks
//!   keep their relative order for when their scope is re-enabled.

use std::collections::{HashSet, VecDeque};

use crate::tasks::{CompileTask, ScopeId};

/// Pending queue + current slot + admission set.
pub(crate) struct QueueState {
    pending: VecDeque<CompileTask>,
    current: Option<CompileTask>,
    disabled: HashSet<ScopeId>,
}

impl QueueState {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            current: None,
            disabled: HashSet::new(),
        }
    }

    /// Appends `task` unless an equivalent task is already pending.
    ///
    /// Returns whether the task was admitted, plus the pending depth after
    /// the call (for the queued event).
    pub fn submit(&mut self, task: CompileTask) -> (bool, usize) {
        if self.pending.iter().any(|t| *t == task) {
            return (false, self.pending.len());
        }
        self.pending.push_back(task);
        (true, self.pending.len())
    }

    /// Removes and returns the first pending task whose scope is enabled,
    /// assigning it to the current slot.
    ///
    /// Returns `None` when the queue is empty or every remaining task's
    /// scope is disabled.
    pub fn take_eligible(&mut self) -> Option<CompileTask> {
        let idx = self
            .pending
            .iter()
            .position(|t| !self.disabled.contains(t.scope()))?;
        let task = self.pending.remove(idx)?;
        self.current = Some(task.clone());
        Some(task)
    }

    /// Clears the current slot after execution, whatever the outcome.
    pub fn finish_current(&mut self) {
        self.current = None;
    }

    /// Removes every pending task for `scope`; the current slot is left
    /// untouched. Returns how many tasks were removed.
    pub fn cancel_scope(&mut self, scope: &ScopeId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.scope() != scope);
        before - self.pending.len()
    }

    /// Adds `scope` to the admission set (idempotent).
    pub fn disable(&mut self, scope: ScopeId) {
        self.disabled.insert(scope);
    }

    /// Removes `scope` from the admission set (idempotent). Returns whether
    /// any pending task exists at all; the caller uses this to decide
    /// whether waking the worker is worthwhile.
    pub fn enable(&mut self, scope: &ScopeId) -> bool {
        self.disabled.remove(scope);
        !self.pending.is_empty()
    }

    /// Current task (if any) followed by all pending tasks in FIFO order.
    pub fn snapshot(&self) -> Vec<CompileTask> {
        let mut tasks = Vec::with_capacity(self.pending.len() + 1);
        if let Some(current) = &self.current {
            tasks.push(current.clone());
        }
        tasks.extend(self.pending.iter().cloned());
        tasks
    }

    /// True if `scope` matches the current task or any pending task.
    pub fn has_task_for(&self, scope: &ScopeId) -> bool {
        if self.current.as_ref().is_some_and(|t| t.scope() == scope) {
            return true;
        }
        self.pending.iter().any(|t| t.scope() == scope)
    }

    /// True while anything is executing or waiting.
    pub fn in_progress(&self) -> bool {
        self.current.is_some() || !self.pending.is_empty()
    }

    /// Number of pending tasks deferred by a disabled scope.
    pub fn deferred_len(&self) -> usize {
        self.pending
            .iter()
            .filter(|t| self.disabled.contains(t.scope()))
            .count()
    }

    /// Input path of the current task, for shutdown diagnostics.
    pub fn current_input(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|t| t.input().display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::CompileOptions;

    fn task(scope: &str, input: &str) -> CompileTask {
        CompileTask::new(
            ScopeId::new(scope),
            input,
            "out.bc",
            CompileOptions::default(),
        )
    }

    #[test]
    fn test_submit_rejects_equivalent_pending() {
        let mut q = QueueState::new();
        let (accepted, depth) = q.submit(task("s", "a.cpp"));
        assert!(accepted);
        assert_eq!(depth, 1);

        let (accepted, depth) = q.submit(task("s", "a.cpp"));
        assert!(!accepted);
        assert_eq!(depth, 1);

        // Different input is a different request.
        let (accepted, _) = q.submit(task("s", "b.cpp"));
        assert!(accepted);
    }

    #[test]
    fn test_duplicate_allowed_once_original_left_pending() {
        let mut q = QueueState::new();
        q.submit(task("s", "a.cpp"));
        let taken = q.take_eligible().unwrap();
        assert_eq!(taken.input().to_str(), Some("a.cpp"));

        // The original is now current, not pending, so an equivalent
        // submission is admitted again.
        let (accepted, _) = q.submit(task("s", "a.cpp"));
        assert!(accepted);
    }

    #[test]
    fn test_scan_is_fifo_and_skips_disabled() {
        let mut q = QueueState::new();
        q.submit(task("s1", "a.cpp"));
        q.submit(task("s2", "b.cpp"));
        q.submit(task("s1", "c.cpp"));
        q.disable(ScopeId::new("s1"));

        let first = q.take_eligible().unwrap();
        assert_eq!(first.input().to_str(), Some("b.cpp"));
        q.finish_current();

        // Only deferred tasks remain.
        assert!(q.take_eligible().is_none());
        assert_eq!(q.deferred_len(), 2);

        // Re-enabling restores original submission order among them.
        q.enable(&ScopeId::new("s1"));
        assert_eq!(q.take_eligible().unwrap().input().to_str(), Some("a.cpp"));
        q.finish_current();
        assert_eq!(q.take_eligible().unwrap().input().to_str(), Some("c.cpp"));
    }

    #[test]
    fn test_cancel_scope_leaves_current_untouched() {
        let mut q = QueueState::new();
        q.submit(task("s", "a.cpp"));
        q.submit(task("s", "b.cpp"));
        q.submit(task("other", "c.cpp"));
        let _running = q.take_eligible().unwrap();

        assert_eq!(q.cancel_scope(&ScopeId::new("s")), 1);
        assert!(q.has_task_for(&ScopeId::new("s"))); // the current one
        assert!(q.has_task_for(&ScopeId::new("other")));
    }

    #[test]
    fn test_snapshot_orders_current_first() {
        let mut q = QueueState::new();
        q.submit(task("s", "a.cpp"));
        q.submit(task("s", "b.cpp"));
        let _running = q.take_eligible().unwrap();

        let snap = q.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].input().to_str(), Some("a.cpp"));
        assert_eq!(snap[1].input().to_str(), Some("b.cpp"));
    }

    #[test]
    fn test_in_progress_tracks_current_and_pending() {
        let mut q = QueueState::new();
        assert!(!q.in_progress());

        q.submit(task("s", "a.cpp"));
        assert!(q.in_progress());

        let _running = q.take_eligible().unwrap();
        assert!(q.in_progress()); // executing, queue empty

        q.finish_current();
        assert!(!q.in_progress());
    }

    #[test]
    fn test_disable_is_idempotent_and_blocks_only_execution() {
        let mut q = QueueState::new();
        q.disable(ScopeId::new("s"));
        q.disable(ScopeId::new("s"));

        // Insertion is still allowed while disabled.
        let (accepted, _) = q.submit(task("s", "a.cpp"));
        assert!(accepted);
        assert!(q.take_eligible().is_none());
        assert!(q.has_task_for(&ScopeId::new("s")));
    }
}
