//! # Optional pre/post task steps.
//!
//! A [`Hook`] is a fire-and-forget side-effecting step run by the worker
//! before (pre) or after (post) the backend call: preparing inputs, cleaning
//! stale outputs, refreshing editor state. Hooks take no arguments and report
//! nothing back; any error a hook cares about must be handled inside the hook.
//!
//! [`HookFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per
//! run, so a hook attached to a task can fire on every execution without
//! shared mutable state.
//!
//! ## Example
//! ```rust
//! use buildq::{HookFn, HookRef};
//!
//! let clean: HookRef = HookFn::arc(|| async {
//!     // remove stale outputs...
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

/// Shared handle to a hook (`Arc<dyn Hook>`).
pub type HookRef = Arc<dyn Hook>;

/// Asynchronous side-effecting step attached to a task.
///
/// The worker awaits the hook to completion; panics are caught and reported
/// as events, so a misbehaving hook never aborts the surrounding task.
#[async_trait]
pub trait Hook: Send + Sync + 'static {
    /// Runs the hook.
    async fn run(&self);
}

/// Function-backed hook implementation.
///
/// Wraps a closure that *creates* a new future per run.
pub struct HookFn<F> {
    f: F,
}

impl<F> HookFn<F> {
    /// Creates a new function-backed hook.
    ///
    /// Prefer [`HookFn::arc`] when you immediately need a [`HookRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the hook and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Hook for HookFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn run(&self) {
        (self.f)().await;
    }
}
