//! # buildq
//!
//! **buildq** is a background compilation scheduler for interactive editors.
//!
//! Client code (typically a UI thread reacting to user edits) submits compile
//! requests; a single background worker serializes them so the interactive
//! thread never blocks on the compiler. Requests tied to a particular logical
//! scope (an editor scene, a document, ...) can be temporarily suspended while
//! that scope is being edited, without losing queued work.
//!
//! ## Architecture
//! ```text
//!   UI / caller threads                      single tokio worker task
//!   ────────────────────                     ───────────────────────────
//!   submit(CompileTask) ──► [pending queue] ──► scan: first task whose
//!   cancel_all_for(scope)   [disabled set ]     scope is not disabled
//!   disable / enable        [current slot ]          │
//!   snapshot / queries          (one lock)           ▼
//!                                              pre-hook
//!                                              Compiler::compile(...)
//!                                              post-hook (skipped on failure)
//!                                                   │
//!                                                   ▼
//!                                              back to scan; parks on a
//!                                              Notify when nothing eligible
//!
//!   every step publishes Events ──► Bus ──► SubscriberSet ──► subscribers
//! ```
//!
//! ## Guarantees
//! - **Dedup**: two equivalent tasks (same scope, input, output, options) are
//!   never pending at the same time; the second [`Scheduler::submit`] returns
//!   `false`.
//! - **FIFO among eligible**: mutually eligible tasks compile in submission
//!   order. Disabling a scope defers its tasks without reordering them.
//! - **Skip, don't block**: a disabled scope cannot starve unrelated work.
//! - **Responsive bookkeeping**: the queue lock is held only for scans and
//!   edits, never across a compile, so submission, cancellation and
//!   introspection stay cheap while a slow compile is in flight.
//! - **Failure isolation**: a failed compile abandons that task (its
//!   post-hook is skipped, diagnostics go to the report file) and the worker
//!   moves on to the next eligible task.
//!
//! ## Example
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use buildq::{
//!     ArtifactLock, CompileError, CompileOptions, CompileTask, Compiler,
//!     Scheduler, SchedulerConfig, ScopeId,
//! };
//!
//! struct ClangBackend;
//!
//! #[async_trait]
//! impl Compiler for ClangBackend {
//!     async fn compile(
//!         &self,
//!         input: &Path,
//!         output: &Path,
//!         options: &CompileOptions,
//!         artifacts: &ArtifactLock,
//!     ) -> Result<(), CompileError> {
//!         // ...invoke the real toolchain, hold `artifacts` while writing `output`...
//!         # let _ = (input, output, options, artifacts);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let scheduler = Scheduler::new(
//!         SchedulerConfig::default(),
//!         Arc::new(ClangBackend),
//!         Vec::new(),
//!     );
//!
//!     let scene = ScopeId::new("level-1");
//!     let task = CompileTask::new(
//!         scene.clone(),
//!         "events/level-1.cpp",
//!         "cache/level-1.bc",
//!         CompileOptions::default(),
//!     );
//!     assert!(scheduler.submit(task));
//!
//!     // Pause compilation for the scene while the user edits it.
//!     scheduler.disable(scene.clone());
//!     // ...later:
//!     scheduler.enable(&scene);
//! }
//! ```

mod artifact;
mod backend;
mod config;
mod error;
mod events;
mod scheduler;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use artifact::{ArtifactGuard, ArtifactLock};
pub use backend::Compiler;
pub use config::SchedulerConfig;
pub use error::{CompileError, SchedulerError};
pub use events::{Bus, Event, EventKind};
pub use scheduler::Scheduler;
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{CompileOptions, CompileTask, Hook, HookFn, HookRef, ScopeId};

// Optional: a simple built-in stdout event logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
