//! # External compilation backend contract.
//!
//! The scheduler never inspects compiler internals. It hands the backend an
//! input path, an output path and the task's [`CompileOptions`], and treats
//! any non-success as an opaque per-task failure: diagnostics are written to
//! the report file, the task's post-hook is skipped, and the worker moves on.
//!
//! ## Artifact persistence
//! Implementations that write the output artifact must hold the provided
//! [`ArtifactLock`] *for the duration of the write only*: compiling can run
//! unlocked, persisting cannot (see the [`artifact`](crate::ArtifactLock)
//! docs for why).
//!
//! ## Failure taxonomy
//! - [`CompileError::Failed`]: the toolchain ran and rejected the input;
//!   `diagnostics` carries its human-readable output.
//! - [`CompileError::Fatal`]: the toolchain could not run at all (missing
//!   binary, broken invocation). Still isolated to this task; the worker
//!   keeps draining the queue either way.

use std::path::Path;

use async_trait::async_trait;

use crate::artifact::ArtifactLock;
use crate::error::CompileError;
use crate::tasks::CompileOptions;

/// Compilation backend invoked by the worker, one call per task.
#[async_trait]
pub trait Compiler: Send + Sync + 'static {
    /// Compiles `input` into `output` under the given flags.
    ///
    /// Runs on the worker task with the queue lock released, so it may be
    /// slow without blocking submission, cancellation or introspection.
    /// Implementations must acquire `artifacts` around writing `output`.
    async fn compile(
        &self,
        input: &Path,
        output: &Path,
        options: &CompileOptions,
        artifacts: &ArtifactLock,
    ) -> Result<(), CompileError>;
}
