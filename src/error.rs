//! Error types used by the buildq scheduler and backends.
//!
//! This module defines two error enums:
//!
//! - [`CompileError`]: failures reported by the compilation backend for a
//!   single task.
//! - [`SchedulerError`]: failures of the scheduler runtime itself.
//!
//! Both types provide `as_label` / `as_message` helpers for logging.
//! A `CompileError` never propagates past its task: the worker records it
//! and continues with the remaining eligible tasks.

use std::time::Duration;

use thiserror::Error;

/// # Failures reported by the compilation backend.
///
/// Either kind abandons the current task (its post-hook is skipped) without
/// tearing down the worker.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The toolchain ran and rejected the input.
    #[error("compilation failed: {diagnostics}")]
    Failed {
        /// Human-readable toolchain output, written to the report file.
        diagnostics: String,
    },

    /// The toolchain could not run at all (missing binary, bad invocation).
    #[error("fatal backend error: {reason}")]
    Fatal {
        /// Description of what prevented the invocation.
        reason: String,
    },
}

impl CompileError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use buildq::CompileError;
    ///
    /// let err = CompileError::Fatal { reason: "clang not found".into() };
    /// assert_eq!(err.as_label(), "compile_fatal");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CompileError::Failed { .. } => "compile_failed",
            CompileError::Fatal { .. } => "compile_fatal",
        }
    }

    /// Returns the text that belongs in the diagnostics report.
    pub fn diagnostics(&self) -> &str {
        match self {
            CompileError::Failed { diagnostics } => diagnostics,
            CompileError::Fatal { reason } => reason,
        }
    }

    /// True for failures where the toolchain never ran.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CompileError::Fatal { .. })
    }
}

/// # Failures of the scheduler runtime itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Shutdown grace period elapsed with a compile still in flight.
    #[error("shutdown timeout {grace:?} exceeded; in flight: {in_flight:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Input path of the task still executing, if known.
        in_flight: Option<String>,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::GraceExceeded { .. } => "scheduler_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SchedulerError::GraceExceeded { grace, in_flight } => {
                format!("grace exceeded after {grace:?}; in flight={in_flight:?}")
            }
        }
    }
}
