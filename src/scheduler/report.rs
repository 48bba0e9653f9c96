//! # Diagnostics report file.
//!
//! When a compile fails, its diagnostics are written to a fixed report
//! location (`working_dir/report_file`) for later inspection; the scheduler
//! does not parse or act on the content. Each failure overwrites the
//! previous report, so the file always describes the most recent failure.
//!
//! Writing is best-effort: if the working directory or the file cannot be
//! created, a `ReportUnavailable` event is published and task processing
//! continues (the diagnostics for that run are lost).

use std::io;
use std::path::PathBuf;

use crate::config::SchedulerConfig;
use crate::tasks::CompileTask;

/// Fixed preamble so the report is self-describing when attached to a bug
/// report.
const REPORT_HEADER: &str = "This file lists the diagnostics of the most recent failed compilation.\n\
Include its content when reporting the problem.\n\n";

/// Writer for the diagnostics report file.
pub(crate) struct DiagnosticsReport {
    dir: PathBuf,
    path: PathBuf,
}

impl DiagnosticsReport {
    pub fn new(cfg: &SchedulerConfig) -> Self {
        Self {
            dir: cfg.working_dir.clone(),
            path: cfg.report_path(),
        }
    }

    /// Overwrites the report with the diagnostics of `task`'s failure.
    ///
    /// Creates the working directory on first use.
    pub async fn write(&self, task: &CompileTask, diagnostics: &str) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let body = format!(
            "{REPORT_HEADER}Scope: {}\nInput: {}\nOutput: {}\n\nCompiler output:\n{}\n",
            task.scope(),
            task.input().display(),
            task.output().display(),
            diagnostics,
        );
        tokio::fs::write(&self.path, body).await
    }
}
