//! End-to-end scheduler behavior against a recording backend.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use buildq::{
    ArtifactLock, CompileError, CompileOptions, CompileTask, Compiler, HookFn, Scheduler,
    SchedulerConfig, SchedulerError, ScopeId,
};

/// Shared journal of observed side effects (compiles and hook runs).
type Journal = Arc<Mutex<Vec<String>>>;

fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Backend double: records every invocation, can fail chosen inputs and
/// block on one input until released.
#[derive(Default)]
struct RecordingCompiler {
    journal: Journal,
    fail_inputs: HashSet<String>,
    blocked_input: Option<String>,
    started: Arc<Notify>,
    release: Arc<Notify>,
}

impl RecordingCompiler {
    fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    fn failing_on(mut self, input: &str) -> Self {
        self.fail_inputs.insert(input.to_string());
        self
    }

    fn blocking_on(mut self, input: &str) -> Self {
        self.blocked_input = Some(input.to_string());
        self
    }
}

#[async_trait]
impl Compiler for RecordingCompiler {
    async fn compile(
        &self,
        input: &Path,
        _output: &Path,
        _options: &CompileOptions,
        _artifacts: &ArtifactLock,
    ) -> Result<(), CompileError> {
        let name = input.to_string_lossy().to_string();
        self.journal.lock().unwrap().push(name.clone());

        if self.blocked_input.as_deref() == Some(name.as_str()) {
            self.started.notify_one();
            self.release.notified().await;
        }

        if self.fail_inputs.contains(&name) {
            return Err(CompileError::Failed {
                diagnostics: format!("error: something is wrong in {name}"),
            });
        }
        Ok(())
    }
}

fn task(scope: &str, input: &str) -> CompileTask {
    CompileTask::new(
        ScopeId::new(scope),
        input,
        format!("{input}.bc"),
        CompileOptions::default(),
    )
}

fn config(dir: &tempfile::TempDir) -> SchedulerConfig {
    SchedulerConfig {
        working_dir: dir.path().to_path_buf(),
        ..SchedulerConfig::default()
    }
}

/// Polls `cond` until it holds or a generous timeout elapses.
async fn wait_until(cond: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

async fn wait_drained(scheduler: &Scheduler) {
    wait_until(|| !scheduler.in_progress()).await;
}

#[tokio::test]
async fn test_duplicate_pending_submission_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone())),
        Vec::new(),
    );

    // Keep the tasks pending so the dedup window stays open.
    let scope = ScopeId::new("level-1");
    scheduler.disable(scope.clone());

    assert!(scheduler.submit(task("level-1", "a.cpp")));
    assert!(!scheduler.submit(task("level-1", "a.cpp")));
    assert_eq!(scheduler.snapshot().len(), 1);

    scheduler.enable(&scope);
    wait_drained(&scheduler).await;
    assert_eq!(entries(&log), vec!["a.cpp"]);
}

#[tokio::test]
async fn test_racing_equivalent_submissions_admit_exactly_one() {
    let tmp = tempfile::tempdir().unwrap();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(journal())),
        Vec::new(),
    );
    scheduler.disable(ScopeId::new("level-1"));

    let admitted: usize = std::thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| s.spawn(|| scheduler.submit(task("level-1", "a.cpp"))))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|accepted| *accepted)
            .count()
    });

    assert_eq!(admitted, 1);
    assert_eq!(scheduler.snapshot().len(), 1);
}

#[tokio::test]
async fn test_fifo_order_among_eligible_tasks() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone())),
        Vec::new(),
    );

    scheduler.submit(task("s1", "a.cpp"));
    scheduler.submit(task("s2", "b.cpp"));
    scheduler.submit(task("s1", "c.cpp"));

    wait_drained(&scheduler).await;
    assert_eq!(entries(&log), vec!["a.cpp", "b.cpp", "c.cpp"]);
}

#[tokio::test]
async fn test_disabled_scope_is_skipped_not_blocking() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone())),
        Vec::new(),
    );

    let paused = ScopeId::new("paused");
    scheduler.disable(paused.clone());
    scheduler.submit(task("paused", "a.cpp"));
    scheduler.submit(task("active", "b.cpp"));

    // The task behind the disabled scope must not starve unrelated work.
    wait_until(|| entries(&log) == vec!["b.cpp"]).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(entries(&log), vec!["b.cpp"]);
    assert!(scheduler.has_task_for(&paused));

    scheduler.enable(&paused);
    wait_drained(&scheduler).await;
    assert_eq!(entries(&log), vec!["b.cpp", "a.cpp"]);
}

#[tokio::test]
async fn test_cancellation_removes_pending_but_not_in_flight() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let compiler = Arc::new(RecordingCompiler::new(log.clone()).blocking_on("slow.cpp"));
    let started = compiler.started.clone();
    let release = compiler.release.clone();
    let scheduler = Scheduler::new(config(&tmp), compiler, Vec::new());

    let scope = ScopeId::new("edited");
    scheduler.submit(task("edited", "slow.cpp"));
    scheduler.submit(task("edited", "queued.cpp"));
    scheduler.submit(task("other", "unrelated.cpp"));

    started.notified().await;
    scheduler.cancel_all_for(&scope);

    // The in-flight compile survives; only the pending one is gone.
    let snapshot = scheduler.snapshot();
    assert!(snapshot.iter().any(|t| t.input() == Path::new("slow.cpp")));
    assert!(!snapshot.iter().any(|t| t.input() == Path::new("queued.cpp")));

    release.notify_one();
    wait_drained(&scheduler).await;
    assert_eq!(entries(&log), vec!["slow.cpp", "unrelated.cpp"]);
}

#[tokio::test]
async fn test_idle_then_relaunch_on_new_submission() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone())),
        Vec::new(),
    );

    scheduler.submit(task("s", "a.cpp"));
    wait_drained(&scheduler).await;
    assert!(!scheduler.in_progress());

    // No manual restart needed: submission alone revives processing.
    assert!(scheduler.submit(task("s", "b.cpp")));
    assert!(scheduler.in_progress());
    wait_drained(&scheduler).await;
    assert_eq!(entries(&log), vec!["a.cpp", "b.cpp"]);
}

#[tokio::test]
async fn test_hooks_run_in_order_around_backend() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone())),
        Vec::new(),
    );

    let pre_log = log.clone();
    let post_log = log.clone();
    let task = task("s", "a.cpp")
        .with_pre_hook(HookFn::arc(move || {
            let log = pre_log.clone();
            async move { log.lock().unwrap().push("pre".into()) }
        }))
        .with_post_hook(HookFn::arc(move || {
            let log = post_log.clone();
            async move { log.lock().unwrap().push("post".into()) }
        }));

    scheduler.submit(task);
    wait_drained(&scheduler).await;
    assert_eq!(entries(&log), vec!["pre", "a.cpp", "post"]);
}

#[tokio::test]
async fn test_backend_failure_skips_post_hook_and_spares_other_tasks() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone()).failing_on("bad.cpp")),
        Vec::new(),
    );

    let bad_post = log.clone();
    scheduler.submit(task("s1", "bad.cpp").with_post_hook(HookFn::arc(move || {
        let log = bad_post.clone();
        async move { log.lock().unwrap().push("post:bad".into()) }
    })));

    let good_pre = log.clone();
    let good_post = log.clone();
    scheduler.submit(
        task("s2", "good.cpp")
            .with_pre_hook(HookFn::arc(move || {
                let log = good_pre.clone();
                async move { log.lock().unwrap().push("pre:good".into()) }
            }))
            .with_post_hook(HookFn::arc(move || {
                let log = good_post.clone();
                async move { log.lock().unwrap().push("post:good".into()) }
            })),
    );

    wait_drained(&scheduler).await;

    // The failed task is abandoned (no post-hook) and the next task runs
    // with its full hook sequence.
    assert_eq!(
        entries(&log),
        vec!["bad.cpp", "pre:good", "good.cpp", "post:good"]
    );
}

#[tokio::test]
async fn test_failed_compile_writes_diagnostics_report() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config(&tmp);
    let report_path = cfg.report_path();
    let scheduler = Scheduler::new(
        cfg,
        Arc::new(RecordingCompiler::new(journal()).failing_on("bad.cpp")),
        Vec::new(),
    );

    scheduler.submit(task("s", "bad.cpp"));
    wait_drained(&scheduler).await;
    wait_until(|| report_path.exists()).await;

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("error: something is wrong in bad.cpp"));
    assert!(report.contains("bad.cpp"));
}

#[tokio::test]
async fn test_panicking_hook_does_not_abort_the_task() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone())),
        Vec::new(),
    );

    scheduler.submit(
        task("s", "a.cpp").with_pre_hook(HookFn::arc(|| async { panic!("hook bug") })),
    );
    scheduler.submit(task("s", "b.cpp"));

    wait_drained(&scheduler).await;
    assert_eq!(entries(&log), vec!["a.cpp", "b.cpp"]);
}

#[tokio::test]
async fn test_subscribers_observe_task_lifecycle() {
    use buildq::{Event, EventKind, Subscribe};

    struct KindCollector(Journal);

    #[async_trait]
    impl Subscribe for KindCollector {
        async fn on_event(&self, event: &Event) {
            self.0.lock().unwrap().push(format!("{:?}", event.kind));
        }

        fn name(&self) -> &'static str {
            "kind-collector"
        }
    }

    let tmp = tempfile::tempdir().unwrap();
    let seen = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(journal())),
        vec![Arc::new(KindCollector(seen.clone()))],
    );

    scheduler.submit(task("s", "a.cpp"));
    wait_until(|| {
        entries(&seen)
            .iter()
            .any(|k| k == &format!("{:?}", EventKind::TaskFinished))
    })
    .await;

    let kinds = entries(&seen);
    let queued = kinds
        .iter()
        .position(|k| k == &format!("{:?}", EventKind::TaskQueued))
        .unwrap();
    let starting = kinds
        .iter()
        .position(|k| k == &format!("{:?}", EventKind::TaskStarting))
        .unwrap();
    let finished = kinds
        .iter()
        .position(|k| k == &format!("{:?}", EventKind::TaskFinished))
        .unwrap();
    assert!(queued < starting && starting < finished);
}

#[tokio::test]
async fn test_shutdown_is_idempotent_when_idle() {
    let tmp = tempfile::tempdir().unwrap();
    let log = journal();
    let scheduler = Scheduler::new(
        config(&tmp),
        Arc::new(RecordingCompiler::new(log.clone())),
        Vec::new(),
    );

    scheduler.submit(task("s", "a.cpp"));
    wait_drained(&scheduler).await;

    scheduler.shutdown().await.unwrap();
    scheduler.shutdown().await.unwrap();
    assert_eq!(entries(&log), vec!["a.cpp"]);
}

#[tokio::test]
async fn test_shutdown_reports_stuck_in_flight_compile() {
    let tmp = tempfile::tempdir().unwrap();
    let compiler = Arc::new(RecordingCompiler::new(journal()).blocking_on("slow.cpp"));
    let started = compiler.started.clone();
    let release = compiler.release.clone();

    let cfg = SchedulerConfig {
        grace: Duration::from_millis(50),
        ..config(&tmp)
    };
    let scheduler = Scheduler::new(cfg, compiler, Vec::new());

    scheduler.submit(task("s", "slow.cpp"));
    started.notified().await;

    let err = scheduler.shutdown().await.unwrap_err();
    match err {
        SchedulerError::GraceExceeded { in_flight, .. } => {
            assert_eq!(in_flight.as_deref(), Some("slow.cpp"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    release.notify_one();
}
