//! # One immutable compile request.
//!
//! A [`CompileTask`] bundles everything the worker needs for one backend
//! invocation: the owning [`ScopeId`], input and output paths,
//! [`CompileOptions`], and optional pre/post hooks.
//!
//! ## Equivalence
//! Two tasks are *equivalent* when they share the same scope, input, output
//! and options. Hooks are deliberately excluded: a redundant submission is
//! redundant no matter which side effects it would have scheduled. The
//! pending queue never holds two equivalent tasks at once; `PartialEq`
//! implements exactly this relation.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{CompileOptions, HookRef, ScopeId};

/// One compile request, immutable once created.
///
/// Cheap to clone: paths are owned but hooks are shared via `Arc`.
///
/// ## Example
/// ```rust
/// use buildq::{CompileOptions, CompileTask, HookFn, ScopeId};
///
/// let task = CompileTask::new(
///     ScopeId::new("level-1"),
///     "events/level-1.cpp",
///     "cache/level-1.bc",
///     CompileOptions::default().for_events_code(),
/// )
/// .with_post_hook(HookFn::arc(|| async { /* reload the artifact */ }));
///
/// assert_eq!(task.scope().as_str(), "level-1");
/// ```
#[derive(Clone)]
pub struct CompileTask {
    scope: ScopeId,
    input: PathBuf,
    output: PathBuf,
    options: CompileOptions,
    pre_hook: Option<HookRef>,
    post_hook: Option<HookRef>,
}

impl CompileTask {
    /// Creates a new task with no hooks.
    pub fn new(
        scope: ScopeId,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        options: CompileOptions,
    ) -> Self {
        Self {
            scope,
            input: input.into(),
            output: output.into(),
            options,
            pre_hook: None,
            post_hook: None,
        }
    }

    /// Returns the task with a pre-hook attached (run before the backend).
    pub fn with_pre_hook(mut self, hook: HookRef) -> Self {
        self.pre_hook = Some(hook);
        self
    }

    /// Returns the task with a post-hook attached (run after a successful
    /// backend call; skipped when the compile fails).
    pub fn with_post_hook(mut self, hook: HookRef) -> Self {
        self.post_hook = Some(hook);
        self
    }

    /// Returns the owning scope id.
    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    /// Returns the input artifact path.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Returns the output artifact path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the compile flags.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Returns the pre-hook, if any.
    pub fn pre_hook(&self) -> Option<&HookRef> {
        self.pre_hook.as_ref()
    }

    /// Returns the post-hook, if any.
    pub fn post_hook(&self) -> Option<&HookRef> {
        self.post_hook.as_ref()
    }
}

/// Identity comparison used for dedup; hooks are excluded.
impl PartialEq for CompileTask {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope
            && self.input == other.input
            && self.output == other.output
            && self.options == other.options
    }
}

impl Eq for CompileTask {}

impl fmt::Debug for CompileTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileTask")
            .field("scope", &self.scope)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("options", &self.options)
            .field("pre_hook", &self.pre_hook.is_some())
            .field("post_hook", &self.post_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::HookFn;

    fn task(scope: &str, input: &str) -> CompileTask {
        CompileTask::new(
            ScopeId::new(scope),
            input,
            "out.bc",
            CompileOptions::default(),
        )
    }

    #[test]
    fn test_equivalence_ignores_hooks() {
        let plain = task("s", "a.cpp");
        let hooked = task("s", "a.cpp")
            .with_pre_hook(HookFn::arc(|| async {}))
            .with_post_hook(HookFn::arc(|| async {}));
        assert_eq!(plain, hooked);
    }

    #[test]
    fn test_different_scope_or_paths_differ() {
        assert_ne!(task("s1", "a.cpp"), task("s2", "a.cpp"));
        assert_ne!(task("s", "a.cpp"), task("s", "b.cpp"));
    }

    #[test]
    fn test_different_options_differ() {
        let base = task("s", "a.cpp");
        let mut optimized = task("s", "a.cpp");
        optimized.options.optimize = true;
        assert_ne!(base, optimized);
    }
}
