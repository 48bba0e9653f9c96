//! # Named compile flags.
//!
//! [`CompileOptions`] carries the fixed set of flags a task forwards to the
//! backend. The scheduler itself treats them as opaque: they only matter for
//! task equivalence (two tasks with different options are different requests).

/// Flags affecting how the backend compiles a task's input.
///
/// Part of task identity: all fields participate in the dedup comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompileOptions {
    /// Compile with optimizations enabled.
    pub optimize: bool,

    /// The input is machine-generated event code (lets the backend pick
    /// relaxed diagnostics and precompiled headers tuned for it).
    pub events_generated_code: bool,

    /// Compile for the runtime player rather than the editor preview.
    pub compilation_for_runtime: bool,
}

impl CompileOptions {
    /// Returns options with `optimize` set.
    pub fn optimized(mut self) -> Self {
        self.optimize = true;
        self
    }

    /// Returns options with `events_generated_code` set.
    pub fn for_events_code(mut self) -> Self {
        self.events_generated_code = true;
        self
    }

    /// Returns options with `compilation_for_runtime` set.
    pub fn for_runtime(mut self) -> Self {
        self.compilation_for_runtime = true;
        self
    }
}
