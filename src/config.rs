//! # Scheduler configuration.
//!
//! Provides [`SchedulerConfig`], the settings handed to
//! [`Scheduler::new`](crate::Scheduler::new). Configuration is read once at
//! construction; it is not safe to assume changes after that point reach
//! active tasks.
//!
//! ## Sentinel values
//! - `bus_capacity` is clamped to a minimum of 1 by the bus.
//! - `grace = 0s` → shutdown gives the in-flight compile no time to finish.

use std::path::PathBuf;
use std::time::Duration;

/// Settings for one [`Scheduler`](crate::Scheduler) instance.
///
/// ## Field semantics
/// - `working_dir`: directory for diagnostics reports; created on first use
///   if missing (failure to create is reported as an event, not an error)
/// - `report_file`: file name of the diagnostics report inside `working_dir`
/// - `bus_capacity`: event bus ring buffer size
/// - `grace`: how long [`Scheduler::shutdown`](crate::Scheduler::shutdown)
///   waits for an in-flight compile before giving up
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Directory where diagnostics reports are written.
    pub working_dir: PathBuf,

    /// File name of the diagnostics report inside `working_dir`.
    pub report_file: String,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers lagging behind more than this many events observe
    /// `Lagged` and skip older items. Minimum value is 1 (enforced by Bus).
    pub bus_capacity: usize,

    /// Maximum time to wait for the in-flight compile during shutdown.
    pub grace: Duration,
}

impl SchedulerConfig {
    /// Full path of the diagnostics report file.
    pub fn report_path(&self) -> PathBuf {
        self.working_dir.join(&self.report_file)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SchedulerConfig {
    /// Default configuration:
    ///
    /// - `working_dir = <system temp dir>/buildq`
    /// - `report_file = "compile-errors.txt"`
    /// - `bus_capacity = 1024`
    /// - `grace = 30s` (compiles can legitimately take a while)
    fn default() -> Self {
        Self {
            working_dir: std::env::temp_dir().join("buildq"),
            report_file: "compile-errors.txt".to_string(),
            bus_capacity: 1024,
            grace: Duration::from_secs(30),
        }
    }
}
