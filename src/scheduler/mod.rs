//! Scheduler core: queue bookkeeping and the worker loop.
//!
//! The only public API from this module is [`Scheduler`]. Internal modules:
//! - [`queue`]: pending queue, current slot and admission set behind one lock;
//! - [`worker`]: the eligibility-scanning execution loop;
//! - [`report`]: diagnostics report file for failed compiles.

mod core;
mod queue;
mod report;
mod worker;

pub use self::core::Scheduler;

pub(crate) use self::core::Shared;
