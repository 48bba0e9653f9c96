//! # Compile task model.
//!
//! This module provides the task-related types:
//! - [`CompileTask`] - one immutable compile request
//! - [`CompileOptions`] - named flags forwarded to the backend
//! - [`ScopeId`] - stable identity of the logical unit a task belongs to
//! - [`Hook`] / [`HookFn`] / [`HookRef`] - optional pre/post task steps

mod hook;
mod options;
mod scope;
mod task;

pub use hook::{Hook, HookFn, HookRef};
pub use options::CompileOptions;
pub use scope::ScopeId;
pub use task::CompileTask;
