//! # Stable scope identity.
//!
//! A [`ScopeId`] names the logical unit a compile task belongs to: an editor
//! scene, a document, an extension. The scheduler only ever *compares* scope
//! ids (for dedup, admission control and cancellation); it never resolves
//! them back to the owning object and holds no reference to its lifetime.
//!
//! Ids are cheap to clone and hashable, so callers can mint one per scope at
//! creation time and hand copies to every task for that scope.

use std::fmt;
use std::sync::Arc;

/// Opaque, comparable identity of a logical scope.
///
/// Equality is by name. The id carries no reference to the scope object
/// itself, so comparisons stay valid regardless of what happens to the scope
/// after submission.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(Arc<str>);

impl ScopeId {
    /// Creates a scope id from a stable name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the scope name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScopeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ScopeId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
