//! # Exclusion for artifact writes.
//!
//! On at least one target platform, writing a compiled artifact while a modal
//! open/save dialog is displayed crashes the host application. Artifact
//! persistence must therefore be serialized against that externally-owned
//! resource, and *only* that step, so the queue lock is never held across
//! slow I/O.
//!
//! [`ArtifactLock`] is a cloneable handle to one shared mutex. The
//! [`Scheduler`](crate::Scheduler) creates one and exposes it via
//! [`Scheduler::artifact_lock`](crate::Scheduler::artifact_lock); whatever
//! component owns the dialog holds a clone and acquires it around showing the
//! dialog, while [`Compiler`](crate::Compiler) implementations acquire it
//! around writing the output file.
//!
//! ## Example
//! ```no_run
//! use buildq::ArtifactLock;
//!
//! # async fn demo() {
//! let lock = ArtifactLock::new();
//! let dialog_side = lock.clone();
//!
//! let _guard = lock.acquire().await;
//! // ...write the artifact; the dialog side is blocked out meanwhile...
//! # drop(dialog_side);
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Cloneable handle to the artifact-write exclusion.
///
/// All clones share the same underlying mutex.
#[derive(Clone, Debug, Default)]
pub struct ArtifactLock {
    inner: Arc<Mutex<()>>,
}

/// Guard proving exclusive access; released on drop.
pub struct ArtifactGuard<'a> {
    _permit: MutexGuard<'a, ()>,
}

impl ArtifactLock {
    /// Creates a fresh, unheld lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the exclusion, waiting if the other side holds it.
    pub async fn acquire(&self) -> ArtifactGuard<'_> {
        ArtifactGuard {
            _permit: self.inner.lock().await,
        }
    }

    /// Acquires the exclusion from synchronous code (e.g. the UI thread
    /// about to show a file dialog).
    ///
    /// Must not be called from within an async context; use
    /// [`acquire`](Self::acquire) there instead.
    pub fn blocking_acquire(&self) -> ArtifactGuard<'_> {
        ArtifactGuard {
            _permit: self.inner.blocking_lock(),
        }
    }
}
