//! Progress observation with panic isolation.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use glossa_core::progress::ProgressUpdate;
use tracing::warn;

/// Single-method capability for receiving progress updates.
///
/// Implementations must not assume updates arrive on any particular thread.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, update: &ProgressUpdate);
}

/// Panic-isolating wrapper around an optional observer.
///
/// The single isolation boundary between untrusted observer code and the
/// generation pipeline: an absent observer is a no-op, and a panicking
/// observer is caught, logged, and suppressed — generation continues.
pub struct SafeObserver {
    inner: Option<Arc<dyn ProgressObserver>>,
}

impl SafeObserver {
    pub fn new(observer: Option<Arc<dyn ProgressObserver>>) -> Self {
        Self { inner: observer }
    }

    /// A no-op observer.
    #[must_use]
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// Deliver one update. Never panics, never fails.
    pub fn notify(&self, update: &ProgressUpdate) {
        let Some(observer) = &self.inner else {
            return;
        };

        let result = catch_unwind(AssertUnwindSafe(|| observer.on_progress(update)));
        if result.is_err() {
            warn!(
                phase = %update.phase,
                progress = update.progress,
                "progress observer panicked; continuing generation"
            );
        }
    }
}
