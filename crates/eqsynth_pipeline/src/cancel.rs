//! Cooperative cancellation of a pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::PassError;

/// A shared flag that aborts a running pass.
///
/// The pipeline checks the flag before starting work on each candidate,
/// never in the middle of one. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every pass observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<(), PassError> {
        if self.is_cancelled() {
            Err(PassError::Cancelled)
        } else {
            Ok(())
        }
    }
}
