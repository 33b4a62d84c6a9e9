//! Errors that end a pass.

use eqsynth_common::InternalError;

/// Why a pass produced no output.
///
/// Problems with individual declarations never end a pass; they only cause
/// that declaration to be skipped.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    /// Cancellation was requested before the pass finished.
    #[error("generation pass cancelled")]
    Cancelled,

    /// An internal invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),
}
