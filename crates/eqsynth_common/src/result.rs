//! Common result and error types for the eqsynth workspace.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates a broken internal invariant (a bug in eqsynth), never a
/// problem with the user's declarations. Problems with individual
/// declarations are isolated per candidate and never surface as an `Err`.
pub type EqResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in eqsynth, not a user input problem.
///
/// Raised for conditions that a correct implementation can never reach, such
/// as two distinct types deriving the same structural key.
#[derive(Debug, thiserror::Error)]
#[error("internal generator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
