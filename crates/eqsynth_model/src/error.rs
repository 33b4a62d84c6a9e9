//! Error types for loading symbol models.

use std::path::PathBuf;

/// Errors that can occur when loading a JSON symbol model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("failed to read symbol model {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The model was not valid JSON or did not match the expected shape.
    #[error("failed to parse symbol model: {0}")]
    Parse(String),
}
