//! A warning about one skipped declaration.

use crate::code::DiagnosticCode;
use serde::{Deserialize, Serialize};

/// A structured warning.
///
/// Declarations come from an external symbol provider, so a diagnostic
/// points at the declaration's origin (usually a file path) rather than at a
/// byte span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Why the declaration was skipped.
    pub code: DiagnosticCode,
    /// One-line description naming the declaration.
    pub message: String,
    /// Where the declaration came from, if known.
    pub origin: Option<String>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Suggested fixes.
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with no origin, notes or help.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            origin: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Sets where the declaration came from.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
