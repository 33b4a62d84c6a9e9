//! The kinds of problem a pass can report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies why a declaration was skipped.
///
/// Every code is a warning: skipping a declaration never fails a pass.
/// Codes render as `W` followed by a three-digit number and are stable
/// across releases.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// `W001`: a marked declaration's members could not be resolved.
    UnresolvedCandidate,
    /// `W002`: another type already produces the same output key.
    OutputKeyConflict,
}

impl DiagnosticCode {
    /// The rendered form, e.g. `W001`.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnresolvedCandidate => "W001",
            DiagnosticCode::OutputKeyConflict => "W002",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_codes() {
        assert_eq!(DiagnosticCode::UnresolvedCandidate.to_string(), "W001");
        assert_eq!(DiagnosticCode::OutputKeyConflict.to_string(), "W002");
    }

    #[test]
    fn serialized_by_name() {
        let json = serde_json::to_string(&DiagnosticCode::OutputKeyConflict).unwrap();
        assert_eq!(json, "\"OutputKeyConflict\"");
    }
}
