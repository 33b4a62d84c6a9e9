//! Per-pass bookkeeping.

use eqsynth_cache::TypeIdentity;
use eqsynth_model::DeclarationId;

/// What a pass did with its candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Annotated declarations the provider reported.
    pub candidates: usize,
    /// Candidates without the marker annotation.
    pub unmatched: usize,
    /// Marked candidates whose members could not be resolved.
    pub unresolved: Vec<DeclarationId>,
    /// Marked candidates folded into another candidate of the same type.
    pub duplicates: usize,
    /// Types skipped because another type already claimed their output key.
    pub conflicts: Vec<TypeIdentity>,
    /// Types whose unit was reused from the previous cache.
    pub reused: usize,
    /// Types whose unit was synthesized in this pass.
    pub synthesized: usize,
    /// Types cached by the previous pass that no longer exist.
    pub evicted: Vec<TypeIdentity>,
}

impl PassReport {
    /// Number of units the pass produced.
    pub fn units(&self) -> usize {
        self.reused + self.synthesized
    }
}
