//! The interface the generator consumes from its host environment.

use eqsynth_common::{Ident, Interner};

use crate::declaration::{AnnotationRef, CandidateDeclaration, DeclarationId, ResolvedType};

/// A host environment that parses source into declarations and resolves them.
///
/// Implementations must be safe to share across threads: a pass may resolve
/// several candidates concurrently.
pub trait SymbolProvider: Sync {
    /// The interner every [`Ident`] handed out by this provider belongs to.
    fn interner(&self) -> &Interner;

    /// Every type declaration carrying at least one annotation.
    fn candidates(&self) -> Vec<CandidateDeclaration>;

    /// Resolves an annotation as written to the interned fully qualified name
    /// of its annotation type.
    ///
    /// Returns `None` when the reference is unknown or ambiguous.
    fn resolve_annotation(&self, annotation: &AnnotationRef) -> Option<Ident>;

    /// Resolves a declaration to its type, merging partial fragments.
    ///
    /// Returns `None` when no member information can be produced.
    fn resolve_type(&self, id: DeclarationId) -> Option<ResolvedType>;
}
