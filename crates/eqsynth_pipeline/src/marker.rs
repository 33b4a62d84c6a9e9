//! Deciding whether a declaration asks for equality synthesis.

use eqsynth_common::{Ident, Interner};
use eqsynth_model::{AnnotationRef, SymbolProvider};

/// The identity of the marker annotation: its interned qualified name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MarkerId(Ident);

impl MarkerId {
    /// Returns the underlying identifier.
    pub fn ident(self) -> Ident {
        self.0
    }
}

/// Matches annotations against the marker by resolved identity.
///
/// The marker is resolved once, when the matcher is built. Each annotation
/// is then resolved through the symbol provider and compared by identifier,
/// so an unrelated annotation that happens to share the marker's short name
/// never matches.
#[derive(Clone, Copy, Debug)]
pub struct MarkerMatcher {
    marker: MarkerId,
}

impl MarkerMatcher {
    /// Resolves the marker's qualified name in `interner`.
    ///
    /// `interner` must be the one the provider resolves annotations into.
    pub fn resolve(interner: &Interner, qualified_name: &str) -> Self {
        Self {
            marker: MarkerId(interner.get_or_intern(qualified_name)),
        }
    }

    /// The resolved marker identity.
    pub fn marker(&self) -> MarkerId {
        self.marker
    }

    /// Returns `true` if any annotation resolves to the marker.
    ///
    /// Annotation arguments are ignored, and references the provider cannot
    /// resolve count as non-matches.
    pub fn matches<P>(&self, provider: &P, annotations: &[AnnotationRef]) -> bool
    where
        P: SymbolProvider + ?Sized,
    {
        annotations
            .iter()
            .filter_map(|a| provider.resolve_annotation(a))
            .any(|ident| ident == self.marker.0)
    }
}
