//! A [`SymbolProvider`] backed by a serialized symbol model.
//!
//! The model is a JSON document listing the annotation types in scope and
//! every type declaration with its annotations and members:
//!
//! ```json
//! {
//!   "annotations": ["RoodFluweel.ValueObjects.ValueObjectAttribute"],
//!   "declarations": [
//!     {
//!       "origin": "src/Foo.cs",
//!       "namespace": "Demo",
//!       "name": "Foo",
//!       "annotations": [{ "name": "ValueObject" }],
//!       "members": [
//!         { "name": "X", "kind": "property" },
//!         { "name": "Y", "kind": "property" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A declaration whose `members` is absent or `null` is one the host could
//! not resolve. Declarations sharing a namespace and name are partial
//! fragments of the same type.

use std::path::Path;

use eqsynth_common::{Ident, Interner};
use serde::{Deserialize, Serialize};

use crate::declaration::{
    AnnotationRef, CandidateDeclaration, DeclarationId, MemberDecl, ResolvedType,
};
use crate::error::ModelError;
use crate::provider::SymbolProvider;

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// The serialized form of a symbol model.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SymbolModel {
    /// Fully qualified names of the annotation types in scope.
    #[serde(default)]
    pub annotations: Vec<String>,
    /// Every type declaration, in source order.
    #[serde(default)]
    pub declarations: Vec<DeclarationModel>,
}

/// One syntactic type declaration in a [`SymbolModel`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeclarationModel {
    /// Where the declaration came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Containing namespace, empty for the global namespace.
    #[serde(default)]
    pub namespace: String,
    /// Simple type name.
    pub name: String,
    /// Annotations written on this fragment.
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
    /// Members declared in this fragment; `None` when unresolvable.
    #[serde(default)]
    pub members: Option<Vec<MemberDecl>>,
}

/// A known annotation type, keyed by its interned qualified name.
struct KnownAnnotation {
    qualified_name: String,
    ident: Ident,
}

impl KnownAnnotation {
    fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

/// Serves declarations from an in-memory [`SymbolModel`].
pub struct ModelProvider {
    model: SymbolModel,
    known: Vec<KnownAnnotation>,
    interner: Interner,
}

impl ModelProvider {
    /// Creates a provider over the given model.
    pub fn new(model: SymbolModel) -> Self {
        let mut provider = Self {
            model: SymbolModel {
                annotations: Vec::new(),
                declarations: model.declarations,
            },
            known: Vec::new(),
            interner: Interner::new(),
        };
        for qualified_name in model.annotations {
            provider.register_annotation(&qualified_name);
        }
        provider
    }

    /// Parses a model from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        let model: SymbolModel =
            serde_json::from_str(content).map_err(|e| ModelError::Parse(e.to_string()))?;
        Ok(Self::new(model))
    }

    /// Reads and parses a model file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Brings an annotation type into scope, as referencing the assembly
    /// that defines it would. Registering a name twice is a no-op.
    pub fn register_annotation(&mut self, qualified_name: &str) -> Ident {
        let ident = self.interner.get_or_intern(qualified_name);
        if !self.known.iter().any(|k| k.ident == ident) {
            self.model.annotations.push(qualified_name.to_string());
            self.known.push(KnownAnnotation {
                qualified_name: qualified_name.to_string(),
                ident,
            });
        }
        ident
    }

    /// Returns the underlying model.
    pub fn model(&self) -> &SymbolModel {
        &self.model
    }

    fn declaration(&self, id: DeclarationId) -> Option<&DeclarationModel> {
        self.model.declarations.get(id.as_raw() as usize)
    }
}

/// The id of the declaration at `index`, if it fits the id space.
/// Declarations past the last representable id are never reported.
fn declaration_id(index: usize) -> Option<DeclarationId> {
    u32::try_from(index).ok().map(DeclarationId::from_raw)
}

/// Returns `true` if `written` names `target`, with or without the
/// `Attribute` suffix.
fn names_match(written: &str, target: &str) -> bool {
    written == target
        || target
            .strip_suffix(ATTRIBUTE_SUFFIX)
            .is_some_and(|bare| bare == written)
}

impl SymbolProvider for ModelProvider {
    fn interner(&self) -> &Interner {
        &self.interner
    }

    fn candidates(&self) -> Vec<CandidateDeclaration> {
        self.model
            .declarations
            .iter()
            .enumerate()
            .map_while(|(index, decl)| Some((declaration_id(index)?, decl)))
            .filter(|(_, decl)| !decl.annotations.is_empty())
            .map(|(id, decl)| CandidateDeclaration {
                id,
                name: decl.name.clone(),
                annotations: decl.annotations.clone(),
                origin: decl.origin.clone(),
            })
            .collect()
    }

    fn resolve_annotation(&self, annotation: &AnnotationRef) -> Option<Ident> {
        let written = annotation.name.as_str();
        if let Some(known) = self
            .known
            .iter()
            .find(|k| names_match(written, &k.qualified_name))
        {
            return Some(known.ident);
        }
        if written.contains('.') {
            return None;
        }

        let mut matching = self
            .known
            .iter()
            .filter(|k| names_match(written, k.simple_name()));
        match (matching.next(), matching.next()) {
            (Some(only), None) => Some(only.ident),
            _ => None,
        }
    }

    fn resolve_type(&self, id: DeclarationId) -> Option<ResolvedType> {
        let decl = self.declaration(id)?;
        let mut members = Vec::new();
        for fragment in self
            .model
            .declarations
            .iter()
            .filter(|d| d.namespace == decl.namespace && d.name == decl.name)
        {
            members.extend(fragment.members.as_ref()?.iter().cloned());
        }
        Some(ResolvedType {
            namespace: decl.namespace.clone(),
            name: decl.name.clone(),
            members,
        })
    }
}
