//! Type descriptors: the synthesis input for one type.

use std::sync::Arc;

use eqsynth_cache::{StructuralKey, TypeIdentity};
use eqsynth_model::ResolvedType;

use crate::extract::extract_members;

/// Everything synthesis needs to know about one type.
///
/// The structural key is computed once at construction. Descriptors are
/// immutable; clones share the member list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    identity: TypeIdentity,
    members: Arc<[String]>,
    key: StructuralKey,
}

impl TypeDescriptor {
    /// Creates a descriptor from an identity and its instance members.
    pub fn new(identity: TypeIdentity, members: Vec<String>) -> Self {
        let key = StructuralKey::derive(&identity, members.as_slice());
        Self {
            identity,
            members: members.into(),
            key,
        }
    }

    /// Builds the descriptor of a resolved type.
    pub fn from_resolved(ty: &ResolvedType) -> Self {
        Self::new(
            TypeIdentity::new(ty.namespace.as_str(), ty.name.as_str()),
            extract_members(ty),
        )
    }

    /// The type's identity.
    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    /// Instance member names in declaration order.
    pub fn members(&self) -> &Arc<[String]> {
        &self.members
    }

    /// The structural key.
    pub fn key(&self) -> StructuralKey {
        self.key
    }
}
