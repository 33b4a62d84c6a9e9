//! Type identities and the structural keys derived from them.

use std::fmt;

use eqsynth_common::{ContentHash, ContentHasher};
use serde::{Deserialize, Serialize};

/// The identity of a type: its namespace and simple name.
///
/// Unique per distinct underlying type within a pass, however many partial
/// declarations the type is spread over.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct TypeIdentity {
    /// Containing namespace, empty for the global namespace.
    pub namespace: String,
    /// Simple type name.
    pub name: String,
}

impl TypeIdentity {
    /// Creates an identity.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

/// Hash of everything synthesis depends on: namespace, type name, and the
/// ordered instance member names.
///
/// Equal keys mean a previously generated unit can be reused as-is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct StructuralKey(ContentHash);

impl StructuralKey {
    /// Derives the key for a type with the given members.
    pub fn derive<S: AsRef<str>>(identity: &TypeIdentity, members: &[S]) -> Self {
        let hash = ContentHasher::new()
            .field(&identity.namespace)
            .field(&identity.name)
            .fields(members.iter().map(AsRef::as_ref))
            .finish();
        Self(hash)
    }

    /// Returns the underlying content hash.
    pub fn hash(self) -> ContentHash {
        self.0
    }
}

impl fmt::Display for StructuralKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
