//! Declarations, annotations, and members as seen through a symbol provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-assigned handle for one syntactic type declaration.
///
/// A type declared across several partial fragments has one id per fragment.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct DeclarationId(u32);

impl DeclarationId {
    /// Creates a `DeclarationId` from a raw index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this id.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An annotation as written on a declaration, e.g. `[ValueObject]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRef {
    /// The name as written: a short name (`ValueObject`), a short name with
    /// the `Attribute` suffix, or a fully qualified name.
    pub name: String,
    /// Argument expressions as written. Never consulted when matching.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl AnnotationRef {
    /// Creates an annotation reference without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }
}

/// The kind of a member declared inside a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// A field.
    Field,
    /// A property.
    Property,
    /// A method.
    Method,
    /// A constructor.
    Constructor,
    /// An event.
    Event,
    /// A type nested inside the declaring type.
    NestedType,
}

impl MemberKind {
    /// Returns `true` for members that carry per-instance data when not static.
    pub fn carries_data(self) -> bool {
        matches!(self, MemberKind::Field | MemberKind::Property)
    }
}

/// One member of a resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    /// The member's name, verbatim.
    pub name: String,
    /// What kind of member this is.
    pub kind: MemberKind,
    /// Whether the member is static (shared by all instances).
    #[serde(default)]
    pub is_static: bool,
}

impl MemberDecl {
    /// An instance property.
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            is_static: false,
        }
    }

    /// An instance field.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            is_static: false,
        }
    }

    /// A method.
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            is_static: false,
        }
    }

    /// Marks the member static.
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A fully resolved type: its namespace, name, and every member of every
/// partial fragment in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType {
    /// Containing namespace, empty for the global namespace.
    pub namespace: String,
    /// Simple type name.
    pub name: String,
    /// All members in declaration order.
    pub members: Vec<MemberDecl>,
}

/// A syntactic type declaration carrying at least one annotation.
///
/// Created fresh for every pass and discarded once resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateDeclaration {
    /// Handle used to resolve the declaration through its provider.
    pub id: DeclarationId,
    /// The declared type name as written, for reporting.
    pub name: String,
    /// Annotations written on this declaration.
    pub annotations: Vec<AnnotationRef>,
    /// Where the declaration came from, usually a file path.
    pub origin: Option<String>,
}
