//! The symbol model consumed by the equality generator.
//!
//! Parsing source text and resolving annotations is the job of a host
//! environment. This crate defines the narrow view of that environment the
//! generator needs, the [`SymbolProvider`] trait, together with the
//! declaration types it hands out. [`ModelProvider`] implements the trait
//! over a JSON symbol model so the generator can run outside of a compiler
//! host and in tests.

#![warn(missing_docs)]

pub mod declaration;
pub mod error;
pub mod model;
pub mod provider;

pub use declaration::{
    AnnotationRef, CandidateDeclaration, DeclarationId, MemberDecl, MemberKind, ResolvedType,
};
pub use error::ModelError;
pub use model::{DeclarationModel, ModelProvider, SymbolModel};
pub use provider::SymbolProvider;
