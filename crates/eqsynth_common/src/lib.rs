//! Shared foundational types used across the eqsynth workspace.
//!
//! This crate provides interned identifiers, content hashing for cache keys,
//! and the internal error type used to signal broken invariants.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod result;

pub use hash::{ContentHash, ContentHasher};
pub use ident::{Ident, Interner};
pub use result::{EqResult, InternalError};
