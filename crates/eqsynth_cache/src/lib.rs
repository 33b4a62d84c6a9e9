//! Incremental generation cache.
//!
//! Generated units are cached under the [`StructuralKey`] of the type they
//! were synthesized from. A later pass that derives the same key reuses the
//! cached unit instead of synthesizing it again. The cache can be persisted
//! between process invocations through a [`CacheStore`].

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod key;
pub mod manifest;
pub mod store;
pub mod unit;

pub use cache::{CacheEntry, GenerationCache};
pub use error::CacheError;
pub use key::{StructuralKey, TypeIdentity};
pub use manifest::{CacheManifest, PersistedEntry};
pub use store::CacheStore;
pub use unit::GeneratedUnit;
