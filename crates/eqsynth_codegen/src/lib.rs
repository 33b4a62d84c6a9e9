//! Renders structural-equality members for a value type.
//!
//! [`synthesize`] is a pure function from a type's namespace, name, and
//! ordered instance members to C# source that makes the type implement
//! `IEquatable<T>` with a consistent `Equals`/`GetHashCode`/`==`/`!=` set.
//! Identical inputs always produce byte-identical text.

#![warn(missing_docs)]

mod synth;
mod writer;

pub use synth::{synthesize, EMPTY_HASH_CODE, GENERATED_HEADER, HASH_COMBINE_MAX_ARITY};
