//! Content hashing for cache invalidation and incremental generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit content hash computed using XXH3.
///
/// Two inputs with the same `ContentHash` are assumed to be identical. Used
/// to derive structural keys for type descriptors and to verify persisted
/// generated text.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// Incremental builder for a [`ContentHash`] over a sequence of fields.
///
/// Every field is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` hash
/// differently.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Creates a hasher with an empty state.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds one length-prefixed string field.
    pub fn field(&mut self, value: &str) -> &mut Self {
        self.state.update(&(value.len() as u64).to_le_bytes());
        self.state.update(value.as_bytes());
        self
    }

    /// Feeds a length-prefixed sequence of string fields.
    pub fn fields<'a>(&mut self, values: impl IntoIterator<Item = &'a str>) -> &mut Self {
        let values: Vec<&str> = values.into_iter().collect();
        self.state.update(&(values.len() as u64).to_le_bytes());
        for value in values {
            self.field(value);
        }
        self
    }

    /// Returns the hash of everything fed so far.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128().to_le_bytes())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::from_bytes(b"hello world");
        let b = ContentHash::from_bytes(b"hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let a = ContentHash::from_bytes(b"hello");
        let b = ContentHash::from_bytes(b"world");
        assert_ne!(a, b);
    }

    #[test]
    fn display_format() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h}");
        assert_eq!(s.len(), 32, "Display should be 32 hex chars");
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn debug_abbreviated() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h:?}");
        assert!(s.starts_with("ContentHash("));
        assert!(s.ends_with(")"));
    }

    #[test]
    fn hasher_fields_are_length_prefixed() {
        let a = ContentHasher::new().fields(["ab", "c"]).finish();
        let b = ContentHasher::new().fields(["a", "bc"]).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn hasher_field_order_matters() {
        let a = ContentHasher::new().fields(["X", "Y"]).finish();
        let b = ContentHasher::new().fields(["Y", "X"]).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn hasher_empty_sequence_differs_from_empty_field() {
        let a = ContentHasher::new().fields(std::iter::empty()).finish();
        let b = ContentHasher::new().fields([""]).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn hasher_deterministic() {
        let a = ContentHasher::new().field("Demo").field("Foo").finish();
        let b = ContentHasher::new().field("Demo").field("Foo").finish();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::from_bytes(b"serde test");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
