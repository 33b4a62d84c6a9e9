//! Generated source units.

use eqsynth_common::ContentHash;

/// A named unit of generated source text.
///
/// Immutable once built; passes share units through `Arc`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GeneratedUnit {
    /// Stable name of the unit, `"{TypeName}{suffix}"`.
    pub output_key: String,
    /// Generated source text.
    pub text: String,
}

impl GeneratedUnit {
    /// Creates a unit for `type_name`, naming it with `suffix`.
    pub fn new(type_name: &str, suffix: &str, text: String) -> Self {
        Self {
            output_key: Self::output_key(type_name, suffix),
            text,
        }
    }

    /// Builds the output key for a type name.
    pub fn output_key(type_name: &str, suffix: &str) -> String {
        format!("{type_name}{suffix}")
    }

    /// Content hash of the generated text.
    pub fn text_hash(&self) -> ContentHash {
        ContentHash::from_bytes(self.text.as_bytes())
    }
}
