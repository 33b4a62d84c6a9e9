//! On-disk form of the generation cache.
//!
//! The manifest is stored as `manifest.json` in the cache directory. It
//! records every cached unit together with the inputs it was synthesized
//! from, so a later process can rebuild the index and verify each entry.

use std::path::Path;
use std::sync::Arc;

use eqsynth_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheEntry, GenerationCache};
use crate::error::CacheError;
use crate::key::{StructuralKey, TypeIdentity};
use crate::unit::GeneratedUnit;

/// Name of the manifest file within the cache directory.
const MANIFEST_FILE: &str = "manifest.json";

/// Top-level persisted cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheManifest {
    /// Generator version that produced this cache. Invalidate on change.
    pub tool_version: String,

    /// Output key suffix the units were named with. Invalidate on change.
    pub output_suffix: String,

    /// Cached units, ordered by type identity.
    pub entries: Vec<PersistedEntry>,
}

/// One persisted cache entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedEntry {
    /// Identity of the cached type.
    pub identity: TypeIdentity,
    /// Instance member names in declaration order.
    pub members: Vec<String>,
    /// Structural key recorded at synthesis time.
    pub key: StructuralKey,
    /// Output key of the unit.
    pub output_key: String,
    /// Generated text.
    pub text: String,
    /// Hash of `text`, checked on load.
    pub text_hash: ContentHash,
}

impl PersistedEntry {
    fn from_entry(entry: &CacheEntry) -> Self {
        Self {
            identity: entry.identity.clone(),
            members: entry.members.to_vec(),
            key: entry.key,
            output_key: entry.unit.output_key.clone(),
            text: entry.unit.text.clone(),
            text_hash: entry.unit.text_hash(),
        }
    }

    /// Rebuilds the in-memory entry, or `None` if the recorded key, output
    /// key, or text hash no longer matches the recorded data.
    fn into_entry(self, output_suffix: &str) -> Option<CacheEntry> {
        if StructuralKey::derive(&self.identity, self.members.as_slice()) != self.key {
            return None;
        }
        if self.output_key != GeneratedUnit::output_key(&self.identity.name, output_suffix) {
            return None;
        }
        let unit = GeneratedUnit {
            output_key: self.output_key,
            text: self.text,
        };
        if unit.text_hash() != self.text_hash {
            return None;
        }
        Some(CacheEntry {
            identity: self.identity,
            members: self.members.into(),
            key: self.key,
            unit: Arc::new(unit),
        })
    }
}

impl CacheManifest {
    /// Captures the contents of an in-memory cache.
    pub fn from_cache(cache: &GenerationCache, tool_version: &str, output_suffix: &str) -> Self {
        Self {
            tool_version: tool_version.to_string(),
            output_suffix: output_suffix.to_string(),
            entries: cache.entries().map(PersistedEntry::from_entry).collect(),
        }
    }

    /// Returns `true` if this manifest was written by a compatible generator.
    pub fn is_compatible(&self, tool_version: &str, output_suffix: &str) -> bool {
        self.tool_version == tool_version && self.output_suffix == output_suffix
    }

    /// Rebuilds the in-memory cache, skipping entries that fail verification.
    pub fn into_cache(self) -> GenerationCache {
        let mut cache = GenerationCache::new();
        for persisted in self.entries {
            let identity = persisted.identity.clone();
            let Some(entry) = persisted.into_entry(&self.output_suffix) else {
                tracing::debug!(%identity, "discarding cache entry that failed verification");
                continue;
            };
            if let Err(e) = cache.insert(entry) {
                tracing::debug!(%identity, error = %e, "discarding conflicting cache entry");
            }
        }
        cache
    }

    /// Loads the manifest from the cache directory, returning `None` if
    /// the file doesn't exist or can't be parsed.
    pub fn load(cache_dir: &Path) -> Option<Self> {
        let path = cache_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Saves the manifest to the cache directory, creating it if needed.
    pub fn save(&self, cache_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(cache_dir).map_err(|e| CacheError::Io {
            path: cache_dir.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        let path = cache_dir.join(MANIFEST_FILE);
        std::fs::write(&path, json).map_err(|e| CacheError::Io { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cache() -> GenerationCache {
        let mut cache = GenerationCache::new();
        for (name, members) in [("Foo", vec!["X", "Y"]), ("Empty", vec![])] {
            let identity = TypeIdentity::new("Demo", name);
            let key = StructuralKey::derive(&identity, members.as_slice());
            let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
            cache
                .insert(CacheEntry {
                    unit: Arc::new(GeneratedUnit::new(
                        name,
                        "_ValueObject",
                        format!("// {name}\n"),
                    )),
                    identity,
                    members: members.into(),
                    key,
                })
                .unwrap();
        }
        cache
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = sample_cache();
        CacheManifest::from_cache(&cache, "0.1.0", "_ValueObject")
            .save(dir.path())
            .unwrap();

        let loaded = CacheManifest::load(dir.path()).unwrap();
        assert!(loaded.is_compatible("0.1.0", "_ValueObject"));
        let restored = loaded.into_cache();
        assert_eq!(restored.len(), 2);
        let foo = restored.get(&TypeIdentity::new("Demo", "Foo")).unwrap();
        assert_eq!(foo.members.to_vec(), vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(foo.unit.text, "// Foo\n");
    }

    #[test]
    fn load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CacheManifest::load(dir.path()).is_none());
    }

    #[test]
    fn load_garbage_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "not json").unwrap();
        assert!(CacheManifest::load(dir.path()).is_none());
    }

    #[test]
    fn compatibility_checks_version_and_suffix() {
        let manifest = CacheManifest::from_cache(&sample_cache(), "0.1.0", "_ValueObject");
        assert!(!manifest.is_compatible("0.2.0", "_ValueObject"));
        assert!(!manifest.is_compatible("0.1.0", "_Equality"));
    }

    #[test]
    fn tampered_text_is_discarded() {
        let mut manifest = CacheManifest::from_cache(&sample_cache(), "0.1.0", "_ValueObject");
        manifest.entries[0].text.push_str("tampered");
        let restored = manifest.into_cache();
        assert_eq!(restored.len(), 1);
    }

    #[test]
    fn tampered_members_are_discarded() {
        let mut manifest = CacheManifest::from_cache(&sample_cache(), "0.1.0", "_ValueObject");
        let foo = manifest
            .entries
            .iter_mut()
            .find(|e| e.identity.name == "Foo")
            .unwrap();
        foo.members.push("Z".to_string());
        let restored = manifest.into_cache();
        assert!(restored.get(&TypeIdentity::new("Demo", "Foo")).is_none());
        assert!(restored.get(&TypeIdentity::new("Demo", "Empty")).is_some());
    }

    #[test]
    fn mismatched_output_key_is_discarded() {
        let mut manifest = CacheManifest::from_cache(&sample_cache(), "0.1.0", "_ValueObject");
        let foo = manifest
            .entries
            .iter_mut()
            .find(|e| e.identity.name == "Foo")
            .unwrap();
        foo.output_key = "Bar_ValueObject".to_string();
        let restored = manifest.into_cache();
        assert!(restored.get(&TypeIdentity::new("Demo", "Foo")).is_none());
        assert_eq!(restored.len(), 1);
    }

    #[test]
    fn output_key_from_other_suffix_is_discarded() {
        let mut manifest = CacheManifest::from_cache(&sample_cache(), "0.1.0", "_ValueObject");
        manifest.output_suffix = "_Equality".to_string();
        assert!(manifest.into_cache().is_empty());
    }
}
