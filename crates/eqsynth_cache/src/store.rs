//! Loading and saving the generation cache between invocations.

use std::path::{Path, PathBuf};

use crate::cache::GenerationCache;
use crate::error::CacheError;
use crate::manifest::CacheManifest;

/// A cache directory bound to one generator version and output suffix.
///
/// All reads are fail-safe: a missing, damaged, or incompatible manifest
/// loads as an empty cache, which only costs a full regeneration.
pub struct CacheStore {
    cache_dir: PathBuf,
    tool_version: String,
    output_suffix: String,
}

impl CacheStore {
    /// Creates a store rooted at `cache_dir`.
    pub fn new(cache_dir: &Path, tool_version: &str, output_suffix: &str) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            tool_version: tool_version.to_string(),
            output_suffix: output_suffix.to_string(),
        }
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Loads the persisted cache, or an empty one.
    pub fn load(&self) -> GenerationCache {
        match CacheManifest::load(&self.cache_dir) {
            Some(m) if m.is_compatible(&self.tool_version, &self.output_suffix) => m.into_cache(),
            Some(_) => {
                tracing::debug!(dir = %self.cache_dir.display(), "ignoring incompatible cache");
                GenerationCache::new()
            }
            None => GenerationCache::new(),
        }
    }

    /// Persists `cache`, replacing whatever was stored before.
    pub fn save(&self, cache: &GenerationCache) -> Result<(), CacheError> {
        CacheManifest::from_cache(cache, &self.tool_version, &self.output_suffix)
            .save(&self.cache_dir)
    }

    /// Deletes the cache directory. Returns `false` if there was nothing to delete.
    pub fn clear(&self) -> Result<bool, CacheError> {
        if !self.cache_dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&self.cache_dir).map_err(|e| CacheError::Io {
            path: self.cache_dir.clone(),
            source: e,
        })?;
        Ok(true)
    }
}
