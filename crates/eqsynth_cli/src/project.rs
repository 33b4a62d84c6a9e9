//! Shared setup for the CLI commands: locating the project, loading its
//! configuration, and opening the symbol model and cache.

use std::path::{Path, PathBuf};

use eqsynth_cache::CacheStore;
use eqsynth_config::{GeneratorConfig, CONFIG_FILE};
use eqsynth_model::ModelProvider;

use crate::GlobalArgs;

/// Version recorded in persisted caches; a different version discards them.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A located project and its configuration.
pub struct Project {
    /// Directory relative paths in the configuration are resolved against.
    pub root: PathBuf,
    /// The loaded configuration.
    pub config: GeneratorConfig,
}

impl Project {
    /// Locates the project and loads its configuration.
    pub fn open(global: &GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let root = resolve_project_root(global)?;
        let config = eqsynth_config::load_config(&root)?;
        tracing::debug!(root = %root.display(), "loaded configuration");
        Ok(Self { root, config })
    }

    /// Resolves `path` against the project root unless it is absolute.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    /// The configured output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.output.directory)
    }

    /// The persisted cache for this project.
    pub fn cache_store(&self) -> CacheStore {
        CacheStore::new(
            &self.resolve(&self.config.cache.directory),
            TOOL_VERSION,
            &self.config.output.suffix,
        )
    }

    /// Loads a symbol model with the configured marker annotation in scope.
    pub fn load_model(&self, path: &str) -> Result<ModelProvider, Box<dyn std::error::Error>> {
        let mut provider = ModelProvider::load(Path::new(path))?;
        provider.register_annotation(&self.config.marker.qualified_name);
        Ok(provider)
    }
}

/// Resolves the project root directory.
///
/// If `--config` names a file, its parent directory is the root; if it names
/// a directory, that directory is. Otherwise the nearest ancestor of the
/// working directory containing `eqsynth.toml` is used, falling back to the
/// working directory itself.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        let cwd = std::env::current_dir()?;
        Ok(find_project_root(&cwd).unwrap_or(cwd))
    }
}

/// Walks up from `start` looking for a directory containing `eqsynth.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .map(Path::to_path_buf)
}
