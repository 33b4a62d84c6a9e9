//! Configuration types deserialized from `eqsynth.toml`.

use serde::Deserialize;

/// Suffix every annotation type name may carry, as in `ValueObjectAttribute`.
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// The top-level generator configuration parsed from `eqsynth.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Which annotation marks a type for equality synthesis.
    #[serde(default)]
    pub marker: MarkerConfig,
    /// Naming and placement of generated units.
    #[serde(default)]
    pub output: OutputConfig,
    /// Pipeline execution settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Persisted cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Identity of the marker annotation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerConfig {
    /// Short name as written at use sites, e.g. `ValueObject`.
    #[serde(default = "default_marker_short_name")]
    pub short_name: String,
    /// Fully qualified name of the annotation type.
    #[serde(default = "default_marker_qualified_name")]
    pub qualified_name: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            short_name: default_marker_short_name(),
            qualified_name: default_marker_qualified_name(),
        }
    }
}

fn default_marker_short_name() -> String {
    "ValueObject".to_string()
}

fn default_marker_qualified_name() -> String {
    "RoodFluweel.ValueObjects.ValueObjectAttribute".to_string()
}

/// Naming and placement of generated units.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Appended to the type name to form the output key.
    #[serde(default = "default_output_suffix")]
    pub suffix: String,
    /// File extension used by directory sinks.
    #[serde(default = "default_output_extension")]
    pub extension: String,
    /// Directory generated files are written to, relative to the project.
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_output_suffix(),
            extension: default_output_extension(),
            directory: default_output_directory(),
        }
    }
}

fn default_output_suffix() -> String {
    "_ValueObject".to_string()
}

fn default_output_extension() -> String {
    "g.cs".to_string()
}

fn default_output_directory() -> String {
    "generated".to_string()
}

/// How per-candidate work is scheduled within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStrategy {
    /// One candidate after another on the calling thread.
    Sequential,
    /// Candidates fanned out over the rayon thread pool.
    #[default]
    Parallel,
}

/// Pipeline execution settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Execution strategy for a pass.
    #[serde(default)]
    pub strategy: ExecutionStrategy,
    /// Emit a warning for each marked declaration that had to be skipped.
    #[serde(default)]
    pub report_dropped: bool,
}

/// Persisted cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Whether passes load and save the cache between invocations.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cache directory, relative to the project.
    #[serde(default = "default_cache_directory")]
    pub directory: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: default_cache_directory(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_directory() -> String {
    ".eqsynth".to_string()
}
