//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{GeneratorConfig, ATTRIBUTE_SUFFIX};
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "eqsynth.toml";

/// Loads and validates an `eqsynth.toml` configuration from a project directory.
///
/// A missing file yields the default configuration; any other read failure
/// is an error.
pub fn load_config(project_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    match std::fs::read_to_string(&config_path) {
        Ok(content) => load_config_from_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(GeneratorConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parses and validates an `eqsynth.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are consistent.
fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    let marker = &config.marker;
    if marker.short_name.is_empty() {
        return Err(ConfigError::MissingField("marker.short_name".to_string()));
    }
    if marker.qualified_name.is_empty() {
        return Err(ConfigError::MissingField("marker.qualified_name".to_string()));
    }

    let simple_name = marker
        .qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(&marker.qualified_name);
    let bare = simple_name.strip_suffix(ATTRIBUTE_SUFFIX).unwrap_or(simple_name);
    let short = marker
        .short_name
        .strip_suffix(ATTRIBUTE_SUFFIX)
        .unwrap_or(&marker.short_name);
    if bare != short {
        return Err(ConfigError::ValidationError(format!(
            "marker.qualified_name '{}' does not name marker '{}'",
            marker.qualified_name, marker.short_name
        )));
    }

    if config.output.suffix.is_empty() {
        return Err(ConfigError::MissingField("output.suffix".to_string()));
    }
    if config.output.suffix.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError(format!(
            "output.suffix '{}' must not contain path separators",
            config.output.suffix
        )));
    }
    Ok(())
}
