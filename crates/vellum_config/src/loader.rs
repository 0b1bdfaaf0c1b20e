//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::VellumConfig;
use std::path::Path;

/// The configuration file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "vellum.toml";

/// Loads and validates `<project_dir>/vellum.toml`.
pub fn load_config(project_dir: &Path) -> Result<VellumConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but a missing file yields the default configuration.
pub fn load_config_or_default(project_dir: &Path) -> Result<VellumConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(VellumConfig::default());
    }
    load_config(project_dir)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<VellumConfig, ConfigError> {
    let config: VellumConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks values serde cannot check on its own.
fn validate_config(config: &VellumConfig) -> Result<(), ConfigError> {
    if config.analysis.extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "analysis.extensions must list at least one extension".to_string(),
        ));
    }
    for ext in &config.analysis.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::ValidationError(format!(
                "invalid extension '{ext}' (write extensions without a leading dot)"
            )));
        }
    }
    Ok(())
}
