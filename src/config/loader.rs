use crate::config::types::AttributionConfig;
use crate::error::{AttributionError, Result};
use std::path::Path;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AttributionConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<AttributionConfig>;
}

/// Default configuration loader implementation
///
/// Reads TOML by default and JSON when the file ends in `.json`.
pub struct DefaultConfigLoader;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse(path: &Path, content: &str) -> Result<AttributionConfig> {
    let mut config: AttributionConfig = if is_json(path) {
        serde_json::from_str(content)?
    } else {
        toml::from_str(content)?
    };
    config.ensure_site_ignored();
    Ok(config)
}

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from an attribution.toml (or .json) file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AttributionConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| {
            AttributionError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        })?;

        parse(path, &content)
    }

    /// Load configuration, then run the validator with the file as context
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<AttributionConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(AttributionError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(AttributionError::Io)?;

        let config = parse(path_ref, &content).map_err(|e| {
            AttributionError::invalid_config(format!(
                "Failed to parse {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        crate::config::validator::ConfigValidatorImpl::new()
            .validate_with_context(&config, path_ref)?;

        tracing::debug!(
            path = %path_ref.display(),
            search_engines = config.search_engines.len(),
            referrer_groups = config.referrer_groups.len(),
            keyword_groups = config.keyword_groups.len(),
            "loaded attribution configuration"
        );
        Ok(config)
    }
}

// Convenience functions maintaining the API
impl AttributionConfig {
    /// Create a new config builder
    pub fn builder() -> crate::config::builder::AttributionConfigBuilder {
        crate::config::builder::AttributionConfigBuilder::new()
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.ensure_site_ignored();
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load configuration with validation and enhanced error context
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }
}
