use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for attribution configuration operations
pub type Result<T> = std::result::Result<T, AttributionError>;

/// Errors raised while loading or validating attribution configuration.
///
/// Classification itself never fails; these only surface at the
/// configuration boundary.
#[derive(Debug, Error)]
pub enum AttributionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration JSON error: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid matcher pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl AttributionError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new invalid pattern error
    pub fn invalid_pattern<S: Into<String>>(pattern: S, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
