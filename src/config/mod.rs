pub mod types;
pub mod loader;
pub mod builder;
pub mod validator;
pub mod templates;

pub use types::{AttributionConfig, MediumNames, QueryKeys, DEFAULT_SESSION_NAME, DEFAULT_SESSION_TIMEOUT_MS};
pub use loader::{ConfigLoader, DefaultConfigLoader};
pub use builder::AttributionConfigBuilder;
pub use validator::ConfigValidatorImpl;
pub use templates::{generate_default_config_template, ensure_config_file_exists};
