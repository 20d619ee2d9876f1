use crate::config::types::AttributionConfig;
use crate::error::{AttributionError, Result};
use crate::traits::ConfigValidator;
use std::path::Path;

/// Configuration validator implementation
///
/// The engine never validates its tables; hosts that load rules from
/// files run this to catch entries that could never match.
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = AttributionConfig;

    fn validate(&self, config: &AttributionConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }
}

fn reject(message: String) -> Result<()> {
    tracing::warn!("{}", message);
    Err(AttributionError::invalid_config(message))
}

impl ConfigValidatorImpl {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validation with the config source named in error messages
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &AttributionConfig,
        config_path: P,
    ) -> Result<()> {
        let source = config_path.as_ref().to_string_lossy();

        let keys = [
            ("medium", &config.keys.medium),
            ("source", &config.keys.source),
            ("campaign", &config.keys.campaign),
            ("keyword", &config.keys.keyword),
            ("content", &config.keys.content),
        ];
        for (field, key) in keys {
            if key.is_empty() {
                return reject(format!("Query key for {} is empty in {}", field, source));
            }
        }

        for (index, rule) in config.search_engines.iter().enumerate() {
            if rule.domain_fragment.is_empty() {
                return reject(format!(
                    "Search engine #{} in {} has an empty domain_fragment",
                    index + 1,
                    source
                ));
            }
            if rule.display_name.is_empty() {
                return reject(format!(
                    "Search engine '{}' in {} has an empty display_name",
                    rule.domain_fragment, source
                ));
            }
            if rule.keyword_params.is_empty() {
                return reject(format!(
                    "Search engine '{}' in {} lists no keyword_params",
                    rule.domain_fragment, source
                ));
            }
        }

        for (index, rule) in config.referrer_groups.iter().enumerate() {
            if rule.domain_matchers.is_empty() || rule.domain_matchers.iter().all(|m| m.is_blank()) {
                return reject(format!(
                    "Referrer group #{} in {} has no domain matchers",
                    index + 1,
                    source
                ));
            }
            if rule.medium.is_empty() {
                return reject(format!(
                    "Referrer group #{} in {} has an empty medium",
                    index + 1,
                    source
                ));
            }
        }

        for rule in &config.keyword_groups {
            if rule.group_name.is_empty() {
                return reject(format!(
                    "Keyword group for '{}' in {} has an empty group_name",
                    rule.matcher.as_str(),
                    source
                ));
            }
        }

        let mediums = [
            ("direct", &config.mediums.direct),
            ("referral", &config.mediums.referral),
            ("organic", &config.mediums.organic),
            ("ppc", &config.mediums.ppc),
        ];
        for (field, name) in mediums {
            if name.is_empty() {
                return reject(format!("Medium name for {} is empty in {}", field, source));
            }
        }

        if config.session_timeout_ms == 0 {
            return reject(format!("session_timeout_ms must be positive in {}", source));
        }

        if config.session_name.is_empty() {
            return reject(format!("session_name is empty in {}", source));
        }

        Ok(())
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}
