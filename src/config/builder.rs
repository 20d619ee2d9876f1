use crate::config::types::AttributionConfig;
use crate::error::Result;
use crate::matcher::Matcher;
use crate::rules::{KeywordGroupMatch, KeywordGroupRule, ReferrerGroupRule, SearchEngineRule};

/// Builder for AttributionConfig to improve API ergonomics
pub struct AttributionConfigBuilder {
    config: AttributionConfig,
}

impl AttributionConfigBuilder {
    /// Create a new config builder with default tables
    pub fn new() -> Self {
        Self {
            config: AttributionConfig::default(),
        }
    }

    /// Set the site's own domain
    #[must_use]
    pub fn site_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.config.set_site_domain(domain);
        self
    }

    /// Override the tag parameter names
    pub fn query_keys<S: Into<String>>(
        mut self,
        medium: S,
        source: S,
        campaign: S,
        keyword: S,
        content: S,
    ) -> Self {
        self.config.keys.medium = medium.into();
        self.config.keys.source = source.into();
        self.config.keys.campaign = campaign.into();
        self.config.keys.keyword = keyword.into();
        self.config.keys.content = content.into();
        self
    }

    /// Append a search engine after the built-in ones
    pub fn search_engine(mut self, rule: SearchEngineRule) -> Self {
        self.config.add_search_engine(rule);
        self
    }

    /// Replace the whole search engine table
    pub fn search_engines(mut self, rules: Vec<SearchEngineRule>) -> Self {
        self.config.search_engines = rules;
        self
    }

    pub fn referrer_group(mut self, rule: ReferrerGroupRule) -> Self {
        self.config.add_referrer_group(rule);
        self
    }

    pub fn keyword_group(mut self, rule: KeywordGroupRule) -> Self {
        self.config.add_keyword_group(rule);
        self
    }

    pub fn keyword_group_match(mut self, mode: KeywordGroupMatch) -> Self {
        self.config.keyword_group_match = mode;
        self
    }

    pub fn ignored_referrer<M: Into<Matcher>>(mut self, matcher: M) -> Self {
        self.config.add_ignored_referrer(matcher);
        self
    }

    pub fn ignored_keyword<M: Into<Matcher>>(mut self, matcher: M) -> Self {
        self.config.add_ignored_keyword(matcher);
        self
    }

    pub fn paid_param<S: Into<String>>(mut self, name: S) -> Self {
        self.config.add_paid_param(name);
        self
    }

    /// Set the four medium display names
    pub fn medium_names<S: Into<String>>(mut self, direct: S, referral: S, organic: S, ppc: S) -> Self {
        self.config.mediums.direct = direct.into();
        self.config.mediums.referral = referral.into();
        self.config.mediums.organic = organic.into();
        self.config.mediums.ppc = ppc.into();
        self
    }

    pub fn session_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.set_session_timeout(timeout);
        self
    }

    pub fn first_page_only(mut self, enabled: bool) -> Self {
        self.config.first_page_only = enabled;
        self
    }

    pub fn session_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.session_name = name.into();
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    /// Returns an error if a rule table entry could never match or a
    /// required name is empty
    pub fn build(self) -> Result<AttributionConfig> {
        use crate::config::validator::ConfigValidatorImpl;
        use crate::traits::ConfigValidator;
        ConfigValidatorImpl.validate(&self.config)?;

        Ok(self.config)
    }
}

impl Default for AttributionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
