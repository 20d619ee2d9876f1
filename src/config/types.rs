use crate::matcher::Matcher;
use crate::rules::{
    default_search_engines, KeywordGroupMatch, KeywordGroupRule, ReferrerGroupRule,
    SearchEngineRule,
};
use crate::uri::normalize_domain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default session window: thirty minutes
pub const DEFAULT_SESSION_TIMEOUT_MS: u64 = 1_800_000;

/// Default name of the persisted session blob
pub const DEFAULT_SESSION_NAME: &str = "_tsm";

/// Query parameter names carrying explicit link tags
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryKeys {
    pub medium: String,
    pub source: String,
    pub campaign: String,
    pub keyword: String,
    pub content: String,
}

impl Default for QueryKeys {
    fn default() -> Self {
        Self {
            medium: "utm_medium".to_string(),
            source: "utm_source".to_string(),
            campaign: "utm_campaign".to_string(),
            keyword: "utm_term".to_string(),
            content: "utm_content".to_string(),
        }
    }
}

/// Display names reported as the medium for inferred traffic
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MediumNames {
    pub direct: String,
    pub referral: String,
    pub organic: String,
    pub ppc: String,
}

impl Default for MediumNames {
    fn default() -> Self {
        Self {
            direct: "Direct".to_string(),
            referral: "Referral".to_string(),
            organic: "Search Engine: Organic".to_string(),
            ppc: "Search Engine: PPC".to_string(),
        }
    }
}

/// Rule tables and settings driving classification and session handling
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// The site's own domain; always treated as an ignored referrer
    pub site_domain: String,
    pub keys: QueryKeys,
    /// Search engines, checked in order
    pub search_engines: Vec<SearchEngineRule>,
    /// Custom referrer groups, checked in order
    pub referrer_groups: Vec<ReferrerGroupRule>,
    /// Keyword groups, checked in order
    pub keyword_groups: Vec<KeywordGroupRule>,
    pub keyword_group_match: KeywordGroupMatch,
    pub ignored_referrers: Vec<Matcher>,
    pub ignored_keywords: Vec<Matcher>,
    /// Query parameters whose presence marks search traffic as paid
    pub paid_params: BTreeSet<String>,
    pub mediums: MediumNames,
    pub session_timeout_ms: u64,
    /// Only the first page of a visit reports attribution values
    pub first_page_only: bool,
    /// Key under which the session blob is stored
    pub session_name: String,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self::for_site("")
    }
}

impl AttributionConfig {
    /// Configuration for a site, with its own domain on the ignore list
    pub fn for_site<S: Into<String>>(site_domain: S) -> Self {
        let mut config = Self {
            site_domain: site_domain.into(),
            keys: QueryKeys::default(),
            search_engines: Vec::new(),
            referrer_groups: Vec::new(),
            keyword_groups: Vec::new(),
            keyword_group_match: KeywordGroupMatch::default(),
            ignored_referrers: Vec::new(),
            ignored_keywords: Vec::new(),
            paid_params: BTreeSet::new(),
            mediums: MediumNames::default(),
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT_MS,
            first_page_only: true,
            session_name: DEFAULT_SESSION_NAME.to_string(),
        };
        config.reset_all();
        config
    }

    /// Restore the five tag parameter names
    pub fn reset_keys(&mut self) {
        self.keys = QueryKeys::default();
    }

    /// Restore every setting to its default, keeping the site domain
    pub fn reset_all(&mut self) {
        let site_domain = std::mem::take(&mut self.site_domain);
        *self = Self {
            site_domain,
            keys: QueryKeys::default(),
            search_engines: default_search_engines(),
            referrer_groups: Vec::new(),
            keyword_groups: Vec::new(),
            keyword_group_match: KeywordGroupMatch::default(),
            ignored_referrers: Vec::new(),
            ignored_keywords: Vec::new(),
            paid_params: BTreeSet::new(),
            mediums: MediumNames::default(),
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT_MS,
            first_page_only: true,
            session_name: DEFAULT_SESSION_NAME.to_string(),
        };
        self.ensure_site_ignored();
    }

    /// Change the site domain and add it to the ignored referrers
    pub fn set_site_domain<S: Into<String>>(&mut self, site_domain: S) {
        self.site_domain = site_domain.into();
        self.ensure_site_ignored();
    }

    /// Make sure the site's own domain is on the ignored-referrer list
    pub fn ensure_site_ignored(&mut self) {
        let domain = normalize_domain(&self.site_domain);
        if domain.is_empty() {
            return;
        }
        let already_ignored = self
            .ignored_referrers
            .iter()
            .any(|m| matches!(m, Matcher::Literal(text) if text.eq_ignore_ascii_case(&domain)));
        if !already_ignored {
            self.ignored_referrers.push(Matcher::Literal(domain));
        }
    }

    pub fn session_timeout(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::try_from(self.session_timeout_ms).unwrap_or(i64::MAX))
    }

    pub fn set_session_timeout(&mut self, timeout: std::time::Duration) {
        self.session_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    }

    pub fn add_search_engine(&mut self, rule: SearchEngineRule) {
        self.search_engines.push(rule);
    }

    pub fn add_referrer_group(&mut self, rule: ReferrerGroupRule) {
        self.referrer_groups.push(rule);
    }

    pub fn add_keyword_group(&mut self, rule: KeywordGroupRule) {
        self.keyword_groups.push(rule);
    }

    pub fn add_ignored_referrer<M: Into<Matcher>>(&mut self, matcher: M) {
        self.ignored_referrers.push(matcher.into());
    }

    pub fn add_ignored_keyword<M: Into<Matcher>>(&mut self, matcher: M) {
        self.ignored_keywords.push(matcher.into());
    }

    pub fn add_paid_param<S: Into<String>>(&mut self, name: S) {
        self.paid_params.insert(name.into());
    }

    /// Whether a referring domain is on the ignored-referrer list
    pub fn is_ignored_referrer(&self, referring_domain: &str) -> bool {
        crate::rules::any_domain_match(&self.ignored_referrers, referring_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AttributionConfig::for_site("www.Example.com");
        assert_eq!(config.keys.medium, "utm_medium");
        assert_eq!(config.keys.source, "utm_source");
        assert_eq!(config.keys.campaign, "utm_campaign");
        assert_eq!(config.keys.keyword, "utm_term");
        assert_eq!(config.keys.content, "utm_content");
        assert_eq!(config.mediums.organic, "Search Engine: Organic");
        assert_eq!(config.session_timeout_ms, 1_800_000);
        assert!(config.first_page_only);
        assert_eq!(config.session_name, "_tsm");
        assert!(!config.search_engines.is_empty());
        assert!(config.referrer_groups.is_empty());
        assert!(config.keyword_groups.is_empty());
        assert!(config.ignored_keywords.is_empty());
        assert!(config.paid_params.is_empty());
        assert_eq!(config.ignored_referrers, vec![Matcher::literal("example.com")]);
    }

    #[test]
    fn test_default_without_site_has_no_ignored_referrers() {
        let config = AttributionConfig::default();
        assert!(config.ignored_referrers.is_empty());
        assert!(!config.is_ignored_referrer(""));
    }

    #[test]
    fn test_reset_keys_only_touches_keys() {
        let mut config = AttributionConfig::for_site("example.com");
        config.keys.medium = "med".to_string();
        config.first_page_only = false;
        config.reset_keys();
        assert_eq!(config.keys.medium, "utm_medium");
        assert!(!config.first_page_only);
    }

    #[test]
    fn test_reset_all_restores_defaults_and_keeps_site() {
        let mut config = AttributionConfig::for_site("example.com");
        config.add_paid_param("gclid");
        config.add_ignored_keyword("acme");
        config.search_engines.clear();
        config.mediums.direct = "Typed".to_string();
        config.set_session_timeout(std::time::Duration::from_secs(60));

        config.reset_all();
        assert_eq!(config, AttributionConfig::for_site("example.com"));
    }

    #[test]
    fn test_site_domain_added_once() {
        let mut config = AttributionConfig::for_site("example.com");
        config.set_site_domain("EXAMPLE.com");
        assert_eq!(config.ignored_referrers.len(), 1);
        config.set_site_domain("shop.example.com");
        assert_eq!(config.ignored_referrers.len(), 2);
        assert!(config.is_ignored_referrer("shop.example.com"));
    }

    #[test]
    fn test_session_timeout_conversion() {
        let mut config = AttributionConfig::default();
        assert_eq!(config.session_timeout(), chrono::Duration::minutes(30));
        config.set_session_timeout(std::time::Duration::from_secs(90));
        assert_eq!(config.session_timeout_ms, 90_000);
    }
}
