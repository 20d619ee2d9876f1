//! Classification of a visit into an attribution record
//!
//! Precedence, first decisive step wins:
//!
//! 1. explicit link tags (medium and source both present)
//! 2. no referrer: direct
//! 3. search engine table
//! 4. ignored referrers, then referrer groups
//! 5. generic referral

use crate::config::AttributionConfig;
use crate::rules::{any_keyword_match, find_referrer_group, find_search_engine, resolve_keyword_group, SearchEngineRule};
use crate::template;
use crate::traits::QuerySource;
use crate::types::{AttributionRecord, BRAND_KEYWORD_GROUP, NO_SOURCE};
use crate::uri::{domain_of, path_of};

/// Stateless classifier applying the configured rule tables
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationEngine;

impl ClassificationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Classify the current request.
    ///
    /// Pure function of the query parameters, the referrer and the
    /// configuration. Never fails; missing input degrades to defaults.
    pub fn classify<Q: QuerySource + ?Sized>(
        &self,
        query: &Q,
        referrer: &str,
        config: &AttributionConfig,
    ) -> AttributionRecord {
        let mut record = AttributionRecord {
            medium: query.query_param(&config.keys.medium),
            source: query.query_param(&config.keys.source),
            campaign: query.query_param(&config.keys.campaign),
            content: query.query_param(&config.keys.content),
            keyword: query.query_param(&config.keys.keyword),
            keyword_group: String::new(),
            referring_domain: domain_of(referrer),
            referring_path: path_of(referrer),
        };

        if record.is_classified() {
            tracing::debug!(
                medium = %record.medium,
                source = %record.source,
                "tagged link, rule tables skipped"
            );
            return record;
        }

        record.clear_classification();

        // A referrer without a usable domain counts as no referrer
        if referrer.is_empty() || record.referring_domain.is_empty() {
            record.medium = config.mediums.direct.clone();
            record.source = NO_SOURCE.to_string();
            tracing::debug!("no referrer, classified as direct");
            return record;
        }

        if self.classify_search_engine(query, referrer, config, &mut record) {
            return record;
        }

        if self.classify_referrer_group(config, &mut record) {
            return record;
        }

        record.medium = config.mediums.referral.clone();
        record.source = record.referring_domain.clone();
        tracing::debug!(domain = %record.referring_domain, "classified as generic referral");
        record
    }

    /// Search engine step; true when an engine claimed the referrer
    fn classify_search_engine<Q: QuerySource + ?Sized>(
        &self,
        query: &Q,
        referrer: &str,
        config: &AttributionConfig,
        record: &mut AttributionRecord,
    ) -> bool {
        let Some(rule) = find_search_engine(&config.search_engines, &record.referring_domain) else {
            return false;
        };

        let paid = self.is_paid(query, referrer, config);
        record.medium = if paid {
            config.mediums.ppc.clone()
        } else {
            config.mediums.organic.clone()
        };
        record.source = rule.display_name.clone();
        record.keyword = self.search_keyword(query, referrer, rule);

        if !paid && any_keyword_match(&config.ignored_keywords, &record.keyword) {
            record.medium = config.mediums.direct.clone();
            record.keyword_group = BRAND_KEYWORD_GROUP.to_string();
            tracing::debug!(keyword = %record.keyword, "ignored keyword, reported as brand traffic");
            return true;
        }

        if let Some(group) = resolve_keyword_group(
            &config.keyword_groups,
            &record.keyword,
            config.keyword_group_match,
        ) {
            record.keyword_group = group.to_string();
        }

        tracing::debug!(
            engine = %rule.display_name,
            paid,
            keyword = %record.keyword,
            keyword_group = %record.keyword_group,
            "classified as search engine traffic"
        );
        true
    }

    /// Ignored-referrer and referrer-group step; true on a match
    fn classify_referrer_group(&self, config: &AttributionConfig, record: &mut AttributionRecord) -> bool {
        if config.is_ignored_referrer(&record.referring_domain) {
            record.medium = config.mediums.direct.clone();
            record.source = record.referring_domain.clone();
            tracing::debug!(domain = %record.referring_domain, "ignored referrer, classified as direct");
            return true;
        }

        let Some(rule) = find_referrer_group(&config.referrer_groups, &record.referring_domain) else {
            return false;
        };

        record.medium = rule.medium.clone();
        record.source = template::format(&rule.source_template, record);
        tracing::debug!(
            domain = %record.referring_domain,
            medium = %record.medium,
            source = %record.source,
            "classified by referrer group"
        );
        true
    }

    /// Paid when any paid marker is set on the landing page or the referrer
    fn is_paid<Q: QuerySource + ?Sized>(&self, query: &Q, referrer: &str, config: &AttributionConfig) -> bool {
        config.paid_params.iter().any(|name| {
            !query.query_param(name).is_empty() || !query.query_param_from(referrer, name).is_empty()
        })
    }

    /// First non-empty keyword parameter from the referrer, lower-cased
    fn search_keyword<Q: QuerySource + ?Sized>(&self, query: &Q, referrer: &str, rule: &SearchEngineRule) -> String {
        rule.keyword_params
            .iter()
            .map(|name| query.query_param_from(referrer, name))
            .find(|value| !value.is_empty())
            .map(|value| value.to_lowercase())
            .unwrap_or_default()
    }
}

/// Classify with a default engine
pub fn classify<Q: QuerySource + ?Sized>(query: &Q, referrer: &str, config: &AttributionConfig) -> AttributionRecord {
    ClassificationEngine::new().classify(query, referrer, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::rules::{KeywordGroupMatch, KeywordGroupRule, ReferrerGroupRule};
    use crate::testing::QueryParams;

    fn config() -> AttributionConfig {
        AttributionConfig::for_site("example.com")
    }

    #[test]
    fn test_tagged_link_passthrough() {
        let query = QueryParams::from_pairs(&[
            ("utm_medium", "email"),
            ("utm_source", "Newsletter"),
            ("utm_campaign", "Spring"),
            ("utm_term", "Shoes"),
            ("utm_content", "hero"),
        ]);
        let mut config = config();
        config.add_ignored_referrer("google.com");

        let record = classify(&query, "http://www.google.com/search?q=boots", &config);
        assert_eq!(record.medium, "email");
        assert_eq!(record.source, "Newsletter");
        assert_eq!(record.campaign, "Spring");
        assert_eq!(record.keyword, "Shoes");
        assert_eq!(record.content, "hero");
        assert_eq!(record.keyword_group, "");
        assert_eq!(record.referring_domain, "google.com");
        assert_eq!(record.referring_path, "/search");
    }

    #[test]
    fn test_partial_tags_are_discarded() {
        let query = QueryParams::from_pairs(&[("utm_source", "Newsletter"), ("utm_campaign", "Spring")]);
        let record = classify(&query, "", &config());
        assert_eq!(record.medium, "Direct");
        assert_eq!(record.source, "(none)");
        assert_eq!(record.campaign, "");
    }

    #[test]
    fn test_direct_regardless_of_tables() {
        let mut config = config();
        config.add_referrer_group(ReferrerGroupRule::new(vec![Matcher::pattern(".*").unwrap()], "Any", "%rd"));
        let record = classify(&QueryParams::new(), "", &config);
        assert_eq!(record.medium, "Direct");
        assert_eq!(record.source, "(none)");
    }

    #[test]
    fn test_google_organic() {
        let record = classify(&QueryParams::new(), "http://www.google.com/search?q=shoes", &config());
        assert_eq!(record.medium, "Search Engine: Organic");
        assert_eq!(record.source, "Google");
        assert_eq!(record.keyword, "shoes");
        assert_eq!(record.referring_domain, "google.com");
    }

    #[test]
    fn test_keyword_lowercased_and_params_in_order() {
        let record = classify(&QueryParams::new(), "https://search.aol.com/aol/search?q=&query=Red+Boots", &config());
        assert_eq!(record.source, "AOL");
        assert_eq!(record.keyword, "red boots");
    }

    #[test]
    fn test_google_paid_from_referrer() {
        let mut config = config();
        config.add_paid_param("gclid");
        config.add_ignored_keyword("shoes");
        config.add_keyword_group(KeywordGroupRule::new(Matcher::literal("shoes"), "Footwear"));

        let record = classify(&QueryParams::new(), "http://www.google.com/search?q=shoes&gclid=abc", &config);
        assert_eq!(record.medium, "Search Engine: PPC");
        assert_eq!(record.source, "Google");
        assert_eq!(record.keyword, "shoes");
        assert_eq!(record.keyword_group, "Footwear");
    }

    #[test]
    fn test_google_paid_from_landing_page() {
        let mut config = config();
        config.add_paid_param("gclid");
        let query = QueryParams::from_pairs(&[("gclid", "xyz")]);
        let record = classify(&query, "https://www.google.com/", &config);
        assert_eq!(record.medium, "Search Engine: PPC");
        assert_eq!(record.keyword, "");
    }

    #[test]
    fn test_ignored_keyword_is_brand_traffic() {
        let mut config = config();
        config.add_ignored_keyword("acme");
        config.add_keyword_group(KeywordGroupRule::new(Matcher::literal("acme"), "Brand"));

        let record = classify(&QueryParams::new(), "https://www.bing.com/search?q=ACME", &config);
        assert_eq!(record.medium, "Direct");
        assert_eq!(record.source, "Bing");
        assert_eq!(record.keyword, "acme");
        assert_eq!(record.keyword_group, BRAND_KEYWORD_GROUP);
    }

    #[test]
    fn test_keyword_group_modes() {
        let mut config = config();
        config.add_keyword_group(KeywordGroupRule::new(Matcher::pattern("shoe").unwrap(), "Footwear"));
        config.add_keyword_group(KeywordGroupRule::new(Matcher::pattern("running").unwrap(), "Running"));
        let referrer = "https://duckduckgo.com/?q=running+shoes";

        let record = classify(&QueryParams::new(), referrer, &config);
        assert_eq!(record.keyword_group, "Footwear");

        config.keyword_group_match = KeywordGroupMatch::LastMatch;
        let record = classify(&QueryParams::new(), referrer, &config);
        assert_eq!(record.keyword_group, "Running");
    }

    #[test]
    fn test_ignored_referrer_is_direct() {
        let record = classify(&QueryParams::new(), "https://www.example.com/products", &config());
        assert_eq!(record.medium, "Direct");
        assert_eq!(record.source, "example.com");
        assert_eq!(record.referring_path, "/products");
    }

    #[test]
    fn test_referrer_group_with_template() {
        let mut config = config();
        config.add_referrer_group(ReferrerGroupRule::new(
            vec![Matcher::literal("facebook.com"), Matcher::literal("t.co")],
            "Social",
            "%m via %rd%rp",
        ));

        let record = classify(&QueryParams::new(), "https://www.facebook.com/share?id=1", &config);
        assert_eq!(record.medium, "Social");
        assert_eq!(record.source, "Social via facebook.com/share");
    }

    #[test]
    fn test_generic_referral() {
        let record = classify(&QueryParams::new(), "https://news.example.org/story/42", &config());
        assert_eq!(record.medium, "Referral");
        assert_eq!(record.source, "news.example.org");
        assert_eq!(record.referring_path, "/story/42");
    }

    #[test]
    fn test_search_engine_precedes_referrer_groups() {
        let mut config = config();
        config.add_referrer_group(ReferrerGroupRule::new(vec![Matcher::literal("google.com")], "Custom", "%rd"));
        let record = classify(&QueryParams::new(), "https://google.com/search?q=x", &config);
        assert_eq!(record.source, "Google");
    }

    #[test]
    fn test_medium_and_source_paired() {
        let referrers = [
            "",
            "https://www.google.com/search?q=a",
            "https://www.example.com/",
            "https://other.org/",
            "not a url",
            "http://",
        ];
        for referrer in referrers {
            let record = classify(&QueryParams::new(), referrer, &config());
            assert!(record.is_classified(), "unpaired record for {:?}: {:?}", referrer, record);
        }
    }
}
