//! Shared helpers for traffic-attribution integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use traffic_attribution::{
    testing::{MemorySessionStore, QueryParams},
    AttributionConfig, KeywordGroupRule, Matcher, ReferrerGroupRule, SessionController,
};

pub const SITE: &str = "shop.example";

/// Fixed instant so expiry assertions are deterministic
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

/// Query parameters from `(key, value)` pairs
pub fn query(pairs: &[(&str, &str)]) -> QueryParams {
    QueryParams::from_pairs(pairs)
}

pub fn empty_query() -> QueryParams {
    QueryParams::new()
}

/// Default configuration for the test site
pub fn site_config() -> AttributionConfig {
    AttributionConfig::for_site(SITE)
}

/// Configuration with one rule in every table
pub fn rich_config() -> AttributionConfig {
    let mut config = site_config();
    config.add_paid_param("gclid");
    config.add_paid_param("msclkid");
    config.add_ignored_keyword("shop example");
    config.add_ignored_keyword(Matcher::pattern("^shopexample").unwrap());
    config.add_keyword_group(KeywordGroupRule::new(Matcher::pattern("boot").unwrap(), "Boots"));
    config.add_keyword_group(KeywordGroupRule::new(Matcher::pattern("shoe").unwrap(), "Shoes"));
    config.add_referrer_group(ReferrerGroupRule::new(
        vec![
            Matcher::literal("facebook.com"),
            Matcher::pattern(r"(^|\.)instagram\.com$").unwrap(),
        ],
        "Social",
        "%rd",
    ));
    config
}

/// Controller and store sharing the fixed clock
pub fn session(config: AttributionConfig) -> (SessionController, MemorySessionStore) {
    (SessionController::new(config), MemorySessionStore::with_clock(fixed_now()))
}
