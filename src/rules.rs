use crate::matcher::Matcher;
use serde::{Deserialize, Serialize};

/// Search engine recognised by a fragment of its referring domain
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchEngineRule {
    /// Substring looked for in the normalized referring domain
    pub domain_fragment: String,
    /// Referrer query parameters carrying the search terms, tried in order
    pub keyword_params: Vec<String>,
    /// Source name reported for this engine
    pub display_name: String,
}

impl SearchEngineRule {
    pub fn new<S: Into<String>>(domain_fragment: S, keyword_params: &[&str], display_name: S) -> Self {
        Self {
            domain_fragment: domain_fragment.into(),
            keyword_params: keyword_params.iter().map(|p| p.to_string()).collect(),
            display_name: display_name.into(),
        }
    }

    /// Whether this rule claims the (already normalized) referring domain
    pub fn matches_domain(&self, referring_domain: &str) -> bool {
        !self.domain_fragment.is_empty()
            && referring_domain.contains(&self.domain_fragment.to_ascii_lowercase())
    }
}

/// Group of referring domains reported under a custom medium
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferrerGroupRule {
    pub domain_matchers: Vec<Matcher>,
    pub medium: String,
    /// Source template; placeholders such as `%rd` are filled in
    pub source_template: String,
}

impl ReferrerGroupRule {
    pub fn new<S: Into<String>>(domain_matchers: Vec<Matcher>, medium: S, source_template: S) -> Self {
        Self {
            domain_matchers,
            medium: medium.into(),
            source_template: source_template.into(),
        }
    }

    pub fn matches_domain(&self, referring_domain: &str) -> bool {
        self.domain_matchers
            .iter()
            .any(|matcher| matcher.matches_domain(referring_domain))
    }
}

/// Keyword group membership rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeywordGroupRule {
    pub matcher: Matcher,
    pub group_name: String,
}

impl KeywordGroupRule {
    pub fn new<S: Into<String>>(matcher: Matcher, group_name: S) -> Self {
        Self {
            matcher,
            group_name: group_name.into(),
        }
    }
}

/// How keyword group rules resolve when several match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordGroupMatch {
    /// The first matching rule decides the group
    #[default]
    FirstMatch,
    /// Every matching rule overwrites the previous one, so the last wins
    LastMatch,
}

/// Built-in search engine table
///
/// More specific fragments come before broader ones sharing a prefix.
pub fn default_search_engines() -> Vec<SearchEngineRule> {
    vec![
        SearchEngineRule::new("google", &["q"], "Google"),
        SearchEngineRule::new("bing", &["q"], "Bing"),
        SearchEngineRule::new("search.yahoo", &["p"], "Yahoo"),
        SearchEngineRule::new("yahoo", &["p", "q"], "Yahoo"),
        SearchEngineRule::new("duckduckgo", &["q"], "DuckDuckGo"),
        SearchEngineRule::new("baidu", &["wd", "word"], "Baidu"),
        SearchEngineRule::new("yandex", &["text"], "Yandex"),
        SearchEngineRule::new("ecosia", &["q"], "Ecosia"),
        SearchEngineRule::new("ask.com", &["q"], "Ask"),
        SearchEngineRule::new("search.aol", &["q", "query"], "AOL"),
        SearchEngineRule::new("naver", &["query"], "Naver"),
        SearchEngineRule::new("seznam", &["q"], "Seznam"),
        SearchEngineRule::new("search.msn", &["q"], "MSN"),
    ]
}

/// Find the first search engine rule whose fragment appears in the domain
pub fn find_search_engine<'a>(
    rules: &'a [SearchEngineRule],
    referring_domain: &str,
) -> Option<&'a SearchEngineRule> {
    rules.iter().find(|rule| rule.matches_domain(referring_domain))
}

/// Find the first referrer group claiming the domain
pub fn find_referrer_group<'a>(
    rules: &'a [ReferrerGroupRule],
    referring_domain: &str,
) -> Option<&'a ReferrerGroupRule> {
    rules.iter().find(|rule| rule.matches_domain(referring_domain))
}

/// Resolve the keyword group for a keyword
pub fn resolve_keyword_group<'a>(
    rules: &'a [KeywordGroupRule],
    keyword: &str,
    mode: KeywordGroupMatch,
) -> Option<&'a str> {
    let mut matching = rules
        .iter()
        .filter(|rule| rule.matcher.matches_keyword(keyword))
        .map(|rule| rule.group_name.as_str());

    match mode {
        KeywordGroupMatch::FirstMatch => matching.next(),
        KeywordGroupMatch::LastMatch => matching.last(),
    }
}

/// True when any matcher in the list claims the referring domain
pub fn any_domain_match(matchers: &[Matcher], referring_domain: &str) -> bool {
    matchers.iter().any(|m| m.matches_domain(referring_domain))
}

/// True when any matcher in the list claims the keyword
pub fn any_keyword_match(matchers: &[Matcher], keyword: &str) -> bool {
    matchers.iter().any(|m| m.matches_keyword(keyword))
}
