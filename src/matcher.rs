use crate::error::{AttributionError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal-or-pattern test used by ignore lists and group membership
///
/// In configuration files a bare string is a literal and a table with a
/// `pattern` key is a regular expression:
///
/// ```toml
/// ignored_referrers = ["example.com", { pattern = "^(.+\\.)?example\\.net$" }]
/// ```
#[derive(Clone, Deserialize, Serialize)]
#[serde(try_from = "MatcherRepr", into = "MatcherRepr")]
pub enum Matcher {
    Literal(String),
    Pattern(Regex),
}

/// On-disk shape of a matcher
#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum MatcherRepr {
    Literal(String),
    Pattern { pattern: String },
}

impl Matcher {
    /// Create a literal matcher
    pub fn literal<S: Into<String>>(text: S) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a pattern matcher
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|err| AttributionError::invalid_pattern(pattern, err))
    }

    /// Test a referring domain; literals compare case-insensitively
    pub fn matches_domain(&self, domain: &str) -> bool {
        match self {
            Self::Literal(text) => text.eq_ignore_ascii_case(domain),
            Self::Pattern(regex) => regex.is_match(domain),
        }
    }

    /// Test a keyword; literals compare exactly
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        match self {
            Self::Literal(text) => text == keyword,
            Self::Pattern(regex) => regex.is_match(keyword),
        }
    }

    /// The literal text or the pattern source
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Pattern(regex) => regex.as_str(),
        }
    }

    /// True for an empty literal, which can only ever match empty input
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Literal(text) if text.is_empty())
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Matcher {}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
        }
    }
}

impl From<&str> for Matcher {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for Matcher {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl TryFrom<MatcherRepr> for Matcher {
    type Error = AttributionError;

    fn try_from(repr: MatcherRepr) -> Result<Self> {
        match repr {
            MatcherRepr::Literal(text) => Ok(Self::Literal(text)),
            MatcherRepr::Pattern { pattern } => Self::pattern(&pattern),
        }
    }
}

impl From<Matcher> for MatcherRepr {
    fn from(matcher: Matcher) -> Self {
        match matcher {
            Matcher::Literal(text) => MatcherRepr::Literal(text),
            Matcher::Pattern(regex) => MatcherRepr::Pattern {
                pattern: regex.as_str().to_string(),
            },
        }
    }
}
