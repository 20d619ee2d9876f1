use serde::{Deserialize, Serialize};

/// Source value recorded for visits with neither a referrer nor tags
pub const NO_SOURCE: &str = "(none)";

/// Keyword group assigned when an organic keyword is on the ignore list
pub const BRAND_KEYWORD_GROUP: &str = "(brand)";

/// Attribution values for a single visit
///
/// Produced by the classification engine on the first page of a visit and
/// carried between page views as an encoded session blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributionRecord {
    /// Top-level channel (direct, referral, organic, paid...)
    pub medium: String,
    /// Origin within the medium (search engine name, referring domain...)
    pub source: String,
    pub campaign: String,
    pub content: String,
    pub keyword: String,
    pub keyword_group: String,
    pub referring_domain: String,
    pub referring_path: String,
}

impl AttributionRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        self.medium.is_empty()
            && self.source.is_empty()
            && self.campaign.is_empty()
            && self.content.is_empty()
            && self.keyword.is_empty()
            && self.keyword_group.is_empty()
            && self.referring_domain.is_empty()
            && self.referring_path.is_empty()
    }

    /// True when both medium and source are populated
    pub fn is_classified(&self) -> bool {
        !self.medium.is_empty() && !self.source.is_empty()
    }

    /// Blank the reportable view of the record.
    ///
    /// Reportable values are medium, source, campaign, content, keyword,
    /// keyword group and the referrer; the referrer is the domain together
    /// with its path, so both are blanked.
    pub fn clear_reportable(&mut self) {
        self.medium.clear();
        self.source.clear();
        self.campaign.clear();
        self.content.clear();
        self.keyword.clear();
        self.keyword_group.clear();
        self.referring_domain.clear();
        self.referring_path.clear();
    }

    /// Clear the values inferred by classification, keeping the referrer
    pub(crate) fn clear_classification(&mut self) {
        self.medium.clear();
        self.source.clear();
        self.campaign.clear();
        self.content.clear();
        self.keyword.clear();
        self.keyword_group.clear();
    }
}
