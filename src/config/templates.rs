use crate::error::Result;
use std::path::Path;

/// Generate a default attribution.toml template with examples
pub fn generate_default_config_template() -> String {
    r#"# Traffic attribution configuration
# Every key is optional; omitted keys keep their built-in defaults.

# The site's own domain. Visits referred by it never start a new session.
site_domain = "example.com"

# Only the first page view of a visit reports attribution values
first_page_only = true

# Session window in milliseconds (30 minutes)
session_timeout_ms = 1800000

# Name under which the session blob is stored
session_name = "_tsm"

# Query parameters that mark search engine traffic as paid
paid_params = ["gclid", "msclkid"]

# Organic keywords reported as brand traffic. A plain string matches the
# keyword exactly; { pattern = "..." } is a regular expression.
ignored_keywords = ["example", { pattern = "^example " }]

# Further referrers treated like the site itself
ignored_referrers = [{ pattern = "(^|\\.)example\\.com$" }]

# first_match or last_match
keyword_group_match = "first_match"

# Query parameter names carrying explicit link tags
[keys]
medium = "utm_medium"
source = "utm_source"
campaign = "utm_campaign"
keyword = "utm_term"
content = "utm_content"

# Medium names reported for inferred traffic
[mediums]
direct = "Direct"
referral = "Referral"
organic = "Search Engine: Organic"
ppc = "Search Engine: PPC"

# Referrer groups: the first group with a matching domain sets the medium.
# source_template placeholders: %rd %rp %m %s %cp %c %kg %k
[[referrer_groups]]
domain_matchers = ["facebook.com", "t.co", { pattern = "(^|\\.)linkedin\\.com$" }]
medium = "Social"
source_template = "%rd"

# Keyword groups for organic and paid search keywords
[[keyword_groups]]
matcher = { pattern = "shoe" }
group_name = "Footwear"

# Declaring search_engines replaces the built-in table
# [[search_engines]]
# domain_fragment = "google"
# keyword_params = ["q"]
# display_name = "Google"
"#
    .to_string()
}

/// Write the default template unless a configuration file already exists.
///
/// Returns true when a file was created.
pub fn ensure_config_file_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }

    std::fs::write(path, generate_default_config_template())?;
    tracing::info!(path = %path.display(), "created default attribution configuration");
    Ok(true)
}
