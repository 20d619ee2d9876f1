//! Lenient referrer URI helpers
//!
//! Referrers arrive as untrusted strings, so none of these functions fail:
//! malformed input yields partial or empty results.

use url::form_urlencoded;

const WWW_PREFIX: &str = "www.";

/// Byte offset where the authority starts (just past the first `//`)
fn authority_start(uri: &str) -> usize {
    uri.find("//").map(|pos| pos + 2).unwrap_or(0)
}

/// Byte offset where the authority ends, relative to the whole string
fn authority_end(uri: &str, start: usize) -> usize {
    uri[start..]
        .find(['/', '?', '#'])
        .map(|pos| start + pos)
        .unwrap_or(uri.len())
}

/// Lower-case a domain and strip one leading `www.`
pub fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_ascii_lowercase();
    match lowered.strip_prefix(WWW_PREFIX) {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Extract the domain between the first `//` and the next `/`.
///
/// A leading `www.` is removed once and the result is lower-cased.
/// The authority also stops at `?` or `#` so a query never leaks in.
pub fn domain_of(uri: &str) -> String {
    if uri.is_empty() {
        return String::new();
    }

    let start = authority_start(uri);
    let end = authority_end(uri, start);
    normalize_domain(&uri[start..end])
}

/// Extract the path from the first `/` after the authority up to the query
pub fn path_of(uri: &str) -> String {
    if uri.is_empty() {
        return String::new();
    }

    let start = authority_start(uri);
    let end = authority_end(uri, start);
    let rest = &uri[end..];
    if !rest.starts_with('/') {
        return String::new();
    }

    let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
    rest[..path_end].to_string()
}

/// Raw query string of a URI (without `?` and without fragment)
pub fn query_of(uri: &str) -> &str {
    let Some(pos) = uri.find('?') else {
        return "";
    };
    let query = &uri[pos + 1..];
    match query.find('#') {
        Some(hash) => &query[..hash],
        None => query,
    }
}

/// Read a query parameter from a URI.
///
/// Returns the first non-empty value for `name`, decoded as
/// `application/x-www-form-urlencoded`, or an empty string.
pub fn query_param(uri: &str, name: &str) -> String {
    form_urlencoded::parse(query_of(uri).as_bytes())
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_strips_www_once() {
        assert_eq!(domain_of("http://www.google.com/search?q=shoes"), "google.com");
        assert_eq!(domain_of("https://www.www.example.com/"), "www.example.com");
        assert_eq!(domain_of("https://news.example.org/a/b"), "news.example.org");
    }

    #[test]
    fn test_domain_never_includes_query() {
        assert_eq!(domain_of("http://example.com?ref=1"), "example.com");
        assert_eq!(domain_of("http://example.com#top"), "example.com");
        assert_eq!(domain_of("http://Example.COM"), "example.com");
    }

    #[test]
    fn test_domain_degrades_gracefully() {
        assert_eq!(domain_of(""), "");
        assert_eq!(domain_of("example.com/page"), "example.com");
        assert_eq!(domain_of("http://"), "");
    }

    #[test]
    fn test_path_extraction() {
        assert_eq!(path_of("http://www.google.com/search?q=shoes"), "/search");
        assert_eq!(path_of("https://example.com/a/b/c#frag"), "/a/b/c");
        assert_eq!(path_of("https://example.com/"), "/");
        assert_eq!(path_of("https://example.com"), "");
        assert_eq!(path_of("https://example.com?x=1"), "");
        assert_eq!(path_of(""), "");
    }

    #[test]
    fn test_query_param_reads_first_non_empty() {
        let uri = "http://www.google.com/search?q=&q=Running+Shoes&oq=x";
        assert_eq!(query_param(uri, "q"), "Running Shoes");
        assert_eq!(query_param(uri, "oq"), "x");
        assert_eq!(query_param(uri, "missing"), "");
    }

    #[test]
    fn test_query_param_decodes_percent_escapes() {
        let uri = "https://search.example.com/?p=caf%C3%A9%20au%20lait#results";
        assert_eq!(query_param(uri, "p"), "café au lait");
    }

    #[test]
    fn test_query_param_without_query() {
        assert_eq!(query_param("https://example.com/page", "q"), "");
        assert_eq!(query_param("", "q"), "");
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("WWW.Example.com"), "example.com");
        assert_eq!(normalize_domain(" shop.example.com "), "shop.example.com");
    }
}
