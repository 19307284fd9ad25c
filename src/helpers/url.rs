//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/grid.css") // -> "/course/css/grid.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/day-1/") // -> "https://example.com/course/day-1/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// RFC 3986 unreserved characters pass through untouched
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single path segment or query value
pub fn encode_url(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/course/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/grid.css"), "/course/css/grid.css");
        assert_eq!(url_for(&config, "day-1/"), "/course/day-1/");
        assert_eq!(url_for(&config, "/"), "/course/");
        assert_eq!(url_for(&SiteConfig::default(), "/day-1/"), "/day-1/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/day-1/"),
            "https://example.com/course/day-1/"
        );
    }

    #[test]
    fn test_encode_url() {
        assert_eq!(encode_url("dQw4w9WgXcQ_-"), "dQw4w9WgXcQ_-");
        assert_eq!(encode_url("a b/c"), "a%20b%2Fc");
    }
}
