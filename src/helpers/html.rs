//! HTML helper functions

use super::url::url_for;
use crate::config::SiteConfig;

/// Generate a CSS link tag
///
/// # Examples
/// ```ignore
/// css(&config, "grid") // -> <link rel="stylesheet" href="/course/css/grid.css">
/// ```
pub fn css(config: &SiteConfig, path: &str) -> String {
    let href = if is_absolute_url(path) {
        path.to_string()
    } else {
        let path = if path.ends_with(".css") {
            path.to_string()
        } else {
            format!("{}.css", path)
        };
        url_for(config, &format!("css/{}", path.trim_start_matches('/')))
    };

    format!(r#"<link rel="stylesheet" href="{}">"#, href)
}

/// Generate an anchor tag around already-rendered inner HTML
///
/// Site paths go through `url_for`; absolute URLs open in a new tab.
///
/// # Examples
/// ```ignore
/// link_to(&config, "/day-1/", "Day 1: Intro") // -> <a href="/day-1/">Day 1: Intro</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, inner_html: &str) -> String {
    if is_absolute_url(path) {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(path),
            inner_html
        )
    } else {
        format!(
            r#"<a href="{}">{}</a>"#,
            html_escape(&url_for(config, path)),
            inner_html
        )
    }
}

/// Generate an image tag, with an optional `srcset`
///
/// # Examples
/// ```ignore
/// image_tag(&config, "/images/logo.svg", "logo", None)
/// ```
pub fn image_tag(config: &SiteConfig, path: &str, alt: &str, srcset: Option<&str>) -> String {
    let src = if is_absolute_url(path) {
        path.to_string()
    } else {
        url_for(config, path)
    };

    let srcset_attr = srcset
        .filter(|s| !s.is_empty())
        .map(|s| format!(r#" srcset="{}""#, html_escape(s)))
        .unwrap_or_default();

    format!(
        r#"<img src="{}" alt="{}"{}>"#,
        html_escape(&src),
        html_escape(alt),
        srcset_attr
    )
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="advent-site {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            root: "/course/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_css() {
        let config = test_config();
        assert_eq!(
            css(&config, "grid"),
            r#"<link rel="stylesheet" href="/course/css/grid.css">"#
        );
    }

    #[test]
    fn test_link_to() {
        let config = test_config();
        assert_eq!(
            link_to(&config, "/day-1/", "Day 1"),
            r#"<a href="/course/day-1/">Day 1</a>"#
        );
        assert!(link_to(&config, "https://example.com", "x").contains(r#"target="_blank""#));
    }

    #[test]
    fn test_image_tag() {
        let config = test_config();
        assert_eq!(
            image_tag(&config, "images/logo.svg", "logo", None),
            r#"<img src="/course/images/logo.svg" alt="logo">"#
        );
        assert!(image_tag(&config, "/a.png", "", Some("/a.png 310w")).contains(r#"srcset="/a.png 310w""#));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
