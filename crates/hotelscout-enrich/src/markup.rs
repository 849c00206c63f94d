//! Contact-field extraction from raw page markup.
//!
//! Pattern-based on purpose: bio pages and hotel homepages are scanned as
//! text, no DOM is built.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

static EXTERNAL_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(https?://[^"]+)""#).expect("valid regex"));
static MAILTO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mailto:([a-zA-Z0-9_.+\-]+@[a-zA-Z0-9\-]+\.[a-zA-Z0-9.\-]+)").expect("valid regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s().\-]{7,}\d").expect("valid regex"));
static CONTACT_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href="([^"]*(?:contact|about)[^"]*)""#).expect("valid regex")
});

/// First absolute `http(s)` link in the markup.
#[must_use]
pub fn first_external_link(html: &str) -> Option<String> {
    EXTERNAL_LINK_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First `mailto:` address in the markup.
#[must_use]
pub fn extract_email(html: &str) -> Option<String> {
    MAILTO_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First phone-shaped run of digits and separators, trimmed.
#[must_use]
pub fn extract_phone(html: &str) -> Option<String> {
    PHONE_RE
        .find(html)
        .map(|m| m.as_str().trim().to_string())
        .filter(|p| !p.is_empty())
}

/// First anchor whose target mentions "contact" or "about", resolved against
/// `base`. Only `http(s)` results are returned.
#[must_use]
pub fn find_contact_link(html: &str, base: &str) -> Option<String> {
    let base = Url::parse(base).ok();
    CONTACT_HREF_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| resolve_http(m.as_str(), base.as_ref()))
}

fn resolve_http(href: &str, base: Option<&Url>) -> Option<String> {
    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => base?.join(href).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_external_link_takes_document_order() {
        let html = r#"<a href="/relative">x</a><a href="https://grandhotelspa.com/">site</a>
            <a href="http://other.example/">other</a>"#;
        assert_eq!(
            first_external_link(html).as_deref(),
            Some("https://grandhotelspa.com/")
        );
    }

    #[test]
    fn first_external_link_absent() {
        assert_eq!(first_external_link(r#"<a href="/only/relative">"#), None);
    }

    #[test]
    fn extract_email_requires_mailto_prefix() {
        assert_eq!(extract_email("write to info@hotel.com"), None);
        assert_eq!(
            extract_email(r#"<a href="mailto:stay@grand-hotel.co.uk?subject=hi">"#).as_deref(),
            Some("stay@grand-hotel.co.uk")
        );
    }

    #[test]
    fn extract_phone_matches_formatted_numbers() {
        assert_eq!(
            extract_phone("Call us: +1 (555) 123-4567 today").as_deref(),
            Some("+1 (555) 123-4567")
        );
        assert_eq!(
            extract_phone("Tel 030.1234.5678").as_deref(),
            Some("030.1234.5678")
        );
    }

    #[test]
    fn extract_phone_ignores_short_numbers() {
        assert_eq!(extract_phone("Room 1204, floor 12"), None);
    }

    #[test]
    fn contact_link_is_resolved_against_base() {
        let html = r#"<nav><a href="/rooms">Rooms</a><a href="/Contact-Us">Contact</a></nav>"#;
        assert_eq!(
            find_contact_link(html, "https://grandhotelspa.com/").as_deref(),
            Some("https://grandhotelspa.com/Contact-Us")
        );
    }

    #[test]
    fn contact_link_skips_non_http_targets() {
        let html = r#"<a href="mailto:contact@hotel.com">mail</a><a href="https://hotel.com/about">About</a>"#;
        assert_eq!(
            find_contact_link(html, "https://hotel.com/").as_deref(),
            Some("https://hotel.com/about")
        );
    }

    #[test]
    fn contact_link_absent() {
        assert_eq!(find_contact_link(r#"<a href="/rooms">"#, "https://hotel.com/"), None);
    }
}
