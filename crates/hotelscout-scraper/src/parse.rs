//! Field extraction from rendered profile and post markup.
//!
//! Works on the HTML text returned by the rendering service. Tags are
//! located with regexes and attributes read individually, so attribute
//! order inside a tag does not matter.

use std::collections::HashSet;
use std::sync::LazyLock;

use hotelscout_core::RawPostFields;
use hotelscout_detect::extract_mentions;
use regex::Regex;

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").expect("valid regex"));
static TIME_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<time\b[^>]*>").expect("valid regex"));
static INNER_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex"));

const LOCATION_PATH: &str = "/explore/locations/";
const PAID_BANNER_TEXT: &str = "paid partnership";

/// Grid post links (`/p/` or `/reel/`) in document order, deduplicated,
/// at most `max_n`.
#[must_use]
pub fn post_links(html: &str, max_n: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    ANCHOR_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).and_then(|attrs| extract_attr(attrs.as_str(), "href")))
        .filter(|href| href.contains("/p/") || href.contains("/reel/"))
        .filter(|href| seen.insert(href.clone()))
        .take(max_n)
        .collect()
}

/// Extracts the raw fields of one post page.
///
/// `fallback_url` is used when the page carries no canonical link. Returns
/// `None` when the page has neither a timestamp nor a caption, which means
/// the post view never rendered.
#[must_use]
pub fn parse_post(html: &str, fallback_url: &str) -> Option<RawPostFields> {
    let date_iso = TIME_TAG_RE
        .find_iter(html)
        .find_map(|m| extract_attr(m.as_str(), "datetime"))
        .unwrap_or_default();
    let caption = find_meta_content(html, "property", "og:description")
        .or_else(|| find_meta_content(html, "name", "description"))
        .map(|raw| caption_from_description(&decode_entities(&raw)))
        .unwrap_or_default();

    if date_iso.is_empty() && caption.is_empty() {
        return None;
    }

    let post_url = canonical_link(html).unwrap_or_else(|| fallback_url.to_string());
    let tagged_accounts = extract_mentions(&caption);

    Some(RawPostFields {
        post_url,
        date_iso,
        location_name: location_name(html).unwrap_or_default(),
        tagged_accounts,
        paid_banner: html.to_lowercase().contains(PAID_BANNER_TEXT),
        caption,
    })
}

/// Text of the first anchor pointing at a location page.
fn location_name(html: &str) -> Option<String> {
    ANCHOR_RE.captures_iter(html).find_map(|caps| {
        let href = extract_attr(caps.get(1)?.as_str(), "href")?;
        if !href.contains(LOCATION_PATH) {
            return None;
        }
        let text = INNER_TAG_RE.replace_all(caps.get(2)?.as_str(), " ");
        let text = decode_entities(&text);
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        (!text.is_empty()).then_some(text)
    })
}

fn canonical_link(html: &str) -> Option<String> {
    LINK_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let rel = extract_attr(tag, "rel")?;
        if rel.eq_ignore_ascii_case("canonical") {
            extract_attr(tag, "href")
        } else {
            None
        }
    })
}

/// The quoted caption inside a description like
/// `12 likes, 3 comments - user on June 1, 2024: "caption".`
/// Falls back to the whole description when no quoted part is present.
fn caption_from_description(description: &str) -> String {
    let quoted = description.find(": \"").and_then(|start| {
        let rest = &description[start + 3..];
        rest.rfind('"').map(|end| &rest[..end])
    });
    quoted.unwrap_or(description).trim().to_string()
}

fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

/// Attribute value honoring the opening quote, so apostrophes inside a
/// double-quoted value survive.
fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)(?:^|\s){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(attr)
    );
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().trim().to_string())
}

/// Decodes named and numeric HTML entities; unknown entities are kept as-is.
pub(crate) fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
