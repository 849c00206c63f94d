//! Record types shared by the detection, enrichment, and scraping crates.
//!
//! Serialized field names match the aggregate output format, so a
//! [`ProfileRecord`] can be written on its own as one NDJSON line or as one
//! element of the `profiles` array in the JSON document.

use serde::{Deserialize, Serialize};

/// Fields pulled from a single opened post by the page source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPostFields {
    pub post_url: String,
    /// ISO-8601 timestamp as rendered by the page; empty when absent.
    pub date_iso: String,
    pub caption: String,
    pub location_name: String,
    pub tagged_accounts: Vec<String>,
    /// Whether the post view carried a "Paid partnership" banner.
    pub paid_banner: bool,
}

/// Why a post was classified as sponsored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorReason {
    Banner,
    Keyword,
    TaggedHotel,
}

impl SponsorReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SponsorReason::Banner => "banner",
            SponsorReason::Keyword => "keyword",
            SponsorReason::TaggedHotel => "tagged_hotel",
        }
    }
}

impl std::fmt::Display for SponsorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SponsorshipVerdict {
    pub sponsored: bool,
    /// Reasons in detection order, each at most once.
    pub reasons: Vec<SponsorReason>,
}

impl SponsorshipVerdict {
    /// Builds a verdict from accumulated reasons, collapsing repeats.
    ///
    /// `sponsored` is derived from the reason list, so the two can never
    /// disagree.
    #[must_use]
    pub fn from_reasons(reasons: impl IntoIterator<Item = SponsorReason>) -> Self {
        let mut unique: Vec<SponsorReason> = Vec::new();
        for reason in reasons {
            if !unique.contains(&reason) {
                unique.push(reason);
            }
        }
        Self {
            sponsored: !unique.is_empty(),
            reasons: unique,
        }
    }
}

/// A possible hotel identity found in a post.
///
/// At least one of `name` and `instagram_handle` is set; the constructors
/// reject blank input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelCandidate {
    pub name: Option<String>,
    pub instagram_handle: Option<String>,
}

impl HotelCandidate {
    /// Name-only candidate. Returns `None` for a blank name.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim();
        (!name.is_empty()).then(|| Self {
            name: Some(name.to_string()),
            instagram_handle: None,
        })
    }

    /// Handle-only candidate. Returns `None` for a blank handle.
    #[must_use]
    pub fn with_handle(handle: &str) -> Option<Self> {
        let handle = handle.trim();
        (!handle.is_empty()).then(|| Self {
            name: None,
            instagram_handle: Some(handle.to_string()),
        })
    }

    /// Case-insensitive `(name, handle)` key used for deduplication.
    #[must_use]
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.name.as_deref().unwrap_or_default().to_lowercase(),
            self.instagram_handle
                .as_deref()
                .unwrap_or_default()
                .to_lowercase(),
        )
    }
}

/// Provenance of an enrichment outcome, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentSource {
    #[default]
    None,
    InstagramBio,
    WebsiteCrawl,
    GooglePlaces,
}

impl EnrichmentSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EnrichmentSource::None => "none",
            EnrichmentSource::InstagramBio => "instagram_bio",
            EnrichmentSource::WebsiteCrawl => "website_crawl",
            EnrichmentSource::GooglePlaces => "google_places",
        }
    }
}

impl std::fmt::Display for EnrichmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact fields resolved for one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub website: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub source: EnrichmentSource,
}

/// The `hotel` object attached to every post record.
///
/// Every field is `None` when the post was not sponsored or no candidate was
/// found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelBlock {
    pub name: Option<String>,
    pub instagram_handle: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub enrichment_source: Option<EnrichmentSource>,
}

impl HotelBlock {
    /// Merges the enriched candidate into a populated hotel block.
    #[must_use]
    pub fn resolved(candidate: &HotelCandidate, enrichment: EnrichmentResult) -> Self {
        Self {
            name: candidate.name.clone().filter(|n| !n.is_empty()),
            instagram_handle: candidate
                .instagram_handle
                .clone()
                .filter(|h| !h.is_empty()),
            website: enrichment.website,
            email: enrichment.email,
            address: enrichment.address,
            phone: enrichment.phone,
            enrichment_source: Some(enrichment.source),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One processed post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRecord {
    pub post_url: String,
    pub date_iso: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub tagged_accounts: Vec<String>,
    pub location_name: String,
    pub paid_banner: bool,
    pub sponsored: bool,
    pub sponsored_reasons: Vec<SponsorReason>,
    pub hotel: HotelBlock,
}

impl PostRecord {
    /// Assembles a record from the raw fields and the outputs of each stage.
    #[must_use]
    pub fn assemble(
        raw: RawPostFields,
        hashtags: Vec<String>,
        mentions: Vec<String>,
        verdict: SponsorshipVerdict,
        hotel: HotelBlock,
    ) -> Self {
        Self {
            post_url: raw.post_url,
            date_iso: raw.date_iso,
            caption: raw.caption,
            hashtags,
            mentions,
            tagged_accounts: raw.tagged_accounts,
            location_name: raw.location_name,
            paid_banner: raw.paid_banner,
            sponsored: verdict.sponsored,
            sponsored_reasons: verdict.reasons,
            hotel,
        }
    }
}

/// All post records collected for one profile, in the order they were opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile_url: String,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

impl ProfileRecord {
    #[must_use]
    pub fn empty(profile_url: &str) -> Self {
        Self {
            profile_url: profile_url.to_string(),
            posts: Vec::new(),
        }
    }
}
