//! Multi-source contact enrichment waterfall.

use hotelscout_core::{EnrichmentResult, EnrichmentSource, HotelCandidate};

use crate::client::ContactClient;
use crate::markup::{extract_email, extract_phone, find_contact_link, first_external_link};
use crate::places::lookup_place;

/// Resolves a hotel candidate into contact fields.
///
/// Stages run in order: profile bio, website crawl, places lookup. A later
/// stage only fills fields that are still empty. Upstream failures are logged
/// and treated as "no data from this stage", so [`resolve`](Self::resolve)
/// never fails.
pub struct EnrichmentResolver {
    client: ContactClient,
}

impl EnrichmentResolver {
    #[must_use]
    pub fn new(client: ContactClient) -> Self {
        Self { client }
    }

    pub async fn resolve(
        &self,
        candidate: &HotelCandidate,
        places_api_key: Option<&str>,
    ) -> EnrichmentResult {
        let mut result = EnrichmentResult::default();

        if let Some(handle) = candidate.instagram_handle.as_deref() {
            self.bio_stage(handle, &mut result).await;
        }

        if let Some(website) = result.website.clone() {
            self.crawl_stage(&website, &mut result).await;
        }

        let needs_lookup = result.website.is_none() || result.email.is_none();
        if let (Some(key), Some(name), true) = (
            places_api_key.filter(|k| !k.trim().is_empty()),
            candidate.name.as_deref(),
            needs_lookup,
        ) {
            self.places_stage(name, key, &mut result).await;
        }

        result
    }

    async fn bio_stage(&self, handle: &str, result: &mut EnrichmentResult) {
        let url = match self.client.profile_url(handle) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(handle, error = %e, "cannot build profile URL; skipping bio stage");
                return;
            }
        };

        let html = match self.client.fetch_text(url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(handle, error = %e, "bio fetch failed");
                return;
            }
        };

        result.website = first_external_link(&html);
        result.email = extract_email(&html);
        if result.website.is_some() || result.email.is_some() {
            result.source = EnrichmentSource::InstagramBio;
        }
        tracing::debug!(
            handle,
            website = ?result.website,
            email = ?result.email,
            "bio stage complete"
        );
    }

    async fn crawl_stage(&self, website: &str, result: &mut EnrichmentResult) {
        let html = match self.client.fetch_text(website).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(website, error = %e, "homepage fetch failed");
                return;
            }
        };

        let mut filled = fill_from_markup(&html, result);

        if let Some(contact_url) = find_contact_link(&html, website) {
            match self.client.fetch_text(&contact_url).await {
                Ok(page) => filled |= fill_from_markup(&page, result),
                Err(e) => {
                    tracing::warn!(url = %contact_url, error = %e, "contact page fetch failed");
                }
            }
        }

        if filled {
            result.source = EnrichmentSource::WebsiteCrawl;
        }
        tracing::debug!(website, filled, "website crawl complete");
    }

    async fn places_stage(&self, name: &str, api_key: &str, result: &mut EnrichmentResult) {
        let details = match lookup_place(&self.client, name, api_key).await {
            Ok(Some(details)) => details,
            Ok(None) => {
                tracing::debug!(name, "places search returned no match");
                return;
            }
            Err(e) => {
                tracing::warn!(name, error = %e, "places lookup failed");
                return;
            }
        };

        if !details.has_any() {
            return;
        }

        fill_gap(&mut result.website, details.website);
        fill_gap(&mut result.address, details.formatted_address);
        fill_gap(&mut result.phone, details.formatted_phone_number);
        result.source = EnrichmentSource::GooglePlaces;
    }
}

/// Fills email and phone gaps from one page. Returns `true` if anything was
/// filled.
fn fill_from_markup(html: &str, result: &mut EnrichmentResult) -> bool {
    let email = fill_gap(&mut result.email, extract_email(html));
    let phone = fill_gap(&mut result.phone, extract_phone(html));
    email || phone
}

fn fill_gap(slot: &mut Option<String>, value: Option<String>) -> bool {
    match (slot.as_ref(), value) {
        (None, Some(v)) if !v.trim().is_empty() => {
            *slot = Some(v);
            true
        }
        _ => false,
    }
}
