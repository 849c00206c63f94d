//! Places text-search and details lookup.

use serde::Deserialize;

use crate::client::ContactClient;
use crate::error::EnrichError;

const DETAILS_FIELDS: &str = "formatted_address,formatted_phone_number,website";

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResult {
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<PlaceDetails>,
}

/// Contact fields returned by the details endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaceDetails {
    pub website: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
}

impl PlaceDetails {
    /// `true` when at least one contact field came back.
    #[must_use]
    pub fn has_any(&self) -> bool {
        [
            &self.website,
            &self.formatted_address,
            &self.formatted_phone_number,
        ]
        .iter()
        .any(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Looks up `name` via text search, then fetches details for the first hit.
///
/// Returns `Ok(None)` when the search has no results or the first result
/// carries no `place_id`.
///
/// # Errors
///
/// Propagates [`EnrichError`] from either call; the resolver swallows it.
pub async fn lookup_place(
    client: &ContactClient,
    name: &str,
    api_key: &str,
) -> Result<Option<PlaceDetails>, EnrichError> {
    let search_url = client.places_url("textsearch", &[("query", name), ("key", api_key)]);
    let search: TextSearchResponse = client
        .fetch_json(search_url.as_str(), "places text search")
        .await?;

    let Some(place_id) = search
        .results
        .into_iter()
        .next()
        .and_then(|r| r.place_id)
        .filter(|id| !id.is_empty())
    else {
        return Ok(None);
    };

    let details_url = client.places_url(
        "details",
        &[
            ("place_id", place_id.as_str()),
            ("key", api_key),
            ("fields", DETAILS_FIELDS),
        ],
    );
    let details: DetailsResponse = client
        .fetch_json(details_url.as_str(), "places details")
        .await?;

    Ok(details.result)
}
