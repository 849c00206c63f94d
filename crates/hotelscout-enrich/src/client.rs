//! HTTP client for the enrichment sources.
//!
//! One GET per call, no retries. Non-2xx statuses surface as
//! [`EnrichError::UnexpectedStatus`] so the resolver can treat them exactly
//! like transport failures.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::EnrichError;

const DEFAULT_INSTAGRAM_BASE_URL: &str = "https://www.instagram.com";
const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// HTTP client shared by every enrichment stage.
///
/// Use [`ContactClient::new`] for production or
/// [`ContactClient::with_base_urls`] to point the profile and Places calls at
/// a mock server in tests.
pub struct ContactClient {
    client: Client,
    instagram_base: Url,
    places_base: Url,
}

impl ContactClient {
    /// Creates a client pointed at the public profile site and Places API.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, EnrichError> {
        Self::with_base_urls(
            timeout_secs,
            user_agent,
            DEFAULT_INSTAGRAM_BASE_URL,
            DEFAULT_PLACES_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`EnrichError::InvalidUrl`] if either base URL does not parse.
    pub fn with_base_urls(
        timeout_secs: u64,
        user_agent: &str,
        instagram_base: &str,
        places_base: &str,
    ) -> Result<Self, EnrichError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            instagram_base: parse_base(instagram_base)?,
            places_base: parse_base(places_base)?,
        })
    }

    /// Public profile page URL for `handle`, with a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::InvalidUrl`] if the base URL cannot carry a path.
    pub fn profile_url(&self, handle: &str) -> Result<Url, EnrichError> {
        let mut url = self.instagram_base.clone();
        url.path_segments_mut()
            .map_err(|()| EnrichError::InvalidUrl {
                url: self.instagram_base.to_string(),
                reason: "base URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .push(handle)
            .push("");
        Ok(url)
    }

    /// Places endpoint URL (`textsearch` or `details`) with query parameters.
    pub(crate) fn places_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.places_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint).push("json");
        }
        url.query_pairs_mut().extend_pairs(params);
        url
    }

    /// Fetches `url` and returns the body as text.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::Http`] on network or timeout failure.
    /// - [`EnrichError::UnexpectedStatus`] on any non-2xx status.
    pub async fn fetch_text(&self, url: &str) -> Result<String, EnrichError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches `url` and deserializes the JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ContactClient::fetch_text`], plus [`EnrichError::Deserialize`]
    /// when the body does not match `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, EnrichError> {
        let body = self.fetch_text(url).await?;
        serde_json::from_str::<T>(&body).map_err(|e| EnrichError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

fn parse_base(raw: &str) -> Result<Url, EnrichError> {
    // Exactly one trailing slash so path pushes land under the base path.
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| EnrichError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
