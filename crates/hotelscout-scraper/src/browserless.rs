//! [`PageSource`] backed by a Browserless `/content` rendering endpoint.
//!
//! Each navigation or post open is one `POST /content {"url": ...}` call that
//! returns fully rendered HTML. Session cookies, if any, are the rendering
//! service's concern.

use std::time::Duration;

use async_trait::async_trait;
use hotelscout_core::RawPostFields;
use reqwest::{Client, Url};

use crate::error::PageError;
use crate::parse::{parse_post, post_links};
use crate::source::{PageSource, PostRef};

struct LoadedProfile {
    url: Url,
    html: String,
}

/// Renders pages through Browserless and parses them with [`crate::parse`].
pub struct BrowserlessPageSource {
    client: Client,
    base_url: String,
    token: Option<String>,
    profile: Option<LoadedProfile>,
    current_post: Option<String>,
}

impl BrowserlessPageSource {
    /// # Errors
    ///
    /// Returns [`PageError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            profile: None,
            current_post: None,
        })
    }

    /// `true` between a successful [`PageSource::open_post`] and the matching
    /// [`PageSource::close_post`].
    #[must_use]
    pub fn has_open_post(&self) -> bool {
        self.current_post.is_some()
    }

    /// Fetches fully rendered HTML for `url`.
    async fn content(&self, url: &str) -> Result<String, PageError> {
        let endpoint = format!("{}/content", self.base_url);
        let mut request = self
            .client
            .post(&endpoint)
            .json(&serde_json::json!({ "url": url }));
        if let Some(token) = self.token.as_deref() {
            request = request.query(&[("token", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PageError::from_request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| PageError::from_request(url, e))
    }
}

#[async_trait]
impl PageSource for BrowserlessPageSource {
    async fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        self.profile = None;
        self.current_post = None;

        let parsed = Url::parse(url).map_err(|e| PageError::Malformed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let html = self.content(url).await?;
        tracing::debug!(profile = %url, bytes = html.len(), "profile page rendered");

        self.profile = Some(LoadedProfile { url: parsed, html });
        Ok(())
    }

    async fn list_post_references(&mut self, max_n: usize) -> Result<Vec<PostRef>, PageError> {
        let profile = self.profile.as_ref().ok_or(PageError::NotLoaded)?;
        Ok(post_links(&profile.html, max_n)
            .into_iter()
            .map(PostRef::new)
            .collect())
    }

    async fn open_post(&mut self, post: &PostRef) -> Result<RawPostFields, PageError> {
        let profile = self.profile.as_ref().ok_or(PageError::NotLoaded)?;
        let post_url = profile
            .url
            .join(post.as_str())
            .map_err(|e| PageError::Malformed {
                url: post.to_string(),
                reason: e.to_string(),
            })?
            .to_string();

        let html = self.content(&post_url).await?;
        let raw = parse_post(&html, &post_url).ok_or_else(|| PageError::NotFound {
            what: format!("post content at {post_url}"),
        })?;
        self.current_post = Some(html);
        Ok(raw)
    }

    async fn close_post(&mut self) {
        self.current_post = None;
    }
}
