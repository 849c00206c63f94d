//! Per-profile pipeline: list posts, then open, classify, enrich and close
//! each one in order.

use hotelscout_core::{HotelBlock, PostRecord, ProfileRecord, RawPostFields};
use hotelscout_detect::{HotelCandidateFinder, SponsorshipClassifier, TextSignals};
use hotelscout_enrich::EnrichmentResolver;

use crate::error::PageError;
use crate::pacing::{CancelToken, Pacing};
use crate::source::{PageSource, PostRef};

/// Where a post was when processing stopped. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStage {
    Opened,
    Extracted,
    Classified,
    Enriched,
    Closed,
}

/// Result of running one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// All listed posts were attempted. Failed posts are absent.
    Completed(ProfileRecord),
    /// The run was cancelled mid-profile; nothing should be persisted.
    Cancelled,
}

/// Drives a single profile's posts through detection and enrichment.
pub struct ProfilePipeline {
    classifier: SponsorshipClassifier,
    finder: HotelCandidateFinder,
    resolver: EnrichmentResolver,
    places_api_key: Option<String>,
    keyword_override: Option<Vec<String>>,
    pacing: Pacing,
    cancel: CancelToken,
}

impl ProfilePipeline {
    #[must_use]
    pub fn new(
        classifier: SponsorshipClassifier,
        finder: HotelCandidateFinder,
        resolver: EnrichmentResolver,
    ) -> Self {
        Self {
            classifier,
            finder,
            resolver,
            places_api_key: None,
            keyword_override: None,
            pacing: Pacing::disabled(),
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_places_api_key(mut self, key: Option<String>) -> Self {
        self.places_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Replaces the sponsor keyword list for every post of this run.
    #[must_use]
    pub fn with_keyword_override(mut self, keywords: Option<Vec<String>>) -> Self {
        self.keyword_override = keywords;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Processes up to `limit` posts of `profile_url`.
    ///
    /// Navigation or listing failures end the profile with no posts. A post
    /// that fails to open is skipped. The post view is closed after every
    /// post, successful or not.
    pub async fn run_profile<S>(
        &self,
        source: &mut S,
        profile_url: &str,
        limit: usize,
    ) -> ProfileOutcome
    where
        S: PageSource + ?Sized,
    {
        let refs = match load_listing(source, profile_url, limit).await {
            Ok(refs) => refs,
            Err(e) => {
                tracing::warn!(profile = %profile_url, error = %e, "failed to load post listing");
                return ProfileOutcome::Completed(ProfileRecord::empty(profile_url));
            }
        };
        tracing::debug!(profile = %profile_url, count = refs.len(), "post references listed");

        let mut record = ProfileRecord::empty(profile_url);
        for (idx, post_ref) in refs.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::info!(profile = %profile_url, done = idx, "cancelled mid-profile");
                return ProfileOutcome::Cancelled;
            }

            let result = self.process_post(source, post_ref).await;
            source.close_post().await;

            match result {
                Ok(post) => {
                    tracing::debug!(post = %post_ref, stage = ?PostStage::Closed, "post processed");
                    record.posts.push(post);
                }
                Err(e) => {
                    tracing::warn!(post = %post_ref, error = %e, "post failed to open; skipping");
                }
            }

            self.pacing.after_post().await;
        }

        ProfileOutcome::Completed(record)
    }

    async fn process_post<S>(&self, source: &mut S, post_ref: &PostRef) -> Result<PostRecord, PageError>
    where
        S: PageSource + ?Sized,
    {
        let raw = source.open_post(post_ref).await?;
        tracing::debug!(post = %post_ref, stage = ?PostStage::Opened, "post opened");
        Ok(self.build_record(raw).await)
    }

    /// Classifies one post and, when sponsored, enriches its first hotel
    /// candidate.
    pub async fn build_record(&self, raw: RawPostFields) -> PostRecord {
        tracing::debug!(
            post = %raw.post_url,
            stage = ?PostStage::Extracted,
            caption_chars = raw.caption.chars().count(),
            tagged = raw.tagged_accounts.len(),
            "post fields extracted"
        );
        let signals = TextSignals::from_text(&raw.caption);
        let verdict = self.classifier.classify_with_keywords(
            &raw.caption,
            raw.paid_banner,
            &raw.tagged_accounts,
            self.keyword_override.as_deref(),
        );
        tracing::debug!(
            post = %raw.post_url,
            stage = ?PostStage::Classified,
            sponsored = verdict.sponsored,
            "post classified"
        );

        let mut hotel = HotelBlock::default();
        if verdict.sponsored {
            let candidates = self.finder.find(
                &raw.caption,
                &signals,
                &raw.tagged_accounts,
                &raw.location_name,
            );
            if let Some(candidate) = candidates.first() {
                let enrichment = self
                    .resolver
                    .resolve(candidate, self.places_api_key.as_deref())
                    .await;
                tracing::debug!(
                    post = %raw.post_url,
                    stage = ?PostStage::Enriched,
                    source = %enrichment.source,
                    "hotel enriched"
                );
                hotel = HotelBlock::resolved(candidate, enrichment);
            }
        }

        PostRecord::assemble(raw, signals.hashtags, signals.mentions, verdict, hotel)
    }
}

async fn load_listing<S>(
    source: &mut S,
    profile_url: &str,
    limit: usize,
) -> Result<Vec<PostRef>, PageError>
where
    S: PageSource + ?Sized,
{
    source.navigate(profile_url).await?;
    source.list_post_references(limit).await
}
