//! The `scan` command: profile CSV in, aggregate file out.
//!
//! Profiles run strictly one after another. A profile is appended to the
//! aggregate only once all of its posts are done, so Ctrl-C between posts
//! loses at most the profile in progress.

use anyhow::Context;
use hotelscout_core::{AppConfig, DetectionVocabulary, ProfileRecord};
use hotelscout_detect::{HotelCandidateFinder, SponsorshipClassifier};
use hotelscout_enrich::{ContactClient, EnrichmentResolver};
use hotelscout_scraper::{
    BrowserlessPageSource, CancelToken, PageSource, Pacing, ProfileOutcome, ProfilePipeline,
};
use hotelscout_store::AggregateStore;

use crate::input::read_profile_urls;
use crate::ScanArgs;

pub(crate) async fn run_scan(config: &AppConfig, args: &ScanArgs) -> anyhow::Result<()> {
    let urls = read_profile_urls(&args.csv, &args.url_column)?;
    if urls.is_empty() {
        anyhow::bail!("no profile URLs found in {}", args.csv.display());
    }

    let vocabulary = load_vocabulary(config, args)?;
    let client = ContactClient::with_base_urls(
        config.request_timeout_secs,
        &config.user_agent,
        &config.instagram_base_url,
        &config.places_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build enrichment client: {e}"))?;

    let pacing = if args.no_pause {
        Pacing::disabled()
    } else {
        Pacing::new(config.post_pause, config.profile_pause)
    };
    let cancel = CancelToken::new();
    listen_for_interrupt(cancel.clone());

    let places_key = args
        .google_places_key
        .clone()
        .or_else(|| config.google_places_api_key.clone());
    let pipeline = ProfilePipeline::new(
        SponsorshipClassifier::new(vocabulary.clone()),
        HotelCandidateFinder::new(vocabulary),
        EnrichmentResolver::new(client),
    )
    .with_places_api_key(places_key)
    .with_pacing(pacing)
    .with_cancel_token(cancel.clone());

    let mut source = BrowserlessPageSource::new(
        &config.browserless_url,
        config.browserless_token.as_deref(),
        config.page_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build page source: {e}"))?;

    let mut store = AggregateStore::open(&args.out_file, args.aggregate_format)
        .with_context(|| format!("failed to open {}", args.out_file.display()))?;

    let summary = scan_profiles(
        &pipeline,
        &mut source,
        &mut store,
        &urls,
        args.limit,
        &cancel,
    )
    .await?;

    tracing::info!(
        saved = summary.saved,
        skipped = summary.skipped,
        cancelled = summary.cancelled,
        total = urls.len(),
        path = %store.path().display(),
        format = %store.format(),
        "scan finished"
    );
    Ok(())
}

/// Counts from one pass over the profile list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanSummary {
    pub(crate) saved: usize,
    pub(crate) skipped: usize,
    pub(crate) cancelled: bool,
}

/// Runs every profile not yet in `store` and appends each completed one.
///
/// Stops at the first cancellation. A profile cancelled mid-run is never
/// appended.
pub(crate) async fn scan_profiles<S>(
    pipeline: &ProfilePipeline,
    source: &mut S,
    store: &mut AggregateStore,
    urls: &[String],
    limit: usize,
    cancel: &CancelToken,
) -> anyhow::Result<ScanSummary>
where
    S: PageSource + ?Sized,
{
    let total = urls.len();
    let mut summary = ScanSummary::default();
    for (idx, url) in urls.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::warn!("scan cancelled; stopping before next profile");
            summary.cancelled = true;
            break;
        }
        if store.is_processed(url) {
            tracing::info!(profile = %url, "Skipping already scraped");
            summary.skipped += 1;
            continue;
        }

        tracing::info!(profile = %url, "[{}/{}] scanning profile", idx + 1, total);
        match pipeline.run_profile(source, url, limit).await {
            ProfileOutcome::Completed(record) => {
                log_profile_summary(&record);
                store
                    .append(record)
                    .with_context(|| format!("failed to save profile {url}"))?;
                summary.saved += 1;
            }
            ProfileOutcome::Cancelled => {
                tracing::warn!(profile = %url, "scan cancelled mid-profile; profile not saved");
                summary.cancelled = true;
                break;
            }
        }

        pipeline.pacing().after_profile().await;
    }
    Ok(summary)
}

fn load_vocabulary(config: &AppConfig, args: &ScanArgs) -> anyhow::Result<DetectionVocabulary> {
    match args.vocabulary.as_ref().or(config.vocabulary_path.as_ref()) {
        Some(path) => hotelscout_core::load_vocabulary(path)
            .with_context(|| format!("failed to load vocabulary {}", path.display())),
        None => Ok(DetectionVocabulary::default()),
    }
}

fn listen_for_interrupt(cancel: CancelToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("interrupt received; finishing the current post");
                cancel.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "failed to listen for ctrl-c"),
        }
    });
}

fn log_profile_summary(record: &ProfileRecord) {
    let sponsored = record.posts.iter().filter(|p| p.sponsored).count();
    let hotels = record.posts.iter().filter(|p| !p.hotel.is_empty()).count();
    tracing::info!(
        profile = %record.profile_url,
        posts = record.posts.len(),
        sponsored,
        hotels,
        "profile complete"
    );
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
