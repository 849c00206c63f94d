//! Randomized pauses between posts and profiles, plus run cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hotelscout_core::PauseRange;

/// Bounded random delays inserted after each post and each profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub post: PauseRange,
    pub profile: PauseRange,
}

impl Pacing {
    #[must_use]
    pub fn new(post: PauseRange, profile: PauseRange) -> Self {
        Self { post, profile }
    }

    /// No pauses at all. Used by tests and `--no-pause`.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            post: PauseRange::disabled(),
            profile: PauseRange::disabled(),
        }
    }

    pub async fn after_post(&self) {
        pause(self.post).await;
    }

    pub async fn after_profile(&self) {
        pause(self.profile).await;
    }
}

/// Picks a delay uniformly from `range`; `None` when pauses are disabled.
#[must_use]
pub fn pick_delay(range: PauseRange) -> Option<Duration> {
    if range.is_disabled() {
        return None;
    }
    let ms = if range.min_ms >= range.max_ms {
        range.max_ms
    } else {
        rand::random_range(range.min_ms..=range.max_ms)
    };
    Some(Duration::from_millis(ms))
}

async fn pause(range: PauseRange) {
    if let Some(delay) = pick_delay(range) {
        tokio::time::sleep(delay).await;
    }
}

/// Cooperative cancellation flag shared between the signal handler and the
/// pipeline. Checked before each profile and each post.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
