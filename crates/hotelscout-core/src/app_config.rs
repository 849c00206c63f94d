use std::path::PathBuf;

/// Inclusive millisecond range for the randomized pause between page views.
///
/// `{ min_ms: 0, max_ms: 0 }` disables the pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl PauseRange {
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(0, 0)
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.max_ms == 0
    }

    /// Parses `"min-max"` or a single fixed value `"ms"`.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when either bound is not a number or
    /// `min` exceeds `max`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let (min, max) = match raw.split_once('-') {
            Some((min, max)) => (min.trim(), max.trim()),
            None => (raw, raw),
        };
        let min_ms = min
            .parse::<u64>()
            .map_err(|e| format!("invalid lower bound \"{min}\": {e}"))?;
        let max_ms = max
            .parse::<u64>()
            .map_err(|e| format!("invalid upper bound \"{max}\": {e}"))?;
        if min_ms > max_ms {
            return Err(format!("lower bound {min_ms} exceeds upper bound {max_ms}"));
        }
        Ok(Self { min_ms, max_ms })
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub google_places_api_key: Option<String>,
    pub instagram_base_url: String,
    pub places_base_url: String,
    pub browserless_url: String,
    pub browserless_token: Option<String>,
    pub page_timeout_secs: u64,
    pub post_pause: PauseRange,
    pub profile_pause: PauseRange,
    pub vocabulary_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "google_places_api_key",
                &self.google_places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("instagram_base_url", &self.instagram_base_url)
            .field("places_base_url", &self.places_base_url)
            .field("browserless_url", &self.browserless_url)
            .field(
                "browserless_token",
                &self.browserless_token.as_ref().map(|_| "[redacted]"),
            )
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("post_pause", &self.post_pause)
            .field("profile_pause", &self.profile_pause)
            .field("vocabulary_path", &self.vocabulary_path)
            .finish()
    }
}
