use crate::app_config::{AppConfig, PauseRange};
use crate::ConfigError;

/// Desktop browser user agent sent with enrichment requests unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; this only fails on values that do not parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `KEY=` in a .env file disables a secret.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_pause = |var: &str, default: &str| -> Result<PauseRange, ConfigError> {
        let raw = or_default(var, default);
        PauseRange::parse(&raw).map_err(|reason| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        })
    };

    let log_level = or_default("HOTELSCOUT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("HOTELSCOUT_REQUEST_TIMEOUT_SECS", "20")?;
    let user_agent = or_default("HOTELSCOUT_USER_AGENT", DEFAULT_USER_AGENT);
    let google_places_api_key = optional("GOOGLE_PLACES_API_KEY");
    let instagram_base_url = or_default(
        "HOTELSCOUT_INSTAGRAM_BASE_URL",
        "https://www.instagram.com",
    );
    let places_base_url = or_default(
        "HOTELSCOUT_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place",
    );
    let browserless_url = or_default("HOTELSCOUT_BROWSERLESS_URL", "http://localhost:3000");
    let browserless_token = optional("BROWSERLESS_TOKEN");
    let page_timeout_secs = parse_u64("HOTELSCOUT_PAGE_TIMEOUT_SECS", "30")?;
    let post_pause = parse_pause("HOTELSCOUT_POST_PAUSE_MS", "400-800")?;
    let profile_pause = parse_pause("HOTELSCOUT_PROFILE_PAUSE_MS", "1000-2000")?;
    let vocabulary_path = optional("HOTELSCOUT_VOCABULARY_PATH").map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        user_agent,
        google_places_api_key,
        instagram_base_url,
        places_base_url,
        browserless_url,
        browserless_token,
        page_timeout_secs,
        post_pause,
        profile_pause,
        vocabulary_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
