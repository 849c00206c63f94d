use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 20);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert!(cfg.google_places_api_key.is_none());
    assert_eq!(cfg.instagram_base_url, "https://www.instagram.com");
    assert_eq!(
        cfg.places_base_url,
        "https://maps.googleapis.com/maps/api/place"
    );
    assert_eq!(cfg.browserless_url, "http://localhost:3000");
    assert!(cfg.browserless_token.is_none());
    assert_eq!(cfg.page_timeout_secs, 30);
    assert_eq!(cfg.post_pause, PauseRange::new(400, 800));
    assert_eq!(cfg.profile_pause, PauseRange::new(1000, 2000));
    assert!(cfg.vocabulary_path.is_none());
}

#[test]
fn places_key_is_read_from_env() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_PLACES_API_KEY", "places-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.google_places_api_key.as_deref(), Some("places-key"));
}

#[test]
fn blank_places_key_counts_as_unset() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_PLACES_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.google_places_api_key.is_none());
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("HOTELSCOUT_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("HOTELSCOUT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HOTELSCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(HOTELSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn post_pause_override_accepts_fixed_value() {
    let mut map = HashMap::new();
    map.insert("HOTELSCOUT_POST_PAUSE_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.post_pause.is_disabled());
}

#[test]
fn profile_pause_rejects_inverted_range() {
    let mut map = HashMap::new();
    map.insert("HOTELSCOUT_PROFILE_PAUSE_MS", "900-100");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "HOTELSCOUT_PROFILE_PAUSE_MS" && reason.contains("exceeds")),
        "expected InvalidEnvVar(HOTELSCOUT_PROFILE_PAUSE_MS), got: {result:?}"
    );
}

#[test]
fn vocabulary_path_override() {
    let mut map = HashMap::new();
    map.insert("HOTELSCOUT_VOCABULARY_PATH", "./config/vocabulary.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.vocabulary_path.as_deref(),
        Some(std::path::Path::new("./config/vocabulary.yaml"))
    );
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_PLACES_API_KEY", "super-secret");
    map.insert("BROWSERLESS_TOKEN", "token-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(!rendered.contains("token-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn pause_range_parse_trims_and_splits() {
    assert_eq!(PauseRange::parse(" 10 - 20 ").unwrap(), PauseRange::new(10, 20));
    assert_eq!(PauseRange::parse("15").unwrap(), PauseRange::new(15, 15));
    assert!(PauseRange::parse("a-b").is_err());
}
