//! Profile URL input from a CSV export.
//!
//! Spreadsheet exports arrive in whatever encoding the tool chose, so the
//! file is decoded as UTF-8, then BOM-tagged UTF-16, then Latin-1, and the
//! first decoding whose header row contains the URL column wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

const PROFILE_HOST: &str = "www.instagram.com";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no column matching \"{column}\" in {path} (tried: {tried})")]
    ColumnNotFound {
        path: PathBuf,
        column: String,
        tried: String,
    },
}

/// Reads, normalizes, and deduplicates the profile URLs in `path`.
///
/// # Errors
///
/// Returns [`InputError::Io`] if the file cannot be read and
/// [`InputError::ColumnNotFound`] if no decoding yields a matching header.
pub fn read_profile_urls(path: &Path, url_column: &str) -> Result<Vec<String>, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut tried: Vec<String> = Vec::new();
    for (encoding, text) in decodings(&bytes) {
        match urls_from_csv(&text, url_column) {
            Some(urls) => {
                tracing::debug!(path = %path.display(), encoding, count = urls.len(), "profile CSV decoded");
                return Ok(dedup(urls));
            }
            None => tried.push(format!("{encoding} (no matching column)")),
        }
    }

    Err(InputError::ColumnNotFound {
        path: path.to_path_buf(),
        column: url_column.to_string(),
        tried: tried.join(", "),
    })
}

/// Candidate decodings in preference order. Invalid ones are left out.
fn decodings(bytes: &[u8]) -> Vec<(&'static str, String)> {
    let mut out = Vec::with_capacity(3);

    let utf8 = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(utf8) {
        out.push(("utf-8", text.to_string()));
    }

    if let Some(text) = decode_utf16_with_bom(bytes) {
        out.push(("utf-16", text));
    }

    out.push(("latin-1", bytes.iter().map(|&b| char::from(b)).collect()));
    out
}

fn decode_utf16_with_bom(bytes: &[u8]) -> Option<String> {
    let (body, little_endian) = if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        (rest, true)
    } else if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        (rest, false)
    } else {
        return None;
    };
    if body.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

/// Normalized values of the URL column, or `None` when the header row has
/// no matching column.
fn urls_from_csv(text: &str, url_column: &str) -> Option<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers().ok()?.clone();
    let idx = find_column(headers.iter(), url_column)?;

    let mut urls = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => {
                let raw = record.get(idx).unwrap_or_default().trim();
                if !raw.is_empty() {
                    urls.push(normalize_profile_url(raw));
                }
            }
            Err(e) => tracing::warn!(error = %e, "skipping malformed CSV row"),
        }
    }
    Some(urls)
}

fn normalize_header(raw: &str) -> String {
    raw.replace('\u{feff}', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Exact normalized match first, then the first header containing the target.
fn find_column<'a>(headers: impl Iterator<Item = &'a str>, target: &str) -> Option<usize> {
    let target = normalize_header(target);
    let normalized: Vec<String> = headers.map(normalize_header).collect();
    normalized
        .iter()
        .position(|h| *h == target)
        .or_else(|| normalized.iter().position(|h| h.contains(&target)))
}

/// Canonical `https://host/path/` form of a profile URL or bare handle.
#[must_use]
pub fn normalize_profile_url(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }
    if !value.starts_with("http") {
        let handle = value.trim_start_matches(['@', '/']);
        return format!("https://{PROFILE_HOST}/{handle}/");
    }

    let Ok(parsed) = Url::parse(value) else {
        return with_trailing_slash(value);
    };
    let host = match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => PROFILE_HOST.to_string(),
    };
    let path = parsed.path();
    if path.is_empty() || path == "/" {
        return format!("https://{host}/");
    }
    with_trailing_slash(&format!("https://{host}{path}"))
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

fn dedup(urls: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    urls.into_iter()
        .filter(|u| seen.insert(u.clone()))
        .collect()
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;
