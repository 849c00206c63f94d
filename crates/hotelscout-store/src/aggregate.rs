//! The aggregate output file and resume bookkeeping.
//!
//! Two encodings are supported:
//! - `json`: one document `{"profiles": [...]}`, rewritten in full through a
//!   temp file and a rename after every profile.
//! - `ndjson`: one profile object per line, appended.
//!
//! Either way a profile is written only once it is complete, so an
//! interrupted run never leaves a partial record behind.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hotelscout_core::ProfileRecord;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregateFormat {
    #[default]
    Json,
    Ndjson,
}

impl AggregateFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for AggregateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            other => Err(StoreError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AggregateDocument {
    profiles: Vec<ProfileRecord>,
}

/// Append-only store of finished profiles, keyed by profile URL.
#[derive(Debug)]
pub struct AggregateStore {
    path: PathBuf,
    format: AggregateFormat,
    processed: HashSet<String>,
    /// Full document contents; only kept for the `json` encoding.
    profiles: Vec<ProfileRecord>,
}

impl AggregateStore {
    /// Opens `path`, loading the URLs of already-processed profiles.
    ///
    /// A missing file starts empty. A file that cannot be parsed also starts
    /// empty, with a warning; it will be overwritten on the next append.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if an existing file cannot be read.
    pub fn open(path: impl Into<PathBuf>, format: AggregateFormat) -> Result<Self, StoreError> {
        let path = path.into();
        let mut store = Self {
            path,
            format,
            processed: HashSet::new(),
            profiles: Vec::new(),
        };

        let raw = match fs::read_to_string(&store.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(store),
            Err(e) => return Err(StoreError::io(&store.path, e)),
        };

        match format {
            AggregateFormat::Json => match parse_json_document(&raw) {
                Ok(profiles) => store.profiles = profiles,
                Err(e) => {
                    tracing::warn!(
                        path = %store.path.display(),
                        error = %e,
                        "aggregate file is not valid JSON; starting empty"
                    );
                }
            },
            AggregateFormat::Ndjson => {
                store.profiles = parse_ndjson(&raw, &store.path);
            }
        }

        store.processed = store
            .profiles
            .iter()
            .map(|p| p.profile_url.clone())
            .collect();
        if format == AggregateFormat::Ndjson {
            store.profiles.clear();
        }

        tracing::debug!(
            path = %store.path.display(),
            format = %format,
            processed = store.processed.len(),
            "aggregate store opened"
        );
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> AggregateFormat {
        self.format
    }

    #[must_use]
    pub fn is_processed(&self, profile_url: &str) -> bool {
        self.processed.contains(profile_url)
    }

    /// Number of profiles already persisted.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Persists one finished profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on any filesystem failure and
    /// [`StoreError::Json`] if the record cannot be serialized.
    pub fn append(&mut self, record: ProfileRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let url = record.profile_url.clone();
        match self.format {
            AggregateFormat::Ndjson => self.append_line(&record)?,
            AggregateFormat::Json => {
                self.profiles.push(record);
                if let Err(e) = self.rewrite_document() {
                    self.profiles.pop();
                    return Err(e);
                }
            }
        }
        self.processed.insert(url);
        Ok(())
    }

    fn append_line(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))
    }

    fn rewrite_document(&self) -> Result<(), StoreError> {
        let document = AggregateDocumentRef {
            profiles: &self.profiles,
        };
        let raw = serde_json::to_vec_pretty(&document)?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, raw).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}

#[derive(Serialize)]
struct AggregateDocumentRef<'a> {
    profiles: &'a [ProfileRecord],
}

/// Parses `{"profiles": [...]}`, also accepting a bare array of profiles.
fn parse_json_document(raw: &str) -> Result<Vec<ProfileRecord>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<AggregateDocument>(raw)
        .map(|doc| doc.profiles)
        .or_else(|e| serde_json::from_str::<Vec<ProfileRecord>>(raw).map_err(|_| e))
}

/// Parses one profile per non-blank line. Unparseable lines are skipped.
fn parse_ndjson(raw: &str, path: &Path) -> Vec<ProfileRecord> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match serde_json::from_str::<ProfileRecord>(line) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = idx + 1,
                    error = %e,
                    "skipping unparseable aggregate line"
                );
                None
            }
        })
        .collect()
}

/// Reads every profile from an aggregate file in either encoding.
///
/// The JSON document form is tried first; anything else is read as one
/// profile per line.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read.
pub fn read_profiles(path: &Path) -> Result<Vec<ProfileRecord>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    match parse_json_document(&raw) {
        Ok(profiles) => Ok(profiles),
        Err(_) => Ok(parse_ndjson(&raw, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<AggregateFormat>().unwrap(), AggregateFormat::Json);
        assert_eq!(" ndjson ".parse::<AggregateFormat>().unwrap(), AggregateFormat::Ndjson);
        assert!(matches!(
            "yaml".parse::<AggregateFormat>(),
            Err(StoreError::UnknownFormat(_))
        ));
    }

    #[test]
    fn json_document_accepts_bare_array() {
        let profiles =
            parse_json_document(r#"[{"profile_url":"https://www.instagram.com/a/","posts":[]}]"#)
                .unwrap();
        assert_eq!(profiles.len(), 1);
    }

    #[test]
    fn json_document_rejects_single_ndjson_line() {
        let line = r#"{"profile_url":"https://www.instagram.com/a/","posts":[]}"#;
        assert!(parse_json_document(line).is_err());
    }

    #[test]
    fn ndjson_skips_blank_and_bad_lines() {
        let raw = "{\"profile_url\":\"https://www.instagram.com/a/\"}\n\nnot json\n{\"profile_url\":\"https://www.instagram.com/b/\",\"posts\":[]}\n";
        let profiles = parse_ndjson(raw, Path::new("mem.ndjson"));
        let urls: Vec<&str> = profiles.iter().map(|p| p.profile_url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://www.instagram.com/a/", "https://www.instagram.com/b/"]
        );
    }
}
