use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_SPONSOR_KEYWORDS: &[&str] = &[
    "#ad",
    "#sponsored",
    "#partner",
    "#paidpartnership",
    "paid partnership",
    "partnered",
    "gifted",
    "gifted stay",
];

const DEFAULT_HOTEL_TERMS: &[&str] = &[
    "hotel", "resort", "inn", "lodge", "spa", "boutique", "suites",
];

fn default_sponsor_keywords() -> Vec<String> {
    DEFAULT_SPONSOR_KEYWORDS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_hotel_terms() -> Vec<String> {
    DEFAULT_HOTEL_TERMS.iter().map(ToString::to_string).collect()
}

/// Word lists driving sponsorship classification and hotel detection.
///
/// Passed explicitly into the classifier and candidate finder. Either list
/// may be omitted from a YAML override file, in which case the built-in
/// list is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionVocabulary {
    #[serde(default = "default_sponsor_keywords")]
    pub sponsor_keywords: Vec<String>,
    #[serde(default = "default_hotel_terms")]
    pub hotel_terms: Vec<String>,
}

impl Default for DetectionVocabulary {
    fn default() -> Self {
        Self {
            sponsor_keywords: default_sponsor_keywords(),
            hotel_terms: default_hotel_terms(),
        }
    }
}

impl DetectionVocabulary {
    /// Returns `true` if `lower` contains any hotel term as a substring.
    ///
    /// `lower` must already be lowercased.
    #[must_use]
    pub fn contains_hotel_term(&self, lower: &str) -> bool {
        self.hotel_terms.iter().any(|term| lower.contains(term.as_str()))
    }

    /// Lowercases and trims every entry.
    ///
    /// Matching assumes lowercase terms, so the classifier and the candidate
    /// finder normalize whatever vocabulary they are given.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for list in [&mut self.sponsor_keywords, &mut self.hotel_terms] {
            for entry in list.iter_mut() {
                *entry = entry.trim().to_lowercase();
            }
        }
        self
    }
}

/// Load and validate a vocabulary override from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_vocabulary(path: &Path) -> Result<DetectionVocabulary, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VocabularyIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_vocabulary(&content)
}

fn parse_vocabulary(content: &str) -> Result<DetectionVocabulary, ConfigError> {
    let vocabulary: DetectionVocabulary =
        serde_yaml::from_str(content).map_err(ConfigError::VocabularyParse)?;
    let vocabulary = vocabulary.normalized();
    validate_vocabulary(&vocabulary)?;
    Ok(vocabulary)
}

fn validate_vocabulary(vocabulary: &DetectionVocabulary) -> Result<(), ConfigError> {
    for (label, list) in [
        ("sponsor_keywords", &vocabulary.sponsor_keywords),
        ("hotel_terms", &vocabulary.hotel_terms),
    ] {
        if list.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{label} must contain at least one entry"
            )));
        }
        if list.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(format!(
                "{label} must not contain blank entries"
            )));
        }
    }
    Ok(())
}
