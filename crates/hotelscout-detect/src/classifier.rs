//! Paid-placement classification.

use hotelscout_core::{DetectionVocabulary, SponsorReason, SponsorshipVerdict};

/// Decides whether a post is a paid placement and why.
///
/// Checks run in a fixed order and all of them run: the paid banner, then
/// sponsor keywords in the caption, then hotel-like tagged accounts.
#[derive(Debug, Clone, Default)]
pub struct SponsorshipClassifier {
    vocabulary: DetectionVocabulary,
}

impl SponsorshipClassifier {
    #[must_use]
    pub fn new(vocabulary: DetectionVocabulary) -> Self {
        Self {
            vocabulary: vocabulary.normalized(),
        }
    }

    /// Classifies a post using the configured sponsor keywords.
    #[must_use]
    pub fn classify(
        &self,
        caption: &str,
        paid_banner: bool,
        tagged_accounts: &[String],
    ) -> SponsorshipVerdict {
        self.classify_with_keywords(caption, paid_banner, tagged_accounts, None)
    }

    /// Classifies a post, optionally replacing the sponsor keyword list for
    /// this call only.
    ///
    /// An empty override behaves like no override.
    #[must_use]
    pub fn classify_with_keywords(
        &self,
        caption: &str,
        paid_banner: bool,
        tagged_accounts: &[String],
        keyword_override: Option<&[String]>,
    ) -> SponsorshipVerdict {
        let keywords = keyword_override
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.vocabulary.sponsor_keywords);
        let text = caption.to_lowercase();

        let mut reasons = Vec::with_capacity(3);
        if paid_banner {
            reasons.push(SponsorReason::Banner);
        }
        if keywords
            .iter()
            .any(|k| text.contains(k.to_lowercase().as_str()))
        {
            reasons.push(SponsorReason::Keyword);
        }
        if tagged_accounts
            .iter()
            .any(|handle| self.vocabulary.contains_hotel_term(&handle.to_lowercase()))
        {
            reasons.push(SponsorReason::TaggedHotel);
        }

        SponsorshipVerdict::from_reasons(reasons)
    }
}
