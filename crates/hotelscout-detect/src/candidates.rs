//! Hotel identity candidates from post signals.

use std::collections::HashSet;

use hotelscout_core::{DetectionVocabulary, HotelCandidate};

use crate::signals::TextSignals;

/// Maximum length, in characters, of a caption-derived name fragment.
const MAX_FRAGMENT_CHARS: usize = 80;

/// Proposes hotel identities for a sponsored post.
///
/// Three passes run independently and their results are concatenated in
/// order (location, accounts, caption fragment) before a case-insensitive
/// dedup on `(name, handle)`. Callers that only want one candidate take the
/// first element; the rest of the list is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct HotelCandidateFinder {
    vocabulary: DetectionVocabulary,
}

impl HotelCandidateFinder {
    #[must_use]
    pub fn new(vocabulary: DetectionVocabulary) -> Self {
        Self {
            vocabulary: vocabulary.normalized(),
        }
    }

    /// Hashtags in `signals` are accepted for completeness but do not
    /// currently contribute candidates.
    #[must_use]
    pub fn find(
        &self,
        caption: &str,
        signals: &TextSignals,
        tagged_accounts: &[String],
        location_name: &str,
    ) -> Vec<HotelCandidate> {
        let mut candidates: Vec<HotelCandidate> = Vec::new();

        if let Some(c) = self.location_candidate(location_name) {
            candidates.push(c);
        }
        candidates.extend(self.account_candidates(tagged_accounts, &signals.mentions));
        if let Some(c) = self.caption_candidate(caption) {
            candidates.push(c);
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        candidates.retain(|c| seen.insert(c.dedup_key()));
        candidates
    }

    fn location_candidate(&self, location_name: &str) -> Option<HotelCandidate> {
        let location = location_name.trim();
        if location.is_empty() || !self.vocabulary.contains_hotel_term(&location.to_lowercase()) {
            return None;
        }
        HotelCandidate::named(location)
    }

    /// Tagged accounts first, then mentions; each handle is considered once.
    fn account_candidates(
        &self,
        tagged_accounts: &[String],
        mentions: &[String],
    ) -> Vec<HotelCandidate> {
        let mut seen: HashSet<&str> = HashSet::new();
        tagged_accounts
            .iter()
            .chain(mentions)
            .map(String::as_str)
            .filter(|account| seen.insert(*account))
            .map(|account| account.trim().trim_start_matches(['@', '/']))
            .filter(|handle| {
                !handle.is_empty() && self.vocabulary.contains_hotel_term(&handle.to_lowercase())
            })
            .filter_map(HotelCandidate::with_handle)
            .collect()
    }

    /// Name fragment starting at the first whole-word hotel term in the
    /// caption and running to the end of that line.
    fn caption_candidate(&self, caption: &str) -> Option<HotelCandidate> {
        let lower = caption.to_lowercase();
        let start = self.first_whole_word_term(&lower)?;
        let line = lower[start..].split('\n').next().unwrap_or_default();
        let fragment: String = line.chars().take(MAX_FRAGMENT_CHARS).collect();
        HotelCandidate::named(&fragment)
    }

    /// Byte offset of the earliest hotel term bounded by non-word characters.
    fn first_whole_word_term(&self, lower: &str) -> Option<usize> {
        self.vocabulary
            .hotel_terms
            .iter()
            .filter_map(|term| {
                lower
                    .match_indices(term.as_str())
                    .map(|(pos, _)| pos)
                    .find(|&pos| is_whole_word(lower, pos, term.len()))
            })
            .min()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_whole_word(text: &str, start: usize, len: usize) -> bool {
    let before_ok = !text[..start].chars().last().is_some_and(is_word_char);
    let after_ok = !text[start + len..].chars().next().is_some_and(is_word_char);
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn finder() -> HotelCandidateFinder {
        HotelCandidateFinder::default()
    }

    fn mentions(list: &[&str]) -> TextSignals {
        TextSignals {
            hashtags: Vec::new(),
            mentions: strings(list),
        }
    }

    fn none() -> TextSignals {
        TextSignals::default()
    }

    #[test]
    fn no_signals_yield_no_candidates() {
        assert!(finder().find("Beach day", &none(), &[], "").is_empty());
    }

    #[test]
    fn location_with_hotel_term_becomes_named_candidate() {
        let got = finder().find("", &none(), &[], "  Grand Hotel Paris ");
        assert_eq!(got, vec![HotelCandidate::named("Grand Hotel Paris").unwrap()]);
    }

    #[test]
    fn location_without_hotel_term_is_ignored() {
        assert!(finder().find("", &none(), &[], "Eiffel Tower").is_empty());
    }

    #[test]
    fn accounts_union_tagged_first_and_strips_prefixes() {
        let got = finder().find(
            "",
            &mentions(&["seaside_inn", "friend", "@GrandHotelSpa"]),
            &strings(&["@GrandHotelSpa", "/cliff_lodge"]),
            "",
        );
        let handles: Vec<&str> = got
            .iter()
            .filter_map(|c| c.instagram_handle.as_deref())
            .collect();
        assert_eq!(handles, vec!["GrandHotelSpa", "cliff_lodge", "seaside_inn"]);
    }

    #[test]
    fn caption_fragment_runs_from_term_to_end_of_line() {
        let got = finder().find(
            "Stayed at the Hotel Lumiere in Lyon!\nBest week ever",
            &none(),
            &[],
            "",
        );
        assert_eq!(
            got,
            vec![HotelCandidate::named("hotel lumiere in lyon!").unwrap()]
        );
    }

    #[test]
    fn caption_fragment_requires_whole_word() {
        // "spain" and "innsbruck" contain terms but not as whole words.
        assert!(finder().find("spain innsbruck tour", &none(), &[], "").is_empty());
    }

    #[test]
    fn caption_fragment_takes_earliest_term() {
        let got = finder().find("cozy inn next to the resort", &none(), &[], "");
        assert_eq!(got[0].name.as_deref(), Some("inn next to the resort"));
    }

    #[test]
    fn caption_fragment_is_truncated_and_trimmed() {
        let caption = format!("resort{}tail", " ".repeat(100));
        let got = finder().find(&caption, &none(), &[], "");
        assert_eq!(got[0].name.as_deref(), Some("resort"));
    }

    #[test]
    fn passes_concatenate_in_order_and_dedup_case_insensitively() {
        let got = finder().find(
            "hotel bella",
            &mentions(&["BellaHotel"]),
            &strings(&["bellahotel"]),
            "Hotel Bella",
        );
        assert_eq!(
            got,
            vec![
                HotelCandidate::named("Hotel Bella").unwrap(),
                HotelCandidate::with_handle("bellahotel").unwrap(),
            ]
        );
    }

    #[test]
    fn find_is_deterministic() {
        let f = finder();
        let signals = mentions(&["the_spa_club", "lakeside_lodge"]);
        let first = f.find("Spa day at the lodge", &signals, &[], "Blue Resort");
        let second = f.find("Spa day at the lodge", &signals, &[], "Blue Resort");
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn mixed_case_vocabulary_still_matches() {
        let vocabulary = DetectionVocabulary {
            hotel_terms: vec!["Ryokan".to_string()],
            ..DetectionVocabulary::default()
        };
        let f = HotelCandidateFinder::new(vocabulary);
        let got = f.find("Night at a ryokan", &none(), &strings(&["KyotoRyokan"]), "");
        assert_eq!(
            got,
            vec![
                HotelCandidate::with_handle("KyotoRyokan").unwrap(),
                HotelCandidate::named("ryokan").unwrap(),
            ]
        );
    }
}
