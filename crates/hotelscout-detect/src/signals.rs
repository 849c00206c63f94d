//! Hashtag and mention token scanning.
//!
//! A token is a run of word characters following a sigil (`#` or `@`) that is
//! not itself preceded by a word character, so `"email#ad"` yields nothing
//! while `"great #ad"` yields `"ad"`. Mentions additionally allow `.` inside
//! the token. Tokens are capped at [`MAX_TOKEN_CHARS`] characters.
//!
//! Deduplication is by exact string: `"#Spa #spa"` yields both tokens.

use std::collections::HashSet;

/// Upper bound on captured token length, in characters.
const MAX_TOKEN_CHARS: usize = 100;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_mention_char(c: char) -> bool {
    is_word_char(c) || c == '.'
}

/// Hashtags and mentions found in one caption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSignals {
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
}

impl TextSignals {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            hashtags: extract_hashtags(text),
            mentions: extract_mentions(text),
        }
    }
}

/// Hashtag tokens in first-occurrence order, without the leading `#`.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    scan_tokens(text, '#', is_word_char)
}

/// Mention tokens in first-occurrence order, without the leading `@`.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    scan_tokens(text, '@', is_mention_char)
}

fn scan_tokens(text: &str, sigil: char, allowed: fn(char) -> bool) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == sigil && !prev.is_some_and(is_word_char) {
            let mut token = String::new();
            let mut taken = 0usize;
            while taken < MAX_TOKEN_CHARS {
                match chars.peek() {
                    Some(&next) if allowed(next) => {
                        token.push(next);
                        chars.next();
                        taken += 1;
                    }
                    _ => break,
                }
            }
            if let Some(last) = token.chars().last() {
                prev = Some(last);
                if seen.insert(token.clone()) {
                    tokens.push(token);
                }
                continue;
            }
        }
        prev = Some(c);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_hashtags("").is_empty());
        assert!(extract_mentions("").is_empty());
        assert_eq!(TextSignals::from_text(""), TextSignals::default());
    }

    #[test]
    fn dedup_is_exact_string_and_keeps_first_order() {
        let signals = TextSignals::from_text("Loving this #Spa #spa @Visit.Here #Spa");
        assert_eq!(signals.hashtags, vec!["Spa", "spa"]);
        assert_eq!(signals.mentions, vec!["Visit.Here"]);
    }

    #[test]
    fn sigil_after_word_char_is_not_a_token() {
        assert!(extract_hashtags("email#ad").is_empty());
        assert_eq!(extract_hashtags("great #ad"), vec!["ad"]);
        assert!(extract_mentions("contact me at info@hotel.com").is_empty());
    }

    #[test]
    fn hashtags_stop_at_punctuation() {
        assert_eq!(
            extract_hashtags("#gifted, #travel! (#beach_life)"),
            vec!["gifted", "travel", "beach_life"]
        );
    }

    #[test]
    fn hashtags_do_not_include_dots() {
        assert_eq!(extract_hashtags("#hotel.life"), vec!["hotel"]);
    }

    #[test]
    fn mentions_keep_dots_inside() {
        assert_eq!(
            extract_mentions("thanks @the.grand.hotel for the stay"),
            vec!["the.grand.hotel"]
        );
    }

    #[test]
    fn lone_sigil_is_ignored() {
        assert!(extract_hashtags("# nothing here #").is_empty());
        assert!(extract_mentions("@ @ @").is_empty());
    }

    #[test]
    fn double_sigil_matches_second() {
        assert_eq!(extract_hashtags("##tag"), vec!["tag"]);
    }

    #[test]
    fn adjacent_tokens_without_space_are_not_split() {
        // The second `#` follows the word char `a`.
        assert_eq!(extract_hashtags("#a#b"), vec!["a"]);
    }

    #[test]
    fn mention_ending_in_dot_allows_following_mention() {
        assert_eq!(extract_mentions("@foo.@bar"), vec!["foo.", "bar"]);
    }

    #[test]
    fn long_tokens_are_capped_at_one_hundred_chars() {
        let long = "a".repeat(150);
        let tags = extract_hashtags(&format!("#{long} #next"));
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].chars().count(), 100);
        assert_eq!(tags[1], "next");
    }

    #[test]
    fn unicode_word_characters_are_accepted() {
        assert_eq!(extract_hashtags("#café #東京"), vec!["café", "東京"]);
    }
}
