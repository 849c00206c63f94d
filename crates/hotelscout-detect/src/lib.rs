//! Post-level detection for sponsored hotel stays.
//!
//! Pulls hashtags and mentions out of captions, decides whether a post is a
//! paid placement, and proposes hotel identities worth enriching. Everything
//! here is pure and deterministic; no I/O.

pub mod candidates;
pub mod classifier;
pub mod signals;

pub use candidates::HotelCandidateFinder;
pub use classifier::SponsorshipClassifier;
pub use signals::{extract_hashtags, extract_mentions, TextSignals};
