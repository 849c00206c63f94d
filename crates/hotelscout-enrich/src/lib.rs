//! Contact enrichment for detected hotels.
//!
//! Resolves a hotel candidate into website, email, address, and phone by
//! walking a fixed waterfall: the candidate's public profile bio, a crawl of
//! the linked website, then a Places text-search/details lookup. Every stage
//! is best-effort; upstream failures only mean fewer fields.

pub mod client;
pub mod error;
pub mod markup;
pub mod places;
pub mod resolver;

pub use client::ContactClient;
pub use error::EnrichError;
pub use resolver::EnrichmentResolver;
