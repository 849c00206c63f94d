//! The page-source boundary consumed by the profile pipeline.
//!
//! Implementations own whatever session or rendering machinery they need;
//! an established session is a precondition of constructing one.

use async_trait::async_trait;
use hotelscout_core::RawPostFields;

use crate::error::PageError;

/// Opaque reference to one post on a loaded profile page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostRef(String);

impl PostRef {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders profile and post pages and yields their raw fields.
#[async_trait]
pub trait PageSource: Send {
    /// Loads the profile page at `url`.
    async fn navigate(&mut self, url: &str) -> Result<(), PageError>;

    /// Up to `max_n` post references in page layout order.
    async fn list_post_references(&mut self, max_n: usize) -> Result<Vec<PostRef>, PageError>;

    /// Opens one post and extracts its raw fields.
    ///
    /// Fails with [`PageError::NotFound`] when the post has vanished and
    /// [`PageError::Timeout`] when its detail view never appeared.
    async fn open_post(&mut self, post: &PostRef) -> Result<RawPostFields, PageError>;

    /// Dismisses the current post view. Idempotent.
    async fn close_post(&mut self);
}
