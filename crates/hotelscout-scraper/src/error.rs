use thiserror::Error;

/// Outcome tags for a failed call across the page-source boundary.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page element not found: {what}")]
    NotFound { what: String },

    #[error("timed out loading {url}")]
    Timeout { url: String },

    #[error("{url} is unavailable: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed page {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("no profile page is loaded")]
    NotLoaded,
}

impl PageError {
    /// Classifies a request failure for `url` as a timeout or as unavailable.
    pub(crate) fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Unavailable {
                url: url.to_string(),
                source,
            }
        }
    }
}
