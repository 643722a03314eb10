use thiserror::Error;

/// Errors returned by the CMS client and catalog.
///
/// Retrieval operations log and absorb every variant except
/// [`CmsError::CategoryNotFound`], which pages surface as a not-found.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CMS base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("category not found: {identifier}")]
    CategoryNotFound { identifier: String },
}
