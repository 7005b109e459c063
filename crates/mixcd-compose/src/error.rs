//! Error types for catalog access, composition, and authentication.

use mixcd_core::model::TrackId;
use thiserror::Error;

/// Errors raised by a catalog request.
///
/// These never escape the composition pipeline: every stage absorbs them
/// and contributes no candidates instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success status.
    #[error("HTTP {status} from {endpoint}: {message}")]
    Http {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The bearer credential was missing, expired, or revoked.
    #[error("unauthorized request to {endpoint}")]
    Unauthorized { endpoint: String },

    /// The catalog returned a rate-limit response.
    #[error("rate limited by catalog at {endpoint}")]
    RateLimited { endpoint: String },

    /// The requested entity does not exist in the catalog.
    #[error("not found: {entity}")]
    NotFound { entity: String },

    /// A response body could not be parsed.
    #[error("parse error from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    /// The configured API base URL cannot carry endpoint paths.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Transport failure or timeout propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl CatalogError {
    /// Returns `true` when the error is transient and the request may
    /// succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` when the error indicates the entity was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Failures that abort a composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The seed track could not be fetched; nothing can be composed.
    #[error("seed track {track_id} is unavailable")]
    SeedUnavailable { track_id: TrackId },
}

/// Errors from the OAuth authorization-code flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint answered without an access token.
    #[error("token request rejected: {error}{}", parenthesize(.description))]
    Rejected {
        error: String,
        description: Option<String>,
    },

    /// No client id is configured.
    #[error("no OAuth client id configured")]
    MissingClientId,

    /// An authorization URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The token response could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Transport failure propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

fn parenthesize(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}
