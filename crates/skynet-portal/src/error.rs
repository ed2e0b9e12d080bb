//! Error types for portal access.

use skynet_core::CoreError;
use thiserror::Error;

/// Errors that can occur while talking to a portal.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The portal answered with a non-success status.
    #[error("portal returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A portal URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A request or response body was not the expected JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response parsed but its contents make no sense.
    #[error("invalid portal response: {0}")]
    InvalidResponse(String),

    /// A header value supplied in the portal options is not valid.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    /// The registry refused an entry whose revision does not advance.
    #[error("revision {revision} rejected, registry already holds {current}")]
    RevisionRejected { revision: u64, current: u64 },

    /// The registry refused an entry for another reason.
    #[error("registry entry rejected: {0}")]
    EntryRejected(String),

    /// The requested blob does not exist.
    #[error("skylink not found: {0}")]
    NotFound(String),

    /// Core primitive failure.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl PortalError {
    /// HTTP status, if the portal answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Result type for portal operations.
pub type Result<T> = std::result::Result<T, PortalError>;
