//! Error types for the Skynet client.

use skynet_core::{CoreError, ValidationError};
use skynet_mysky::MyskyError;
use skynet_portal::PortalError;
use thiserror::Error;

/// Errors that can occur during client operations.
///
/// A registry 404 is never an error. It surfaces as an absent entry.
#[derive(Debug, Error)]
pub enum SkynetError {
    /// Malformed caller input, rejected before any network call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A registry entry failed signature verification.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// The registry slot has reached the maximum revision.
    #[error("revision {revision} is the maximum, this data key can no longer be written")]
    RevisionExhausted { revision: u64 },

    /// The portal failed or refused the request.
    #[error("transport error: {0}")]
    Transport(#[from] PortalError),

    /// Downloaded content is not what the entry promised.
    #[error("format error: {0}")]
    Format(String),

    /// The MySky delegate refused or failed.
    #[error("mysky error: {0}")]
    Mysky(MyskyError),
}

impl From<CoreError> for SkynetError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::RevisionExhausted { revision } => Self::RevisionExhausted { revision },
            CoreError::InvalidSignature => Self::Integrity(e.to_string()),
            other => Self::Validation(other.into()),
        }
    }
}

impl From<MyskyError> for SkynetError {
    fn from(e: MyskyError) -> Self {
        match e {
            MyskyError::Validation(e) => Self::Validation(e),
            MyskyError::Core(e) => e.into(),
            other => Self::Mysky(other),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, SkynetError>;
