//! Error types for the Skynet core primitives.

use thiserror::Error;

/// Errors raised while decoding, hashing or verifying core data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid skylink: {0}")]
    InvalidSkylink(String),

    #[error("revision {revision} is already the maximum, entry cannot be updated")]
    RevisionExhausted { revision: u64 },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Malformed caller input, detected before anything leaves the process.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("invalid data key: {0}")]
    InvalidDataKey(String),

    #[error("entry data is {size} bytes, maximum is {max}")]
    EntryDataTooLarge { size: usize, max: usize },

    #[error("seed is {len} bytes, at least {min} are required")]
    SeedTooShort { len: usize, min: usize },

    #[error("invalid skylink: {0}")]
    InvalidSkylink(String),

    #[error("timeout must be between {min} and {max} seconds, got {got}")]
    InvalidTimeout { got: u64, min: u64, max: u64 },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("structural error: {0}")]
    StructuralError(String),
}

impl From<CoreError> for ValidationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidPublicKey => {
                ValidationError::InvalidPublicKey("not a valid ed25519 point".into())
            }
            CoreError::InvalidSkylink(msg) => ValidationError::InvalidSkylink(msg),
            other => ValidationError::StructuralError(other.to_string()),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
