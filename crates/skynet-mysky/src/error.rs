//! Error types for the MySky bridge.

use skynet_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur during MySky operations.
#[derive(Debug, Error)]
pub enum MyskyError {
    /// The delegate refused the request.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A path could not be sanitized.
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    /// Encryption error.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decryption error.
    #[error("decryption error: {0}")]
    Decryption(String),

    /// The bytes are not an encrypted file this crate can read.
    #[error("invalid encrypted file: {0}")]
    InvalidEncryptedFile(String),

    /// Caller input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for MySky operations.
pub type Result<T> = std::result::Result<T, MyskyError>;
