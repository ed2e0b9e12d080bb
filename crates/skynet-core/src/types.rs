//! Strong type definitions for registry addressing.
//!
//! A data key is either a human string that must be hashed before it reaches
//! the wire, or a hash the caller already computed. The choice is made once,
//! when the key is resolved, and then travels with the key.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::{hash_all, Blake2bHash};
use crate::encoding::encode_utf8_string;
use crate::error::ValidationError;

/// Hash a plain data key: BLAKE2b-256 over the length-prefixed UTF-8 string.
pub fn hash_data_key(key: &str) -> Blake2bHash {
    hash_all(&[&encode_utf8_string(key)])
}

/// A logical key under a public key's registry namespace.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKey {
    /// A plain string, hashed with [`hash_data_key`] before use.
    Plain(String),
    /// An already hashed 32-byte key, passed through verbatim.
    Hashed(Blake2bHash),
}

impl DataKey {
    /// A plain, unhashed key.
    pub fn plain(key: impl Into<String>) -> Self {
        Self::Plain(key.into())
    }

    /// Parse a key the caller asserts is already a hex-encoded 32-byte hash.
    pub fn from_hashed_hex(hex: &str) -> Result<Self, ValidationError> {
        Blake2bHash::from_hex(hex)
            .map(Self::Hashed)
            .map_err(|e| ValidationError::InvalidDataKey(format!("{hex:?}: {e}")))
    }

    /// Resolve a caller-supplied key according to the `hashed_data_key_hex` flag.
    pub fn resolve(key: &str, hashed_data_key_hex: bool) -> Result<Self, ValidationError> {
        if hashed_data_key_hex {
            Self::from_hashed_hex(key)
        } else {
            Ok(Self::plain(key))
        }
    }

    /// The 32-byte hash that goes on the wire and into entry signatures.
    pub fn hash(&self) -> Blake2bHash {
        match self {
            Self::Plain(key) => hash_data_key(key),
            Self::Hashed(hash) => *hash,
        }
    }

    /// Hex of [`DataKey::hash`].
    pub fn to_hex(&self) -> String {
        self.hash().to_hex()
    }

    /// Whether the key was supplied pre-hashed.
    pub fn is_hashed(&self) -> bool {
        matches!(self, Self::Hashed(_))
    }
}

impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(key) => write!(f, "DataKey({key:?})"),
            Self::Hashed(hash) => write!(f, "DataKey({hash:?})"),
        }
    }
}

impl From<Blake2bHash> for DataKey {
    fn from(hash: Blake2bHash) -> Self {
        Self::Hashed(hash)
    }
}

impl From<&str> for DataKey {
    fn from(key: &str) -> Self {
        Self::plain(key)
    }
}

impl From<String> for DataKey {
    fn from(key: String) -> Self {
        Self::Plain(key)
    }
}
