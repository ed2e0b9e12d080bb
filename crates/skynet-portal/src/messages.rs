//! Wire messages for the portal HTTP API.
//!
//! The registry carries revisions as full 64-bit integers. Responses may
//! quote them as decimal strings, requests always send a bare JSON integer.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use skynet_core::{Blake2bHash, Ed25519PublicKey, Ed25519Signature, RegistryEntry};
use url::Url;

use crate::error::{PortalError, Result};

/// Path of the registry endpoint, relative to the portal root.
pub const REGISTRY_PATH: &str = "skynet/registry";

/// Path of the upload endpoint, relative to the portal root.
pub const UPLOAD_PATH: &str = "skynet/skyfile";

/// A registry entry as the portal returns it, before signature checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRegistryEntry {
    pub data: Bytes,
    pub revision: u64,
    pub signature: Ed25519Signature,
}

/// GET `/skynet/registry` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntryResponse {
    /// Hex-encoded entry data.
    pub data: String,

    #[serde(deserialize_with = "deserialize_revision")]
    pub revision: u64,

    /// Hex-encoded 64-byte signature.
    pub signature: String,
}

impl RegistryEntryResponse {
    /// Decode the hex fields.
    pub fn into_raw(self) -> Result<RawRegistryEntry> {
        let data = hex::decode(&self.data)
            .map_err(|e| PortalError::InvalidResponse(format!("entry data: {e}")))?;
        let signature = Ed25519Signature::from_hex(&self.signature)
            .map_err(|e| PortalError::InvalidResponse(format!("entry signature: {e}")))?;
        Ok(RawRegistryEntry {
            data: Bytes::from(data),
            revision: self.revision,
            signature,
        })
    }
}

/// The `publickey` object of a registry POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyJson {
    pub algorithm: String,
    pub key: Vec<u8>,
}

/// POST `/skynet/registry` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntryRequest {
    pub publickey: PublicKeyJson,
    pub datakey: String,
    pub revision: u64,
    pub data: Vec<u8>,
    pub signature: Vec<u8>,
}

impl RegistryEntryRequest {
    /// Build the body for a signed entry.
    pub fn new(
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        signature: &Ed25519Signature,
    ) -> Self {
        Self {
            publickey: PublicKeyJson {
                algorithm: "ed25519".to_string(),
                key: public_key.as_bytes().to_vec(),
            },
            datakey: entry.data_key.to_hex(),
            revision: entry.revision,
            data: entry.data.to_vec(),
            signature: signature.as_bytes().to_vec(),
        }
    }
}

/// POST `/skynet/skyfile` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub skylink: String,
    #[serde(default)]
    pub merkleroot: Option<String>,
    #[serde(default)]
    pub bitfield: Option<u16>,
}

/// The portal root as a join base.
///
/// `Url::join` replaces the last path segment unless the base ends with `/`,
/// so `https://host/base` becomes `https://host/base/`.
pub fn portal_root(mut portal: Url) -> Url {
    if !portal.path().ends_with('/') {
        let path = format!("{}/", portal.path());
        portal.set_path(&path);
    }
    portal
}

/// Build the registry lookup URL:
/// `{portal}/skynet/registry?publickey=ed25519%3A<hex>&datakey=<hex>&timeout=<secs>`.
pub fn registry_lookup_url(
    portal: &Url,
    public_key: &Ed25519PublicKey,
    data_key_hash: &Blake2bHash,
    timeout: Duration,
) -> Result<Url> {
    let mut url = portal_root(portal.clone()).join(REGISTRY_PATH)?;
    url.query_pairs_mut()
        .append_pair("publickey", &public_key.to_prefixed_hex())
        .append_pair("datakey", &data_key_hash.to_hex())
        .append_pair("timeout", &timeout.as_secs().to_string());
    Ok(url)
}

/// Accept a revision quoted as a decimal string or as a bare integer.
pub fn deserialize_revision<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct RevisionVisitor;

    impl<'de> Visitor<'de> for RevisionVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned 64-bit revision as a decimal string or integer")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<u64, E> {
            u64::try_from(value).map_err(|_| E::custom(format!("negative revision {value}")))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<u64, E> {
            value
                .parse::<u64>()
                .map_err(|e| E::custom(format!("revision {value:?}: {e}")))
        }
    }

    deserializer.deserialize_any(RevisionVisitor)
}
