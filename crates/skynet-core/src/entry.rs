//! Registry entries: the signed, versioned `(public key, data key) -> data`
//! mapping kept by a portal.
//!
//! An entry is never edited in place. A write publishes a new entry with a
//! strictly higher revision, signed over [`hash_registry_entry`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::crypto::{hash_all, Blake2bHash, Ed25519PublicKey, Ed25519Signature, Keypair};
use crate::encoding::{encode_prefixed_bytes, encode_u64_le};
use crate::error::{CoreError, Result, ValidationError};
use crate::skylink::{Skylink, RAW_SKYLINK_SIZE};
use crate::types::DataKey;

/// Largest revision a registry entry can carry.
pub const MAX_REVISION: u64 = u64::MAX;

/// Maximum size of the data field of a registry entry.
pub const MAX_ENTRY_DATA_SIZE: usize = 113;

/// Maximum size of raw data written through the entry-data helpers.
pub const MAX_ENTRY_DATA_RAW: usize = 70;

/// A registry entry before signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The slot within the owner's namespace.
    pub data_key: DataKey,

    /// Entry payload. For SkyDB this is a raw 34-byte skylink.
    pub data: Bytes,

    /// Strictly increasing version counter.
    pub revision: u64,
}

impl RegistryEntry {
    /// Create an entry without validating the data size.
    pub fn new(data_key: DataKey, data: impl Into<Bytes>, revision: u64) -> Self {
        Self {
            data_key,
            data: data.into(),
            revision,
        }
    }

    /// Start building an entry for `data_key`.
    pub fn builder(data_key: DataKey) -> RegistryEntryBuilder {
        RegistryEntryBuilder::new(data_key)
    }

    /// The digest that gets signed.
    pub fn hash(&self) -> Blake2bHash {
        hash_registry_entry(self)
    }

    /// Sign this entry.
    pub fn sign(&self, keypair: &Keypair) -> Ed25519Signature {
        keypair.sign(self.hash().as_bytes())
    }

    /// Whether the data is the 34-byte all-zero deletion marker.
    pub fn is_deletion_sentinel(&self) -> bool {
        self.data.len() == RAW_SKYLINK_SIZE && self.data.iter().all(|b| *b == 0)
    }
}

/// Hash an entry for signing:
/// `hash_all(data_key_hash, prefixed(data), u64_le(revision))`.
///
/// A plain data key is hashed first. A pre-hashed one is used as is.
pub fn hash_registry_entry(entry: &RegistryEntry) -> Blake2bHash {
    hash_all(&[
        entry.data_key.hash().as_bytes(),
        &encode_prefixed_bytes(&entry.data),
        &encode_u64_le(entry.revision),
    ])
}

/// The revision the next write must use, given the current one.
///
/// `None` (no entry yet) gives 0. Once an entry reaches [`MAX_REVISION`] the
/// slot can never be written again under the same key pair.
pub fn next_revision(current: Option<u64>) -> Result<u64> {
    match current {
        None => Ok(0),
        Some(revision) => revision
            .checked_add(1)
            .ok_or(CoreError::RevisionExhausted { revision }),
    }
}

/// A registry lookup result. Both fields are absent when nothing is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRegistryEntry {
    pub entry: Option<RegistryEntry>,
    pub signature: Option<Ed25519Signature>,
}

impl SignedRegistryEntry {
    /// A found entry with its signature.
    pub fn found(entry: RegistryEntry, signature: Ed25519Signature) -> Self {
        Self {
            entry: Some(entry),
            signature: Some(signature),
        }
    }

    /// The "never written" value.
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        self.entry.is_some()
    }

    /// Revision of the stored entry, if any.
    pub fn revision(&self) -> Option<u64> {
        self.entry.as_ref().map(|e| e.revision)
    }
}

/// The `sia:` v2 skylink addressing a registry slot.
///
/// Pure: it names whatever is stored at `(public_key, data_key)`, now or
/// later.
pub fn entry_link(public_key: &Ed25519PublicKey, data_key: &DataKey) -> String {
    Skylink::new_v2(public_key, &data_key.hash()).to_uri()
}

/// Builder for registry entries.
pub struct RegistryEntryBuilder {
    data_key: DataKey,
    data: Bytes,
    revision: u64,
}

impl RegistryEntryBuilder {
    /// Start building an entry.
    pub fn new(data_key: DataKey) -> Self {
        Self {
            data_key,
            data: Bytes::new(),
            revision: 0,
        }
    }

    /// Set the data.
    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    /// Point the entry at a skylink.
    pub fn skylink(mut self, skylink: &Skylink) -> Self {
        self.data = Bytes::copy_from_slice(skylink.as_bytes());
        self
    }

    /// Fill the data with the deletion sentinel.
    pub fn deletion_sentinel(mut self) -> Self {
        self.data = Bytes::from_static(&[0u8; RAW_SKYLINK_SIZE]);
        self
    }

    /// Set the revision.
    pub fn revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Validate and return the unsigned entry.
    pub fn build(self) -> std::result::Result<RegistryEntry, ValidationError> {
        if self.data.len() > MAX_ENTRY_DATA_SIZE {
            return Err(ValidationError::EntryDataTooLarge {
                size: self.data.len(),
                max: MAX_ENTRY_DATA_SIZE,
            });
        }
        Ok(RegistryEntry {
            data_key: self.data_key,
            data: self.data,
            revision: self.revision,
        })
    }

    /// Validate, then sign.
    pub fn sign(
        self,
        keypair: &Keypair,
    ) -> std::result::Result<(RegistryEntry, Ed25519Signature), ValidationError> {
        let entry = self.build()?;
        let signature = entry.sign(keypair);
        Ok((entry, signature))
    }
}
