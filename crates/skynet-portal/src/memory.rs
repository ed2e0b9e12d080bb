//! In-memory implementation of the Portal trait.
//!
//! This is primarily for testing. It enforces the same registry rules as a
//! real portal (valid signature, bounded data, strictly increasing revision)
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use skynet_core::skylink::MAX_V1_FETCH_SIZE;
use skynet_core::{
    derive_registry_entry_id, validate_entry_structure, verify_registry_entry, Blake2bHash,
    Ed25519PublicKey, Ed25519Signature, RegistryEntry, Skylink,
};

use crate::error::{PortalError, Result};
use crate::messages::RawRegistryEntry;
use crate::traits::Portal;

/// In-memory portal implementation.
///
/// All data is lost when the portal is dropped. Thread-safe via RwLock.
pub struct MemoryPortal {
    inner: RwLock<MemoryPortalInner>,
}

#[derive(Default)]
struct MemoryPortalInner {
    /// Registry entries indexed by (owner, hashed data key).
    entries: HashMap<(Ed25519PublicKey, Blake2bHash), RawRegistryEntry>,

    /// Blobs indexed by their v1 skylink.
    blobs: HashMap<Skylink, StoredBlob>,

    uploads: usize,
    downloads: usize,
    registry_reads: usize,
    registry_writes: usize,
}

struct StoredBlob {
    data: Bytes,
    file_name: String,
    content_type: String,
}

/// Operation counters, for asserting what a client call actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortalStats {
    pub uploads: usize,
    pub downloads: usize,
    pub registry_reads: usize,
    pub registry_writes: usize,
}

impl MemoryPortal {
    /// Create a new empty in-memory portal.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryPortalInner::default()),
        }
    }

    /// Store a blob directly, without counting it as an upload.
    pub fn put_blob(&self, data: impl Into<Bytes>) -> Result<Skylink> {
        let data = data.into();
        let skylink = blob_skylink(&data)?;
        let mut inner = self.inner.write().unwrap();
        inner.blobs.insert(
            skylink,
            StoredBlob {
                data,
                file_name: String::new(),
                content_type: String::new(),
            },
        );
        Ok(skylink)
    }

    /// Store a registry entry without verifying it or checking its revision.
    pub fn insert_unchecked(
        &self,
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        signature: &Ed25519Signature,
    ) {
        let mut inner = self.inner.write().unwrap();
        inner.entries.insert(
            (*public_key, entry.data_key.hash()),
            RawRegistryEntry {
                data: entry.data.clone(),
                revision: entry.revision,
                signature: *signature,
            },
        );
    }

    /// The stored entry at `(public_key, data_key_hash)`, if any.
    pub fn entry(
        &self,
        public_key: &Ed25519PublicKey,
        data_key_hash: &Blake2bHash,
    ) -> Option<RawRegistryEntry> {
        let inner = self.inner.read().unwrap();
        inner.entries.get(&(*public_key, *data_key_hash)).cloned()
    }

    /// File name and content type an uploaded blob was stored with.
    pub fn blob_metadata(&self, skylink: &Skylink) -> Option<(String, String)> {
        let inner = self.inner.read().unwrap();
        inner
            .blobs
            .get(skylink)
            .map(|b| (b.file_name.clone(), b.content_type.clone()))
    }

    /// Operation counters so far.
    pub fn stats(&self) -> PortalStats {
        let inner = self.inner.read().unwrap();
        PortalStats {
            uploads: inner.uploads,
            downloads: inner.downloads,
            registry_reads: inner.registry_reads,
            registry_writes: inner.registry_writes,
        }
    }
}

impl Default for MemoryPortal {
    fn default() -> Self {
        Self::new()
    }
}

fn blob_skylink(data: &[u8]) -> Result<Skylink> {
    let root = Blake2bHash::hash(data);
    let fetch_size = (data.len() as u64).clamp(1, MAX_V1_FETCH_SIZE);
    Ok(Skylink::new_v1(&root, 0, fetch_size)?)
}

#[async_trait]
impl Portal for MemoryPortal {
    async fn get_registry_entry(
        &self,
        public_key: &Ed25519PublicKey,
        data_key_hash: &Blake2bHash,
        _timeout: Duration,
    ) -> Result<Option<RawRegistryEntry>> {
        let mut inner = self.inner.write().unwrap();
        inner.registry_reads += 1;
        Ok(inner.entries.get(&(*public_key, *data_key_hash)).cloned())
    }

    async fn post_registry_entry(
        &self,
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        signature: &Ed25519Signature,
    ) -> Result<()> {
        validate_entry_structure(entry)
            .map_err(|e| PortalError::EntryRejected(e.to_string()))?;
        verify_registry_entry(public_key, entry, signature)
            .map_err(|e| PortalError::EntryRejected(e.to_string()))?;

        let mut inner = self.inner.write().unwrap();
        let key = (*public_key, entry.data_key.hash());

        if let Some(existing) = inner.entries.get(&key) {
            if entry.revision <= existing.revision {
                return Err(PortalError::RevisionRejected {
                    revision: entry.revision,
                    current: existing.revision,
                });
            }
        }

        inner.entries.insert(
            key,
            RawRegistryEntry {
                data: entry.data.clone(),
                revision: entry.revision,
                signature: *signature,
            },
        );
        inner.registry_writes += 1;
        Ok(())
    }

    async fn upload(&self, data: Bytes, file_name: &str, content_type: &str) -> Result<Skylink> {
        let skylink = blob_skylink(&data)?;
        let mut inner = self.inner.write().unwrap();
        inner.blobs.insert(
            skylink,
            StoredBlob {
                data,
                file_name: file_name.to_string(),
                content_type: content_type.to_string(),
            },
        );
        inner.uploads += 1;
        Ok(skylink)
    }

    async fn download(&self, skylink: &Skylink) -> Result<Bytes> {
        let mut inner = self.inner.write().unwrap();
        inner.downloads += 1;

        // A v2 link resolves through the registry entry it names.
        let target = if skylink.is_v2() {
            let entry_id = skylink.merkle_root();
            inner
                .entries
                .iter()
                .find(|((pk, dk), _)| derive_registry_entry_id(pk, dk) == entry_id)
                .and_then(|(_, raw)| Skylink::from_bytes(&raw.data).ok())
                .ok_or_else(|| PortalError::NotFound(skylink.to_base64()))?
        } else {
            *skylink
        };

        inner
            .blobs
            .get(&target)
            .map(|b| b.data.clone())
            .ok_or_else(|| PortalError::NotFound(skylink.to_base64()))
    }
}
