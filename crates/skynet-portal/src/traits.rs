//! Portal trait: the abstract interface to a Skynet portal.
//!
//! The client is portal-agnostic. Implementations include HTTP (primary) and
//! in-memory (for tests).

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use skynet_core::{
    Blake2bHash, Ed25519PublicKey, Ed25519Signature, RegistryEntry, Skylink,
};

use crate::error::Result;
use crate::messages::RawRegistryEntry;

/// Content type used for SkyDB blobs.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The Portal trait: async interface for registry and blob access.
///
/// # Design Notes
///
/// - **Not found is a value**: a missing registry entry is `Ok(None)`, never
///   an error.
/// - **No verification**: implementations return what the portal holds. The
///   caller checks signatures.
/// - **No retries**: every failure is returned to the caller as is.
#[async_trait]
pub trait Portal: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Registry Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up the entry at `(public_key, data_key_hash)`.
    ///
    /// `timeout` is forwarded to the portal, which gives up waiting for the
    /// network after that long.
    async fn get_registry_entry(
        &self,
        public_key: &Ed25519PublicKey,
        data_key_hash: &Blake2bHash,
        timeout: Duration,
    ) -> Result<Option<RawRegistryEntry>>;

    /// Submit a signed entry.
    ///
    /// The portal rejects entries whose revision does not exceed the stored
    /// one. That check is the only ordering between concurrent writers.
    async fn post_registry_entry(
        &self,
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        signature: &Ed25519Signature,
    ) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Blob Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Upload a blob and return its skylink.
    async fn upload(&self, data: Bytes, file_name: &str, content_type: &str) -> Result<Skylink>;

    /// Download the blob behind a skylink.
    async fn download(&self, skylink: &Skylink) -> Result<Bytes>;
}
