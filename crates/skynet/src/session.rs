//! MySky sessions.
//!
//! A [`MySky`] handle pairs a client with a signing [`Delegate`] and the app
//! domain it acts for. Data keys come from file paths, and every write is
//! signed by the delegate, so the session never holds the user's private
//! key.
//!
//! Encrypted calls fetch the user id and the path seed from the delegate
//! concurrently before touching the registry.

use std::sync::Arc;

use bytes::Bytes;
use skynet_core::{
    decode_skylink, entry_link, DataKey, Ed25519PublicKey, RegistryEntry, ValidationError,
    MAX_ENTRY_DATA_RAW, RAW_SKYLINK_SIZE,
};
use skynet_mysky::{
    decrypt_json_file, derive_discoverable_file_tweak, derive_encrypted_file_key,
    derive_encrypted_file_tweak, encrypt_json_file, CheckPermissionsResponse, Delegate,
    EncryptionKey, JsonData, PathSeed, PermCategory, PermType, Permission,
};
use skynet_portal::Portal;

use crate::client::SkynetClient;
use crate::config::{CallOptions, ResolvedOptions};
use crate::error::Result;
use crate::skydb::JsonResponse;

/// Content type of encrypted blobs.
pub const ENCRYPTED_CONTENT_TYPE: &str = "application/octet-stream";

/// A MySky session for one app domain.
pub struct MySky<P: Portal, D: Delegate> {
    client: SkynetClient<P>,
    delegate: Arc<D>,
    domain: String,
}

impl<P: Portal, D: Delegate> MySky<P, D> {
    /// Open a session for `domain` backed by `delegate`.
    pub fn new(client: SkynetClient<P>, delegate: D, domain: &str) -> Self {
        Self::with_shared_delegate(client, Arc::new(delegate), domain)
    }

    /// Open a session over a delegate shared with other sessions.
    pub fn with_shared_delegate(client: SkynetClient<P>, delegate: Arc<D>, domain: &str) -> Self {
        Self {
            client,
            delegate,
            domain: domain.trim().to_lowercase(),
        }
    }

    pub fn client(&self) -> &SkynetClient<P> {
        &self.client
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// The app domain this session acts for.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The logged-in user's public key.
    pub async fn user_id(&self) -> Result<Ed25519PublicKey> {
        Ok(self.delegate.user_id().await?)
    }

    /// Whether the delegate grants this app read and write access to its
    /// own discoverable data.
    pub async fn check_login(&self) -> Result<bool> {
        let requested = [PermType::Read, PermType::Write]
            .into_iter()
            .map(|perm_type| {
                Permission::new(&self.domain, &self.domain, PermCategory::Discoverable, perm_type)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(self.check_permissions(&requested).await?.all_granted())
    }

    /// Ask the delegate which of `permissions` it holds.
    pub async fn check_permissions(
        &self,
        permissions: &[Permission],
    ) -> Result<CheckPermissionsResponse> {
        Ok(self.delegate.check_permissions(permissions).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Discoverable Files
    // ─────────────────────────────────────────────────────────────────────────

    /// Read the discoverable JSON file at `path`.
    pub async fn get_json(&self, path: &str, options: &CallOptions) -> Result<JsonResponse> {
        let (public_key, resolved) = self.discoverable(path, options).await?;
        self.client.get_json_at(&public_key, &resolved).await
    }

    /// Write the discoverable JSON file at `path`.
    pub async fn set_json(
        &self,
        path: &str,
        json: JsonData,
        options: &CallOptions,
    ) -> Result<JsonResponse> {
        let (public_key, resolved) = self.discoverable(path, options).await?;
        let (entry, data_link) = self
            .client
            .prepare_entry_for_json(&public_key, &json, &resolved)
            .await?;
        self.sign_and_post(&public_key, &entry, path).await?;

        Ok(JsonResponse {
            data: Some(json),
            data_link: Some(data_link),
        })
    }

    /// Mark the discoverable file at `path` as deleted.
    pub async fn delete_json(&self, path: &str, options: &CallOptions) -> Result<()> {
        self.write_entry_data(path, Bytes::from_static(&[0u8; RAW_SKYLINK_SIZE]), options)
            .await
    }

    /// Point the discoverable file at `path` to an existing skylink.
    pub async fn set_data_link(&self, path: &str, data_link: &str, options: &CallOptions) -> Result<()> {
        let skylink = decode_skylink(data_link)?;
        self.write_entry_data(path, Bytes::copy_from_slice(skylink.as_bytes()), options)
            .await
    }

    /// Read the raw entry data of the discoverable file at `path`.
    pub async fn get_entry_data(&self, path: &str, options: &CallOptions) -> Result<Option<Bytes>> {
        let (public_key, resolved) = self.discoverable(path, options).await?;
        self.client.get_entry_data_at(&public_key, &resolved).await
    }

    /// Store raw data in the entry of the discoverable file at `path`.
    pub async fn set_entry_data(&self, path: &str, data: &[u8], options: &CallOptions) -> Result<()> {
        if data.len() > MAX_ENTRY_DATA_RAW {
            return Err(ValidationError::EntryDataTooLarge {
                size: data.len(),
                max: MAX_ENTRY_DATA_RAW,
            }
            .into());
        }
        self.write_entry_data(path, Bytes::copy_from_slice(data), options)
            .await
    }

    /// The `sia:` entry link of the discoverable file at `path`.
    pub async fn get_entry_link(&self, path: &str) -> Result<String> {
        let public_key = self.user_id().await?;
        let tweak = derive_discoverable_file_tweak(path)?;
        Ok(entry_link(&public_key, &DataKey::Hashed(tweak)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Encrypted Files
    // ─────────────────────────────────────────────────────────────────────────

    /// Read and decrypt the hidden JSON file at `path`.
    pub async fn get_json_encrypted(
        &self,
        path: &str,
        options: &CallOptions,
    ) -> Result<JsonResponse> {
        let (public_key, seed) = self.encrypted(path).await?;
        let resolved = self
            .client
            .resolve_key(DataKey::Hashed(derive_encrypted_file_tweak(&seed)), options)?;

        let raw = self.client.get_raw_bytes_at(&public_key, &resolved).await?;
        let data = match raw.data {
            Some(file) => Some(decrypt_json_file(&file, &file_key(&seed))?),
            None => None,
        };
        Ok(JsonResponse {
            data,
            data_link: raw.data_link,
        })
    }

    /// Encrypt and write the hidden JSON file at `path`.
    pub async fn set_json_encrypted(
        &self,
        path: &str,
        json: JsonData,
        options: &CallOptions,
    ) -> Result<JsonResponse> {
        let (public_key, seed) = self.encrypted(path).await?;
        let resolved = self
            .client
            .resolve_key(DataKey::Hashed(derive_encrypted_file_tweak(&seed)), options)?;

        let file = encrypt_json_file(&json, &file_key(&seed))?;
        let (entry, data_link) = self
            .client
            .prepare_entry_for_bytes(&public_key, Bytes::from(file), ENCRYPTED_CONTENT_TYPE, &resolved)
            .await?;

        let signature = self
            .delegate
            .sign_encrypted_registry_entry(&entry, path)
            .await?;
        self.client
            .post_signed_entry(&public_key, &entry, &signature)
            .await?;

        Ok(JsonResponse {
            data: Some(json),
            data_link: Some(data_link),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    async fn discoverable(
        &self,
        path: &str,
        options: &CallOptions,
    ) -> Result<(Ed25519PublicKey, ResolvedOptions)> {
        let tweak = derive_discoverable_file_tweak(path)?;
        let resolved = self.client.resolve_key(DataKey::Hashed(tweak), options)?;
        let public_key = self.user_id().await?;
        Ok((public_key, resolved))
    }

    async fn encrypted(&self, path: &str) -> Result<(Ed25519PublicKey, PathSeed)> {
        let (public_key, seed) = tokio::try_join!(
            self.delegate.user_id(),
            self.delegate.encrypted_path_seed(path, false)
        )?;
        Ok((public_key, seed))
    }

    async fn write_entry_data(&self, path: &str, data: Bytes, options: &CallOptions) -> Result<()> {
        let (public_key, resolved) = self.discoverable(path, options).await?;
        let entry = self
            .client
            .next_entry_at(&public_key, &resolved, data)
            .await?;
        self.sign_and_post(&public_key, &entry, path).await
    }

    async fn sign_and_post(
        &self,
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        path: &str,
    ) -> Result<()> {
        let signature = self.delegate.sign_registry_entry(entry, path).await?;
        self.client
            .post_signed_entry(public_key, entry, &signature)
            .await
    }
}

impl<P: Portal, D: Delegate> Clone for MySky<P, D> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            delegate: Arc::clone(&self.delegate),
            domain: self.domain.clone(),
        }
    }
}

fn file_key(seed: &PathSeed) -> EncryptionKey {
    EncryptionKey::from_bytes(derive_encrypted_file_key(seed))
}
