//! SkyDB: JSON documents on top of the registry.
//!
//! A document lives in a blob. The registry entry at `(public_key, data_key)`
//! holds the blob's skylink. Writing a document uploads a new blob and
//! points the entry at it with the next revision.
//!
//! ## Concurrency
//!
//! A write reads the current revision and uploads the new blob at the same
//! time, then posts. Nothing serializes two writers to the same key: the
//! portal rejects a revision that does not advance, and otherwise the last
//! write submitted wins.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use skynet_core::skylink::BASE64_ENCODED_SKYLINK_SIZE;
use skynet_core::{
    decode_skylink, encoding::decode_base64_url, next_revision, DataKey,
    Ed25519PublicKey, Keypair, RegistryEntry, Skylink, ValidationError, MAX_ENTRY_DATA_RAW,
    RAW_SKYLINK_SIZE,
};
use skynet_mysky::JsonData;
use skynet_portal::{Portal, JSON_CONTENT_TYPE};

use crate::client::SkynetClient;
use crate::config::{CallOptions, ResolvedOptions};
use crate::error::{Result, SkynetError};

/// Key holding the user document inside a stored blob.
pub const JSON_DATA_KEY: &str = "_data";

/// Key holding the wrapper version inside a stored blob.
pub const JSON_VERSION_KEY: &str = "_v";

/// Wrapper version written by this client.
pub const JSON_RESPONSE_VERSION: u64 = 2;

/// Result of a JSON read.
///
/// `data` is `None` both when nothing is stored and when the caller's
/// cached link is still current. `data_link` tells the two apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonResponse {
    pub data: Option<JsonData>,
    pub data_link: Option<String>,
}

/// Result of a raw blob read, with the same absence rules as [`JsonResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBytesResponse {
    pub data: Option<Bytes>,
    pub data_link: Option<String>,
}

impl<P: Portal> SkynetClient<P> {
    // ─────────────────────────────────────────────────────────────────────────
    // JSON Documents
    // ─────────────────────────────────────────────────────────────────────────

    /// Read the JSON document at `(public_key, data_key)`.
    pub async fn get_json(
        &self,
        public_key: &Ed25519PublicKey,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<JsonResponse> {
        let resolved = self.resolve(data_key, options)?;
        self.get_json_at(public_key, &resolved).await
    }

    pub(crate) async fn get_json_at(
        &self,
        public_key: &Ed25519PublicKey,
        resolved: &ResolvedOptions,
    ) -> Result<JsonResponse> {
        let raw = self.get_raw_bytes_at(public_key, resolved).await?;
        let data = raw.data.as_deref().map(parse_json_blob).transpose()?;
        Ok(JsonResponse {
            data,
            data_link: raw.data_link,
        })
    }

    /// Write a JSON document and point the registry entry at it.
    ///
    /// Returns the document and its new `sia:` data link.
    pub async fn set_json(
        &self,
        keypair: &Keypair,
        data_key: &str,
        json: JsonData,
        options: &CallOptions,
    ) -> Result<JsonResponse> {
        let resolved = self.resolve(data_key, options)?;
        let (entry, data_link) = self
            .prepare_entry_for_json(&keypair.public_key(), &json, &resolved)
            .await?;
        self.set_entry(keypair, &entry).await?;

        Ok(JsonResponse {
            data: Some(json),
            data_link: Some(data_link),
        })
    }

    /// Mark the document as deleted. Nothing is uploaded.
    pub async fn delete_json(
        &self,
        keypair: &Keypair,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<()> {
        let resolved = self.resolve(data_key, options)?;
        let entry = self
            .next_entry_at(&keypair.public_key(), &resolved, deletion_sentinel())
            .await?;
        self.set_entry(keypair, &entry).await
    }

    /// Point the entry at an existing skylink. Nothing is uploaded.
    pub async fn set_data_link(
        &self,
        keypair: &Keypair,
        data_key: &str,
        data_link: &str,
        options: &CallOptions,
    ) -> Result<()> {
        let skylink = decode_skylink(data_link)?;
        let resolved = self.resolve(data_key, options)?;
        let entry = self
            .next_entry_at(
                &keypair.public_key(),
                &resolved,
                Bytes::copy_from_slice(skylink.as_bytes()),
            )
            .await?;
        self.set_entry(keypair, &entry).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Raw Entry Data
    // ─────────────────────────────────────────────────────────────────────────

    /// Read the raw entry data. A deleted entry reads as `None`.
    pub async fn get_entry_data(
        &self,
        public_key: &Ed25519PublicKey,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<Option<Bytes>> {
        let resolved = self.resolve(data_key, options)?;
        self.get_entry_data_at(public_key, &resolved).await
    }

    pub(crate) async fn get_entry_data_at(
        &self,
        public_key: &Ed25519PublicKey,
        resolved: &ResolvedOptions,
    ) -> Result<Option<Bytes>> {
        let signed = self.get_entry_at(public_key, resolved).await?;
        Ok(signed
            .entry
            .filter(|entry| !entry.is_deletion_sentinel())
            .map(|entry| entry.data))
    }

    /// Store up to [`MAX_ENTRY_DATA_RAW`] bytes directly in the entry.
    pub async fn set_entry_data(
        &self,
        keypair: &Keypair,
        data_key: &str,
        data: &[u8],
        options: &CallOptions,
    ) -> Result<()> {
        check_raw_entry_data(data)?;
        let resolved = self.resolve(data_key, options)?;
        let entry = self
            .next_entry_at(&keypair.public_key(), &resolved, Bytes::copy_from_slice(data))
            .await?;
        self.set_entry(keypair, &entry).await
    }

    /// Overwrite the raw entry data with the deletion sentinel.
    pub async fn delete_entry_data(
        &self,
        keypair: &Keypair,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<()> {
        self.delete_json(keypair, data_key, options).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Blob Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve the entry to a skylink and download the blob, unparsed.
    pub async fn get_raw_bytes(
        &self,
        public_key: &Ed25519PublicKey,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<RawBytesResponse> {
        let resolved = self.resolve(data_key, options)?;
        self.get_raw_bytes_at(public_key, &resolved).await
    }

    pub(crate) async fn get_raw_bytes_at(
        &self,
        public_key: &Ed25519PublicKey,
        resolved: &ResolvedOptions,
    ) -> Result<RawBytesResponse> {
        let signed = self.get_entry_at(public_key, resolved).await?;
        let Some(entry) = signed.entry else {
            return Ok(RawBytesResponse::default());
        };

        let Some(skylink) = data_link_from_entry(&entry.data)? else {
            tracing::debug!(%public_key, revision = entry.revision, "entry holds the deletion sentinel");
            return Ok(RawBytesResponse::default());
        };
        let data_link = skylink.to_uri();

        // Compare decoded bytes so any string form of the same link matches.
        if let Some(cached) = &resolved.cached_data_link {
            if decode_skylink(cached).ok() == Some(skylink) {
                tracing::debug!(%data_link, "cached data link is current, skipping download");
                return Ok(RawBytesResponse {
                    data: None,
                    data_link: Some(data_link),
                });
            }
        }

        let data = self.portal().download(&skylink).await?;
        tracing::debug!(%data_link, size = data.len(), "downloaded entry blob");
        Ok(RawBytesResponse {
            data: Some(data),
            data_link: Some(data_link),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entry Preparation
    // ─────────────────────────────────────────────────────────────────────────

    /// Wrap and upload `json`, then build the unsigned entry pointing at it.
    pub async fn prepare_entry_for_json(
        &self,
        public_key: &Ed25519PublicKey,
        json: &JsonData,
        resolved: &ResolvedOptions,
    ) -> Result<(RegistryEntry, String)> {
        let blob = serde_json::to_vec(&wrap_json(json))
            .map_err(|e| SkynetError::Format(format!("cannot serialize document: {e}")))?;
        self.prepare_entry_for_bytes(public_key, Bytes::from(blob), JSON_CONTENT_TYPE, resolved)
            .await
    }

    /// Upload `data` and read the current revision concurrently, then build
    /// the unsigned entry pointing at the upload with the next revision.
    ///
    /// Returns the entry and the upload's `sia:` link.
    pub async fn prepare_entry_for_bytes(
        &self,
        public_key: &Ed25519PublicKey,
        data: Bytes,
        content_type: &str,
        resolved: &ResolvedOptions,
    ) -> Result<(RegistryEntry, String)> {
        let file_name = blob_name(&resolved.data_key);
        let upload = async {
            self.portal()
                .upload(data, &file_name, content_type)
                .await
                .map_err(SkynetError::from)
        };

        let (skylink, current) =
            tokio::try_join!(upload, self.get_entry_at(public_key, resolved))?;

        let revision = next_revision(current.revision())?;
        let entry = RegistryEntry::builder(resolved.data_key.clone())
            .skylink(&skylink)
            .revision(revision)
            .build()?;
        Ok((entry, skylink.to_uri()))
    }

    /// Build the unsigned entry holding `data` at the next revision.
    pub(crate) async fn next_entry_at(
        &self,
        public_key: &Ed25519PublicKey,
        resolved: &ResolvedOptions,
        data: Bytes,
    ) -> Result<RegistryEntry> {
        let current = self.get_entry_at(public_key, resolved).await?;
        let revision = next_revision(current.revision())?;
        Ok(RegistryEntry::builder(resolved.data_key.clone())
            .data(data)
            .revision(revision)
            .build()?)
    }
}

/// The blob name for a document: `dk:<hex data key hash>`.
pub fn blob_name(data_key: &DataKey) -> String {
    format!("dk:{}", data_key.to_hex())
}

/// Wrap a document in the current stored format.
pub fn wrap_json(json: &JsonData) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(JSON_DATA_KEY.to_string(), Value::Object(json.clone()));
    wrapper.insert(JSON_VERSION_KEY.to_string(), Value::from(JSON_RESPONSE_VERSION));
    Value::Object(wrapper)
}

/// Parse a downloaded blob, unwrapping the current format.
///
/// An object without both wrapper keys is a legacy document and is
/// returned unchanged.
pub fn parse_json_blob(data: &[u8]) -> Result<JsonData> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| SkynetError::Format(format!("blob is not JSON: {e}")))?;
    let Value::Object(mut object) = value else {
        return Err(SkynetError::Format("blob is not a JSON object".into()));
    };

    if !(object.contains_key(JSON_DATA_KEY) && object.contains_key(JSON_VERSION_KEY)) {
        return Ok(object);
    }
    match object.remove(JSON_DATA_KEY) {
        Some(Value::Object(inner)) => Ok(inner),
        _ => Err(SkynetError::Format(format!(
            "{JSON_DATA_KEY} is not a JSON object"
        ))),
    }
}

/// Decode registry entry data into the skylink it points at.
///
/// Accepts the raw 34-byte form and the legacy 46-character base64 form.
/// All-zero data is the deletion sentinel and yields `None`. Any other
/// length is a validation error: the entry verified, its payload did not parse.
pub fn data_link_from_entry(data: &[u8]) -> Result<Option<Skylink>> {
    let raw = match data.len() {
        RAW_SKYLINK_SIZE => data.to_vec(),
        BASE64_ENCODED_SKYLINK_SIZE => {
            let text = std::str::from_utf8(data).map_err(|e| {
                ValidationError::InvalidSkylink(format!("legacy entry data is not text: {e}"))
            })?;
            decode_base64_url(text)?
        }
        len => {
            return Err(ValidationError::InvalidSkylink(format!(
                "entry data is {len} bytes, expected {RAW_SKYLINK_SIZE} or {BASE64_ENCODED_SKYLINK_SIZE}"
            ))
            .into())
        }
    };

    if raw.iter().all(|b| *b == 0) {
        return Ok(None);
    }
    Ok(Some(Skylink::from_bytes(&raw)?))
}

fn deletion_sentinel() -> Bytes {
    Bytes::from_static(&[0u8; RAW_SKYLINK_SIZE])
}

fn check_raw_entry_data(data: &[u8]) -> Result<()> {
    if data.len() > MAX_ENTRY_DATA_RAW {
        return Err(ValidationError::EntryDataTooLarge {
            size: data.len(),
            max: MAX_ENTRY_DATA_RAW,
        }
        .into());
    }
    Ok(())
}
