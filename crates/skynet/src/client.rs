//! The Skynet client.
//!
//! [`SkynetClient`] ties a [`Portal`] to a [`ClientConfig`]. Registry and
//! SkyDB operations live in their own modules as further `impl` blocks.

use std::sync::Arc;

use bytes::Bytes;
use skynet_core::{decode_skylink, DataKey, ValidationError};
use skynet_portal::{HttpPortal, Portal};
use url::Url;

use crate::config::{CallOptions, ClientConfig, ResolvedOptions};
use crate::error::Result;

/// A client bound to one portal.
///
/// Cheap to clone. Clones share the portal connection.
pub struct SkynetClient<P: Portal> {
    portal: Arc<P>,
    config: ClientConfig,
}

impl SkynetClient<HttpPortal> {
    /// Connect to the portal named in `config` over HTTP.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let url = portal_url(&config)?;
        let portal = HttpPortal::with_options(url, &config.portal_options())?;
        Ok(Self::new(portal, config))
    }
}

impl<P: Portal> SkynetClient<P> {
    /// Create a client over an existing portal.
    pub fn new(portal: P, config: ClientConfig) -> Self {
        Self::with_shared_portal(Arc::new(portal), config)
    }

    /// Create a client over a portal shared with other owners.
    pub fn with_shared_portal(portal: Arc<P>, config: ClientConfig) -> Self {
        Self { portal, config }
    }

    /// Get the portal reference.
    pub fn portal(&self) -> &P {
        &self.portal
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Layer per-call options over the client config for `data_key`.
    pub fn resolve(&self, data_key: &str, options: &CallOptions) -> Result<ResolvedOptions> {
        Ok(self.config.resolve(data_key, options)?)
    }

    /// Layer per-call options over the client config for a resolved key.
    pub fn resolve_key(&self, data_key: DataKey, options: &CallOptions) -> Result<ResolvedOptions> {
        Ok(self.config.resolve_key(data_key, options)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Blob Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Upload a blob. Returns its `sia:` link.
    pub async fn upload(&self, data: Bytes, file_name: &str, content_type: &str) -> Result<String> {
        let size = data.len();
        let skylink = self.portal.upload(data, file_name, content_type).await?;
        tracing::debug!(%skylink, size, file_name, "uploaded blob");
        Ok(skylink.to_uri())
    }

    /// Download the blob behind a skylink, in any accepted string form.
    pub async fn download(&self, skylink: &str) -> Result<Bytes> {
        let skylink = decode_skylink(skylink)?;
        let data = self.portal.download(&skylink).await?;
        tracing::debug!(%skylink, size = data.len(), "downloaded blob");
        Ok(data)
    }
}

impl<P: Portal> Clone for SkynetClient<P> {
    fn clone(&self) -> Self {
        Self {
            portal: Arc::clone(&self.portal),
            config: self.config.clone(),
        }
    }
}

/// Parse the configured portal URL.
pub(crate) fn portal_url(config: &ClientConfig) -> Result<Url> {
    let raw = config.portal_url.trim();
    Url::parse(raw).map_err(|e| {
        ValidationError::InvalidOptions(format!("portal url {raw:?}: {e}")).into()
    })
}
