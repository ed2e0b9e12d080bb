//! HTTP implementation of the Portal trait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use skynet_core::{
    Blake2bHash, Ed25519PublicKey, Ed25519Signature, RegistryEntry, Skylink,
};
use url::Url;

use crate::error::{PortalError, Result};
use crate::messages::{
    portal_root, registry_lookup_url, RawRegistryEntry, RegistryEntryRequest, RegistryEntryResponse,
    UploadResponse, REGISTRY_PATH, UPLOAD_PATH,
};
use crate::traits::Portal;

/// Header carrying a portal API key.
pub const API_KEY_HEADER: &str = "Skynet-Api-Key";

/// Default portal.
pub const DEFAULT_PORTAL_URL: &str = "https://siasky.net";

/// Request options applied to every call made by an [`HttpPortal`].
#[derive(Debug, Clone, Default)]
pub struct PortalOptions {
    /// Sent as `Skynet-Api-Key`.
    pub api_key: Option<String>,
    /// Overrides the default `User-Agent`.
    pub user_agent: Option<String>,
}

/// A portal reached over HTTPS.
#[derive(Clone, Debug)]
pub struct HttpPortal {
    url: Arc<Url>,
    client: Client,
}

impl HttpPortal {
    /// Talk to the portal at `url` with default options.
    ///
    /// A base path in `url` is kept: endpoints resolve below it.
    pub fn new(url: Url) -> Self {
        Self {
            url: Arc::new(portal_root(url)),
            client: Client::new(),
        }
    }

    /// Talk to the portal at `url`, sending the configured headers.
    pub fn with_options(url: Url, options: &PortalOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &options.api_key {
            let mut value = HeaderValue::from_str(key).map_err(|e| PortalError::InvalidHeader {
                name: API_KEY_HEADER,
                reason: e.to_string(),
            })?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static("skynet-api-key"), value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(agent) = &options.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self {
            url: Arc::new(portal_root(url)),
            client: builder.build()?,
        })
    }

    /// The portal root URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Turn a non-success response into [`PortalError::Http`], keeping the body.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PortalError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Portal for HttpPortal {
    async fn get_registry_entry(
        &self,
        public_key: &Ed25519PublicKey,
        data_key_hash: &Blake2bHash,
        timeout: Duration,
    ) -> Result<Option<RawRegistryEntry>> {
        let url = registry_lookup_url(&self.url, public_key, data_key_hash, timeout)?;
        tracing::debug!(%url, "registry lookup");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let text = check_status(response).await?.text().await?;
        let body: RegistryEntryResponse = serde_json::from_str(&text)?;
        body.into_raw().map(Some)
    }

    async fn post_registry_entry(
        &self,
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        signature: &Ed25519Signature,
    ) -> Result<()> {
        let url = self.url.join(REGISTRY_PATH)?;
        let body = RegistryEntryRequest::new(public_key, entry, signature);
        tracing::debug!(%url, revision = entry.revision, "registry post");

        let response = self.client.post(url).json(&body).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn upload(&self, data: Bytes, file_name: &str, content_type: &str) -> Result<Skylink> {
        let mut url = self.url.join(UPLOAD_PATH)?;
        url.query_pairs_mut().append_pair("filename", file_name);
        tracing::debug!(%url, size = data.len(), "upload");

        let part = Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        let text = check_status(response).await?.text().await?;
        let body: UploadResponse = serde_json::from_str(&text)?;
        body.skylink
            .parse()
            .map_err(|e| PortalError::InvalidResponse(format!("upload skylink: {e}")))
    }

    async fn download(&self, skylink: &Skylink) -> Result<Bytes> {
        let url = self.url.join(&skylink.to_base64())?;
        tracing::debug!(%url, "download");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortalError::NotFound(skylink.to_base64()));
        }
        Ok(check_status(response).await?.bytes().await?)
    }
}
