//! Layered client configuration.
//!
//! Every call resolves its options once, in this order of precedence:
//! [`CallOptions`] set at the call site, then the client's [`ClientConfig`],
//! then the built-in defaults. The result is a [`ResolvedOptions`] that the
//! whole operation uses, so a read-modify-write can never address two
//! different registry slots.

use std::time::Duration;

use skynet_core::{DataKey, ValidationError};
use skynet_portal::{PortalOptions, DEFAULT_PORTAL_URL};

/// How long the portal may wait on the network for a registry lookup.
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shortest registry timeout the portal accepts, in seconds.
pub const MIN_REGISTRY_TIMEOUT_SECS: u64 = 1;

/// Longest registry timeout the portal accepts, in seconds.
pub const MAX_REGISTRY_TIMEOUT_SECS: u64 = 300;

/// Client-wide settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the portal.
    pub portal_url: String,

    /// Default registry lookup timeout.
    pub registry_timeout: Duration,

    /// Default for [`CallOptions::hashed_data_key_hex`].
    pub hashed_data_key_hex: bool,

    /// Sent as `Skynet-Api-Key` on every request.
    pub api_key: Option<String>,

    /// Custom `User-Agent`.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            registry_timeout: DEFAULT_REGISTRY_TIMEOUT,
            hashed_data_key_hex: false,
            api_key: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Config for the portal at `url`, defaults otherwise.
    pub fn with_portal(url: impl Into<String>) -> Self {
        Self {
            portal_url: url.into(),
            ..Self::default()
        }
    }

    /// Headers for an HTTP portal.
    pub fn portal_options(&self) -> PortalOptions {
        PortalOptions {
            api_key: self.api_key.clone(),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Resolve a caller-supplied data key and per-call options.
    pub fn resolve(
        &self,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<ResolvedOptions, ValidationError> {
        let hashed = options
            .hashed_data_key_hex
            .unwrap_or(self.hashed_data_key_hex);
        self.resolve_key(DataKey::resolve(data_key, hashed)?, options)
    }

    /// Resolve per-call options for an already resolved data key.
    pub fn resolve_key(
        &self,
        data_key: DataKey,
        options: &CallOptions,
    ) -> Result<ResolvedOptions, ValidationError> {
        let timeout = options.timeout.unwrap_or(self.registry_timeout);
        let secs = timeout.as_secs();
        if !(MIN_REGISTRY_TIMEOUT_SECS..=MAX_REGISTRY_TIMEOUT_SECS).contains(&secs) {
            return Err(ValidationError::InvalidTimeout {
                got: secs,
                min: MIN_REGISTRY_TIMEOUT_SECS,
                max: MAX_REGISTRY_TIMEOUT_SECS,
            });
        }

        Ok(ResolvedOptions {
            data_key,
            timeout,
            cached_data_link: options.cached_data_link.clone(),
        })
    }
}

/// Per-call overrides. Unset fields fall back to the [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Treat the data key as a hex-encoded 32-byte hash.
    pub hashed_data_key_hex: Option<bool>,

    /// Registry lookup timeout.
    pub timeout: Option<Duration>,

    /// The data link the caller last saw. A read that finds the same link
    /// skips the download.
    pub cached_data_link: Option<String>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hashed_data_key_hex(mut self, hashed: bool) -> Self {
        self.hashed_data_key_hex = Some(hashed);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cached_data_link(mut self, link: impl Into<String>) -> Self {
        self.cached_data_link = Some(link.into());
        self
    }
}

/// Options after layering, fixed for the duration of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub data_key: DataKey,
    pub timeout: Duration,
    pub cached_data_link: Option<String>,
}
