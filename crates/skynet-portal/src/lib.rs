//! # Skynet Portal
//!
//! Portal abstraction for the Skynet client. Provides a trait-based interface
//! to the registry and blob endpoints, with HTTP and in-memory implementations.
//!
//! ## Overview
//!
//! The client never talks HTTP directly. Everything goes through the
//! [`Portal`] trait, so the registry and SkyDB logic can run against a real
//! portal ([`HttpPortal`]) or an in-process one ([`MemoryPortal`]).
//!
//! ## Key Types
//!
//! - [`Portal`] - The async trait for registry and blob operations
//! - [`HttpPortal`] - reqwest-based portal client
//! - [`MemoryPortal`] - In-memory portal for tests
//! - [`RawRegistryEntry`] - An unverified registry lookup result
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use skynet_core::{DataKey, Keypair};
//! use skynet_portal::{HttpPortal, Portal};
//!
//! async fn example() {
//!     let portal = HttpPortal::new("https://siasky.net".parse().unwrap());
//!     let keypair = Keypair::from_seed_phrase("a long enough seed phrase").unwrap();
//!
//!     let entry = portal
//!         .get_registry_entry(
//!             &keypair.public_key(),
//!             &DataKey::plain("profile").hash(),
//!             Duration::from_secs(5),
//!         )
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **404 is absence**: a missing entry is `Ok(None)`
//! - **Native revisions**: revisions are `u64` end to end, sent as bare JSON integers
//! - **No retries**: transport failures surface unchanged

pub mod error;
pub mod http;
pub mod memory;
pub mod messages;
pub mod traits;

pub use error::{PortalError, Result};
pub use http::{HttpPortal, PortalOptions, API_KEY_HEADER, DEFAULT_PORTAL_URL};
pub use memory::{MemoryPortal, PortalStats};
pub use messages::{
    portal_root, registry_lookup_url, RawRegistryEntry, RegistryEntryRequest,
    RegistryEntryResponse,
};
pub use traits::{Portal, JSON_CONTENT_TYPE};
