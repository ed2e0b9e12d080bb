//! # Skynet
//!
//! Client for Skynet portals: verified registry entries, SkyDB JSON
//! documents and MySky sessions.
//!
//! ## Overview
//!
//! - **Registry**: signed, versioned `(public key, data key) -> data` slots.
//!   Every entry read is verified before it is returned.
//! - **SkyDB**: JSON documents stored as blobs, with the registry entry
//!   pointing at the current blob.
//! - **MySky**: path-addressed files where signing is delegated to an
//!   identity provider, including encrypted hidden files.
//!
//! ## Key Concepts
//!
//! - **Revision**: each write to a slot must carry a strictly higher revision.
//!   The portal enforces this. The client does not serialize writers.
//! - **Deletion**: a slot is deleted by writing 34 zero bytes. A deleted slot
//!   still has an entry, unlike one that was never written.
//! - **Options**: [`CallOptions`] override [`ClientConfig`], which overrides
//!   the defaults. They are resolved once per call.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use skynet::{CallOptions, ClientConfig, Keypair, SkynetClient};
//!
//! async fn example() {
//!     let client = SkynetClient::from_config(ClientConfig::default()).unwrap();
//!     let keypair = Keypair::from_seed_phrase("a long enough seed phrase").unwrap();
//!
//!     let mut doc = serde_json::Map::new();
//!     doc.insert("theme".into(), "dark".into());
//!
//!     client
//!         .set_json(&keypair, "preferences", doc, &CallOptions::new())
//!         .await
//!         .unwrap();
//!
//!     let read = client
//!         .get_json(&keypair.public_key(), "preferences", &CallOptions::new())
//!         .await
//!         .unwrap();
//!     assert!(read.data.is_some());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `skynet::core` - Primitives (keys, hashes, skylinks, entries)
//! - `skynet::portal` - Portal trait and implementations
//! - `skynet::mysky` - Permissions, delegates, tweaks and encryption

pub mod client;
pub mod config;
pub mod error;
pub mod registry;
pub mod session;
pub mod skydb;

// Re-export component crates
pub use skynet_core as core;
pub use skynet_mysky as mysky;
pub use skynet_portal as portal;

// Re-export main types for convenience
pub use client::SkynetClient;
pub use config::{CallOptions, ClientConfig, ResolvedOptions, DEFAULT_REGISTRY_TIMEOUT};
pub use error::{Result, SkynetError};
pub use session::MySky;
pub use skydb::{JsonResponse, RawBytesResponse};

// Re-export commonly used component types
pub use skynet_core::{
    DataKey, Ed25519PublicKey, Ed25519Signature, Keypair, RegistryEntry, SignedRegistryEntry,
    Skylink,
};
pub use skynet_mysky::{Delegate, JsonData, LocalDelegate};
pub use skynet_portal::{HttpPortal, MemoryPortal, Portal};
