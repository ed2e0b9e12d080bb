//! # Skynet Testkit
//!
//! Testing utilities for the Skynet client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known registry entries, skylinks and tweaks with
//!   their expected hashes, for checking wire compatibility
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A keypair and client over an in-memory portal
//!
//! ## Golden Vectors
//!
//! ```rust
//! use skynet_testkit::vectors::{entry_vectors, verify_all_vectors};
//!
//! for (name, ok, got) in verify_all_vectors() {
//!     assert!(ok, "{name}: {got}");
//! }
//! assert!(!entry_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use skynet_testkit::generators::{entry_from_params, EntryParams};
//!
//! proptest! {
//!     #[test]
//!     fn entry_hash_is_deterministic(params: EntryParams) {
//!         let (e1, _) = entry_from_params(&params);
//!         let (e2, _) = entry_from_params(&params);
//!         prop_assert_eq!(e1.hash(), e2.hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use skynet_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let link = fixture.store_json(&serde_json::json!({ "_data": {}, "_v": 2 }));
//! assert!(link.is_v1());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{entry_from_params, EntryParams};
pub use vectors::{
    entry_vectors, generate_entry_from_vector, verify_all_vectors, GoldenVector,
};
