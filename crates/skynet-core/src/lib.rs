//! # Skynet Core
//!
//! Pure primitives for the Skynet client: keys, registry entries, skylinks and
//! the binary encodings they are hashed and signed over.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`RegistryEntry`] - A versioned `(data key -> data)` record
//! - [`SignedRegistryEntry`] - A registry lookup result, possibly absent
//! - [`DataKey`] - A registry slot, plain or pre-hashed
//! - [`Skylink`] - The 34-byte content or registry locator
//! - [`Keypair`] - Ed25519 signing key, derivable from a seed phrase
//!
//! ## Encodings
//!
//! Everything that is hashed goes through the [`encoding`] module: little-endian
//! integers and length-prefixed byte strings, hashed with BLAKE2b-256.

pub mod crypto;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod skylink;
pub mod types;
pub mod validation;

pub use crypto::{hash_all, Blake2bHash, Ed25519PublicKey, Ed25519Signature, Keypair, MIN_SEED_LENGTH};
pub use entry::{
    entry_link, hash_registry_entry, next_revision, RegistryEntry, RegistryEntryBuilder,
    SignedRegistryEntry, MAX_ENTRY_DATA_RAW, MAX_ENTRY_DATA_SIZE, MAX_REVISION,
};
pub use error::{CoreError, ValidationError};
pub use skylink::{
    convert_skylink_to_base32, convert_skylink_to_base64, decode_skylink,
    derive_registry_entry_id, format_skylink, parse_skylink, ParseSkylinkOptions, Skylink,
    RAW_SKYLINK_SIZE, URI_SKYNET_PREFIX,
};
pub use types::{hash_data_key, DataKey};
pub use validation::{validate_entry_structure, verify_registry_entry, verify_signed_entry};
