//! # Skynet MySky
//!
//! Identity, permissions and hidden files for MySky.
//!
//! ## Overview
//!
//! MySky lets an app read and write a user's data without ever seeing the
//! user's private key. The app derives registry data keys from file paths,
//! builds unsigned entries, and asks a [`Delegate`] to sign them. The
//! delegate checks the app's [`Permission`]s before it complies.
//!
//! ## Key Concepts
//!
//! - **Discoverable file**: stored at a tweak anyone can compute from the path
//! - **Hidden file**: stored at a tweak derived from a secret [`PathSeed`], and
//!   encrypted with a key derived from the same seed
//! - **Delegate**: the signing oracle, see [`LocalDelegate`] for an
//!   in-process implementation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use skynet_mysky::{derive_discoverable_file_tweak, Delegate, LocalDelegate, PermCategory};
//!
//! async fn example() {
//!     let delegate = LocalDelegate::from_seed_phrase("a long enough seed phrase", "app.hns").unwrap();
//!     delegate.grant_read_write("app.hns", PermCategory::Discoverable).unwrap();
//!
//!     let data_key = derive_discoverable_file_tweak("app.hns/settings.json").unwrap();
//!     let user = delegate.user_id().await.unwrap();
//! }
//! ```

pub mod crypto;
pub mod delegate;
pub mod error;
pub mod path;
pub mod permission;
pub mod tweak;

pub use crypto::{
    decrypt_json_file, encrypt_json_file, pad_file_size, EncryptionKey, EncryptionNonce, JsonData,
};
pub use delegate::{Delegate, LocalDelegate};
pub use error::{MyskyError, Result};
pub use path::{get_path_domain, sanitize_path};
pub use permission::{
    CheckPermissionsResponse, PermCategory, PermType, Permission, PermissionSet,
};
pub use tweak::{
    derive_discoverable_file_tweak, derive_encrypted_file_key, derive_encrypted_file_tweak,
    derive_encrypted_path_seed, PathSeed,
};
