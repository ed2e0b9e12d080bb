//! Path to data key derivation.
//!
//! Discoverable files live at a tweak anyone can compute from the path.
//! Hidden (encrypted) files live at a tweak derived from a secret path seed,
//! so neither the location nor the content reveals the path.

use std::fmt;

use skynet_core::{hash_all, Blake2bHash};

use crate::error::Result;
use crate::path::{sanitize_path, split_path};

/// Version byte of the discoverable bucket tweak encoding.
pub const DISCOVERABLE_BUCKET_TWEAK_VERSION: u8 = 1;

const SALT_ENCRYPTED_TWEAK: &[u8] = b"encrypted filesystem tweak";
const SALT_ENCRYPTION_KEY: &[u8] = b"encryption key";
const SALT_ENCRYPTED_CHILD: &[u8] = b"encrypted filesystem path";
const SALT_ENCRYPTED_FILE: &[u8] = b"encrypted filesystem file";
const SALT_ROOT_PATH_SEED: &[u8] = b"root path seed";

/// A 32-byte secret seed for one path in the hidden file tree.
///
/// A directory seed lets its holder derive the seeds of everything below it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PathSeed(pub [u8; 32]);

impl PathSeed {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Derive the root seed of a user's hidden tree from key material.
    pub fn root_from_secret(secret: &[u8]) -> Self {
        Self(hash_all(&[SALT_ROOT_PATH_SEED, secret]).0)
    }
}

impl fmt::Debug for PathSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PathSeed(..)")
    }
}

/// The data key of a discoverable file:
/// `hash_all(version || hash(component_1) || ... || hash(component_n))`.
pub fn derive_discoverable_file_tweak(path: &str) -> Result<Blake2bHash> {
    let sanitized = sanitize_path(path)?;
    let mut encoding = vec![DISCOVERABLE_BUCKET_TWEAK_VERSION];
    for component in split_path(&sanitized) {
        encoding.extend_from_slice(hash_all(&[component.as_bytes()]).as_bytes());
    }
    Ok(hash_all(&[&encoding]))
}

/// The data key of an encrypted file, derived from its path seed.
pub fn derive_encrypted_file_tweak(path_seed: &PathSeed) -> Blake2bHash {
    let first = hash_all(&[SALT_ENCRYPTED_TWEAK, path_seed.as_bytes()]);
    hash_all(&[first.as_bytes()])
}

/// The symmetric key of an encrypted file, derived from its path seed.
pub fn derive_encrypted_file_key(path_seed: &PathSeed) -> [u8; 32] {
    hash_all(&[SALT_ENCRYPTION_KEY, path_seed.as_bytes()]).0
}

/// Walk from the root seed down `path`, one component at a time.
///
/// Every component yields a directory seed. A file seed is the directory
/// seed of its full path, hashed once more, so a file seed can never be used
/// to derive children.
pub fn derive_encrypted_path_seed(
    root_seed: &PathSeed,
    path: &str,
    is_directory: bool,
) -> Result<PathSeed> {
    let sanitized = sanitize_path(path)?;
    let mut seed = *root_seed.as_bytes();
    for component in split_path(&sanitized) {
        seed = hash_all(&[SALT_ENCRYPTED_CHILD, &seed, component.as_bytes()]).0;
    }
    if !is_directory {
        seed = hash_all(&[SALT_ENCRYPTED_FILE, &seed]).0;
    }
    Ok(PathSeed(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MyskyError;

    #[test]
    fn test_discoverable_tweak_known_value() {
        let tweak = derive_discoverable_file_tweak("skyfeed.hns/preferences/ui.json").unwrap();
        assert_eq!(
            tweak.to_hex(),
            "c4125a9886a6e70b27c5191c13ddd6c5d808078ee6ef80c12f1a30e28e9648e1"
        );
    }

    #[test]
    fn test_discoverable_tweak_sanitizes() {
        let a = derive_discoverable_file_tweak("SkyFeed.HNS//preferences/ui.json/").unwrap();
        let b = derive_discoverable_file_tweak("skyfeed.hns/preferences/ui.json").unwrap();
        assert_eq!(a, b);
        assert!(matches!(
            derive_discoverable_file_tweak("/abs"),
            Err(MyskyError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_encrypted_derivations_are_separated() {
        let seed = PathSeed::from_bytes([5u8; 32]);
        let tweak = derive_encrypted_file_tweak(&seed);
        let key = derive_encrypted_file_key(&seed);
        assert_ne!(tweak.0, key);
        assert_ne!(tweak.0, seed.0);
    }

    #[test]
    fn test_path_seed_directory_vs_file() {
        let root = PathSeed::root_from_secret(b"secret");
        let dir = derive_encrypted_path_seed(&root, "app.hns/docs", true).unwrap();
        let file = derive_encrypted_path_seed(&root, "app.hns/docs", false).unwrap();
        assert_ne!(dir, file);

        let same = derive_encrypted_path_seed(&root, "APP.hns/docs/", true).unwrap();
        assert_eq!(dir, same);
    }

    #[test]
    fn test_path_seed_depends_on_root() {
        let a = PathSeed::root_from_secret(b"alice");
        let b = PathSeed::root_from_secret(b"bob");
        assert_ne!(
            derive_encrypted_path_seed(&a, "app.hns/f", false).unwrap(),
            derive_encrypted_path_seed(&b, "app.hns/f", false).unwrap()
        );
    }

    #[test]
    fn test_path_seed_debug_redacted() {
        let seed = PathSeed::from_bytes([1u8; 32]);
        assert_eq!(format!("{seed:?}"), "PathSeed(..)");
    }
}
