//! The signing delegate.
//!
//! In MySky mode the client never holds the user's private key. It builds
//! unsigned registry entries and asks a [`Delegate`] to sign them. The
//! delegate decides, per app and per path, whether to comply.

use std::sync::RwLock;

use async_trait::async_trait;
use skynet_core::{Ed25519PublicKey, Ed25519Signature, Keypair, RegistryEntry};

use crate::error::{MyskyError, Result};
use crate::path::sanitize_path;
use crate::permission::{
    CheckPermissionsResponse, PermCategory, PermType, Permission, PermissionSet,
};
use crate::tweak::{
    derive_discoverable_file_tweak, derive_encrypted_file_tweak, derive_encrypted_path_seed,
    PathSeed,
};

/// The identity oracle MySky calls out to.
///
/// Any method may fail with [`MyskyError::PermissionDenied`].
#[async_trait]
pub trait Delegate: Send + Sync {
    /// The user's public key.
    async fn user_id(&self) -> Result<Ed25519PublicKey>;

    /// Report which of the requested permissions are held.
    async fn check_permissions(&self, permissions: &[Permission])
        -> Result<CheckPermissionsResponse>;

    /// Sign an entry for a discoverable file at `path`.
    async fn sign_registry_entry(
        &self,
        entry: &RegistryEntry,
        path: &str,
    ) -> Result<Ed25519Signature>;

    /// Sign an entry for a hidden file at `path`.
    async fn sign_encrypted_registry_entry(
        &self,
        entry: &RegistryEntry,
        path: &str,
    ) -> Result<Ed25519Signature>;

    /// The secret seed for `path` in the hidden tree.
    async fn encrypted_path_seed(&self, path: &str, is_directory: bool) -> Result<PathSeed>;
}

/// An in-process delegate holding the user's key.
///
/// Acts on behalf of a single requestor domain, and only within the
/// permissions it has been granted.
pub struct LocalDelegate {
    keypair: Keypair,
    root_seed: PathSeed,
    requestor: String,
    permissions: RwLock<PermissionSet>,
}

impl LocalDelegate {
    /// Create a delegate for `requestor` with no permissions granted.
    pub fn new(keypair: Keypair, root_seed: PathSeed, requestor: &str) -> Self {
        Self {
            keypair,
            root_seed,
            requestor: requestor.trim().to_lowercase(),
            permissions: RwLock::new(PermissionSet::new()),
        }
    }

    /// Derive the key pair and root path seed from a user seed phrase.
    pub fn from_seed_phrase(seed_phrase: &str, requestor: &str) -> Result<Self> {
        let keypair = Keypair::from_seed_phrase(seed_phrase)?;
        let root_seed = PathSeed::root_from_secret(&keypair.seed());
        Ok(Self::new(keypair, root_seed, requestor))
    }

    /// Grant a permission.
    pub fn grant(&self, permission: Permission) {
        self.permissions.write().unwrap().grant(permission);
    }

    /// Grant read and write on `path` in `category` to this delegate's requestor.
    pub fn grant_read_write(&self, path: &str, category: PermCategory) -> Result<()> {
        for perm_type in [PermType::Read, PermType::Write] {
            self.grant(Permission::new(&self.requestor, path, category, perm_type)?);
        }
        Ok(())
    }

    /// Revoke a permission.
    pub fn revoke(&self, permission: &Permission) -> bool {
        self.permissions.write().unwrap().revoke(permission)
    }

    /// The requestor domain this delegate acts for.
    pub fn requestor(&self) -> &str {
        &self.requestor
    }

    fn require(&self, path: &str, category: PermCategory, perm_type: PermType) -> Result<()> {
        let requested = Permission::new(&self.requestor, path, category, perm_type)?;
        if self.permissions.read().unwrap().has(&requested) {
            Ok(())
        } else {
            tracing::warn!(
                requestor = %self.requestor,
                path = %requested.path,
                ?category,
                ?perm_type,
                "permission denied"
            );
            Err(MyskyError::PermissionDenied(format!(
                "{} has no {perm_type:?} permission for {category:?} path {}",
                self.requestor, requested.path
            )))
        }
    }

    fn sign_checked(
        &self,
        entry: &RegistryEntry,
        expected: skynet_core::Blake2bHash,
        path: &str,
    ) -> Result<Ed25519Signature> {
        if entry.data_key.hash() != expected {
            return Err(MyskyError::PermissionDenied(format!(
                "entry data key does not belong to path {path}"
            )));
        }
        Ok(entry.sign(&self.keypair))
    }
}

#[async_trait]
impl Delegate for LocalDelegate {
    async fn user_id(&self) -> Result<Ed25519PublicKey> {
        Ok(self.keypair.public_key())
    }

    async fn check_permissions(
        &self,
        permissions: &[Permission],
    ) -> Result<CheckPermissionsResponse> {
        Ok(self.permissions.read().unwrap().check(permissions))
    }

    async fn sign_registry_entry(
        &self,
        entry: &RegistryEntry,
        path: &str,
    ) -> Result<Ed25519Signature> {
        let path = sanitize_path(path)?;
        self.require(&path, PermCategory::Discoverable, PermType::Write)?;
        self.sign_checked(entry, derive_discoverable_file_tweak(&path)?, &path)
    }

    async fn sign_encrypted_registry_entry(
        &self,
        entry: &RegistryEntry,
        path: &str,
    ) -> Result<Ed25519Signature> {
        let path = sanitize_path(path)?;
        self.require(&path, PermCategory::Hidden, PermType::Write)?;
        let seed = derive_encrypted_path_seed(&self.root_seed, &path, false)?;
        self.sign_checked(entry, derive_encrypted_file_tweak(&seed), &path)
    }

    async fn encrypted_path_seed(&self, path: &str, is_directory: bool) -> Result<PathSeed> {
        let path = sanitize_path(path)?;
        self.require(&path, PermCategory::Hidden, PermType::Read)?;
        derive_encrypted_path_seed(&self.root_seed, &path, is_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skynet_core::DataKey;

    const SEED: &str = "insecure test seed phrase";

    fn delegate() -> LocalDelegate {
        LocalDelegate::from_seed_phrase(SEED, "app.hns").unwrap()
    }

    #[tokio::test]
    async fn test_user_id_matches_seed() {
        let delegate = delegate();
        let expected = Keypair::from_seed_phrase(SEED).unwrap().public_key();
        assert_eq!(delegate.user_id().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_sign_requires_write_permission() {
        let delegate = delegate();
        let path = "app.hns/file.json";
        let tweak = derive_discoverable_file_tweak(path).unwrap();
        let entry = RegistryEntry::new(DataKey::Hashed(tweak), b"x".to_vec(), 0);

        let denied = delegate.sign_registry_entry(&entry, path).await;
        assert!(matches!(denied, Err(MyskyError::PermissionDenied(_))));

        delegate
            .grant_read_write("app.hns", PermCategory::Discoverable)
            .unwrap();
        let signature = delegate.sign_registry_entry(&entry, path).await.unwrap();

        let pk = delegate.user_id().await.unwrap();
        pk.verify(entry.hash().as_bytes(), &signature).unwrap();
    }

    #[tokio::test]
    async fn test_sign_rejects_foreign_data_key() {
        let delegate = delegate();
        delegate
            .grant_read_write("app.hns", PermCategory::Discoverable)
            .unwrap();

        let entry = RegistryEntry::new(DataKey::plain("other"), b"x".to_vec(), 0);
        let result = delegate.sign_registry_entry(&entry, "app.hns/file.json").await;
        assert!(matches!(result, Err(MyskyError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn test_permission_scoped_to_requestor_domain() {
        let delegate = delegate();
        delegate
            .grant_read_write("app.hns", PermCategory::Discoverable)
            .unwrap();

        let path = "other.hns/file.json";
        let tweak = derive_discoverable_file_tweak(path).unwrap();
        let entry = RegistryEntry::new(DataKey::Hashed(tweak), b"x".to_vec(), 0);
        assert!(delegate.sign_registry_entry(&entry, path).await.is_err());
    }

    #[tokio::test]
    async fn test_encrypted_signing_and_seed() {
        let delegate = delegate();
        let path = "app.hns/secret.json";

        assert!(delegate.encrypted_path_seed(path, false).await.is_err());
        delegate
            .grant_read_write("app.hns", PermCategory::Hidden)
            .unwrap();

        let seed = delegate.encrypted_path_seed(path, false).await.unwrap();
        let tweak = derive_encrypted_file_tweak(&seed);
        let entry = RegistryEntry::new(DataKey::Hashed(tweak), b"x".to_vec(), 3);

        let signature = delegate
            .sign_encrypted_registry_entry(&entry, path)
            .await
            .unwrap();
        let pk = delegate.user_id().await.unwrap();
        pk.verify(entry.hash().as_bytes(), &signature).unwrap();

        // The discoverable signer refuses hidden-tree entries.
        assert!(delegate.sign_registry_entry(&entry, path).await.is_err());
    }

    #[tokio::test]
    async fn test_check_permissions_and_revoke() {
        let delegate = delegate();
        let read = Permission::new("app.hns", "app.hns", PermCategory::Hidden, PermType::Read).unwrap();
        delegate.grant(read.clone());

        let response = delegate.check_permissions(&[read.clone()]).await.unwrap();
        assert!(response.all_granted());

        assert!(delegate.revoke(&read));
        let response = delegate.check_permissions(&[read]).await.unwrap();
        assert_eq!(response.failed_permissions.len(), 1);
    }
}
