//! Verified registry access.
//!
//! Every entry read from a portal is checked against the owner's public key
//! before it is returned. A 404 is an absent entry, not an error.

use skynet_core::{
    entry_link, validate_entry_structure, verify_registry_entry, Ed25519PublicKey,
    Ed25519Signature, Keypair, RegistryEntry, SignedRegistryEntry,
};
use skynet_portal::{registry_lookup_url, Portal};
use url::Url;

use crate::client::{portal_url, SkynetClient};
use crate::config::{CallOptions, ResolvedOptions};
use crate::error::{Result, SkynetError};

impl<P: Portal> SkynetClient<P> {
    /// Look up and verify the entry at `(public_key, data_key)`.
    pub async fn get_entry(
        &self,
        public_key: &Ed25519PublicKey,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<SignedRegistryEntry> {
        let resolved = self.resolve(data_key, options)?;
        self.get_entry_at(public_key, &resolved).await
    }

    pub(crate) async fn get_entry_at(
        &self,
        public_key: &Ed25519PublicKey,
        resolved: &ResolvedOptions,
    ) -> Result<SignedRegistryEntry> {
        let data_key_hash = resolved.data_key.hash();
        let raw = self
            .portal()
            .get_registry_entry(public_key, &data_key_hash, resolved.timeout)
            .await?;

        let Some(raw) = raw else {
            tracing::debug!(%public_key, data_key = %data_key_hash.to_hex(), "registry entry not found");
            return Ok(SignedRegistryEntry::not_found());
        };

        let entry = RegistryEntry::new(resolved.data_key.clone(), raw.data, raw.revision);
        if let Err(e) = verify_registry_entry(public_key, &entry, &raw.signature) {
            tracing::warn!(
                %public_key,
                data_key = %data_key_hash.to_hex(),
                revision = entry.revision,
                error = %e,
                "registry entry failed verification"
            );
            return Err(SkynetError::Integrity(format!(
                "entry at revision {} does not verify against {public_key}: {e}",
                entry.revision
            )));
        }

        tracing::debug!(
            %public_key,
            data_key = %data_key_hash.to_hex(),
            revision = entry.revision,
            "registry entry read"
        );
        Ok(SignedRegistryEntry::found(entry, raw.signature))
    }

    /// Sign `entry` with `keypair` and submit it.
    pub async fn set_entry(&self, keypair: &Keypair, entry: &RegistryEntry) -> Result<()> {
        validate_entry_structure(entry)?;
        let signature = entry.sign(keypair);
        self.submit(&keypair.public_key(), entry, &signature).await
    }

    /// Submit an entry signed elsewhere, for instance by a MySky delegate.
    ///
    /// The signature is checked locally first, so a bad signer fails before
    /// anything is sent.
    pub async fn post_signed_entry(
        &self,
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        signature: &Ed25519Signature,
    ) -> Result<()> {
        validate_entry_structure(entry)?;
        verify_registry_entry(public_key, entry, signature)
            .map_err(|e| SkynetError::Integrity(format!("refusing to post: {e}")))?;
        self.submit(public_key, entry, signature).await
    }

    async fn submit(
        &self,
        public_key: &Ed25519PublicKey,
        entry: &RegistryEntry,
        signature: &Ed25519Signature,
    ) -> Result<()> {
        self.portal()
            .post_registry_entry(public_key, entry, signature)
            .await
            .map_err(|e| {
                tracing::warn!(
                    %public_key,
                    data_key = %entry.data_key.to_hex(),
                    revision = entry.revision,
                    error = %e,
                    "registry entry rejected"
                );
                e
            })?;

        tracing::debug!(
            %public_key,
            data_key = %entry.data_key.to_hex(),
            revision = entry.revision,
            "registry entry written"
        );
        Ok(())
    }

    /// The `sia:` v2 link naming whatever is stored at `(public_key, data_key)`.
    pub fn get_entry_link(
        &self,
        public_key: &Ed25519PublicKey,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<String> {
        let resolved = self.resolve(data_key, options)?;
        Ok(entry_link(public_key, &resolved.data_key))
    }

    /// The portal URL that [`get_entry`](Self::get_entry) reads from.
    pub fn get_entry_url(
        &self,
        public_key: &Ed25519PublicKey,
        data_key: &str,
        options: &CallOptions,
    ) -> Result<Url> {
        let resolved = self.resolve(data_key, options)?;
        let portal = portal_url(self.config())?;
        Ok(registry_lookup_url(
            &portal,
            public_key,
            &resolved.data_key.hash(),
            resolved.timeout,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use bytes::Bytes;
    use skynet_core::{hash_data_key, DataKey, Skylink};
    use skynet_portal::{MemoryPortal, PortalError};

    fn client() -> SkynetClient<MemoryPortal> {
        SkynetClient::new(MemoryPortal::new(), ClientConfig::default())
    }

    #[tokio::test]
    async fn test_get_entry_not_found() {
        let client = client();
        let keypair = Keypair::generate();

        let signed = client
            .get_entry(&keypair.public_key(), "missing", &CallOptions::new())
            .await
            .unwrap();
        assert!(!signed.is_found());
        assert!(signed.signature.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_entry() {
        let client = client();
        let keypair = Keypair::generate();
        let entry = RegistryEntry::new(DataKey::plain("k"), Bytes::from_static(b"value"), 3);

        client.set_entry(&keypair, &entry).await.unwrap();

        let signed = client
            .get_entry(&keypair.public_key(), "k", &CallOptions::new())
            .await
            .unwrap();
        assert_eq!(signed.entry.as_ref().unwrap().data, entry.data);
        assert_eq!(signed.revision(), Some(3));
    }

    #[tokio::test]
    async fn test_tampered_entry_is_integrity_error() {
        let client = client();
        let keypair = Keypair::generate();
        let entry = RegistryEntry::new(DataKey::plain("k"), Bytes::from_static(b"value"), 0);
        let signature = entry.sign(&keypair);

        let tampered = RegistryEntry::new(DataKey::plain("k"), Bytes::from_static(b"evil!"), 0);
        client
            .portal()
            .insert_unchecked(&keypair.public_key(), &tampered, &signature);

        let result = client
            .get_entry(&keypair.public_key(), "k", &CallOptions::new())
            .await;
        assert!(matches!(result, Err(SkynetError::Integrity(_))));
    }

    #[tokio::test]
    async fn test_stale_revision_is_transport_error() {
        let client = client();
        let keypair = Keypair::generate();
        let entry = RegistryEntry::new(DataKey::plain("k"), Bytes::from_static(b"a"), 5);
        client.set_entry(&keypair, &entry).await.unwrap();

        let stale = RegistryEntry::new(DataKey::plain("k"), Bytes::from_static(b"b"), 5);
        let result = client.set_entry(&keypair, &stale).await;
        assert!(matches!(
            result,
            Err(SkynetError::Transport(PortalError::RevisionRejected { revision: 5, current: 5 }))
        ));
    }

    #[tokio::test]
    async fn test_post_signed_entry_checks_signature_locally() {
        let client = client();
        let owner = Keypair::generate();
        let other = Keypair::generate();
        let entry = RegistryEntry::new(DataKey::plain("k"), Bytes::from_static(b"x"), 0);

        let result = client
            .post_signed_entry(&owner.public_key(), &entry, &entry.sign(&other))
            .await;
        assert!(matches!(result, Err(SkynetError::Integrity(_))));
        assert_eq!(client.portal().stats().registry_writes, 0);

        client
            .post_signed_entry(&owner.public_key(), &entry, &entry.sign(&owner))
            .await
            .unwrap();
        assert_eq!(client.portal().stats().registry_writes, 1);
    }

    #[tokio::test]
    async fn test_oversized_entry_rejected_before_network() {
        let client = client();
        let keypair = Keypair::generate();
        let entry = RegistryEntry::new(DataKey::plain("k"), vec![1u8; 114], 0);

        let result = client.set_entry(&keypair, &entry).await;
        assert!(matches!(result, Err(SkynetError::Validation(_))));
        assert_eq!(client.portal().stats().registry_writes, 0);
    }

    #[test]
    fn test_entry_link_hashed_and_plain_agree() {
        let client = client();
        let keypair = Keypair::generate();
        let pk = keypair.public_key();

        let plain = client.get_entry_link(&pk, "app", &CallOptions::new()).unwrap();
        let hashed = client
            .get_entry_link(
                &pk,
                &hash_data_key("app").to_hex(),
                &CallOptions::new().hashed_data_key_hex(true),
            )
            .unwrap();
        assert_eq!(plain, hashed);

        let skylink: Skylink = plain.parse().unwrap();
        assert!(skylink.is_v2());
    }

    #[test]
    fn test_entry_url() {
        let client = SkynetClient::new(
            MemoryPortal::new(),
            ClientConfig::with_portal("https://portal.example"),
        );
        let keypair = Keypair::from_seed(&[1u8; 32]);
        let pk = keypair.public_key();

        let url = client
            .get_entry_url(&pk, "app", &CallOptions::new())
            .unwrap();
        assert_eq!(
            url.as_str(),
            format!(
                "https://portal.example/skynet/registry?publickey=ed25519%3A{}&datakey=7c96a0537ab2aaac9cfe0eca217732f4e10791625b4ab4c17e4d91c8078713b9&timeout=5",
                pk.to_hex()
            )
        );
    }
}
