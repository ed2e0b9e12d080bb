//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use serde_json::Value;
use skynet::{ClientConfig, MySky, SkynetClient};
use skynet_core::{Ed25519PublicKey, Keypair, Skylink};
use skynet_mysky::{LocalDelegate, PermCategory};
use skynet_portal::MemoryPortal;

/// A test fixture with a keypair and a client over an in-memory portal.
pub struct TestFixture {
    pub keypair: Keypair,
    pub client: SkynetClient<MemoryPortal>,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self::with_keypair(Keypair::generate(), Arc::new(MemoryPortal::new()))
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::with_keypair(Keypair::from_seed(&seed), Arc::new(MemoryPortal::new()))
    }

    fn with_keypair(keypair: Keypair, portal: Arc<MemoryPortal>) -> Self {
        Self {
            keypair,
            client: SkynetClient::with_shared_portal(portal, ClientConfig::default()),
        }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Store a JSON value as a blob directly in the portal.
    pub fn store_json(&self, value: &Value) -> Skylink {
        self.client
            .portal()
            .put_blob(value.to_string().into_bytes())
            .expect("memory portal accepts blobs")
    }

    /// A MySky session for `domain`, with read and write access to both
    /// its discoverable and hidden files.
    pub fn session(&self, seed_phrase: &str, domain: &str) -> MySky<MemoryPortal, LocalDelegate> {
        let delegate =
            LocalDelegate::from_seed_phrase(seed_phrase, domain).expect("seed phrase too short");
        for category in [PermCategory::Discoverable, PermCategory::Hidden] {
            delegate
                .grant_read_write(domain, category)
                .expect("invalid domain");
        }
        MySky::new(self.client.clone(), delegate, domain)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures for multi-party tests. All parties share one portal.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    let portal = Arc::new(MemoryPortal::new());
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_keypair(Keypair::from_seed(&seed), Arc::clone(&portal))
        })
        .collect()
}
