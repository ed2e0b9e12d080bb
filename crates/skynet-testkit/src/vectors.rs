//! Golden test vectors for wire compatibility.
//!
//! Portals verify signatures over the exact Sia encoding of an entry, so
//! these hashes must never change. They were computed independently of this
//! crate.

use skynet_core::{entry_link, DataKey, Ed25519Signature, Keypair, RegistryEntry, Skylink};
use skynet_mysky::derive_discoverable_file_tweak;

/// A registry entry with its expected derived values.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    /// Unhashed data key.
    pub data_key: &'static str,
    /// Entry data.
    pub data: &'static [u8],
    /// Entry revision.
    pub revision: u64,
    /// Expected public key (hex).
    pub expected_public_key: &'static str,
    /// Expected data key hash (hex).
    pub expected_data_key_hash: &'static str,
    /// Expected entry hash (hex).
    pub expected_entry_hash: &'static str,
    /// Expected signature over the entry hash (hex).
    pub expected_signature: &'static str,
    /// Expected v2 skylink of the entry.
    pub expected_entry_link: &'static str,
}

/// Registry entry vectors.
pub fn entry_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "first revision under app",
            seed: [0x01; 32],
            data_key: "app",
            data: b"hello",
            revision: 0,
            expected_public_key: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            expected_data_key_hash:
                "7c96a0537ab2aaac9cfe0eca217732f4e10791625b4ab4c17e4d91c8078713b9",
            expected_entry_hash: "08150042835922490e5989987550e074181a71db56fae5766f008d54734d4ad9",
            expected_signature: "9badd840cd7726699dbe78fc7b52bb1375e96ac884f3885824f2f4e872b07dba\
                                 2c67b457b738821538295c7fe9cd99adddf78a4867ad01febd1c523e70212f04",
            expected_entry_link: "sia:AQBV2g7r5FATOl90snVwTmd0gWVMQvm8EJjScDdtDs6CAw",
        },
        GoldenVector {
            name: "HelloWorld at a large revision",
            seed: [0x42; 32],
            data_key: "HelloWorld",
            data: b"abc",
            revision: 123_456_789,
            expected_public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            expected_data_key_hash:
                "6fc3ebebd0e60c5ddf555b43d8b75d85a1cbe2b6af02b9812478b438a0e5d6dd",
            expected_entry_hash: "788dddf5232807611557a3dc0fa5f34012c2650526ba91d55411a2b04ba56164",
            expected_signature: "cccb027b66b184268e7d49ee12369fa5a5461391c96b095ed5c67c4c730dfe5a\
                                 9e62353925671583c03c3bdb64b270428a6eb5fe6d0619ce8a974cff5f87c804",
            expected_entry_link: "sia:AQBkBPi_inc8POpRhHLdam4QY8OKWVHjkr9ONeEo25eEPQ",
        },
    ]
}

/// A seed phrase and the public key it derives.
pub const SEED_PHRASE_VECTOR: (&str, &str) = (
    "correct horse battery staple seed",
    "5e5d64d49518eea07d486435afa339a33d50d4feee241daae8da73ab8d49ff4f",
);

/// A skylink in both of its string forms.
pub const SKYLINK_VECTOR: (&str, &str) = (
    "XABvi7JtJbQSMAcDwnUnmp2FKDPjg8_tTTFP4BwMSxVdEg",
    "bg06v2tidkir84hg0s1s4t97jaeoaa1jse1svrad657u070c9calq4g",
);

/// A discoverable MySky path and its data key.
pub const DISCOVERABLE_TWEAK_VECTOR: (&str, &str) = (
    "skyfeed.hns/preferences/ui.json",
    "c4125a9886a6e70b27c5191c13ddd6c5d808078ee6ef80c12f1a30e28e9648e1",
);

/// Build and sign the entry described by a vector.
pub fn generate_entry_from_vector(vector: &GoldenVector) -> (RegistryEntry, Ed25519Signature) {
    let keypair = Keypair::from_seed(&vector.seed);
    let entry = RegistryEntry::new(
        DataKey::plain(vector.data_key),
        vector.data.to_vec(),
        vector.revision,
    );
    let signature = entry.sign(&keypair);
    (entry, signature)
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, what was computed)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results: Vec<(String, bool, String)> = entry_vectors()
        .iter()
        .map(|v| {
            let keypair = Keypair::from_seed(&v.seed);
            let (entry, signature) = generate_entry_from_vector(v);
            let public_key = keypair.public_key();
            let computed = [
                public_key.to_hex(),
                entry.data_key.to_hex(),
                entry.hash().to_hex(),
                signature.to_hex(),
                entry_link(&public_key, &entry.data_key),
            ];
            let expected = [
                v.expected_public_key.to_string(),
                v.expected_data_key_hash.to_string(),
                v.expected_entry_hash.to_string(),
                v.expected_signature.to_string(),
                v.expected_entry_link.to_string(),
            ];
            (v.name.to_string(), computed == expected, computed.join(" "))
        })
        .collect();

    let (phrase, expected) = SEED_PHRASE_VECTOR;
    let derived = Keypair::from_seed_phrase(phrase)
        .map(|kp| kp.public_key().to_hex())
        .unwrap_or_else(|e| e.to_string());
    results.push(("seed phrase".into(), derived == expected, derived));

    let (base64, base32) = SKYLINK_VECTOR;
    let converted = Skylink::from_base64(base64)
        .map(|link| link.to_base32())
        .unwrap_or_else(|e| e.to_string());
    results.push(("skylink base32".into(), converted == base32, converted));

    let (path, expected) = DISCOVERABLE_TWEAK_VECTOR;
    let tweak = derive_discoverable_file_tweak(path)
        .map(|hash| hash.to_hex())
        .unwrap_or_else(|e| e.to_string());
    results.push(("discoverable tweak".into(), tweak == expected, tweak));

    results
}
