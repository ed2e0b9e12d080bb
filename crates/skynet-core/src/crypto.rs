//! Cryptographic primitives for the Skynet client.
//!
//! Wraps Ed25519 signing and BLAKE2b-256 hashing with strong types.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

use crate::encoding::decode_hex_array;
use crate::error::{CoreError, ValidationError};

type Blake2b256 = Blake2b<U32>;

/// Minimum seed phrase length accepted by [`Keypair::from_seed_phrase`].
pub const MIN_SEED_LENGTH: usize = 16;

/// PBKDF2 rounds used to stretch a seed phrase.
const SEED_PBKDF2_ROUNDS: u32 = 1000;

/// A 32-byte BLAKE2b hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blake2bHash(pub [u8; 32]);

impl Blake2bHash {
    /// Compute the BLAKE2b-256 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        hash_all(&[data])
    }

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

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for Blake2bHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake2b({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Blake2bHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Blake2bHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Hash the concatenation of all parts with BLAKE2b-256.
pub fn hash_all(parts: &[&[u8]]) -> Blake2bHash {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Blake2bHash(out)
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
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

    /// Parse from hex string, with or without the `ed25519:` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        let s = s.strip_prefix("ed25519:").unwrap_or(s);
        let bytes: [u8; 32] = decode_hex_array(s)
            .map_err(|e| ValidationError::InvalidPublicKey(e.to_string()))?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|_| ValidationError::InvalidPublicKey("not a valid ed25519 point".into()))?;
        Ok(Self(bytes))
    }

    /// The `ed25519:<hex>` form used in registry lookups.
    pub fn to_prefixed_hex(&self) -> String {
        format!("ed25519:{}", self.to_hex())
    }

    /// Verify a detached signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CoreError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;

        let sig = Signature::from_bytes(&signature.0);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Ed25519PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519Signature(#[serde(with = "sig_bytes")] pub [u8; 64]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array(s).map(Self)
    }

    /// The zero signature (invalid, used as placeholder).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Ed25519Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

// serde only derives array impls up to 32 elements.
mod sig_bytes {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 64], D::Error> {
        let bytes: Vec<u8> = Vec::deserialize(deserializer)?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| D::Error::invalid_length(bytes.len(), &"64 bytes"))
    }
}

/// A keypair for signing registry entries.
///
/// This wraps ed25519-dalek's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Deterministically derive a keypair from a user seed phrase.
    ///
    /// The phrase is stretched with PBKDF2-HMAC-SHA256 (empty salt, 1000
    /// rounds) into the 32-byte Ed25519 seed.
    pub fn from_seed_phrase(seed: &str) -> Result<Self, ValidationError> {
        if seed.len() < MIN_SEED_LENGTH {
            return Err(ValidationError::SeedTooShort {
                len: seed.len(),
                min: MIN_SEED_LENGTH,
            });
        }
        let mut derived = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<Sha256>(seed.as_bytes(), b"", SEED_PBKDF2_ROUNDS, &mut derived);
        Ok(Self::from_seed(&derived))
    }

    /// Generate a random hex seed phrase with `entropy_len` bytes of entropy
    /// and the keypair derived from it.
    pub fn generate_with_seed_phrase(entropy_len: usize) -> Result<(Self, String), ValidationError> {
        let mut entropy = vec![0u8; entropy_len];
        rand::thread_rng().fill_bytes(&mut entropy);
        let phrase = hex::encode(entropy);
        let keypair = Self::from_seed_phrase(&phrase)?;
        Ok((keypair, phrase))
    }

    /// Rebuild a keypair from the 64-byte secret key (seed || public key).
    pub fn from_secret_key(bytes: &[u8; 64]) -> Result<Self, ValidationError> {
        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| ValidationError::InvalidSecretKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// Rebuild a keypair from the hex form of the 64-byte secret key.
    pub fn from_secret_key_hex(s: &str) -> Result<Self, ValidationError> {
        let bytes: [u8; 64] =
            decode_hex_array(s).map_err(|e| ValidationError::InvalidSecretKey(e.to_string()))?;
        Self::from_secret_key(&bytes)
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// The 64-byte secret key (seed || public key).
    pub fn secret_key(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_sign_verify() {
        let keypair = Keypair::generate();
        let message = b"hello world";
        let signature = keypair.sign(message);

        keypair
            .public_key()
            .verify(message, &signature)
            .expect("valid signature should verify");

        let tampered = b"hello worlD";
        assert!(keypair.public_key().verify(tampered, &signature).is_err());
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn test_seed_phrase_deterministic() {
        let kp1 = Keypair::from_seed_phrase("insecure test seed phrase").unwrap();
        let kp2 = Keypair::from_seed_phrase("insecure test seed phrase").unwrap();
        let kp3 = Keypair::from_seed_phrase("another test seed phrase").unwrap();
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_ne!(kp1.public_key(), kp3.public_key());
    }

    #[test]
    fn test_seed_phrase_too_short() {
        let result = Keypair::from_seed_phrase("short");
        assert!(matches!(
            result,
            Err(ValidationError::SeedTooShort { len: 5, min: MIN_SEED_LENGTH })
        ));
    }

    #[test]
    fn test_generate_with_seed_phrase() {
        let (keypair, phrase) = Keypair::generate_with_seed_phrase(32).unwrap();
        assert_eq!(phrase.len(), 64);
        let again = Keypair::from_seed_phrase(&phrase).unwrap();
        assert_eq!(keypair.public_key(), again.public_key());
    }

    #[test]
    fn test_secret_key_roundtrip() {
        let keypair = Keypair::generate();
        let secret = keypair.secret_key();
        assert_eq!(&secret[32..], keypair.public_key().as_bytes());

        let restored = Keypair::from_secret_key_hex(&hex::encode(secret)).unwrap();
        assert_eq!(restored.public_key(), keypair.public_key());
    }

    #[test]
    fn test_secret_key_mismatched_halves_rejected() {
        let mut secret = Keypair::generate().secret_key();
        secret[40] ^= 0xff;
        assert!(Keypair::from_secret_key(&secret).is_err());
    }

    #[test]
    fn test_hash_all_is_concatenation() {
        let joined = hash_all(&[b"hello ", b"world"]);
        let single = Blake2bHash::hash(b"hello world");
        assert_eq!(joined, single);
        assert_ne!(single, Blake2bHash::hash(b"hello worlD"));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let keypair = Keypair::generate();
        let pk = keypair.public_key();
        let recovered = Ed25519PublicKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(pk, recovered);
        let prefixed = Ed25519PublicKey::from_hex(&pk.to_prefixed_hex()).unwrap();
        assert_eq!(pk, prefixed);
    }

    #[test]
    fn test_public_key_bad_length() {
        assert!(Ed25519PublicKey::from_hex("abcd").is_err());
    }
}
