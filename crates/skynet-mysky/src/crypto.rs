//! Encrypted file format for hidden MySky data.
//!
//! An encrypted file is `nonce (24) || XChaCha20-Poly1305(plaintext)`, where
//! the plaintext is a 16-byte header, the JSON document and zero padding.
//! The header holds a version byte, seven reserved bytes and the JSON length
//! as a little-endian u64. Whole files are padded with [`pad_file_size`] so
//! their size leaks only a coarse bucket.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;
use serde_json::{Map, Value};

use crate::error::{MyskyError, Result};

/// A JSON object, the unit SkyDB and MySky store.
pub type JsonData = Map<String, Value>;

/// Current version of the encrypted file header.
pub const ENCRYPTION_VERSION: u8 = 1;

/// Length of the XChaCha20 nonce prefix.
pub const ENCRYPTION_NONCE_LENGTH: usize = 24;

/// Length of the Poly1305 tag appended to the ciphertext.
pub const ENCRYPTION_OVERHEAD_LENGTH: usize = 16;

/// Length of the plaintext header.
pub const ENCRYPTION_HEADER_LENGTH: usize = 16;

/// A 256-bit symmetric encryption key for XChaCha20-Poly1305.
#[derive(Clone)]
pub struct EncryptionKey([u8; 32]);

impl EncryptionKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encrypt data with this key.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &EncryptionNonce) -> Result<Vec<u8>> {
        let cipher = XChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| MyskyError::Encryption(e.to_string()))?;

        cipher
            .encrypt(XNonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| MyskyError::Encryption(e.to_string()))
    }

    /// Decrypt data with this key.
    pub fn decrypt(&self, ciphertext: &[u8], nonce: &EncryptionNonce) -> Result<Vec<u8>> {
        let cipher = XChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| MyskyError::Decryption(e.to_string()))?;

        cipher
            .decrypt(XNonce::from_slice(&nonce.0), ciphertext)
            .map_err(|e| MyskyError::Decryption(e.to_string()))
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}

/// A 192-bit nonce for XChaCha20-Poly1305.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionNonce(pub [u8; ENCRYPTION_NONCE_LENGTH]);

impl EncryptionNonce {
    /// Generate a new random nonce.
    pub fn generate() -> Self {
        let mut bytes = [0u8; ENCRYPTION_NONCE_LENGTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; ENCRYPTION_NONCE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ENCRYPTION_NONCE_LENGTH] {
        &self.0
    }
}

/// Round a file size up to its padding bucket.
///
/// Files up to 80 KiB pad to 4 KiB blocks, up to 160 KiB to 8 KiB blocks,
/// and so on, doubling both bounds each step.
pub fn pad_file_size(initial_size: u64) -> Result<u64> {
    const KIB: u64 = 1 << 10;
    for n in 0..53u32 {
        let scale = 1u64 << n;
        let bound = scale.checked_mul(80 * KIB).unwrap_or(u64::MAX);
        if initial_size <= bound {
            let block = scale * 4 * KIB;
            let remainder = initial_size % block;
            if remainder == 0 {
                return Ok(initial_size);
            }
            return initial_size
                .checked_add(block - remainder)
                .ok_or_else(|| MyskyError::Encryption("padded file size overflows".into()));
        }
    }
    Err(MyskyError::Encryption(format!(
        "cannot pad file size {initial_size}"
    )))
}

/// Encrypt a JSON document into the padded file format.
pub fn encrypt_json_file(json: &JsonData, key: &EncryptionKey) -> Result<Vec<u8>> {
    let body = serde_json::to_vec(json).map_err(|e| MyskyError::Encryption(e.to_string()))?;

    let unpadded = ENCRYPTION_NONCE_LENGTH
        + ENCRYPTION_HEADER_LENGTH
        + body.len()
        + ENCRYPTION_OVERHEAD_LENGTH;
    let final_size = pad_file_size(unpadded as u64)? as usize;
    let plaintext_len = final_size - ENCRYPTION_NONCE_LENGTH - ENCRYPTION_OVERHEAD_LENGTH;

    let mut plaintext = Vec::with_capacity(plaintext_len);
    plaintext.push(ENCRYPTION_VERSION);
    plaintext.extend_from_slice(&[0u8; 7]);
    plaintext.extend_from_slice(&(body.len() as u64).to_le_bytes());
    plaintext.extend_from_slice(&body);
    plaintext.resize(plaintext_len, 0);

    let nonce = EncryptionNonce::generate();
    let ciphertext = key.encrypt(&plaintext, &nonce)?;

    let mut file = Vec::with_capacity(final_size);
    file.extend_from_slice(nonce.as_bytes());
    file.extend_from_slice(&ciphertext);
    Ok(file)
}

/// Decrypt a file produced by [`encrypt_json_file`].
pub fn decrypt_json_file(data: &[u8], key: &EncryptionKey) -> Result<JsonData> {
    let min = ENCRYPTION_NONCE_LENGTH + ENCRYPTION_HEADER_LENGTH + ENCRYPTION_OVERHEAD_LENGTH;
    if data.len() < min {
        return Err(MyskyError::InvalidEncryptedFile(format!(
            "{} bytes is shorter than the minimum {min}",
            data.len()
        )));
    }

    let (nonce_bytes, ciphertext) = data.split_at(ENCRYPTION_NONCE_LENGTH);
    let mut nonce = [0u8; ENCRYPTION_NONCE_LENGTH];
    nonce.copy_from_slice(nonce_bytes);
    let plaintext = key.decrypt(ciphertext, &EncryptionNonce(nonce))?;

    let (header, rest) = plaintext.split_at(ENCRYPTION_HEADER_LENGTH);
    if header[0] != ENCRYPTION_VERSION {
        return Err(MyskyError::InvalidEncryptedFile(format!(
            "unsupported version {}",
            header[0]
        )));
    }
    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&header[8..16]);
    let body_len = u64::from_le_bytes(len_bytes);
    if body_len > rest.len() as u64 {
        return Err(MyskyError::InvalidEncryptedFile(format!(
            "declared length {body_len} exceeds {} available bytes",
            rest.len()
        )));
    }

    serde_json::from_slice(&rest[..body_len as usize])
        .map_err(|e| MyskyError::InvalidEncryptedFile(format!("json: {e}")))
}
