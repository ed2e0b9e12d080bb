//! Deterministic binary encodings and string conversions.
//!
//! Everything that is hashed or signed goes through the helpers in this
//! module so the byte layout is identical on every platform:
//! - integers are 8-byte little-endian
//! - byte strings and UTF-8 strings carry an 8-byte little-endian length prefix
//! - public keys use the 16-byte Sia specifier followed by a prefixed key
//!
//! The string helpers cover the two skylink alphabets (unpadded base64url and
//! lowercase base32hex) and hex.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use multibase::Base;

use crate::error::{CoreError, Result};

/// Specifier for Ed25519 keys in Sia's binary public key encoding.
pub const ED25519_SPECIFIER: &[u8] = b"ed25519";

/// Length of a Sia specifier field.
pub const SPECIFIER_LEN: usize = 16;

/// Encode a u64 as 8 little-endian bytes.
pub fn encode_u64_le(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Encode bytes with an 8-byte little-endian length prefix.
pub fn encode_prefixed_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + bytes.len());
    buf.extend_from_slice(&encode_u64_le(bytes.len() as u64));
    buf.extend_from_slice(bytes);
    buf
}

/// Encode a string as length-prefixed UTF-8.
pub fn encode_utf8_string(s: &str) -> Vec<u8> {
    encode_prefixed_bytes(s.as_bytes())
}

/// Encode a Sia specifier, zero-padded to 16 bytes.
pub fn encode_specifier(name: &[u8]) -> [u8; SPECIFIER_LEN] {
    let mut buf = [0u8; SPECIFIER_LEN];
    let len = name.len().min(SPECIFIER_LEN);
    buf[..len].copy_from_slice(&name[..len]);
    buf
}

/// Encode an Ed25519 public key the way Sia does: specifier || prefixed key.
pub fn encode_sia_public_key(key: &[u8; 32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SPECIFIER_LEN + 8 + 32);
    buf.extend_from_slice(&encode_specifier(ED25519_SPECIFIER));
    buf.extend_from_slice(&encode_prefixed_bytes(key));
    buf
}

/// Remove a URI prefix such as `sia:` or `sia://` if present.
///
/// The longer `prefix//` form is tried first so `sia://abc` trims to `abc`.
pub fn trim_uri_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    let long = format!("{prefix}//");
    if let Some(rest) = s.strip_prefix(long.as_str()) {
        return rest;
    }
    s.strip_prefix(prefix).unwrap_or(s)
}

/// Encode bytes as unpadded base64url.
pub fn encode_base64_url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64url, tolerating `=` padding and the standard `+` / `/` alphabet.
pub fn decode_base64_url(s: &str) -> Result<Vec<u8>> {
    let normalized: String = s
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| CoreError::DecodingError(format!("base64: {e}")))
}

/// Encode bytes as lowercase, unpadded base32hex (subdomain-safe).
pub fn encode_base32(bytes: &[u8]) -> String {
    Base::Base32HexLower.encode(bytes)
}

/// Decode lowercase base32hex. Uppercase input is folded first.
pub fn decode_base32(s: &str) -> Result<Vec<u8>> {
    Base::Base32HexLower
        .decode(s.to_ascii_lowercase())
        .map_err(|e| CoreError::DecodingError(format!("base32: {e}")))
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(s).map_err(|e| CoreError::DecodingError(format!("hex: {e}")))?;
    bytes.as_slice().try_into().map_err(|_| {
        CoreError::DecodingError(format!("expected {N} bytes, got {}", bytes.len()))
    })
}
