//! Skylink codec.
//!
//! A skylink is 34 bytes: a 2-byte little-endian bitfield followed by a
//! 32-byte merkle root. The low two bits of the bitfield carry the version:
//!
//! - **v1** points at content. The remaining bitfield bits encode where the
//!   file sits inside its sector (offset) and how much to fetch.
//! - **v2** points at a registry slot. The root is the registry entry id of
//!   `(public key, tweak)` and the rest of the bitfield is zero.
//!
//! Skylinks travel as unpadded base64url (46 chars) or, where a DNS label is
//! needed, as lowercase base32hex (55 chars). The canonical human form is the
//! base64 string prefixed with `sia:`.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use url::Url;

use crate::crypto::{hash_all, Blake2bHash, Ed25519PublicKey};
use crate::encoding::{
    decode_base32, decode_base64_url, encode_base32, encode_base64_url, encode_sia_public_key,
    trim_uri_prefix,
};
use crate::error::{CoreError, Result, ValidationError};

/// Raw binary length of a skylink.
pub const RAW_SKYLINK_SIZE: usize = 34;

/// Length of the unpadded base64url form.
pub const BASE64_ENCODED_SKYLINK_SIZE: usize = 46;

/// Length of the unpadded base32hex form.
pub const BASE32_ENCODED_SKYLINK_SIZE: usize = 55;

/// Canonical URI prefix.
pub const URI_SKYNET_PREFIX: &str = "sia:";

/// Base URL used to resolve relative inputs in [`parse_skylink`].
pub const DEFAULT_PARSE_BASE_URL: &str = "https://siasky.net";

/// Largest span a v1 skylink can address (one sector).
pub const MAX_V1_FETCH_SIZE: u64 = 1 << 22;

const V1_MIN_ALIGN: u64 = 4096;
const V1_MAX_MODE: u32 = 7;
const V1_FETCH_BITS: u32 = 3;

/// A decoded 34-byte skylink.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Skylink([u8; RAW_SKYLINK_SIZE]);

impl Skylink {
    /// Build a v1 skylink for `fetch_size` bytes at `offset` within the
    /// sector whose merkle root is given.
    ///
    /// The fetch size is rounded up to the alignment the chosen mode allows.
    pub fn new_v1(merkle_root: &Blake2bHash, offset: u64, fetch_size: u64) -> Result<Self> {
        if fetch_size == 0 || fetch_size > MAX_V1_FETCH_SIZE {
            return Err(CoreError::InvalidSkylink(format!(
                "fetch size {fetch_size} out of range 1..={MAX_V1_FETCH_SIZE}"
            )));
        }
        if offset.saturating_add(fetch_size) > MAX_V1_FETCH_SIZE {
            return Err(CoreError::InvalidSkylink(format!(
                "offset {offset} + fetch size {fetch_size} exceeds {MAX_V1_FETCH_SIZE}"
            )));
        }

        for mode in 0..=V1_MAX_MODE {
            let align = V1_MIN_ALIGN << mode;
            let fetch_units = fetch_size.div_ceil(align);
            if fetch_units > 1 << V1_FETCH_BITS {
                continue;
            }
            if offset % align != 0 {
                continue;
            }
            let offset_units = offset / align;
            if offset_units >= 1 << v1_offset_bits(mode) {
                continue;
            }

            let mut bitfield: u16 = ((1u16 << mode) - 1) << 2;
            bitfield |= ((fetch_units - 1) as u16) << (3 + mode);
            bitfield |= (offset_units as u16) << (3 + mode + V1_FETCH_BITS);
            return Ok(Self::from_parts(bitfield, merkle_root.as_bytes()));
        }

        Err(CoreError::InvalidSkylink(format!(
            "offset {offset} cannot be aligned for fetch size {fetch_size}"
        )))
    }

    /// Build a v2 skylink pointing at the registry slot `(public_key, tweak)`.
    pub fn new_v2(public_key: &Ed25519PublicKey, tweak: &Blake2bHash) -> Self {
        let entry_id = derive_registry_entry_id(public_key, tweak);
        Self::from_parts(1, entry_id.as_bytes())
    }

    fn from_parts(bitfield: u16, root: &[u8; 32]) -> Self {
        let mut bytes = [0u8; RAW_SKYLINK_SIZE];
        bytes[..2].copy_from_slice(&bitfield.to_le_bytes());
        bytes[2..].copy_from_slice(root);
        Self(bytes)
    }

    /// Validate and wrap raw bytes. Anything but 34 bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; RAW_SKYLINK_SIZE] = bytes.try_into().map_err(|_| {
            CoreError::InvalidSkylink(format!(
                "expected {RAW_SKYLINK_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        let skylink = Self(raw);
        match skylink.bitfield() & 0b11 {
            0 => {
                skylink.offset_and_fetch_size()?;
            }
            1 => {
                if skylink.bitfield() != 1 {
                    return Err(CoreError::InvalidSkylink(
                        "v2 skylink has non-zero bitfield bits".into(),
                    ));
                }
            }
            other => {
                return Err(CoreError::InvalidSkylink(format!(
                    "unsupported skylink version {}",
                    other + 1
                )));
            }
        }
        Ok(skylink)
    }

    /// Decode the unpadded base64url form.
    pub fn from_base64(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_base64_url(s)?)
    }

    /// Decode the base32hex form.
    pub fn from_base32(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_base32(s)?)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; RAW_SKYLINK_SIZE] {
        &self.0
    }

    /// The little-endian bitfield.
    pub fn bitfield(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    /// The merkle root (v1) or registry entry id (v2).
    pub fn merkle_root(&self) -> Blake2bHash {
        let mut root = [0u8; 32];
        root.copy_from_slice(&self.0[2..]);
        Blake2bHash(root)
    }

    /// Skylink version, 1 or 2.
    pub fn version(&self) -> u8 {
        (self.bitfield() & 0b11) as u8 + 1
    }

    pub fn is_v1(&self) -> bool {
        self.version() == 1
    }

    pub fn is_v2(&self) -> bool {
        self.version() == 2
    }

    /// Offset and fetch size encoded in a v1 bitfield.
    pub fn offset_and_fetch_size(&self) -> Result<(u64, u64)> {
        let mut bits = self.bitfield();
        if bits & 0b11 != 0 {
            return Err(CoreError::InvalidSkylink(
                "offset and fetch size only exist on v1 skylinks".into(),
            ));
        }
        bits >>= 2;

        let mut mode = 0u32;
        while bits & 1 == 1 {
            mode += 1;
            bits >>= 1;
        }
        if mode > V1_MAX_MODE {
            return Err(CoreError::InvalidSkylink(format!(
                "v1 bitfield mode {mode} exceeds {V1_MAX_MODE}"
            )));
        }
        bits >>= 1;

        let align = V1_MIN_ALIGN << mode;
        let fetch_units = u64::from(bits & ((1 << V1_FETCH_BITS) - 1)) + 1;
        let offset_units = u64::from(bits >> V1_FETCH_BITS);

        let fetch_size = fetch_units * align;
        let offset = offset_units * align;
        if offset + fetch_size > MAX_V1_FETCH_SIZE {
            return Err(CoreError::InvalidSkylink(format!(
                "v1 offset {offset} + fetch size {fetch_size} exceeds {MAX_V1_FETCH_SIZE}"
            )));
        }
        Ok((offset, fetch_size))
    }

    /// Unpadded base64url form (46 chars).
    pub fn to_base64(&self) -> String {
        encode_base64_url(&self.0)
    }

    /// Lowercase base32hex form (55 chars).
    pub fn to_base32(&self) -> String {
        encode_base32(&self.0)
    }

    /// Canonical `sia:` form.
    pub fn to_uri(&self) -> String {
        format!("{URI_SKYNET_PREFIX}{}", self.to_base64())
    }

    /// Whether this is the all-zero value used as a deletion marker.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

fn v1_offset_bits(mode: u32) -> u32 {
    16 - 2 - (mode + 1) - V1_FETCH_BITS
}

impl fmt::Debug for Skylink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skylink(v{}, {})", self.version(), self.to_base64())
    }
}

impl fmt::Display for Skylink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl FromStr for Skylink {
    type Err = CoreError;

    /// Accepts the base64 or base32 form, with or without a `sia:` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let bare = trim_uri_prefix(s, URI_SKYNET_PREFIX);
        match bare.len() {
            BASE32_ENCODED_SKYLINK_SIZE => Self::from_base32(bare),
            _ => Self::from_base64(bare),
        }
    }
}

impl AsRef<[u8]> for Skylink {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Skylink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Skylink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The registry entry id: `hash_all(sia_public_key, tweak)`.
pub fn derive_registry_entry_id(public_key: &Ed25519PublicKey, tweak: &Blake2bHash) -> Blake2bHash {
    hash_all(&[&encode_sia_public_key(public_key.as_bytes()), tweak.as_bytes()])
}

/// Ensure a skylink string carries the canonical `sia:` prefix.
///
/// Idempotent, and `sia://` is normalized to `sia:`. Empty input stays empty.
pub fn format_skylink(skylink: &str) -> String {
    if skylink.is_empty() {
        return String::new();
    }
    let bare = trim_uri_prefix(skylink, URI_SKYNET_PREFIX);
    format!("{URI_SKYNET_PREFIX}{bare}")
}

/// Decode a skylink string in `sia:`, `sia://` or bare form.
pub fn decode_skylink(skylink: &str) -> Result<Skylink> {
    skylink.parse()
}

/// Convert a base64 skylink (optionally prefixed) to its base32 form.
pub fn convert_skylink_to_base32(skylink: &str) -> Result<String> {
    let bare = trim_uri_prefix(skylink, URI_SKYNET_PREFIX);
    Skylink::from_base64(bare).map(|s| s.to_base32())
}

/// Convert a base32 skylink to its base64 form.
pub fn convert_skylink_to_base64(skylink: &str) -> Result<String> {
    Skylink::from_base32(skylink).map(|s| s.to_base64())
}

/// Options for [`parse_skylink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSkylinkOptions {
    /// Look for a base32 skylink in the first hostname label.
    pub from_subdomain: bool,
    /// Return `skylink/path` instead of just the skylink.
    pub include_path: bool,
    /// Return only the path that follows the skylink.
    pub only_path: bool,
}

fn direct_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-zA-Z0-9_-]{46})$").expect("valid regex"))
}

fn pathname_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/?([a-zA-Z0-9_-]{46})((/.+)?)$").expect("valid regex"))
}

fn subdomain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-z0-9_-]{55})(\..*)?$").expect("valid regex"))
}

/// Extract a skylink from a bare string, a `sia:` URI or a URL.
///
/// Returns `Ok(None)` when the input simply holds no skylink. Only
/// contradictory options are an error.
pub fn parse_skylink(
    input: &str,
    opts: &ParseSkylinkOptions,
) -> std::result::Result<Option<String>, ValidationError> {
    if opts.include_path && opts.only_path {
        return Err(ValidationError::InvalidOptions(
            "include_path and only_path cannot both be set".into(),
        ));
    }
    if opts.from_subdomain && (opts.include_path || opts.only_path) {
        return Err(ValidationError::InvalidOptions(
            "from_subdomain cannot be combined with include_path or only_path".into(),
        ));
    }

    let input = trim_uri_prefix(input, URI_SKYNET_PREFIX);

    if opts.from_subdomain {
        let Some(url) = parse_url(input) else {
            return Ok(None);
        };
        let host = url.host_str().unwrap_or_default();
        let Some(caps) = subdomain_regex().captures(host) else {
            return Ok(None);
        };
        return convert_skylink_to_base64(&caps[1])
            .map(Some)
            .map_err(|e| ValidationError::InvalidSkylink(e.to_string()));
    }

    if let Some(caps) = direct_regex().captures(input) {
        if opts.only_path {
            return Ok(Some(String::new()));
        }
        return Ok(Some(caps[1].to_string()));
    }

    let Some(url) = parse_url(input) else {
        return Ok(None);
    };
    let skylink_and_path = url.path().trim_end_matches('/');
    let Some(caps) = pathname_regex().captures(skylink_and_path) else {
        return Ok(None);
    };

    if opts.include_path {
        Ok(Some(skylink_and_path.trim_matches('/').to_string()))
    } else if opts.only_path {
        Ok(Some(caps[2].to_string()))
    } else {
        Ok(Some(caps[1].to_string()))
    }
}

fn parse_url(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(DEFAULT_PARSE_BASE_URL).ok()?;
            let relative = if input.starts_with('/') {
                input.to_string()
            } else {
                format!("/{input}")
            };
            base.join(&relative).ok()
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const SKYLINK: &str = "XABvi7JtJbQSMAcDwnUnmp2FKDPjg8_tTTFP4BwMSxVdEg";
    const SKYLINK_BASE32: &str = "bg06v2tidkir84hg0s1s4t97jaeoaa1jse1svrad657u070c9calq4g";

    fn opts(from_subdomain: bool, include_path: bool, only_path: bool) -> ParseSkylinkOptions {
        ParseSkylinkOptions {
            from_subdomain,
            include_path,
            only_path,
        }
    }

    #[test]
    fn test_known_skylink_is_v1() {
        let skylink: Skylink = SKYLINK.parse().unwrap();
        assert_eq!(skylink.bitfield(), 0x005c);
        assert_eq!(skylink.version(), 1);
        assert_eq!(skylink.offset_and_fetch_size().unwrap(), (0, 65536));
        assert_eq!(skylink.to_base64(), SKYLINK);
        assert_eq!(skylink.to_base32(), SKYLINK_BASE32);
    }

    #[test]
    fn test_new_v1_picks_smallest_mode() {
        let known: Skylink = SKYLINK.parse().unwrap();
        let rebuilt = Skylink::new_v1(&known.merkle_root(), 0, 65536).unwrap();

        // Same span as the known link, encoded in mode 1 instead of mode 3.
        assert_eq!(rebuilt.bitfield(), 0x0074);
        assert_eq!(
            rebuilt.offset_and_fetch_size().unwrap(),
            known.offset_and_fetch_size().unwrap()
        );
        assert_eq!(rebuilt.merkle_root(), known.merkle_root());
    }

    #[test]
    fn test_new_v1_rounds_fetch_size_up() {
        let root = Blake2bHash::hash(b"sector");
        let skylink = Skylink::new_v1(&root, 0, 100).unwrap();
        assert_eq!(skylink.offset_and_fetch_size().unwrap(), (0, 4096));

        let skylink = Skylink::new_v1(&root, 8192, 5000).unwrap();
        assert_eq!(skylink.offset_and_fetch_size().unwrap(), (8192, 8192));
    }

    #[test]
    fn test_new_v1_rejects_out_of_range() {
        let root = Blake2bHash::hash(b"sector");
        assert!(Skylink::new_v1(&root, 0, 0).is_err());
        assert!(Skylink::new_v1(&root, 0, MAX_V1_FETCH_SIZE + 1).is_err());
        assert!(Skylink::new_v1(&root, 4096, MAX_V1_FETCH_SIZE).is_err());
        assert!(Skylink::new_v1(&root, 100, 4096).is_err());
    }

    #[test]
    fn test_new_v2_layout() {
        let keypair = Keypair::from_seed(&[7u8; 32]);
        let tweak = Blake2bHash::hash(b"tweak");
        let skylink = Skylink::new_v2(&keypair.public_key(), &tweak);

        assert_eq!(skylink.version(), 2);
        assert_eq!(skylink.bitfield(), 1);
        assert_eq!(
            skylink.merkle_root(),
            derive_registry_entry_id(&keypair.public_key(), &tweak)
        );
        assert!(skylink.offset_and_fetch_size().is_err());
        assert_eq!(Skylink::from_bytes(skylink.as_bytes()).unwrap(), skylink);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert!(Skylink::from_bytes(&[0u8; 33]).is_err());
        assert!(Skylink::from_bytes(&[0u8; 35]).is_err());
        assert!(Skylink::from_base64("AAAA").is_err());
    }

    #[test]
    fn test_from_bytes_rejects_unknown_version() {
        let mut raw = [0u8; RAW_SKYLINK_SIZE];
        raw[0] = 0b10;
        assert!(Skylink::from_bytes(&raw).is_err());

        // v2 with stray bitfield bits.
        raw[0] = 0b101;
        assert!(Skylink::from_bytes(&raw).is_err());
    }

    #[test]
    fn test_zero_skylink_decodes() {
        let zero = Skylink::from_bytes(&[0u8; RAW_SKYLINK_SIZE]).unwrap();
        assert!(zero.is_zero());
        assert!(zero.is_v1());
    }

    #[test]
    fn test_format_skylink() {
        assert_eq!(format_skylink(SKYLINK), format!("sia:{SKYLINK}"));
        assert_eq!(format_skylink(&format!("sia:{SKYLINK}")), format!("sia:{SKYLINK}"));
        assert_eq!(format_skylink(&format!("sia://{SKYLINK}")), format!("sia:{SKYLINK}"));
        assert_eq!(format_skylink(""), "");
    }

    #[test]
    fn test_decode_skylink_forms() {
        let bare = decode_skylink(SKYLINK).unwrap();
        assert_eq!(decode_skylink(&format!("sia:{SKYLINK}")).unwrap(), bare);
        assert_eq!(decode_skylink(&format!("sia://{SKYLINK}")).unwrap(), bare);
        assert_eq!(decode_skylink(SKYLINK_BASE32).unwrap(), bare);
    }

    #[test]
    fn test_convert_between_alphabets() {
        assert_eq!(convert_skylink_to_base32(SKYLINK).unwrap(), SKYLINK_BASE32);
        assert_eq!(convert_skylink_to_base64(SKYLINK_BASE32).unwrap(), SKYLINK);
    }

    #[test]
    fn test_serde_as_string() {
        let skylink: Skylink = SKYLINK.parse().unwrap();
        let json = serde_json::to_string(&skylink).unwrap();
        assert_eq!(json, format!("\"{SKYLINK}\""));
        let back: Skylink = serde_json::from_str(&json).unwrap();
        assert_eq!(back, skylink);
    }

    #[test]
    fn test_parse_skylink_direct() {
        let default = ParseSkylinkOptions::default();
        assert_eq!(parse_skylink(SKYLINK, &default).unwrap(), Some(SKYLINK.into()));
        assert_eq!(
            parse_skylink(&format!("sia:{SKYLINK}"), &default).unwrap(),
            Some(SKYLINK.into())
        );
        assert_eq!(
            parse_skylink(&format!("sia://{SKYLINK}"), &default).unwrap(),
            Some(SKYLINK.into())
        );
        assert_eq!(
            parse_skylink(SKYLINK, &opts(false, false, true)).unwrap(),
            Some(String::new())
        );
    }

    #[test]
    fn test_parse_skylink_from_url_path() {
        let url = format!("https://siasky.net/{SKYLINK}/foo/bar?x=1#frag");
        assert_eq!(
            parse_skylink(&url, &ParseSkylinkOptions::default()).unwrap(),
            Some(SKYLINK.into())
        );
        assert_eq!(
            parse_skylink(&url, &opts(false, true, false)).unwrap(),
            Some(format!("{SKYLINK}/foo/bar"))
        );
        assert_eq!(
            parse_skylink(&url, &opts(false, false, true)).unwrap(),
            Some("/foo/bar".into())
        );
    }

    #[test]
    fn test_parse_skylink_relative_path() {
        let input = format!("/{SKYLINK}/index.html");
        assert_eq!(
            parse_skylink(&input, &ParseSkylinkOptions::default()).unwrap(),
            Some(SKYLINK.into())
        );
        assert_eq!(
            parse_skylink(&format!("{SKYLINK}/"), &opts(false, false, true)).unwrap(),
            Some(String::new())
        );
    }

    #[test]
    fn test_parse_skylink_from_subdomain() {
        let url = format!("https://{SKYLINK_BASE32}.siasky.net/path");
        assert_eq!(
            parse_skylink(&url, &opts(true, false, false)).unwrap(),
            Some(SKYLINK.into())
        );
        // Without the option the host is ignored.
        assert_eq!(parse_skylink(&url, &ParseSkylinkOptions::default()).unwrap(), None);
    }

    #[test]
    fn test_parse_skylink_no_match() {
        let default = ParseSkylinkOptions::default();
        assert_eq!(parse_skylink("https://siasky.net/", &default).unwrap(), None);
        assert_eq!(parse_skylink("hello", &default).unwrap(), None);
        assert_eq!(parse_skylink("", &default).unwrap(), None);
        assert_eq!(
            parse_skylink("https://siasky.net/", &opts(true, false, false)).unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_skylink_conflicting_options() {
        assert!(parse_skylink(SKYLINK, &opts(false, true, true)).is_err());
        assert!(parse_skylink(SKYLINK, &opts(true, true, false)).is_err());
        assert!(parse_skylink(SKYLINK, &opts(true, false, true)).is_err());
    }

    proptest! {
        #[test]
        fn prop_v2_roundtrip_through_all_forms(seed in any::<[u8; 32]>(), tweak in any::<[u8; 32]>()) {
            let keypair = Keypair::from_seed(&seed);
            let skylink = Skylink::new_v2(&keypair.public_key(), &Blake2bHash(tweak));

            let formatted = format_skylink(&encode_base64_url(skylink.as_bytes()));
            prop_assert_eq!(decode_skylink(&formatted).unwrap(), skylink);
            prop_assert_eq!(Skylink::from_base32(&skylink.to_base32()).unwrap(), skylink);
        }

        #[test]
        fn prop_v1_roundtrip(root in any::<[u8; 32]>(), units in 1u64..=8, mode in 0u32..=7) {
            let fetch = units * (V1_MIN_ALIGN << mode);
            let skylink = Skylink::new_v1(&Blake2bHash(root), 0, fetch).unwrap();
            let (offset, size) = skylink.offset_and_fetch_size().unwrap();
            prop_assert_eq!(offset, 0);
            prop_assert!(size >= fetch);

            let encoded = skylink.to_base64();
            prop_assert_eq!(encoded.len(), BASE64_ENCODED_SKYLINK_SIZE);
            prop_assert_eq!(Skylink::from_base64(&encoded).unwrap(), skylink);
        }

        #[test]
        fn prop_wrong_length_rejected(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assume!(bytes.len() != RAW_SKYLINK_SIZE);
            prop_assert!(Skylink::from_bytes(&bytes).is_err());
        }
    }
}
