//! Registry entry validation: signature verification and structural checks.

use crate::crypto::{Ed25519PublicKey, Ed25519Signature};
use crate::entry::{RegistryEntry, SignedRegistryEntry, MAX_ENTRY_DATA_SIZE};
use crate::error::{CoreError, ValidationError};

/// Verify an entry's signature against the claimed owner.
pub fn verify_registry_entry(
    public_key: &Ed25519PublicKey,
    entry: &RegistryEntry,
    signature: &Ed25519Signature,
) -> Result<(), CoreError> {
    public_key.verify(entry.hash().as_bytes(), signature)
}

/// Verify a lookup result.
///
/// "Not found" (both halves absent) is valid. An entry without a signature,
/// or a signature without an entry, is treated the same as a bad signature.
pub fn verify_signed_entry(
    public_key: &Ed25519PublicKey,
    signed: &SignedRegistryEntry,
) -> Result<(), CoreError> {
    match (&signed.entry, &signed.signature) {
        (None, None) => Ok(()),
        (Some(entry), Some(signature)) => verify_registry_entry(public_key, entry, signature),
        _ => Err(CoreError::InvalidSignature),
    }
}

/// Validate entry structure without signature verification.
///
/// Catches caller mistakes before anything is signed or sent.
pub fn validate_entry_structure(entry: &RegistryEntry) -> Result<(), ValidationError> {
    if entry.data.len() > MAX_ENTRY_DATA_SIZE {
        return Err(ValidationError::EntryDataTooLarge {
            size: entry.data.len(),
            max: MAX_ENTRY_DATA_SIZE,
        });
    }
    Ok(())
}
