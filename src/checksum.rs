//! Property set checksums.
//!
//! A checksum binds a property set to the release produced from it. It is the
//! standard Base64 encoding of the SHA-256 digest of the JCS (RFC 8785) form
//! of the descriptor sequence, so the value does not depend on how the
//! producer formatted its payload.

use artifactory_wire::{CodecError, PropertyDescriptor};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::coordinates::Coordinates;
use crate::error::{IntegrityError, Result};

/// Compute the checksum of a property sequence.
///
/// The sequence order is part of the checksum; callers pass descriptors in
/// canonical order.
pub fn compute(properties: &[PropertyDescriptor]) -> Result<String, CodecError> {
    let jcs_bytes = serde_json_canonicalizer::to_vec(&properties)
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(&jcs_bytes);
    Ok(STANDARD.encode(hasher.finalize()))
}

/// Recompute the checksum of `properties` and compare it with `expected`.
pub fn verify(
    coordinates: &Coordinates,
    expected: &str,
    properties: &[PropertyDescriptor],
) -> Result<()> {
    let actual = compute(properties)?;
    if actual != expected {
        tracing::warn!(
            artifact = %coordinates,
            expected,
            actual = %actual,
            "property set checksum mismatch"
        );
        return Err(IntegrityError::ChecksumMismatch {
            coordinates: coordinates.clone(),
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    Ok(())
}
