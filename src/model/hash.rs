//! Content hashing for model fingerprints.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of a serializable value.
///
/// The value is serialized to JSON before hashing. Struct fields serialize
/// in declaration order and model collections are kept sorted, so equal
/// models always hash equally. Returns a 64-character lowercase hex string.
///
/// # Errors
/// Returns an error if the value cannot be serialized to JSON.
pub fn compute_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
