//! SHA-256 fingerprints over canonical JSON.

use serde::Serialize;

use crate::canonical_json::to_canonical_json_bytes;

/// Return lowercase hex SHA-256 of bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Hash canonical JSON bytes using SHA-256 and return lowercase hex.
pub fn sha256_canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

/// Fingerprint of a persisted payload, `sha256:<hex>`.
///
/// Two payloads with the same fingerprint serialize to identical canonical
/// bytes; block ids never enter the persisted form.
pub fn content_fingerprint(persisted: &impl Serialize) -> Result<String, serde_json::Error> {
    Ok(format!("sha256:{}", sha256_canonical_json(persisted)?))
}
