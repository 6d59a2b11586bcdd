//! Deterministic JSON canonicalization.
//!
//! Stable bytes for fingerprinting saved content:
//! - object keys are sorted lexicographically
//! - arrays preserve order
//! - output is minified JSON with no extra whitespace
//!
//! Floats (image dimensions) are written with serde_json's shortest
//! round-trip formatting, so equal values always produce equal bytes.

use serde::Serialize;
use serde_json::{Map, Value};

/// Convert a serializable value to canonical JSON bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let canon = canonicalize_value(serde_json::to_value(value)?);
    serde_json::to_vec(&canon)
}

/// Convert a serializable value to a canonical JSON string.
pub fn to_canonical_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let canon = canonicalize_value(serde_json::to_value(value)?);
    serde_json::to_string(&canon)
}

fn canonicalize_value(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k, canonicalize_value(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}
