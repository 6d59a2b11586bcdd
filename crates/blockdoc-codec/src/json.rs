use serde_json::Value;

use crate::error::CodecError;
use crate::schema::PersistedBlock;

/// Parse a persisted payload into its block list.
///
/// Accepts a bare array, `null` (no content yet), or a content record
/// carrying the array under `blocks`.
pub fn parse_persisted_json(input: &str) -> Result<Vec<Value>, CodecError> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| CodecError::invalid_json(e.to_string()))?;
    persisted_blocks(value)
}

/// Pull the block list out of an already-parsed payload.
pub fn persisted_blocks(value: Value) -> Result<Vec<Value>, CodecError> {
    match value {
        Value::Array(blocks) => Ok(blocks),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut record) => match record.remove("blocks") {
            Some(Value::Array(blocks)) => Ok(blocks),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => Err(CodecError::invalid_json("`blocks` must be an array")),
        },
        _ => Err(CodecError::invalid_json("expected a block array")),
    }
}

/// Serialize as minified JSON (no whitespace).
pub fn to_minified_json(blocks: &[PersistedBlock]) -> Result<String, serde_json::Error> {
    serde_json::to_string(blocks)
}

/// Serialize as pretty JSON (for debugging).
pub fn to_pretty_json(blocks: &[PersistedBlock]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(blocks)
}
