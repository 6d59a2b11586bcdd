use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

/// Shared content-block schema, including variants the editor cannot author.
pub const CONTENT_BLOCKS_SCHEMA: &str =
    include_str!("../../../schemas/content-blocks.schema.json");

static CONTENT_BLOCKS_VALIDATOR: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let schema_json: Value = serde_json::from_str(CONTENT_BLOCKS_SCHEMA)
        .map_err(|e| format!("invalid content-blocks schema JSON: {e}"))?;

    Validator::new(&schema_json).map_err(|e| format!("compile content-blocks schema: {e}"))
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The bundled schema itself failed to load.
    #[error("schema unavailable: {0}")]
    Unavailable(String),
    #[error("{} schema violation(s): {}", .0.len(), .0.join("; "))]
    Violations(Vec<String>),
}

/// Check a persisted block array against the shared schema.
///
/// Independent of the deserializer: a payload can be schema-valid and still
/// contain variants the editor refuses to open.
pub fn validate_persisted(instance: &Value) -> Result<(), SchemaError> {
    let validator = CONTENT_BLOCKS_VALIDATOR
        .as_ref()
        .map_err(|e| SchemaError::Unavailable(e.clone()))?;

    let violations: Vec<String> = validator.iter_errors(instance).map(|e| e.to_string()).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = violations.len(), "persisted payload failed schema validation");
        Err(SchemaError::Violations(violations))
    }
}
