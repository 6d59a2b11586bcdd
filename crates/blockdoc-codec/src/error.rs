use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecErrorCode {
    /// A field required by the block's type is absent.
    MissingField,
    /// A field is present with the wrong shape or an out-of-range value.
    InvalidField,
    /// The persisted type is valid content the editor cannot open.
    UnsupportedVariant,
    /// The persisted type tag is not recognized at all.
    UnknownVariant,
    /// The payload is not JSON, or not a block list.
    InvalidJson,
}

impl CodecErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            CodecErrorCode::MissingField => "missing_field",
            CodecErrorCode::InvalidField => "invalid_field",
            CodecErrorCode::UnsupportedVariant => "unsupported_variant",
            CodecErrorCode::UnknownVariant => "unknown_variant",
            CodecErrorCode::InvalidJson => "invalid_json",
        }
    }
}

/// First failure of a serialize or deserialize batch.
///
/// `path` addresses the offending value, e.g. `blocks[2].attrs.level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{path}: {message}")]
pub struct CodecError {
    pub code: CodecErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub path: String,
    pub message: String,
}

impl CodecError {
    pub(crate) fn at(
        code: CodecErrorCode,
        index: usize,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            index: Some(index),
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_json(message: impl Into<String>) -> Self {
        Self {
            code: CodecErrorCode::InvalidJson,
            index: None,
            path: "$".to_string(),
            message: message.into(),
        }
    }
}
