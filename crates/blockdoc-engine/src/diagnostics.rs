use blockdoc_core::BlockId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable reasons a mutation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationErrorCode {
    /// The target id is not in the document.
    UnknownBlockId,
    /// Navigation or move past the first/last block.
    AtBoundary,
    /// Merge target or its predecessor is not paragraph/heading.
    NotMergeable,
    /// Supplied attrs are not the attrs record of the block's type.
    AttrsMismatch,
    /// Inline content supplied for a block that has none.
    ContentNotSupported,
    /// A supplied block reuses an id already in the document.
    DuplicateBlockId,
}

impl MutationErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            MutationErrorCode::UnknownBlockId => "unknown_block_id",
            MutationErrorCode::AtBoundary => "at_boundary",
            MutationErrorCode::NotMergeable => "not_mergeable",
            MutationErrorCode::AttrsMismatch => "attrs_mismatch",
            MutationErrorCode::ContentNotSupported => "content_not_supported",
            MutationErrorCode::DuplicateBlockId => "duplicate_block_id",
        }
    }
}

/// A rejected mutation. Only surfaced under `MutationPolicy::Strict`;
/// the default policy turns every rejection into an unchanged state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{op}: {message}")]
pub struct MutationError {
    pub code: MutationErrorCode,
    /// Operation name, e.g. `merge_with_previous`.
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    pub message: String,
}

impl MutationError {
    pub(crate) fn new(
        code: MutationErrorCode,
        op: &str,
        block_id: Option<&BlockId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            op: op.to_string(),
            block_id: block_id.cloned(),
            message: message.into(),
        }
    }

    pub(crate) fn unknown(op: &str, block_id: &BlockId) -> Self {
        Self::new(
            MutationErrorCode::UnknownBlockId,
            op,
            Some(block_id),
            format!("unknown block_id '{block_id}'"),
        )
    }
}
