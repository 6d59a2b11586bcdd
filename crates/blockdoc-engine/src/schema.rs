use blockdoc_core::{Block, BlockAttrs, BlockId, BlockType, InlineContent};
use serde::{Deserialize, Serialize};

/// One editing operation against an `EditorState`.
///
/// Wire form is internally tagged by `op` (snake_case), e.g.
/// `{"op": "insert_block_after", "block_id": "b1"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Set the focus pointer. Not validated.
    SetActiveBlock {
        #[serde(default)]
        block_id: Option<BlockId>,
    },
    /// Focus a block that must exist.
    FocusBlock { block_id: BlockId },
    UpdateBlockContent {
        block_id: BlockId,
        content: Vec<InlineContent>,
    },
    UpdateBlock {
        block_id: BlockId,
        update: BlockUpdate,
    },
    InsertBlockAfter {
        block_id: BlockId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block: Option<Block>,
    },
    InsertBlockBefore {
        block_id: BlockId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block: Option<Block>,
    },
    DeleteBlock { block_id: BlockId },
    MergeWithPrevious { block_id: BlockId },
    ConvertBlockType {
        block_id: BlockId,
        new_type: BlockType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<BlockAttrs>,
    },
    MoveBlockUp { block_id: BlockId },
    MoveBlockDown { block_id: BlockId },
    FocusPreviousBlock { block_id: BlockId },
    FocusNextBlock { block_id: BlockId },
    SetBlocks { blocks: Vec<Block> },
}

impl Mutation {
    pub const fn name(&self) -> &'static str {
        match self {
            Mutation::SetActiveBlock { .. } => "set_active_block",
            Mutation::FocusBlock { .. } => "focus_block",
            Mutation::UpdateBlockContent { .. } => "update_block_content",
            Mutation::UpdateBlock { .. } => "update_block",
            Mutation::InsertBlockAfter { .. } => "insert_block_after",
            Mutation::InsertBlockBefore { .. } => "insert_block_before",
            Mutation::DeleteBlock { .. } => "delete_block",
            Mutation::MergeWithPrevious { .. } => "merge_with_previous",
            Mutation::ConvertBlockType { .. } => "convert_block_type",
            Mutation::MoveBlockUp { .. } => "move_block_up",
            Mutation::MoveBlockDown { .. } => "move_block_down",
            Mutation::FocusPreviousBlock { .. } => "focus_previous_block",
            Mutation::FocusNextBlock { .. } => "focus_next_block",
            Mutation::SetBlocks { .. } => "set_blocks",
        }
    }

    /// The block the operation targets, if any.
    pub fn block_id(&self) -> Option<&BlockId> {
        match self {
            Mutation::SetActiveBlock { block_id } => block_id.as_ref(),
            Mutation::SetBlocks { .. } => None,
            Mutation::FocusBlock { block_id }
            | Mutation::UpdateBlockContent { block_id, .. }
            | Mutation::UpdateBlock { block_id, .. }
            | Mutation::InsertBlockAfter { block_id, .. }
            | Mutation::InsertBlockBefore { block_id, .. }
            | Mutation::DeleteBlock { block_id }
            | Mutation::MergeWithPrevious { block_id }
            | Mutation::ConvertBlockType { block_id, .. }
            | Mutation::MoveBlockUp { block_id }
            | Mutation::MoveBlockDown { block_id }
            | Mutation::FocusPreviousBlock { block_id }
            | Mutation::FocusNextBlock { block_id } => Some(block_id),
        }
    }
}

/// Shallow update for `update_block`: each present field replaces the
/// block's field wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<InlineContent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<BlockAttrs>,
}

impl BlockUpdate {
    pub fn attrs(attrs: BlockAttrs) -> Self {
        Self {
            content: None,
            attrs: Some(attrs),
        }
    }
}

/// A sequence of mutations applied in order (the CLI `apply` input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    pub v: u8,
    pub ops: Vec<Mutation>,
}
