use blockdoc_core::{Block, BlockAttrs, BlockId, BlockType, EditorState, InlineContent};

use crate::apply::apply_mutation;
use crate::schema::{BlockUpdate, Mutation};

/// Method-style access to the mutation engine.
///
/// Every method is pure: it returns the next state and leaves `self`
/// untouched. Invalid input yields an unchanged copy.
pub trait EditorOps {
    fn set_active_block(&self, block_id: Option<BlockId>) -> EditorState;
    fn focus_block(&self, block_id: &BlockId) -> EditorState;
    fn update_block_content(&self, block_id: &BlockId, content: Vec<InlineContent>) -> EditorState;
    fn update_block(&self, block_id: &BlockId, update: BlockUpdate) -> EditorState;
    fn insert_block_after(&self, block_id: &BlockId, block: Option<Block>) -> EditorState;
    fn insert_block_before(&self, block_id: &BlockId, block: Option<Block>) -> EditorState;
    fn delete_block(&self, block_id: &BlockId) -> EditorState;
    fn merge_with_previous(&self, block_id: &BlockId) -> EditorState;
    fn convert_block_type(
        &self,
        block_id: &BlockId,
        new_type: BlockType,
        attrs: Option<BlockAttrs>,
    ) -> EditorState;
    fn move_block_up(&self, block_id: &BlockId) -> EditorState;
    fn move_block_down(&self, block_id: &BlockId) -> EditorState;
    fn focus_previous_block(&self, block_id: &BlockId) -> EditorState;
    fn focus_next_block(&self, block_id: &BlockId) -> EditorState;
    fn set_blocks(&self, blocks: Vec<Block>) -> EditorState;
}

impl EditorOps for EditorState {
    fn set_active_block(&self, block_id: Option<BlockId>) -> EditorState {
        apply_mutation(self, &Mutation::SetActiveBlock { block_id })
    }

    fn focus_block(&self, block_id: &BlockId) -> EditorState {
        apply_mutation(self, &Mutation::FocusBlock { block_id: block_id.clone() })
    }

    fn update_block_content(&self, block_id: &BlockId, content: Vec<InlineContent>) -> EditorState {
        apply_mutation(
            self,
            &Mutation::UpdateBlockContent {
                block_id: block_id.clone(),
                content,
            },
        )
    }

    fn update_block(&self, block_id: &BlockId, update: BlockUpdate) -> EditorState {
        apply_mutation(
            self,
            &Mutation::UpdateBlock {
                block_id: block_id.clone(),
                update,
            },
        )
    }

    fn insert_block_after(&self, block_id: &BlockId, block: Option<Block>) -> EditorState {
        apply_mutation(
            self,
            &Mutation::InsertBlockAfter {
                block_id: block_id.clone(),
                block,
            },
        )
    }

    fn insert_block_before(&self, block_id: &BlockId, block: Option<Block>) -> EditorState {
        apply_mutation(
            self,
            &Mutation::InsertBlockBefore {
                block_id: block_id.clone(),
                block,
            },
        )
    }

    fn delete_block(&self, block_id: &BlockId) -> EditorState {
        apply_mutation(self, &Mutation::DeleteBlock { block_id: block_id.clone() })
    }

    fn merge_with_previous(&self, block_id: &BlockId) -> EditorState {
        apply_mutation(self, &Mutation::MergeWithPrevious { block_id: block_id.clone() })
    }

    fn convert_block_type(
        &self,
        block_id: &BlockId,
        new_type: BlockType,
        attrs: Option<BlockAttrs>,
    ) -> EditorState {
        apply_mutation(
            self,
            &Mutation::ConvertBlockType {
                block_id: block_id.clone(),
                new_type,
                attrs,
            },
        )
    }

    fn move_block_up(&self, block_id: &BlockId) -> EditorState {
        apply_mutation(self, &Mutation::MoveBlockUp { block_id: block_id.clone() })
    }

    fn move_block_down(&self, block_id: &BlockId) -> EditorState {
        apply_mutation(self, &Mutation::MoveBlockDown { block_id: block_id.clone() })
    }

    fn focus_previous_block(&self, block_id: &BlockId) -> EditorState {
        apply_mutation(self, &Mutation::FocusPreviousBlock { block_id: block_id.clone() })
    }

    fn focus_next_block(&self, block_id: &BlockId) -> EditorState {
        apply_mutation(self, &Mutation::FocusNextBlock { block_id: block_id.clone() })
    }

    fn set_blocks(&self, blocks: Vec<Block>) -> EditorState {
        apply_mutation(self, &Mutation::SetBlocks { blocks })
    }
}
