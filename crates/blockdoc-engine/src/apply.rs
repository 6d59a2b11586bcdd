use std::collections::HashSet;

use blockdoc_core::{Block, BlockId, BlockKind, EditorState, IdSource, InlineContent, UuidIds};

use crate::diagnostics::{MutationError, MutationErrorCode};
use crate::options::{MutationOptions, MutationPolicy};
use crate::schema::{BlockUpdate, Mutation};

/// Apply a mutation with the silent no-op contract and random ids.
///
/// Invalid input (unknown id, boundary, mismatched attrs) returns an
/// unchanged copy of `state`.
pub fn apply_mutation(state: &EditorState, mutation: &Mutation) -> EditorState {
    apply_mutation_with(state, mutation, &mut UuidIds)
}

/// Silent contract with a caller-provided id source.
pub fn apply_mutation_with(
    state: &EditorState,
    mutation: &Mutation,
    ids: &mut dyn IdSource,
) -> EditorState {
    match try_apply_mutation(state, mutation, ids) {
        Ok(next) => next,
        Err(err) => {
            tracing::debug!(
                op = mutation.name(),
                code = err.code.as_str(),
                "mutation ignored: {}",
                err.message
            );
            state.clone()
        }
    }
}

/// Apply a mutation under the configured policy.
pub fn apply_mutation_with_options(
    state: &EditorState,
    mutation: &Mutation,
    opts: MutationOptions,
    ids: &mut dyn IdSource,
) -> Result<EditorState, MutationError> {
    match opts.policy {
        MutationPolicy::Strict => try_apply_mutation(state, mutation, ids),
        MutationPolicy::Silent => Ok(apply_mutation_with(state, mutation, ids)),
    }
}

/// Apply mutations in order. Under `Strict` the first rejection aborts the
/// whole sequence and nothing is returned.
pub fn apply_mutations(
    state: &EditorState,
    mutations: &[Mutation],
    opts: MutationOptions,
    ids: &mut dyn IdSource,
) -> Result<EditorState, MutationError> {
    let mut current = state.clone();
    for m in mutations {
        current = apply_mutation_with_options(&current, m, opts, ids)?;
    }
    Ok(current)
}

/// Strict core: every invalid input is an error.
pub fn try_apply_mutation(
    state: &EditorState,
    mutation: &Mutation,
    ids: &mut dyn IdSource,
) -> Result<EditorState, MutationError> {
    let op = mutation.name();
    let (mut blocks, active) = state.clone().into_parts();

    match mutation {
        Mutation::SetActiveBlock { block_id } => {
            Ok(EditorState::from_parts(blocks, block_id.clone()))
        }

        Mutation::FocusBlock { block_id } => {
            require(&blocks, op, block_id)?;
            Ok(EditorState::from_parts(blocks, Some(block_id.clone())))
        }

        Mutation::UpdateBlockContent { block_id, content } => {
            let idx = require(&blocks, op, block_id)?;
            if !blocks[idx].block_type().has_inline_content() {
                return Err(no_inline_content(op, &blocks[idx]));
            }
            if let Some(target) = blocks[idx].kind.content_mut() {
                *target = content.clone();
            }
            Ok(EditorState::from_parts(blocks, active))
        }

        Mutation::UpdateBlock { block_id, update } => {
            let idx = require(&blocks, op, block_id)?;
            blocks[idx] = updated_block(op, &blocks[idx], update)?;
            Ok(EditorState::from_parts(blocks, active))
        }

        Mutation::InsertBlockAfter { block_id, block } => {
            let idx = require(&blocks, op, block_id)?;
            insert_at(op, blocks, idx + 1, block.as_ref(), ids)
        }

        Mutation::InsertBlockBefore { block_id, block } => {
            let idx = require(&blocks, op, block_id)?;
            insert_at(op, blocks, idx, block.as_ref(), ids)
        }

        Mutation::DeleteBlock { block_id } => {
            let idx = require(&blocks, op, block_id)?;

            if blocks.len() <= 1 {
                let fresh = Block::empty_paragraph(fresh_id(&[], ids));
                let fresh_id = fresh.id.clone();
                return Ok(EditorState::from_parts(vec![fresh], Some(fresh_id)));
            }

            blocks.remove(idx);
            let next_active = blocks[idx.saturating_sub(1)].id.clone();
            Ok(EditorState::from_parts(blocks, Some(next_active)))
        }

        Mutation::MergeWithPrevious { block_id } => {
            let idx = require(&blocks, op, block_id)?;
            if idx == 0 {
                return Err(MutationError::new(
                    MutationErrorCode::AtBoundary,
                    op,
                    Some(block_id),
                    "first block has no predecessor to merge into",
                ));
            }

            let current_type = blocks[idx].block_type();
            let previous_type = blocks[idx - 1].block_type();
            if !current_type.is_flow_text() || !previous_type.is_flow_text() {
                return Err(MutationError::new(
                    MutationErrorCode::NotMergeable,
                    op,
                    Some(block_id),
                    format!("cannot merge {current_type} into {previous_type}"),
                ));
            }

            let current = blocks.remove(idx);
            let moved = current.kind.content().map(<[InlineContent]>::to_vec).unwrap_or_default();
            let previous = &mut blocks[idx - 1];
            if let Some(content) = previous.kind.content_mut() {
                content.extend(moved);
            }
            let previous_id = previous.id.clone();
            Ok(EditorState::from_parts(blocks, Some(previous_id)))
        }

        Mutation::ConvertBlockType {
            block_id,
            new_type,
            attrs,
        } => {
            let idx = require(&blocks, op, block_id)?;
            let source = &blocks[idx].kind;

            // Relabel only: keep compatible attrs, never translate between variants.
            let attrs = attrs
                .clone()
                .or_else(|| source.attrs().filter(|a| a.fits(*new_type)));
            let content = source
                .content()
                .map(<[InlineContent]>::to_vec)
                .unwrap_or_else(|| vec![InlineContent::default()]);

            let kind = BlockKind::from_parts(*new_type, content, attrs).ok_or_else(|| {
                MutationError::new(
                    MutationErrorCode::AttrsMismatch,
                    op,
                    Some(block_id),
                    format!("attrs do not fit block type {new_type}"),
                )
            })?;
            blocks[idx].kind = kind;
            Ok(EditorState::from_parts(blocks, active))
        }

        Mutation::MoveBlockUp { block_id } => {
            let idx = require(&blocks, op, block_id)?;
            if idx == 0 {
                return Err(at_boundary(op, block_id, "first block cannot move up"));
            }
            blocks.swap(idx - 1, idx);
            Ok(EditorState::from_parts(blocks, active))
        }

        Mutation::MoveBlockDown { block_id } => {
            let idx = require(&blocks, op, block_id)?;
            if idx + 1 >= blocks.len() {
                return Err(at_boundary(op, block_id, "last block cannot move down"));
            }
            blocks.swap(idx, idx + 1);
            Ok(EditorState::from_parts(blocks, active))
        }

        Mutation::FocusPreviousBlock { block_id } => {
            let idx = require(&blocks, op, block_id)?;
            if idx == 0 {
                return Err(at_boundary(op, block_id, "no block before the first block"));
            }
            let target = blocks[idx - 1].id.clone();
            Ok(EditorState::from_parts(blocks, Some(target)))
        }

        Mutation::FocusNextBlock { block_id } => {
            let idx = require(&blocks, op, block_id)?;
            if idx + 1 >= blocks.len() {
                return Err(at_boundary(op, block_id, "no block after the last block"));
            }
            let target = blocks[idx + 1].id.clone();
            Ok(EditorState::from_parts(blocks, Some(target)))
        }

        Mutation::SetBlocks { blocks: replacement } => {
            let mut seen = HashSet::with_capacity(replacement.len());
            if let Some(dup) = replacement.iter().find(|b| !seen.insert(&b.id)) {
                return Err(MutationError::new(
                    MutationErrorCode::DuplicateBlockId,
                    op,
                    Some(&dup.id),
                    format!("duplicate block_id '{}'", dup.id),
                ));
            }

            let next = EditorState::from_blocks(replacement.clone(), ids);
            let (next_blocks, _) = next.into_parts();
            // Keep focus only if it still points at a block.
            let active = active.filter(|id| find_index(&next_blocks, id).is_some());
            Ok(EditorState::from_parts(next_blocks, active))
        }
    }
}

fn find_index(blocks: &[Block], id: &BlockId) -> Option<usize> {
    blocks.iter().position(|b| &b.id == id)
}

/// Index of `id`, or `UnknownBlockId`.
fn require(blocks: &[Block], op: &str, id: &BlockId) -> Result<usize, MutationError> {
    find_index(blocks, id).ok_or_else(|| MutationError::unknown(op, id))
}

/// Next id from `ids` that is not already used in `blocks`.
fn fresh_id(blocks: &[Block], ids: &mut dyn IdSource) -> BlockId {
    loop {
        let candidate = ids.next_id();
        if find_index(blocks, &candidate).is_none() {
            return candidate;
        }
    }
}

fn insert_at(
    op: &str,
    mut blocks: Vec<Block>,
    at: usize,
    supplied: Option<&Block>,
    ids: &mut dyn IdSource,
) -> Result<EditorState, MutationError> {
    let block = match supplied {
        Some(b) => {
            if find_index(&blocks, &b.id).is_some() {
                return Err(MutationError::new(
                    MutationErrorCode::DuplicateBlockId,
                    op,
                    Some(&b.id),
                    format!("block_id '{}' already exists", b.id),
                ));
            }
            b.clone()
        }
        None => Block::empty_paragraph(fresh_id(&blocks, ids)),
    };

    let new_id = block.id.clone();
    blocks.insert(at, block);
    Ok(EditorState::from_parts(blocks, Some(new_id)))
}

fn updated_block(op: &str, block: &Block, update: &BlockUpdate) -> Result<Block, MutationError> {
    let mut next = block.clone();

    if let Some(content) = &update.content {
        let target = next
            .kind
            .content_mut()
            .ok_or_else(|| no_inline_content(op, block))?;
        *target = content.clone();
    }

    let attrs_fit = match &update.attrs {
        Some(attrs) => next.kind.set_attrs(attrs.clone()),
        None => true,
    };
    if !attrs_fit {
        return Err(MutationError::new(
            MutationErrorCode::AttrsMismatch,
            op,
            Some(&block.id),
            format!("attrs do not fit block type {}", block.block_type()),
        ));
    }

    Ok(next)
}

fn no_inline_content(op: &str, block: &Block) -> MutationError {
    MutationError::new(
        MutationErrorCode::ContentNotSupported,
        op,
        Some(&block.id),
        format!("{} blocks have no inline content", block.block_type()),
    )
}

fn at_boundary(op: &str, block_id: &BlockId, message: &str) -> MutationError {
    MutationError::new(MutationErrorCode::AtBoundary, op, Some(block_id), message)
}
