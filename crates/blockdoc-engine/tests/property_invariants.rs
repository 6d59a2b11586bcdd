use std::collections::HashSet;

use proptest::prelude::*;

use blockdoc_core::{Block, BlockId, BlockType, EditorState, InlineContent, SequentialIds};
use blockdoc_engine::{apply_mutation_with, Mutation};

/// A mutation chosen relative to whatever the state looks like when it runs.
#[derive(Debug, Clone)]
struct Step {
    op: u8,
    pick: usize,
    ty: usize,
    text: String,
}

fn step() -> impl Strategy<Value = Step> {
    (0u8..12, any::<usize>(), 0usize..BlockType::ALL.len(), "[a-z ]{0,6}")
        .prop_map(|(op, pick, ty, text)| Step { op, pick, ty, text })
}

fn to_mutation(state: &EditorState, s: &Step) -> Mutation {
    let blocks = state.blocks();
    // Occasionally aim at an id that does not exist.
    let block_id = if s.pick % 17 == 0 {
        BlockId::new("missing")
    } else {
        blocks[s.pick % blocks.len()].id.clone()
    };

    match s.op {
        0 => Mutation::InsertBlockAfter { block_id, block: None },
        1 => Mutation::InsertBlockBefore { block_id, block: None },
        2 => Mutation::DeleteBlock { block_id },
        3 => Mutation::MergeWithPrevious { block_id },
        4 => Mutation::ConvertBlockType {
            block_id,
            new_type: BlockType::ALL[s.ty],
            attrs: None,
        },
        5 => Mutation::MoveBlockUp { block_id },
        6 => Mutation::MoveBlockDown { block_id },
        7 => Mutation::FocusPreviousBlock { block_id },
        8 => Mutation::FocusNextBlock { block_id },
        9 => Mutation::UpdateBlockContent {
            block_id,
            content: vec![InlineContent::plain(s.text.clone())],
        },
        10 => Mutation::FocusBlock { block_id },
        _ => Mutation::SetBlocks { blocks: Vec::new() },
    }
}

fn assert_invariants(state: &EditorState) -> Result<(), TestCaseError> {
    prop_assert!(!state.is_empty(), "document must never be empty");

    let mut seen = HashSet::new();
    for b in state.blocks() {
        prop_assert!(seen.insert(b.id.clone()), "duplicate id {}", b.id);
        if !b.block_type().has_inline_content() {
            prop_assert!(b.kind.content().is_none());
        }
    }

    if let Some(active) = state.active_block_id() {
        prop_assert!(state.contains(active), "focus points at missing block {active}");
    }
    Ok(())
}

proptest! {
    #[test]
    fn structural_invariants_hold_for_any_edit_sequence(steps in prop::collection::vec(step(), 0..60)) {
        let mut ids = SequentialIds::new("g");
        let mut state = EditorState::from_parts(
            vec![Block::paragraph(BlockId::new("p0"), "seed")],
            None,
        );

        for s in &steps {
            let m = to_mutation(&state, s);
            state = apply_mutation_with(&state, &m, &mut ids);
            assert_invariants(&state)?;
        }
    }

    #[test]
    fn move_up_then_down_restores_order(n in 2usize..8, pick in 1usize..8) {
        prop_assume!(pick < n);
        let blocks: Vec<Block> = (0..n)
            .map(|i| Block::paragraph(BlockId::new(format!("b{i}")), i.to_string()))
            .collect();
        let state = EditorState::from_parts(blocks, None);
        let target = state.blocks()[pick].id.clone();

        let mut ids = SequentialIds::default();
        let up = apply_mutation_with(&state, &Mutation::MoveBlockUp { block_id: target.clone() }, &mut ids);
        let back = apply_mutation_with(&up, &Mutation::MoveBlockDown { block_id: target }, &mut ids);

        prop_assert_eq!(back.blocks(), state.blocks());
    }

    #[test]
    fn merge_preserves_total_text(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let state = EditorState::from_parts(
            vec![
                Block::heading(BlockId::new("h"), 2, a.clone()),
                Block::paragraph(BlockId::new("p"), b.clone()),
            ],
            None,
        );
        let merged = apply_mutation_with(
            &state,
            &Mutation::MergeWithPrevious { block_id: BlockId::new("p") },
            &mut SequentialIds::default(),
        );

        prop_assert_eq!(merged.len(), 1);
        prop_assert_eq!(merged.blocks()[0].plain_text(), format!("{a}{b}"));
    }
}
