use blockdoc_core::hash::{canonicalize_text, text_hash};
use blockdoc_core::{
    Block, BlockId, BlockKind, CodeAttrs, EditorState, IdSource, InlineContent, ListAttrs, Mark,
    SequentialIds,
};
use proptest::prelude::*;

fn sample_blocks(ids: &mut dyn IdSource) -> Vec<Block> {
    vec![
        Block::heading(ids.next_id(), 1, "Release notes"),
        Block::new(
            ids.next_id(),
            BlockKind::Paragraph {
                content: vec![
                    InlineContent::plain("This release is "),
                    InlineContent::with_marks("mostly", vec![Mark::Bold]),
                ],
            },
        ),
        Block::new(
            ids.next_id(),
            BlockKind::Code {
                attrs: CodeAttrs {
                    content: Some("fn main() {}\r\n".to_string()),
                    language: Some("rust".to_string()),
                    filename: None,
                },
            },
        ),
        Block::new(
            ids.next_id(),
            BlockKind::BulletList { attrs: ListAttrs::with_items(["one", "two"]) },
        ),
    ]
}

#[test]
fn text_hashes_ignore_block_ids() {
    let a = sample_blocks(&mut SequentialIds::new("a"));
    let b = sample_blocks(&mut SequentialIds::new("z"));

    for (x, y) in a.iter().zip(b.iter()) {
        assert_ne!(x.id, y.id);
        assert_eq!(text_hash(x), text_hash(y));
    }
}

#[test]
fn marks_do_not_change_text_hash() {
    let marked = &sample_blocks(&mut SequentialIds::default())[1];
    let plain = Block::paragraph(BlockId::new("p"), "This release is mostly");
    assert_eq!(text_hash(marked), text_hash(&plain));
}

#[test]
fn editor_state_json_round_trips() {
    let mut ids = SequentialIds::default();
    let blocks = sample_blocks(&mut ids);
    let focus = blocks[2].id.clone();
    let state = EditorState::from_parts(blocks, Some(focus));

    let json = serde_json::to_string(&state).unwrap();
    let back: EditorState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.active_block_id().map(BlockId::as_str), Some("b3"));
}

#[test]
fn empty_block_list_becomes_one_paragraph() {
    let state = EditorState::from_blocks(Vec::new(), &mut SequentialIds::new("n"));
    assert_eq!(state.len(), 1);
    assert_eq!(state.blocks()[0].id, "n1");
    assert_eq!(state.blocks()[0].plain_text(), "");
    assert_eq!(state.active_block_id(), None);
}

proptest! {
    #[test]
    fn canonicalize_is_idempotent(s in "[a-z \t\r\n]{0,64}") {
        let once = canonicalize_text(&s);
        prop_assert_eq!(canonicalize_text(&once), once.clone());
        prop_assert!(!once.contains('\r'));
    }

    #[test]
    fn sequential_ids_never_repeat(n in 1usize..200) {
        let mut ids = SequentialIds::new("b");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..n {
            prop_assert!(seen.insert(ids.next_id()));
        }
    }
}
