use blockdoc_core::{Block, BlockAttrs, BlockKind, ListAttrs};
use blockdoc_engine::{BlockUpdate, Mutation};

use crate::keys::{Key, KeyInput, KeyOutcome};

fn list_attrs(block: &Block) -> Option<&ListAttrs> {
    match &block.kind {
        BlockKind::BulletList { attrs } | BlockKind::OrderedList { attrs } => Some(attrs),
        _ => None,
    }
}

/// Items as rendered: a list without items shows one empty item.
pub fn list_items(block: &Block) -> Vec<String> {
    list_attrs(block)
        .and_then(|a| a.items.clone())
        .unwrap_or_else(|| vec![String::new()])
}

fn with_items(block: &Block, items: Vec<String>) -> Option<Mutation> {
    let mut attrs = list_attrs(block)?.clone();
    attrs.items = Some(items);
    Some(Mutation::UpdateBlock {
        block_id: block.id.clone(),
        update: BlockUpdate::attrs(BlockAttrs::List(attrs)),
    })
}

pub fn edit_list_item(block: &Block, index: usize, value: &str) -> Option<Mutation> {
    let mut items = list_items(block);
    *items.get_mut(index)? = value.to_string();
    with_items(block, items)
}

pub fn add_list_item(block: &Block) -> Option<Mutation> {
    let mut items = list_items(block);
    items.push(String::new());
    with_items(block, items)
}

/// The last remaining item is never removed.
pub fn remove_list_item(block: &Block, index: usize) -> Option<Mutation> {
    let mut items = list_items(block);
    if items.len() <= 1 || index >= items.len() {
        return None;
    }
    items.remove(index);
    with_items(block, items)
}

/// Keyboard contract of a list item field.
///
/// Enter appends an empty item. Backspace in an empty item removes it unless
/// it is the only one; the key is swallowed either way.
pub fn handle_list_item_key(block: &Block, index: usize, input: &KeyInput) -> KeyOutcome {
    let items = list_items(block);
    match input.key {
        Key::Enter => KeyOutcome {
            prevent_default: true,
            mutation: add_list_item(block),
            caret: None,
        },
        Key::Backspace if items.get(index).is_some_and(String::is_empty) => KeyOutcome {
            prevent_default: true,
            mutation: remove_list_item(block, index),
            caret: None,
        },
        _ => KeyOutcome::pass(),
    }
}

#[cfg(test)]
mod tests {
    use blockdoc_core::BlockId;

    use super::*;

    fn bullets(items: &[&str]) -> Block {
        Block::new(
            BlockId::new("l1"),
            BlockKind::BulletList {
                attrs: ListAttrs::with_items(items.iter().copied()),
            },
        )
    }

    fn items_of(m: &Option<Mutation>) -> Option<Vec<String>> {
        match m {
            Some(Mutation::UpdateBlock { update, .. }) => match &update.attrs {
                Some(BlockAttrs::List(a)) => a.items.clone(),
                _ => None,
            },
            _ => None,
        }
    }

    #[test]
    fn enter_appends_empty_item() {
        let out = handle_list_item_key(&bullets(&["a", "b"]), 0, &Key::Enter.into());
        assert!(out.prevent_default);
        assert_eq!(items_of(&out.mutation), Some(vec!["a".into(), "b".into(), String::new()]));
    }

    #[test]
    fn backspace_removes_empty_item_but_not_the_last_one() {
        let out = handle_list_item_key(&bullets(&["a", ""]), 1, &Key::Backspace.into());
        assert_eq!(items_of(&out.mutation), Some(vec!["a".to_string()]));

        let out = handle_list_item_key(&bullets(&[""]), 0, &Key::Backspace.into());
        assert!(out.prevent_default);
        assert_eq!(out.mutation, None);

        let out = handle_list_item_key(&bullets(&["a", "b"]), 1, &Key::Backspace.into());
        assert_eq!(out, KeyOutcome::pass());
    }

    #[test]
    fn missing_items_render_as_one_empty_item() {
        let block = Block::new(
            BlockId::new("l2"),
            BlockKind::OrderedList {
                attrs: ListAttrs {
                    items: None,
                    start: Some(5),
                },
            },
        );
        assert_eq!(list_items(&block), vec![String::new()]);

        let m = edit_list_item(&block, 0, "first");
        assert_eq!(items_of(&m), Some(vec!["first".to_string()]));
        assert!(edit_list_item(&block, 3, "nope").is_none());
    }
}
