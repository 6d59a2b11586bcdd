use blockdoc_core::{Block, BlockAttrs, BlockKind, CodeAttrs};
use blockdoc_engine::{BlockUpdate, Mutation};

use crate::keys::{Key, KeyInput, KeyOutcome};
use crate::selection::{byte_offset, SelectionRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeField {
    Content,
    Language,
    Filename,
}

/// Language choices offered by the code block picker.
pub const CODE_LANGUAGES: [(&str, &str); 4] = [
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("python", "Python"),
    ("text", "Plain Text"),
];

fn code_attrs(block: &Block) -> Option<&CodeAttrs> {
    match &block.kind {
        BlockKind::Code { attrs } => Some(attrs),
        _ => None,
    }
}

fn replace_attrs(block: &Block, attrs: CodeAttrs) -> Mutation {
    Mutation::UpdateBlock {
        block_id: block.id.clone(),
        update: BlockUpdate::attrs(BlockAttrs::Code(attrs)),
    }
}

/// An edit of one form field, sent as a full attrs replacement.
/// Returns `None` for non-code blocks.
pub fn edit_code_field(block: &Block, field: CodeField, value: &str) -> Option<Mutation> {
    let mut attrs = code_attrs(block)?.clone();
    let slot = match field {
        CodeField::Content => &mut attrs.content,
        CodeField::Language => &mut attrs.language,
        CodeField::Filename => &mut attrs.filename,
    };
    *slot = Some(value.to_string());
    Some(replace_attrs(block, attrs))
}

/// Keyboard contract of the code textarea.
///
/// Tab replaces the selection with a tab character and puts the caret after
/// it. ArrowUp on the first char and ArrowDown past the last char leave the
/// block. Enter and Backspace behave as plain textarea keys.
pub fn handle_code_block_key(block: &Block, input: &KeyInput, textarea: SelectionRange) -> KeyOutcome {
    let Some(attrs) = code_attrs(block) else {
        return KeyOutcome::pass();
    };
    let content = attrs.content.as_deref().unwrap_or_default();
    let len = content.chars().count();
    let block_id = block.id.clone();

    match input.key {
        Key::Tab => {
            let start = textarea.start.min(len);
            let end = textarea.end.clamp(start, len);
            let mut next = content.to_string();
            next.replace_range(byte_offset(content, start)..byte_offset(content, end), "\t");

            let mut attrs = attrs.clone();
            attrs.content = Some(next);
            KeyOutcome::handled(replace_attrs(block, attrs)).with_caret(start + 1)
        }
        Key::ArrowUp if textarea.start == 0 => {
            KeyOutcome::handled(Mutation::FocusPreviousBlock { block_id })
        }
        Key::ArrowDown if textarea.start == len => {
            KeyOutcome::handled(Mutation::FocusNextBlock { block_id })
        }
        _ => KeyOutcome::pass(),
    }
}
