use blockdoc_core::{BlockId, InlineContent};
use blockdoc_engine::Mutation;

use crate::selection::{cursor_position, TextSelectionProbe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    Tab,
    Char(char),
    /// Any key the contracts do not handle, by host name.
    Other(String),
}

/// A key press with the modifiers the contracts care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

/// What a block handler decided for one key press.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyOutcome {
    /// Suppress the host's default handling (line break, caret move, ...).
    pub prevent_default: bool,
    pub mutation: Option<Mutation>,
    /// New caret offset inside the field, when the handler moved it.
    pub caret: Option<usize>,
}

impl KeyOutcome {
    /// Let the host handle the key.
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn handled(mutation: Mutation) -> Self {
        Self {
            prevent_default: true,
            mutation: Some(mutation),
            caret: None,
        }
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = Some(caret);
        self
    }
}

/// Keyboard contract shared by paragraph, heading and blockquote blocks.
///
/// - Enter (no shift) inserts an empty paragraph after the block.
/// - Backspace at the start of an empty block merges it into its predecessor.
/// - ArrowUp at the start / ArrowDown at the end move focus.
///
/// Anything else is left to the host; the resulting text comes back through
/// [`capture_text_input`].
pub fn handle_text_block_key(
    block_id: &BlockId,
    input: &KeyInput,
    probe: &dyn TextSelectionProbe,
) -> KeyOutcome {
    let block_id = block_id.clone();
    match input.key {
        Key::Enter if !input.shift => KeyOutcome::handled(Mutation::InsertBlockAfter {
            block_id,
            block: None,
        }),
        Key::Backspace => {
            let pos = cursor_position(probe);
            let empty = probe.container_text().is_some_and(str::is_empty);
            if pos.at_start && empty {
                KeyOutcome::handled(Mutation::MergeWithPrevious { block_id })
            } else {
                KeyOutcome::pass()
            }
        }
        Key::ArrowUp if cursor_position(probe).at_start => {
            KeyOutcome::handled(Mutation::FocusPreviousBlock { block_id })
        }
        Key::ArrowDown if cursor_position(probe).at_end => {
            KeyOutcome::handled(Mutation::FocusNextBlock { block_id })
        }
        _ => KeyOutcome::pass(),
    }
}

/// Re-capture the container's visible text as the block's only run.
///
/// Any mark segmentation inside the block is flattened away.
pub fn capture_text_input(block_id: &BlockId, visible_text: &str) -> Mutation {
    Mutation::UpdateBlockContent {
        block_id: block_id.clone(),
        content: vec![InlineContent::plain(visible_text)],
    }
}
