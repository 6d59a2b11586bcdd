//! Host-facing input layer for blockdoc: selection probing, per-block
//! keyboard contracts and toolbar commands.
//!
//! Handlers never mutate documents; they return the `Mutation` the host
//! should dispatch.

pub mod blocks;
pub mod keys;
pub mod selection;
pub mod toolbar;

pub use keys::{capture_text_input, handle_text_block_key, Key, KeyInput, KeyOutcome};
pub use selection::{
    cursor_position, selection_state, CursorPosition, FormattingContext, PlainTextField,
    SelectionRange, SelectionState, TextSelectionProbe,
};
pub use toolbar::{
    can_format, execute, link_action, submit_link, toolbar_state, CommandError, ConvertPreset,
    FormatCommand, FormattingHost, LinkAction, ToolbarState,
};
