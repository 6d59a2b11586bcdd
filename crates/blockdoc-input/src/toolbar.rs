use core::fmt;

use blockdoc_core::{
    Block, BlockAttrs, BlockType, CodeAttrs, EditorState, HeadingAttrs, ImageAttrs, ListAttrs,
};
use blockdoc_engine::Mutation;
use thiserror::Error;

use crate::selection::{selection_state, SelectionState, TextSelectionProbe};

/// Inline formatting applies to these block types only.
pub fn can_format(block_type: BlockType) -> bool {
    matches!(
        block_type,
        BlockType::Paragraph | BlockType::Heading | BlockType::Blockquote
    )
}

/// Block conversions offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPreset {
    Heading1,
    Heading2,
    Heading3,
    BulletList,
    OrderedList,
    Quote,
    Code,
    Image,
}

impl ConvertPreset {
    pub const ALL: [ConvertPreset; 8] = [
        ConvertPreset::Heading1,
        ConvertPreset::Heading2,
        ConvertPreset::Heading3,
        ConvertPreset::BulletList,
        ConvertPreset::OrderedList,
        ConvertPreset::Quote,
        ConvertPreset::Code,
        ConvertPreset::Image,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ConvertPreset::Heading1 => "Heading 1",
            ConvertPreset::Heading2 => "Heading 2",
            ConvertPreset::Heading3 => "Heading 3",
            ConvertPreset::BulletList => "Bullet List",
            ConvertPreset::OrderedList => "Numbered List",
            ConvertPreset::Quote => "Quote",
            ConvertPreset::Code => "Code Block",
            ConvertPreset::Image => "Image",
        }
    }

    pub const fn block_type(self) -> BlockType {
        match self {
            ConvertPreset::Heading1 | ConvertPreset::Heading2 | ConvertPreset::Heading3 => {
                BlockType::Heading
            }
            ConvertPreset::BulletList => BlockType::BulletList,
            ConvertPreset::OrderedList => BlockType::OrderedList,
            ConvertPreset::Quote => BlockType::Blockquote,
            ConvertPreset::Code => BlockType::Code,
            ConvertPreset::Image => BlockType::Image,
        }
    }

    pub fn attrs(self) -> Option<BlockAttrs> {
        let heading = |level| Some(BlockAttrs::Heading(HeadingAttrs { level: Some(level) }));
        match self {
            ConvertPreset::Heading1 => heading(1),
            ConvertPreset::Heading2 => heading(2),
            ConvertPreset::Heading3 => heading(3),
            ConvertPreset::BulletList | ConvertPreset::OrderedList => {
                Some(BlockAttrs::List(ListAttrs::with_items([""])))
            }
            ConvertPreset::Quote => None,
            ConvertPreset::Code => Some(BlockAttrs::Code(CodeAttrs {
                content: Some(String::new()),
                language: Some("text".to_string()),
                filename: None,
            })),
            ConvertPreset::Image => Some(BlockAttrs::Image(ImageAttrs {
                src: Some(String::new()),
                ..ImageAttrs::default()
            })),
        }
    }

    /// Conversion of the active block; `None` when nothing is focused.
    pub fn convert_active(self, state: &EditorState) -> Option<Mutation> {
        let active = state.active_block()?;
        Some(self.convert(active))
    }

    pub fn convert(self, block: &Block) -> Mutation {
        Mutation::ConvertBlockType {
            block_id: block.id.clone(),
            new_type: self.block_type(),
            attrs: self.attrs(),
        }
    }
}

/// A native formatting command run over the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    CreateLink(String),
    Unlink,
    /// Insert text at the caret, replacing any selected range.
    InsertText(String),
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::CreateLink(_) => "createLink",
            FormatCommand::Unlink => "unlink",
            FormatCommand::InsertText(_) => "insertText",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No text selected")]
    NoTextSelected,
    #[error("Failed to execute {command} command: {reason}")]
    Host { command: String, reason: String },
}

/// Host side of formatting: applies commands to its own text surface.
///
/// The document model is not touched; the next captured input flattens
/// whatever the host produced.
pub trait FormattingHost: TextSelectionProbe {
    fn apply(&mut self, command: &FormatCommand) -> Result<(), String>;
}

pub fn execute(host: &mut dyn FormattingHost, command: &FormatCommand) -> Result<(), CommandError> {
    if matches!(command, FormatCommand::CreateLink(_))
        && host.selection().is_none_or(|r| r.is_collapsed())
    {
        return Err(CommandError::NoTextSelected);
    }

    host.apply(command).map_err(|reason| {
        tracing::warn!(%command, %reason, "format command failed");
        CommandError::Host {
            command: command.to_string(),
            reason,
        }
    })
}

/// What the link button does for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    Unlink,
    /// Ask for a URL, prefilled with this value.
    Prompt(String),
}

pub fn link_action(selection: &SelectionState) -> LinkAction {
    match (&selection.link_href, selection.is_link) {
        (Some(href), true) if !href.is_empty() => LinkAction::Unlink,
        (href, _) => LinkAction::Prompt(href.clone().unwrap_or_default()),
    }
}

/// Submit the link prompt. An empty URL does nothing.
pub fn submit_link(host: &mut dyn FormattingHost, href: &str) -> Result<(), CommandError> {
    if href.is_empty() {
        return Ok(());
    }
    execute(host, &FormatCommand::CreateLink(href.to_string()))
}

/// Enabled/active flags for the formatting buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarState {
    pub can_format: bool,
    pub bold_active: bool,
    pub italic_active: bool,
    pub link_active: bool,
    pub link_enabled: bool,
}

pub fn toolbar_state(active: Option<&Block>, probe: &dyn TextSelectionProbe) -> ToolbarState {
    let sel = selection_state(probe);
    let can = active.is_some_and(|b| can_format(b.block_type()));
    ToolbarState {
        can_format: can,
        bold_active: sel.is_bold,
        italic_active: sel.is_italic,
        link_active: sel.is_link,
        link_enabled: can && !sel.is_collapsed,
    }
}
