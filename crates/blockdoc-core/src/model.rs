use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::{BlockId, IdSource, UuidIds};

/// The variant tag of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Paragraph,
    Heading,
    Image,
    Code,
    Blockquote,
    BulletList,
    OrderedList,
}

impl BlockType {
    pub const ALL: [BlockType; 7] = [
        BlockType::Paragraph,
        BlockType::Heading,
        BlockType::Image,
        BlockType::Code,
        BlockType::Blockquote,
        BlockType::BulletList,
        BlockType::OrderedList,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::Image => "image",
            BlockType::Code => "code",
            BlockType::Blockquote => "blockquote",
            BlockType::BulletList => "bulletList",
            BlockType::OrderedList => "orderedList",
        }
    }

    /// Blocks whose text lives in inline runs.
    pub const fn has_inline_content(self) -> bool {
        matches!(
            self,
            BlockType::Paragraph | BlockType::Heading | BlockType::Blockquote
        )
    }

    /// Paragraphs and headings: the only blocks that may be merged together.
    pub const fn is_flow_text(self) -> bool {
        matches!(self, BlockType::Paragraph | BlockType::Heading)
    }

    pub const fn is_list(self) -> bool {
        matches!(self, BlockType::BulletList | BlockType::OrderedList)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlockType(pub String);

impl fmt::Display for UnknownBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBlockType {}

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

/// Link target carried by a `link` mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// A formatting attribute applied to a whole inline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Strike,
    Link { attrs: LinkAttrs },
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            attrs: LinkAttrs {
                href: href.into(),
                target: None,
            },
        }
    }
}

/// A run of text sharing one mark set.
///
/// Marks are not range-addressed: the whole run carries them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl InlineContent {
    /// A run without marks.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadingAttrs {
    /// 1-6. Optional so that a heading converted without a level stays
    /// representable; the serializer rejects it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Code text lives here, never in inline content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Shared by bullet and ordered lists; `start` is only read for ordered lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

impl ListAttrs {
    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: Some(items.into_iter().map(Into::into).collect()),
            start: None,
        }
    }
}

/// Typed attribute payload used by `updateBlock` and `convertBlockType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockAttrs {
    Heading(HeadingAttrs),
    Image(ImageAttrs),
    Code(CodeAttrs),
    List(ListAttrs),
}

impl BlockAttrs {
    /// Whether this payload is the attrs record of `ty`.
    pub fn fits(&self, ty: BlockType) -> bool {
        matches!(
            (self, ty),
            (BlockAttrs::Heading(_), BlockType::Heading)
                | (BlockAttrs::Image(_), BlockType::Image)
                | (BlockAttrs::Code(_), BlockType::Code)
                | (BlockAttrs::List(_), BlockType::BulletList | BlockType::OrderedList)
        )
    }
}

/// Per-variant payload of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph {
        #[serde(default)]
        content: Vec<InlineContent>,
    },
    Heading {
        #[serde(default)]
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<InlineContent>,
    },
    Image {
        #[serde(default)]
        attrs: ImageAttrs,
    },
    Code {
        #[serde(default)]
        attrs: CodeAttrs,
    },
    Blockquote {
        #[serde(default)]
        content: Vec<InlineContent>,
    },
    BulletList {
        #[serde(default)]
        attrs: ListAttrs,
    },
    OrderedList {
        #[serde(default)]
        attrs: ListAttrs,
    },
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Paragraph { .. } => BlockType::Paragraph,
            BlockKind::Heading { .. } => BlockType::Heading,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::Code { .. } => BlockType::Code,
            BlockKind::Blockquote { .. } => BlockType::Blockquote,
            BlockKind::BulletList { .. } => BlockType::BulletList,
            BlockKind::OrderedList { .. } => BlockType::OrderedList,
        }
    }

    /// Build a payload for `ty` from loose parts.
    ///
    /// `content` is dropped for types without inline content. Missing attrs
    /// default to an empty record. Returns `None` when `attrs` is not the
    /// attrs record of `ty`.
    pub fn from_parts(
        ty: BlockType,
        content: Vec<InlineContent>,
        attrs: Option<BlockAttrs>,
    ) -> Option<Self> {
        if attrs.as_ref().is_some_and(|a| !a.fits(ty)) {
            return None;
        }

        let kind = match (ty, attrs) {
            (BlockType::Paragraph, _) => BlockKind::Paragraph { content },
            (BlockType::Blockquote, _) => BlockKind::Blockquote { content },
            (BlockType::Heading, Some(BlockAttrs::Heading(attrs))) => {
                BlockKind::Heading { attrs, content }
            }
            (BlockType::Heading, _) => BlockKind::Heading {
                attrs: HeadingAttrs::default(),
                content,
            },
            (BlockType::Image, Some(BlockAttrs::Image(attrs))) => BlockKind::Image { attrs },
            (BlockType::Image, _) => BlockKind::Image {
                attrs: ImageAttrs::default(),
            },
            (BlockType::Code, Some(BlockAttrs::Code(attrs))) => BlockKind::Code { attrs },
            (BlockType::Code, _) => BlockKind::Code {
                attrs: CodeAttrs::default(),
            },
            (BlockType::BulletList, Some(BlockAttrs::List(attrs))) => {
                BlockKind::BulletList { attrs }
            }
            (BlockType::BulletList, _) => BlockKind::BulletList {
                attrs: ListAttrs::default(),
            },
            (BlockType::OrderedList, Some(BlockAttrs::List(attrs))) => {
                BlockKind::OrderedList { attrs }
            }
            (BlockType::OrderedList, _) => BlockKind::OrderedList {
                attrs: ListAttrs::default(),
            },
        };
        Some(kind)
    }

    pub fn content(&self) -> Option<&[InlineContent]> {
        match self {
            BlockKind::Paragraph { content }
            | BlockKind::Heading { content, .. }
            | BlockKind::Blockquote { content } => Some(content),
            _ => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut Vec<InlineContent>> {
        match self {
            BlockKind::Paragraph { content }
            | BlockKind::Heading { content, .. }
            | BlockKind::Blockquote { content } => Some(content),
            _ => None,
        }
    }

    /// A copy of the attrs record, if this variant has one.
    pub fn attrs(&self) -> Option<BlockAttrs> {
        match self {
            BlockKind::Paragraph { .. } | BlockKind::Blockquote { .. } => None,
            BlockKind::Heading { attrs, .. } => Some(BlockAttrs::Heading(attrs.clone())),
            BlockKind::Image { attrs } => Some(BlockAttrs::Image(attrs.clone())),
            BlockKind::Code { attrs } => Some(BlockAttrs::Code(attrs.clone())),
            BlockKind::BulletList { attrs } | BlockKind::OrderedList { attrs } => {
                Some(BlockAttrs::List(attrs.clone()))
            }
        }
    }

    /// Replace the attrs record. Returns `false` (and changes nothing) when
    /// `attrs` does not fit this variant.
    pub fn set_attrs(&mut self, new_attrs: BlockAttrs) -> bool {
        match (self, new_attrs) {
            (BlockKind::Heading { attrs, .. }, BlockAttrs::Heading(a)) => *attrs = a,
            (BlockKind::Image { attrs }, BlockAttrs::Image(a)) => *attrs = a,
            (BlockKind::Code { attrs }, BlockAttrs::Code(a)) => *attrs = a,
            (BlockKind::BulletList { attrs }, BlockAttrs::List(a))
            | (BlockKind::OrderedList { attrs }, BlockAttrs::List(a)) => *attrs = a,
            _ => return false,
        }
        true
    }
}

/// A single structural unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self { id, kind }
    }

    /// A paragraph holding one empty text run.
    pub fn empty_paragraph(id: BlockId) -> Self {
        Self::paragraph(id, "")
    }

    pub fn paragraph(id: BlockId, text: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockKind::Paragraph {
                content: vec![InlineContent::plain(text)],
            },
        )
    }

    pub fn heading(id: BlockId, level: u8, text: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockKind::Heading {
                attrs: HeadingAttrs { level: Some(level) },
                content: vec![InlineContent::plain(text)],
            },
        )
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Visible text with marks ignored.
    ///
    /// Inline runs are concatenated, code returns its source, list items are
    /// joined with newlines, images yield their caption (or nothing).
    pub fn plain_text(&self) -> String {
        match &self.kind {
            BlockKind::Paragraph { content }
            | BlockKind::Heading { content, .. }
            | BlockKind::Blockquote { content } => {
                content.iter().map(|c| c.text.as_str()).collect()
            }
            BlockKind::Code { attrs } => attrs.content.clone().unwrap_or_default(),
            BlockKind::BulletList { attrs } | BlockKind::OrderedList { attrs } => attrs
                .items
                .as_deref()
                .map(|items| items.join("\n"))
                .unwrap_or_default(),
            BlockKind::Image { attrs } => attrs.caption.clone().unwrap_or_default(),
        }
    }
}

/// Root of the in-memory document: ordered blocks plus the focused block.
///
/// The model only holds data; structural invariants (non-empty, unique ids,
/// no dangling focus) are maintained by the mutation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    blocks: Vec<Block>,
    #[serde(default)]
    active_block_id: Option<BlockId>,
}

impl EditorState {
    /// A fresh document: one empty paragraph, nothing focused.
    pub fn new() -> Self {
        Self::new_with(&mut UuidIds)
    }

    pub fn new_with(ids: &mut dyn IdSource) -> Self {
        Self {
            blocks: vec![Block::empty_paragraph(ids.next_id())],
            active_block_id: None,
        }
    }

    /// Wrap existing blocks, substituting one empty paragraph for an empty list.
    pub fn from_blocks(blocks: Vec<Block>, ids: &mut dyn IdSource) -> Self {
        if blocks.is_empty() {
            return Self::new_with(ids);
        }
        Self {
            blocks,
            active_block_id: None,
        }
    }

    /// Assemble a state without any checks.
    pub fn from_parts(blocks: Vec<Block>, active_block_id: Option<BlockId>) -> Self {
        Self {
            blocks,
            active_block_id,
        }
    }

    pub fn into_parts(self) -> (Vec<Block>, Option<BlockId>) {
        (self.blocks, self.active_block_id)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn active_block_id(&self) -> Option<&BlockId> {
        self.active_block_id.as_ref()
    }

    pub fn active_block(&self) -> Option<&Block> {
        self.active_block_id.as_ref().and_then(|id| self.get(id))
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ids::SequentialIds;

    #[test]
    fn block_type_round_trips_through_str() {
        for ty in BlockType::ALL {
            assert_eq!(ty.as_str().parse::<BlockType>().unwrap(), ty);
        }
        assert!("horizontalRule".parse::<BlockType>().is_err());
    }

    #[test]
    fn block_serializes_with_flat_type_tag() {
        let block = Block::heading(BlockId::new("h1"), 2, "Title");
        let v = serde_json::to_value(&block).unwrap();
        assert_eq!(
            v,
            json!({
                "id": "h1",
                "type": "heading",
                "attrs": { "level": 2 },
                "content": [{ "text": "Title" }]
            })
        );

        let back: Block = serde_json::from_value(v).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn link_mark_carries_attrs() {
        let v = serde_json::to_value(Mark::link("https://example.com")).unwrap();
        assert_eq!(
            v,
            json!({ "type": "link", "attrs": { "href": "https://example.com" } })
        );
    }

    #[test]
    fn attrs_fit_only_their_own_types() {
        let list = BlockAttrs::List(ListAttrs::with_items(["a"]));
        assert!(list.fits(BlockType::BulletList));
        assert!(list.fits(BlockType::OrderedList));
        assert!(!list.fits(BlockType::Paragraph));
        assert!(!BlockAttrs::Heading(HeadingAttrs::default()).fits(BlockType::Code));
    }

    #[test]
    fn from_parts_drops_content_for_non_text_types() {
        let kind = BlockKind::from_parts(
            BlockType::Code,
            vec![InlineContent::plain("abc")],
            None,
        )
        .unwrap();
        assert_eq!(kind.content(), None);
        assert_eq!(
            kind,
            BlockKind::Code {
                attrs: CodeAttrs::default()
            }
        );

        assert!(
            BlockKind::from_parts(
                BlockType::Paragraph,
                Vec::new(),
                Some(BlockAttrs::Heading(HeadingAttrs { level: Some(1) }))
            )
            .is_none()
        );
    }

    #[test]
    fn set_attrs_rejects_foreign_records() {
        let mut kind = BlockKind::Image {
            attrs: ImageAttrs::default(),
        };
        assert!(!kind.set_attrs(BlockAttrs::Code(CodeAttrs::default())));
        assert!(kind.set_attrs(BlockAttrs::Image(ImageAttrs {
            src: Some("/a.png".into()),
            ..ImageAttrs::default()
        })));
        assert_eq!(
            kind.attrs(),
            Some(BlockAttrs::Image(ImageAttrs {
                src: Some("/a.png".into()),
                ..ImageAttrs::default()
            }))
        );
    }

    #[test]
    fn plain_text_per_variant() {
        let list = Block::new(
            BlockId::new("l"),
            BlockKind::BulletList {
                attrs: ListAttrs::with_items(["one", "two"]),
            },
        );
        assert_eq!(list.plain_text(), "one\ntwo");

        let para = Block::new(
            BlockId::new("p"),
            BlockKind::Paragraph {
                content: vec![
                    InlineContent::with_marks("Hello ", vec![Mark::Bold]),
                    InlineContent::plain("World"),
                ],
            },
        );
        assert_eq!(para.plain_text(), "Hello World");
    }

    #[test]
    fn empty_block_list_becomes_one_paragraph() {
        let mut ids = SequentialIds::new("b");
        let state = EditorState::from_blocks(Vec::new(), &mut ids);
        assert_eq!(state.len(), 1);
        assert_eq!(state.blocks()[0].block_type(), BlockType::Paragraph);
        assert_eq!(state.blocks()[0].plain_text(), "");
        assert_eq!(state.active_block_id(), None);
    }
}
