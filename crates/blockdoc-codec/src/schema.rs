use blockdoc_core::Mark;
use serde::{Deserialize, Serialize};

/// Persisted inline run: `{"type": "text", "text": ..., "marks"?: [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TextNode {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

/// Wrapper node nested inside blockquotes and list items. Never part of
/// the in-memory model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NestedNode {
    Paragraph {
        #[serde(default)]
        content: Vec<TextNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ListItemNode {
    ListItem {
        #[serde(default)]
        content: Vec<NestedNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedHeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedImageAttrs {
    pub src: String,
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

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedCodeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedOrderedListAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

/// One top-level node of the persisted block tree, restricted to the
/// variants the editor can author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PersistedBlock {
    Paragraph {
        content: Vec<TextNode>,
    },
    Heading {
        attrs: PersistedHeadingAttrs,
        content: Vec<TextNode>,
    },
    Image {
        attrs: PersistedImageAttrs,
    },
    Code {
        attrs: PersistedCodeAttrs,
        /// Code text lives at the top level of the persisted node.
        content: String,
    },
    Blockquote {
        content: Vec<NestedNode>,
    },
    BulletList {
        content: Vec<ListItemNode>,
    },
    OrderedList {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<PersistedOrderedListAttrs>,
        content: Vec<ListItemNode>,
    },
}

/// Variants accepted by the shared schema that the editor cannot open.
pub const SCHEMA_ONLY_VARIANTS: [&str; 5] =
    ["horizontalRule", "embed", "callout", "audioPlayer", "table"];
