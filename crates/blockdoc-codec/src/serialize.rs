use blockdoc_core::{Block, BlockKind, CodeAttrs, HeadingAttrs, ImageAttrs, InlineContent, ListAttrs};

use crate::error::{CodecError, CodecErrorCode};
use crate::schema::{
    ListItemNode, NestedNode, PersistedBlock, PersistedCodeAttrs, PersistedHeadingAttrs,
    PersistedImageAttrs, PersistedOrderedListAttrs, TextNode,
};

/// Map in-memory blocks to the persisted tree.
///
/// All-or-nothing: the first block that cannot be expressed aborts the batch.
pub fn serialize_blocks(blocks: &[Block]) -> Result<Vec<PersistedBlock>, CodecError> {
    let out = blocks
        .iter()
        .enumerate()
        .map(|(i, b)| serialize_block(i, b))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(blocks = out.len(), "serialized blocks");
    Ok(out)
}

/// Serialize one block; `index` is only used for error paths.
pub fn serialize_block(index: usize, block: &Block) -> Result<PersistedBlock, CodecError> {
    let persisted = match &block.kind {
        BlockKind::Paragraph { content } => PersistedBlock::Paragraph {
            content: text_nodes(content),
        },
        BlockKind::Heading { attrs, content } => PersistedBlock::Heading {
            attrs: heading_attrs(index, attrs)?,
            content: text_nodes(content),
        },
        BlockKind::Image { attrs } => PersistedBlock::Image {
            attrs: image_attrs(index, attrs)?,
        },
        BlockKind::Code { attrs } => code_block(attrs),
        BlockKind::Blockquote { content } => PersistedBlock::Blockquote {
            content: vec![NestedNode::Paragraph {
                content: text_nodes(content),
            }],
        },
        BlockKind::BulletList { attrs } => PersistedBlock::BulletList {
            content: list_items(index, attrs)?,
        },
        BlockKind::OrderedList { attrs } => PersistedBlock::OrderedList {
            attrs: attrs.start.map(|start| PersistedOrderedListAttrs { start: Some(start) }),
            content: list_items(index, attrs)?,
        },
    };
    Ok(persisted)
}

fn text_nodes(content: &[InlineContent]) -> Vec<TextNode> {
    content
        .iter()
        .map(|run| TextNode::Text {
            text: run.text.clone(),
            marks: run.marks.clone(),
        })
        .collect()
}

fn heading_attrs(index: usize, attrs: &HeadingAttrs) -> Result<PersistedHeadingAttrs, CodecError> {
    match attrs.level {
        None => Err(CodecError::at(
            CodecErrorCode::MissingField,
            index,
            format!("blocks[{index}].attrs.level"),
            "heading block missing level attribute",
        )),
        Some(0) => Err(CodecError::at(
            CodecErrorCode::InvalidField,
            index,
            format!("blocks[{index}].attrs.level"),
            "heading level must be at least 1",
        )),
        Some(level) => Ok(PersistedHeadingAttrs { level }),
    }
}

fn image_attrs(index: usize, attrs: &ImageAttrs) -> Result<PersistedImageAttrs, CodecError> {
    // An empty src counts as missing: a freshly inserted image has `src: ""`.
    let src = attrs
        .src
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CodecError::at(
                CodecErrorCode::MissingField,
                index,
                format!("blocks[{index}].attrs.src"),
                "image block missing src attribute",
            )
        })?;

    Ok(PersistedImageAttrs {
        src: src.to_string(),
        alt: attrs.alt.clone(),
        title: attrs.title.clone(),
        width: attrs.width.filter(|w| w.is_finite()),
        height: attrs.height.filter(|h| h.is_finite()),
        caption: attrs.caption.clone(),
    })
}

fn code_block(attrs: &CodeAttrs) -> PersistedBlock {
    PersistedBlock::Code {
        attrs: PersistedCodeAttrs {
            language: attrs.language.clone(),
            filename: attrs.filename.clone(),
        },
        content: attrs.content.clone().unwrap_or_default(),
    }
}

fn list_items(index: usize, attrs: &ListAttrs) -> Result<Vec<ListItemNode>, CodecError> {
    let items = attrs.items.as_ref().ok_or_else(|| {
        CodecError::at(
            CodecErrorCode::MissingField,
            index,
            format!("blocks[{index}].attrs.items"),
            "list block missing items",
        )
    })?;

    Ok(items
        .iter()
        .map(|item| ListItemNode::ListItem {
            content: vec![NestedNode::Paragraph {
                content: vec![TextNode::Text {
                    text: item.clone(),
                    marks: Vec::new(),
                }],
            }],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use blockdoc_core::{BlockId, Mark};
    use serde_json::json;

    use super::*;

    fn block(kind: BlockKind) -> Block {
        Block::new(BlockId::new("x"), kind)
    }

    #[test]
    fn blockquote_gets_synthetic_paragraph() {
        let b = block(BlockKind::Blockquote {
            content: vec![InlineContent::with_marks("quoted", vec![Mark::Italic])],
        });
        let v = serde_json::to_value(serialize_block(0, &b).unwrap()).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "blockquote",
                "content": [{
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": "quoted", "marks": [{ "type": "italic" }] }]
                }]
            })
        );
    }

    #[test]
    fn list_items_become_list_item_nodes() {
        let b = block(BlockKind::OrderedList {
            attrs: ListAttrs {
                items: Some(vec!["one".into(), "two".into()]),
                start: Some(3),
            },
        });
        let v = serde_json::to_value(serialize_block(0, &b).unwrap()).unwrap();
        assert_eq!(v["attrs"], json!({ "start": 3 }));
        assert_eq!(v["content"].as_array().unwrap().len(), 2);
        assert_eq!(
            v["content"][1],
            json!({
                "type": "listItem",
                "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "two" }] }]
            })
        );
    }

    #[test]
    fn code_content_defaults_to_empty_string() {
        let b = block(BlockKind::Code {
            attrs: CodeAttrs::default(),
        });
        let v = serde_json::to_value(serialize_block(0, &b).unwrap()).unwrap();
        assert_eq!(v, json!({ "type": "code", "attrs": {}, "content": "" }));
    }

    #[test]
    fn image_optional_attrs_only_when_present() {
        let b = block(BlockKind::Image {
            attrs: ImageAttrs {
                src: Some("/a.png".into()),
                caption: Some("A".into()),
                ..ImageAttrs::default()
            },
        });
        let v = serde_json::to_value(serialize_block(0, &b).unwrap()).unwrap();
        assert_eq!(
            v,
            json!({ "type": "image", "attrs": { "src": "/a.png", "caption": "A" } })
        );
    }

    #[test]
    fn missing_required_attrs_fail_whole_batch() {
        let ok = Block::paragraph(BlockId::new("p"), "fine");
        let heading = block(BlockKind::Heading {
            attrs: HeadingAttrs::default(),
            content: Vec::new(),
        });
        let err = serialize_blocks(&[ok.clone(), heading]).unwrap_err();
        assert_eq!(err.code, CodecErrorCode::MissingField);
        assert_eq!(err.index, Some(1));
        assert_eq!(err.path, "blocks[1].attrs.level");

        let image = block(BlockKind::Image {
            attrs: ImageAttrs::default(),
        });
        let err = serialize_blocks(&[image]).unwrap_err();
        assert_eq!(err.path, "blocks[0].attrs.src");

        let list = block(BlockKind::BulletList {
            attrs: ListAttrs::default(),
        });
        let err = serialize_blocks(&[ok, list]).unwrap_err();
        assert_eq!(err.path, "blocks[1].attrs.items");
        assert_eq!(err.to_string(), "blocks[1].attrs.items: list block missing items");
    }
}
