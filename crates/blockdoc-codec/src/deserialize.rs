use blockdoc_core::{
    Block, BlockKind, CodeAttrs, HeadingAttrs, IdSource, ImageAttrs, InlineContent,
    ListAttrs, Mark, UuidIds,
};
use serde::Deserialize as _;
use serde_json::{Map, Value};

use crate::error::{CodecError, CodecErrorCode};
use crate::schema::SCHEMA_ONLY_VARIANTS;

/// Map persisted blocks to in-memory blocks with random ids.
pub fn deserialize_blocks(values: &[Value]) -> Result<Vec<Block>, CodecError> {
    deserialize_blocks_with(values, &mut UuidIds)
}

/// Map persisted blocks to in-memory blocks, minting one fresh id per block.
///
/// An empty list yields a single empty paragraph. The first malformed or
/// unrecognized block aborts the batch.
pub fn deserialize_blocks_with(
    values: &[Value],
    ids: &mut dyn IdSource,
) -> Result<Vec<Block>, CodecError> {
    if values.is_empty() {
        return Ok(vec![Block::empty_paragraph(ids.next_id())]);
    }

    let mut blocks = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let kind = deserialize_kind(index, value)?;
        blocks.push(Block::new(ids.next_id(), kind));
    }

    tracing::debug!(blocks = blocks.len(), "deserialized blocks");
    Ok(blocks)
}

fn deserialize_kind(index: usize, value: &Value) -> Result<BlockKind, CodecError> {
    let cx = Cx::new(index);
    let obj = value
        .as_object()
        .ok_or_else(|| cx.invalid(&cx.root(), "block must be an object"))?;

    let type_path = format!("{}.type", cx.root());
    let tag = match obj.get("type") {
        None => return Err(cx.missing(&type_path, "block has no type")),
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(cx.invalid(&type_path, "type must be a string")),
    };

    match tag {
        "paragraph" => Ok(BlockKind::Paragraph {
            content: cx.inline_field(obj, &cx.root())?,
        }),
        "heading" => heading(&cx, obj),
        "image" => image(&cx, obj),
        "code" => code(&cx, obj),
        "blockquote" => Ok(BlockKind::Blockquote {
            content: blockquote_content(&cx, obj)?,
        }),
        "bulletList" => Ok(BlockKind::BulletList {
            attrs: ListAttrs {
                items: Some(list_items(&cx, obj)?),
                start: None,
            },
        }),
        "orderedList" => Ok(BlockKind::OrderedList {
            attrs: ListAttrs {
                items: Some(list_items(&cx, obj)?),
                start: obj
                    .get("attrs")
                    .and_then(|a| a.get("start"))
                    .and_then(Value::as_i64),
            },
        }),
        other if SCHEMA_ONLY_VARIANTS.contains(&other) => Err(CodecError::at(
            CodecErrorCode::UnsupportedVariant,
            index,
            type_path,
            format!("{other} blocks cannot be opened in the editor"),
        )),
        other => Err(CodecError::at(
            CodecErrorCode::UnknownVariant,
            index,
            type_path,
            format!("unsupported block type: {other}"),
        )),
    }
}

fn heading(cx: &Cx, obj: &Map<String, Value>) -> Result<BlockKind, CodecError> {
    let attrs = cx.attrs(obj)?;
    let level_path = format!("{}.attrs.level", cx.root());
    let level = match attrs.get("level") {
        None => return Err(cx.missing(&level_path, "heading block missing level attribute")),
        Some(v) => v
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| cx.invalid(&level_path, "heading level must be a small positive integer"))?,
    };

    Ok(BlockKind::Heading {
        attrs: HeadingAttrs { level: Some(level) },
        content: cx.inline_field(obj, &cx.root())?,
    })
}

/// A missing `src` loads as `None`; saving the block fails until one is set.
fn image(cx: &Cx, obj: &Map<String, Value>) -> Result<BlockKind, CodecError> {
    let empty = Map::new();
    let attrs = match obj.get("attrs") {
        None | Some(Value::Null) => &empty,
        Some(_) => cx.attrs(obj)?,
    };
    let src_path = format!("{}.attrs.src", cx.root());
    let src = match attrs.get("src") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(cx.invalid(&src_path, "src must be a string")),
    };

    Ok(BlockKind::Image {
        attrs: ImageAttrs {
            src,
            alt: string_attr(attrs, "alt"),
            title: string_attr(attrs, "title"),
            width: attrs.get("width").and_then(Value::as_f64),
            height: attrs.get("height").and_then(Value::as_f64),
            caption: string_attr(attrs, "caption"),
        },
    })
}

fn code(cx: &Cx, obj: &Map<String, Value>) -> Result<BlockKind, CodecError> {
    let content = match obj.get("content") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(cx.invalid(
                &format!("{}.content", cx.root()),
                "code content must be a string",
            ));
        }
    };

    let attrs = obj.get("attrs").and_then(Value::as_object);
    Ok(BlockKind::Code {
        attrs: CodeAttrs {
            content,
            language: attrs.and_then(|a| string_attr(a, "language")),
            filename: attrs.and_then(|a| string_attr(a, "filename")),
        },
    })
}

/// Only the first nested node is kept; anything after it is dropped.
fn blockquote_content(cx: &Cx, obj: &Map<String, Value>) -> Result<Vec<InlineContent>, CodecError> {
    let Some(first) = obj
        .get("content")
        .and_then(Value::as_array)
        .and_then(|nodes| nodes.first())
        .and_then(Value::as_object)
    else {
        return Ok(Vec::new());
    };

    if first.get("content").is_some_and(Value::is_array) {
        cx.inline_field(first, &format!("{}.content[0]", cx.root()))
    } else {
        Ok(Vec::new())
    }
}

fn list_items(cx: &Cx, obj: &Map<String, Value>) -> Result<Vec<String>, CodecError> {
    let path = format!("{}.content", cx.root());
    let items = match obj.get("content") {
        None => return Err(cx.missing(&path, "list block has no items")),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(cx.invalid(&path, "list content must be an array")),
    };

    Ok(items.iter().map(list_item_text).collect())
}

/// Plain text of a list item's first paragraph; marks are ignored.
fn list_item_text(item: &Value) -> String {
    item.get("content")
        .and_then(Value::as_array)
        .and_then(|nodes| nodes.first())
        .and_then(|para| para.get("content"))
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

fn string_attr(attrs: &Map<String, Value>, key: &str) -> Option<String> {
    attrs.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Error-path context for one top-level block.
struct Cx {
    index: usize,
}

impl Cx {
    fn new(index: usize) -> Self {
        Self { index }
    }

    fn root(&self) -> String {
        format!("blocks[{}]", self.index)
    }

    fn missing(&self, path: &str, message: &str) -> CodecError {
        CodecError::at(CodecErrorCode::MissingField, self.index, path, message)
    }

    fn invalid(&self, path: &str, message: &str) -> CodecError {
        CodecError::at(CodecErrorCode::InvalidField, self.index, path, message)
    }

    fn attrs<'a>(&self, obj: &'a Map<String, Value>) -> Result<&'a Map<String, Value>, CodecError> {
        let path = format!("{}.attrs", self.root());
        match obj.get("attrs") {
            None => Err(self.missing(&path, "block has no attrs")),
            Some(Value::Object(attrs)) => Ok(attrs),
            Some(_) => Err(self.invalid(&path, "attrs must be an object")),
        }
    }

    /// Inline runs under `<base>.content`; absent means no runs.
    fn inline_field(
        &self,
        obj: &Map<String, Value>,
        base: &str,
    ) -> Result<Vec<InlineContent>, CodecError> {
        let path = format!("{base}.content");
        let runs = match obj.get("content") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(runs)) => runs,
            Some(_) => return Err(self.invalid(&path, "content must be an array")),
        };

        runs.iter()
            .enumerate()
            .map(|(i, run)| self.inline_run(run, &format!("{path}[{i}]")))
            .collect()
    }

    fn inline_run(&self, run: &Value, path: &str) -> Result<InlineContent, CodecError> {
        let text = match run.get("text") {
            None => return Err(self.missing(&format!("{path}.text"), "text run has no text")),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(self.invalid(&format!("{path}.text"), "text must be a string")),
        };

        let marks = match run.get("marks") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(marks)) => marks
                .iter()
                .enumerate()
                .map(|(k, m)| {
                    Mark::deserialize(m).map_err(|e| {
                        self.invalid(&format!("{path}.marks[{k}]"), &format!("invalid mark: {e}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(self.invalid(&format!("{path}.marks"), "marks must be an array")),
        };

        Ok(InlineContent { text, marks })
    }
}
