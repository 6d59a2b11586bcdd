#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

Persisted block tree codecs for the blockdoc editor.

Do NOT depend on this crate directly.
Use `blockdoc-io` instead.
"#]

pub mod deserialize;
pub mod error;
pub mod json;
pub mod schema;
pub mod serialize;
pub mod validate;

pub use deserialize::{deserialize_blocks, deserialize_blocks_with};
pub use error::{CodecError, CodecErrorCode};
pub use json::{parse_persisted_json, persisted_blocks, to_minified_json, to_pretty_json};
pub use schema::{ListItemNode, NestedNode, PersistedBlock, TextNode};
pub use serialize::{serialize_block, serialize_blocks};
pub use validate::{validate_persisted, SchemaError, CONTENT_BLOCKS_SCHEMA};
