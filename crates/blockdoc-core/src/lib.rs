#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

In-memory block document model for the blockdoc editor.

Do NOT depend on this crate directly.
Use `blockdoc-io` instead.
"#]

pub mod hash;
pub mod ids;
pub mod model;

pub use ids::{BlockId, IdSource, SequentialIds, UuidIds};
pub use model::{
    Block, BlockAttrs, BlockKind, BlockType, CodeAttrs, EditorState, HeadingAttrs, ImageAttrs,
    InlineContent, LinkAttrs, ListAttrs, Mark,
};
