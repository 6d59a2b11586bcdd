//! `blockdoc-io` is the single supported public entrypoint for the blockdoc
//! editor core: the block model, the mutation engine, the persisted-format
//! codecs and the input contracts, plus deterministic helpers around them.
//!
//! This crate contains **no** rendering, networking or storage. Those belong
//! to the host. `blockdoc-io` focuses on:
//! - stable types
//! - canonical JSON
//! - hashing
//! - editing sessions

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `blockdoc_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

// Re-export the document model.
#[doc(hidden)]
pub mod core {
    pub use blockdoc_core::hash::{canonicalize_text, text_hash, xxh64_hex};
    pub use blockdoc_core::{
        Block, BlockAttrs, BlockId, BlockKind, BlockType, CodeAttrs, EditorState, HeadingAttrs,
        IdSource, ImageAttrs, InlineContent, LinkAttrs, ListAttrs, Mark, SequentialIds, UuidIds,
    };
}

/// Deterministic JSON canonicalization helpers.
pub mod canonical_json;

/// SHA-256 fingerprints over canonical JSON.
pub mod hashing;

/// Editing sessions: hydration, dispatch, change listeners, save.
pub mod session;

/// Format version constants.
pub mod version;

// Re-export the mutation engine.
#[doc(hidden)]
pub mod engine {
    pub use blockdoc_engine::{
        apply_mutation, apply_mutation_with, apply_mutation_with_options, apply_mutations,
        try_apply_mutation, BlockUpdate, EditScript, EditorOps, Mutation, MutationError,
        MutationErrorCode, MutationOptions, MutationPolicy,
    };
}

// Re-export the persisted-format codecs.
#[doc(hidden)]
pub mod codec {
    pub use blockdoc_codec::{
        deserialize_blocks, deserialize_blocks_with, parse_persisted_json,
        persisted_blocks, serialize_block, serialize_blocks, to_minified_json, to_pretty_json,
        validate_persisted, CodecError, CodecErrorCode, PersistedBlock, SchemaError,
        CONTENT_BLOCKS_SCHEMA,
    };
}

// Re-export the input contracts.
#[doc(hidden)]
pub mod input {
    pub use blockdoc_input::*;
}

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::codec::{CodecError, CodecErrorCode, PersistedBlock, SchemaError};
    pub use crate::core::{
        Block, BlockAttrs, BlockId, BlockKind, BlockType, EditorState, IdSource, InlineContent,
        Mark, SequentialIds, UuidIds,
    };
    pub use crate::engine::{
        BlockUpdate, EditScript, EditorOps, Mutation, MutationError, MutationErrorCode,
        MutationOptions, MutationPolicy,
    };
    pub use crate::session::{EditorSession, SessionError};
    pub use crate::{canonical_json, hashing};
}
