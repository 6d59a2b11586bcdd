#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

Pure state transitions for the blockdoc editor.

Do NOT depend on this crate directly.
Use `blockdoc-io` instead.
"#]

pub mod apply;
pub mod diagnostics;
pub mod ops;
pub mod options;
pub mod schema;

pub use apply::{
    apply_mutation, apply_mutation_with, apply_mutation_with_options, apply_mutations,
    try_apply_mutation,
};
pub use diagnostics::{MutationError, MutationErrorCode};
pub use ops::EditorOps;
pub use options::{MutationOptions, MutationPolicy};
pub use schema::{BlockUpdate, EditScript, Mutation};
