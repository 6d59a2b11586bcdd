//! One editing session: the live state plus the hooks an external save/load
//! layer talks to.

use std::fmt;

use blockdoc_codec::{
    deserialize_blocks_with, parse_persisted_json, serialize_blocks, CodecError, PersistedBlock,
};
use blockdoc_core::{Block, EditorState, IdSource, UuidIds};
use blockdoc_engine::{apply_mutation_with_options, Mutation, MutationError, MutationOptions};
use serde_json::Value;
use thiserror::Error;

use crate::hashing::content_fingerprint;

/// Called with the full block list after every dispatched mutation.
pub type ChangeListener = Box<dyn FnMut(&[Block])>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load content: {0}")]
    Load(#[source] CodecError),
    #[error("failed to save content: {0}")]
    Save(#[source] CodecError),
    #[error("mutation rejected: {0}")]
    Mutation(#[from] MutationError),
    #[error("failed to encode content: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SessionError {
    /// Message suitable for showing to an editor user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::Load(_) => "Content not found or failed to load.",
            SessionError::Save(_) | SessionError::Encode(_) => "Failed to save content",
            SessionError::Mutation(_) => "That edit could not be applied",
        }
    }
}

pub struct EditorSession {
    state: EditorState,
    options: MutationOptions,
    ids: Box<dyn IdSource>,
    listeners: Vec<ChangeListener>,
    saved_fingerprint: Option<String>,
}

impl EditorSession {
    /// Empty document, random ids, silent mutations.
    pub fn new() -> Self {
        Self::with_ids(Box::new(UuidIds))
    }

    pub fn with_ids(mut ids: Box<dyn IdSource>) -> Self {
        let state = EditorState::new_with(ids.as_mut());
        Self {
            state,
            options: MutationOptions::default(),
            ids,
            listeners: Vec::new(),
            saved_fingerprint: None,
        }
    }

    pub fn with_options(mut self, options: MutationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn blocks(&self) -> &[Block] {
        self.state.blocks()
    }

    pub fn options(&self) -> MutationOptions {
        self.options
    }

    pub fn on_change(&mut self, listener: impl FnMut(&[Block]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the document with persisted content. On failure the current
    /// document is kept.
    ///
    /// Ids restart with the new document, so sequential sources number the
    /// loaded blocks from 1. Loaded content counts as saved unless it cannot
    /// be serialized back, in which case it starts out dirty.
    pub fn hydrate(&mut self, values: &[Value]) -> Result<(), SessionError> {
        // Ids still in use after a failed load are skipped by the engine.
        self.ids.reset();
        let blocks =
            deserialize_blocks_with(values, self.ids.as_mut()).map_err(SessionError::Load)?;
        let state = EditorState::from_blocks(blocks, self.ids.as_mut());

        let saved = match fingerprint_of(&state) {
            Ok(fingerprint) => Some(fingerprint),
            Err(err) => {
                tracing::warn!(%err, "hydrated content cannot be saved as loaded");
                None
            }
        };
        self.state = state;
        self.saved_fingerprint = saved;

        tracing::info!(blocks = self.state.len(), "hydrated editor session");
        Ok(())
    }

    pub fn hydrate_json(&mut self, input: &str) -> Result<(), SessionError> {
        let values = parse_persisted_json(input).map_err(SessionError::Load)?;
        self.hydrate(&values)
    }

    /// Apply one mutation under the session's policy and notify listeners.
    pub fn dispatch(&mut self, mutation: &Mutation) -> Result<&EditorState, SessionError> {
        let next =
            apply_mutation_with_options(&self.state, mutation, self.options, self.ids.as_mut())?;
        self.state = next;

        let blocks = self.state.blocks();
        for listener in &mut self.listeners {
            listener(blocks);
        }
        Ok(&self.state)
    }

    /// Serialize the document for the storage layer and remember it as saved.
    pub fn save(&mut self) -> Result<Vec<PersistedBlock>, SessionError> {
        let persisted = serialize_blocks(self.state.blocks()).map_err(SessionError::Save)?;
        let fingerprint = content_fingerprint(&persisted)?;

        tracing::info!(blocks = persisted.len(), %fingerprint, "saved editor session");
        self.saved_fingerprint = Some(fingerprint);
        Ok(persisted)
    }

    /// Fingerprint of the current document in persisted form.
    pub fn fingerprint(&self) -> Result<String, SessionError> {
        fingerprint_of(&self.state)
    }

    /// Whether the document differs from the last save or load. Content that
    /// cannot be serialized is always dirty.
    pub fn is_dirty(&self) -> bool {
        match (&self.saved_fingerprint, self.fingerprint()) {
            (Some(saved), Ok(current)) => *saved != current,
            _ => true,
        }
    }
}

fn fingerprint_of(state: &EditorState) -> Result<String, SessionError> {
    let persisted = serialize_blocks(state.blocks()).map_err(SessionError::Save)?;
    Ok(content_fingerprint(&persisted)?)
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .field("saved_fingerprint", &self.saved_fingerprint)
            .finish_non_exhaustive()
    }
}
