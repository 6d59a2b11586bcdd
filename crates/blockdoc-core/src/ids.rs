use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque block identifier, unique within a document.
///
/// Ids are minted once when a block is created and stay stable across edits
/// until the block is removed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Source of fresh block ids. A source never hands out the same id twice.
pub trait IdSource {
    fn next_id(&mut self) -> BlockId;

    /// Start over for a new document. Ids handed out before the reset must
    /// no longer be in use.
    fn reset(&mut self) {}
}

/// Random v4 UUIDs in simple (dash-less) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> BlockId {
        BlockId(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic ids: `<prefix>1`, `<prefix>2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("b")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> BlockId {
        let id = BlockId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    fn reset(&mut self) {
        self.next = 1;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIds::new("p");
        assert_eq!(ids.next_id(), "p1");
        assert_eq!(ids.next_id(), "p2");
        assert_eq!(ids.next_id(), "p3");
    }

    #[test]
    fn sequential_ids_restart_after_reset() {
        let mut ids = SequentialIds::new("p");
        ids.next_id();
        ids.next_id();
        ids.reset();
        assert_eq!(ids.next_id(), "p1");
    }

    #[test]
    fn uuid_ids_do_not_repeat() {
        let mut ids = UuidIds;
        let seen: HashSet<BlockId> = (0..256).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 256);
    }

    #[test]
    fn block_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&BlockId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
