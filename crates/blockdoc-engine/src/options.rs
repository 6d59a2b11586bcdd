use serde::{Deserialize, Serialize};

/// How invalid mutation input is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationPolicy {
    /// Unknown ids and boundary conditions leave the state unchanged.
    /// Callers cannot tell "already at the edge" from "no such block".
    #[default]
    Silent,
    /// Same conditions are returned as `MutationError`.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutationOptions {
    #[serde(default)]
    pub policy: MutationPolicy,
}

impl MutationOptions {
    pub fn strict() -> Self {
        Self {
            policy: MutationPolicy::Strict,
        }
    }
}
