//! Format version constants.

/// `v` field of edit scripts accepted by `blockdoc apply`.
pub const EDIT_SCRIPT_V: u8 = 1;
