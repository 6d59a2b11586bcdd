use xxhash_rust::xxh3::xxh3_64;

use crate::model::Block;

/// Canonicalize block text before hashing.
///
/// - CRLF and lone CR become LF
/// - trailing spaces/tabs are stripped per line
///
/// Leading whitespace is kept (it matters inside code blocks), and the
/// presence of a final newline is preserved as-is.
pub fn canonicalize_text(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(normalized.len());

    // split_inclusive keeps the trailing empty-line information that lines() drops.
    for segment in normalized.split_inclusive('\n') {
        if let Some(stripped) = segment.strip_suffix('\n') {
            out.push_str(stripped.trim_end_matches([' ', '\t']));
            out.push('\n');
        } else {
            out.push_str(segment.trim_end_matches([' ', '\t']));
        }
    }

    out
}

/// xxh3-64 over UTF-8 bytes, as fixed-width 16-char lowercase hex.
pub fn xxh64_hex(input: &str) -> String {
    format!("{:016x}", xxh3_64(input.as_bytes()))
}

/// Hash of a block's canonicalized plain text.
///
/// Ids are excluded, so a freshly hydrated copy of a document hashes the same
/// as the original.
pub fn text_hash(block: &Block) -> String {
    xxh64_hex(&canonicalize_text(&block.plain_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_normalizes_newlines_and_trailing_whitespace() {
        assert_eq!(canonicalize_text("a  \r\nb\t\rc "), "a\nb\nc");
        assert_eq!(canonicalize_text("  lead\n"), "  lead\n");
    }

    #[test]
    fn hash_is_fixed_width_hex() {
        let h = xxh64_hex("");
        assert_eq!(h.len(), 16);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(xxh64_hex("abc"), xxh64_hex("abc"));
        assert_ne!(xxh64_hex("abc"), xxh64_hex("abd"));
    }
}
