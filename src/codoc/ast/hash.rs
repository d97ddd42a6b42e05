//! Content hashing

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest
pub const HASH_LENGTH: usize = 16;

/// Digest of a line's normalized text.
///
/// Normalization trims surrounding whitespace and lowercases; nothing else. Two lines
/// that differ only in indentation or case hash the same.
pub fn content_hash(text: &str) -> String {
    let normalized = text.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(HASH_LENGTH);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_length_and_alphabet() {
        let hash = content_hash("$foo()");
        assert_eq!(hash.len(), HASH_LENGTH);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_digest() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
        assert_eq!(content_hash("   "), "e3b0c44298fc1c14");
    }

    #[test]
    fn test_normalization() {
        assert_eq!(content_hash("  $Foo()  "), content_hash("$foo()"));
        assert_ne!(content_hash("$foo()"), content_hash("$bar()"));
        assert_ne!(content_hash("$f oo()"), content_hash("$foo()"));
    }
}
