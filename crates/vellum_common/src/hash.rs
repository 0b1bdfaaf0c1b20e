//! Content hashing used to tell whether a document changed between scans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 hash of a document's text.
///
/// The orchestrator compares hashes to decide whether a cached document's
/// features are still valid or the document must be rescanned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes raw bytes with XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data).to_le_bytes())
    }

    /// Hashes the UTF-8 bytes of `text`.
    pub fn of_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_same_hash() {
        assert_eq!(
            ContentHash::of_text("<html></html>"),
            ContentHash::of_text("<html></html>")
        );
    }

    #[test]
    fn whitespace_changes_hash() {
        assert_ne!(
            ContentHash::of_text("<html></html>"),
            ContentHash::of_text("<html></html>\n")
        );
    }

    #[test]
    fn text_and_bytes_agree() {
        assert_eq!(
            ContentHash::of_text("console.log('hi')"),
            ContentHash::from_bytes(b"console.log('hi')")
        );
    }

    #[test]
    fn display_is_hex() {
        let s = ContentHash::of_text("x").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn json_roundtrip() {
        let h = ContentHash::of_text("body");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
