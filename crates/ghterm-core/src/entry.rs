//! Flat listing records.

use serde::{Deserialize, Serialize};

/// Kind of a listing entry, as reported by the git tree API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A directory.
    Tree,
    /// A file.
    Blob,
    /// Anything else (submodule commits, etc.). Ignored by the builder.
    #[serde(other)]
    Other,
}

/// One record of a flat repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Slash-separated path from the repository root.
    pub path: String,

    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Size in bytes (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Object hash.
    #[serde(rename = "sha", default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl TreeEntry {
    /// Create a directory entry.
    pub fn tree(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Tree,
            size: None,
            hash: None,
        }
    }

    /// Create a file entry.
    pub fn blob(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
            size: Some(size),
            hash: None,
        }
    }

    /// Set the object hash.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_github_entries() {
        let json = r#"[
            {"path": "src", "mode": "040000", "type": "tree", "sha": "aa"},
            {"path": "src/main.rs", "mode": "100644", "type": "blob", "sha": "bb", "size": 120},
            {"path": "vendor/lib", "mode": "160000", "type": "commit", "sha": "cc"}
        ]"#;
        let entries: Vec<TreeEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries[0].kind, EntryKind::Tree);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[1], TreeEntry::blob("src/main.rs", 120).with_hash("bb"));
        assert_eq!(entries[2].kind, EntryKind::Other);
    }
}
