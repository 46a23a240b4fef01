//! Directory and file node types.

use std::collections::BTreeMap;
use std::sync::Arc;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Name of the root directory of every tree.
pub const ROOT_NAME: &str = "~";

/// Opaque content hash reported by the repository (a git blob SHA).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub CompactString);

impl ContentHash {
    /// Create a new ContentHash from its textual form.
    pub fn new(hash: impl Into<CompactString>) -> Self {
        Self(hash.into())
    }

    /// Get the hash as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form, as git prints it.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

/// A node in the repository tree.
///
/// Directories are shared behind an [`Arc`] so that a navigation cursor can
/// hold onto every directory along its path while the tree stays owned by
/// whoever loaded it. Nodes carry no parent pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A directory and its children.
    Directory(Arc<DirectoryNode>),
    /// A regular file.
    File(FileNode),
}

impl TreeNode {
    /// Name of this node (not the full path).
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory(dir) => &dir.name,
            TreeNode::File(file) => &file.name,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File(_))
    }

    /// Borrow the directory, if this is one.
    pub fn as_dir(&self) -> Option<&Arc<DirectoryNode>> {
        match self {
            TreeNode::Directory(dir) => Some(dir),
            TreeNode::File(_) => None,
        }
    }

    /// Borrow the file, if this is one.
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            TreeNode::File(file) => Some(file),
            TreeNode::Directory(_) => None,
        }
    }
}

/// A directory. Child names are unique; iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name (not full path).
    pub name: CompactString,

    /// Children keyed by name.
    pub children: BTreeMap<CompactString, TreeNode>,
}

impl DirectoryNode {
    /// Create a new empty directory.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// Create an empty root directory.
    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Check if this directory has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over direct children in name order.
    pub fn entries(&self) -> impl Iterator<Item = &TreeNode> {
        self.children.values()
    }
}

/// A regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name (not full path).
    pub name: CompactString,

    /// Size in bytes.
    pub size: u64,

    /// Content hash, when the listing carried one.
    pub content_hash: Option<ContentHash>,

    /// Full slash-joined path from the repository root.
    ///
    /// Hand-built trees may leave this unset.
    pub source_path: Option<String>,
}

impl FileNode {
    /// Create a new file node without a source path.
    pub fn new(name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content_hash: None,
            source_path: None,
        }
    }

    /// Set the content hash.
    pub fn with_hash(mut self, hash: ContentHash) -> Self {
        self.content_hash = Some(hash);
        self
    }

    /// Set the source path.
    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}
