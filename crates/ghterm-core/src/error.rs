//! Error types for tree building and navigation.

use thiserror::Error;

/// Kind of node already occupying a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingKind {
    File,
    Directory,
}

impl std::fmt::Display for ExistingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExistingKind::File => f.write_str("file"),
            ExistingKind::Directory => f.write_str("directory"),
        }
    }
}

/// Errors that can occur while building a tree from a flat listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A path collides with an existing node of a different kind.
    #[error("Structure conflict at {path}: a {existing} already exists there")]
    StructureConflict { path: String, existing: ExistingKind },

    /// A path is empty or contains an empty segment.
    #[error("Invalid path in listing: {path:?}")]
    EmptySegment { path: String },
}

/// Errors that can occur while moving around a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// Name absent from the current directory.
    #[error("'{name}' does not exist")]
    NotFound { name: String },

    /// Name exists but is a file.
    #[error("'{name}' is not a directory")]
    NotADirectory { name: String },

    /// Name exists but is a directory.
    #[error("'{name}' is not a file")]
    NotAFile { name: String },

    /// Ascend requested at the root.
    #[error("already at the root directory")]
    AtRoot,
}
