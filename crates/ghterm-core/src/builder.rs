//! Flat listing to directory tree conversion.

use std::collections::btree_map::Entry;
use std::sync::Arc;

use compact_str::CompactString;
use tracing::debug;

use crate::entry::{EntryKind, TreeEntry};
use crate::error::{ExistingKind, TreeError};
use crate::node::{ContentHash, DirectoryNode, FileNode, TreeNode};

/// Builds a rooted tree from a flat listing.
///
/// Directory entries are applied before file entries, so the result does not
/// depend on the order of the listing. Intermediate directories that the
/// listing never names are created on demand.
#[derive(Debug)]
pub struct TreeBuilder {
    root: DirectoryNode,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Create a builder with an empty root.
    pub fn new() -> Self {
        Self {
            root: DirectoryNode::root(),
        }
    }

    /// Build a tree from a complete listing.
    pub fn build<'a, I>(entries: I) -> Result<Arc<DirectoryNode>, TreeError>
    where
        I: IntoIterator<Item = &'a TreeEntry>,
        I::IntoIter: Clone,
    {
        let entries = entries.into_iter();
        let mut builder = Self::new();

        for entry in entries.clone().filter(|e| e.kind == EntryKind::Tree) {
            builder.insert_directory(&entry.path)?;
        }
        for entry in entries.filter(|e| e.kind == EntryKind::Blob) {
            builder.insert_file(entry)?;
        }

        let root = builder.finish();
        debug!(children = root.child_count(), "built repository tree");
        Ok(root)
    }

    /// Create every directory along `path`. Existing directories are kept.
    pub fn insert_directory(&mut self, path: &str) -> Result<(), TreeError> {
        let segments = split_path(path)?;
        descend_creating(&mut self.root, &segments)?;
        Ok(())
    }

    /// Attach a file entry, creating its parent directories if needed.
    pub fn insert_file(&mut self, entry: &TreeEntry) -> Result<(), TreeError> {
        let segments = split_path(&entry.path)?;
        let (name, parents) = segments
            .split_last()
            .ok_or_else(|| TreeError::EmptySegment {
                path: entry.path.clone(),
            })?;

        let parent = descend_creating(&mut self.root, parents)?;
        let file = FileNode {
            name: CompactString::from(*name),
            size: entry.size.unwrap_or(0),
            content_hash: entry.hash.as_deref().map(ContentHash::new),
            source_path: Some(entry.path.clone()),
        };

        match parent.children.entry(CompactString::from(*name)) {
            Entry::Vacant(slot) => {
                slot.insert(TreeNode::File(file));
            }
            Entry::Occupied(slot) => match slot.get() {
                // A repeated identical record is harmless.
                TreeNode::File(existing) if *existing == file => {}
                TreeNode::File(_) => {
                    return Err(TreeError::StructureConflict {
                        path: entry.path.clone(),
                        existing: ExistingKind::File,
                    });
                }
                TreeNode::Directory(_) => {
                    return Err(TreeError::StructureConflict {
                        path: entry.path.clone(),
                        existing: ExistingKind::Directory,
                    });
                }
            },
        }
        Ok(())
    }

    /// Consume the builder and return the root.
    pub fn finish(self) -> Arc<DirectoryNode> {
        Arc::new(self.root)
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, TreeError> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(TreeError::EmptySegment {
            path: path.to_string(),
        });
    }
    Ok(segments)
}

/// Walk `segments` from `dir`, creating missing directories.
fn descend_creating<'a>(
    mut dir: &'a mut DirectoryNode,
    segments: &[&str],
) -> Result<&'a mut DirectoryNode, TreeError> {
    for (depth, segment) in segments.iter().enumerate() {
        let child = dir
            .children
            .entry(CompactString::from(*segment))
            .or_insert_with(|| TreeNode::Directory(Arc::new(DirectoryNode::new(*segment))));

        dir = match child {
            // The builder holds the only reference, so this never clones.
            TreeNode::Directory(sub) => Arc::make_mut(sub),
            TreeNode::File(_) => {
                return Err(TreeError::StructureConflict {
                    path: segments[..=depth].join("/"),
                    existing: ExistingKind::File,
                });
            }
        };
    }
    Ok(dir)
}
