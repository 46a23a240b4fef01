//! Current working directory tracking.

use std::sync::Arc;

use itertools::Itertools;

use crate::error::NavError;
use crate::node::{DirectoryNode, FileNode, TreeNode};

/// Stack of directories from the root to the current working directory.
///
/// The stack is never empty and holds only directories, so the cursor can
/// never point through a file.
#[derive(Debug, Clone)]
pub struct NavigationCursor {
    stack: Vec<Arc<DirectoryNode>>,
}

impl NavigationCursor {
    /// Create a cursor positioned at `root`.
    pub fn new(root: Arc<DirectoryNode>) -> Self {
        Self { stack: vec![root] }
    }

    /// Replace the whole stack with `[root]`.
    pub fn reset(&mut self, root: Arc<DirectoryNode>) {
        self.stack.clear();
        self.stack.push(root);
    }

    /// The current directory.
    pub fn current(&self) -> &Arc<DirectoryNode> {
        // Invariant: the stack always holds at least the root.
        &self.stack[self.stack.len() - 1]
    }

    /// Check if the cursor is at the root.
    pub fn at_root(&self) -> bool {
        self.stack.len() == 1
    }

    /// Enter the child directory `name`.
    pub fn descend(&mut self, name: &str) -> Result<(), NavError> {
        let next = match self.current().child(name) {
            None => {
                return Err(NavError::NotFound {
                    name: name.to_string(),
                });
            }
            Some(TreeNode::File(_)) => {
                return Err(NavError::NotADirectory {
                    name: name.to_string(),
                });
            }
            Some(TreeNode::Directory(dir)) => Arc::clone(dir),
        };
        self.stack.push(next);
        Ok(())
    }

    /// Leave the current directory.
    pub fn ascend(&mut self) -> Result<(), NavError> {
        if self.at_root() {
            return Err(NavError::AtRoot);
        }
        self.stack.pop();
        Ok(())
    }

    /// Names from the root to the current directory, joined with `/`.
    pub fn path_string(&self) -> String {
        self.stack.iter().map(|dir| dir.name.as_str()).join("/")
    }

    /// Names below the root, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.stack[1..].iter().map(|dir| dir.name.as_str())
    }

    /// Look up a file in the current directory.
    pub fn file(&self, name: &str) -> Result<&FileNode, NavError> {
        match self.current().child(name) {
            None => Err(NavError::NotFound {
                name: name.to_string(),
            }),
            Some(TreeNode::Directory(_)) => Err(NavError::NotAFile {
                name: name.to_string(),
            }),
            Some(TreeNode::File(file)) => Ok(file),
        }
    }

    /// Relative repository path for a file in the current directory.
    ///
    /// Uses the file's recorded source path. Files without one get a path
    /// rebuilt from the cursor, which is only correct when the tree mirrors
    /// the repository layout.
    pub fn locator_for(&self, file: &FileNode) -> String {
        match &file.source_path {
            Some(path) => path.clone(),
            None => self
                .segments()
                .chain(std::iter::once(file.name.as_str()))
                .join("/"),
        }
    }
}
