//! Summary statistics for a loaded tree.

use serde::{Deserialize, Serialize};

use crate::node::{DirectoryNode, TreeNode};

/// Summary statistics for a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of files.
    pub files: u64,
    /// Total number of directories, excluding the root.
    pub directories: u64,
    /// Sum of all file sizes in bytes.
    pub total_bytes: u64,
    /// Deepest directory level below the root.
    pub max_depth: u32,
}

impl TreeStats {
    /// Walk `root` and tally its contents.
    pub fn collect(root: &DirectoryNode) -> Self {
        let mut stats = Self::default();
        stats.visit(root, 0);
        stats
    }

    fn visit(&mut self, dir: &DirectoryNode, depth: u32) {
        self.max_depth = self.max_depth.max(depth);
        for child in dir.entries() {
            match child {
                TreeNode::File(file) => {
                    self.files += 1;
                    self.total_bytes += file.size;
                }
                TreeNode::Directory(sub) => {
                    self.directories += 1;
                    self.visit(sub, depth + 1);
                }
            }
        }
    }
}
