//! Core types for ghterm.
//!
//! This crate provides the repository tree model shared by the rest of the
//! workspace: the flat listing records a repository returns, the builder
//! that turns them into a directory tree, the cursor used to walk that tree,
//! and the repository configuration.

mod builder;
mod config;
mod cursor;
mod entry;
mod error;
mod format;
mod node;
mod tree;

pub use builder::TreeBuilder;
pub use config::{DEFAULT_BRANCH, GitHubConfig, GitHubConfigBuilder, GitHubConfigBuilderError};
pub use cursor::NavigationCursor;
pub use entry::{EntryKind, TreeEntry};
pub use error::{ExistingKind, NavError, TreeError};
pub use format::format_size;
pub use node::{ContentHash, DirectoryNode, FileNode, ROOT_NAME, TreeNode};
pub use tree::TreeStats;
