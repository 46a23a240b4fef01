//! Remote collaborators for ghterm.
//!
//! This crate talks to the repository host:
//!
//! - **Tree listing** via [`RepositorySource`], implemented for the GitHub
//!   git-tree API by [`GitHubSource`] and for fixtures by [`StaticSource`]
//! - **Downloads** via [`DownloadSink`], implemented by [`RawDownloader`]
//!
//! # Example
//!
//! ```rust,no_run
//! use ghterm_core::{GitHubConfig, TreeBuilder};
//! use ghterm_remote::{GitHubSource, RepositorySource};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GitHubConfig::builder().repo("rust-lang/log").build()?;
//! let listing = GitHubSource::new()?.fetch_tree(&config).await?;
//! let root = TreeBuilder::build(&listing.entries)?;
//!
//! println!("{} top-level entries", root.child_count());
//! # Ok(())
//! # }
//! ```

mod download;
mod error;
mod github;
mod source;

pub use download::{DownloadSink, RawDownloader};
pub use error::FetchError;
pub use github::{GitHubSource, USER_AGENT};
pub use source::{Listing, RepositorySource, StaticSource};

// Re-export core types for convenience
pub use ghterm_core::{GitHubConfig, TreeEntry};
