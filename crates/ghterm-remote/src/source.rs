//! Repository listing sources.

use futures::future::BoxFuture;
use futures::FutureExt;

use ghterm_core::{GitHubConfig, TreeEntry};

use crate::error::FetchError;

/// Flat listing returned by a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Directory and file records, in the order the source produced them.
    pub entries: Vec<TreeEntry>,
    /// Whether the host cut the listing short.
    pub truncated: bool,
}

impl Listing {
    /// Create a complete listing.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self {
            entries,
            truncated: false,
        }
    }
}

/// Something that can produce the flat listing of a repository.
pub trait RepositorySource: Send + Sync {
    /// Fetch the full listing for `config`.
    fn fetch_tree<'a>(
        &'a self,
        config: &'a GitHubConfig,
    ) -> BoxFuture<'a, Result<Listing, FetchError>>;
}

/// Source that serves a fixed listing, or a fixed HTTP failure.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: Result<Listing, (u16, String)>,
}

impl StaticSource {
    /// Serve `entries` for every repository.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self {
            outcome: Ok(Listing::new(entries)),
        }
    }

    /// Serve `listing` as-is, including its truncation flag.
    pub fn with_listing(listing: Listing) -> Self {
        Self {
            outcome: Ok(listing),
        }
    }

    /// Fail every fetch with the given HTTP status.
    pub fn failing(status: u16, reason: impl Into<String>) -> Self {
        Self {
            outcome: Err((status, reason.into())),
        }
    }
}

impl RepositorySource for StaticSource {
    fn fetch_tree<'a>(
        &'a self,
        config: &'a GitHubConfig,
    ) -> BoxFuture<'a, Result<Listing, FetchError>> {
        async move {
            if !config.is_configured() {
                return Err(FetchError::NotConfigured);
            }
            match &self.outcome {
                Ok(listing) => Ok(listing.clone()),
                Err((status, reason)) => Err(FetchError::http(*status, reason.clone())),
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GitHubConfig {
        GitHubConfig::builder().repo("octo/demo").build().unwrap()
    }

    #[tokio::test]
    async fn test_static_source_serves_listing() {
        let source = StaticSource::new(vec![TreeEntry::blob("a.txt", 1)]);
        let listing = source.fetch_tree(&config()).await.unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert!(!listing.truncated);
    }

    #[tokio::test]
    async fn test_static_source_failure() {
        let source = StaticSource::failing(403, "Forbidden");
        let err = source.fetch_tree(&config()).await.unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_static_source_requires_config() {
        let source = StaticSource::new(Vec::new());
        let err = source.fetch_tree(&GitHubConfig::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::NotConfigured));
    }
}
