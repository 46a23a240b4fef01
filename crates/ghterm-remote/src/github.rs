//! GitHub git-tree API client.

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info, warn};

use ghterm_core::{EntryKind, GitHubConfig, TreeEntry};

use crate::error::FetchError;
use crate::source::{Listing, RepositorySource};

/// User agent sent with every request.
pub const USER_AGENT: &str = "ghterm";

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Response body of `GET /repos/{repo}/git/trees/{ref}?recursive=1`.
#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

/// Lists a repository through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: reqwest::Client,
}

impl GitHubSource {
    /// Create a source with its own HTTP client.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Create a source sharing an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, config: &GitHubConfig) -> Result<Listing, FetchError> {
        if !config.is_configured() {
            return Err(FetchError::NotConfigured);
        }

        let url = config.tree_url();
        debug!(%url, "fetching repository tree");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(repo = %config.repo, status = status.as_u16(), "tree request failed");
            return Err(FetchError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body: TreeResponse = response
            .json()
            .await
            .map_err(|source| FetchError::Decode { source })?;

        let total = body.tree.len();
        let entries: Vec<TreeEntry> = body
            .tree
            .into_iter()
            .filter(|entry| entry.kind != EntryKind::Other)
            .collect();

        info!(
            repo = %config.repo,
            branch = %config.branch,
            entries = entries.len(),
            skipped = total - entries.len(),
            truncated = body.truncated,
            "fetched repository tree"
        );

        Ok(Listing {
            entries,
            truncated: body.truncated,
        })
    }
}

impl RepositorySource for GitHubSource {
    fn fetch_tree<'a>(
        &'a self,
        config: &'a GitHubConfig,
    ) -> BoxFuture<'a, Result<Listing, FetchError>> {
        self.fetch(config).boxed()
    }
}
