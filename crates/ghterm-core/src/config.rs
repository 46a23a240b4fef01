//! Repository configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Branch used when none is given.
pub const DEFAULT_BRANCH: &str = "main";

const API_BASE: &str = "https://api.github.com";
const RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Which repository to browse and how to authenticate.
#[derive(Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GitHubConfig {
    /// Repository identifier, `owner/name`.
    pub repo: String,

    /// Branch (or any ref the tree API accepts).
    #[builder(default = "default_branch()")]
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Personal access token.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

impl GitHubConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let Some(ref repo) = self.repo else {
            return Err("Repository is required".to_string());
        };
        match repo.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => return Err(format!("Invalid repository '{repo}': expected owner/name")),
        }
        if let Some(ref branch) = self.branch {
            if branch.is_empty() {
                return Err("Branch cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl GitHubConfig {
    /// Create a new config builder.
    pub fn builder() -> GitHubConfigBuilder {
        GitHubConfigBuilder::default()
    }

    /// Whether a repository has been chosen.
    pub fn is_configured(&self) -> bool {
        !self.repo.is_empty()
    }

    /// Whether a token is set.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Recursive tree-listing endpoint for the configured branch.
    pub fn tree_url(&self) -> String {
        format!(
            "{API_BASE}/repos/{}/git/trees/{}?recursive=1",
            self.repo, self.branch
        )
    }

    /// Raw-content URL for a file at `locator`.
    pub fn raw_url(&self, locator: &str) -> String {
        format!("{RAW_BASE}/{}/{}/{locator}", self.repo, self.branch)
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            branch: default_branch(),
            token: None,
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
