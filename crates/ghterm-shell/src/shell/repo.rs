//! Repository status and background loading.

use std::sync::Arc;

use humansize::{BINARY, format_size};
use tracing::{info, warn};

use ghterm_core::{DEFAULT_BRANCH, GitHubConfig, TreeBuilder, TreeStats};

use super::{LoadOutcome, Shell};
use crate::output::OutputSink;

const LOADREPO_HINT: &str = "use \"loadrepo owner/name [branch] [token]\" to load a repository";

fn describe(stats: &TreeStats) -> String {
    format!(
        "{} files, {} directories, {}, {} levels deep",
        stats.files,
        stats.directories,
        format_size(stats.total_bytes, BINARY),
        stats.max_depth
    )
}

impl<O: OutputSink> Shell<O> {
    pub(super) fn cmd_github(&mut self) {
        if !self.config.is_configured() {
            self.info("no GitHub repository configured");
            self.info(LOADREPO_HINT);
            return;
        }

        let repo = format!("repository: {}", self.config.repo);
        let branch = format!("branch: {}", self.config.branch);
        let token = if self.config.has_token() { "set" } else { "not set" };
        self.info(repo);
        self.info(branch);
        self.info(format!("token: {token}"));

        if let Some(stats) = self.stats {
            self.info(format!("loaded: {}", describe(&stats)));
        }
        if self.pending_loads > 0 {
            self.info("a load is in progress");
        }
    }

    pub(super) fn cmd_loadrepo(&mut self, args: &[&str]) {
        let Some(&repo) = args.first() else {
            self.request_load();
            return;
        };

        let branch = args
            .get(1)
            .copied()
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BRANCH);
        let token = args
            .get(2)
            .map(|t| t.to_string())
            .or_else(|| self.config.token.clone());

        let mut builder = GitHubConfig::builder();
        builder.repo(repo).branch(branch);
        if let Some(token) = token {
            builder.token(token);
        }
        match builder.build() {
            Ok(config) => self.start_load(config),
            Err(err) => self.error(err.to_string()),
        }
    }

    /// Start fetching the configured repository in the background.
    ///
    /// Must be called from within a Tokio runtime. The result arrives through
    /// [`Shell::recv_load`].
    pub fn request_load(&mut self) {
        if !self.config.is_configured() {
            self.error(format!("no GitHub repository configured, {LOADREPO_HINT}"));
            return;
        }
        self.start_load(self.config.clone());
    }

    /// Fetch `config` in the background. The shell keeps its current
    /// configuration until the fetch is applied successfully.
    fn start_load(&mut self, config: GitHubConfig) {
        self.info(format!("loading {} ({})", config.repo, config.branch));

        let source = Arc::clone(&self.source);
        let tx = self.loads_tx.clone();
        self.pending_loads += 1;
        tokio::spawn(async move {
            let result = source.fetch_tree(&config).await;
            // Receiver lives as long as the shell.
            let _ = tx.send(LoadOutcome { config, result });
        });
    }

    /// Check if a fetch is still outstanding.
    pub fn has_pending_load(&self) -> bool {
        self.pending_loads > 0
    }

    /// Wait for the next finished fetch.
    ///
    /// Never resolves while nothing is in flight, which makes it safe to
    /// poll from a `select!` loop.
    pub async fn recv_load(&mut self) -> LoadOutcome {
        match self.loads_rx.recv().await {
            Some(outcome) => outcome,
            None => std::future::pending().await,
        }
    }

    /// Apply a finished fetch: install the tree or report why not.
    ///
    /// Loads are applied in completion order, so the last one to finish
    /// wins. A failed fetch leaves both the tree and the configuration
    /// untouched.
    pub fn apply_load(&mut self, outcome: LoadOutcome) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        let LoadOutcome { config, result } = outcome;

        let listing = match result {
            Ok(listing) => listing,
            Err(err) => {
                warn!(repo = %config.repo, error = %err, "repository load failed");
                self.error(format!("failed to load repository: {err}"));
                if err.is_auth_failure() {
                    self.error("check that the GitHub token is valid and can read the repository");
                }
                return;
            }
        };

        let root = match TreeBuilder::build(&listing.entries) {
            Ok(root) => root,
            Err(err) => {
                warn!(repo = %config.repo, error = %err, "repository listing rejected");
                self.error(format!("failed to load repository: {err}"));
                return;
            }
        };

        self.load_tree(root);
        if let Err(err) = self.store.save(&config) {
            warn!(error = %err, "failed to save repository configuration");
        }
        self.config = config;

        let summary = self.stats.map(|stats| describe(&stats)).unwrap_or_default();
        info!(repo = %self.config.repo, %summary, "repository loaded");
        self.success("repository loaded");
        self.info(summary);
        if listing.truncated {
            self.info("the listing was truncated by GitHub, some files are missing");
        }
        self.info("use \"ls\" to list files");
    }

    /// Apply fetches until none are outstanding.
    pub async fn settle(&mut self) {
        while self.has_pending_load() {
            let outcome = self.recv_load().await;
            self.apply_load(outcome);
        }
    }
}
