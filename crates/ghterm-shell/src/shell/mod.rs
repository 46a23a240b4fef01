//! Command dispatch over a repository tree.

mod info;
mod navigation;
mod repo;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use ghterm_core::{DirectoryNode, GitHubConfig, NavigationCursor, TreeStats};
use ghterm_remote::{
    DownloadSink, FetchError, GitHubSource, Listing, RawDownloader, RepositorySource,
};

use crate::history::CommandHistory;
use crate::output::{OutputKind, OutputSink};
use crate::registry::{self, Completion, Verb};
use crate::settings::{ConfigStore, ShellConfig};

/// Host name shown in the prompt.
pub const PROMPT_HOST: &str = "user@github-term";

/// Result of a background repository fetch.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Configuration the fetch was made with.
    pub config: GitHubConfig,
    /// The listing, or why there is none.
    pub result: Result<Listing, FetchError>,
}

/// The command interpreter.
///
/// Owns the loaded tree, the cursor into it, the command history and the
/// repository configuration. Every command runs to completion inside
/// [`Shell::dispatch`]; repository fetches run in the background and are
/// applied with [`Shell::apply_load`].
pub struct Shell<O: OutputSink> {
    output: O,
    root: Arc<DirectoryNode>,
    cursor: NavigationCursor,
    history: CommandHistory,
    config: GitHubConfig,
    stats: Option<TreeStats>,
    source: Arc<dyn RepositorySource>,
    downloads: Arc<dyn DownloadSink>,
    store: Box<dyn ConfigStore>,
    loads_tx: mpsc::UnboundedSender<LoadOutcome>,
    loads_rx: mpsc::UnboundedReceiver<LoadOutcome>,
    pending_loads: usize,
}

impl<O: OutputSink> Shell<O> {
    /// Create a shell with an empty tree and the stored configuration.
    pub fn new(
        output: O,
        source: Arc<dyn RepositorySource>,
        downloads: Arc<dyn DownloadSink>,
        store: Box<dyn ConfigStore>,
    ) -> Self {
        let root = Arc::new(DirectoryNode::root());
        let config = store.load().unwrap_or_default();
        let (loads_tx, loads_rx) = mpsc::unbounded_channel();

        Self {
            output,
            cursor: NavigationCursor::new(Arc::clone(&root)),
            root,
            history: CommandHistory::new(),
            config,
            stats: None,
            source,
            downloads,
            store,
            loads_tx,
            loads_rx,
            pending_loads: 0,
        }
    }

    /// Create a shell talking to GitHub, set up from `config`.
    pub fn from_config(output: O, config: &ShellConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(ghterm_remote::USER_AGENT)
            .build()?;
        let source = Arc::new(GitHubSource::with_client(client.clone()));
        let downloads = Arc::new(RawDownloader::with_client(client, &config.download_dir));

        let mut shell = Self::new(output, source, downloads, config.config_store());
        if let Some(repository) = &config.repository {
            shell.config = repository.clone();
        }
        Ok(shell)
    }

    /// Replace the repository configuration.
    pub fn with_config(mut self, config: GitHubConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one line of input.
    ///
    /// Blank lines are ignored. Anything else is echoed, recorded in the
    /// history, split on single spaces and handed to the matching verb.
    pub fn dispatch(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        let echo = format!("{} {line}", self.prompt());
        self.output.emit(echo, OutputKind::Input);
        self.history.push(line);

        let mut parts = line.split(' ');
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match Verb::lookup(name) {
            Some(verb) => self.run(verb, &args),
            None => {
                debug!(verb = name, "unknown command");
                self.error(format!(
                    "command not found: {name}. Type 'help' for a list of commands."
                ));
            }
        }
    }

    fn run(&mut self, verb: Verb, args: &[&str]) {
        match verb {
            Verb::Help => self.cmd_help(),
            Verb::Hello => self.cmd_hello(),
            Verb::Clear => self.cmd_clear(),
            Verb::Time => self.cmd_time(),
            Verb::Date => self.cmd_date(),
            Verb::Echo => self.cmd_echo(args),
            Verb::About => self.cmd_about(),
            Verb::System => self.cmd_system(),
            Verb::List => self.cmd_list(),
            Verb::Cd => self.cmd_cd(args),
            Verb::Scp => self.cmd_scp(args),
            Verb::Pwd => self.cmd_pwd(),
            Verb::GitHub => self.cmd_github(),
            Verb::LoadRepo => self.cmd_loadrepo(args),
        }
    }

    /// Complete a partially typed verb.
    ///
    /// Several candidates are listed as an info line; the caller replaces
    /// its input only for [`Completion::Unique`].
    pub fn complete(&mut self, partial: &str) -> Completion {
        let completion = registry::complete(partial);
        if let Completion::Ambiguous(candidates) = &completion {
            let list = candidates.join(", ");
            self.info(format!("possible commands: {list}"));
        }
        completion
    }

    /// Browse the history. See [`CommandHistory::step`].
    pub fn step_history(&mut self, direction: isize) -> Option<String> {
        self.history.step(direction).map(str::to_string)
    }

    /// Prompt shown before input, including the current path.
    pub fn prompt(&self) -> String {
        format!("{PROMPT_HOST}:{}$", self.cursor.path_string())
    }

    /// Install a new tree and move to its root.
    pub fn load_tree(&mut self, root: Arc<DirectoryNode>) {
        self.stats = Some(TreeStats::collect(&root));
        self.cursor.reset(Arc::clone(&root));
        self.root = root;
    }

    /// Root of the loaded tree.
    pub fn root(&self) -> &Arc<DirectoryNode> {
        &self.root
    }

    /// The navigation cursor.
    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    /// The command history.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// The repository configuration.
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// The output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// The output sink, mutably.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub(crate) fn emit(&mut self, text: impl Into<String>, kind: OutputKind) {
        self.output.emit(text.into(), kind);
    }

    pub(crate) fn info(&mut self, text: impl Into<String>) {
        self.emit(text, OutputKind::Info);
    }

    pub(crate) fn error(&mut self, text: impl Into<String>) {
        self.emit(text, OutputKind::Error);
    }

    pub(crate) fn success(&mut self, text: impl Into<String>) {
        self.emit(text, OutputKind::Success);
    }
}
