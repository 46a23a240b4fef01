//! ghterm - browse a GitHub repository from a terminal shell.
//!
//! Usage:
//!   ghterm                     Launch the interactive shell
//!   ghterm exec <LINE>...      Run shell commands and print their output
//!   ghterm tree                Print the repository tree
//!   ghterm --help              Show help

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ghterm_core::{
    DEFAULT_BRANCH, DirectoryNode, GitHubConfig, TreeBuilder, TreeNode, TreeStats, format_size,
};
use ghterm_remote::{GitHubSource, RawDownloader, RepositorySource};
use ghterm_shell::{Shell, ShellConfig, StdoutSink};

#[derive(Parser)]
#[command(
    name = "ghterm",
    version,
    about = "Browse a GitHub repository from a terminal shell",
    long_about = "ghterm loads the file tree of a GitHub repository and lets you walk it \
                  with ls, cd and pwd, and download files with scp.\n\n\
                  Launch the interactive shell by running `ghterm`, or use \
                  subcommands for scripted use."
)]
struct Cli {
    /// Repository to open, as OWNER/NAME (defaults to the saved one)
    #[arg(short, long, value_name = "OWNER/NAME")]
    repo: Option<String>,

    /// Branch to open with --repo
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Personal access token to use with --repo
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Directory scp saves files into (defaults to the download directory)
    #[arg(long, value_name = "DIR")]
    download_dir: Option<PathBuf>,

    /// Do not read or save the repository configuration
    #[arg(long)]
    no_persist: bool,

    /// Write logs to this file (filter with GHTERM_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run shell command lines and print their output
    Exec {
        /// Lines to run, in order (quote each one)
        #[arg(required = true, value_name = "LINE")]
        lines: Vec<String>,
    },

    /// Print the repository tree
    Tree {
        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<u32>,

        /// Number of entries to show per directory
        #[arg(short = 'n', long, default_value = "50")]
        top: usize,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "ghterm starting");
    let config = shell_config(&cli)?;

    match cli.command {
        Some(Command::Exec { lines }) => run_exec(&config, &lines)?,
        Some(Command::Tree { depth, top }) => run_tree(&config, depth, top)?,
        None => ghterm_shell::run_with_config(config)?,
    }

    Ok(())
}

/// Send tracing output to `path`, if given. Without a path nothing is logged.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("GHTERM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| eyre!("Failed to initialize logging: {e}"))?;

    Ok(())
}

fn shell_config(cli: &Cli) -> Result<ShellConfig> {
    let mut config = ShellConfig::new().with_persist(!cli.no_persist);

    if let Some(repo) = &cli.repo {
        let mut builder = GitHubConfig::builder();
        builder.repo(repo.as_str()).branch(cli.branch.as_str());
        if let Some(token) = cli.token.as_deref().filter(|t| !t.is_empty()) {
            builder.token(token);
        }
        config = config.with_repository(builder.build().context("Invalid --repo")?);
    }
    if let Some(dir) = &cli.download_dir {
        config = config.with_download_dir(dir);
    }

    Ok(config)
}

/// Run each line through the shell, printing output to stdout.
fn run_exec(config: &ShellConfig, lines: &[String]) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let downloads = Arc::new(RawDownloader::new(&config.download_dir)?);
        let mut shell = Shell::new(
            StdoutSink,
            Arc::new(GitHubSource::new()?),
            downloads.clone(),
            config.config_store(),
        );
        if let Some(repository) = &config.repository {
            shell = shell.with_config(repository.clone());
        }

        if config.load_on_startup && shell.config().is_configured() {
            shell.request_load();
            shell.settle().await;
        }
        for line in lines {
            shell.dispatch(line);
            shell.settle().await;
        }

        downloads.wait().await;
        Ok::<_, color_eyre::Report>(())
    })
}

/// Fetch the repository and print it as an indented tree.
fn run_tree(config: &ShellConfig, max_depth: Option<u32>, top_n: usize) -> Result<()> {
    let repository = config
        .repository
        .clone()
        .or_else(|| config.config_store().load())
        .filter(GitHubConfig::is_configured)
        .ok_or_else(|| eyre!("No repository configured, pass --repo OWNER/NAME"))?;

    eprintln!("Loading {} ({})...", repository.repo, repository.branch);

    let rt = tokio::runtime::Runtime::new()?;
    let source = GitHubSource::new()?;
    let listing = rt
        .block_on(source.fetch_tree(&repository))
        .context("Failed to fetch repository tree")?;
    let root = TreeBuilder::build(&listing.entries).context("Invalid repository listing")?;
    let stats = TreeStats::collect(&root);

    // Print summary
    println!();
    println!("{}", "─".repeat(60));
    println!(
        " {}@{} - {}",
        repository.repo,
        repository.branch,
        format_size(stats.total_bytes)
    );
    println!(
        " {} files, {} directories, {} levels deep",
        stats.files, stats.directories, stats.max_depth
    );
    if listing.truncated {
        println!(" Listing truncated by GitHub");
    }
    println!("{}", "─".repeat(60));
    println!();

    print_dir(&root, 0, max_depth.unwrap_or(u32::MAX), top_n);

    Ok(())
}

/// Print a directory's children, recursing into subdirectories.
fn print_dir(dir: &DirectoryNode, depth: u32, max_depth: u32, top_n: usize) {
    let indent = "  ".repeat(depth as usize);

    for child in dir.entries().take(top_n) {
        match child {
            TreeNode::Directory(sub) => {
                println!("{indent}▼ {}/", sub.name);
                if depth < max_depth {
                    print_dir(sub, depth + 1, max_depth, top_n);
                }
            }
            TreeNode::File(file) => {
                let hash = file.content_hash.as_ref().map_or("", |h| h.short());
                println!(
                    "{indent}  {:<40} {:>8}  {hash}",
                    truncate(&file.name, 40),
                    format_size(file.size)
                );
            }
        }
    }

    let remaining = dir.child_count().saturating_sub(top_n);
    if remaining > 0 {
        println!("{indent}  ... and {remaining} more");
    }
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
