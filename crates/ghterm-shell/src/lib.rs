//! Interactive command shell for browsing a GitHub repository.
//!
//! The [`Shell`] interprets typed lines against a repository tree built by
//! `ghterm-core`, writing everything it has to say to an [`OutputSink`].
//! The [`App`] wraps it in a ratatui terminal interface.
//!
//! # Usage
//!
//! ```rust,no_run
//! use ghterm_shell::ShellConfig;
//!
//! // Run the terminal interface with the saved repository
//! ghterm_shell::run_with_config(ShellConfig::new()).unwrap();
//! ```
//!
//! # Keys
//!
//! - `Enter` - Run the line
//! - `↑`/`↓` - Browse history
//! - `Tab` - Complete the command name
//! - `Ctrl+K` - Clear the terminal
//! - `PageUp`/`PageDown` - Scroll
//! - `Ctrl+C`/`Ctrl+D` - Quit

pub mod app;
pub mod history;
pub mod output;
pub mod registry;
pub mod settings;
pub mod shell;
mod theme;

pub use app::{App, AppResult};
pub use history::CommandHistory;
pub use output::{ListingRow, OutputKind, OutputSink, StdoutSink, Transcript, TranscriptEntry};
pub use registry::{Completion, Verb};
pub use settings::{ConfigStore, MemoryConfigStore, ShellConfig, TomlConfigStore};
pub use shell::{LoadOutcome, Shell};
pub use theme::Theme;

/// Run the terminal interface with default settings.
pub fn run() -> AppResult<()> {
    run_with_config(ShellConfig::default())
}

/// Run the terminal interface with custom settings.
pub fn run_with_config(config: ShellConfig) -> AppResult<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(async {
        let app = App::with_config(&config)?;
        app.run(terminal).await
    });
    ratatui::restore();

    // Shutdown runtime immediately to cancel pending downloads and loads
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
