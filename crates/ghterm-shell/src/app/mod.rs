//! Terminal front-end: event loop around the shell.

pub mod input;
mod render;

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};

use crate::output::{OutputKind, OutputSink, Transcript};
use crate::registry::Completion;
use crate::settings::ShellConfig;
use crate::shell::Shell;
use crate::theme::Theme;

use self::input::{EditorAction, LineEditor};
use self::render::{RenderContext, render_app};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Event loop tick interval in milliseconds.
const TICK_INTERVAL_MS: u64 = 50;

/// Rows moved by Page Up/Down.
const PAGE_SIZE: usize = 10;

/// Main application state.
pub struct App {
    shell: Shell<Transcript>,
    editor: LineEditor,
    theme: Theme,
    /// Rows scrolled back from the bottom of the transcript.
    scroll: usize,
    /// Fetch the configured repository when the loop starts.
    load_on_startup: bool,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    /// Create an application around an existing shell.
    pub fn new(mut shell: Shell<Transcript>) -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let output = shell.output_mut();
        output.emit(format!("ghterm {version}"), OutputKind::Success);
        output.emit(
            "type 'help' for a list of commands, or 'loadrepo owner/name' to start.".to_string(),
            OutputKind::Info,
        );

        Self {
            shell,
            editor: LineEditor::new(),
            theme: Theme::dark(),
            scroll: 0,
            load_on_startup: false,
            should_quit: false,
            needs_redraw: true,
        }
    }

    /// Create an application talking to GitHub.
    pub fn with_config(config: &ShellConfig) -> AppResult<Self> {
        let shell = Shell::from_config(Transcript::new(), config)?;
        let mut app = Self::new(shell);
        app.load_on_startup = config.load_on_startup;
        Ok(app)
    }

    /// The shell driven by this application.
    pub fn shell(&self) -> &Shell<Transcript> {
        &self.shell
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        if self.load_on_startup && self.shell.config().is_configured() {
            self.shell.request_load();
        }

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(event) = events.next() => {
                    match event? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                            self.needs_redraw = true;
                        }
                        Event::Resize(..) => self.needs_redraw = true,
                        _ => {}
                    }
                }

                outcome = self.shell.recv_load() => {
                    self.shell.apply_load(outcome);
                    self.scroll = 0;
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {}
            }
        }

        Ok(())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.editor.handle_key(key) {
            EditorAction::Continue => {}
            EditorAction::Submit(line) => {
                self.shell.dispatch(&line);
                self.scroll = 0;
            }
            EditorAction::HistoryPrev => self.recall(-1),
            EditorAction::HistoryNext => self.recall(1),
            EditorAction::Complete => {
                if let Completion::Unique(verb) = self.shell.complete(self.editor.buffer()) {
                    self.editor.set(verb);
                }
            }
            EditorAction::ClearScreen => {
                self.shell.output_mut().clear();
                self.scroll = 0;
            }
            EditorAction::ScrollUp => {
                let rows = self.shell.output().row_count();
                self.scroll = (self.scroll + PAGE_SIZE).min(rows);
            }
            EditorAction::ScrollDown => self.scroll = self.scroll.saturating_sub(PAGE_SIZE),
            EditorAction::Quit => self.should_quit = true,
        }
    }

    fn recall(&mut self, direction: isize) {
        if let Some(line) = self.shell.step_history(direction) {
            self.editor.set(line);
        }
    }

    /// Current input line.
    pub fn input(&self) -> &str {
        self.editor.buffer()
    }

    /// Check if the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn render(&self, frame: &mut Frame) {
        let config = self.shell.config();
        let ctx = RenderContext {
            theme: &self.theme,
            transcript: self.shell.output(),
            prompt: self.shell.prompt(),
            editor: &self.editor,
            scroll: self.scroll,
            repository: config
                .is_configured()
                .then(|| format!("{}@{}", config.repo, config.branch)),
            loading: self.shell.has_pending_load(),
        };
        render_app(&ctx, frame);
    }
}
