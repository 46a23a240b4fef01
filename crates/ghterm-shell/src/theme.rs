//! Color theme for the terminal.
//!
//! A single dark palette based on the Tailwind CSS slate colors.

use ratatui::style::{Color, Modifier, Style};

use crate::output::OutputKind;

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Status colors
    pub success: Color,
    pub error: Color,
    pub info: Color,

    // Listing
    pub directory: Style,
    pub file: Style,

    // Prompt line
    pub prompt: Style,
    pub input: Style,

    // Footer
    pub footer: Style,
    pub footer_key: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS)
        let blue_400 = Color::Rgb(96, 165, 250);
        let blue_500 = Color::Rgb(59, 130, 246);
        let green_500 = Color::Rgb(34, 197, 94);
        let red_500 = Color::Rgb(239, 68, 68);

        Self {
            background: slate_900,
            foreground: slate_100,
            muted: slate_500,

            success: green_500,
            error: red_500,
            info: blue_400,

            directory: Style::new().fg(blue_500).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_300),

            prompt: Style::new().fg(green_500).add_modifier(Modifier::BOLD),
            input: Style::new().fg(slate_100),

            footer: Style::new().bg(slate_800).fg(slate_400),
            footer_key: Style::new()
                .bg(slate_800)
                .fg(blue_400)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a transcript line of the given kind.
    pub fn line_style(&self, kind: OutputKind) -> Style {
        match kind {
            OutputKind::Normal => Style::new().fg(self.foreground),
            OutputKind::Input => self.prompt,
            OutputKind::Error => Style::new().fg(self.error),
            OutputKind::Success => Style::new().fg(self.success),
            OutputKind::Info => Style::new().fg(self.info),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
