//! Application rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::output::{ListingRow, Transcript, TranscriptEntry};
use crate::theme::Theme;

use super::input::LineEditor;

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub transcript: &'a Transcript,
    pub prompt: String,
    pub editor: &'a LineEditor,
    /// Rows scrolled back from the bottom of the transcript.
    pub scroll: usize,
    /// Repository shown in the footer.
    pub repository: Option<String>,
    pub loading: bool,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, frame: &mut Frame) {
    let area = frame.area();
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    frame.buffer_mut().set_style(area, base_style);

    let [transcript_area, input_area, footer_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_transcript(ctx, frame, transcript_area);
    render_input(ctx, frame, input_area);
    render_footer(ctx, frame, footer_area);
}

fn listing_line<'a>(theme: &Theme, row: &'a ListingRow) -> Line<'a> {
    match row {
        ListingRow::Directory { name } => Line::from(vec![
            Span::styled(name.as_str(), theme.directory),
            Span::styled("/", theme.directory),
        ]),
        ListingRow::File { name, size } => Line::from(vec![
            Span::styled(name.as_str(), theme.file),
            Span::styled(format!(" ({size})"), Style::new().fg(theme.muted)),
        ]),
    }
}

fn render_transcript(ctx: &RenderContext, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::with_capacity(ctx.transcript.row_count());
    for entry in ctx.transcript.entries() {
        match entry {
            TranscriptEntry::Line { text, kind } => {
                lines.push(Line::styled(text.as_str(), ctx.theme.line_style(*kind)));
            }
            TranscriptEntry::Listing(rows) => {
                lines.extend(rows.iter().map(|row| listing_line(ctx.theme, row)));
            }
        }
    }

    let height = area.height as usize;
    let end = lines.len().saturating_sub(ctx.scroll).max(height.min(lines.len()));
    let start = end.saturating_sub(height);
    let visible: Vec<Line> = lines.drain(start..end).collect();

    frame.render_widget(Paragraph::new(visible), area);
}

fn render_input(ctx: &RenderContext, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(ctx.prompt.as_str(), ctx.theme.prompt),
        Span::raw(" "),
        Span::styled(ctx.editor.buffer(), ctx.theme.input),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let column = ctx.prompt.width() + 1 + ctx.editor.cursor_column();
    let max_x = area.right().saturating_sub(1);
    let x = area.x.saturating_add(column.min(u16::MAX as usize) as u16).min(max_x);
    frame.set_cursor_position(Position::new(x, area.y));
}

fn render_footer(ctx: &RenderContext, frame: &mut Frame, area: Rect) {
    let status = match (&ctx.repository, ctx.loading) {
        (_, true) => " loading… ".to_string(),
        (Some(repo), false) => format!(" {repo} "),
        (None, false) => " no repository ".to_string(),
    };

    let mut spans = vec![Span::styled(status, ctx.theme.footer_key)];
    for (key, desc) in [
        ("Tab", "complete"),
        ("↑/↓", "history"),
        ("Ctrl+K", "clear"),
        ("Ctrl+C", "quit"),
    ] {
        spans.push(Span::styled(format!(" {key}"), ctx.theme.footer_key));
        spans.push(Span::styled(format!(" {desc}"), ctx.theme.footer));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(ctx.theme.footer), area);
}
