//! Single-line editor for the command prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Editable input line. The cursor is a byte offset that always sits on a
/// character boundary.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    /// The current input buffer.
    buffer: String,
    /// Cursor position within the buffer.
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display width of the text before the cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// Replace the buffer and move the cursor to the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
        self.cursor = self.buffer.len();
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Handle a key event.
    ///
    /// Editing keys are applied here; everything the shell has to act on is
    /// returned as an [`EditorAction`].
    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c' | 'd'), KeyModifiers::CONTROL) => EditorAction::Quit,

            // Submit
            (KeyCode::Enter, _) => {
                let value = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                EditorAction::Submit(value)
            }

            (KeyCode::Up, _) => EditorAction::HistoryPrev,
            (KeyCode::Down, _) => EditorAction::HistoryNext,
            (KeyCode::Tab, _) => EditorAction::Complete,
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => EditorAction::ClearScreen,
            (KeyCode::PageUp, _) => EditorAction::ScrollUp,
            (KeyCode::PageDown, _) => EditorAction::ScrollDown,

            // Backspace - delete character before cursor
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.buffer.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
                EditorAction::Continue
            }

            // Delete - delete character at cursor
            (KeyCode::Delete, _) => {
                let end = self.next_boundary();
                self.buffer.replace_range(self.cursor..end, "");
                EditorAction::Continue
            }

            (KeyCode::Left, _) => {
                self.cursor = self.prev_boundary();
                EditorAction::Continue
            }

            (KeyCode::Right, _) => {
                self.cursor = self.next_boundary();
                EditorAction::Continue
            }

            // Home or Ctrl-A - move to start
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                EditorAction::Continue
            }

            // End or Ctrl-E - move to end
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.buffer.len();
                EditorAction::Continue
            }

            // Ctrl-U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
                EditorAction::Continue
            }

            // Ctrl-W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                let before = self.buffer[..self.cursor].trim_end();
                let word_start = before
                    .rfind(char::is_whitespace)
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.buffer.replace_range(word_start..self.cursor, "");
                self.cursor = word_start;
                EditorAction::Continue
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                EditorAction::Continue
            }

            _ => EditorAction::Continue,
        }
    }
}

/// What a key press asks of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Nothing beyond the edit itself.
    Continue,
    /// Run this line.
    Submit(String),
    HistoryPrev,
    HistoryNext,
    Complete,
    ClearScreen,
    ScrollUp,
    ScrollDown,
    Quit,
}
