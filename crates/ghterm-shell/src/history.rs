//! Command history.

/// Append-only list of submitted lines plus a browsing position.
///
/// A position equal to the number of entries means "not browsing".
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    index: usize,
}

impl CommandHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and stop browsing.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.index = self.entries.len();
    }

    /// Move the browsing position by `direction` (negative is older).
    ///
    /// Returns the line to present, or `None` when the history is empty and
    /// the input should be left alone. The position clamps at both ends.
    pub fn step(&mut self, direction: isize) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let len = self.entries.len();
        self.index = self.index.saturating_add_signed(direction).min(len);
        Some(self.entries.get(self.index).map_or("", String::as_str))
    }

    /// Current browsing position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All recorded lines, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
