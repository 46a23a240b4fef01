//! Output sinks and the transcript.

use std::io::Write;

use strum::{Display, IntoStaticStr};

use ghterm_core::{TreeNode, format_size};

/// Kind of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Normal,
    /// An echoed input line.
    Input,
    Error,
    Success,
    Info,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRow {
    Directory { name: String },
    File { name: String, size: String },
}

impl ListingRow {
    /// Build a row for a tree node.
    pub fn from_node(node: &TreeNode) -> Self {
        match node {
            TreeNode::Directory(dir) => Self::Directory {
                name: dir.name.to_string(),
            },
            TreeNode::File(file) => Self::File {
                name: file.name.to_string(),
                size: format_size(file.size),
            },
        }
    }
}

impl std::fmt::Display for ListingRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory { name } => write!(f, "{name}/"),
            Self::File { name, size } => write!(f, "{name} ({size})"),
        }
    }
}

/// Where the shell sends what it has to say.
///
/// Sinks are append-only from the shell's point of view; it never reads
/// them back.
pub trait OutputSink {
    /// Append a line.
    fn emit(&mut self, text: String, kind: OutputKind);

    /// Append a directory listing.
    fn emit_listing(&mut self, rows: Vec<ListingRow>) {
        for row in rows {
            self.emit(row.to_string(), OutputKind::Normal);
        }
    }

    /// Forget everything emitted so far, if the sink supports it.
    fn clear(&mut self) {}
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    Line { text: String, kind: OutputKind },
    Listing(Vec<ListingRow>),
}

/// In-memory output, rendered by the terminal front-end.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of display rows (listing rows count individually).
    pub fn row_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                TranscriptEntry::Line { .. } => 1,
                TranscriptEntry::Listing(rows) => rows.len(),
            })
            .sum()
    }

    /// Plain `(kind, text)` view of every row.
    pub fn lines(&self) -> Vec<(OutputKind, String)> {
        let mut lines = Vec::with_capacity(self.row_count());
        for entry in &self.entries {
            match entry {
                TranscriptEntry::Line { text, kind } => lines.push((*kind, text.clone())),
                TranscriptEntry::Listing(rows) => {
                    lines.extend(rows.iter().map(|r| (OutputKind::Normal, r.to_string())));
                }
            }
        }
        lines
    }

    /// Texts of rows with the given kind.
    pub fn texts_of(&self, kind: OutputKind) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text)
            .collect()
    }
}

impl OutputSink for Transcript {
    fn emit(&mut self, text: String, kind: OutputKind) {
        self.entries.push(TranscriptEntry::Line { text, kind });
    }

    fn emit_listing(&mut self, rows: Vec<ListingRow>) {
        self.entries.push(TranscriptEntry::Listing(rows));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Writes output to stdout, prefixing non-normal lines with their kind.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: String, kind: OutputKind) {
        let mut out = std::io::stdout().lock();
        let _ = match kind {
            OutputKind::Normal | OutputKind::Input => writeln!(out, "{text}"),
            _ => writeln!(out, "{kind}: {text}"),
        };
    }

    fn emit_listing(&mut self, rows: Vec<ListingRow>) {
        let mut out = std::io::stdout().lock();
        for row in rows {
            let _ = writeln!(out, "  {row}");
        }
    }
}
