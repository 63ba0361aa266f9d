//! Source location tracking for the Joint compiler
//!
//! Every token and node owns two `SourcePosition` snapshots. Positions are
//! 0-based in data and in printer output; `Display` renders the 1-based
//! `path:line:column` form editors expect.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An immutable snapshot of a cursor into a source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Originating path, used only for diagnostics
    pub path: Arc<str>,
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (0-based)
    pub line: u32,
    /// Column relative to the line start, in bytes (0-based)
    pub column: u32,
}

impl SourcePosition {
    /// Create a new position
    pub fn new(path: Arc<str>, offset: usize, line: u32, column: u32) -> Self {
        Self {
            path,
            offset,
            line,
            column,
        }
    }

    /// Position at offset 0 of the given path
    pub fn start_of(path: Arc<str>) -> Self {
        Self::new(path, 0, 0, 0)
    }

    /// `p <offset> l <line> c <column>` as used by the text printers
    pub fn triple(&self) -> String {
        format!("p {} l {} c {}", self.offset, self.line, self.column)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line + 1, self.column + 1)
    }
}

/// A range of source text from start to end position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: SourcePosition,
    /// End position (exclusive)
    pub end: SourcePosition,
}

impl Span {
    /// Create a new span
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Zero-width span at a position
    pub fn point(position: SourcePosition) -> Self {
        Self {
            end: position.clone(),
            start: position,
        }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Check if this span is empty
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Check if this span contains a byte offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }

    /// Get the source text for this span from the input
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start.offset..self.end.offset).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

/// A source map that tracks line starts for efficient position lookup
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// The original source text
    pub source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Create a new source map from source text
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines, counting a trailing partial line
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the 0-based line and column for a byte offset
    pub fn line_column_at(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let column = offset - self.line_starts[line];
        (line as u32, column as u32)
    }

    /// Get a line of text by 0-based line number
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let index = line as usize;
        let start = *self.line_starts.get(index)?;
        let end = match self.line_starts.get(index + 1) {
            Some(next) => next - 1,
            None => self.source.len(),
        };
        self.source.get(start..end)
    }

    /// Offset of the first non-whitespace byte at or after `offset`.
    /// Token positions include leading whitespace; diagnostics point at the
    /// lexeme itself.
    pub fn lexeme_start(&self, offset: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut cursor = offset.min(bytes.len());
        while cursor < bytes.len() && matches!(bytes[cursor], b' ' | b'\n') {
            cursor += 1;
        }
        cursor
    }

    /// Format an error message with source context
    pub fn format_error(&self, position: &SourcePosition, message: &str) -> String {
        self.format_diagnostic("error", position, message)
    }

    /// Like `format_error` with a caller-chosen header label such as `error[E040]`
    pub fn format_diagnostic(&self, label: &str, position: &SourcePosition, message: &str) -> String {
        let mut result = String::new();

        let offset = self.lexeme_start(position.offset);
        let (line, column) = self.line_column_at(offset);
        let at = SourcePosition::new(position.path.clone(), offset, line, column);

        result.push_str(&format!("{}: {}\n", label, message));
        result.push_str(&format!("  --> {}\n", at));

        if let Some(text) = self.get_line(line) {
            let line_num_str = format!("{}", line + 1);
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!(" {} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, text));

            let lexeme_len = text
                .get(column as usize..)
                .and_then(|rest| rest.split(' ').next())
                .map(|word| word.chars().count())
                .unwrap_or(1);
            let indent = text
                .get(..column as usize)
                .map(|prefix| prefix.chars().count())
                .unwrap_or(column as usize);

            result.push_str(&format!(
                " {} | {}{}\n",
                padding,
                " ".repeat(indent),
                "^".repeat(lexeme_len.max(1))
            ));
        }

        result
    }
}
