//! File text with a line index for position lookup and line slicing.

use crate::position::Position;
use vellum_common::ContentHash;
use std::path::PathBuf;

/// The text of one file plus precomputed line starts.
#[derive(Debug)]
pub struct SourceFile {
    /// The path (or synthetic name) the file was loaded under.
    pub path: PathBuf,
    /// The full text of the file.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<usize>,
    /// Hash of `content`.
    pub content_hash: ContentHash,
}

impl SourceFile {
    /// Creates a `SourceFile`, indexing line starts and hashing the content.
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        let content_hash = ContentHash::of_text(&content);
        Self {
            path: path.into(),
            content,
            line_starts,
            content_hash,
        }
    }

    /// Returns the number of lines. An empty file has one (empty) line.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Converts a byte offset into a zero-based [`Position`] with a char column.
    ///
    /// Offsets past the end clamp to the end of the file, and offsets inside
    /// a multi-byte character move back to the start of that character.
    pub fn position_at(&self, byte_offset: usize) -> Position {
        let mut offset = byte_offset.min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self.content[line_start..offset].chars().count();
        Position::new(line_idx as u32, column as u32)
    }

    /// Converts a zero-based [`Position`] back into a byte offset.
    ///
    /// Returns `None` if the line does not exist or the column runs past the
    /// end of that line.
    pub fn offset_of(&self, pos: Position) -> Option<usize> {
        let line = self.line_text(pos.line)?;
        let line_start = self.line_starts[pos.line as usize];
        if pos.column as usize == line.chars().count() {
            return Some(line_start + line.len());
        }
        line.char_indices()
            .nth(pos.column as usize)
            .map(|(idx, _)| line_start + idx)
    }

    /// Returns the text of a zero-based line without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = line as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.content.len(), |next| next - 1);
        let text = &self.content[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Returns lines `start_line..=end_line`, stopping early at end of file.
    pub fn lines(&self, start_line: u32, end_line: u32) -> Vec<&str> {
        (start_line..=end_line)
            .map_while(|line| self.line_text(line))
            .collect()
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}
