//! Half-open spans of text inside a named file.

use crate::position::{LocationOffset, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A half-open, zero-based span within a file.
///
/// `start` is inclusive and `end` is exclusive at the character level.
/// Multi-line ranges cover everything from `start` through the end of
/// `start.line`, every line in between, and `end.line` up to `end.column`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SourceRange {
    /// The file the range points into.
    pub file: PathBuf,
    /// First character of the range.
    pub start: Position,
    /// One past the last character of the range.
    pub end: Position,
}

impl SourceRange {
    /// Creates a range in `file` from `start` to `end`.
    pub fn new(file: impl Into<PathBuf>, start: Position, end: Position) -> Self {
        Self {
            file: file.into(),
            start,
            end,
        }
    }

    /// Creates a zero-width range at `pos`.
    pub fn point(file: impl Into<PathBuf>, pos: Position) -> Self {
        Self::new(file, pos, pos)
    }

    /// Returns `true` if the range starts and ends on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `pos` falls inside the range.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Returns the number of lines the range touches.
    pub fn line_count(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line) + 1
    }

    /// Returns the file this range points into.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Maps a range written relative to an inline document onto the
    /// container's coordinates.
    pub fn offset_by(&self, offset: LocationOffset) -> Self {
        Self {
            file: self.file.clone(),
            start: self.start.offset_by(offset),
            end: self.end.offset_by(offset),
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.file.display(), self.start)
    }
}
