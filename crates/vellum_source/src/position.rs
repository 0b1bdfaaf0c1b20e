//! Zero-based line/column coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based location in a file.
///
/// Columns count `char`s, not bytes, so a position lines up with what the
/// renderer prints beneath the source text.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column, in chars.
    pub column: u32,
}

impl Position {
    /// Creates a position from zero-based coordinates.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Translates a position relative to an inline document into the
    /// coordinates of its container.
    ///
    /// Only the first line of the inline document is shifted horizontally;
    /// later lines start at column zero of the container as well.
    pub fn offset_by(self, offset: LocationOffset) -> Self {
        let column = if self.line == 0 {
            self.column + offset.column
        } else {
            self.column
        };
        Self {
            line: self.line + offset.line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

/// Where an inline document's text begins inside its containing file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct LocationOffset {
    /// Zero-based line of the first character of the inline text.
    pub line: u32,
    /// Zero-based column of the first character of the inline text.
    pub column: u32,
}

impl LocationOffset {
    /// Creates an offset from zero-based coordinates.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl From<Position> for LocationOffset {
    fn from(pos: Position) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}
