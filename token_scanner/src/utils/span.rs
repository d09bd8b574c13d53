//! Source location tracking for the token scanner
//!
//! Tokens never span lines, so a span is a start/end column pair on a single
//! source line. Line numbers count every input line, including the blank ones
//! the token store leaves out.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line and column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, counted in characters)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Create the starting position (line 1, column 1)
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Position of a zero-based character index on a 1-based line
    pub fn at_index(line: u32, index: usize) -> Self {
        Self {
            line,
            column: index as u32 + 1,
        }
    }

    /// Advance by `n` columns on the same line
    pub fn advance_columns(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + n as u32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Span covering `len` characters starting at `start`
    pub fn with_len(start: Position, len: usize) -> Self {
        Self::new(start, start.advance_columns(len))
    }

    /// Get the start position of this span
    pub fn start(&self) -> Position {
        self.start
    }

    /// Get the end position of this span
    pub fn end(&self) -> Position {
        self.end
    }

    /// Number of columns covered
    pub fn len(&self) -> usize {
        if self.start.line == self.end.line {
            (self.end.column - self.start.column) as usize
        } else {
            0
        }
    }

    /// Check if this span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create an unknown/dummy span
    pub fn dummy() -> Self {
        Self {
            start: Position::start(),
            end: Position::start(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
