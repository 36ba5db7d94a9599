//! Line/column coordinates shared by every analysis result.
//!
//! Lines are zero-based. Columns are zero-based byte offsets into the raw line text, so a
//! column found in a stripped copy of the line indexes the original line unchanged.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A range covering `length` bytes of a single line.
    pub fn on_line(line: usize, column: usize, length: usize) -> Self {
        Self {
            start: Position::new(line, column),
            end: Position::new(line, column + length),
        }
    }

    /// Inclusive of both ends, so a cursor sitting just after a word still hits it.
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }
}
