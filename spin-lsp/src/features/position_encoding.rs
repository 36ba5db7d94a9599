//! Byte columns from the analyzer versus UTF-16 characters on the wire.
//!
//! The analyzer reports byte offsets within a line. LSP clients count UTF-16 code units unless a
//! different encoding was negotiated, which this server never does. Sources are mostly ASCII,
//! where both agree, but a stray `é` in a comment must not shift every token after it.

use spin_analysis::utils::source_lines;
use spin_analysis::{Position as SpinPosition, Range as SpinRange};
use tower_lsp::lsp_types::{Position, Range};

/// Lines of one document, for column conversions in both directions.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    lines: Vec<&'a str>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: source_lines(text).collect(),
        }
    }

    fn line(&self, line: usize) -> &'a str {
        self.lines.get(line).copied().unwrap_or_default()
    }

    /// UTF-16 length of the first `column` bytes of `line`, clamped to the line.
    pub fn utf16_column(&self, line: usize, column: usize) -> u32 {
        let text = self.line(line);
        let column = column.min(text.len());
        let prefix = (0..=column)
            .rev()
            .find_map(|end| text.get(..end))
            .unwrap_or_default();
        prefix.encode_utf16().count() as u32
    }

    /// Byte column of UTF-16 `character` on `line`. Positions past the end clamp to it.
    pub fn byte_column(&self, line: usize, character: u32) -> usize {
        let text = self.line(line);
        let mut units = 0u32;
        for (index, ch) in text.char_indices() {
            if units >= character {
                return index;
            }
            units += ch.len_utf16() as u32;
        }
        text.len()
    }

    pub fn to_lsp_position(&self, position: SpinPosition) -> Position {
        Position::new(
            position.line as u32,
            self.utf16_column(position.line, position.column),
        )
    }

    pub fn to_lsp_range(&self, range: SpinRange) -> Range {
        Range::new(self.to_lsp_position(range.start), self.to_lsp_position(range.end))
    }

    pub fn from_lsp_position(&self, position: Position) -> SpinPosition {
        let line = position.line as usize;
        SpinPosition::new(line, self.byte_column(line, position.character))
    }
}
