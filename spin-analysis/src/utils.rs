use crate::position::{Position, Range};
use crate::strip::code_view;
use crate::tokenizer::{is_name_char, starts_like_name};

/// An identifier found under a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierAt<'a> {
    /// The name as written, including a `.` or `:` local-label prefix.
    pub name: &'a str,
    pub range: Range,
    /// The `method` of `obj.method` or the `CONST` of `obj#CONST`.
    pub is_member: bool,
}

impl<'a> IdentifierAt<'a> {
    /// The name without its local-label prefix.
    pub fn bare(&self) -> &'a str {
        self.name.trim_start_matches(['.', ':'])
    }
}

/// Lines of `text`, split at `\r\n`, `\n` or a lone `\r`.
///
/// As with [`str::lines`], a terminator at the very end does not start another line.
pub fn source_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = Some(text).filter(|text| !text.is_empty());
    std::iter::from_fn(move || {
        let current = rest?;
        let Some(end) = current.find(['\r', '\n']) else {
            rest = None;
            return Some(current);
        };
        let tail = current.get(end..).unwrap_or("");
        let terminator = if tail.starts_with("\r\n") { 2 } else { 1 };
        rest = tail.get(terminator..).filter(|next| !next.is_empty());
        current.get(..end)
    })
}

/// Returns the text of line `line`, without its line terminator.
pub fn line_text(text: &str, line: usize) -> Option<&str> {
    source_lines(text).nth(line)
}

/// Finds the identifier touching `position`.
///
/// A position on the character just past a word still selects it. Nothing is returned when the
/// position falls in a comment or a string literal, or when the word under it is a number.
/// A `.` or `:` directly in front of the word is kept as part of the name, matching how local
/// assembly labels are declared.
pub fn identifier_at(text: &str, position: Position) -> Option<IdentifierAt<'_>> {
    let line = line_text(text, position.line)?;
    let view = code_view(line);
    let bytes = view.as_bytes();
    let column = position.column.min(bytes.len());

    let touches = |at: usize| bytes.get(at).is_some_and(|&b| is_name_char(char::from(b)));
    let anchor = if touches(column) {
        column
    } else if column > 0 && touches(column - 1) {
        column - 1
    } else {
        return None;
    };
    let start = (0..anchor)
        .rev()
        .take_while(|&at| touches(at))
        .last()
        .unwrap_or(anchor);
    let end = (anchor..bytes.len())
        .find(|&at| !touches(at))
        .unwrap_or(bytes.len());
    let word = line.get(start..end)?;
    let before = start.checked_sub(1).map(|at| bytes[at]);
    if matches!(before, Some(b'$' | b'%')) || !starts_like_name(word) {
        return None;
    }

    let after_name = start >= 2 && touches(start - 2);
    let is_member = matches!(before, Some(b'.' | b'#')) && after_name;
    let prefixed = matches!(before, Some(b'.' | b':')) && !after_name;
    let start = if prefixed { start - 1 } else { start };
    let name = line.get(start..end)?;
    Some(IdentifierAt {
        name,
        range: Range::on_line(position.line, start, end - start),
        is_member,
    })
}
