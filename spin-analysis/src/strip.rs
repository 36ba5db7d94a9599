//! Comment and string stripping for single source lines.
//!
//! Two shapes of output are produced. [`strip_comment`] returns the trimmed code text of a line
//! for places that only need the words. [`code_view`] returns a copy of the line in which string
//! interiors and closed `{...}` asides are blanked and the trailing comment is cut off; every byte
//! that survives keeps its column, so offsets found in the view index the raw line directly.

use std::borrow::Cow;

/// Written over every byte of a quoted string, quotes included.
pub const STRING_FILLER: u8 = b'#';

/// Overwrite each `"..."` span with [`STRING_FILLER`], keeping the line length.
///
/// An unterminated quote is left alone.
pub fn blank_strings(line: &str) -> Cow<'_, str> {
    if !line.contains('"') {
        return Cow::Borrowed(line);
    }
    let mut bytes = line.as_bytes().to_vec();
    let mut search = 0;
    while let Some(open) = find_byte(&bytes, b'"', search) {
        let Some(close) = find_byte(&bytes, b'"', open + 1) else {
            break;
        };
        bytes[open..=close].fill(STRING_FILLER);
        search = close + 1;
    }
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// Byte index of the comment marker that ends the code on this line.
///
/// `'` always starts a comment. `{` or `{{` starts one only when it is not closed later on the
/// same line; closed asides are stepped over.
pub fn comment_start(line: &str) -> Option<usize> {
    let blanked = blank_strings(line);
    let bytes = blanked.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\'' => return Some(index),
            b'{' => match aside_end(bytes, index) {
                Some(end) => index = end,
                None => return Some(index),
            },
            _ => {}
        }
        index += 1;
    }
    None
}

/// The trimmed code text of `line`, up to (not including) its comment marker.
pub fn strip_comment(line: &str) -> &str {
    let end = comment_start(line).unwrap_or(line.len());
    line.get(..end).unwrap_or(line).trim()
}

/// Delete the first closed `{...}` aside from already stripped code text.
///
/// Columns after the aside shift left, so this is only used for display text.
pub fn remove_inline_aside(text: &str) -> Cow<'_, str> {
    let Some(open) = text.find('{') else {
        return Cow::Borrowed(text);
    };
    match aside_end(text.as_bytes(), open) {
        Some(end) => {
            let mut joined = String::with_capacity(text.len());
            joined.push_str(&text[..open]);
            joined.push_str(text.get(end + 1..).unwrap_or(""));
            Cow::Owned(joined.trim().to_string())
        }
        None => Cow::Borrowed(text),
    }
}

/// The column-preserving code copy of `line` used by the tokenizer.
pub fn code_view(line: &str) -> String {
    let blanked = blank_strings(line);
    let mut bytes = blanked.as_bytes().to_vec();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\'' => {
                bytes.truncate(index);
                break;
            }
            b'{' => match aside_end(&bytes, index) {
                Some(end) => {
                    bytes[index..=end].fill(b' ');
                    index = end;
                }
                None => {
                    bytes.truncate(index);
                    break;
                }
            },
            _ => {}
        }
        index += 1;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// The column-preserving copy of a Spin2 `debug(...)` statement.
///
/// Inside the parentheses `'...'` is a string, not a comment, so both quote styles are filled
/// with [`STRING_FILLER`]. Everything after the closing parenthesis is blanked. `None` when the
/// line has no `debug(` ahead of its comment.
pub fn debug_view(line: &str) -> Option<String> {
    let blanked = blank_strings(line);
    let open = blanked.to_ascii_lowercase().find("debug(")? + "debug".len();
    if comment_start(line.get(..open)?).is_some() {
        return None;
    }
    let mut bytes = blanked.as_bytes().to_vec();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut end = bytes.len();
    for index in open..bytes.len() {
        let byte = bytes[index];
        if quoted || byte == b'\'' {
            if byte == b'\'' {
                quoted = !quoted;
            }
            bytes[index] = STRING_FILLER;
            continue;
        }
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    end = index + 1;
                    break;
                }
            }
            _ => {}
        }
    }
    bytes[end..].fill(b' ');
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Text of a trailing `'` comment, without its quote marks.
pub fn trailing_comment(line: &str) -> Option<&str> {
    let start = comment_start(line)?;
    let rest = line.get(start..)?;
    if !rest.starts_with('\'') {
        return None;
    }
    let text = rest.trim_start_matches('\'').trim();
    (!text.is_empty()).then_some(text)
}

/// Index of the last byte of a closed `{...}` or `{{...}}` aside opening at `open`.
fn aside_end(bytes: &[u8], open: usize) -> Option<usize> {
    if bytes.get(open + 1) == Some(&b'{') {
        find_pair(bytes, b'}', open + 2).map(|close| close + 1)
    } else {
        find_byte(bytes, b'}', open + 1)
    }
}

fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| offset + from)
}

fn find_pair(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(2)
        .position(|pair| pair[0] == needle && pair[1] == needle)
        .map(|offset| offset + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_blanked_in_place() {
        let line = r#"  byte "it's", 0"#;
        let blanked = blank_strings(line);
        assert_eq!(blanked.len(), line.len());
        assert_eq!(blanked, "  byte ######, 0");
    }

    #[test]
    fn unterminated_string_is_left_alone() {
        assert_eq!(blank_strings(r#"x "open"#), r#"x "open"#);
    }

    #[test]
    fn quote_inside_string_is_not_a_comment() {
        let line = r#"  msg byte "don't", 0   ' real comment"#;
        assert_eq!(strip_comment(line), r#"msg byte "don't", 0"#);
        assert_eq!(trailing_comment(line), Some("real comment"));
    }

    #[test]
    fn unclosed_brace_ends_the_code() {
        assert_eq!(strip_comment("  x := 1 { start of block"), "x := 1");
    }

    #[test]
    fn closed_aside_is_kept_by_strip_and_removed_by_aside_helper() {
        let stripped = strip_comment("  long a {size} , b ' tail");
        assert_eq!(stripped, "long a {size} , b");
        assert_eq!(remove_inline_aside(stripped), "long a  , b");
    }

    #[test]
    fn doc_aside_needs_double_close() {
        assert_eq!(strip_comment("x {{ a } b }} y"), "x {{ a } b }} y");
        assert_eq!(comment_start("x {{ a } b"), Some(2));
    }

    #[test]
    fn code_view_preserves_columns() {
        let line = "  mov {note} x, \"ab\" ' c";
        let view = code_view(line);
        assert_eq!(view, "  mov        x, #### ");
        assert_eq!(view.find('x'), line.find(" x").map(|i| i + 1));
    }

    #[test]
    fn debug_view_treats_single_quotes_as_strings() {
        let line = "  debug(`log 'a (b' , x) ' tail";
        let view = debug_view(line).expect("debug statement");
        assert_eq!(view.len(), line.len());
        assert_eq!(view, "  debug(`log ###### , x)       ");
        assert_eq!(debug_view("  x := 1 ' debug(`log)"), None);
        assert_eq!(debug_view("  pinhigh(3)"), None);
    }

    #[test]
    fn code_view_keeps_multibyte_text_outside_strings() {
        let line = "x := \"é\" + y";
        let view = code_view(line);
        assert_eq!(view.len(), line.len());
        assert_eq!(view.find('y'), line.find('y'));
    }
}
