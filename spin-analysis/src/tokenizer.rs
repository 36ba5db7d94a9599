//! Offset-tracking line tokenizer.
//!
//! Tokens are cut from a column-preserving code view (see [`crate::strip::code_view`]) and carry
//! the byte column where they start, so nothing ever has to be searched for again in the raw
//! line. Which punctuation separates tokens depends on the kind of line being read.

/// Punctuation policy for one tokenizing pass. Space and tab always separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Whitespace only.
    General,
    /// Constant expressions: parentheses plus arithmetic and comparison operators.
    Constant,
    /// Assembly operands: commas, brackets, operators, `#`, `@` and `/`.
    Assembly,
    /// Data initializers: commas, brackets, parentheses, `|`, `*` and `@`.
    DataInit,
    /// Method-body code: everything an expression can be glued together with except `.`.
    MethodBody,
    /// Comma separated lists.
    CommaList,
    /// Spin2 `debug()` statements, where `` ` `` prefixes display names and formatters.
    Debug,
}

impl SplitPolicy {
    fn punctuation(self) -> &'static str {
        match self {
            SplitPolicy::General => "",
            SplitPolicy::Constant => "()*+-/><=",
            SplitPolicy::Assembly => ",()[]<>=?!^+*&|-\\#@/",
            SplitPolicy::DataInit => ",[]()+-/<>|*@",
            SplitPolicy::MethodBody => "-:,+[]@()!*=<>&|?\\~#^/",
            SplitPolicy::CommaList => ",",
            SplitPolicy::Debug => ",@[]+-*/<>()!?~",
        }
    }

    pub fn is_separator(self, ch: char) -> bool {
        ch == ' ' || ch == '\t' || self.punctuation().contains(ch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineToken<'a> {
    pub text: &'a str,
    /// Byte column of the first character in the raw line.
    pub column: usize,
}

impl LineToken<'_> {
    pub fn end(&self) -> usize {
        self.column + self.text.len()
    }
}

/// Split `code` under `policy`. `base` is the column at which `code` starts in the raw line.
pub fn tokenize(code: &str, base: usize, policy: SplitPolicy) -> Vec<LineToken<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (index, ch) in code.char_indices() {
        if policy.is_separator(ch) {
            if let Some(begin) = start.take() {
                tokens.push(LineToken {
                    text: &code[begin..index],
                    column: base + begin,
                });
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(begin) = start {
        tokens.push(LineToken {
            text: &code[begin..],
            column: base + begin,
        });
    }
    tokens
}

/// Tokens of `code[from..to]` with columns relative to the raw line. Out-of-range bounds
/// produce no tokens.
pub fn tokenize_span(code: &str, from: usize, to: usize, policy: SplitPolicy) -> Vec<LineToken<'_>> {
    match code.get(from..to.min(code.len())) {
        Some(span) => tokenize(span, from, policy),
        None => Vec::new(),
    }
}

/// Comma separated pieces of `code` with surrounding whitespace removed. Commas inside
/// brackets or parentheses do not split. Empty pieces are kept so positions stay countable.
pub fn split_top_level(code: &str, base: usize, separator: char) -> Vec<LineToken<'_>> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0;
    for (index, ch) in code.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                pieces.push(trimmed_piece(code, begin, index, base));
                begin = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(trimmed_piece(code, begin, code.len(), base));
    pieces
}

fn trimmed_piece(code: &str, begin: usize, end: usize, base: usize) -> LineToken<'_> {
    let raw = &code[begin..end];
    let leading = raw.len() - raw.trim_start().len();
    LineToken {
        text: raw.trim(),
        column: base + begin + leading,
    }
}

/// First whitespace-delimited word of a line.
pub fn first_word(code: &str) -> Option<&str> {
    code.split_whitespace().next()
}

/// True when `text` starts with a character that can begin a name.
pub fn starts_like_name(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_')
}

/// True when `ch` can continue a name.
pub fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Leading run of name characters in `text`.
pub fn leading_name(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|&(_, ch)| !is_name_char(ch))
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    &text[..end]
}

/// How a member is attached to the name before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// `obj.method`, `var.byte`
    Dot,
    /// `obj#CONSTANT`
    Hash,
}

/// A name found inside a token, with at most one level of member access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRef<'a> {
    pub name: LineToken<'a>,
    pub member: Option<(Accessor, LineToken<'a>)>,
}

/// Names inside `token`.
///
/// Runs of name characters that start with a digit, or follow `$` or `%`, are number literals
/// and are skipped. A run directly preceded by a lone `.` or `:` keeps that prefix, which is how
/// local assembly labels are spelled. Anything after a member is ignored.
pub fn name_refs(token: LineToken<'_>) -> Vec<NameRef<'_>> {
    let text = token.text;
    let bytes = text.as_bytes();
    let is_name_byte = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let run_end = |from: usize| {
        (from..bytes.len())
            .find(|&index| !is_name_byte(bytes[index]))
            .unwrap_or(bytes.len())
    };
    let piece = |from: usize, to: usize| LineToken {
        text: &text[from..to],
        column: token.column + from,
    };

    let mut refs = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        if !is_name_byte(bytes[index]) {
            index += 1;
            continue;
        }
        let start = index;
        index = run_end(start);
        let before = start.checked_sub(1).map(|at| bytes[at]);
        if matches!(before, Some(b'$' | b'%')) || !starts_like_name(&text[start..index]) {
            continue;
        }
        let local_prefix = matches!(before, Some(b'.' | b':'))
            && (start < 2 || !is_name_byte(bytes[start - 2]));
        let begin = if local_prefix { start - 1 } else { start };

        let accessor = match bytes.get(index) {
            Some(b'.') => Some(Accessor::Dot),
            Some(b'#') => Some(Accessor::Hash),
            _ => None,
        };
        let member = accessor.and_then(|accessor| {
            let from = index + 1;
            let to = run_end(from);
            starts_like_name(&text[from..to]).then(|| (accessor, piece(from, to)))
        });
        let name = piece(begin, index);
        if let Some((_, member_token)) = member {
            index = member_token.end() - token.column;
            while index < bytes.len() && (is_name_byte(bytes[index]) || bytes[index] == b'.') {
                index += 1;
            }
        }
        refs.push(NameRef { name, member });
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[LineToken<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|token| token.text).collect()
    }

    #[test]
    fn general_splits_on_whitespace_only() {
        let tokens = tokenize("  loop\tdjnz  count,#loop", 0, SplitPolicy::General);
        assert_eq!(texts(&tokens), vec!["loop", "djnz", "count,#loop"]);
        assert_eq!(tokens[1].column, 7);
    }

    #[test]
    fn assembly_strips_immediates() {
        let tokens = tokenize("djnz  count,#loop", 0, SplitPolicy::Assembly);
        assert_eq!(texts(&tokens), vec!["djnz", "count", "loop"]);
        assert_eq!(tokens[2].column, 13);
    }

    #[test]
    fn constant_policy_keeps_commas_and_hashes() {
        let tokens = tokenize("#0, A, B", 0, SplitPolicy::Constant);
        assert_eq!(texts(&tokens), vec!["#0,", "A,", "B"]);
        let tokens = tokenize("SIZE = (A+B)*2", 10, SplitPolicy::Constant);
        assert_eq!(texts(&tokens), vec!["SIZE", "A", "B", "2"]);
        assert_eq!(tokens[1].column, 18);
    }

    #[test]
    fn method_body_keeps_dotted_names() {
        let tokens = tokenize("ser.str(@msg)", 4, SplitPolicy::MethodBody);
        assert_eq!(texts(&tokens), vec!["ser.str", "msg"]);
        assert_eq!(tokens[1].column, 13);
    }

    #[test]
    fn repeated_short_names_keep_their_own_columns() {
        let line = "a := a + aa";
        let tokens = tokenize(line, 0, SplitPolicy::MethodBody);
        let columns: Vec<usize> = tokens.iter().map(|token| token.column).collect();
        assert_eq!(columns, vec![0, 5, 9]);
    }

    #[test]
    fn span_tokenizing_reports_absolute_columns() {
        let code = "PUB go(a, b)";
        let tokens = tokenize_span(code, 7, 11, SplitPolicy::CommaList);
        assert_eq!(texts(&tokens), vec!["a", "b"]);
        assert_eq!(tokens[1].column, 10);
        assert!(tokenize_span(code, 40, 50, SplitPolicy::General).is_empty());
    }

    #[test]
    fn top_level_split_ignores_nested_commas() {
        let pieces = split_top_level(" buf[MAX(1,2)], y ", 3, ',');
        assert_eq!(texts(&pieces), vec!["buf[MAX(1,2)]", "y"]);
        assert_eq!(pieces[1].column, 19);
    }

    #[test]
    fn name_helpers() {
        assert!(starts_like_name("_tmp"));
        assert!(!starts_like_name("1st"));
        assert!(!starts_like_name(""));
        assert_eq!(leading_name("buf[3]"), "buf");
    }

    fn names(text: &str) -> Vec<(&str, Option<&str>)> {
        name_refs(LineToken { text, column: 0 })
            .into_iter()
            .map(|found| (found.name.text, found.member.map(|(_, member)| member.text)))
            .collect()
    }

    #[test]
    fn name_refs_skip_number_literals() {
        assert_eq!(names("$FF+%1010+12_000+x"), vec![("x", None)]);
        assert!(names("1.5").is_empty());
    }

    #[test]
    fn name_refs_split_one_member_level() {
        assert_eq!(names("ser.str"), vec![("ser", Some("str"))]);
        assert_eq!(names("a.b.c+d"), vec![("a", Some("b")), ("d", None)]);
        let found = name_refs(LineToken { text: "clk#FREQ", column: 4 });
        assert_eq!(found[0].member, Some((Accessor::Hash, LineToken { text: "FREQ", column: 8 })));
    }

    #[test]
    fn name_refs_keep_local_label_prefix() {
        assert_eq!(names("#.loop"), vec![(".loop", None)]);
        assert_eq!(names(":next"), vec![(":next", None)]);
    }
}
