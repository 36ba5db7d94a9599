//! Section and sub-state tracking.
//!
//! The language has no block delimiters: a section runs from its keyword line to the next one,
//! and assembly or comment sub-states are entered and left on keyword and brace cues. The
//! tracker sees every line once, in order, and tells the caller what to do with it.

use tracing::trace;

use crate::strip::code_view;
use crate::tokenizer::first_word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    Unknown,
    InConstants,
    InData,
    InObject,
    InPublicMethod,
    InPrivateMethod,
    InVariables,
    InInlineAsm,
    InDataAsm,
    InBlockComment,
    InDocComment,
    InNothing,
}

impl ParseState {
    pub fn is_method(self) -> bool {
        matches!(self, ParseState::InPublicMethod | ParseState::InPrivateMethod)
    }

    pub fn is_comment(self) -> bool {
        matches!(self, ParseState::InBlockComment | ParseState::InDocComment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Con,
    Dat,
    Obj,
    Pub,
    Pri,
    Var,
}

impl Section {
    pub fn from_keyword(word: &str) -> Option<Self> {
        const KEYWORDS: [(&str, Section); 6] = [
            ("con", Section::Con),
            ("dat", Section::Dat),
            ("obj", Section::Obj),
            ("pub", Section::Pub),
            ("pri", Section::Pri),
            ("var", Section::Var),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| word.eq_ignore_ascii_case(keyword))
            .map(|&(_, section)| section)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Section::Con => "CON",
            Section::Dat => "DAT",
            Section::Obj => "OBJ",
            Section::Pub => "PUB",
            Section::Pri => "PRI",
            Section::Var => "VAR",
        }
    }

    pub fn state(self) -> ParseState {
        match self {
            Section::Con => ParseState::InConstants,
            Section::Dat => ParseState::InData,
            Section::Obj => ParseState::InObject,
            Section::Pub => ParseState::InPublicMethod,
            Section::Pri => ParseState::InPrivateMethod,
            Section::Var => ParseState::InVariables,
        }
    }

    pub fn is_method(self) -> bool {
        matches!(self, Section::Pub | Section::Pri)
    }
}

/// The section a line opens, if any.
///
/// The keyword must sit in the first column and end at whitespace, a comment marker or the end
/// of the line.
pub fn section_start(line: &str) -> Option<Section> {
    let keyword = line.get(..3)?;
    let section = Section::from_keyword(keyword)?;
    match line[3..].chars().next() {
        None => Some(section),
        Some(ch) if ch.is_whitespace() || ch == '\'' || ch == '{' => Some(section),
        Some(_) => None,
    }
}

/// What the caller should do with one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDisposition {
    /// Comment, blank, or a sub-state marker line with nothing to scan.
    Skip,
    /// Scan the line from byte `start` under `state`. `section` is set on section-start lines.
    Code {
        state: ParseState,
        start: usize,
        section: Option<Section>,
    },
}

/// Current, comment-resume and assembly-resume states.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    current: ParseState,
    prior: ParseState,
    pre_asm: ParseState,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionTracker {
    /// Starts in CON, the default section.
    pub fn new() -> Self {
        Self {
            current: ParseState::InConstants,
            prior: ParseState::InConstants,
            pre_asm: ParseState::InConstants,
        }
    }

    pub fn state(&self) -> ParseState {
        self.current
    }

    fn enter(&mut self, index: usize, state: ParseState) {
        if state != self.current {
            trace!(line = index, from = ?self.current, to = ?state, "state change");
            self.current = state;
        }
    }

    /// Feed the next line, in document order.
    pub fn advance(&mut self, index: usize, line: &str) -> LineDisposition {
        match self.current {
            ParseState::InBlockComment => {
                if closes_block_comment(line) {
                    self.enter(index, self.prior);
                }
                return LineDisposition::Skip;
            }
            ParseState::InDocComment => {
                if line.contains("}}") {
                    self.enter(index, self.prior);
                }
                return LineDisposition::Skip;
            }
            _ => {}
        }

        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('\'') {
            return LineDisposition::Skip;
        }

        if let Some(section) = section_start(line) {
            self.enter(index, section.state());
            let mut state = section.state();
            if section == Section::Dat && has_org_token(&line[3..]) {
                self.pre_asm = state;
                state = ParseState::InDataAsm;
                self.enter(index, state);
            }
            return LineDisposition::Code {
                state,
                start: 3,
                section: Some(section),
            };
        }

        if let Some(rest) = trimmed.strip_prefix("{{") {
            if !rest.contains("}}") {
                self.prior = self.current;
                self.enter(index, ParseState::InDocComment);
                return LineDisposition::Skip;
            }
        } else if trimmed.starts_with('{') && !closes_block_comment(&trimmed[1..]) {
            self.prior = self.current;
            self.enter(index, ParseState::InBlockComment);
            return LineDisposition::Skip;
        }

        let view = code_view(line);
        let first = first_word(&view);
        match self.current {
            ParseState::InData if has_org_token(&view) => {
                self.pre_asm = self.current;
                self.enter(index, ParseState::InDataAsm);
            }
            ParseState::InDataAsm if first.is_some_and(|word| word.eq_ignore_ascii_case("fit")) => {
                self.enter(index, self.pre_asm);
                return LineDisposition::Skip;
            }
            state if state.is_method() && first.is_some_and(|word| word.eq_ignore_ascii_case("org")) => {
                self.pre_asm = self.current;
                self.enter(index, ParseState::InInlineAsm);
                return LineDisposition::Skip;
            }
            ParseState::InInlineAsm if first.is_some_and(|word| word.eq_ignore_ascii_case("end")) => {
                self.enter(index, self.pre_asm);
                return LineDisposition::Skip;
            }
            _ => {}
        }

        LineDisposition::Code {
            state: self.current,
            start: 0,
            section: None,
        }
    }
}

fn has_org_token(code: &str) -> bool {
    code_view(code).split_whitespace().any(|word| {
        ["org", "orgf", "orgh"]
            .iter()
            .any(|directive| word.eq_ignore_ascii_case(directive))
    })
}

/// True when `text` holds a `}` that is not matched by an earlier `{` on the same text.
fn closes_block_comment(text: &str) -> bool {
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return true,
            '}' => depth -= 1,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(text: &str) -> Vec<Option<ParseState>> {
        let mut tracker = SectionTracker::new();
        text.lines()
            .enumerate()
            .map(|(index, line)| match tracker.advance(index, line) {
                LineDisposition::Skip => None,
                LineDisposition::Code { state, .. } => Some(state),
            })
            .collect()
    }

    #[test]
    fn section_keywords_must_start_the_line() {
        assert_eq!(section_start("PUB main()"), Some(Section::Pub));
        assert_eq!(section_start("dat"), Some(Section::Dat));
        assert_eq!(section_start("con' settings"), Some(Section::Con));
        assert_eq!(section_start("  PUB main()"), None);
        assert_eq!(section_start("pubsub := 1"), None);
        assert_eq!(section_start("ob"), None);
    }

    #[test]
    fn starts_in_constants() {
        assert_eq!(states("FOO = 1"), vec![Some(ParseState::InConstants)]);
    }

    #[test]
    fn block_comment_resumes_prior_state() {
        let text = "VAR\n{ open\n  still comment }\n  long x";
        assert_eq!(
            states(text),
            vec![Some(ParseState::InVariables), None, None, Some(ParseState::InVariables)]
        );
    }

    #[test]
    fn closed_braces_do_not_open_a_comment() {
        let text = "CON\n{ note } FOO = 1\n{{ doc }}";
        assert_eq!(
            states(text),
            vec![Some(ParseState::InConstants), Some(ParseState::InConstants), Some(ParseState::InConstants)]
        );
    }

    #[test]
    fn nested_single_line_braces_do_not_close_the_comment() {
        let text = "CON\n{\n  see {this}\n}\n  A = 1";
        assert_eq!(
            states(text),
            vec![Some(ParseState::InConstants), None, None, None, Some(ParseState::InConstants)]
        );
    }

    #[test]
    fn doc_comment_needs_double_close() {
        let text = "DAT\n{{\n  }\n}}\nx long 0";
        assert_eq!(
            states(text),
            vec![Some(ParseState::InData), None, None, None, Some(ParseState::InData)]
        );
    }

    #[test]
    fn dat_assembly_runs_from_org_to_fit() {
        let text = "DAT\n        org 0\nentry   mov x, #1\n        fit 496\nbuf     long 0";
        assert_eq!(
            states(text),
            vec![
                Some(ParseState::InData),
                Some(ParseState::InDataAsm),
                Some(ParseState::InDataAsm),
                None,
                Some(ParseState::InData),
            ]
        );
    }

    #[test]
    fn org_inside_a_string_does_not_start_assembly() {
        let text = "DAT\nmsg byte \"org\", 0\nx long 0";
        assert_eq!(states(text)[2], Some(ParseState::InData));
    }

    #[test]
    fn dat_keyword_line_with_org_enters_assembly() {
        let text = "DAT org\nentry mov x, #1";
        assert_eq!(states(text), vec![Some(ParseState::InDataAsm), Some(ParseState::InDataAsm)]);
    }

    #[test]
    fn inline_assembly_resumes_method_state() {
        let text = "PRI spin()\n  org\nloop  jmp #loop\n  end\n  x := 1";
        assert_eq!(
            states(text),
            vec![
                Some(ParseState::InPrivateMethod),
                None,
                Some(ParseState::InInlineAsm),
                None,
                Some(ParseState::InPrivateMethod),
            ]
        );
    }

    #[test]
    fn orgh_does_not_open_inline_assembly() {
        let text = "PUB go()\n  orgh\n  x := 1";
        assert_eq!(states(text)[1], Some(ParseState::InPublicMethod));
    }

    #[test]
    fn unterminated_comment_swallows_the_rest() {
        let text = "CON\n{ never closed\nPUB main()\n  x := 1";
        assert_eq!(states(text), vec![Some(ParseState::InConstants), None, None, None]);
    }
}
