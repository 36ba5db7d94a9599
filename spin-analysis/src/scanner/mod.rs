//! The two-pass scan.
//!
//! Both passes are the same traversal: a fresh [`SectionTracker`] walks the lines and each
//! line is handed to the handler for its section. In the declare pass handlers only fill the
//! symbol tables. In the classify pass the same handlers run again, inserts turn into no-ops, and
//! every declaration and resolvable reference is emitted as a [`ClassifiedToken`].
//!
//! All run state lives in one [`Session`] built per call, so nothing leaks between runs.

mod con;
mod dat;
mod display;
mod method;
mod obj;
mod pasm;
mod var;

use tracing::debug;

use crate::analysis::{Analysis, Cancellation, ClassifiedToken, MethodScope, SectionSpan};
use crate::resolve::{ResolutionTier, Scope, SymbolResolver, TokenKind};
use crate::state::{LineDisposition, ParseState, Section, SectionTracker};
use crate::strip::{code_view, trailing_comment};
use crate::symbols::{Modifier, Modifiers, PasmLabelRegistry, Symbol, SymbolKind, SymbolTable};
use crate::tokenizer::{first_word, name_refs, tokenize, Accessor, LineToken, SplitPolicy};
use crate::utils::source_lines;
use crate::vocabulary::{Dialect, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Declare,
    Classify,
}

/// Where a declaration is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Global,
    Local,
    /// Labels of the current method's inline assembly.
    Pasm,
}

/// One line as seen by a section handler.
struct Line<'a> {
    index: usize,
    raw: &'a str,
    /// Column-preserving code copy of `raw`.
    view: &'a str,
    /// Where the handler's text starts; past the keyword on section lines.
    start: usize,
}

impl<'a> Line<'a> {
    fn code(&self) -> &'a str {
        self.view.get(self.start..).unwrap_or("")
    }

    fn tokens(&self, policy: SplitPolicy) -> Vec<LineToken<'a>> {
        tokenize(self.code(), self.start, policy)
    }

    fn char_at(&self, column: usize) -> Option<char> {
        self.view.get(column..)?.chars().next()
    }

    fn comment(&self) -> Option<&'a str> {
        trailing_comment(self.raw)
    }
}

struct Session {
    vocabulary: &'static Vocabulary,
    phase: Phase,
    global: SymbolTable,
    local: SymbolTable,
    pasm_labels: PasmLabelRegistry,
    current_method: Option<String>,
    in_method: bool,
    tokens: Vec<ClassifiedToken>,
    scopes: Vec<MethodScope>,
    sections: Vec<SectionSpan>,
    open_section: Option<SectionSpan>,
    open_method: Option<(String, Section, usize)>,
    language_version: Option<u32>,
}

pub(crate) fn scan<C>(text: &str, dialect: Dialect, cancel: &C) -> Option<Analysis>
where
    C: Cancellation + ?Sized,
{
    let lines: Vec<&str> = source_lines(text).collect();
    let mut session = Session::new(dialect.vocabulary());
    for phase in [Phase::Declare, Phase::Classify] {
        session.begin_pass(phase);
        let mut tracker = SectionTracker::new();
        for (index, raw) in lines.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!(line = index, ?phase, "analysis cancelled");
                return None;
            }
            let disposition = tracker.advance(index, raw);
            session.visit(index, raw, disposition);
        }
        session.close_section(lines.len());
    }
    debug!(
        %dialect,
        lines = lines.len(),
        symbols = session.global.len(),
        tokens = session.tokens.len(),
        "analysis complete"
    );
    Some(Analysis {
        dialect,
        global: session.global,
        tokens: session.tokens,
        scopes: session.scopes,
        pasm_labels: session.pasm_labels,
        sections: session.sections,
        language_version: session.language_version,
    })
}

impl Session {
    fn new(vocabulary: &'static Vocabulary) -> Self {
        Self {
            vocabulary,
            phase: Phase::Declare,
            global: SymbolTable::new(),
            local: SymbolTable::new(),
            pasm_labels: PasmLabelRegistry::default(),
            current_method: None,
            in_method: false,
            tokens: Vec::new(),
            scopes: Vec::new(),
            sections: Vec::new(),
            open_section: None,
            open_method: None,
            language_version: None,
        }
    }

    fn begin_pass(&mut self, phase: Phase) {
        self.phase = phase;
        self.local.clear();
        self.current_method = None;
        self.in_method = false;
    }

    fn classifying(&self) -> bool {
        self.phase == Phase::Classify
    }

    fn visit(&mut self, index: usize, raw: &str, disposition: LineDisposition) {
        let LineDisposition::Code { state, start, section } = disposition else {
            return;
        };
        if let Some(section) = section {
            self.open_section(index, raw, section);
        }
        self.in_method = state.is_method() || state == ParseState::InInlineAsm;
        if self.language_version.is_none() && self.vocabulary.dialect == Dialect::Spin2 {
            self.language_version = language_version(raw);
        }

        let view = code_view(raw);
        let line = Line {
            index,
            raw,
            view: &view,
            start,
        };
        if first_word(line.code()).is_some_and(|word| self.vocabulary.is_preprocessor_directive(word)) {
            return;
        }
        match state {
            ParseState::InConstants => con::scan(self, &line),
            ParseState::InData => dat::scan(self, &line),
            ParseState::InDataAsm => pasm::scan_data(self, &line),
            ParseState::InObject => obj::scan(self, &line),
            ParseState::InVariables => var::scan(self, &line),
            ParseState::InPublicMethod | ParseState::InPrivateMethod => match section {
                Some(section) => method::signature(self, &line, section),
                None => method::body(self, &line),
            },
            ParseState::InInlineAsm => pasm::scan_inline(self, &line),
            _ => {}
        }
    }

    fn open_section(&mut self, index: usize, raw: &str, section: Section) {
        if self.classifying() {
            self.close_section(index);
        }
        self.current_method = None;
        if section.is_method() {
            self.local.clear();
        }
        if !self.classifying() {
            return;
        }
        let rest = raw.get(3..).unwrap_or("").trim();
        let comment = if rest.starts_with('\'') || rest.starts_with('{') {
            Some(rest.to_string())
        } else {
            trailing_comment(raw).map(|text| format!("' {text}"))
        };
        self.open_section = Some(SectionSpan {
            section,
            line: index,
            end_line: index,
            comment,
        });
    }

    /// Finish the open section and method scope; `next` is the line that ends them.
    fn close_section(&mut self, next: usize) {
        let end_line = next.saturating_sub(1);
        if let Some(mut span) = self.open_section.take() {
            span.end_line = end_line.max(span.line);
            self.sections.push(span);
        }
        if let Some((name, section, line)) = self.open_method.take() {
            self.scopes.push(MethodScope {
                name,
                section,
                line,
                end_line: end_line.max(line),
                locals: self.local.clone(),
            });
        }
    }

    /// Name the method whose section just opened.
    fn enter_method(&mut self, name: &str, section: Section, line: usize) {
        self.current_method = Some(name.to_string());
        if self.classifying() {
            self.open_method = Some((name.to_string(), section, line));
        }
    }

    /// Record `symbol`; in the classify pass also emit its declaration token. A name that was
    /// already taken keeps the first record, and the token shows that record's kind.
    fn declare(&mut self, table: Table, symbol: Symbol) {
        let name = symbol.name.clone();
        let mut token = ClassifiedToken {
            line: symbol.line,
            column: symbol.column,
            length: symbol.name.len(),
            kind: symbol.kind.into(),
            modifiers: symbol.modifiers,
        };
        match table {
            Table::Global => {
                self.global.declare(symbol);
            }
            Table::Local => {
                self.local.declare(symbol);
            }
            Table::Pasm => {
                if let Some(method) = &self.current_method {
                    self.pasm_labels.declare(method, symbol);
                }
            }
        }
        if !self.classifying() {
            return;
        }
        if let Some(recorded) = self.recorded(table, &name) {
            token.kind = recorded.kind.into();
            token.modifiers = recorded.modifiers;
        }
        token.modifiers = token.modifiers.with(Modifier::Declaration);
        self.tokens.push(token);
    }

    fn recorded(&self, table: Table, name: &str) -> Option<&Symbol> {
        match table {
            Table::Global => self.global.get(name),
            Table::Local => self.local.get(name),
            Table::Pasm => self
                .current_method
                .as_deref()
                .and_then(|method| self.pasm_labels.get(method, name)),
        }
    }

    /// True when `name` was declared as a `debug()` display.
    fn is_display(&self, name: &str) -> bool {
        self.global
            .get(name)
            .is_some_and(|symbol| symbol.kind == SymbolKind::DisplayName)
    }

    /// Emit `token` as a reference if it resolves. `extra` is added unless the match is a
    /// storage keyword.
    fn reference(&mut self, line: usize, token: LineToken<'_>, extra: Option<Modifier>) -> bool {
        if !self.classifying() {
            return false;
        }
        let found = {
            let scope = if self.in_method {
                Scope {
                    pasm_labels: self
                        .current_method
                        .as_deref()
                        .and_then(|method| self.pasm_labels.labels_for(method)),
                    locals: Some(&self.local),
                }
            } else {
                Scope::default()
            };
            SymbolResolver::new(&self.global, self.vocabulary)
                .resolve(token.text, &scope)
                .map(|resolved| (resolved.tier, resolved.kind, resolved.modifiers))
        };
        let Some((tier, kind, mut modifiers)) = found else {
            return false;
        };
        if let Some(extra) = extra.filter(|_| tier != ResolutionTier::StorageKeyword) {
            modifiers = modifiers.with(extra);
        }
        self.emit(line, token, kind, modifiers);
        true
    }

    /// Classify every name inside `token`. `extra` applies to the first name only.
    fn classify(&mut self, line: &Line<'_>, token: LineToken<'_>, extra: Option<Modifier>) {
        if !self.classifying() {
            return;
        }
        let mut extra = extra;
        for found in name_refs(token) {
            self.reference(line.index, found.name, extra.take());
            if let Some((accessor, member)) = found.member {
                self.member(line, accessor, member);
            }
        }
    }

    /// Classify each token of `tokens`.
    fn classify_all(&mut self, line: &Line<'_>, tokens: Vec<LineToken<'_>>) {
        for token in tokens {
            self.classify(line, token, None);
        }
    }

    /// The `B` of `A.B` or `A#B`, which is never looked up.
    fn member(&mut self, line: &Line<'_>, accessor: Accessor, member: LineToken<'_>) {
        let readonly = Modifiers::of(&[Modifier::Readonly]);
        let (kind, modifiers) = match accessor {
            Accessor::Hash => (TokenKind::Constant, readonly),
            Accessor::Dot if self.vocabulary.is_storage_type(member.text) => {
                (TokenKind::StorageType, Modifiers::NONE)
            }
            Accessor::Dot if line.char_at(member.end()) == Some('(') => (TokenKind::Method, Modifiers::NONE),
            Accessor::Dot => (TokenKind::Variable, readonly),
        };
        self.emit(line.index, member, kind, modifiers);
    }

    fn emit(&mut self, line: usize, token: LineToken<'_>, kind: TokenKind, modifiers: Modifiers) {
        self.tokens.push(ClassifiedToken {
            line,
            column: token.column,
            length: token.text.len(),
            kind,
            modifiers,
        });
    }
}

/// `NN` of a `{Spin2_vNN}` directive opening the line.
fn language_version(raw: &str) -> Option<u32> {
    let inner = raw.trim_start().strip_prefix('{')?;
    let word = inner.get(..inner.find('}')?)?.trim();
    let digits = word
        .get(..7)
        .filter(|head| head.eq_ignore_ascii_case("spin2_v"))
        .and(word.get(7..))?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Record of a declared name at `token`.
fn symbol_at(line: &Line<'_>, token: LineToken<'_>, kind: SymbolKind, modifiers: &[Modifier]) -> Symbol {
    Symbol::new(token.text, kind, Modifiers::of(modifiers), line.index, token.column)
}
