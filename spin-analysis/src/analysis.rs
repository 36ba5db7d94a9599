//! The result of one analysis run and the entry points that produce it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::builtins::BuiltinEntry;
use crate::position::{Position, Range};
use crate::resolve::{Resolved, Scope, SymbolResolver, TokenKind};
use crate::scanner;
use crate::state::Section;
use crate::symbols::{Modifiers, PasmLabelRegistry, Symbol, SymbolTable};
use crate::vocabulary::{Dialect, Vocabulary};

/// One classified identifier occurrence. Columns are byte offsets in the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedToken {
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub kind: TokenKind,
    pub modifiers: Modifiers,
}

impl ClassifiedToken {
    pub fn range(&self) -> Range {
        Range::new(
            Position::new(self.line, self.column),
            Position::new(self.line, self.column + self.length),
        )
    }
}

/// A PUB or PRI method as it was seen by the classifier.
#[derive(Debug, Clone)]
pub struct MethodScope {
    pub name: String,
    pub section: Section,
    /// Line of the PUB/PRI keyword.
    pub line: usize,
    /// Last line before the next section starts.
    pub end_line: usize,
    /// Parameters, return values and locals.
    pub locals: SymbolTable,
}

impl MethodScope {
    pub fn contains_line(&self, line: usize) -> bool {
        (self.line..=self.end_line).contains(&line)
    }
}

/// A section from its keyword line to the line before the next keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: Section,
    pub line: usize,
    pub end_line: usize,
    /// `{...}` or `'` comment following the keyword, verbatim.
    pub comment: Option<String>,
}

/// Symbols and classified tokens of one document.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub(crate) dialect: Dialect,
    pub(crate) global: SymbolTable,
    pub(crate) tokens: Vec<ClassifiedToken>,
    pub(crate) scopes: Vec<MethodScope>,
    pub(crate) pasm_labels: PasmLabelRegistry,
    pub(crate) sections: Vec<SectionSpan>,
    pub(crate) language_version: Option<u32>,
}

impl Analysis {
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn vocabulary(&self) -> &'static Vocabulary {
        self.dialect.vocabulary()
    }

    pub fn global(&self) -> &SymbolTable {
        &self.global
    }

    /// Classified tokens in emission order.
    pub fn tokens(&self) -> &[ClassifiedToken] {
        &self.tokens
    }

    pub fn scopes(&self) -> &[MethodScope] {
        &self.scopes
    }

    pub fn sections(&self) -> &[SectionSpan] {
        &self.sections
    }

    pub fn pasm_labels(&self) -> &PasmLabelRegistry {
        &self.pasm_labels
    }

    /// `NN` of the first `{Spin2_vNN}` directive in a Spin2 document.
    pub fn language_version(&self) -> Option<u32> {
        self.language_version
    }

    /// Document-wide symbol named `name`, any case.
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.global.get(name)
    }

    pub fn is_known_symbol(&self, name: &str) -> bool {
        self.global.contains(name)
    }

    pub fn is_builtin(&self, name: &str) -> Option<BuiltinEntry> {
        self.vocabulary().builtin(name)
    }

    /// The method whose section covers `line`.
    pub fn scope_at_line(&self, line: usize) -> Option<&MethodScope> {
        self.scopes.iter().find(|scope| scope.contains_line(line))
    }

    /// Method-level tables visible from `line`.
    pub fn scope_for_line(&self, line: usize) -> Scope<'_> {
        match self.scope_at_line(line) {
            Some(method) => Scope {
                pasm_labels: self.pasm_labels.labels_for(&method.name),
                locals: Some(&method.locals),
            },
            None => Scope::default(),
        }
    }

    /// Resolve `name` the way the classifier would on `line`.
    pub fn resolve_at_line(&self, name: &str, line: usize) -> Option<Resolved<'_>> {
        let scope = self.scope_for_line(line);
        SymbolResolver::new(&self.global, self.vocabulary()).resolve(name, &scope)
    }
}

/// Polled between lines; a `true` answer abandons the run.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Cancellation + ?Sized> Cancellation for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Runs the two-pass scan for one dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    dialect: Dialect,
}

impl Analyzer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        scanner::scan(text, self.dialect, &NeverCancel).unwrap_or_else(|| Analysis {
            dialect: self.dialect,
            global: SymbolTable::new(),
            tokens: Vec::new(),
            scopes: Vec::new(),
            pasm_labels: PasmLabelRegistry::default(),
            sections: Vec::new(),
            language_version: None,
        })
    }

    /// `None` when `cancel` fired before both passes finished.
    pub fn analyze_with_cancellation<C>(&self, text: &str, cancel: &C) -> Option<Analysis>
    where
        C: Cancellation + ?Sized,
    {
        scanner::scan(text, self.dialect, cancel)
    }
}

/// Analyze `text` as Spin2.
pub fn analyze(text: &str) -> Analysis {
    Analyzer::default().analyze(text)
}

pub fn analyze_with_cancellation<C>(text: &str, dialect: Dialect, cancel: &C) -> Option<Analysis>
where
    C: Cancellation + ?Sized,
{
    Analyzer::new(dialect).analyze_with_cancellation(text, cancel)
}
