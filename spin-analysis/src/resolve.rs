//! Reference resolution.
//!
//! A name is looked up through [`RESOLUTION_ORDER`], first hit wins:
//!
//! 1. labels of the inline assembly in the enclosing method
//! 2. parameters, return values and locals of the enclosing method
//! 3. document-wide symbols
//! 4. storage-type and alignment keywords
//!
//! Names that fall through every tier are left unclassified.

use crate::symbols::{Modifiers, Symbol, SymbolKind, SymbolTable};
use crate::vocabulary::Vocabulary;

/// Kind of a classified token: every symbol kind plus storage-type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Variable,
    Constant,
    EnumMember,
    Label,
    Method,
    Parameter,
    ReturnValue,
    Namespace,
    DisplayName,
    StorageType,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Variable => "variable",
            TokenKind::Constant => "constant",
            TokenKind::EnumMember => "enumMember",
            TokenKind::Label => "label",
            TokenKind::Method => "method",
            TokenKind::Parameter => "parameter",
            TokenKind::ReturnValue => "returnValue",
            TokenKind::Namespace => "namespace",
            TokenKind::DisplayName => "displayName",
            TokenKind::StorageType => "storageType",
        }
    }
}

impl From<SymbolKind> for TokenKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Variable => TokenKind::Variable,
            SymbolKind::Constant => TokenKind::Constant,
            SymbolKind::EnumMember => TokenKind::EnumMember,
            SymbolKind::Label => TokenKind::Label,
            SymbolKind::Method => TokenKind::Method,
            SymbolKind::Parameter => TokenKind::Parameter,
            SymbolKind::ReturnValue => TokenKind::ReturnValue,
            SymbolKind::Namespace => TokenKind::Namespace,
            SymbolKind::DisplayName => TokenKind::DisplayName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionTier {
    PasmLocal,
    Local,
    Global,
    StorageKeyword,
}

pub const RESOLUTION_ORDER: [ResolutionTier; 4] = [
    ResolutionTier::PasmLocal,
    ResolutionTier::Local,
    ResolutionTier::Global,
    ResolutionTier::StorageKeyword,
];

/// Method-level tables visible at a reference. Both are `None` outside PUB/PRI code.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope<'a> {
    pub pasm_labels: Option<&'a SymbolTable>,
    pub locals: Option<&'a SymbolTable>,
}

impl Scope<'static> {
    pub const NONE: Self = Scope {
        pasm_labels: None,
        locals: None,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub tier: ResolutionTier,
    pub kind: TokenKind,
    pub modifiers: Modifiers,
    /// The declaring symbol; `None` for keywords.
    pub symbol: Option<&'a Symbol>,
}

pub struct SymbolResolver<'a> {
    global: &'a SymbolTable,
    vocabulary: &'a Vocabulary,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(global: &'a SymbolTable, vocabulary: &'a Vocabulary) -> Self {
        Self { global, vocabulary }
    }

    pub fn resolve(&self, name: &str, scope: &Scope<'a>) -> Option<Resolved<'a>> {
        RESOLUTION_ORDER
            .iter()
            .find_map(|&tier| self.resolve_in(tier, name, scope))
    }

    pub fn resolve_in(&self, tier: ResolutionTier, name: &str, scope: &Scope<'a>) -> Option<Resolved<'a>> {
        let table = match tier {
            ResolutionTier::PasmLocal => scope.pasm_labels?,
            ResolutionTier::Local => scope.locals?,
            ResolutionTier::Global => self.global,
            ResolutionTier::StorageKeyword => {
                let keyword =
                    self.vocabulary.is_storage_type(name) || self.vocabulary.is_align_type(name);
                return keyword.then_some(Resolved {
                    tier,
                    kind: TokenKind::StorageType,
                    modifiers: Modifiers::NONE,
                    symbol: None,
                });
            }
        };
        table.get(name).map(|symbol| Resolved {
            tier,
            kind: symbol.kind.into(),
            modifiers: symbol.modifiers,
            symbol: Some(symbol),
        })
    }
}
