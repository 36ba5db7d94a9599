//! Symbol records and the tables that hold them.
//!
//! A table maps a lowercase key to the first [`Symbol`] declared under that spelling.
//! Re-declaring a name is a no-op, so the declaration scan can run twice over the same text
//! without disturbing what the first run recorded.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Constant,
    EnumMember,
    Label,
    Method,
    Parameter,
    ReturnValue,
    Namespace,
    /// A Spin2 `debug()` display window.
    DisplayName,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::EnumMember => "enumMember",
            SymbolKind::Label => "label",
            SymbolKind::Method => "method",
            SymbolKind::Parameter => "parameter",
            SymbolKind::ReturnValue => "returnValue",
            SymbolKind::Namespace => "namespace",
            SymbolKind::DisplayName => "displayName",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Declaration,
    Readonly,
    Local,
    Instance,
    Static,
    Modification,
}

impl Modifier {
    pub const ALL: [Modifier; 6] = [
        Modifier::Declaration,
        Modifier::Readonly,
        Modifier::Local,
        Modifier::Instance,
        Modifier::Static,
        Modifier::Modification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Declaration => "declaration",
            Modifier::Readonly => "readonly",
            Modifier::Local => "local",
            Modifier::Instance => "instance",
            Modifier::Static => "static",
            Modifier::Modification => "modification",
        }
    }

    /// Bit position, also the index into the modifier legend.
    pub fn bit(self) -> u32 {
        self as u32
    }
}

/// Set of [`Modifier`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);

    pub fn of(modifiers: &[Modifier]) -> Self {
        modifiers
            .iter()
            .fold(Modifiers::NONE, |set, &modifier| set.with(modifier))
    }

    #[must_use]
    pub fn with(self, modifier: Modifier) -> Self {
        Modifiers(self.0 | 1 << modifier.bit())
    }

    #[must_use]
    pub fn without(self, modifier: Modifier) -> Self {
        Modifiers(self.0 & !(1 << modifier.bit()))
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & (1 << modifier.bit()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw bitset; bit `n` is `Modifier::ALL[n]`.
    pub fn bits(self) -> u32 {
        u32::from(self.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(move |modifier| self.contains(*modifier))
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Modifier::as_str)).finish()
    }
}

/// A declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Spelling at the first declaration.
    pub name: String,
    pub kind: SymbolKind,
    /// Never contains [`Modifier::Declaration`].
    pub modifiers: Modifiers,
    pub line: usize,
    pub column: usize,
    /// Child object file, for OBJ instances.
    pub related_file: Option<String>,
    /// Trailing `'` comment on the declaring line.
    pub declaration_comment: Option<String>,
    /// Declaration text after PUB/PRI for methods, the display type for debug displays.
    pub signature: Option<String>,
}

impl Symbol {
    pub fn new(name: &str, kind: SymbolKind, modifiers: Modifiers, line: usize, column: usize) -> Self {
        Self {
            name: name.to_string(),
            kind,
            modifiers: modifiers.without(Modifier::Declaration),
            line,
            column,
            related_file: None,
            declaration_comment: None,
            signature: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<&str>) -> Self {
        self.declaration_comment = comment.map(str::to_string);
        self
    }

    pub fn with_related_file(mut self, file: Option<&str>) -> Self {
        self.related_file = file.map(str::to_string);
        self
    }

    pub fn with_signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }
}

/// Case-insensitive symbol map with first-write-wins inserts.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `symbol` unless its name is already present. Returns whether it was added.
    pub fn declare(&mut self, symbol: Symbol) -> bool {
        let key = symbol.name.to_ascii_lowercase();
        if self.entries.contains_key(&key) {
            return false;
        }
        debug!(name = %symbol.name, kind = symbol.kind.as_str(), line = symbol.line, "declare");
        self.entries.insert(key, symbol);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols ordered by declaring position.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.entries.values().collect();
        symbols.sort_by_key(|symbol| (symbol.line, symbol.column));
        symbols
    }
}

/// Labels of inline assembly blocks, one table per method.
///
/// Lives for the whole run; clearing a method's parameter and local table leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct PasmLabelRegistry {
    methods: HashMap<String, SymbolTable>,
}

impl PasmLabelRegistry {
    pub fn declare(&mut self, method: &str, symbol: Symbol) -> bool {
        self.methods
            .entry(method.to_ascii_lowercase())
            .or_default()
            .declare(symbol)
    }

    pub fn labels_for(&self, method: &str) -> Option<&SymbolTable> {
        self.methods.get(&method.to_ascii_lowercase())
    }

    pub fn get(&self, method: &str, name: &str) -> Option<&Symbol> {
        self.labels_for(method)?.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(name: &str, line: usize) -> Symbol {
        Symbol::new(
            name,
            SymbolKind::Constant,
            Modifiers::of(&[Modifier::Declaration, Modifier::Readonly]),
            line,
            2,
        )
    }

    #[test]
    fn first_declaration_wins_and_lookup_ignores_case() {
        let mut table = SymbolTable::new();
        assert!(table.declare(constant("Foo", 1)));
        assert!(!table.declare(constant("FOO", 7)));
        let found = table.get("fOO").expect("declared");
        assert_eq!(found.name, "Foo");
        assert_eq!(found.line, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn stored_modifiers_drop_declaration() {
        let symbol = constant("FOO", 0);
        assert!(!symbol.modifiers.contains(Modifier::Declaration));
        assert!(symbol.modifiers.contains(Modifier::Readonly));
        assert_eq!(format!("{:?}", symbol.modifiers), r#"{"readonly"}"#);
    }

    #[test]
    fn modifier_bits_follow_legend_order() {
        let set = Modifiers::of(&[Modifier::Readonly, Modifier::Static]);
        assert_eq!(set.bits(), 0b10010);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Modifier::Readonly, Modifier::Static]);
    }

    #[test]
    fn pasm_labels_are_kept_per_method() {
        let mut registry = PasmLabelRegistry::default();
        let label = Symbol::new("loop", SymbolKind::Label, Modifiers::NONE, 4, 0);
        registry.declare("Start", label);
        assert!(registry.get("start", "LOOP").is_some());
        assert!(registry.get("stop", "loop").is_none());
    }
}
