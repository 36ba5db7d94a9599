//! Built-in vocabulary of the two supported dialects.
//!
//! Every reserved word the analyzer needs to recognize lives in a [`WordSet`]: a static list
//! of lowercase spellings plus a lazily built hash index, so membership tests are
//! case-insensitive and cost one lowercase copy of the probe.
//!
//! The two dialects share one [`Vocabulary`] type and differ only in the data they fill it
//! with (see `spin1.rs` and `spin2.rs`). That keeps the predicate surface identical for both:
//! callers hold a `&'static Vocabulary` picked by [`Dialect::vocabulary`] and never branch on the
//! dialect themselves.

mod spin1;
mod spin2;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::builtins::{self, BuiltinEntry, DocTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Propeller 1 Spin with PASM.
    Spin1,
    /// Propeller 2 Spin2 with PASM2.
    #[default]
    Spin2,
}

impl Dialect {
    /// Dialect implied by a file extension: `.spin` is Spin1, `.spin2` is Spin2.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("spin") {
            Some(Dialect::Spin1)
        } else if extension.eq_ignore_ascii_case("spin2") {
            Some(Dialect::Spin2)
        } else {
            None
        }
    }

    /// Dialect implied by an editor language id (`spin` or `spin2`).
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "spin" | "spin1" => Some(Dialect::Spin1),
            "spin2" => Some(Dialect::Spin2),
            _ => None,
        }
    }

    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            Dialect::Spin1 => &spin1::RULES,
            Dialect::Spin2 => &spin2::RULES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dialect::Spin1 => "Spin1",
            Dialect::Spin2 => "Spin2",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "spin" | "spin1" | "p1" => Ok(Dialect::Spin1),
            "spin2" | "p2" => Ok(Dialect::Spin2),
            other => Err(format!("unknown dialect `{other}` (expected spin1 or spin2)")),
        }
    }
}

/// Case-insensitive set of reserved words. Entries must be written in lowercase.
#[derive(Debug)]
pub struct WordSet {
    words: &'static [&'static str],
    index: OnceLock<HashSet<&'static str>>,
}

impl WordSet {
    pub const fn new(words: &'static [&'static str]) -> Self {
        Self {
            words,
            index: OnceLock::new(),
        }
    }

    fn index(&self) -> &HashSet<&'static str> {
        self.index.get_or_init(|| self.words.iter().copied().collect())
    }

    /// The stored spelling of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&'static str> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.index().get(name.to_ascii_lowercase().as_str()).copied()
        } else {
            self.index().get(name).copied()
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Preprocessor directives understood by the FlexSpin toolchain, shared by both dialects.
static PREPROCESSOR_DIRECTIVES: WordSet = WordSet::new(&[
    "#define",
    "#ifdef",
    "#ifndef",
    "#else",
    "#elseifdef",
    "#elseifndef",
    "#endif",
    "#error",
    "#include",
    "#warn",
    "#undef",
]);

static PREPROCESSOR_SYMBOLS: WordSet = WordSet::new(&[
    "__propeller__",
    "__propeller2__",
    "__p2__",
    "__flexspin__",
    "__spincvt__",
    "__spin2pasm__",
    "__spin2cpp__",
    "__have_fcache__",
    "__cplusplus__",
    "__date__",
    "__file__",
    "__line__",
    "__time__",
    "__version__",
    "__debug__",
    "__output_asm__",
    "__output_bytecode__",
    "__output_c__",
    "__output_cpp__",
]);

/// Reserved words of one dialect.
#[derive(Debug)]
pub struct Vocabulary {
    pub dialect: Dialect,
    storage_types: WordSet,
    align_types: WordSet,
    reserved_pasm_symbols: WordSet,
    pasm_reserved_words: WordSet,
    pasm_conditionals: WordSet,
    instructions: WordSet,
    no_operand_instructions: WordSet,
    illegal_inline_directives: WordSet,
    builtin_constants: WordSet,
    builtin_variables: WordSet,
    builtin_methods: WordSet,
    binary_operators: WordSet,
    unary_operators: WordSet,
    float_conversions: WordSet,
    flow_keywords: WordSet,
    docs: &'static [&'static DocTable],
}

impl Vocabulary {
    /// BYTE, WORD, LONG and the dialect's fitted variants.
    pub fn is_storage_type(&self, name: &str) -> bool {
        self.storage_types.contains(name)
    }

    /// Storage types usable on a DAT line: the plain ones plus RES.
    pub fn is_dat_storage_type(&self, name: &str) -> bool {
        self.is_storage_type(name) || name.eq_ignore_ascii_case("res")
    }

    /// DAT storage types plus FILE.
    pub fn is_dat_or_file_storage_type(&self, name: &str) -> bool {
        self.is_dat_storage_type(name) || name.eq_ignore_ascii_case("file")
    }

    pub fn is_align_type(&self, name: &str) -> bool {
        self.align_types.contains(name)
    }

    /// ORG, FIT and their relatives.
    pub fn is_reserved_pasm_symbol(&self, name: &str) -> bool {
        self.reserved_pasm_symbols.contains(name)
    }

    pub fn is_pasm_reserved_word(&self, name: &str) -> bool {
        self.pasm_reserved_words.contains(name)
    }

    /// Flag-effect suffixes such as WC and WZ.
    pub fn is_pasm_conditional(&self, name: &str) -> bool {
        self.pasm_conditionals.contains(name)
    }

    pub fn is_pasm_instruction(&self, name: &str) -> bool {
        self.instructions.contains(name) || self.no_operand_instructions.contains(name)
    }

    pub fn is_pasm_no_operand_instruction(&self, name: &str) -> bool {
        self.no_operand_instructions.contains(name)
    }

    pub fn is_illegal_inline_directive(&self, name: &str) -> bool {
        self.illegal_inline_directives.contains(name)
    }

    pub fn is_builtin_constant(&self, name: &str) -> bool {
        self.builtin_constants.contains(name)
    }

    pub fn is_builtin_variable(&self, name: &str) -> bool {
        self.builtin_variables.contains(name)
    }

    pub fn is_builtin_method(&self, name: &str) -> bool {
        self.builtin_methods.contains(name)
    }

    pub fn is_float_conversion(&self, name: &str) -> bool {
        self.float_conversions.contains(name)
    }

    pub fn is_binary_operator(&self, name: &str) -> bool {
        self.binary_operators.contains(name)
    }

    pub fn is_unary_operator(&self, name: &str) -> bool {
        self.unary_operators.contains(name)
    }

    pub fn is_preprocessor_directive(&self, name: &str) -> bool {
        PREPROCESSOR_DIRECTIVES.contains(name)
    }

    pub fn is_flow_keyword(&self, name: &str) -> bool {
        self.flow_keywords.contains(name)
    }

    /// `IF_xxx` execution conditions and the `_RET_` prefix.
    pub fn is_condition_prefix(&self, name: &str) -> bool {
        starts_with_ignore_case(name, "if_") || name.eq_ignore_ascii_case("_ret_")
    }

    /// True when `name` may be declared as a DAT or PASM label.
    ///
    /// The first character must be a letter, `_`, `.` or `:`; storage types, the DAT keyword,
    /// ORG-style symbols, condition prefixes, flag suffixes, directives that are illegal in
    /// inline code and instruction mnemonics are rejected.
    pub fn is_dat_or_pasm_label(&self, name: &str) -> bool {
        let legal_start = name
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_alphabetic() || matches!(ch, '_' | '.' | ':'));
        legal_start
            && !self.is_dat_or_file_storage_type(name)
            && !name.eq_ignore_ascii_case("dat")
            && !self.is_reserved_pasm_symbol(name)
            && !self.is_condition_prefix(name)
            && !self.is_pasm_conditional(name)
            && !self.is_illegal_inline_directive(name)
            && !self.is_pasm_instruction(name)
    }

    /// Words that are never user symbols inside assembly operands.
    pub fn is_pasm_vocabulary(&self, name: &str) -> bool {
        self.is_pasm_instruction(name)
            || self.is_pasm_conditional(name)
            || self.is_condition_prefix(name)
            || self.is_pasm_reserved_word(name)
            || self.is_reserved_pasm_symbol(name)
    }

    /// Documentation for `name`, or a generic entry naming its category when the word is
    /// reserved but undocumented.
    pub fn builtin(&self, name: &str) -> Option<BuiltinEntry> {
        if let Some(entry) = builtins::find(self.docs, name) {
            return Some(entry);
        }
        let categories: [(&WordSet, &'static str); 14] = [
            (&self.builtin_methods, "Method"),
            (&self.builtin_variables, "Variable"),
            (&self.builtin_constants, "Constant"),
            (&self.storage_types, "Storage Types"),
            (&self.align_types, "Alignment Directive"),
            (&self.reserved_pasm_symbols, "Pasm Directive"),
            (&self.instructions, "Pasm Instruction"),
            (&self.no_operand_instructions, "Pasm Instruction"),
            (&self.pasm_conditionals, "Pasm Conditional"),
            (&self.flow_keywords, "Flow Control"),
            (&self.binary_operators, "Binary Operator"),
            (&self.unary_operators, "Unary Operator"),
            (&PREPROCESSOR_DIRECTIVES, "Preprocessor Directive"),
            (&PREPROCESSOR_SYMBOLS, "Preprocessor Symbol"),
        ];
        categories.iter().find_map(|&(words, category)| {
            words
                .get(name)
                .map(|word| BuiltinEntry::generic(word, category))
        })
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
