//! Documentation records for names the language itself defines.
//!
//! Each dialect carries a list of [`DocTable`]s, one per documentation category. A lookup walks
//! the tables in order and the category of the first hit decides the [`BuiltinType`]. Names that
//! are reserved but undocumented (instruction mnemonics, smart-pin constants and so on) get a
//! generic entry from the vocabulary instead; see [`crate::vocabulary::Vocabulary::builtin`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Variable,
    Method,
    PasmDirective,
    Symbol,
    Constant,
    LangPart,
    Type,
}

impl BuiltinType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinType::Variable => "variable",
            BuiltinType::Method => "method",
            BuiltinType::PasmDirective => "directive",
            BuiltinType::Symbol => "symbol",
            BuiltinType::Constant => "constant",
            BuiltinType::LangPart => "language part",
            BuiltinType::Type => "type",
        }
    }

    /// Category names decide the type; the first matching rule wins.
    fn for_category(category: &str) -> Self {
        if category.contains("Method") || category.contains("Float Conversions") {
            BuiltinType::Method
        } else if category.contains("Variable") || category.contains("Register") {
            BuiltinType::Variable
        } else if category.contains("Constant") {
            BuiltinType::Constant
        } else if category.contains("DAT Special") || category.contains("Directive") {
            BuiltinType::PasmDirective
        } else if category.contains("Storage") {
            BuiltinType::Type
        } else if category.contains("Instruction") || category.contains("Conditional") {
            BuiltinType::Symbol
        } else {
            BuiltinType::LangPart
        }
    }
}

/// Immutable description of one reserved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinEntry {
    /// Lowercase spelling.
    pub name: &'static str,
    pub kind: BuiltinType,
    pub category: &'static str,
    pub description: &'static str,
    /// Empty when the name has no call or usage form.
    pub signature: &'static str,
    /// `name - doc` lines.
    pub parameters: &'static [&'static str],
    pub returns: &'static [&'static str],
}

impl BuiltinEntry {
    pub(crate) fn generic(name: &'static str, category: &'static str) -> Self {
        Self {
            name,
            kind: BuiltinType::for_category(category),
            category,
            description: "",
            signature: "",
            parameters: &[],
            returns: &[],
        }
    }
}

#[derive(Debug)]
pub(crate) struct DocRow {
    name: &'static str,
    signature: &'static str,
    description: &'static str,
    parameters: &'static [&'static str],
    returns: &'static [&'static str],
}

/// A name with only a description.
pub(crate) const fn described(name: &'static str, description: &'static str) -> DocRow {
    DocRow {
        name,
        signature: "",
        description,
        parameters: &[],
        returns: &[],
    }
}

/// A name with a usage form but no parameter list.
pub(crate) const fn usage(name: &'static str, signature: &'static str, description: &'static str) -> DocRow {
    DocRow {
        name,
        signature,
        description,
        parameters: &[],
        returns: &[],
    }
}

pub(crate) const fn method(
    name: &'static str,
    signature: &'static str,
    description: &'static str,
    parameters: &'static [&'static str],
    returns: &'static [&'static str],
) -> DocRow {
    DocRow {
        name,
        signature,
        description,
        parameters,
        returns,
    }
}

#[derive(Debug)]
pub(crate) struct DocTable {
    pub category: &'static str,
    pub rows: &'static [DocRow],
}

/// First documented entry for `name` across `tables`, matched case-insensitively.
pub(crate) fn find(tables: &[&DocTable], name: &str) -> Option<BuiltinEntry> {
    tables.iter().find_map(|table| {
        table
            .rows
            .iter()
            .find(|row| row.name.eq_ignore_ascii_case(name))
            .map(|row| BuiltinEntry {
                name: row.name,
                kind: BuiltinType::for_category(table.category),
                category: table.category,
                description: row.description,
                signature: row.signature,
                parameters: row.parameters,
                returns: row.returns,
            })
    })
}

pub(crate) static BLOCK_NAMES: DocTable = DocTable {
    category: "Block Name",
    rows: &[
        described("con", "32-bit Constant declarations<br>*(NOTE: CON is the initial/default block type)*"),
        described("obj", "Referenced object instantiations<br>*(objects manipulated by this object)*"),
        described("var", "Object Instance variable declarations"),
        described("pub", "Public method for use by the parent object and within this object"),
        described("pri", "Private method for use within this object"),
        described("dat", "Object Shared variable declarations and/or PASM code"),
    ],
};

pub(crate) static FLOAT_CONVERSIONS: DocTable = DocTable {
    category: "Float Conversions",
    rows: &[
        method(
            "float",
            "FLOAT(x): floatValue",
            "Convert integer x to float",
            &["x - integer value to be converted"],
            &["floatValue - x-value represented as float"],
        ),
        method(
            "trunc",
            "TRUNC(x): integerValue",
            "Convert float x to truncated integer",
            &["x - float value to be converted (remove all after decimal)"],
            &["integerValue - result of truncation operation"],
        ),
        method(
            "round",
            "ROUND(x): integerValue",
            "Convert float x to rounded integer",
            &["x - float value to be converted (round to nearest integer)"],
            &["integerValue - result of rounding operation"],
        ),
    ],
};

pub(crate) static STORAGE_SPECIALS: DocTable = DocTable {
    category: "DAT Special",
    rows: &[
        usage("res", "symbol   RES n", "Reserve next 'n' long(s) for symbol"),
        usage(
            "file",
            "FileDat  FILE \"Filename\"",
            "include binary file, \"FileDat\" is a BYTE symbol that points to file",
        ),
    ],
};

pub(crate) static LITERAL_CONSTANTS: DocTable = DocTable {
    category: "Spin Constant",
    rows: &[
        described("true", "Logical true: -1 ($FFFF_FFFF)"),
        described("false", "Logical false: 0 ($0000_0000)"),
        described("posx", "Maximum positive integer: 2,147,483,647 ($7FFF_FFFF)"),
        described("negx", "Maximum negative integer: -2,147,483,648 ($8000_0000)"),
        described("pi", "Floating-point value for PI: ~3.141593 ($4049_0FDB)"),
    ],
};
