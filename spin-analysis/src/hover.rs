use crate::analysis::Analysis;
use crate::builtins::BuiltinEntry;
use crate::position::{Position, Range};
use crate::resolve::ResolutionTier;
use crate::symbols::{Modifier, Symbol, SymbolKind};
use crate::utils::{identifier_at, IdentifierAt};
use crate::vocabulary::Dialect;

#[derive(Debug, Clone, PartialEq)]
pub struct HoverResult {
    pub range: Range,
    /// Markdown.
    pub contents: String,
}

pub fn hover(analysis: &Analysis, text: &str, position: Position) -> Option<HoverResult> {
    let found = identifier_at(text, position)?;
    if found.is_member {
        return None;
    }
    symbol_hover(analysis, &found, position.line).or_else(|| builtin_hover(analysis, &found))
}

fn symbol_hover(analysis: &Analysis, found: &IdentifierAt<'_>, line: usize) -> Option<HoverResult> {
    let resolved = [found.name, found.bare()]
        .into_iter()
        .find_map(|name| analysis.resolve_at_line(name, line))?;
    let symbol = resolved.symbol?;
    let scope = match resolved.tier {
        ResolutionTier::Global => "Global",
        _ => "Method",
    };

    let mut contents = String::new();
    if symbol.kind == SymbolKind::Method {
        let keyword = if symbol.modifiers.contains(Modifier::Static) { "PUB" } else { "PRI" };
        let signature = symbol.signature.as_deref().unwrap_or(&symbol.name);
        contents.push_str(&format!(
            "```{}\n{keyword} {signature}\n```\n",
            code_language(analysis.dialect())
        ));
    }
    contents.push_str(&format!(
        "(*{scope}* {}) **{}**",
        interpretation(symbol, resolved.tier),
        symbol.name
    ));
    if let Some(comment) = &symbol.declaration_comment {
        contents.push_str("\n\n");
        contents.push_str(comment);
    }
    Some(HoverResult {
        range: found.range,
        contents,
    })
}

fn interpretation(symbol: &Symbol, tier: ResolutionTier) -> String {
    let modifiers = symbol.modifiers;
    let text = match symbol.kind {
        SymbolKind::Constant => "32-bit constant",
        SymbolKind::EnumMember => "enum value",
        SymbolKind::Variable if modifiers.contains(Modifier::Instance) => "instance variable",
        SymbolKind::Variable if modifiers.contains(Modifier::Local) => "local variable",
        SymbolKind::Variable if tier == ResolutionTier::PasmLocal => "inline data",
        SymbolKind::Variable => "DAT variable",
        SymbolKind::Label if tier == ResolutionTier::PasmLocal => "inline label",
        SymbolKind::Label if modifiers.contains(Modifier::Static) => "local label",
        SymbolKind::Label => "label",
        SymbolKind::Method if modifiers.contains(Modifier::Static) => "public method",
        SymbolKind::Method => "private method",
        SymbolKind::Parameter => "parameter",
        SymbolKind::ReturnValue => "return value",
        SymbolKind::DisplayName => {
            return match &symbol.signature {
                Some(display) => format!("debug `{display}` display"),
                None => "debug display".to_string(),
            };
        }
        SymbolKind::Namespace => {
            return match &symbol.related_file {
                Some(file) => format!("object instance of \"{file}\""),
                None => "object instance".to_string(),
            };
        }
    };
    text.to_string()
}

fn builtin_hover(analysis: &Analysis, found: &IdentifierAt<'_>) -> Option<HoverResult> {
    let entry = analysis.is_builtin(found.bare())?;
    Some(HoverResult {
        range: found.range,
        contents: builtin_markdown(&entry, found.bare(), analysis.dialect()),
    })
}

fn builtin_markdown(entry: &BuiltinEntry, written: &str, dialect: Dialect) -> String {
    let title = if entry.signature.is_empty() { written } else { entry.signature };
    let mut contents = format!(
        "({}) {title}\n\n{}: *{} built-in*",
        entry.kind.as_str(),
        entry.category,
        dialect.label()
    );
    if !entry.description.is_empty() {
        contents.push_str("\n\n");
        contents.push_str(entry.description);
    }
    for parameter in entry.parameters {
        contents.push_str(&tagged("@param", parameter));
    }
    for value in entry.returns {
        contents.push_str(&tagged("@returns", value));
    }
    contents
}

/// `Name - what it is` as ``@tag `Name` - what it is``.
fn tagged(tag: &str, line: &str) -> String {
    match line.split_once(" - ") {
        Some((name, doc)) => format!("\n\n{tag} `{name}` - {doc}"),
        None => format!("\n\n{tag} `{line}`"),
    }
}

fn code_language(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Spin1 => "spin",
        Dialect::Spin2 => "spin2",
    }
}
