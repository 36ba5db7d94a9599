use lsp_types::SymbolKind;

use crate::analysis::{Analysis, SectionSpan};
use crate::position::{Position, Range};
use crate::state::Section;
use crate::symbols::{Symbol, SymbolKind as SpinSymbolKind};
use crate::utils::source_lines;

#[derive(Debug, Clone, PartialEq)]
pub struct SpinDocumentSymbol {
    pub name: String,
    pub detail: Option<String>,
    pub kind: SymbolKind,
    /// The whole section for section entries, the name for children.
    pub range: Range,
    pub selection_range: Range,
    pub children: Vec<SpinDocumentSymbol>,
}

/// One entry per section, in document order. DAT sections list their labels and variables.
pub fn collect_document_symbols(analysis: &Analysis, text: &str) -> Vec<SpinDocumentSymbol> {
    let lines: Vec<&str> = source_lines(text).collect();
    let line_end = |line: usize| Position::new(line, lines.get(line).map_or(0, |text| text.len()));
    analysis
        .sections()
        .iter()
        .map(|span| {
            let selection_range = Range::new(Position::new(span.line, 0), line_end(span.line));
            let range = Range::new(selection_range.start, line_end(span.end_line));
            let mut symbol = if span.section.is_method() {
                method_symbol(analysis, span)
            } else {
                section_symbol(analysis, span)
            };
            symbol.range = range;
            symbol.selection_range = selection_range;
            symbol
        })
        .collect()
}

fn method_symbol(analysis: &Analysis, span: &SectionSpan) -> SpinDocumentSymbol {
    let method = analysis
        .scopes()
        .iter()
        .find(|scope| scope.line == span.line)
        .and_then(|scope| analysis.lookup_symbol(&scope.name));
    let name = match method {
        Some(method) => format!("{} {}", span.section.keyword(), method.name),
        None => span.section.keyword().to_string(),
    };
    entry(name, method.and_then(|method| method.signature.clone()), SymbolKind::METHOD)
}

fn section_symbol(analysis: &Analysis, span: &SectionSpan) -> SpinDocumentSymbol {
    let name = match &span.comment {
        Some(comment) => format!("{} {}", span.section.keyword(), comment),
        None => span.section.keyword().to_string(),
    };
    let mut symbol = entry(name, None, SymbolKind::FIELD);
    if span.section == Section::Dat {
        symbol.children = analysis
            .global()
            .symbols()
            .into_iter()
            .filter(|declared| (span.line..=span.end_line).contains(&declared.line))
            .filter_map(data_symbol)
            .collect();
    }
    symbol
}

fn data_symbol(declared: &Symbol) -> Option<SpinDocumentSymbol> {
    let kind = match declared.kind {
        SpinSymbolKind::Label => SymbolKind::CONSTANT,
        SpinSymbolKind::Variable => SymbolKind::VARIABLE,
        _ => return None,
    };
    let range = Range::on_line(declared.line, declared.column, declared.name.len());
    Some(SpinDocumentSymbol {
        name: declared.name.clone(),
        detail: declared.declaration_comment.clone(),
        kind,
        range,
        selection_range: range,
        children: Vec::new(),
    })
}

fn entry(name: String, detail: Option<String>, kind: SymbolKind) -> SpinDocumentSymbol {
    SpinDocumentSymbol {
        name,
        detail,
        kind,
        range: Range::default(),
        selection_range: Range::default(),
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_analysis, sample_source};

    fn find_symbol<'a>(symbols: &'a [SpinDocumentSymbol], name: &str) -> &'a SpinDocumentSymbol {
        symbols
            .iter()
            .find(|symbol| symbol.name == name)
            .unwrap_or_else(|| panic!("missing symbol {name}"))
    }

    #[test]
    fn one_entry_per_section() {
        let symbols = collect_document_symbols(sample_analysis(), sample_source());
        let names: Vec<&str> = symbols.iter().map(|symbol| symbol.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["CON { timing }", "OBJ", "VAR", "PUB start", "PRI blink", "PUB pulse", "DAT"]
        );
    }

    #[test]
    fn methods_carry_their_signature() {
        let symbols = collect_document_symbols(sample_analysis(), sample_source());
        let start = find_symbol(&symbols, "PUB start");
        assert_eq!(start.kind, SymbolKind::METHOD);
        assert_eq!(start.detail.as_deref(), Some("start(pin, rate) : ok | BYTE count, delay"));
        assert!(start.range.end.line > start.selection_range.end.line);
    }

    #[test]
    fn data_section_lists_labels_and_variables() {
        let symbols = collect_document_symbols(sample_analysis(), sample_source());
        let dat = find_symbol(&symbols, "DAT");
        let children: Vec<(&str, SymbolKind)> = dat
            .children
            .iter()
            .map(|child| (child.name.as_str(), child.kind))
            .collect();
        assert_eq!(
            children,
            vec![
                ("entry", SymbolKind::CONSTANT),
                (".wait", SymbolKind::CONSTANT),
                ("table", SymbolKind::VARIABLE),
            ]
        );
        assert!(find_symbol(&symbols, "VAR").children.is_empty());
    }
}
