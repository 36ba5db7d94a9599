//! VAR lines: `[BYTE|WORD|LONG] name[size], name, ...`.

use super::{symbol_at, Line, Session, Table};
use crate::symbols::{Modifier, SymbolKind};
use crate::tokenizer::{leading_name, split_top_level, starts_like_name, LineToken};

pub(super) fn scan(session: &mut Session, line: &Line<'_>) {
    let code = line.code();
    let offset = code.len() - code.trim_start().len();
    let mut from = line.start + offset;

    let first = leading_name(&code[offset..]);
    if session.vocabulary.is_storage_type(first) {
        let storage = LineToken {
            text: first,
            column: from,
        };
        session.classify(line, storage, None);
        from = storage.end();
    }

    let names = line.view.get(from..).unwrap_or("");
    for piece in split_top_level(names, from, ',') {
        let name = leading_name(piece.text);
        if !starts_like_name(name) {
            session.classify(line, piece, None);
            continue;
        }
        let token = LineToken {
            text: name,
            column: piece.column,
        };
        let symbol = symbol_at(line, token, SymbolKind::Variable, &[Modifier::Instance]);
        session.declare(Table::Global, symbol.with_comment(line.comment()));
        let size = LineToken {
            text: &piece.text[name.len()..],
            column: token.end(),
        };
        session.classify(line, size, None);
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::analyze;
    use crate::resolve::TokenKind;
    use crate::symbols::{Modifier, SymbolKind};

    #[test]
    fn every_listed_name_is_an_instance_variable() {
        let analysis = analyze("VAR\n  long a, b[4], c\n  ptr");
        for name in ["a", "b", "c", "ptr"] {
            let symbol = analysis.lookup_symbol(name).expect("declared");
            assert_eq!(symbol.kind, SymbolKind::Variable);
            assert!(symbol.modifiers.contains(Modifier::Instance));
        }
    }

    #[test]
    fn storage_keyword_and_sizes_are_classified() {
        let analysis = analyze("CON SLOTS = 8\nVAR byte buf[SLOTS], n");
        let tokens: Vec<(usize, TokenKind)> = analysis
            .tokens()
            .iter()
            .filter(|token| token.line == 1)
            .map(|token| (token.column, token.kind))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (4, TokenKind::StorageType),
                (9, TokenKind::Variable),
                (13, TokenKind::Constant),
                (21, TokenKind::Variable),
            ]
        );
    }
}
