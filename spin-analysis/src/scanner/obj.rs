//! OBJ lines: `name[count] : "file" | OVERRIDE = value, ...`.

use super::{symbol_at, Line, Session, Table};
use crate::symbols::{Modifier, SymbolKind};
use crate::tokenizer::{leading_name, split_top_level, starts_like_name, tokenize, LineToken, SplitPolicy};

pub(super) fn scan(session: &mut Session, line: &Line<'_>) {
    let code = line.code();
    let offset = code.len() - code.trim_start().len();
    let name = leading_name(&code[offset..]);
    if !starts_like_name(name) {
        return;
    }
    let name_token = LineToken {
        text: name,
        column: line.start + offset,
    };
    let colon = code.find(':').map(|at| line.start + at);
    let symbol = symbol_at(line, name_token, SymbolKind::Namespace, &[])
        .with_related_file(colon.and_then(|at| quoted_file(line.raw, at)))
        .with_comment(line.comment());
    session.declare(Table::Global, symbol);

    let count_end = colon.unwrap_or(line.view.len());
    let count = line.view.get(name_token.end()..count_end).unwrap_or("");
    session.classify_all(line, tokenize(count, name_token.end(), SplitPolicy::Constant));

    let Some(bar) = colon.and_then(|at| line.view.get(at..)?.find('|').map(|found| at + found)) else {
        return;
    };
    let overrides = line.view.get(bar + 1..).unwrap_or("");
    for piece in split_top_level(overrides, bar + 1, ',') {
        let Some(equals) = piece.text.find('=') else {
            continue;
        };
        let target = piece.text[..equals].trim_end();
        if starts_like_name(target) && leading_name(target) == target {
            let token = LineToken {
                text: target,
                column: piece.column,
            };
            let symbol = symbol_at(line, token, SymbolKind::Constant, &[Modifier::Readonly]);
            session.declare(Table::Global, symbol);
        }
        let value = &piece.text[equals + 1..];
        session.classify_all(line, tokenize(value, piece.column + equals + 1, SplitPolicy::Constant));
    }
}

/// Text between the first pair of quotes after `from` in the raw line.
fn quoted_file(raw: &str, from: usize) -> Option<&str> {
    let rest = raw.get(from..)?;
    let open = rest.find('"')? + 1;
    let close = rest[open..].find('"')? + open;
    Some(&rest[open..close])
}

#[cfg(test)]
mod tests {
    use crate::analysis::analyze;
    use crate::resolve::TokenKind;
    use crate::symbols::SymbolKind;

    #[test]
    fn instance_records_its_file() {
        let analysis = analyze("OBJ\n  ser : \"jm_serial\"  ' console");
        let ser = analysis.lookup_symbol("SER").expect("namespace");
        assert_eq!(ser.kind, SymbolKind::Namespace);
        assert_eq!(ser.related_file.as_deref(), Some("jm_serial"));
        assert_eq!(ser.declaration_comment.as_deref(), Some("console"));
        assert_eq!(ser.column, 2);
    }

    #[test]
    fn array_count_is_a_reference() {
        let analysis = analyze("CON N = 7\nOBJ segments[N] : \"segment\"");
        let kinds: Vec<(usize, TokenKind)> = analysis
            .tokens()
            .iter()
            .filter(|token| token.line == 1)
            .map(|token| (token.column, token.kind))
            .collect();
        assert_eq!(kinds, vec![(4, TokenKind::Namespace), (13, TokenKind::Constant)]);
    }

    #[test]
    fn overrides_are_constants() {
        let analysis = analyze("OBJ\n  ws : \"ws2812\" | PIN = 16, COUNT = PIN * 2");
        assert_eq!(analysis.lookup_symbol("pin").map(|s| s.kind), Some(SymbolKind::Constant));
        assert_eq!(analysis.lookup_symbol("count").map(|s| s.column), Some(28));
        assert_eq!(analysis.lookup_symbol("ws").and_then(|s| s.related_file.clone()).as_deref(), Some("ws2812"));
    }

    #[test]
    fn a_colon_inside_the_file_name_is_not_a_separator() {
        let analysis = analyze("OBJ\n  drv : \"c:drv\"");
        assert_eq!(analysis.lookup_symbol("drv").and_then(|s| s.related_file.clone()).as_deref(), Some("c:drv"));
    }
}
