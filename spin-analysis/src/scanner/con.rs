//! CON lines: `NAME = expr` assignments and `#base[step], A, B[2]` enumerations, several to a
//! line when separated by commas.

use super::{symbol_at, Line, Session, Table};
use crate::symbols::{Modifier, SymbolKind};
use crate::tokenizer::{leading_name, split_top_level, starts_like_name, tokenize, LineToken, SplitPolicy};

pub(super) fn scan(session: &mut Session, line: &Line<'_>) {
    for piece in split_top_level(line.code(), line.start, ',') {
        if piece.text.is_empty() {
            continue;
        }
        match piece.text.find('=') {
            Some(equals) if !piece.text.starts_with('#') => assignment(session, line, piece, equals),
            _ => enumeration(session, line, piece),
        }
    }
}

fn assignment(session: &mut Session, line: &Line<'_>, piece: LineToken<'_>, equals: usize) {
    let name = piece.text[..equals].trim_end();
    if starts_like_name(name) && leading_name(name) == name {
        let token = LineToken {
            text: name,
            column: piece.column,
        };
        let symbol = symbol_at(line, token, SymbolKind::Constant, &[Modifier::Readonly]);
        session.declare(Table::Global, symbol.with_comment(line.comment()));
    }
    let value = &piece.text[equals + 1..];
    session.classify_all(line, tokenize(value, piece.column + equals + 1, SplitPolicy::Constant));
}

fn enumeration(session: &mut Session, line: &Line<'_>, piece: LineToken<'_>) {
    for word in tokenize(piece.text, piece.column, SplitPolicy::General) {
        let name = leading_name(word.text);
        if word.text.starts_with('#') || !starts_like_name(name) || is_debug_call(word.text) {
            session.classify(line, word, None);
            continue;
        }
        let token = LineToken {
            text: name,
            column: word.column,
        };
        let symbol = symbol_at(line, token, SymbolKind::EnumMember, &[Modifier::Readonly]);
        session.declare(Table::Global, symbol.with_comment(line.comment()));
        let step = LineToken {
            text: &word.text[name.len()..],
            column: word.column + name.len(),
        };
        session.classify(line, step, None);
    }
}

fn is_debug_call(word: &str) -> bool {
    word.get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("debug("))
}
