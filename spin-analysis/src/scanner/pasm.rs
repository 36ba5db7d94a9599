//! Assembly lines, both DAT blocks after ORG and inline blocks inside methods.

use super::dat::{declare_label, is_label};
use super::{display, Line, Session, Table};
use crate::symbols::SymbolKind;
use crate::tokenizer::{tokenize, SplitPolicy};

/// A line between ORG and FIT in a DAT section. Labels are document-wide.
pub(super) fn scan_data(session: &mut Session, line: &Line<'_>) {
    scan(session, line, Table::Global);
}

/// A line between ORG and END inside a method. Labels belong to that method.
pub(super) fn scan_inline(session: &mut Session, line: &Line<'_>) {
    scan(session, line, Table::Pasm);
}

fn scan(session: &mut Session, line: &Line<'_>, table: Table) {
    let vocabulary = session.vocabulary;
    let words = line.tokens(SplitPolicy::General);
    let Some(&first) = words.first() else {
        return;
    };

    let mut operands_from = first.column;
    if is_label(vocabulary, first.text) && !is_debug(first.text) {
        let kind = match words.get(1) {
            Some(next) if vocabulary.is_dat_or_file_storage_type(next.text) => SymbolKind::Variable,
            _ => SymbolKind::Label,
        };
        declare_label(session, line, table, first, kind);
        operands_from = first.end();
    }
    if display::statement(session, line, operands_from) {
        return;
    }

    let operands = line.code().get(operands_from - line.start..).unwrap_or("");
    for token in tokenize(operands, operands_from, SplitPolicy::Assembly) {
        if !vocabulary.is_pasm_vocabulary(token.text) {
            session.classify(line, token, None);
        }
    }
}

fn is_debug(word: &str) -> bool {
    word.get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case("debug"))
}
