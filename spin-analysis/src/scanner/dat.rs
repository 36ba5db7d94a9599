//! DAT lines outside assembly: `[label] [storage|instruction] operands`.

use super::{symbol_at, Line, Session, Table};
use crate::symbols::{Modifier, SymbolKind};
use crate::tokenizer::{leading_name, starts_like_name, tokenize, LineToken, SplitPolicy};
use crate::vocabulary::Vocabulary;

pub(super) fn scan(session: &mut Session, line: &Line<'_>) {
    let vocabulary = session.vocabulary;
    let words = line.tokens(SplitPolicy::General);
    let Some(&first) = words.first() else {
        return;
    };
    let second = words.get(1).copied();

    let directive = if is_label(vocabulary, first.text) {
        let kind = match second {
            Some(word) if !vocabulary.is_dat_or_file_storage_type(word.text) => SymbolKind::Label,
            _ => SymbolKind::Variable,
        };
        declare_label(session, line, Table::Global, first, kind);
        second
    } else {
        Some(first)
    };
    let Some(directive) = directive else {
        return;
    };
    session.classify(line, directive, None);

    let policy = if vocabulary.is_pasm_instruction(directive.text) || vocabulary.is_condition_prefix(directive.text)
    {
        SplitPolicy::Assembly
    } else {
        SplitPolicy::DataInit
    };
    let operands = line.code().get(directive.end() - line.start..).unwrap_or("");
    for token in tokenize(operands, directive.end(), policy) {
        if !vocabulary.is_pasm_vocabulary(token.text) {
            session.classify(line, token, None);
        }
    }
}

/// True when `word` can be declared as a DAT or assembly label here.
pub(super) fn is_label(vocabulary: &Vocabulary, word: &str) -> bool {
    let bare = word.strip_prefix(['.', ':']).unwrap_or(word);
    starts_like_name(bare)
        && leading_name(bare) == bare
        && vocabulary.is_dat_or_pasm_label(word)
        && !vocabulary.is_align_type(word)
}

/// Declare a label; `.name` and `:name` local labels are marked static.
pub(super) fn declare_label(
    session: &mut Session,
    line: &Line<'_>,
    table: Table,
    word: LineToken<'_>,
    kind: SymbolKind,
) {
    let modifiers: &[Modifier] = if word.text.starts_with(['.', ':']) {
        &[Modifier::Static]
    } else {
        &[]
    };
    let symbol = symbol_at(line, word, kind, modifiers).with_comment(line.comment());
    session.declare(table, symbol);
}
