//! Spin2 `debug()` display windows.
//!
//! `` debug(`term log pos 10 10) `` opens a display of type `term` named `log`. Later statements
//! such as `` debug(`log 'ready') `` feed it by name, and one statement may feed several displays
//! at once. Display names are document-wide.

use super::{symbol_at, Line, Session, Table};
use crate::strip::debug_view;
use crate::symbols::SymbolKind;
use crate::tokenizer::{starts_like_name, tokenize, LineToken, SplitPolicy};
use crate::vocabulary::Dialect;

const DISPLAY_TYPES: [&str; 9] = [
    "logic", "scope", "scope_xy", "fft", "spectro", "plot", "term", "bitmap", "midi",
];

fn is_display_type(name: &str) -> bool {
    DISPLAY_TYPES
        .iter()
        .any(|display| display.eq_ignore_ascii_case(name))
}

/// A backtick `debug()` statement whose `debug` is the first word at or after column `from`.
///
/// Returns false, leaving the line to the caller, for any other line.
pub(super) fn statement(session: &mut Session, line: &Line<'_>, from: usize) -> bool {
    if session.vocabulary.dialect != Dialect::Spin2 {
        return false;
    }
    let Some(view) = debug_view(line.raw) else {
        return false;
    };
    let mut parts = tokenize(view.get(from..).unwrap_or(""), from, SplitPolicy::Debug).into_iter();
    if !parts.next().is_some_and(|first| first.text.eq_ignore_ascii_case("debug")) {
        return false;
    }
    let Some(head) = parts.next().filter(|part| part.text.starts_with('`')) else {
        return false;
    };
    let word = LineToken {
        text: head.text.get(1..).unwrap_or(""),
        column: head.column + 1,
    };
    let rest: Vec<LineToken<'_>> = parts.collect();
    let runtime_named = word.text.starts_with('`') || is_runtime_name(word.text);

    if !runtime_named && is_display_type(word.text) {
        if let Some(&name) = rest.first().filter(|name| starts_like_name(name.text)) {
            let symbol = symbol_at(line, name, SymbolKind::DisplayName, &[])
                .with_signature(&word.text.to_ascii_lowercase());
            session.declare(Table::Global, symbol);
            classify_arguments(session, line, &rest[1..]);
            return true;
        }
    }

    let mut arguments = rest.as_slice();
    if !runtime_named && session.is_display(word.text) {
        session.reference(line.index, word, None);
        while let Some((&next, tail)) = arguments.split_first() {
            if !session.is_display(next.text) {
                break;
            }
            session.reference(line.index, next, None);
            arguments = tail;
        }
    }
    classify_arguments(session, line, arguments);
    true
}

/// `zstr_(name)` and `lstr_(name, len)` pick the display at run time.
fn is_runtime_name(word: &str) -> bool {
    ["zstr", "lstr"].iter().any(|prefix| {
        word.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Setup words, colors and formatters never resolve; user names do.
fn classify_arguments(session: &mut Session, line: &Line<'_>, arguments: &[LineToken<'_>]) {
    for &argument in arguments {
        if !argument.text.contains('`') {
            session.classify(line, argument, None);
        }
    }
}
