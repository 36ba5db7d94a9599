//! PUB/PRI sections: the declaration line and the Spin code below it.

use super::{display, symbol_at, Line, Session, Table};
use crate::state::Section;
use crate::strip::{remove_inline_aside, strip_comment};
use crate::symbols::{Modifier, SymbolKind};
use crate::tokenizer::{
    leading_name, split_top_level, starts_like_name, tokenize, Accessor, LineToken, SplitPolicy,
};

/// `name(params) : returns | locals`, with every part after the name optional.
pub(super) fn signature(session: &mut Session, line: &Line<'_>, section: Section) {
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
    let modifiers: &[Modifier] = match section {
        Section::Pub => &[Modifier::Static],
        _ => &[],
    };
    let text = line.raw.get(line.start..).map(strip_comment).unwrap_or("");
    let symbol = symbol_at(line, name_token, SymbolKind::Method, modifiers)
        .with_signature(&remove_inline_aside(text))
        .with_comment(line.comment());
    session.declare(Table::Global, symbol);
    session.enter_method(name, section, line.index);

    let view = line.view;
    let mut cursor = name_token.end();
    let opens_list = view
        .get(cursor..)
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .is_some();
    if opens_list {
        let open = view[cursor..].find('(').map_or(cursor, |at| cursor + at);
        let close = view[open..].find(')').map_or(view.len(), |at| open + at);
        let params = &view[open + 1..close];
        declare_names(session, line, params, open + 1, SymbolKind::Parameter, &[Modifier::Readonly, Modifier::Local]);
        cursor = (close + 1).min(view.len());
    }

    let tail = &view[cursor..];
    let bar = tail.find('|').map(|at| cursor + at);
    let colon = tail
        .find(':')
        .map(|at| cursor + at)
        .filter(|&at| bar.map_or(true, |bar| at < bar));
    if let Some(colon) = colon {
        let returns = &view[colon + 1..bar.unwrap_or(view.len())];
        declare_names(session, line, returns, colon + 1, SymbolKind::ReturnValue, &[Modifier::Local]);
    }
    if let Some(bar) = bar {
        declare_locals(session, line, &view[bar + 1..], bar + 1);
    }
}

fn declare_names(
    session: &mut Session,
    line: &Line<'_>,
    list: &str,
    column: usize,
    kind: SymbolKind,
    modifiers: &[Modifier],
) {
    for piece in split_top_level(list, column, ',') {
        let name = leading_name(piece.text);
        if !starts_like_name(name) {
            continue;
        }
        let token = LineToken {
            text: name,
            column: piece.column,
        };
        session.declare(Table::Local, symbol_at(line, token, kind, modifiers));
    }
}

/// `x, BYTE buf[4], LONG y`: the storage prefix and the size are not part of the name.
fn declare_locals(session: &mut Session, line: &Line<'_>, list: &str, column: usize) {
    let vocabulary = session.vocabulary;
    let mut sizes = Vec::new();
    for piece in split_top_level(list, column, ',') {
        let words = tokenize(piece.text, piece.column, SplitPolicy::General);
        let mut words = words.into_iter().peekable();
        if let Some(prefix) = words.next_if(|word| {
            let keyword = leading_name(word.text);
            vocabulary.is_storage_type(keyword) || vocabulary.is_align_type(keyword)
        }) {
            session.classify(line, prefix, None);
        }
        let Some(word) = words.next() else {
            continue;
        };
        let name = leading_name(word.text);
        if !starts_like_name(name) {
            continue;
        }
        let token = LineToken {
            text: name,
            column: word.column,
        };
        session.declare(Table::Local, symbol_at(line, token, SymbolKind::Variable, &[Modifier::Local]));
        sizes.push(LineToken {
            text: &piece.text[word.column - piece.column + name.len()..],
            column: token.end(),
        });
    }
    for size in sizes {
        session.classify(line, size, None);
    }
}

/// A line of Spin code. The first name of each assignment target is marked as modified.
pub(super) fn body(session: &mut Session, line: &Line<'_>) {
    if display::statement(session, line, line.start) || !session.classifying() {
        return;
    }
    let code = line.code();
    let Some(assign) = code.find(":=") else {
        classify_expression(session, line, code, line.start);
        return;
    };

    let targets = &code[..assign];
    let (label, targets, targets_from) = match targets.rfind(':') {
        Some(colon) => (&targets[..colon], &targets[colon + 1..], line.start + colon + 1),
        None => ("", targets, line.start),
    };
    classify_expression(session, line, label, line.start);
    for target in split_top_level(targets, targets_from, ',') {
        let mut modification = Some(Modifier::Modification);
        for token in tokenize(target.text, target.column, SplitPolicy::MethodBody) {
            classify_token(session, line, token, modification.take());
        }
    }
    let value_from = line.start + assign + 2;
    classify_expression(session, line, &code[assign + 2..], value_from);
}

fn classify_expression(session: &mut Session, line: &Line<'_>, text: &str, column: usize) {
    for token in tokenize(text, column, SplitPolicy::MethodBody) {
        classify_token(session, line, token, None);
    }
}

/// `.member` straight after `]` belongs to an indexed object: `drivers[2].start()`.
fn classify_token(session: &mut Session, line: &Line<'_>, token: LineToken<'_>, extra: Option<Modifier>) {
    let indexed_member = token.column > 0 && line.char_at(token.column - 1) == Some(']');
    if let Some(member) = token.text.strip_prefix('.').filter(|_| indexed_member) {
        let name = leading_name(member);
        if starts_like_name(name) {
            let member = LineToken {
                text: name,
                column: token.column + 1,
            };
            session.member(line, Accessor::Dot, member);
        }
        return;
    }
    session.classify(line, token, extra);
}

#[cfg(test)]
mod tests {
    use crate::analysis::analyze;
    use crate::resolve::TokenKind;
    use crate::symbols::{Modifier, SymbolKind};

    #[test]
    fn signature_registers_every_local_kind() {
        let analysis = analyze("PUB start(a, b) : ok | x, BYTE y[4]\n  ok := a + b\nPRI other()\n");
        let scope = analysis.scope_at_line(1).expect("start");
        let kinds: Vec<(&str, SymbolKind)> = scope
            .locals
            .symbols()
            .into_iter()
            .map(|symbol| (symbol.name.as_str(), symbol.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("a", SymbolKind::Parameter),
                ("b", SymbolKind::Parameter),
                ("ok", SymbolKind::ReturnValue),
                ("x", SymbolKind::Variable),
                ("y", SymbolKind::Variable),
            ]
        );
        let a = scope.locals.get("a").expect("parameter");
        assert_eq!(a.modifiers, crate::symbols::Modifiers::of(&[Modifier::Readonly, Modifier::Local]));
        let other = analysis.scope_at_line(2).expect("other");
        assert!(other.locals.is_empty());
    }

    #[test]
    fn method_symbol_carries_signature_and_visibility() {
        let analysis = analyze("PUB go(pin) : ok  { entry } ' starts it\nPRI helper\n");
        let go = analysis.lookup_symbol("GO").expect("method");
        assert_eq!(go.kind, SymbolKind::Method);
        assert!(go.modifiers.contains(Modifier::Static));
        assert_eq!(go.signature.as_deref(), Some("go(pin) : ok"));
        assert_eq!(go.declaration_comment.as_deref(), Some("starts it"));
        let helper = analysis.lookup_symbol("helper").expect("method");
        assert!(helper.modifiers.is_empty());
    }

    #[test]
    fn assignment_targets_are_modified() {
        let analysis = analyze("VAR long buf[4], i\nPUB go() | n\n  buf[i], n := 1, buf[0]");
        let tokens: Vec<(usize, TokenKind, bool)> = analysis
            .tokens()
            .iter()
            .filter(|token| token.line == 2)
            .map(|token| (token.column, token.kind, token.modifiers.contains(Modifier::Modification)))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (2, TokenKind::Variable, true),
                (6, TokenKind::Variable, false),
                (10, TokenKind::Variable, true),
                (18, TokenKind::Variable, false),
            ]
        );
    }

    #[test]
    fn case_labels_are_not_targets() {
        let analysis = analyze("CON GO = 1\nPUB run(cmd) | state\n  case cmd\n    GO: state := GO");
        let tokens: Vec<(usize, bool)> = analysis
            .tokens()
            .iter()
            .filter(|token| token.line == 3)
            .map(|token| (token.column, token.modifiers.contains(Modifier::Modification)))
            .collect();
        assert_eq!(tokens, vec![(4, false), (8, true), (17, false)]);
    }

    #[test]
    fn object_calls_split_into_namespace_and_method() {
        let analysis = analyze("OBJ ser : \"serial\"\n    drv[2] : \"driver\"\nPUB go()\n  ser.str(@msg)\n  drv[1].start(ser.rx)");
        let line_three: Vec<(usize, TokenKind)> = analysis
            .tokens()
            .iter()
            .filter(|token| token.line == 3)
            .map(|token| (token.column, token.kind))
            .collect();
        assert_eq!(line_three, vec![(2, TokenKind::Namespace), (6, TokenKind::Method)]);
        let line_four: Vec<(usize, TokenKind)> = analysis
            .tokens()
            .iter()
            .filter(|token| token.line == 4)
            .map(|token| (token.column, token.kind))
            .collect();
        assert_eq!(
            line_four,
            vec![
                (2, TokenKind::Namespace),
                (9, TokenKind::Method),
                (15, TokenKind::Namespace),
                (19, TokenKind::Variable),
            ]
        );
    }

    #[test]
    fn locals_vanish_at_the_next_method() {
        let analysis = analyze("PUB a(x)\n  x := 1\nPUB b()\n  x := 2");
        assert_eq!(analysis.tokens().iter().filter(|token| token.line == 3).count(), 0);
        assert_eq!(analysis.tokens().iter().filter(|token| token.line == 1).count(), 1);
    }
}
