use spin_analysis::resolve::TokenKind;
use spin_analysis::symbols::{Modifier, SymbolKind};
use spin_analysis::{analyze, Analysis, ClassifiedToken};

fn tokens_on(analysis: &Analysis, line: usize) -> Vec<ClassifiedToken> {
    analysis
        .tokens()
        .iter()
        .filter(|token| token.line == line)
        .copied()
        .collect()
}

fn token_at(analysis: &Analysis, line: usize, column: usize) -> ClassifiedToken {
    tokens_on(analysis, line)
        .into_iter()
        .find(|token| token.column == column)
        .unwrap_or_else(|| panic!("no token at {line}:{column}"))
}

const OBJECT: &str = "\
CON
  SPEED = 9
  #1, FIRST, SECOND

VAR
  long counter

PUB main() | i
  counter := helper(Speed)
  repeat i from 0 to 3
    counter += i

PRI helper(x) : y
  y := x * SECOND
  org
again   djnz    x, #again
  end

DAT
table   long    FIRST, speed
";

#[test]
fn analysis_is_deterministic() {
    let first = analyze(OBJECT);
    let second = analyze(OBJECT);
    assert_eq!(first.tokens(), second.tokens());
    assert_eq!(first.global().len(), second.global().len());
}

#[test]
fn references_may_precede_declarations() {
    let analysis = analyze(OBJECT);
    let helper = token_at(&analysis, 8, 13);
    assert_eq!(helper.kind, TokenKind::Method);
    assert!(!helper.modifiers.contains(Modifier::Declaration));
}

#[test]
fn references_resolve_case_insensitively() {
    let analysis = analyze(OBJECT);
    let lower = token_at(&analysis, 19, 23);
    let mixed = token_at(&analysis, 8, 20);
    assert_eq!(lower.kind, TokenKind::Constant);
    assert_eq!(mixed.kind, TokenKind::Constant);
    assert!(lower.modifiers.contains(Modifier::Readonly));
}

#[test]
fn constant_assignments_are_readonly_declarations() {
    let analysis = analyze("CON\n  FOO = 1, BAR = 2");
    for name in ["FOO", "BAR"] {
        let symbol = analysis.lookup_symbol(name).expect("declared");
        assert_eq!(symbol.kind, SymbolKind::Constant);
        assert!(symbol.modifiers.contains(Modifier::Readonly));
    }
    let declared = tokens_on(&analysis, 1);
    assert_eq!(declared.len(), 2);
    for token in declared {
        assert!(token.modifiers.contains(Modifier::Declaration));
        assert!(token.modifiers.contains(Modifier::Readonly));
    }
}

#[test]
fn method_locals_vanish_at_the_next_method() {
    let text = "PUB start(a, b) : ok | x, y\n  ok := a + b + x + y\n\nPRI stop\n  ok := a";
    let analysis = analyze(text);
    let start = analysis.scope_at_line(1).expect("start scope");
    let kinds: Vec<SymbolKind> = ["a", "b", "ok", "x", "y"]
        .iter()
        .map(|name| start.locals.get(name).expect("local").kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::Parameter,
            SymbolKind::Parameter,
            SymbolKind::ReturnValue,
            SymbolKind::Variable,
            SymbolKind::Variable,
        ]
    );
    let stop = analysis.scope_at_line(4).expect("stop scope");
    assert!(stop.locals.is_empty());
    assert!(tokens_on(&analysis, 4).is_empty());
}

#[test]
fn data_labels_follow_their_second_word() {
    let variable = analyze("DAT\n  loop   long   0");
    assert_eq!(variable.lookup_symbol("loop").map(|symbol| symbol.kind), Some(SymbolKind::Variable));

    let label = analyze("DAT\n  loop   djnz   loop, #-1");
    assert_eq!(label.lookup_symbol("loop").map(|symbol| symbol.kind), Some(SymbolKind::Label));
    let reference = token_at(&label, 1, 16);
    assert_eq!(reference.kind, TokenKind::Label);
}

#[test]
fn inline_labels_stay_in_their_method() {
    let text = "\
PUB start()
  org
spot    nop
        jmp     #spot
  end

PUB stop()
  org
        jmp     #spot
  end
";
    let analysis = analyze(text);
    assert_eq!(token_at(&analysis, 3, 17).kind, TokenKind::Label);
    assert!(tokens_on(&analysis, 8).is_empty());
    assert!(!analysis.is_known_symbol("spot"));
}

#[test]
fn unterminated_block_comment_silences_the_rest() {
    let text = "CON\n  A = 1\n{ never closed\n  B = 2\nPUB go()\n  x := A\n";
    let analysis = analyze(text);
    assert!(analysis.tokens().iter().all(|token| token.line < 2));
    assert!(!analysis.is_known_symbol("b"));
}

#[test]
fn empty_and_comment_only_documents_yield_nothing() {
    for text in ["", "\n\n", "' just a comment\n{{ doc }}\n"] {
        let analysis = analyze(text);
        assert!(analysis.tokens().is_empty(), "{text:?}");
        assert!(analysis.global().is_empty(), "{text:?}");
    }
}

#[test]
fn lone_carriage_returns_end_lines() {
    let classic = "CON\r  FOO = 1\r  BAR = 2\rPUB go() : r\r  r := BAR";
    let analysis = analyze(classic);
    assert!(analysis.is_known_symbol("bar"));
    assert_eq!(token_at(&analysis, 4, 7).kind, TokenKind::Constant);
    let target = token_at(&analysis, 4, 2);
    assert_eq!(target.kind, TokenKind::ReturnValue);
    assert!(target.modifiers.contains(Modifier::Modification));
    assert_eq!(analysis.tokens(), analyze(&classic.replace('\r', "\n")).tokens());
}
