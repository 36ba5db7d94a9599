use crate::analysis::Analysis;
use crate::builtins::{BuiltinEntry, BuiltinType};
use crate::position::Position;
use crate::state::section_start;
use crate::strip::code_view;
use crate::symbols::{Symbol, SymbolKind};
use crate::tokenizer::{is_name_char, leading_name, starts_like_name};
use crate::utils::line_text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHelpResult {
    /// The whole call form, e.g. `blink(pin, delay)`.
    pub label: String,
    pub documentation: Option<String>,
    pub parameters: Vec<ParameterHelp>,
    /// Index into `parameters`, clamped to the last one.
    pub active_parameter: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterHelp {
    pub label: String,
    pub documentation: Option<String>,
}

/// An open call to the left of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenCall<'a> {
    callee: &'a str,
    commas: usize,
}

pub fn signature_help(analysis: &Analysis, text: &str, position: Position) -> Option<SignatureHelpResult> {
    let line = line_text(text, position.line)?;
    if section_start(line).is_some_and(|section| section.is_method()) {
        return None;
    }
    let view = code_view(line);
    let call = open_call(&view, position.column)?;

    let mut help = match analysis.lookup_symbol(call.callee) {
        Some(symbol) if symbol.kind == SymbolKind::Method => method_help(symbol),
        _ => builtin_help(&analysis.is_builtin(call.callee)?)?,
    };
    help.active_parameter = call.commas.min(help.parameters.len().saturating_sub(1));
    Some(help)
}

/// Walks left from `column` to the innermost unclosed `(` and names the word in front of it.
fn open_call(view: &str, column: usize) -> Option<OpenCall<'_>> {
    let bytes = view.as_bytes();
    let mut depth = 0usize;
    let mut commas = 0;
    let mut open = None;
    for at in (0..column.min(bytes.len())).rev() {
        match bytes[at] {
            b')' => depth += 1,
            b'(' if depth == 0 => {
                open = Some(at);
                break;
            }
            b'(' => depth -= 1,
            b',' if depth == 0 => commas += 1,
            _ => {}
        }
    }

    let before = view.get(..open?)?.trim_end();
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, ch)| is_name_char(*ch))
        .last()
        .map(|(at, _)| at)?;
    let callee = before.get(start..)?;
    starts_like_name(callee).then_some(OpenCall { callee, commas })
}

fn method_help(symbol: &Symbol) -> SignatureHelpResult {
    let signature = symbol.signature.as_deref().unwrap_or(&symbol.name);
    let name = leading_name(signature);
    let rest = signature.get(name.len()..).unwrap_or_default();

    let (parameters, tail) = match rest.trim_start().strip_prefix('(') {
        Some(inside) => match inside.split_once(')') {
            Some((list, tail)) => (list, tail),
            None => (inside, ""),
        },
        None => ("", rest),
    };
    let parameters = comma_list(parameters);
    let returns = tail
        .split('|')
        .next()
        .and_then(|head| head.trim().strip_prefix(':'))
        .map(comma_list)
        .unwrap_or_default();

    let mut label = format!("{name}({})", parameters.join(", "));
    if !returns.is_empty() {
        label.push_str(&format!(" : {}", returns.join(", ")));
    }
    SignatureHelpResult {
        label,
        documentation: symbol.declaration_comment.clone(),
        parameters: parameters
            .into_iter()
            .map(|label| ParameterHelp {
                label: label.to_string(),
                documentation: None,
            })
            .collect(),
        active_parameter: 0,
    }
}

fn builtin_help(entry: &BuiltinEntry) -> Option<SignatureHelpResult> {
    if entry.kind != BuiltinType::Method || entry.signature.is_empty() {
        return None;
    }
    Some(SignatureHelpResult {
        label: entry.signature.to_string(),
        documentation: (!entry.description.is_empty()).then(|| entry.description.to_string()),
        parameters: entry
            .parameters
            .iter()
            .map(|parameter| match parameter.split_once(" - ") {
                Some((name, doc)) => ParameterHelp {
                    label: name.to_string(),
                    documentation: Some(doc.to_string()),
                },
                None => ParameterHelp {
                    label: parameter.to_string(),
                    documentation: None,
                },
            })
            .collect(),
        active_parameter: 0,
    })
}

fn comma_list(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::test_support::{sample_analysis, sample_source};

    /// Help with the cursor placed just after `marker` on the first line holding it.
    fn help_after(marker: &str) -> Option<SignatureHelpResult> {
        let (line, column) = sample_source()
            .lines()
            .enumerate()
            .find_map(|(index, text)| text.find(marker).map(|at| (index, at + marker.len())))
            .expect("marker in sample");
        signature_help(sample_analysis(), sample_source(), Position::new(line, column))
    }

    fn labels(help: &SignatureHelpResult) -> Vec<&str> {
        help.parameters.iter().map(|parameter| parameter.label.as_str()).collect()
    }

    #[test]
    fn user_method_uses_its_declaration() {
        let help = help_after("blink(pin, ").expect("help");
        assert_eq!(help.label, "blink(pin, delay)");
        assert_eq!(labels(&help), vec!["pin", "delay"]);
        assert_eq!(help.active_parameter, 1);
    }

    #[test]
    fn return_values_join_the_label() {
        let text = "PUB go()\n  split(1, 2)\n\nPRI split(a, b) : hi, lo | t";
        let help = signature_help(&analyze(text), text, Position::new(1, 8)).expect("help");
        assert_eq!(help.label, "split(a, b) : hi, lo");
        assert_eq!(help.active_parameter, 0);
    }

    #[test]
    fn nested_calls_are_skipped_over() {
        let help = help_after("cogspin(NEWCOG, blink(pin, delay), ").expect("help");
        assert_eq!(help.label, "COGSPIN(CogNum, Method({Pars}), StkAddr) : CogID");
        assert_eq!(labels(&help), vec!["CogNum", "Method", "StkAddr"]);
        assert_eq!(help.active_parameter, 2);
    }

    #[test]
    fn builtin_parameters_carry_their_docs() {
        let help = help_after("pintoggle(").expect("help");
        assert_eq!(help.label, "PINTOGGLE(PinField)");
        assert_eq!(help.documentation.as_deref(), Some("Drive and toggle PinField pin(s)"));
        assert_eq!(help.parameters[0].label, "PinField");
        assert!(help.parameters[0].documentation.is_some());
    }

    #[test]
    fn active_parameter_is_clamped() {
        let text = "PUB go()\n  pintoggle(1, 2, 3)";
        let help = signature_help(&analyze(text), text, Position::new(1, 18)).expect("help");
        assert_eq!(help.active_parameter, 0);
    }

    #[test]
    fn no_help_outside_calls_or_on_declarations() {
        assert!(help_after("ticks").is_none());
        assert!(help_after("PRI blink(").is_none());
        let text = "PUB go()\n  x := (1 + 2)\n  mystery(1)";
        let analysis = analyze(text);
        assert!(signature_help(&analysis, text, Position::new(1, 9)).is_none());
        assert!(signature_help(&analysis, text, Position::new(2, 10)).is_none());
    }
}
