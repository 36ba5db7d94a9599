use crate::analysis::Analysis;
use crate::position::{Position, Range};
use crate::utils::identifier_at;

/// Declaration of the user symbol under `position`, resolved in the method enclosing that line.
pub fn goto_definition(analysis: &Analysis, text: &str, position: Position) -> Option<Range> {
    let found = identifier_at(text, position)?;
    if found.is_member {
        return None;
    }
    let symbol = [found.name, found.bare()]
        .into_iter()
        .find_map(|name| analysis.resolve_at_line(name, position.line))
        .and_then(|resolved| resolved.symbol)?;
    Some(Range::on_line(symbol.line, symbol.column, symbol.name.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::test_support::{sample_analysis, sample_source};

    /// Position of the first character of `word` inside the first line containing `context`.
    fn position_of(context: &str, word: &str) -> Position {
        sample_source()
            .lines()
            .enumerate()
            .find_map(|(line, text)| {
                let at = text.find(context)?;
                let offset = context.find(word)?;
                Some(Position::new(line, at + offset))
            })
            .expect("context in sample")
    }

    fn definition(context: &str, word: &str) -> Option<Range> {
        goto_definition(sample_analysis(), sample_source(), position_of(context, word))
    }

    #[test]
    fn parameters_jump_to_the_signature() {
        let target = position_of("PRI blink(pin", "pin");
        assert_eq!(
            definition("pintoggle(pin)", "pin"),
            Some(Range::on_line(target.line, target.column, 3))
        );
    }

    #[test]
    fn instance_variables_jump_to_var() {
        let target = position_of("long  ticks", "ticks");
        assert_eq!(
            definition("ticks++", "ticks"),
            Some(Range::on_line(target.line, target.column, 5))
        );
    }

    #[test]
    fn labels_resolve_inside_their_block() {
        let local = position_of(".wait   drvnot", ".wait");
        assert_eq!(definition("jmp     #.wait", "wait"), Some(Range::on_line(local.line, 0, 5)));

        let inline = position_of("loop    drvnot", "loop");
        assert_eq!(definition("#loop", "loop"), Some(Range::on_line(inline.line, 0, 4)));
    }

    #[test]
    fn builtins_members_and_unknown_names_have_no_definition() {
        assert_eq!(definition("t := getct()", "getct"), None);
        assert_eq!(definition("ser.str(", "str"), None);
        let text = "PUB go()\n  mystery := 1";
        assert_eq!(goto_definition(&analyze(text), text, Position::new(1, 3)), None);
    }

    #[test]
    fn method_locals_do_not_leak() {
        let text = "PUB one() | x\n  x := 1\n\nPUB two()\n  x := 2";
        let analysis = analyze(text);
        assert_eq!(
            goto_definition(&analysis, text, Position::new(1, 2)),
            Some(Range::on_line(0, 12, 1))
        );
        assert_eq!(goto_definition(&analysis, text, Position::new(4, 2)), None);
    }
}
