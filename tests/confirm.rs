use rawprompt::{ConfirmPrompt, PromptError, ScriptedTerminal, TermOp};

/// Text printed since the line was last cleared: the echoed answer.
fn echoed(term: &ScriptedTerminal) -> String {
    let ops = term.ops();
    let start = ops
        .iter()
        .rposition(|op| matches!(op, TermOp::ClearLine | TermOp::ClearToEnd))
        .map_or(0, |i| i + 1);
    ops[start..]
        .iter()
        .filter_map(|op| match op {
            TermOp::Print(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

fn ask(term: &mut ScriptedTerminal, default: bool) -> rawprompt::Result<bool> {
    ConfirmPrompt::new("Continue?").default(default).run(term)
}

#[test]
fn enter_takes_the_default() {
    let mut term = ScriptedTerminal::new().keys("\r");
    assert!(ask(&mut term, true).unwrap());

    let mut term = ScriptedTerminal::new().keys("\r");
    assert!(!ask(&mut term, false).unwrap());
}

#[test]
fn n_answers_no() {
    let mut term = ScriptedTerminal::new().keys("n");
    assert!(!ask(&mut term, true).unwrap());
    assert!(echoed(&term).contains("No"));
}

#[test]
fn ctrl_c_cancels_and_restores() {
    let mut term = ScriptedTerminal::new().keys("\x03");
    let err = ask(&mut term, true).unwrap_err();
    assert!(matches!(err, PromptError::Cancelled));
    assert!(!term.is_raw());
    assert!(!term.is_cursor_hidden());
    assert_eq!(term.ops().last(), Some(&TermOp::Restore));
}

#[test]
fn unrelated_keys_are_ignored() {
    let mut term = ScriptedTerminal::new().keys("xq \x1b[AY");
    assert!(ask(&mut term, false).unwrap());
    assert_eq!(term.pending_keys(), 0);
}

#[test]
fn mode_changes_wrap_the_prompt() {
    let mut term = ScriptedTerminal::new().keys("y");
    ask(&mut term, false).unwrap();
    let ops = term.ops();
    assert_eq!(ops.first(), Some(&TermOp::MakeRaw));
    assert_eq!(ops.get(1), Some(&TermOp::HideCursor));
    assert_eq!(&ops[ops.len() - 2..], &[TermOp::ShowCursor, TermOp::Restore]);
    assert_eq!(term.count(&TermOp::MakeRaw), 1);
    assert_eq!(term.count(&TermOp::Restore), 1);
}

#[test]
fn result_title_replaces_the_question() {
    let mut term = ScriptedTerminal::new().keys("y");
    ConfirmPrompt::new("Do you want to continue with the install?")
        .result_title("Install")
        .run(&mut term)
        .unwrap();
    let answered = echoed(&term);
    assert!(answered.contains("Install"));
    assert!(answered.contains("Yes"));
    assert!(!answered.contains("continue with"));
}

#[test]
fn fallback_reads_a_line() {
    let mut term = ScriptedTerminal::non_interactive().lines(["YES"]);
    assert!(ask(&mut term, false).unwrap());
    assert_eq!(term.count(&TermOp::MakeRaw), 0);
    assert_eq!(term.count(&TermOp::HideCursor), 0);
    assert_eq!(term.count(&TermOp::Restore), 0);

    let mut term = ScriptedTerminal::non_interactive().lines(["whatever"]);
    assert!(ask(&mut term, true).unwrap());
}

#[test]
fn fallback_uses_default_on_closed_stdin() {
    let mut term = ScriptedTerminal::non_interactive();
    assert!(ask(&mut term, true).unwrap());
    let mut term = ScriptedTerminal::non_interactive();
    assert!(!ask(&mut term, false).unwrap());
}
