//! The process-wide override is shared state, so everything touching it
//! lives in this one test binary and runs as a single test.

use rawprompt::{
    global_config, reset_global_config, set_global_config, ConfirmPrompt, PromptConfigOverride,
    ScriptedTerminal, SelectPrompt,
};

#[test]
fn global_and_call_overrides_layer_on_the_default() {
    set_global_config(PromptConfigOverride::plain());
    assert!(!global_config().is_empty());

    let mut term = ScriptedTerminal::new().keys("y");
    ConfirmPrompt::new("Continue?").run(&mut term).unwrap();
    let text = term.text();
    assert!(text.starts_with("? Continue? [y/N] "));
    assert!(text.ends_with("✔ Continue? Yes\r\n"));

    // A call-local override wins over the global one, field by field.
    let shout = PromptConfigOverride::new().answer(|s| s.to_uppercase());
    let mut term = ScriptedTerminal::new().keys("\x1b[B\r");
    SelectPrompt::new("Pick", ["one", "two"])
        .config(shout)
        .run(&mut term)
        .unwrap();
    assert!(term.last_frame().starts_with("✔ Pick TWO"));

    let arrows = PromptConfigOverride::new()
        .question_prefix(|_| ">>".to_string())
        .answer_prefix(|_| String::new());
    set_global_config(arrows);
    let mut term = ScriptedTerminal::new().keys("n");
    ConfirmPrompt::new("Again?").run(&mut term).unwrap();
    let text = term.text();
    assert!(text.contains(">>"));
    assert!(text.contains("Again?"));

    reset_global_config();
    assert!(global_config().is_empty());
    let mut term = ScriptedTerminal::new().keys("y");
    ConfirmPrompt::new("Styled?").run(&mut term).unwrap();
    assert!(term.text().contains('\u{1b}'));
}
