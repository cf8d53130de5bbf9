use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rawprompt::validate;
use rawprompt::{InputPrompt, PasswordPrompt, PromptError, ScriptedTerminal, TermOp};

const LEFT: &str = "\x1b[D";
const HOME: &str = "\x1b[H";
const DELETE: &str = "\x1b[3~";

fn name() -> InputPrompt {
    InputPrompt::new("What's your name?")
}

#[test]
fn typed_text_is_returned() {
    let mut term = ScriptedTerminal::new().keys("Ada Lovelace\r");
    assert_eq!(name().run(&mut term).unwrap(), "Ada Lovelace");
    assert!(!term.is_raw());
    assert!(!term.is_cursor_hidden());
}

#[test]
fn answer_is_trimmed() {
    let mut term = ScriptedTerminal::new().keys("  Ada  \r");
    assert_eq!(name().run(&mut term).unwrap(), "Ada");
}

#[test]
fn editing_keys_work() {
    let mut term = ScriptedTerminal::new().keys("abx\x7fc\r");
    assert_eq!(name().run(&mut term).unwrap(), "abc");

    let mut term = ScriptedTerminal::new().keys(format!("ac{LEFT}b\r"));
    assert_eq!(name().run(&mut term).unwrap(), "abc");

    let mut term = ScriptedTerminal::new().keys(format!("xbc{HOME}{DELETE}a\r"));
    assert_eq!(name().run(&mut term).unwrap(), "abc");
}

#[test]
fn multibyte_characters_are_single_keys() {
    let mut term = ScriptedTerminal::new().keys("héllo wörld\x7f\r");
    assert_eq!(name().run(&mut term).unwrap(), "héllo wörl");
}

#[test]
fn empty_answer_uses_default() {
    let mut term = ScriptedTerminal::new().keys("\r");
    assert_eq!(name().default("guest").run(&mut term).unwrap(), "guest");

    let mut term = ScriptedTerminal::new().keys("\r");
    assert_eq!(name().run(&mut term).unwrap(), "");
}

#[test]
fn placeholder_is_shown_until_typing() {
    let mut term = ScriptedTerminal::new().keys("x\r");
    name().placeholder("Jane Doe").run(&mut term).unwrap();
    let ops = term.ops();
    let first_x = ops
        .iter()
        .position(|op| *op == TermOp::Print("x".to_string()))
        .unwrap();
    let before: String = ops[..first_x]
        .iter()
        .filter_map(|op| match op {
            TermOp::Print(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert!(before.contains("Jane Doe"));
}

#[test]
fn invalid_answers_keep_the_prompt_open() {
    let mut term = ScriptedTerminal::new().keys("\rAda\r");
    let answer = name()
        .validator(validate::required("Name"))
        .run(&mut term)
        .unwrap();
    assert_eq!(answer, "Ada");
    assert!(term.text().contains("Name is required"));
}

#[test]
fn returned_value_always_passes_validation() {
    let check = validate::min_length(3);
    let mut term = ScriptedTerminal::new().keys("a\rb\rc\r");
    let answer = name().validator(check.clone()).run(&mut term).unwrap();
    assert_eq!(check(&answer), Ok(()));
    assert_eq!(answer, "abc");
    assert!(term.text().contains("at least 3 characters"));
}

#[test]
fn every_edit_is_validated_but_errors_wait_for_enter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let check = validate::from_fn(move |s| {
        counted.fetch_add(1, Ordering::SeqCst);
        validate::min_length(3)(s)
    });
    let mut term = ScriptedTerminal::new().keys("ab\x7fcd\r");
    let answer = name().validator(check).run(&mut term).unwrap();
    assert_eq!(answer, "acd");
    // Five edits plus Enter.
    assert_eq!(calls.load(Ordering::SeqCst), 6);
    assert!(!term.text().contains("at least 3 characters"));
}

#[test]
fn ctrl_c_cancels_input() {
    let mut term = ScriptedTerminal::new().keys("Ad\x03");
    let err = name().run(&mut term).unwrap_err();
    assert!(err.is_cancelled());
    assert!(!term.is_raw());
}

#[test]
fn closed_input_is_an_io_error() {
    let mut term = ScriptedTerminal::new().keys("Ad");
    assert!(matches!(name().run(&mut term), Err(PromptError::Io(_))));
}

#[test]
fn password_is_masked() {
    let mut term = ScriptedTerminal::new().keys("hunter2\r");
    let secret = PasswordPrompt::new("Password").run(&mut term).unwrap();
    assert_eq!(secret, "hunter2");
    let text = term.text();
    assert!(!text.contains("hunter2"));
    assert!(text.contains("*******"));
}

#[test]
fn password_mask_is_configurable() {
    let mut term = ScriptedTerminal::new().keys("pw\r");
    PasswordPrompt::new("PIN").mask('•').run(&mut term).unwrap();
    assert!(term.text().contains("••"));
}

#[test]
fn fallback_loops_until_valid() {
    let mut term = ScriptedTerminal::non_interactive().lines(["", "  ok  "]);
    let answer = name()
        .validator(validate::required("Name"))
        .run(&mut term)
        .unwrap();
    assert_eq!(answer, "ok");
    assert!(term.text().contains("Name is required"));
    assert_eq!(term.count(&TermOp::MakeRaw), 0);
}

#[test]
fn fallback_shows_and_uses_default() {
    let mut term = ScriptedTerminal::non_interactive().lines([""]);
    assert_eq!(name().default("guest").run(&mut term).unwrap(), "guest");
    assert!(term.text().contains("(guest)"));
}

#[test]
fn fallback_eof_is_an_error() {
    let mut term = ScriptedTerminal::non_interactive();
    assert!(matches!(name().run(&mut term), Err(PromptError::Io(_))));
}
