use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rawprompt::{
    Form, FormField, FormResult, InputProvider, InputRequest, PromptError, ScriptedTerminal,
    TerminalIo,
};

/// Answers text fields from a map and remembers which keys were asked.
#[derive(Default)]
struct MapProvider {
    answers: HashMap<&'static str, &'static str>,
    asked: Vec<String>,
}

impl MapProvider {
    fn with(answers: &[(&'static str, &'static str)]) -> Self {
        MapProvider {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }

    fn answer(&mut self, request: &InputRequest<'_>) -> rawprompt::Result<String> {
        self.asked.push(request.key.to_string());
        match self.answers.get(request.key) {
            Some(answer) => Ok(answer.to_string()),
            None => Ok(request.default.unwrap_or_default().to_string()),
        }
    }
}

impl InputProvider for MapProvider {
    fn input(&mut self, _: &mut dyn TerminalIo, request: &InputRequest<'_>) -> rawprompt::Result<String> {
        self.answer(request)
    }

    fn password(&mut self, _: &mut dyn TerminalIo, request: &InputRequest<'_>) -> rawprompt::Result<String> {
        self.answer(request)
    }
}

fn contact_form() -> Form {
    Form::new(vec![
        FormField::input("name", "Name"),
        FormField::confirm("has_email", "Do you have an email address?", false),
        FormField::input("email", "Email").when(|r| r.get_bool("has_email") == Some(true)),
    ])
}

#[test]
fn false_condition_skips_the_field() {
    let mut term = ScriptedTerminal::new().keys("Ada\r\r");
    let result = contact_form().run(&mut term).unwrap();
    assert_eq!(result.get_string("name"), Some("Ada"));
    assert_eq!(result.get_bool("has_email"), Some(false));
    assert!(!result.contains_key("email"));
    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["name", "has_email"]);
    assert!(!term.text().contains("Email"));
}

#[test]
fn true_condition_runs_the_field() {
    let mut term = ScriptedTerminal::new().keys("Ada\rya@b.c\r");
    let result = contact_form().run(&mut term).unwrap();
    assert_eq!(result.get_string("email"), Some("a@b.c"));
    assert_eq!(result.len(), 3);
}

#[test]
fn every_kind_produces_its_value() {
    let form = Form::new(vec![
        FormField::confirm("agree", "Agree?", true),
        FormField::input("nick", "Nickname").default_value("anon"),
        FormField::password("pin", "PIN"),
        FormField::select("size", "Size", ["S", "M", "L"]).default_index(1),
        FormField::multi_select("extras", "Extras", ["a", "b", "c"]).default_indices([2]),
    ]);
    let mut term = ScriptedTerminal::new().keys("\r\r1234\r\x1b[B\r \r");
    let result = form.run(&mut term).unwrap();

    let mut expected = FormResult::new();
    expected.insert("agree", true);
    expected.insert("nick", "anon");
    expected.insert("pin", "1234");
    expected.insert("size", 2i64);
    expected.insert("extras", vec![0i64, 2]);
    assert_eq!(result, expected);
    assert!(!term.text().contains("1234"));
}

#[test]
fn nested_forms_yield_nested_results() {
    let form = Form::new(vec![
        FormField::input("name", "Name"),
        FormField::form(
            "address",
            "Address",
            vec![
                FormField::input("city", "City"),
                FormField::input("zip", "ZIP").default_value("0000"),
            ],
        ),
    ]);
    let mut provider = MapProvider::with(&[("name", "Ada"), ("city", "Oslo")]);
    let mut term = ScriptedTerminal::new();
    let result = form.run_with(&mut term, &mut provider).unwrap();

    let address = result.get_form("address").unwrap();
    assert_eq!(address.get_string("city"), Some("Oslo"));
    assert_eq!(address.get_string("zip"), Some("0000"));
    assert_eq!(provider.asked, vec!["name", "city", "zip"]);
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"name":"Ada","address":{"city":"Oslo","zip":"0000"}}"#
    );
}

#[test]
fn nested_conditions_see_the_nested_result() {
    let form = Form::new(vec![FormField::form(
        "shipping",
        "",
        vec![
            FormField::input("country", "Country"),
            FormField::input("state", "State").when(|r| r.get_string("country") == Some("US")),
        ],
    )]);
    let mut provider = MapProvider::with(&[("country", "NO"), ("state", "CA")]);
    let result = form
        .run_with(&mut ScriptedTerminal::new(), &mut provider)
        .unwrap();
    assert!(!result.get_form("shipping").unwrap().contains_key("state"));
    assert_eq!(provider.asked, vec!["country"]);
}

#[test]
fn provider_receives_field_settings() {
    struct Inspect(Option<(String, Option<String>, bool)>);
    impl InputProvider for Inspect {
        fn input(&mut self, _: &mut dyn TerminalIo, r: &InputRequest<'_>) -> rawprompt::Result<String> {
            self.0 = Some((
                r.message.to_string(),
                r.placeholder.map(str::to_string),
                r.validator.is_some(),
            ));
            Ok("x".into())
        }
        fn password(&mut self, _: &mut dyn TerminalIo, _: &InputRequest<'_>) -> rawprompt::Result<String> {
            unreachable!()
        }
    }

    let form = Form::new(vec![FormField::input("email", "Email")
        .placeholder("you@example.com")
        .validate(|_| Ok(()))]);
    let mut inspect = Inspect(None);
    form.run_with(&mut ScriptedTerminal::new(), &mut inspect).unwrap();
    assert_eq!(
        inspect.0,
        Some(("Email".to_string(), Some("you@example.com".to_string()), true))
    );
}

#[test]
fn errors_name_the_failing_field() {
    let form = Form::new(vec![
        FormField::input("name", "Name"),
        FormField::select("color", "Color", Vec::<String>::new()),
    ]);
    let mut provider = MapProvider::with(&[("name", "Ada")]);
    let err = form
        .run_with(&mut ScriptedTerminal::new(), &mut provider)
        .unwrap_err();
    assert_eq!(err.field_path(), "color");
    assert!(matches!(err.root(), PromptError::NoOptions));
    assert_eq!(err.to_string(), "field `color`: no options to choose from");
}

#[test]
fn cancel_inside_nested_form_is_still_a_cancel() {
    let form = Form::new(vec![FormField::form(
        "account",
        "Account",
        vec![FormField::confirm("admin", "Admin?", false)],
    )]);
    let mut term = ScriptedTerminal::new().keys("\x03");
    let err = form.run(&mut term).unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.field_path(), "account.admin");
    assert!(!term.is_raw());
}

#[test]
fn form_validator_can_reject() {
    let form = Form::new(vec![
        FormField::password("password", "Password"),
        FormField::password("repeat", "Repeat password"),
    ])
    .validate(|r| {
        if r.get_string("password") == r.get_string("repeat") {
            Ok(())
        } else {
            Err("passwords do not match".to_string())
        }
    });

    let mut provider = MapProvider::with(&[("password", "a"), ("repeat", "b")]);
    let err = form
        .run_with(&mut ScriptedTerminal::new(), &mut provider)
        .unwrap_err();
    assert!(matches!(err, PromptError::FormValidation(ref m) if m == "passwords do not match"));

    let mut provider = MapProvider::with(&[("password", "a"), ("repeat", "a")]);
    assert!(form.run_with(&mut ScriptedTerminal::new(), &mut provider).is_ok());
}

#[test]
fn title_is_printed_first() {
    let form = Form::new(vec![FormField::confirm("ok", "OK?", true)]).title("Setup");
    let mut term = ScriptedTerminal::new().keys("\r");
    form.run(&mut term).unwrap();
    let text = term.text();
    let title_at = text.find("Setup").unwrap();
    let question_at = text.find("OK?").unwrap();
    assert!(title_at < question_at);
}

#[test]
fn result_title_is_echoed() {
    let form = Form::new(vec![
        FormField::confirm("tos", "Do you accept the terms of service?", true).result_title("Terms")
    ]);
    let mut term = ScriptedTerminal::new().keys("\r");
    form.run(&mut term).unwrap();
    assert!(term.text().contains("Terms"));
}

#[test]
fn forms_run_without_a_tty() {
    let mut term = ScriptedTerminal::non_interactive().lines(["Ada", "yes", "ada@example.com"]);
    let result = contact_form().run(&mut term).unwrap();
    assert_eq!(result.get_string("email"), Some("ada@example.com"));
}
