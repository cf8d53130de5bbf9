use rawprompt::validate;
use rawprompt::{Form, FormField};

use super::Failure;

pub fn run(compact: bool) {
    super::finish(run_inner(compact));
}

fn run_inner(compact: bool) -> Result<(), Failure> {
    let result = signup_form().ask()?;
    let json = if compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .map_err(|e| format!("Failed to serialize answers: {e}"))?;
    println!("{json}");
    Ok(())
}

fn signup_form() -> Form {
    Form::new(vec![
        FormField::input("name", "What's your name?")
            .validator(validate::required("Name"))
            .result_title("Name"),
        FormField::confirm("has_email", "Do you want email updates?", false)
            .result_title("Email updates"),
        FormField::input("email", "Email address")
            .placeholder("you@example.com")
            .validate(|s| {
                if s.contains('@') {
                    Ok(())
                } else {
                    Err("enter a valid email address".to_string())
                }
            })
            .when(|r| r.get_bool("has_email") == Some(true))
            .result_title("Email"),
        FormField::password("password", "Choose a password")
            .validator(validate::min_length(8))
            .result_title("Password"),
        FormField::select("plan", "Which plan?", ["Free", "Pro", "Team"]).result_title("Plan"),
        FormField::multi_select(
            "interests",
            "What are you interested in?",
            ["Releases", "Security notices", "Tips", "Events"],
        )
        .default_indices([0])
        .result_title("Interests"),
        FormField::form(
            "company",
            "Company details",
            vec![
                FormField::input("name", "Company name").result_title("Company"),
                FormField::input("size", "Team size")
                    .default_value("1")
                    .validate(|s| {
                        s.parse::<u32>()
                            .map(|_| ())
                            .map_err(|_| "enter a whole number".to_string())
                    })
                    .result_title("Team size"),
            ],
        )
        .when(|r| r.get_int("plan") == Some(2)),
    ])
    .title("Create your account")
    .validate(|r| match (r.get_string("name"), r.get_string("password")) {
        (Some(name), Some(password)) if !name.is_empty() && password.contains(name) => {
            Err("the password must not contain your name".to_string())
        }
        _ => Ok(()),
    })
}
