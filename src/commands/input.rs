use rawprompt::validate;
use rawprompt::{InputPrompt, PasswordPrompt, Validator};

use super::Failure;

pub struct InputArgs {
    pub message: String,
    pub default: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
}

pub fn run(args: InputArgs) {
    super::finish(run_inner(args));
}

fn run_inner(args: InputArgs) -> Result<(), Failure> {
    let mut prompt = InputPrompt::new(&args.message);
    prompt.default = args.default;
    prompt.placeholder = args.placeholder;
    prompt.validator = validator(args.required, args.min_length);
    let answer = prompt.ask()?;
    println!("{answer}");
    Ok(())
}

pub fn run_password(message: &str, mask: char, min_length: Option<usize>) {
    super::finish(run_password_inner(message, mask, min_length));
}

fn run_password_inner(message: &str, mask: char, min_length: Option<usize>) -> Result<(), Failure> {
    let mut prompt = PasswordPrompt::new(message).mask(mask);
    prompt.validator = validator(true, min_length);
    let secret = prompt.ask()?;
    println!("Got {} characters.", secret.chars().count());
    Ok(())
}

fn validator(required: bool, min_length: Option<usize>) -> Option<Validator> {
    let mut checks = Vec::new();
    if required {
        checks.push(validate::required("answer"));
    }
    if let Some(min) = min_length {
        checks.push(validate::min_length(min));
    }
    match checks.len() {
        0 => None,
        1 => checks.pop(),
        _ => Some(validate::all(checks)),
    }
}
