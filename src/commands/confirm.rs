use rawprompt::ConfirmPrompt;

use super::Failure;

pub fn run(message: &str, default: bool) {
    super::finish(run_inner(message, default));
}

fn run_inner(message: &str, default: bool) -> Result<(), Failure> {
    let answer = ConfirmPrompt::new(message).default(default).ask()?;
    println!("{answer}");
    Ok(())
}
