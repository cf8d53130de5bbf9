use rawprompt::{MultiSelectPrompt, SelectPrompt};

use super::Failure;

pub fn run(message: &str, options: Vec<String>, default: usize, cyclic: bool) {
    super::finish(run_inner(message, options, default, cyclic));
}

fn run_inner(
    message: &str,
    options: Vec<String>,
    default: usize,
    cyclic: bool,
) -> Result<(), Failure> {
    let prompt = SelectPrompt::new(message, options)
        .default(default)
        .cyclic(cyclic);
    let index = prompt.ask()?;
    println!("{}", prompt.options[index]);
    Ok(())
}

pub struct MultiArgs {
    pub message: String,
    pub options: Vec<String>,
    pub defaults: Vec<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub cyclic: bool,
}

pub fn run_multi(args: MultiArgs) {
    super::finish(run_multi_inner(args));
}

fn run_multi_inner(args: MultiArgs) -> Result<(), Failure> {
    if let (Some(min), Some(max)) = (args.min, args.max) {
        if min > max {
            return Err(format!("--min ({min}) is larger than --max ({max}).").into());
        }
    }
    let mut prompt = MultiSelectPrompt::new(&args.message, args.options)
        .defaults(args.defaults)
        .cyclic(args.cyclic);
    prompt.min = args.min;
    prompt.max = args.max;
    for index in prompt.ask()? {
        println!("{}", prompt.options[index]);
    }
    Ok(())
}
