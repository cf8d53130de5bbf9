use std::thread;
use std::time::Duration;

use crossterm::style::Stylize;
use rawprompt::{Spinner, SpinnerStyle};

use super::Failure;

pub fn run(message: &str, style: SpinnerStyle, duration_ms: u64, interval_ms: u64) {
    super::finish(run_inner(message, style, duration_ms, interval_ms));
}

fn run_inner(
    message: &str,
    style: SpinnerStyle,
    duration_ms: u64,
    interval_ms: u64,
) -> Result<(), Failure> {
    let mut spinner = Spinner::start(message, style, Duration::from_millis(interval_ms))?;
    let half = Duration::from_millis(duration_ms / 2);
    thread::sleep(half);
    spinner.set_message(format!("{message} (almost there)"));
    thread::sleep(half);
    spinner.stop(Some(&format!("{} {message} done", "✔".green().bold())))?;
    Ok(())
}
