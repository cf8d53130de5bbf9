pub mod completions;
pub mod confirm;
pub mod form;
pub mod input;
pub mod select;
pub mod spinner;
pub mod table;

use rawprompt::PromptError;

/// Exit status for a prompt cancelled with Ctrl-C.
const EXIT_CANCELLED: i32 = 130;

/// Why a command did not finish.
pub(crate) enum Failure {
    Cancelled,
    Message(String),
}

impl From<PromptError> for Failure {
    fn from(e: PromptError) -> Self {
        if e.is_cancelled() {
            Failure::Cancelled
        } else {
            Failure::Message(e.to_string())
        }
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::Message(message)
    }
}

/// Report a failed command and exit: 130 when cancelled, 1 otherwise.
pub(crate) fn finish(result: Result<(), Failure>) {
    match result {
        Ok(()) => {}
        Err(Failure::Cancelled) => {
            eprintln!("Cancelled.");
            std::process::exit(EXIT_CANCELLED);
        }
        Err(Failure::Message(e)) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
