//! Yes/no questions answered with a single key.

use std::fmt;

use tracing::debug;

use crate::config::{PromptConfig, PromptConfigOverride};
use crate::error::{PromptError, Result};
use crate::keys::{read_key, Key};
use crate::raw_mode::with_raw_mode_and_fallback;
use crate::terminal::{StdTerminal, TerminalIo};

/// What a single key press does to a pending confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStep {
    Resolved(bool),
    Cancelled,
    /// The key means nothing here; keep waiting, don't redraw.
    Ignored,
}

/// Enter takes the default, `y`/`n` in either case decide, Ctrl-C cancels.
pub fn confirm_key(key: Key, default: bool) -> ConfirmStep {
    match key {
        Key::Enter => ConfirmStep::Resolved(default),
        Key::Char('y' | 'Y') => ConfirmStep::Resolved(true),
        Key::Char('n' | 'N') => ConfirmStep::Resolved(false),
        Key::CtrlC => ConfirmStep::Cancelled,
        _ => ConfirmStep::Ignored,
    }
}

/// Line-mode rule: `y`/`yes` and `n`/`no` in any case decide, anything else
/// (including an empty line) takes the default.
pub fn parse_confirm_answer(line: &str, default: bool) -> bool {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// `[Y/n]` when the default is yes, `[y/N]` otherwise.
pub fn confirm_hint(default: bool) -> &'static str {
    if default {
        "[Y/n]"
    } else {
        "[y/N]"
    }
}

/// A yes/no question.
///
/// Display: `? message [Y/n]`, replaced by `✔ message Yes` once answered.
#[derive(Clone, Default)]
pub struct ConfirmPrompt {
    pub message: String,
    pub default: bool,
    pub result_title: Option<String>,
    pub config: Option<PromptConfigOverride>,
}

impl ConfirmPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        ConfirmPrompt {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn result_title(mut self, title: impl Into<String>) -> Self {
        self.result_title = Some(title.into());
        self
    }

    pub fn config(mut self, config: PromptConfigOverride) -> Self {
        self.config = Some(config);
        self
    }

    pub fn run(&self, term: &mut dyn TerminalIo) -> Result<bool> {
        let config = PromptConfig::resolve(self.config.as_ref());
        let prompt = format!(
            "{} {} ",
            config.question(&self.message),
            (config.hint)(confirm_hint(self.default))
        );
        with_raw_mode_and_fallback(
            term,
            |t| self.run_interactive(t, &config, &prompt),
            |t| self.run_fallback(t, &prompt),
        )
    }

    pub fn ask(&self) -> Result<bool> {
        self.run(&mut StdTerminal::new())
    }

    fn run_interactive(
        &self,
        term: &mut dyn TerminalIo,
        config: &PromptConfig,
        prompt: &str,
    ) -> Result<bool> {
        term.show_cursor()?;
        term.print(prompt)?;
        term.flush()?;
        loop {
            match confirm_key(read_key(term)?, self.default) {
                ConfirmStep::Resolved(answer) => {
                    term.move_to_start()?;
                    term.clear_line()?;
                    let shown = if answer { "Yes" } else { "No" };
                    let line =
                        config.answered(&self.message, self.result_title.as_deref(), shown);
                    term.println(&line)?;
                    term.flush()?;
                    return Ok(answer);
                }
                ConfirmStep::Cancelled => {
                    term.move_to_start()?;
                    term.clear_line()?;
                    term.flush()?;
                    return Err(PromptError::Cancelled);
                }
                ConfirmStep::Ignored => {}
            }
        }
    }

    fn run_fallback(&self, term: &mut dyn TerminalIo, prompt: &str) -> Result<bool> {
        term.print(prompt)?;
        term.flush()?;
        match term.read_line() {
            Ok(line) => Ok(parse_confirm_answer(&line, self.default)),
            Err(e) => {
                debug!(error = %e, "no answer on stdin, using default");
                term.println("")?;
                Ok(self.default)
            }
        }
    }
}

impl fmt::Debug for ConfirmPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmPrompt")
            .field("message", &self.message)
            .field("default", &self.default)
            .field("result_title", &self.result_title)
            .finish_non_exhaustive()
    }
}

/// Ask a yes/no question on the process's terminal.
pub fn confirm(message: &str, default: bool, config: Option<PromptConfigOverride>) -> Result<bool> {
    confirm_prompt(message, default, config).ask()
}

fn confirm_prompt(message: &str, default: bool, config: Option<PromptConfigOverride>) -> ConfirmPrompt {
    ConfirmPrompt {
        config,
        ..ConfirmPrompt::new(message).default(default)
    }
}
