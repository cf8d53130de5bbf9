//! Pick one option from a list.

use std::fmt;

use tracing::debug;

use crate::config::{PromptConfig, PromptConfigOverride};
use crate::error::{PromptError, Result};
use crate::keys::{read_key, Key};
use crate::navigation::Navigator;
use crate::raw_mode::with_raw_mode_and_fallback;
use crate::render::{clear_region, re_render, render_with_prompt, replace_with_summary};
use crate::terminal::{StdTerminal, TerminalIo};

pub(crate) const SELECT_HELP: &str = "↑/↓ to move, enter to select";

/// `> option` for the highlighted row, `  option` otherwise.
pub fn format_select_row(option: &str, highlighted: bool) -> String {
    if highlighted {
        format!("> {option}")
    } else {
        format!("  {option}")
    }
}

/// Line-mode answer: a 1-based option number. Anything else, including an
/// empty line, keeps `default`.
pub fn parse_select_answer(line: &str, count: usize, default: usize) -> usize {
    match line.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => n - 1,
        _ => default,
    }
}

/// A single-choice list. Resolves to the index of the chosen option.
///
/// Display:
/// ```text
/// ? message
///
/// > first
///   second
/// ↑/↓ to move, enter to select
/// ```
#[derive(Clone, Default)]
pub struct SelectPrompt {
    pub message: String,
    pub options: Vec<String>,
    /// Initially highlighted option; out of range means the first.
    pub default: usize,
    /// Wrap around at either end of the list.
    pub cyclic: bool,
    /// Key help under the list; `None` shows the built-in text.
    pub help: Option<String>,
    pub result_title: Option<String>,
    pub config: Option<PromptConfigOverride>,
}

impl SelectPrompt {
    pub fn new<I, S>(message: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectPrompt {
            message: message.into(),
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn default(mut self, index: usize) -> Self {
        self.default = index;
        self
    }

    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
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

    /// Fails with [`PromptError::NoOptions`] before touching the terminal
    /// when there is nothing to choose from.
    pub fn run(&self, term: &mut dyn TerminalIo) -> Result<usize> {
        if self.options.is_empty() {
            return Err(PromptError::NoOptions);
        }
        let config = PromptConfig::resolve(self.config.as_ref());
        let nav = Navigator::new(self.options.len(), self.cyclic).starting_at(self.default);
        with_raw_mode_and_fallback(
            term,
            |t| self.run_interactive(t, &config, nav),
            |t| self.run_fallback(t, &config, nav.current()),
        )
    }

    pub fn ask(&self) -> Result<usize> {
        self.run(&mut StdTerminal::new())
    }

    fn draw(
        &self,
        term: &mut dyn TerminalIo,
        config: &PromptConfig,
        current: usize,
    ) -> std::io::Result<()> {
        for (i, option) in self.options.iter().enumerate() {
            let row = format_select_row(option, i == current);
            if i == current {
                term.println(&(config.answer)(&row))?;
            } else {
                term.println(&row)?;
            }
        }
        let help = self.help.as_deref().unwrap_or(SELECT_HELP);
        if !help.is_empty() {
            term.println(&(config.hint)(help))?;
        }
        Ok(())
    }

    fn run_interactive(
        &self,
        term: &mut dyn TerminalIo,
        config: &PromptConfig,
        mut nav: Navigator,
    ) -> Result<usize> {
        let question = config.question(&self.message);
        render_with_prompt(term, &question, |t, _| self.draw(t, config, nav.current()))?;
        loop {
            let key = read_key(term)?;
            match key {
                Key::Up | Key::Down => {
                    let Some(direction) = key.direction() else {
                        continue;
                    };
                    let (current, moved) = nav.process_arrow_key(direction);
                    if moved {
                        re_render(term, |t, _| self.draw(t, config, current))?;
                    }
                }
                Key::Enter => {
                    let index = nav.current();
                    let summary = config.answered(
                        &self.message,
                        self.result_title.as_deref(),
                        &self.options[index],
                    );
                    replace_with_summary(term, &summary)?;
                    return Ok(index);
                }
                Key::CtrlC => {
                    clear_region(term)?;
                    term.flush()?;
                    return Err(PromptError::Cancelled);
                }
                _ => {}
            }
        }
    }

    fn run_fallback(
        &self,
        term: &mut dyn TerminalIo,
        config: &PromptConfig,
        default: usize,
    ) -> Result<usize> {
        term.println(&config.question(&self.message))?;
        for (i, option) in self.options.iter().enumerate() {
            let marker = if i == default { ">" } else { " " };
            term.println(&format!("{marker} {}) {option}", i + 1))?;
        }
        term.print(&(config.hint)(&format!("Enter a number [{}]: ", default + 1)))?;
        term.flush()?;
        let index = match term.read_line() {
            Ok(line) => parse_select_answer(&line, self.options.len(), default),
            Err(e) => {
                debug!(error = %e, "no answer on stdin, using default");
                term.println("")?;
                default
            }
        };
        Ok(index)
    }
}

impl fmt::Debug for SelectPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectPrompt")
            .field("message", &self.message)
            .field("options", &self.options)
            .field("default", &self.default)
            .field("cyclic", &self.cyclic)
            .finish_non_exhaustive()
    }
}

/// Ask for one option on the process's terminal.
pub fn select(
    message: &str,
    options: &[&str],
    default: usize,
    config: Option<PromptConfigOverride>,
) -> Result<usize> {
    select_prompt(message, options, default, config).ask()
}

fn select_prompt(
    message: &str,
    options: &[&str],
    default: usize,
    config: Option<PromptConfigOverride>,
) -> SelectPrompt {
    SelectPrompt {
        config,
        ..SelectPrompt::new(message, options.iter().copied()).default(default)
    }
}
