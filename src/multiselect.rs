//! Pick any number of options from a list.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::config::{PromptConfig, PromptConfigOverride};
use crate::error::{PromptError, Result};
use crate::keys::{read_key, Key};
use crate::navigation::Navigator;
use crate::raw_mode::with_raw_mode_and_fallback;
use crate::render::{clear_region, re_render, render_with_prompt, replace_with_summary};
use crate::terminal::{StdTerminal, TerminalIo};

const MULTI_SELECT_HELP: &str = "↑/↓ to move, space to toggle, enter to confirm";

/// The checked rows of a multi-select over `item_count` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    item_count: usize,
    selected: BTreeSet<usize>,
}

impl SelectionSet {
    /// Indices outside `0..item_count` are dropped.
    pub fn new(item_count: usize, defaults: impl IntoIterator<Item = usize>) -> Self {
        SelectionSet {
            item_count,
            selected: defaults.into_iter().filter(|&i| i < item_count).collect(),
        }
    }

    /// Flip membership of `index`. Out-of-range indices are ignored.
    /// Returns whether `index` is selected afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.item_count {
            return false;
        }
        if self.selected.remove(&index) {
            false
        } else {
            self.selected.insert(index);
            true
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }
}

/// `> [x] option` for the highlighted row, `  [ ] option` otherwise.
pub fn format_multi_select_row(option: &str, highlighted: bool, checked: bool) -> String {
    let pointer = if highlighted { ">" } else { " " };
    let mark = if checked { "[x]" } else { "[ ]" };
    format!("{pointer} {mark} {option}")
}

/// Line-mode answer: 1-based option numbers separated by commas and/or
/// whitespace. Unparseable and out-of-range tokens are dropped; an empty
/// line keeps the (range-checked) defaults.
pub fn parse_multi_select_answer(line: &str, count: usize, defaults: &[usize]) -> Vec<usize> {
    let line = line.trim();
    if line.is_empty() {
        return SelectionSet::new(count, defaults.iter().copied()).indices();
    }
    let picked = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|token| token.trim().parse::<usize>().ok())
        .filter(|n| (1..=count).contains(n))
        .map(|n| n - 1);
    SelectionSet::new(count, picked).indices()
}

/// A multiple-choice list. Resolves to the sorted indices of the checked
/// options, possibly none.
#[derive(Clone, Default)]
pub struct MultiSelectPrompt {
    pub message: String,
    pub options: Vec<String>,
    /// Initially checked options; out-of-range entries are ignored.
    pub defaults: Vec<usize>,
    pub cyclic: bool,
    /// Fewest options that must be checked for Enter to resolve.
    pub min: Option<usize>,
    /// Most options that may be checked for Enter to resolve.
    pub max: Option<usize>,
    pub help: Option<String>,
    pub result_title: Option<String>,
    pub config: Option<PromptConfigOverride>,
}

impl MultiSelectPrompt {
    pub fn new<I, S>(message: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MultiSelectPrompt {
            message: message.into(),
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn defaults(mut self, defaults: impl IntoIterator<Item = usize>) -> Self {
        self.defaults = defaults.into_iter().collect();
        self
    }

    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
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
    pub fn run(&self, term: &mut dyn TerminalIo) -> Result<Vec<usize>> {
        if self.options.is_empty() {
            return Err(PromptError::NoOptions);
        }
        let config = PromptConfig::resolve(self.config.as_ref());
        with_raw_mode_and_fallback(
            term,
            |t| self.run_interactive(t, &config),
            |t| self.run_fallback(t, &config),
        )
    }

    pub fn ask(&self) -> Result<Vec<usize>> {
        self.run(&mut StdTerminal::new())
    }

    /// The message shown when `count` checked options break the bounds.
    fn bounds_error(&self, count: usize) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), _) if count < min => Some(format!("select at least {min}")),
            (_, Some(max)) if count > max => Some(format!("select at most {max}")),
            _ => None,
        }
    }

    fn draw(
        &self,
        term: &mut dyn TerminalIo,
        config: &PromptConfig,
        current: usize,
        selection: &SelectionSet,
        error: Option<&str>,
    ) -> std::io::Result<()> {
        for (i, option) in self.options.iter().enumerate() {
            let row = format_multi_select_row(option, i == current, selection.contains(i));
            if i == current {
                term.println(&(config.answer)(&row))?;
            } else {
                term.println(&row)?;
            }
        }
        if let Some(message) = error {
            term.println(&(config.error)(message))?;
        } else {
            let help = self.help.as_deref().unwrap_or(MULTI_SELECT_HELP);
            if !help.is_empty() {
                term.println(&(config.hint)(help))?;
            }
        }
        Ok(())
    }

    fn summary(&self, selection: &SelectionSet) -> String {
        if selection.is_empty() {
            return "(none)".to_string();
        }
        selection
            .indices()
            .into_iter()
            .map(|i| self.options[i].as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn run_interactive(&self, term: &mut dyn TerminalIo, config: &PromptConfig) -> Result<Vec<usize>> {
        let mut nav = Navigator::new(self.options.len(), self.cyclic);
        let mut selection = SelectionSet::new(self.options.len(), self.defaults.iter().copied());
        let mut error: Option<String> = None;

        let question = config.question(&self.message);
        render_with_prompt(term, &question, |t, _| {
            self.draw(t, config, nav.current(), &selection, None)
        })?;

        loop {
            let key = read_key(term)?;
            let redraw = match key {
                Key::Up | Key::Down => match key.direction() {
                    Some(direction) => nav.process_arrow_key(direction).1,
                    None => false,
                },
                Key::Space => {
                    selection.toggle(nav.current());
                    true
                }
                Key::Enter => match self.bounds_error(selection.len()) {
                    None => {
                        let summary = config.answered(
                            &self.message,
                            self.result_title.as_deref(),
                            &self.summary(&selection),
                        );
                        replace_with_summary(term, &summary)?;
                        return Ok(selection.indices());
                    }
                    Some(message) => {
                        error = Some(message);
                        true
                    }
                },
                Key::CtrlC => {
                    clear_region(term)?;
                    term.flush()?;
                    return Err(PromptError::Cancelled);
                }
                _ => false,
            };
            if redraw {
                // Any redraw other than a failed Enter dismisses the error.
                if !matches!(key, Key::Enter) {
                    error = None;
                }
                let current = nav.current();
                re_render(term, |t, _| {
                    self.draw(t, config, current, &selection, error.as_deref())
                })?;
            }
        }
    }

    fn run_fallback(&self, term: &mut dyn TerminalIo, config: &PromptConfig) -> Result<Vec<usize>> {
        let defaults = SelectionSet::new(self.options.len(), self.defaults.iter().copied());
        term.println(&config.question(&self.message))?;
        for (i, option) in self.options.iter().enumerate() {
            let mark = if defaults.contains(i) { "[x]" } else { "[ ]" };
            term.println(&format!("  {mark} {}) {option}", i + 1))?;
        }
        let shown_defaults = defaults
            .indices()
            .iter()
            .map(|i| (i + 1).to_string())
            .collect::<Vec<_>>()
            .join(",");
        term.print(&(config.hint)(&format!(
            "Enter numbers separated by commas [{shown_defaults}]: "
        )))?;
        term.flush()?;
        let indices = match term.read_line() {
            Ok(line) => parse_multi_select_answer(&line, self.options.len(), &self.defaults),
            Err(e) => {
                debug!(error = %e, "no answer on stdin, using defaults");
                term.println("")?;
                defaults.indices()
            }
        };
        Ok(indices)
    }
}

impl fmt::Debug for MultiSelectPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSelectPrompt")
            .field("message", &self.message)
            .field("options", &self.options)
            .field("defaults", &self.defaults)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

/// Ask for any number of options on the process's terminal.
pub fn multi_select(
    message: &str,
    options: &[&str],
    defaults: &[usize],
    config: Option<PromptConfigOverride>,
) -> Result<Vec<usize>> {
    multi_select_prompt(message, options, defaults, config).ask()
}

fn multi_select_prompt(
    message: &str,
    options: &[&str],
    defaults: &[usize],
    config: Option<PromptConfigOverride>,
) -> MultiSelectPrompt {
    MultiSelectPrompt {
        config,
        ..MultiSelectPrompt::new(message, options.iter().copied()).defaults(defaults.iter().copied())
    }
}
