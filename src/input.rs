//! Text and password prompts.

use std::fmt;
use std::sync::Arc;

use crate::config::{PromptConfig, PromptConfigOverride};
use crate::editor::{edit_line, masked_echo, plain_echo, LineSettings, Validator};
use crate::error::Result;
use crate::terminal::{StdTerminal, TerminalIo};

/// A single line of text.
///
/// Display: `? message placeholder`. An empty answer resolves to `default`
/// when one is set, which is also shown as the placeholder if no explicit
/// placeholder was given.
#[derive(Clone, Default)]
pub struct InputPrompt {
    pub message: String,
    pub default: Option<String>,
    pub placeholder: Option<String>,
    pub validator: Option<Validator>,
    pub result_title: Option<String>,
    pub config: Option<PromptConfigOverride>,
}

impl InputPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        InputPrompt {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn validate(
        mut self,
        validator: impl Fn(&str) -> std::result::Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Short label echoed instead of the message once answered.
    pub fn result_title(mut self, title: impl Into<String>) -> Self {
        self.result_title = Some(title.into());
        self
    }

    pub fn config(mut self, config: PromptConfigOverride) -> Self {
        self.config = Some(config);
        self
    }

    pub fn run(&self, term: &mut dyn TerminalIo) -> Result<String> {
        let settings = LineSettings {
            message: &self.message,
            default: self.default.as_deref(),
            placeholder: self.placeholder.as_deref(),
            validator: self.validator.as_ref(),
            echo: plain_echo(),
            result_title: self.result_title.as_deref(),
            config: PromptConfig::resolve(self.config.as_ref()),
        };
        edit_line(term, &settings)
    }

    /// Run on the process's terminal.
    pub fn ask(&self) -> Result<String> {
        self.run(&mut StdTerminal::new())
    }
}

impl fmt::Debug for InputPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputPrompt")
            .field("message", &self.message)
            .field("default", &self.default)
            .field("placeholder", &self.placeholder)
            .field("has_validator", &self.validator.is_some())
            .field("result_title", &self.result_title)
            .finish_non_exhaustive()
    }
}

/// A secret, echoed as one mask character per typed character.
///
/// When raw mode is unavailable the answer is read as a plain line and echo
/// is up to whatever feeds stdin.
#[derive(Clone)]
pub struct PasswordPrompt {
    pub message: String,
    pub mask: char,
    pub validator: Option<Validator>,
    pub result_title: Option<String>,
    pub config: Option<PromptConfigOverride>,
}

impl Default for PasswordPrompt {
    fn default() -> Self {
        PasswordPrompt {
            message: String::new(),
            mask: '*',
            validator: None,
            result_title: None,
            config: None,
        }
    }
}

impl PasswordPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        PasswordPrompt {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    pub fn validate(
        mut self,
        validator: impl Fn(&str) -> std::result::Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
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

    pub fn run(&self, term: &mut dyn TerminalIo) -> Result<String> {
        let settings = LineSettings {
            message: &self.message,
            default: None,
            placeholder: None,
            validator: self.validator.as_ref(),
            echo: masked_echo(self.mask),
            result_title: self.result_title.as_deref(),
            config: PromptConfig::resolve(self.config.as_ref()),
        };
        edit_line(term, &settings)
    }

    pub fn ask(&self) -> Result<String> {
        self.run(&mut StdTerminal::new())
    }
}

impl fmt::Debug for PasswordPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordPrompt")
            .field("message", &self.message)
            .field("mask", &self.mask)
            .field("has_validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

/// Ask for a line of text on the process's terminal.
pub fn input(
    message: &str,
    default: Option<&str>,
    validator: Option<Validator>,
    config: Option<PromptConfigOverride>,
) -> Result<String> {
    let mut prompt = InputPrompt::new(message);
    prompt.default = default.map(str::to_string);
    prompt.validator = validator;
    prompt.config = config;
    prompt.ask()
}

/// Ask for a secret on the process's terminal.
pub fn password(
    message: &str,
    validator: Option<Validator>,
    config: Option<PromptConfigOverride>,
) -> Result<String> {
    let mut prompt = PasswordPrompt::new(message);
    prompt.validator = validator;
    prompt.config = config;
    prompt.ask()
}
