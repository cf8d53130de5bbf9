//! Formatting configuration for prompts.
//!
//! A [`PromptConfig`] is a record of formatting functions that the engines
//! call whenever they draw text. Engines never take one directly: they take
//! an optional [`PromptConfigOverride`] and resolve it against the
//! process-wide override and the built-in default with
//! [`PromptConfig::resolve`]. Each field of an override that is set replaces
//! the same field from the layer below; unset fields fall through.

use std::fmt;
use std::sync::Arc;

use crossterm::style::Stylize;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// A text formatting function, typically wrapping its input in ANSI styling.
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Glyph handed to [`PromptConfig::question_prefix`].
pub const QUESTION_GLYPH: &str = "?";
/// Glyph handed to [`PromptConfig::answer_prefix`].
pub const ANSWER_GLYPH: &str = "✔";

fn identity() -> Formatter {
    Arc::new(|s: &str| s.to_string())
}

fn formatter(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Formatter {
    Arc::new(f)
}

/// Fully resolved formatting functions. Every field is always set.
#[derive(Clone)]
pub struct PromptConfig {
    /// The question text.
    pub prompt: Formatter,
    /// A resolved answer, echoed after the question.
    pub answer: Formatter,
    /// Inline validation errors.
    pub error: Formatter,
    /// Hints: `[Y/n]`, key help, placeholders.
    pub hint: Formatter,
    /// Receives [`QUESTION_GLYPH`]; drawn before a pending question.
    pub question_prefix: Formatter,
    /// Receives [`ANSWER_GLYPH`]; drawn before an answered question.
    pub answer_prefix: Formatter,
    /// A field's short result title, used in place of the question when an
    /// answer is echoed.
    pub result_title: Formatter,
}

impl PromptConfig {
    /// Every formatter is the identity: no ANSI styling at all.
    pub fn plain() -> Self {
        PromptConfig {
            prompt: identity(),
            answer: identity(),
            error: identity(),
            hint: identity(),
            question_prefix: identity(),
            answer_prefix: identity(),
            result_title: identity(),
        }
    }

    /// Apply `layers` in order on top of `base`.
    pub fn layered(base: &PromptConfig, layers: &[&PromptConfigOverride]) -> Self {
        let mut config = base.clone();
        for layer in layers {
            config.apply(layer);
        }
        config
    }

    /// Built-in default ← process-wide override ← `call`.
    pub fn resolve(call: Option<&PromptConfigOverride>) -> Self {
        let guard = GLOBAL_OVERRIDE.read();
        let global: &PromptConfigOverride = &guard;
        match call {
            Some(call) => Self::layered(&Self::default(), &[global, call]),
            None => Self::layered(&Self::default(), &[global]),
        }
    }

    fn apply(&mut self, layer: &PromptConfigOverride) {
        fn set(slot: &mut Formatter, value: &Option<Formatter>) {
            if let Some(f) = value {
                *slot = Arc::clone(f);
            }
        }
        set(&mut self.prompt, &layer.prompt);
        set(&mut self.answer, &layer.answer);
        set(&mut self.error, &layer.error);
        set(&mut self.hint, &layer.hint);
        set(&mut self.question_prefix, &layer.question_prefix);
        set(&mut self.answer_prefix, &layer.answer_prefix);
        set(&mut self.result_title, &layer.result_title);
    }

    /// `? message`, styled.
    pub fn question(&self, message: &str) -> String {
        join(
            &(self.question_prefix)(QUESTION_GLYPH),
            &(self.prompt)(message),
        )
    }

    /// `✔ message answer`, styled. A `result_title` replaces the message.
    pub fn answered(&self, message: &str, result_title: Option<&str>, answer: &str) -> String {
        let title = match result_title {
            Some(title) => (self.result_title)(title),
            None => (self.prompt)(message),
        };
        let line = join(&(self.answer_prefix)(ANSWER_GLYPH), &title);
        join(&line, &(self.answer)(answer))
    }
}

fn join(left: &str, right: &str) -> String {
    if left.is_empty() {
        right.to_string()
    } else if right.is_empty() {
        left.to_string()
    } else {
        format!("{left} {right}")
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        PromptConfig {
            prompt: formatter(|s| s.bold().to_string()),
            answer: formatter(|s| s.cyan().to_string()),
            error: formatter(|s| s.red().to_string()),
            hint: formatter(|s| s.dark_grey().to_string()),
            question_prefix: formatter(|s| s.green().bold().to_string()),
            answer_prefix: formatter(|s| s.green().bold().to_string()),
            result_title: formatter(|s| s.bold().to_string()),
        }
    }
}

impl fmt::Debug for PromptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptConfig").finish_non_exhaustive()
    }
}

/// A partial [`PromptConfig`]; only the fields that are set take effect.
#[derive(Clone, Default)]
pub struct PromptConfigOverride {
    pub prompt: Option<Formatter>,
    pub answer: Option<Formatter>,
    pub error: Option<Formatter>,
    pub hint: Option<Formatter>,
    pub question_prefix: Option<Formatter>,
    pub answer_prefix: Option<Formatter>,
    pub result_title: Option<Formatter>,
}

impl PromptConfigOverride {
    pub fn new() -> Self {
        Self::default()
    }

    /// An override that sets every field to the identity, turning all
    /// styling off.
    pub fn plain() -> Self {
        let plain = PromptConfig::plain();
        PromptConfigOverride {
            prompt: Some(plain.prompt),
            answer: Some(plain.answer),
            error: Some(plain.error),
            hint: Some(plain.hint),
            question_prefix: Some(plain.question_prefix),
            answer_prefix: Some(plain.answer_prefix),
            result_title: Some(plain.result_title),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prompt.is_none()
            && self.answer.is_none()
            && self.error.is_none()
            && self.hint.is_none()
            && self.question_prefix.is_none()
            && self.answer_prefix.is_none()
            && self.result_title.is_none()
    }

    pub fn prompt(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.prompt = Some(formatter(f));
        self
    }

    pub fn answer(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.answer = Some(formatter(f));
        self
    }

    pub fn error(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.error = Some(formatter(f));
        self
    }

    pub fn hint(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.hint = Some(formatter(f));
        self
    }

    pub fn question_prefix(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.question_prefix = Some(formatter(f));
        self
    }

    pub fn answer_prefix(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.answer_prefix = Some(formatter(f));
        self
    }

    pub fn result_title(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.result_title = Some(formatter(f));
        self
    }

    /// Fields set in `other` win over fields set in `self`.
    pub fn merged_with(&self, other: &PromptConfigOverride) -> Self {
        fn pick(mine: &Option<Formatter>, theirs: &Option<Formatter>) -> Option<Formatter> {
            theirs.clone().or_else(|| mine.clone())
        }
        PromptConfigOverride {
            prompt: pick(&self.prompt, &other.prompt),
            answer: pick(&self.answer, &other.answer),
            error: pick(&self.error, &other.error),
            hint: pick(&self.hint, &other.hint),
            question_prefix: pick(&self.question_prefix, &other.question_prefix),
            answer_prefix: pick(&self.answer_prefix, &other.answer_prefix),
            result_title: pick(&self.result_title, &other.result_title),
        }
    }
}

impl fmt::Debug for PromptConfigOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptConfigOverride")
            .field("prompt", &self.prompt.is_some())
            .field("answer", &self.answer.is_some())
            .field("error", &self.error.is_some())
            .field("hint", &self.hint.is_some())
            .field("question_prefix", &self.question_prefix.is_some())
            .field("answer_prefix", &self.answer_prefix.is_some())
            .field("result_title", &self.result_title.is_some())
            .finish()
    }
}

static GLOBAL_OVERRIDE: Lazy<RwLock<PromptConfigOverride>> =
    Lazy::new(|| RwLock::new(PromptConfigOverride::default()));

/// Replace the process-wide override applied to every prompt.
pub fn set_global_config(config: PromptConfigOverride) {
    *GLOBAL_OVERRIDE.write() = config;
}

/// The current process-wide override.
pub fn global_config() -> PromptConfigOverride {
    GLOBAL_OVERRIDE.read().clone()
}

/// Drop the process-wide override, returning to the built-in default.
pub fn reset_global_config() {
    set_global_config(PromptConfigOverride::default());
}
