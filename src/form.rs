//! Multi-field forms.
//!
//! A [`Form`] runs its fields in declaration order and collects the answers
//! into a [`FormResult`]. Fields can be skipped by a condition over the
//! answers collected so far, and a field can itself be a form whose answers
//! land in a nested [`FormResult`].
//!
//! ```rust,ignore
//! use rawprompt::{Form, FormField};
//!
//! let result = Form::new(vec![
//!     FormField::input("name", "What's your name?"),
//!     FormField::confirm("has_email", "Do you have an email address?", false),
//!     FormField::input("email", "Email address")
//!         .when(|r| r.get_bool("has_email") == Some(true)),
//! ])
//! .ask()?;
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::config::{PromptConfig, PromptConfigOverride};
use crate::confirm::ConfirmPrompt;
use crate::editor::Validator;
use crate::error::{PromptError, Result};
use crate::input::{InputPrompt, PasswordPrompt};
use crate::multiselect::MultiSelectPrompt;
use crate::select::SelectPrompt;
use crate::terminal::{StdTerminal, TerminalIo};

/// Decides from the answers so far whether a field runs.
pub type Condition = Arc<dyn Fn(&FormResult) -> bool + Send + Sync>;

/// Checks the complete set of answers once every field has run.
pub type FormValidator = Arc<dyn Fn(&FormResult) -> std::result::Result<(), String> + Send + Sync>;

// ── Results ──────────────────────────────────────────────────────────────

/// One answer in a [`FormResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    String(String),
    Bool(bool),
    Int(i64),
    IntList(Vec<i64>),
    Form(FormResult),
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::String(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::String(value.to_string())
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Int(value)
    }
}

impl From<Vec<i64>> for FormValue {
    fn from(value: Vec<i64>) -> Self {
        FormValue::IntList(value)
    }
}

impl From<FormResult> for FormValue {
    fn from(value: FormResult) -> Self {
        FormValue::Form(value)
    }
}

/// Answers keyed by field key, in the order the fields ran. Skipped fields
/// have no entry. Serializes as an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormResult {
    values: IndexMap<String, FormValue>,
}

impl FormResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            FormValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            FormValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            FormValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn get_int_list(&self, key: &str) -> Option<&[i64]> {
        match self.get(key)? {
            FormValue::IntList(list) => Some(list),
            _ => None,
        }
    }

    pub fn get_form(&self, key: &str) -> Option<&FormResult> {
        match self.get(key)? {
            FormValue::Form(form) => Some(form),
            _ => None,
        }
    }
}

// ── Fields ───────────────────────────────────────────────────────────────

/// What a field asks for, with the settings for that kind of prompt.
#[derive(Clone)]
pub enum FieldKind {
    Confirm {
        default: bool,
    },
    Input {
        default: Option<String>,
        placeholder: Option<String>,
        validator: Option<Validator>,
    },
    Password {
        validator: Option<Validator>,
    },
    Select {
        options: Vec<String>,
        default: usize,
    },
    MultiSelect {
        options: Vec<String>,
        defaults: Vec<usize>,
    },
    Form(Vec<FormField>),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Confirm { .. } => "confirm",
            FieldKind::Input { .. } => "input",
            FieldKind::Password { .. } => "password",
            FieldKind::Select { .. } => "select",
            FieldKind::MultiSelect { .. } => "multi-select",
            FieldKind::Form(_) => "form",
        }
    }
}

/// One question in a form.
///
/// The kind-specific setters ([`default_value`](FormField::default_value),
/// [`validate`](FormField::validate), ...) only affect kinds that have the
/// setting and leave other kinds untouched.
#[derive(Clone)]
pub struct FormField {
    /// Key of the answer in the [`FormResult`].
    pub key: String,
    pub prompt: String,
    pub kind: FieldKind,
    /// Runs the field only when it returns true.
    pub condition: Option<Condition>,
    /// Echoed in place of `prompt` once answered.
    pub result_title: Option<String>,
}

impl FormField {
    fn with_kind(key: impl Into<String>, prompt: impl Into<String>, kind: FieldKind) -> Self {
        FormField {
            key: key.into(),
            prompt: prompt.into(),
            kind,
            condition: None,
            result_title: None,
        }
    }

    pub fn confirm(key: impl Into<String>, prompt: impl Into<String>, default: bool) -> Self {
        Self::with_kind(key, prompt, FieldKind::Confirm { default })
    }

    pub fn input(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::with_kind(
            key,
            prompt,
            FieldKind::Input {
                default: None,
                placeholder: None,
                validator: None,
            },
        )
    }

    pub fn password(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::with_kind(key, prompt, FieldKind::Password { validator: None })
    }

    pub fn select<I, S>(key: impl Into<String>, prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::with_kind(key, prompt, FieldKind::Select { options, default: 0 })
    }

    pub fn multi_select<I, S>(key: impl Into<String>, prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::with_kind(
            key,
            prompt,
            FieldKind::MultiSelect {
                options,
                defaults: Vec::new(),
            },
        )
    }

    /// A nested form; its answers are stored as a nested [`FormResult`].
    pub fn form(key: impl Into<String>, prompt: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self::with_kind(key, prompt, FieldKind::Form(fields))
    }

    /// Only run this field when `condition` holds for the answers so far.
    pub fn when(mut self, condition: impl Fn(&FormResult) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn result_title(mut self, title: impl Into<String>) -> Self {
        self.result_title = Some(title.into());
        self
    }

    /// Input: answer used for an empty line.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        if let FieldKind::Input { default, .. } = &mut self.kind {
            *default = Some(value.into());
        }
        self
    }

    /// Input: greyed-out text shown while the line is empty.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        if let FieldKind::Input { placeholder, .. } = &mut self.kind {
            *placeholder = Some(text.into());
        }
        self
    }

    /// Input and password: reject answers until `validate` passes.
    pub fn validate(
        mut self,
        validate: impl Fn(&str) -> std::result::Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        match &mut self.kind {
            FieldKind::Input { validator, .. } | FieldKind::Password { validator } => {
                *validator = Some(Arc::new(validate));
            }
            _ => {}
        }
        self
    }

    /// Input and password: like [`validate`](FormField::validate) for a
    /// ready-made [`Validator`].
    pub fn validator(mut self, check: Validator) -> Self {
        match &mut self.kind {
            FieldKind::Input { validator, .. } | FieldKind::Password { validator } => {
                *validator = Some(check);
            }
            _ => {}
        }
        self
    }

    /// Select: initially highlighted option.
    pub fn default_index(mut self, index: usize) -> Self {
        if let FieldKind::Select { default, .. } = &mut self.kind {
            *default = index;
        }
        self
    }

    /// Multi-select: initially checked options.
    pub fn default_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        if let FieldKind::MultiSelect { defaults, .. } = &mut self.kind {
            *defaults = indices.into_iter().collect();
        }
        self
    }
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("key", &self.key)
            .field("prompt", &self.prompt)
            .field("kind", &self.kind.name())
            .field("conditional", &self.condition.is_some())
            .field("result_title", &self.result_title)
            .finish()
    }
}

// ── Input provider ───────────────────────────────────────────────────────

/// What a form needs from an [`InputProvider`] for one text field.
#[derive(Clone, Copy)]
pub struct InputRequest<'a> {
    pub key: &'a str,
    pub message: &'a str,
    pub default: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub validator: Option<&'a Validator>,
    pub result_title: Option<&'a str>,
    pub config: Option<&'a PromptConfigOverride>,
}

/// Supplies answers for a form's input and password fields.
///
/// [`EditorInputProvider`] reads them from the terminal with the line editor.
/// Applications can substitute their own, for example to take values from
/// flags or the environment and only prompt for what is missing.
pub trait InputProvider {
    fn input(&mut self, term: &mut dyn TerminalIo, request: &InputRequest<'_>) -> Result<String>;
    fn password(&mut self, term: &mut dyn TerminalIo, request: &InputRequest<'_>) -> Result<String>;
}

/// Reads form text fields from the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorInputProvider;

impl InputProvider for EditorInputProvider {
    fn input(&mut self, term: &mut dyn TerminalIo, request: &InputRequest<'_>) -> Result<String> {
        InputPrompt {
            message: request.message.to_string(),
            default: request.default.map(str::to_string),
            placeholder: request.placeholder.map(str::to_string),
            validator: request.validator.cloned(),
            result_title: request.result_title.map(str::to_string),
            config: request.config.cloned(),
        }
        .run(term)
    }

    fn password(&mut self, term: &mut dyn TerminalIo, request: &InputRequest<'_>) -> Result<String> {
        let mut prompt = PasswordPrompt::new(request.message);
        prompt.validator = request.validator.cloned();
        prompt.result_title = request.result_title.map(str::to_string);
        prompt.config = request.config.cloned();
        prompt.run(term)
    }
}

// ── Form ─────────────────────────────────────────────────────────────────

/// An ordered list of fields plus an optional check over all answers.
#[derive(Clone, Default)]
pub struct Form {
    /// Printed once before the first field.
    pub title: Option<String>,
    pub fields: Vec<FormField>,
    pub validator: Option<FormValidator>,
    /// Applied to every prompt in the form, nested forms included.
    pub config: Option<PromptConfigOverride>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Form {
            fields,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn validate(
        mut self,
        validate: impl Fn(&FormResult) -> std::result::Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validate));
        self
    }

    pub fn config(mut self, config: PromptConfigOverride) -> Self {
        self.config = Some(config);
        self
    }

    /// Run with text fields read by the line editor.
    pub fn run(&self, term: &mut dyn TerminalIo) -> Result<FormResult> {
        self.run_with(term, &mut EditorInputProvider)
    }

    /// Run with text fields answered by `provider`.
    ///
    /// Errors from a field are wrapped with its key
    /// ([`PromptError::Field`]); a rejected result is
    /// [`PromptError::FormValidation`].
    pub fn run_with(
        &self,
        term: &mut dyn TerminalIo,
        provider: &mut dyn InputProvider,
    ) -> Result<FormResult> {
        if let Some(title) = &self.title {
            let config = PromptConfig::resolve(self.config.as_ref());
            term.println(&(config.prompt)(title))?;
            term.flush()?;
        }
        let mut runner = FieldRunner {
            term,
            provider,
            config: self.config.as_ref(),
        };
        let result = runner.run_fields(&self.fields)?;
        if let Some(validate) = &self.validator {
            validate(&result).map_err(PromptError::FormValidation)?;
        }
        Ok(result)
    }

    pub fn ask(&self) -> Result<FormResult> {
        self.run(&mut StdTerminal::new())
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("title", &self.title)
            .field("fields", &self.fields)
            .field("has_validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

struct FieldRunner<'t, 'p, 'c> {
    term: &'t mut dyn TerminalIo,
    provider: &'p mut dyn InputProvider,
    config: Option<&'c PromptConfigOverride>,
}

impl FieldRunner<'_, '_, '_> {
    fn run_fields(&mut self, fields: &[FormField]) -> Result<FormResult> {
        let mut result = FormResult::new();
        for field in fields {
            if let Some(condition) = &field.condition {
                if !condition(&result) {
                    debug!(key = %field.key, "condition false, skipping field");
                    continue;
                }
            }
            let value = self.run_field(field).map_err(|e| e.in_field(&field.key))?;
            result.insert(field.key.clone(), value);
        }
        Ok(result)
    }

    fn run_field(&mut self, field: &FormField) -> Result<FormValue> {
        debug!(key = %field.key, kind = field.kind.name(), "running field");
        let result_title = field.result_title.clone();
        let config = self.config.cloned();
        let value = match &field.kind {
            FieldKind::Confirm { default } => {
                let prompt = ConfirmPrompt {
                    message: field.prompt.clone(),
                    default: *default,
                    result_title,
                    config,
                };
                FormValue::Bool(prompt.run(&mut *self.term)?)
            }
            FieldKind::Input {
                default,
                placeholder,
                validator,
            } => {
                let request = InputRequest {
                    key: &field.key,
                    message: &field.prompt,
                    default: default.as_deref(),
                    placeholder: placeholder.as_deref(),
                    validator: validator.as_ref(),
                    result_title: field.result_title.as_deref(),
                    config: self.config,
                };
                FormValue::String(self.provider.input(&mut *self.term, &request)?)
            }
            FieldKind::Password { validator } => {
                let request = InputRequest {
                    key: &field.key,
                    message: &field.prompt,
                    default: None,
                    placeholder: None,
                    validator: validator.as_ref(),
                    result_title: field.result_title.as_deref(),
                    config: self.config,
                };
                FormValue::String(self.provider.password(&mut *self.term, &request)?)
            }
            FieldKind::Select { options, default } => {
                let prompt = SelectPrompt {
                    message: field.prompt.clone(),
                    options: options.clone(),
                    default: *default,
                    result_title,
                    config,
                    ..Default::default()
                };
                FormValue::Int(to_int(prompt.run(&mut *self.term)?))
            }
            FieldKind::MultiSelect { options, defaults } => {
                let prompt = MultiSelectPrompt {
                    message: field.prompt.clone(),
                    options: options.clone(),
                    defaults: defaults.clone(),
                    result_title,
                    config,
                    ..Default::default()
                };
                let indices = prompt.run(&mut *self.term)?;
                FormValue::IntList(indices.into_iter().map(to_int).collect())
            }
            FieldKind::Form(fields) => {
                if !field.prompt.is_empty() {
                    let resolved = PromptConfig::resolve(self.config);
                    self.term.println(&resolved.question(&field.prompt))?;
                    self.term.flush()?;
                }
                FormValue::Form(self.run_fields(fields)?)
            }
        };
        Ok(value)
    }
}

fn to_int(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
