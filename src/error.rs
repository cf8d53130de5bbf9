//! Error taxonomy shared by every prompt engine.

use std::io;

use thiserror::Error;

/// Errors returned by prompt calls.
///
/// Validation failures never show up here: they are rendered inline and the
/// prompt keeps looping. What does show up is either the user backing out
/// ([`Cancelled`](PromptError::Cancelled)), the terminal going away
/// ([`Io`](PromptError::Io)), or a prompt that could not be built at all.
///
/// ```rust,ignore
/// match rawprompt::confirm("Deploy now?", false, None) {
///     Ok(yes) => deploy(yes),
///     Err(e) if e.is_cancelled() => println!("Nothing changed"),
///     Err(e) => return Err(e.into()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user pressed Ctrl-C. The terminal has already been restored.
    #[error("prompt cancelled")]
    Cancelled,

    /// Reading from or writing to the terminal failed.
    #[error("terminal i/o error: {0}")]
    Io(#[from] io::Error),

    /// Raw mode is unavailable because stdin is not an interactive terminal.
    ///
    /// Engines treat this as the signal to switch to line-based input; it
    /// only reaches callers that use the terminal capability directly.
    #[error("stdin is not an interactive terminal")]
    NotATerminal,

    /// A select or multi-select prompt was built with no options.
    #[error("no options to choose from")]
    NoOptions,

    /// The whole-form validator rejected the collected answers.
    #[error("form rejected: {0}")]
    FormValidation(String),

    /// A form field failed; `key` names the field.
    #[error("field `{key}`: {source}")]
    Field {
        key: String,
        #[source]
        source: Box<PromptError>,
    },
}

impl PromptError {
    /// Wrap this error with the key of the form field that produced it.
    pub fn in_field(self, key: impl Into<String>) -> Self {
        PromptError::Field {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error is a user cancellation, looking through any
    /// field wrappers added by (nested) forms.
    pub fn is_cancelled(&self) -> bool {
        match self {
            PromptError::Cancelled => true,
            PromptError::Field { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }

    /// The innermost error, with all field wrappers removed.
    pub fn root(&self) -> &PromptError {
        match self {
            PromptError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Dotted path of field keys leading to the innermost error, e.g.
    /// `"account.email"`. Empty when the error did not come from a form.
    pub fn field_path(&self) -> String {
        let mut keys = Vec::new();
        let mut current = self;
        while let PromptError::Field { key, source } = current {
            keys.push(key.as_str());
            current = source;
        }
        keys.join(".")
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_is_seen_through_field_wrappers() {
        let e = PromptError::Cancelled.in_field("email").in_field("account");
        assert!(e.is_cancelled());
        assert!(matches!(e.root(), PromptError::Cancelled));
        assert_eq!(e.field_path(), "account.email");
    }

    #[test]
    fn other_errors_are_not_cancellation() {
        assert!(!PromptError::NoOptions.is_cancelled());
        assert!(!PromptError::NoOptions.in_field("color").is_cancelled());
        assert_eq!(PromptError::NoOptions.field_path(), "");
    }

    #[test]
    fn display_includes_field_key() {
        let e = PromptError::NoOptions.in_field("color");
        assert_eq!(e.to_string(), "field `color`: no options to choose from");
    }

    #[test]
    fn io_errors_convert() {
        let e: PromptError = io::Error::new(io::ErrorKind::UnexpectedEof, "closed").into();
        assert!(matches!(e, PromptError::Io(_)));
        assert!(e.to_string().contains("closed"));
    }
}
