//! Ready-made validators for input and password prompts.

use std::sync::Arc;

use crate::editor::Validator;

/// Wrap a closure as a [`Validator`].
pub fn from_fn(f: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static) -> Validator {
    Arc::new(f)
}

/// Rejects empty (or whitespace-only) answers.
pub fn required(field: &str) -> Validator {
    let message = format!("{field} is required");
    from_fn(move |s| {
        if s.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Rejects answers shorter than `min` characters.
pub fn min_length(min: usize) -> Validator {
    from_fn(move |s| {
        if s.chars().count() < min {
            Err(format!("must be at least {min} characters"))
        } else {
            Ok(())
        }
    })
}

/// Rejects answers longer than `max` characters.
pub fn max_length(max: usize) -> Validator {
    from_fn(move |s| {
        if s.chars().count() > max {
            Err(format!("must be at most {max} characters"))
        } else {
            Ok(())
        }
    })
}

/// Passes only if every validator passes; reports the first failure.
pub fn all(validators: Vec<Validator>) -> Validator {
    from_fn(move |s| validators.iter().try_for_each(|v| v(s)))
}
