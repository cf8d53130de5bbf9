//! Interactive terminal prompts built on raw mode and ANSI escapes.
//!
//! Every prompt works against a [`TerminalIo`]: [`StdTerminal`] for the
//! process's own terminal, [`ScriptedTerminal`] to drive a prompt from a byte
//! script in tests. When the terminal cannot go raw (stdin is a pipe, a CI
//! runner, ...) each prompt falls back to plain line input.
//!
//! ```rust,no_run
//! use rawprompt::{ConfirmPrompt, SelectPrompt};
//!
//! # fn main() -> rawprompt::Result<()> {
//! if ConfirmPrompt::new("Deploy now?").default(true).ask()? {
//!     let targets = ["staging", "production"];
//!     let env = SelectPrompt::new("Where to?", targets).ask()?;
//!     println!("deploying to {}", targets[env]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Styling comes from [`PromptConfig`]: a built-in default, a process-wide
//! override set with [`set_global_config`], and a per-prompt override.

pub mod config;
pub mod confirm;
pub mod editor;
pub mod error;
pub mod form;
pub mod input;
pub mod keys;
pub mod multiselect;
pub mod navigation;
pub mod raw_mode;
pub mod render;
pub mod select;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod validate;

pub use config::{
    global_config, reset_global_config, set_global_config, Formatter, PromptConfig,
    PromptConfigOverride,
};
pub use confirm::{confirm, ConfirmPrompt};
pub use editor::{EditorBuffer, Validator};
pub use error::{PromptError, Result};
pub use form::{
    EditorInputProvider, FieldKind, Form, FormField, FormResult, FormValue, InputProvider,
    InputRequest,
};
pub use input::{input, password, InputPrompt, PasswordPrompt};
pub use keys::{read_key, Direction, Key};
pub use multiselect::{multi_select, MultiSelectPrompt, SelectionSet};
pub use navigation::Navigator;
pub use raw_mode::with_raw_mode_and_fallback;
pub use select::{select, SelectPrompt};
pub use spinner::{Spinner, SpinnerStyle};
pub use table::Table;
pub use terminal::{RawModeState, ScriptedTerminal, StdTerminal, TermOp, TerminalIo};
