//! Single-line text editing for input and password prompts.
//!
//! [`EditorBuffer`] is the pure part: characters, a cursor, and the
//! placeholder state. [`edit_line`] drives it from key presses, redrawing the
//! prompt line after every change. Plain and masked prompts share all of it;
//! they differ only in the [`Echo`] function that turns buffer text into what
//! is shown.

use std::sync::Arc;

use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use crate::config::PromptConfig;
use crate::error::{PromptError, Result};
use crate::keys::{read_key, Direction, Key};
use crate::raw_mode::with_raw_mode_and_fallback;
use crate::terminal::TerminalIo;

/// Checks a candidate answer. `Err` carries the message shown to the user.
pub type Validator = Arc<dyn Fn(&str) -> std::result::Result<(), String> + Send + Sync>;

/// Turns buffer text into the text drawn on screen.
pub type Echo = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Echo the text as typed.
pub fn plain_echo() -> Echo {
    Arc::new(|s: &str| s.to_string())
}

/// Echo one `mask` per character.
pub fn masked_echo(mask: char) -> Echo {
    Arc::new(move |s: &str| std::iter::repeat(mask).take(s.chars().count()).collect())
}

/// Text plus a cursor in `0..=len`, counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    chars: Vec<char>,
    cursor: usize,
    placeholder_dismissed: bool,
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        EditorBuffer {
            cursor: chars.len(),
            chars,
            placeholder_dismissed: false,
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Text after the cursor.
    pub fn tail(&self) -> String {
        self.chars[self.cursor..].iter().collect()
    }

    /// Whether a placeholder, if there is one, should be drawn: the buffer
    /// is empty and the user has not pushed past it.
    pub fn shows_placeholder(&self) -> bool {
        self.chars.is_empty() && !self.placeholder_dismissed
    }

    /// Insert at the cursor and step past the new character.
    pub fn process_char(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns whether anything
    /// changed.
    pub fn process_backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Delete the character under the cursor. Returns whether anything
    /// changed.
    pub fn process_delete(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    /// Move the cursor left or right within the text. With a placeholder
    /// showing, Right dismisses it and leaves the cursor at 0. Up and Down
    /// do nothing. Returns whether a redraw is needed.
    pub fn process_arrow_key(&mut self, direction: Direction, has_placeholder: bool) -> bool {
        match direction {
            Direction::Right if has_placeholder && self.shows_placeholder() => {
                self.placeholder_dismissed = true;
                self.cursor = 0;
                true
            }
            Direction::Left if self.cursor > 0 => {
                self.cursor -= 1;
                true
            }
            Direction::Right if self.cursor < self.chars.len() => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.chars.len();
        self.cursor = self.chars.len();
        moved
    }

    /// Run `validator` on the trimmed text. No validator always passes.
    pub fn validate_input(&self, validator: Option<&Validator>) -> std::result::Result<(), String> {
        match validator {
            Some(validate) => validate(self.text().trim()),
            None => Ok(()),
        }
    }
}

/// Everything [`edit_line`] needs to know about one prompt.
pub(crate) struct LineSettings<'a> {
    pub message: &'a str,
    pub default: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub validator: Option<&'a Validator>,
    pub echo: Echo,
    pub result_title: Option<&'a str>,
    pub config: PromptConfig,
}

impl LineSettings<'_> {
    fn prompt_text(&self) -> String {
        format!("{} ", self.config.question(self.message))
    }

    /// The answer for a buffer: its trimmed text, or the default when empty.
    fn resolve(&self, text: &str) -> String {
        let trimmed = text.trim();
        match self.default {
            Some(default) if trimmed.is_empty() => default.to_string(),
            _ => trimmed.to_string(),
        }
    }

    fn check(&self, value: &str) -> std::result::Result<(), String> {
        match self.validator {
            Some(validate) => validate(value),
            None => Ok(()),
        }
    }

    fn shown_placeholder(&self) -> Option<&str> {
        self.placeholder.or(self.default).filter(|p| !p.is_empty())
    }
}

/// Read one line: interactively in raw mode, or from a plain line read when
/// raw mode is unavailable.
///
/// The validator runs after every edit, but its message only appears once
/// Enter has been pressed; from then on it follows the buffer live.
pub(crate) fn edit_line(term: &mut dyn TerminalIo, settings: &LineSettings<'_>) -> Result<String> {
    with_raw_mode_and_fallback(
        term,
        |t| edit_line_interactive(t, settings),
        |t| edit_line_fallback(t, settings),
    )
}

fn edit_line_interactive(term: &mut dyn TerminalIo, settings: &LineSettings<'_>) -> Result<String> {
    // Text input wants a visible cursor.
    term.show_cursor()?;
    let prompt = settings.prompt_text();
    let has_placeholder = settings.shown_placeholder().is_some();
    let mut buffer = EditorBuffer::new();
    let mut submitted = false;
    let mut error: Option<String> = None;
    redraw(term, settings, &prompt, &buffer, None, false)?;

    loop {
        let key = read_key(term)?;
        let changed = match key {
            Key::Enter => {
                submitted = true;
                let value = settings.resolve(&buffer.text());
                match settings.check(&value) {
                    Ok(()) => {
                        term.move_to_start()?;
                        term.clear_to_end()?;
                        let shown = (settings.echo)(&value);
                        term.print(&settings.config.answered(settings.message, settings.result_title, &shown))?;
                        term.print("\r\n")?;
                        term.flush()?;
                        return Ok(value);
                    }
                    Err(message) => {
                        debug!(%message, "input rejected");
                        error = Some(message);
                        redraw(term, settings, &prompt, &buffer, error.as_deref(), true)?;
                        continue;
                    }
                }
            }
            Key::CtrlC => {
                term.move_to_start()?;
                term.clear_to_end()?;
                term.flush()?;
                return Err(PromptError::Cancelled);
            }
            Key::Char(c) => {
                buffer.process_char(c);
                true
            }
            Key::Space => {
                buffer.process_char(' ');
                true
            }
            Key::Backspace => buffer.process_backspace(),
            Key::Delete => buffer.process_delete(),
            Key::Home => buffer.move_home(),
            Key::End => buffer.move_end(),
            Key::Left | Key::Right | Key::Up | Key::Down => key
                .direction()
                .is_some_and(|d| buffer.process_arrow_key(d, has_placeholder)),
            Key::Unknown => false,
        };
        if !changed {
            continue;
        }
        let had_error = error.is_some();
        let rejection = settings.check(&settings.resolve(&buffer.text())).err();
        trace!(valid = rejection.is_none(), "buffer revalidated");
        error = rejection.filter(|_| submitted);
        redraw(term, settings, &prompt, &buffer, error.as_deref(), had_error)?;
    }
}

/// Redraw the input line, and the error line below it when `error` is set.
/// `clear_below` wipes a previously drawn error line.
///
/// Prompt and echo must fit on one terminal row: clearing only reaches the
/// cursor's row and the backspaces that place the cursor do not cross rows,
/// so a wrapped line leaves its earlier rows behind.
fn redraw(
    term: &mut dyn TerminalIo,
    settings: &LineSettings<'_>,
    prompt: &str,
    buffer: &EditorBuffer,
    error: Option<&str>,
    clear_below: bool,
) -> Result<()> {
    term.move_to_start()?;
    if clear_below || error.is_some() {
        term.clear_to_end()?;
    } else {
        term.clear_line()?;
    }
    if let Some(message) = error {
        term.print("\r\n")?;
        term.print(&(settings.config.error)(message))?;
        term.move_up(1)?;
        term.move_to_start()?;
    }
    term.print(prompt)?;

    let placeholder = settings.shown_placeholder().filter(|_| buffer.shows_placeholder());
    let trailing_width = match placeholder {
        Some(placeholder) => {
            term.print(&(settings.config.hint)(placeholder))?;
            placeholder.width()
        }
        None => {
            term.print(&(settings.echo)(&buffer.text()))?;
            (settings.echo)(&buffer.tail()).width()
        }
    };
    if trailing_width > 0 {
        term.print(&"\u{8}".repeat(trailing_width))?;
    }
    term.flush()?;
    Ok(())
}

fn edit_line_fallback(term: &mut dyn TerminalIo, settings: &LineSettings<'_>) -> Result<String> {
    let mut prompt = settings.prompt_text();
    if let Some(default) = settings.default.filter(|d| !d.is_empty()) {
        prompt.push_str(&(settings.config.hint)(&format!("({default})")));
        prompt.push(' ');
    }
    loop {
        term.print(&prompt)?;
        term.flush()?;
        let line = term.read_line()?;
        let value = settings.resolve(&line);
        match settings.check(&value) {
            Ok(()) => return Ok(value),
            Err(message) => {
                term.println(&(settings.config.error)(&message))?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn insert_in_the_middle() {
        let mut buf = EditorBuffer::with_text("ac");
        buf.process_arrow_key(Direction::Left, false);
        buf.process_char('b');
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), 2);
        assert_eq!(buf.tail(), "c");
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut buf = EditorBuffer::with_text("x");
        buf.move_home();
        assert!(!buf.process_backspace());
        assert_eq!(buf.text(), "x");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut buf = EditorBuffer::with_text("abc");
        buf.process_arrow_key(Direction::Left, false);
        assert!(buf.process_backspace());
        assert_eq!(buf.text(), "ac");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn delete_removes_under_cursor() {
        let mut buf = EditorBuffer::with_text("abc");
        buf.move_home();
        assert!(buf.process_delete());
        assert_eq!(buf.text(), "bc");
        buf.move_end();
        assert!(!buf.process_delete());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut buf = EditorBuffer::with_text("ab");
        assert!(!buf.process_arrow_key(Direction::Right, false));
        buf.process_arrow_key(Direction::Left, false);
        buf.process_arrow_key(Direction::Left, false);
        assert!(!buf.process_arrow_key(Direction::Left, false));
        assert_eq!(buf.cursor(), 0);
        assert!(!buf.process_arrow_key(Direction::Up, false));
    }

    #[test]
    fn right_dismisses_placeholder() {
        let mut buf = EditorBuffer::new();
        assert!(buf.shows_placeholder());
        assert!(buf.process_arrow_key(Direction::Right, true));
        assert!(!buf.shows_placeholder());
        assert_eq!(buf.cursor(), 0);
        assert!(!buf.process_arrow_key(Direction::Right, true));
    }

    #[test]
    fn typing_hides_placeholder() {
        let mut buf = EditorBuffer::new();
        buf.process_char('a');
        assert!(!buf.shows_placeholder());
        buf.process_backspace();
        assert!(buf.shows_placeholder());
    }

    #[test]
    fn multibyte_chars_count_once() {
        let mut buf = EditorBuffer::with_text("héllo");
        assert_eq!(buf.len(), 5);
        buf.process_backspace();
        assert_eq!(buf.text(), "héll");
    }

    #[test]
    fn missing_validator_passes() {
        assert!(EditorBuffer::with_text("").validate_input(None).is_ok());
    }

    #[test]
    fn validator_sees_trimmed_text() {
        let v: Validator = Arc::new(|s: &str| {
            if s == "ok" {
                Ok(())
            } else {
                Err(format!("got {s:?}"))
            }
        });
        assert!(EditorBuffer::with_text("  ok ").validate_input(Some(&v)).is_ok());
        assert_eq!(
            EditorBuffer::with_text("no").validate_input(Some(&v)),
            Err("got \"no\"".to_string())
        );
    }

    #[test]
    fn redraw_stays_on_the_cursor_row() {
        use crate::terminal::{ScriptedTerminal, TermOp};

        let settings = LineSettings {
            message: "Name",
            default: None,
            placeholder: None,
            validator: None,
            echo: plain_echo(),
            result_title: None,
            config: PromptConfig::plain(),
        };
        let mut term = ScriptedTerminal::new();
        let buffer = EditorBuffer::with_text("abc");
        redraw(&mut term, &settings, "? Name ", &buffer, None, false).unwrap();
        assert_eq!(
            term.ops(),
            &[
                TermOp::MoveToStart,
                TermOp::ClearLine,
                TermOp::Print("? Name ".into()),
                TermOp::Print("abc".into()),
                TermOp::Flush,
            ]
        );
    }

    proptest! {
        #[test]
        fn mask_is_one_star_per_char(s in "\\PC{0,40}") {
            let shown = masked_echo('*')(&s);
            prop_assert_eq!(shown.chars().count(), s.chars().count());
            prop_assert!(shown.chars().all(|c| c == '*'));
        }

        #[test]
        fn cursor_never_leaves_the_buffer(ops in proptest::collection::vec(0u8..6, 0..60)) {
            let mut buf = EditorBuffer::new();
            for op in ops {
                match op {
                    0 => buf.process_char('x'),
                    1 => { buf.process_backspace(); }
                    2 => { buf.process_arrow_key(Direction::Left, false); }
                    3 => { buf.process_arrow_key(Direction::Right, false); }
                    4 => { buf.process_delete(); }
                    _ => { buf.move_home(); }
                }
                prop_assert!(buf.cursor() <= buf.len());
            }
        }
    }
}
