//! The terminal capability every prompt talks through.
//!
//! Engines never touch stdin/stdout or the OS tty directly. They borrow a
//! `&mut dyn TerminalIo`, which is either a [`StdTerminal`] bound to the
//! process's real terminal or a [`ScriptedTerminal`] that replays canned input
//! and records what was drawn.

use std::io;

use crate::error::Result;

mod scripted;
mod stdio;

pub use scripted::{ScriptedTerminal, TermOp};
pub use stdio::StdTerminal;

/// Terminal mode captured by [`TerminalIo::make_raw`], handed back to
/// [`TerminalIo::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "raw mode must be restored with TerminalIo::restore"]
pub struct RawModeState {
    was_raw: bool,
}

impl RawModeState {
    /// `was_raw` records whether the terminal was already raw before the
    /// call, in which case restoring leaves it raw.
    pub fn new(was_raw: bool) -> Self {
        RawModeState { was_raw }
    }

    pub fn was_raw(&self) -> bool {
        self.was_raw
    }
}

/// Byte-level access to a terminal plus the cursor and format primitives the
/// renderers need.
///
/// Output methods may buffer; callers [`flush`](TerminalIo::flush) before
/// blocking on input. [`make_raw`](TerminalIo::make_raw) failing is an
/// expected condition (piped stdin, CI) and every engine recovers from it by
/// switching to line-based input.
pub trait TerminalIo {
    /// Read one raw byte. End of input is an `UnexpectedEof` error.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Read one line, without its line terminator. End of input is an
    /// `UnexpectedEof` error.
    fn read_line(&mut self) -> io::Result<String>;

    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Print `text` followed by `\r\n`, which lands at column 0 in raw mode
    /// as well as in cooked mode.
    fn println(&mut self, text: &str) -> io::Result<()> {
        self.print(text)?;
        self.print("\r\n")
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Switch to raw mode. Fails with [`PromptError::NotATerminal`] when
    /// input is not an interactive terminal.
    ///
    /// [`PromptError::NotATerminal`]: crate::PromptError::NotATerminal
    fn make_raw(&mut self) -> Result<RawModeState>;

    fn restore(&mut self, state: RawModeState) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
    fn save_cursor(&mut self) -> io::Result<()>;
    fn restore_cursor(&mut self) -> io::Result<()>;

    /// Clear the whole current line; the cursor column is unchanged.
    fn clear_line(&mut self) -> io::Result<()>;

    /// Clear from the cursor to the end of the screen.
    fn clear_to_end(&mut self) -> io::Result<()>;

    /// Move to column 0 of the current line.
    fn move_to_start(&mut self) -> io::Result<()>;

    /// Move up `n` lines, keeping the column. `0` is a no-op.
    fn move_up(&mut self, n: u16) -> io::Result<()>;

    /// Reset colors and attributes.
    fn reset_format(&mut self) -> io::Result<()>;
}
