use std::collections::VecDeque;
use std::io;

use super::{RawModeState, TerminalIo};
use crate::error::{PromptError, Result};

/// One call made against a [`ScriptedTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOp {
    Print(String),
    WriteBytes(Vec<u8>),
    Flush,
    MakeRaw,
    Restore,
    HideCursor,
    ShowCursor,
    SaveCursor,
    RestoreCursor,
    ClearLine,
    ClearToEnd,
    MoveToStart,
    MoveUp(u16),
    ResetFormat,
}

/// An in-memory terminal that replays scripted input and records every
/// operation performed on it.
///
/// Raw-mode prompts consume [`keys`](ScriptedTerminal::keys); fallback prompts
/// consume [`lines`](ScriptedTerminal::lines). When either queue runs dry the
/// next read fails with `UnexpectedEof`, just like a closed stdin.
///
/// ```rust
/// use rawprompt::{ConfirmPrompt, ScriptedTerminal};
///
/// let mut term = ScriptedTerminal::new().keys("n");
/// let answer = ConfirmPrompt::new("Continue?").default(true).run(&mut term).unwrap();
/// assert!(!answer);
/// assert!(!term.is_raw());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<u8>,
    lines: VecDeque<String>,
    non_interactive: bool,
    raw: bool,
    cursor_hidden: bool,
    ops: Vec<TermOp>,
}

impl ScriptedTerminal {
    /// A terminal that accepts raw mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal whose `make_raw` always fails, like piped stdin.
    pub fn non_interactive() -> Self {
        ScriptedTerminal {
            non_interactive: true,
            ..Self::default()
        }
    }

    /// Queue raw input bytes.
    pub fn keys(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.push_keys(bytes);
        self
    }

    /// Queue input lines for line-based reads.
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn push_keys(&mut self, bytes: impl AsRef<[u8]>) {
        self.input.extend(bytes.as_ref().iter().copied());
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Every operation performed so far, in order.
    pub fn ops(&self) -> &[TermOp] {
        &self.ops
    }

    /// How many times `op` was performed.
    pub fn count(&self, op: &TermOp) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }

    /// All printed text concatenated, escape sequences excluded.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for op in &self.ops {
            match op {
                TermOp::Print(s) => text.push_str(s),
                TermOp::WriteBytes(b) => text.push_str(&String::from_utf8_lossy(b)),
                _ => {}
            }
        }
        text
    }

    /// Text printed by the most recent draw of a list prompt: everything
    /// after the last cursor restore (or the first anchor save when there
    /// was no redraw) up to the next anchor save.
    pub fn last_frame(&self) -> String {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == TermOp::RestoreCursor)
            .or_else(|| self.ops.iter().position(|op| *op == TermOp::SaveCursor))
            .map_or(0, |i| i + 1);
        let mut text = String::new();
        for op in self.ops[start..].iter().take_while(|op| **op != TermOp::SaveCursor) {
            if let TermOp::Print(s) = op {
                text.push_str(s);
            }
        }
        text
    }

    /// The recorded output as the escape sequences [`StdTerminal`] would
    /// have written, ready to feed to a terminal emulator.
    ///
    /// [`StdTerminal`]: crate::StdTerminal
    pub fn ansi(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            match op {
                TermOp::Print(s) => out.push_str(s),
                TermOp::WriteBytes(b) => out.push_str(&String::from_utf8_lossy(b)),
                TermOp::HideCursor => out.push_str("\x1b[?25l"),
                TermOp::ShowCursor => out.push_str("\x1b[?25h"),
                TermOp::SaveCursor => out.push_str("\x1b7"),
                TermOp::RestoreCursor => out.push_str("\x1b8"),
                TermOp::ClearLine => out.push_str("\x1b[2K"),
                TermOp::ClearToEnd => out.push_str("\x1b[J"),
                TermOp::MoveToStart => out.push_str("\x1b[1G"),
                TermOp::MoveUp(n) => out.push_str(&format!("\x1b[{n}A")),
                TermOp::ResetFormat => out.push_str("\x1b[0m"),
                TermOp::Flush | TermOp::MakeRaw | TermOp::Restore => {}
            }
        }
        out
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Unread raw input bytes.
    pub fn pending_keys(&self) -> usize {
        self.input.len()
    }

    /// Unread input lines.
    pub fn pending_lines(&self) -> usize {
        self.lines.len()
    }
}

fn exhausted() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
}

impl TerminalIo for ScriptedTerminal {
    fn read_byte(&mut self) -> io::Result<u8> {
        self.input.pop_front().ok_or_else(exhausted)
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.lines.pop_front().ok_or_else(exhausted)
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.ops.push(TermOp::Print(text.to_string()));
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.ops.push(TermOp::WriteBytes(bytes.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Flush);
        Ok(())
    }

    fn make_raw(&mut self) -> Result<RawModeState> {
        if self.non_interactive {
            return Err(PromptError::NotATerminal);
        }
        self.ops.push(TermOp::MakeRaw);
        let state = RawModeState::new(self.raw);
        self.raw = true;
        Ok(state)
    }

    fn restore(&mut self, state: RawModeState) -> io::Result<()> {
        self.ops.push(TermOp::Restore);
        self.raw = state.was_raw();
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::HideCursor);
        self.cursor_hidden = true;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ShowCursor);
        self.cursor_hidden = false;
        Ok(())
    }

    fn save_cursor(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::SaveCursor);
        Ok(())
    }

    fn restore_cursor(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::RestoreCursor);
        Ok(())
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ClearLine);
        Ok(())
    }

    fn clear_to_end(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ClearToEnd);
        Ok(())
    }

    fn move_to_start(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::MoveToStart);
        Ok(())
    }

    fn move_up(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            self.ops.push(TermOp::MoveUp(n));
        }
        Ok(())
    }

    fn reset_format(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ResetFormat);
        Ok(())
    }
}
