use std::io::{self, BufRead, IsTerminal, Read, Write};

use crossterm::{cursor, style, terminal, ExecutableCommand, QueueableCommand};
use tracing::debug;

use super::{RawModeState, TerminalIo};
use crate::error::{PromptError, Result};

/// The process's real terminal: reads stdin, draws on stdout with crossterm.
///
/// Output is queued and only reaches the terminal on [`flush`] or right
/// before the next blocking read. If the value is dropped while it still
/// holds raw mode (a panic unwinding through a prompt), the drop restores
/// cooked mode and shows the cursor.
///
/// [`flush`]: TerminalIo::flush
pub struct StdTerminal {
    out: io::Stdout,
    entered_raw: bool,
}

impl StdTerminal {
    pub fn new() -> Self {
        StdTerminal {
            out: io::stdout(),
            entered_raw: false,
        }
    }
}

impl Drop for StdTerminal {
    fn drop(&mut self) {
        if self.entered_raw {
            let _ = self.out.execute(cursor::Show);
            let _ = terminal::disable_raw_mode();
        }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StdTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdTerminal").finish_non_exhaustive()
    }
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")
}

impl TerminalIo for StdTerminal {
    fn read_byte(&mut self) -> io::Result<u8> {
        self.out.flush()?;
        let mut buf = [0u8; 1];
        match io::stdin().lock().read(&mut buf)? {
            0 => Err(eof()),
            _ => Ok(buf[0]),
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.out.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(eof());
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(style::Print(text))?;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn make_raw(&mut self) -> Result<RawModeState> {
        if !io::stdin().is_terminal() {
            debug!("stdin is not a terminal, raw mode unavailable");
            return Err(PromptError::NotATerminal);
        }
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
            self.entered_raw = true;
        }
        Ok(RawModeState::new(was_raw))
    }

    fn restore(&mut self, state: RawModeState) -> io::Result<()> {
        self.out.flush()?;
        if !state.was_raw() {
            terminal::disable_raw_mode()?;
            self.entered_raw = false;
        }
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.out.queue(cursor::Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.out.queue(cursor::Show)?;
        Ok(())
    }

    fn save_cursor(&mut self) -> io::Result<()> {
        self.out.queue(cursor::SavePosition)?;
        Ok(())
    }

    fn restore_cursor(&mut self) -> io::Result<()> {
        self.out.queue(cursor::RestorePosition)?;
        Ok(())
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.out
            .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        Ok(())
    }

    fn clear_to_end(&mut self) -> io::Result<()> {
        self.out
            .queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        Ok(())
    }

    fn move_to_start(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveToColumn(0))?;
        Ok(())
    }

    fn move_up(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            self.out.queue(cursor::MoveUp(n))?;
        }
        Ok(())
    }

    fn reset_format(&mut self) -> io::Result<()> {
        self.out.queue(style::ResetColor)?;
        Ok(())
    }
}
