//! Flicker-free redraws of the region below a prompt line.
//!
//! The prompt line is printed once, followed by two line breaks. Every draw
//! of the region is measured in line breaks; afterwards the cursor moves
//! back up by that count and the position is saved as the anchor. Moving
//! up is relative, so the anchor marks the top of the region even when
//! drawing scrolled the screen (a prompt started on the last row). Every
//! redraw jumps back to the anchor, clears to the end of the screen and
//! draws the whole region again, so the output never grows however often
//! it is redrawn. The renderer has no idea what it draws: widgets hand it
//! a closure.

use std::io;

use crate::error::Result;
use crate::terminal::{RawModeState, TerminalIo};

/// Draw the prompt line, set the anchor and draw the region for the first
/// time. `render` receives `is_first = true`.
pub fn render_with_prompt<F>(term: &mut dyn TerminalIo, prompt: &str, mut render: F) -> io::Result<()>
where
    F: FnMut(&mut dyn TerminalIo, bool) -> io::Result<()>,
{
    term.print(prompt)?;
    term.reset_format()?;
    term.print("\r\n\r\n")?;
    term.save_cursor()?;
    draw_region(term, &mut render, true)?;
    term.flush()
}

/// Redraw the region from the anchor. `render` receives `is_first = false`.
pub fn re_render<F>(term: &mut dyn TerminalIo, mut render: F) -> io::Result<()>
where
    F: FnMut(&mut dyn TerminalIo, bool) -> io::Result<()>,
{
    term.restore_cursor()?;
    term.reset_format()?;
    term.clear_to_end()?;
    draw_region(term, &mut render, false)?;
    term.flush()
}

/// Wipe the region, leaving the cursor at the anchor.
pub fn clear_region(term: &mut dyn TerminalIo) -> io::Result<()> {
    term.restore_cursor()?;
    term.reset_format()?;
    term.clear_to_end()
}

/// Wipe the region and the prompt line above it, then print `summary` in
/// their place. Used when a list prompt resolves.
pub fn replace_with_summary(term: &mut dyn TerminalIo, summary: &str) -> io::Result<()> {
    clear_region(term)?;
    // Prompt line plus the two line breaks below it.
    term.move_up(2)?;
    term.move_to_start()?;
    term.clear_to_end()?;
    term.println(summary)?;
    term.flush()
}

/// Run `render`, then return to the top of what it drew and save that
/// position as the anchor.
fn draw_region<F>(term: &mut dyn TerminalIo, render: &mut F, is_first: bool) -> io::Result<()>
where
    F: FnMut(&mut dyn TerminalIo, bool) -> io::Result<()>,
{
    let mut counter = LineCounter { term: &mut *term, breaks: 0 };
    let measured: &mut dyn TerminalIo = &mut counter;
    render(measured, is_first)?;
    let breaks = u16::try_from(counter.breaks).unwrap_or(u16::MAX);
    term.move_up(breaks)?;
    term.move_to_start()?;
    term.save_cursor()
}

/// Passes everything through to `term`, counting the line breaks printed.
struct LineCounter<'a> {
    term: &'a mut dyn TerminalIo,
    breaks: usize,
}

impl TerminalIo for LineCounter<'_> {
    fn read_byte(&mut self) -> io::Result<u8> {
        self.term.read_byte()
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.term.read_line()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.breaks += text.matches('\n').count();
        self.term.print(text)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.breaks += bytes.iter().filter(|b| **b == b'\n').count();
        self.term.write_bytes(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.term.flush()
    }

    fn make_raw(&mut self) -> Result<RawModeState> {
        self.term.make_raw()
    }

    fn restore(&mut self, state: RawModeState) -> io::Result<()> {
        self.term.restore(state)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.term.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.term.show_cursor()
    }

    fn save_cursor(&mut self) -> io::Result<()> {
        self.term.save_cursor()
    }

    fn restore_cursor(&mut self) -> io::Result<()> {
        self.term.restore_cursor()
    }

    fn clear_line(&mut self) -> io::Result<()> {
        self.term.clear_line()
    }

    fn clear_to_end(&mut self) -> io::Result<()> {
        self.term.clear_to_end()
    }

    fn move_to_start(&mut self) -> io::Result<()> {
        self.term.move_to_start()
    }

    fn move_up(&mut self, n: u16) -> io::Result<()> {
        self.breaks = self.breaks.saturating_sub(usize::from(n));
        self.term.move_up(n)
    }

    fn reset_format(&mut self) -> io::Result<()> {
        self.term.reset_format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{ScriptedTerminal, TermOp};

    #[test]
    fn first_render_anchors_below_blank_lines() {
        let mut term = ScriptedTerminal::new();
        let mut calls = Vec::new();
        render_with_prompt(&mut term, "? Pick", |t, first| {
            calls.push(first);
            t.print("row")
        })
        .unwrap();
        assert_eq!(calls, vec![true]);
        assert_eq!(
            &term.ops()[..5],
            &[
                TermOp::Print("? Pick".into()),
                TermOp::ResetFormat,
                TermOp::Print("\r\n\r\n".into()),
                TermOp::SaveCursor,
                TermOp::Print("row".into()),
            ]
        );
    }

    #[test]
    fn re_render_restores_and_clears_first() {
        let mut term = ScriptedTerminal::new();
        render_with_prompt(&mut term, "? Pick", |t, _| t.print("a")).unwrap();
        let before = term.ops().len();
        let mut firsts = Vec::new();
        re_render(&mut term, |t, first| {
            firsts.push(first);
            t.print("b")
        })
        .unwrap();
        assert_eq!(firsts, vec![false]);
        assert_eq!(
            &term.ops()[before..before + 4],
            &[
                TermOp::RestoreCursor,
                TermOp::ResetFormat,
                TermOp::ClearToEnd,
                TermOp::Print("b".into()),
            ]
        );
        assert_eq!(term.last_frame(), "b");
    }

    #[test]
    fn anchor_is_saved_at_top_of_drawn_rows() {
        let mut term = ScriptedTerminal::new();
        render_with_prompt(&mut term, "?", |t, _| {
            t.println("one")?;
            t.println("two")?;
            t.print("hint")
        })
        .unwrap();
        assert!(term.ops().ends_with(&[
            TermOp::MoveUp(2),
            TermOp::MoveToStart,
            TermOp::SaveCursor,
            TermOp::Flush,
        ]));
        assert_eq!(term.last_frame(), "one\r\ntwo\r\nhint");
    }

    #[test]
    fn every_redraw_returns_to_the_same_rows() {
        let mut term = ScriptedTerminal::new();
        render_with_prompt(&mut term, "?", |t, _| t.println("x")).unwrap();
        for _ in 0..5 {
            re_render(&mut term, |t, _| t.println("x")).unwrap();
        }
        assert_eq!(term.count(&TermOp::RestoreCursor), 5);
        assert_eq!(term.count(&TermOp::MoveUp(1)), 6);
        assert_eq!(term.count(&TermOp::SaveCursor), 7);
    }
}
