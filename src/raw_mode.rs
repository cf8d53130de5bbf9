//! Running interactive code in raw mode, with a line-based escape hatch.

use tracing::{debug, warn};

use crate::error::Result;
use crate::terminal::TerminalIo;

/// Run `body` in raw mode with the cursor hidden, or `fallback` if raw mode
/// cannot be entered.
///
/// Once raw mode is acquired the cursor is shown again and the previous mode
/// restored on every exit path of `body`: success, validation loops bailing
/// out, cancellation, read errors. When raw mode is refused, `fallback` runs
/// and the terminal mode is never touched.
///
/// A failure to restore is reported only if `body` itself succeeded;
/// otherwise the body's error wins and the restore failure is logged.
pub fn with_raw_mode_and_fallback<T>(
    term: &mut dyn TerminalIo,
    body: impl FnOnce(&mut dyn TerminalIo) -> Result<T>,
    fallback: impl FnOnce(&mut dyn TerminalIo) -> Result<T>,
) -> Result<T> {
    let state = match term.make_raw() {
        Ok(state) => state,
        Err(e) => {
            debug!(error = %e, "raw mode unavailable, using line input");
            return fallback(term);
        }
    };
    debug!("entered raw mode");

    let result = match term.hide_cursor() {
        Ok(()) => body(&mut *term),
        Err(e) => Err(e.into()),
    };

    let shown = term.show_cursor();
    let restored = term.restore(state);
    debug!(ok = result.is_ok(), "left raw mode");

    match result {
        Ok(value) => {
            shown?;
            restored?;
            Ok(value)
        }
        Err(e) => {
            if let Err(restore_err) = shown.and(restored) {
                warn!(error = %restore_err, "failed to restore terminal after prompt error");
            }
            Err(e)
        }
    }
}
